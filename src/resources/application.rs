//! `coolify_application`: one resource kind over six source types.
//!
//! `source_type` selects the create endpoint and which fields must be set.
//! Updates use a single body shape whatever the source type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{limits_schema, scope_schema, CreateRequest, ImportFormat, LimitsModel, Resource};
use crate::client::models::{
    Application, ApplicationBuild, ApplicationScope, CreateApplication, CreateDockerComposeApplication,
    CreateDockerImageApplication, CreateDockerfileApplication, CreateGitApplication, DeploymentHooks,
    HealthCheck, UpdateApplication, WebhookSecrets,
};
use crate::client::{Collection, DeleteOptions};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::schema::Diagnostic;
use crate::validation::{collect_missing, require_for};
use crate::value::Attr;

/// Where an application's code comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Public git repository.
    Public,
    /// Private repository reached through a GitHub App.
    PrivateGithubApp,
    /// Private repository reached with a deploy key.
    PrivateDeployKey,
    /// Inline Dockerfile.
    Dockerfile,
    /// Prebuilt registry image.
    DockerImage,
    /// Inline compose file.
    DockerCompose,
}

impl SourceType {
    /// Every source type.
    pub const ALL: [SourceType; 6] = [
        Self::Public,
        Self::PrivateGithubApp,
        Self::PrivateDeployKey,
        Self::Dockerfile,
        Self::DockerImage,
        Self::DockerCompose,
    ];

    /// The attribute value, which is also the create path segment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::PrivateGithubApp => "private-github-app",
            Self::PrivateDeployKey => "private-deploy-key",
            Self::Dockerfile => "dockerfile",
            Self::DockerImage => "dockerimage",
            Self::DockerCompose => "dockercompose",
        }
    }

    /// Whether the code comes from a git repository.
    pub fn is_git(self) -> bool {
        matches!(
            self,
            Self::Public | Self::PrivateGithubApp | Self::PrivateDeployKey
        )
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or_else(|| {
            let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
            ProviderError::validation(
                "source_type",
                "Invalid source_type",
                format!(
                    "source_type {} is not supported. Valid values: {}",
                    s,
                    valid.join(", ")
                ),
            )
        })
    }
}

/// Redirect modes the platform accepts.
const REDIRECTS: [&str; 3] = ["both", "non-www", "www"];

/// Keep the configured repository when the platform reports it in another
/// notation, e.g. `owner/repo` for `https://github.com/owner/repo`.
pub fn preserve_git_repository(prior: &Attr<String>, remote: Attr<String>) -> Attr<String> {
    match (prior, &remote) {
        (Attr::Value(configured), Attr::Value(reported))
            if !configured.is_empty() && !reported.is_empty() && configured != reported =>
        {
            prior.clone()
        },
        _ => remote,
    }
}

/// Health check attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckModel {
    pub health_check_enabled: Attr<bool>,
    pub health_check_path: Attr<String>,
    pub health_check_port: Attr<String>,
    pub health_check_host: Attr<String>,
    pub health_check_method: Attr<String>,
    pub health_check_return_code: Attr<i64>,
    pub health_check_scheme: Attr<String>,
    pub health_check_response_text: Attr<String>,
    pub health_check_interval: Attr<i64>,
    pub health_check_timeout: Attr<i64>,
    pub health_check_retries: Attr<i64>,
    pub health_check_start_period: Attr<i64>,
}

impl HealthCheckModel {
    fn from_wire(wire: HealthCheck) -> Self {
        Self {
            health_check_enabled: Attr::from_wire(wire.health_check_enabled),
            health_check_path: Attr::from_wire(wire.health_check_path),
            health_check_port: Attr::from_wire(wire.health_check_port),
            health_check_host: Attr::from_wire(wire.health_check_host),
            health_check_method: Attr::from_wire(wire.health_check_method),
            health_check_return_code: Attr::from_wire(wire.health_check_return_code),
            health_check_scheme: Attr::from_wire(wire.health_check_scheme),
            health_check_response_text: Attr::from_wire(wire.health_check_response_text),
            health_check_interval: Attr::from_wire(wire.health_check_interval),
            health_check_timeout: Attr::from_wire(wire.health_check_timeout),
            health_check_retries: Attr::from_wire(wire.health_check_retries),
            health_check_start_period: Attr::from_wire(wire.health_check_start_period),
        }
    }

    fn to_wire(&self) -> HealthCheck {
        HealthCheck {
            health_check_enabled: self.health_check_enabled.to_wire(),
            health_check_path: self.health_check_path.to_wire(),
            health_check_port: self.health_check_port.to_wire(),
            health_check_host: self.health_check_host.to_wire_omit_empty(),
            health_check_method: self.health_check_method.to_wire(),
            health_check_return_code: self.health_check_return_code.to_wire(),
            health_check_scheme: self.health_check_scheme.to_wire(),
            health_check_response_text: self.health_check_response_text.to_wire(),
            health_check_interval: self.health_check_interval.to_wire(),
            health_check_timeout: self.health_check_timeout.to_wire(),
            health_check_retries: self.health_check_retries.to_wire(),
            health_check_start_period: self.health_check_start_period.to_wire(),
        }
    }
}

/// Container options and deployment hooks.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentModel {
    pub custom_labels: Attr<String>,
    pub custom_docker_run_options: Attr<String>,
    pub post_deployment_command: Attr<String>,
    pub post_deployment_command_container: Attr<String>,
    pub pre_deployment_command: Attr<String>,
    pub pre_deployment_command_container: Attr<String>,
    pub redirect: Attr<String>,
    pub watch_paths: Attr<String>,
}

impl DeploymentModel {
    fn from_wire(wire: DeploymentHooks) -> Self {
        Self {
            custom_labels: Attr::from_wire(wire.custom_labels),
            custom_docker_run_options: Attr::from_wire(wire.custom_docker_run_options),
            post_deployment_command: Attr::from_wire(wire.post_deployment_command),
            post_deployment_command_container: Attr::from_wire(wire.post_deployment_command_container),
            pre_deployment_command: Attr::from_wire(wire.pre_deployment_command),
            pre_deployment_command_container: Attr::from_wire(wire.pre_deployment_command_container),
            redirect: Attr::from_wire(wire.redirect),
            watch_paths: Attr::from_wire(wire.watch_paths),
        }
    }

    fn to_wire(&self) -> DeploymentHooks {
        DeploymentHooks {
            custom_labels: self.custom_labels.to_wire(),
            custom_docker_run_options: self.custom_docker_run_options.to_wire(),
            post_deployment_command: self.post_deployment_command.to_wire(),
            post_deployment_command_container: self.post_deployment_command_container.to_wire(),
            pre_deployment_command: self.pre_deployment_command.to_wire(),
            pre_deployment_command_container: self.pre_deployment_command_container.to_wire(),
            // anything outside the accepted set is dropped
            redirect: self
                .redirect
                .to_wire()
                .filter(|r| REDIRECTS.contains(&r.as_str())),
            watch_paths: self.watch_paths.to_wire(),
        }
    }
}

/// Manual webhook secrets. Never returned by a read.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSecretsModel {
    pub manual_webhook_secret_github: Attr<String>,
    pub manual_webhook_secret_gitlab: Attr<String>,
    pub manual_webhook_secret_bitbucket: Attr<String>,
    pub manual_webhook_secret_gitea: Attr<String>,
}

impl WebhookSecretsModel {
    fn to_wire(&self) -> WebhookSecrets {
        WebhookSecrets {
            manual_webhook_secret_github: self.manual_webhook_secret_github.to_wire(),
            manual_webhook_secret_gitlab: self.manual_webhook_secret_gitlab.to_wire(),
            manual_webhook_secret_bitbucket: self.manual_webhook_secret_bitbucket.to_wire(),
            manual_webhook_secret_gitea: self.manual_webhook_secret_gitea.to_wire(),
        }
    }
}

/// Local record of an application.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationModel {
    pub uuid: Attr<String>,
    pub source_type: Attr<String>,

    pub project_uuid: Attr<String>,
    pub server_uuid: Attr<String>,
    pub environment_name: Attr<String>,
    pub environment_uuid: Attr<String>,
    pub destination_uuid: Attr<String>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub domains: Attr<String>,
    pub instant_deploy: Attr<bool>,

    pub git_repository: Attr<String>,
    pub git_branch: Attr<String>,
    pub build_pack: Attr<String>,
    pub ports_exposes: Attr<String>,
    pub github_app_uuid: Attr<String>,
    pub private_key_uuid: Attr<String>,
    pub dockerfile: Attr<String>,
    pub docker_registry_image_name: Attr<String>,
    pub docker_registry_image_tag: Attr<String>,
    pub docker_compose_raw: Attr<String>,

    pub base_directory: Attr<String>,
    pub build_command: Attr<String>,
    pub start_command: Attr<String>,
    pub install_command: Attr<String>,
    pub publish_directory: Attr<String>,
    pub ports_mappings: Attr<String>,
    pub git_commit_sha: Attr<String>,
    pub is_static: Attr<bool>,
    pub static_image: Attr<String>,

    #[serde(flatten)]
    pub health: HealthCheckModel,
    #[serde(flatten)]
    pub limits: LimitsModel,
    #[serde(flatten)]
    pub deployment: DeploymentModel,
    #[serde(flatten)]
    pub secrets: WebhookSecretsModel,

    pub use_build_server: Attr<bool>,
    pub is_http_basic_auth_enabled: Attr<bool>,
    pub http_basic_auth_username: Attr<String>,
    pub http_basic_auth_password: Attr<String>,
    pub docker_compose_location: Attr<String>,
    pub docker_compose_custom_start_command: Attr<String>,
    pub docker_compose_custom_build_command: Attr<String>,
}

impl ApplicationModel {
    /// The string fields `source` cannot do without, in reporting order.
    pub fn required_fields(&self, source: SourceType) -> Vec<(&'static str, &Attr<String>)> {
        match source {
            SourceType::Public | SourceType::PrivateGithubApp | SourceType::PrivateDeployKey => {
                let mut fields = vec![
                    ("git_repository", &self.git_repository),
                    ("git_branch", &self.git_branch),
                    ("build_pack", &self.build_pack),
                    ("ports_exposes", &self.ports_exposes),
                ];
                if source == SourceType::PrivateGithubApp {
                    fields.push(("github_app_uuid", &self.github_app_uuid));
                }
                if source == SourceType::PrivateDeployKey {
                    fields.push(("private_key_uuid", &self.private_key_uuid));
                }
                fields
            },
            SourceType::Dockerfile => vec![("dockerfile", &self.dockerfile)],
            SourceType::DockerImage => vec![
                ("docker_registry_image_name", &self.docker_registry_image_name),
                ("ports_exposes", &self.ports_exposes),
            ],
            SourceType::DockerCompose => vec![("docker_compose_raw", &self.docker_compose_raw)],
        }
    }

    /// Resolve `source_type` and check the fields it requires.
    pub fn checked_source(&self) -> Result<SourceType, ProviderError> {
        let source: SourceType = self.source_type.as_str().parse()?;
        for (field, value) in self.required_fields(source) {
            require_for(field, value, "source_type", source.as_str())?;
        }
        Ok(source)
    }

    fn scope(&self) -> ApplicationScope {
        ApplicationScope {
            project_uuid: self.project_uuid.to_wire(),
            server_uuid: self.server_uuid.to_wire(),
            environment_name: self.environment_name.to_wire(),
            environment_uuid: self.environment_uuid.to_wire_omit_empty(),
            destination_uuid: self.destination_uuid.to_wire_omit_empty(),
            name: self.name.to_wire(),
            description: self.description.to_wire(),
            instant_deploy: self.instant_deploy.to_wire(),
        }
    }

    fn build(&self) -> ApplicationBuild {
        ApplicationBuild {
            git_commit_sha: self.git_commit_sha.to_wire(),
            install_command: self.install_command.to_wire(),
            build_command: self.build_command.to_wire(),
            start_command: self.start_command.to_wire(),
            ports_mappings: self.ports_mappings.to_wire(),
            base_directory: self.base_directory.to_wire(),
            publish_directory: self.publish_directory.to_wire(),
            is_static: self.is_static.to_wire(),
            static_image: self.static_image.to_wire(),
            docker_registry_image_name: self.docker_registry_image_name.to_wire(),
            docker_registry_image_tag: self.docker_registry_image_tag.to_wire(),
            docker_compose_location: self.docker_compose_location.to_wire(),
            docker_compose_raw: self.docker_compose_raw.to_wire(),
            docker_compose_custom_start_command: self.docker_compose_custom_start_command.to_wire(),
            docker_compose_custom_build_command: self.docker_compose_custom_build_command.to_wire(),
            is_http_basic_auth_enabled: self.is_http_basic_auth_enabled.to_wire(),
            http_basic_auth_username: self.http_basic_auth_username.to_wire(),
            http_basic_auth_password: self.http_basic_auth_password.to_wire(),
            use_build_server: self.use_build_server.to_wire(),
        }
    }

    fn create_body(&self, source: SourceType) -> CreateApplication {
        match source {
            SourceType::Public | SourceType::PrivateGithubApp | SourceType::PrivateDeployKey => {
                CreateApplication::Git(CreateGitApplication {
                    scope: self.scope(),
                    git_repository: self.git_repository.required_scalar(),
                    git_branch: self.git_branch.required_scalar(),
                    build_pack: self.build_pack.required_scalar(),
                    ports_exposes: self.ports_exposes.required_scalar(),
                    github_app_uuid: (source == SourceType::PrivateGithubApp)
                        .then(|| self.github_app_uuid.required_scalar()),
                    private_key_uuid: (source == SourceType::PrivateDeployKey)
                        .then(|| self.private_key_uuid.required_scalar()),
                    domains: self.domains.to_wire(),
                    build: self.build(),
                    health: self.health.to_wire(),
                    limits: self.limits.to_wire(),
                    hooks: self.deployment.to_wire(),
                    secrets: self.secrets.to_wire(),
                })
            },
            SourceType::Dockerfile => CreateApplication::Dockerfile(CreateDockerfileApplication {
                scope: self.scope(),
                dockerfile: self.dockerfile.required_scalar(),
                domains: self.domains.to_wire(),
                build_pack: self.build_pack.to_wire(),
                ports_exposes: self.ports_exposes.to_wire(),
                ports_mappings: self.ports_mappings.to_wire(),
                base_directory: self.base_directory.to_wire(),
                docker_registry_image_name: self.docker_registry_image_name.to_wire(),
                docker_registry_image_tag: self.docker_registry_image_tag.to_wire(),
                use_build_server: self.use_build_server.to_wire(),
                health: self.health.to_wire(),
                limits: self.limits.to_wire(),
                hooks: self.deployment.to_wire(),
                secrets: self.secrets.to_wire(),
            }),
            SourceType::DockerImage => CreateApplication::DockerImage(CreateDockerImageApplication {
                scope: self.scope(),
                docker_registry_image_name: self.docker_registry_image_name.required_scalar(),
                ports_exposes: self.ports_exposes.required_scalar(),
                docker_registry_image_tag: self.docker_registry_image_tag.to_wire(),
                domains: self.domains.to_wire(),
                ports_mappings: self.ports_mappings.to_wire(),
                health: self.health.to_wire(),
                limits: self.limits.to_wire(),
                hooks: self.deployment.to_wire(),
                secrets: self.secrets.to_wire(),
            }),
            SourceType::DockerCompose => CreateApplication::DockerCompose(CreateDockerComposeApplication {
                scope: self.scope(),
                docker_compose_raw: self.docker_compose_raw.required_scalar(),
                use_build_server: self.use_build_server.to_wire(),
            }),
        }
    }
}

/// The application kind.
pub struct ApplicationResource;

impl Resource for ApplicationResource {
    type Model = ApplicationModel;
    type Wire = Application;

    const TYPE_NAME: &'static str = "coolify_application";
    const LABEL: &'static str = "application";
    const COLLECTION: Collection = Collection::Applications;
    const IMPORT: ImportFormat = ImportFormat::Bare;
    const NOT_ECHOED: &'static [&'static str] = &[
        "source_type",
        "project_uuid",
        "server_uuid",
        "environment_name",
        "environment_uuid",
        "destination_uuid",
        "instant_deploy",
        "github_app_uuid",
        "private_key_uuid",
        "is_static",
        "manual_webhook_secret_github",
        "manual_webhook_secret_gitlab",
        "manual_webhook_secret_bitbucket",
        "manual_webhook_secret_gitea",
        "use_build_server",
        "http_basic_auth_password",
    ];
    const SENSITIVE: &'static [&'static str] = &[
        "manual_webhook_secret_github",
        "manual_webhook_secret_gitlab",
        "manual_webhook_secret_bitbucket",
        "manual_webhook_secret_gitea",
        "http_basic_auth_password",
    ];
    const DELETE_OPTIONS: Option<DeleteOptions> = Some(DeleteOptions::CLEANUP);

    fn base_schema() -> Schema {
        let optional = |description: &str| Attribute::optional_string().with_description(description);
        let merged = |description: &str| Attribute::optional_computed_string().with_description(description);
        let merged_int = |description: &str| Attribute::optional_computed_int64().with_description(description);

        scope_schema()
            .merged_with(limits_schema())
            .with_description("Create, read, update, and delete a Coolify application resource.")
            .with_attribute("uuid", Attribute::computed_string().with_description("UUID of the application."))
            .with_attribute(
                "source_type",
                Attribute::required_string()
                    .with_description(
                        "Type of application source. One of: public, private-github-app, \
                         private-deploy-key, dockerfile, dockerimage, dockercompose",
                    )
                    .with_force_new(),
            )
            .with_attribute(
                "environment_uuid",
                Attribute::optional_string()
                    .with_description("UUID of the environment. Will replace environment_name in future.")
                    .with_force_new(),
            )
            .with_attribute("name", merged("Name of the application."))
            .with_attribute("description", merged("Description of the application."))
            .with_attribute("domains", merged("Application domains."))
            .with_attribute(
                "instant_deploy",
                Attribute::optional_computed_bool()
                    .with_description("Instant deploy the application.")
                    .with_default(Value::Bool(false)),
            )
            // source
            .with_attribute("git_repository", merged("Git repository URL."))
            .with_attribute("git_branch", optional("Git branch."))
            .with_attribute("build_pack", optional("Build pack type (nixpacks, static, dockerfile, dockercompose)."))
            .with_attribute("ports_exposes", optional("Ports to expose."))
            .with_attribute("github_app_uuid", optional("GitHub App UUID."))
            .with_attribute("private_key_uuid", optional("Private key UUID."))
            .with_attribute("dockerfile", optional("Dockerfile content."))
            .with_attribute("docker_registry_image_name", optional("Docker registry image name."))
            .with_attribute("docker_registry_image_tag", optional("Docker registry image tag."))
            .with_attribute("docker_compose_raw", optional("Docker Compose raw content."))
            // build
            .with_attribute("base_directory", merged("Base directory for all commands."))
            .with_attribute("build_command", optional("Build command."))
            .with_attribute("start_command", optional("Start command."))
            .with_attribute("install_command", optional("Install command."))
            .with_attribute("publish_directory", optional("Publish directory."))
            .with_attribute("ports_mappings", optional("Ports mappings."))
            .with_attribute("git_commit_sha", merged("Git commit SHA."))
            .with_attribute(
                "is_static",
                Attribute::optional_bool().with_description("Flag to indicate if the application is static."),
            )
            .with_attribute("static_image", merged("Static image (e.g., nginx:alpine)."))
            // health check
            .with_attribute(
                "health_check_enabled",
                Attribute::optional_bool().with_description("Health check enabled."),
            )
            .with_attribute("health_check_path", merged("Health check path."))
            .with_attribute("health_check_port", optional("Health check port."))
            .with_attribute("health_check_host", optional("Health check host."))
            .with_attribute("health_check_method", merged("Health check method."))
            .with_attribute("health_check_return_code", merged_int("Health check return code."))
            .with_attribute("health_check_scheme", merged("Health check scheme."))
            .with_attribute("health_check_response_text", optional("Health check response text."))
            .with_attribute("health_check_interval", merged_int("Health check interval in seconds."))
            .with_attribute("health_check_timeout", merged_int("Health check timeout in seconds."))
            .with_attribute("health_check_retries", merged_int("Health check retries count."))
            .with_attribute("health_check_start_period", merged_int("Health check start period in seconds."))
            // limits not tracked by the platform default
            .with_attribute("limits_memory", optional("Memory limit."))
            .with_attribute("limits_cpus", optional("CPU limit."))
            .with_attribute("limits_cpuset", optional("CPU set."))
            // container and deploy
            .with_attribute("custom_labels", merged("Custom labels."))
            .with_attribute("custom_docker_run_options", optional("Custom docker run options."))
            .with_attribute("post_deployment_command", optional("Post deployment command."))
            .with_attribute("post_deployment_command_container", optional("Post deployment command container."))
            .with_attribute("pre_deployment_command", optional("Pre deployment command."))
            .with_attribute("pre_deployment_command_container", optional("Pre deployment command container."))
            .with_attribute("manual_webhook_secret_github", optional("Manual webhook secret for Github."))
            .with_attribute("manual_webhook_secret_gitlab", optional("Manual webhook secret for Gitlab."))
            .with_attribute("manual_webhook_secret_bitbucket", optional("Manual webhook secret for Bitbucket."))
            .with_attribute("manual_webhook_secret_gitea", optional("Manual webhook secret for Gitea."))
            .with_attribute(
                "redirect",
                optional("How to set redirect with Traefik / Caddy. www<->non-www."),
            )
            .with_attribute(
                "use_build_server",
                Attribute::optional_bool().with_description("Use build server."),
            )
            .with_attribute(
                "is_http_basic_auth_enabled",
                Attribute::optional_computed_bool().with_description("HTTP Basic Authentication enabled."),
            )
            .with_attribute("http_basic_auth_username", optional("Username for HTTP Basic Authentication"))
            .with_attribute("http_basic_auth_password", optional("Password for HTTP Basic Authentication"))
            .with_attribute("docker_compose_location", merged("Docker Compose location."))
            .with_attribute(
                "docker_compose_custom_start_command",
                optional("Docker Compose custom start command."),
            )
            .with_attribute(
                "docker_compose_custom_build_command",
                optional("Docker Compose custom build command."),
            )
            .with_attribute("watch_paths", optional("Watch paths."))
    }

    fn uuid(model: &ApplicationModel) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &ApplicationModel) -> Result<CreateRequest, ProviderError> {
        let source = plan.checked_source()?;
        CreateRequest::new(Some(source.as_str()), &plan.create_body(source))
    }

    fn to_api_update(plan: &ApplicationModel, _uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(UpdateApplication {
            scope: ApplicationScope {
                environment_uuid: None,
                ..plan.scope()
            },
            domains: plan.domains.to_wire(),
            git_repository: plan.git_repository.to_wire(),
            git_branch: plan.git_branch.to_wire(),
            build_pack: plan.build_pack.to_wire(),
            ports_exposes: plan.ports_exposes.to_wire(),
            github_app_uuid: plan.github_app_uuid.to_wire(),
            dockerfile: plan.dockerfile.to_wire(),
            build: plan.build(),
            health: plan.health.to_wire(),
            limits: plan.limits.to_wire(),
            hooks: plan.deployment.to_wire(),
            secrets: plan.secrets.to_wire(),
        })?)
    }

    fn from_api(app: Application, prior: &ApplicationModel) -> Result<ApplicationModel, ProviderError> {
        Ok(ApplicationModel {
            uuid: Attr::from_wire(app.uuid),
            name: Attr::from_wire(app.name),
            description: Attr::from_wire(app.description),
            domains: Attr::from_wire(app.fqdn),
            git_repository: preserve_git_repository(&prior.git_repository, Attr::from_wire(app.git_repository)),
            git_branch: Attr::from_wire(app.git_branch),
            build_pack: Attr::from_wire(app.build_pack),
            ports_exposes: Attr::from_wire(app.ports_exposes),
            dockerfile: Attr::from_wire(app.dockerfile),
            docker_registry_image_name: Attr::from_wire(app.docker_registry_image_name),
            docker_registry_image_tag: Attr::from_wire(app.docker_registry_image_tag),
            docker_compose_raw: Attr::from_wire(app.docker_compose_raw),
            base_directory: Attr::from_wire(app.base_directory),
            build_command: Attr::from_wire(app.build_command),
            start_command: Attr::from_wire(app.start_command),
            install_command: Attr::from_wire(app.install_command),
            publish_directory: Attr::from_wire(app.publish_directory),
            ports_mappings: Attr::from_wire(app.ports_mappings),
            git_commit_sha: Attr::from_wire(app.git_commit_sha),
            static_image: Attr::from_wire(app.static_image),
            health: HealthCheckModel::from_wire(app.health),
            limits: LimitsModel::from_wire(app.limits),
            deployment: DeploymentModel::from_wire(app.hooks),
            is_http_basic_auth_enabled: Attr::from_wire(app.is_http_basic_auth_enabled),
            http_basic_auth_username: Attr::from_wire(app.http_basic_auth_username),
            docker_compose_location: Attr::from_wire(app.docker_compose_location),
            docker_compose_custom_start_command: Attr::from_wire(app.docker_compose_custom_start_command),
            docker_compose_custom_build_command: Attr::from_wire(app.docker_compose_custom_build_command),
            ..Default::default()
        })
    }

    fn validate_config(config: &ApplicationModel) -> Vec<Diagnostic> {
        // interpolated values are checked again at create time
        if config.source_type.is_unknown() {
            return Vec::new();
        }
        match config.source_type.as_str().parse::<SourceType>() {
            Err(e) => vec![e.to_diagnostic()],
            Ok(source) => collect_missing(
                config
                    .required_fields(source)
                    .into_iter()
                    .filter(|(_, value)| !value.is_unknown()),
                "source_type",
                source.as_str(),
            ),
        }
    }

    fn instant_deploy(model: &ApplicationModel) -> bool {
        model.instant_deploy.get().copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_for;
    use crate::resources::{self, handler};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scoped(source_type: &str) -> ApplicationModel {
        ApplicationModel {
            source_type: source_type.into(),
            project_uuid: "prj-1".into(),
            server_uuid: "srv-1".into(),
            environment_name: "production".into(),
            instant_deploy: Attr::Value(false),
            ..Default::default()
        }
    }

    fn public_app() -> ApplicationModel {
        ApplicationModel {
            git_repository: "https://github.com/coollabsio/coolify-examples".into(),
            git_branch: "main".into(),
            build_pack: "nixpacks".into(),
            ports_exposes: "3000".into(),
            ..scoped("public")
        }
    }

    #[test]
    fn test_source_type_round_trip() {
        for source in SourceType::ALL {
            assert_eq!(source.as_str().parse::<SourceType>().unwrap(), source);
        }
        assert!(SourceType::Public.is_git());
        assert!(!SourceType::DockerImage.is_git());
    }

    #[test]
    fn test_invalid_source_type() {
        let err = ApplicationResource::to_api_create(&scoped("svn")).unwrap_err();
        match err {
            ProviderError::Validation { attribute, summary, detail } => {
                assert_eq!(attribute, "source_type");
                assert_eq!(summary, "Invalid source_type");
                assert!(detail.contains("public, private-github-app, private-deploy-key"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_github_app_requires_app_uuid() {
        let plan = ApplicationModel {
            source_type: "private-github-app".into(),
            ..public_app()
        };
        let err = ApplicationResource::to_api_create(&plan).unwrap_err();
        match err {
            ProviderError::Validation { attribute, detail, .. } => {
                assert_eq!(attribute, "github_app_uuid");
                assert_eq!(detail, "github_app_uuid is required for source_type private-github-app");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_image_name_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "app-1"})))
            .expect(0)
            .mount(&server)
            .await;

        let plan = ApplicationModel {
            ports_exposes: "80".into(),
            ..scoped("dockerimage")
        };
        let err = resources::create::<ApplicationResource>(&client_for(&server), plan)
            .await
            .unwrap_err();
        match err {
            ProviderError::Validation { attribute, .. } => {
                assert_eq!(attribute, "docker_registry_image_name")
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_validation_reports_every_missing_field() {
        let config = json!({
            "source_type": "private-deploy-key",
            "project_uuid": "prj-1",
            "server_uuid": "srv-1",
            "environment_name": "production",
            "git_repository": "git@github.com:acme/site.git",
            "git_branch": crate::value::UNKNOWN_SENTINEL
        });
        let diagnostics = handler::<ApplicationResource>().validate(&config);
        let attributes: Vec<_> = diagnostics.iter().filter_map(|d| d.attribute.as_deref()).collect();
        assert_eq!(attributes, vec!["build_pack", "ports_exposes", "private_key_uuid"]);

        let diagnostics = handler::<ApplicationResource>().validate(&json!({
            "source_type": "svn",
            "project_uuid": "prj-1",
            "server_uuid": "srv-1",
            "environment_name": "production"
        }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid source_type");
    }

    #[test]
    fn test_redirect_outside_accepted_set_is_dropped() {
        let mut plan = public_app();
        plan.deployment.redirect = "sideways".into();
        let body = ApplicationResource::to_api_create(&plan).unwrap().body;
        assert!(body.get("redirect").is_none());

        plan.deployment.redirect = "non-www".into();
        let body = ApplicationResource::to_api_create(&plan).unwrap().body;
        assert_eq!(body["redirect"], "non-www");
    }

    #[test]
    fn test_compose_body_is_minimal() {
        let plan = ApplicationModel {
            docker_compose_raw: "services: {}".into(),
            build_command: "make".into(),
            ..scoped("dockercompose")
        };
        let request = ApplicationResource::to_api_create(&plan).unwrap();
        assert_eq!(request.variant, Some("dockercompose"));
        assert_eq!(
            request.body,
            json!({
                "project_uuid": "prj-1",
                "server_uuid": "srv-1",
                "environment_name": "production",
                "instant_deploy": false,
                "docker_compose_raw": "services: {}"
            })
        );
    }

    #[test]
    fn test_preserve_git_repository() {
        let configured: Attr<String> = "https://github.com/acme/site".into();
        let reported = || Attr::value("acme/site".to_string());
        assert_eq!(preserve_git_repository(&configured, reported()), configured);
        assert_eq!(preserve_git_repository(&Attr::Null, reported()), reported());
        assert_eq!(preserve_git_repository(&Attr::Unknown, reported()), reported());
        assert_eq!(preserve_git_repository(&configured, Attr::Null), Attr::Null);
        assert_eq!(
            preserve_git_repository(&configured, Attr::value("https://github.com/acme/site".to_string())),
            configured
        );
    }

    #[tokio::test]
    async fn test_create_public_application() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/applications/public"))
            .and(body_partial_json(json!({
                "git_repository": "https://github.com/coollabsio/coolify-examples",
                "build_pack": "nixpacks",
                "manual_webhook_secret_github": "s3cret"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uuid": "app-1",
                "domains": "http://app-1.example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications/app-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "app-1",
                "name": "coolify-examples",
                "fqdn": "http://app-1.example.com",
                "git_repository": "coollabsio/coolify-examples",
                "git_branch": "main",
                "build_pack": "nixpacks",
                "ports_exposes": "3000",
                "health_check_path": "/",
                "health_check_interval": 5,
                "redirect": "both"
            })))
            .mount(&server)
            .await;

        let mut plan = public_app();
        plan.secrets.manual_webhook_secret_github = "s3cret".into();
        let created = resources::create::<ApplicationResource>(&client_for(&server), plan)
            .await
            .unwrap();
        assert_eq!(created.domains, Attr::value("http://app-1.example.com".to_string()));
        assert_eq!(
            created.git_repository,
            Attr::value("https://github.com/coollabsio/coolify-examples".to_string())
        );
        assert_eq!(created.health.health_check_interval, Attr::Value(5));
        assert_eq!(created.deployment.redirect, Attr::value("both".to_string()));
        assert_eq!(
            created.secrets.manual_webhook_secret_github,
            Attr::value("s3cret".to_string())
        );
        assert_eq!(created.source_type, Attr::value("public".to_string()));
    }

    #[test]
    fn test_update_body_shape() {
        let mut plan = public_app();
        plan.environment_uuid = "env-1".into();
        plan.health.health_check_host = Attr::value(String::new());
        let body = ApplicationResource::to_api_update(&plan, "app-1").unwrap();
        assert_eq!(body["git_branch"], "main");
        assert_eq!(body["server_uuid"], "srv-1");
        assert!(body.get("environment_uuid").is_none());
        assert!(body.get("health_check_host").is_none());
    }

    #[test]
    fn test_secrets_are_sensitive() {
        let schema = ApplicationResource::schema();
        let sensitive = schema.sensitive_attributes();
        assert!(sensitive.contains(&"http_basic_auth_password"));
        assert!(sensitive.contains(&"manual_webhook_secret_gitea"));
        assert!(schema.attribute("git_repository").unwrap().is_optional_computed());
        assert!(!schema.attribute("limits_memory").unwrap().is_optional_computed());
    }
}
