//! Wire shapes of the Coolify API.
//!
//! Read models are lenient: every field is optional and unknown keys are
//! ignored, so a newer platform release does not break reads. Request bodies
//! omit absent fields entirely; the platform treats a missing key as "leave
//! unchanged" and an explicit `null` as "clear".
//!
//! Field groups shared by several kinds (resource limits, health checks,
//! deployment hooks) are separate structs composed with `#[serde(flatten)]`.

// Field names mirror the API; they are documented there.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

// =============================================================================
// Shared fragments
// =============================================================================

/// Container resource limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_swappiness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_memory_reservation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpuset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits_cpu_shares: Option<i64>,
}

/// Container health check settings of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_return_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_response_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_retries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_start_period: Option<i64>,
}

/// Container options and deployment hooks of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentHooks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_docker_run_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_deployment_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_deployment_command_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_deployment_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_deployment_command_container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_paths: Option<String>,
}

/// Manual webhook secrets per git forge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSecrets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_gitlab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_bitbucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_webhook_secret_gitea: Option<String>,
}

// =============================================================================
// Applications
// =============================================================================

/// An application as returned by `GET /applications[/{uuid}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub fqdn: Option<String>,
    pub status: Option<String>,
    pub git_repository: Option<String>,
    pub git_branch: Option<String>,
    pub git_commit_sha: Option<String>,
    pub git_full_url: Option<String>,
    pub build_pack: Option<String>,
    pub ports_exposes: Option<String>,
    pub ports_mappings: Option<String>,
    pub base_directory: Option<String>,
    pub publish_directory: Option<String>,
    pub install_command: Option<String>,
    pub build_command: Option<String>,
    pub start_command: Option<String>,
    pub static_image: Option<String>,
    pub dockerfile: Option<String>,
    pub dockerfile_location: Option<String>,
    pub dockerfile_target_build: Option<String>,
    pub docker_registry_image_name: Option<String>,
    pub docker_registry_image_tag: Option<String>,
    pub docker_compose: Option<String>,
    pub docker_compose_raw: Option<String>,
    pub docker_compose_domains: Option<String>,
    pub docker_compose_location: Option<String>,
    pub docker_compose_custom_start_command: Option<String>,
    pub docker_compose_custom_build_command: Option<String>,
    pub compose_parsing_version: Option<String>,
    pub config_hash: Option<String>,
    pub custom_healthcheck_found: Option<bool>,
    pub custom_nginx_configuration: Option<String>,
    pub is_http_basic_auth_enabled: Option<bool>,
    pub http_basic_auth_username: Option<String>,
    pub preview_url_template: Option<String>,
    pub destination_id: Option<i64>,
    pub destination_type: Option<String>,
    pub environment_id: Option<i64>,
    pub private_key_id: Option<i64>,
    pub repository_project_id: Option<i64>,
    pub source_id: Option<i64>,
    pub swarm_replicas: Option<i64>,
    pub swarm_placement_constraints: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
    #[serde(flatten)]
    pub health: HealthCheck,
    #[serde(flatten)]
    pub limits: ResourceLimits,
    #[serde(flatten)]
    pub hooks: DeploymentHooks,
    #[serde(flatten)]
    pub secrets: WebhookSecrets,
}

/// Placement of an application, sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
}

/// Build settings of git-sourced applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_mappings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_custom_start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_custom_build_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_http_basic_auth_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_auth_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_basic_auth_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_build_server: Option<bool>,
}

/// `POST /applications/{public,private-github-app,private-deploy-key}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateGitApplication {
    #[serde(flatten)]
    pub scope: ApplicationScope,
    pub git_repository: String,
    pub git_branch: String,
    pub build_pack: String,
    pub ports_exposes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_app_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(flatten)]
    pub build: ApplicationBuild,
    #[serde(flatten)]
    pub health: HealthCheck,
    #[serde(flatten)]
    pub limits: ResourceLimits,
    #[serde(flatten)]
    pub hooks: DeploymentHooks,
    #[serde(flatten)]
    pub secrets: WebhookSecrets,
}

/// `POST /applications/dockerfile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDockerfileApplication {
    #[serde(flatten)]
    pub scope: ApplicationScope,
    pub dockerfile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_exposes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_mappings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_build_server: Option<bool>,
    #[serde(flatten)]
    pub health: HealthCheck,
    #[serde(flatten)]
    pub limits: ResourceLimits,
    #[serde(flatten)]
    pub hooks: DeploymentHooks,
    #[serde(flatten)]
    pub secrets: WebhookSecrets,
}

/// `POST /applications/dockerimage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDockerImageApplication {
    #[serde(flatten)]
    pub scope: ApplicationScope,
    pub docker_registry_image_name: String,
    pub ports_exposes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_registry_image_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_mappings: Option<String>,
    #[serde(flatten)]
    pub health: HealthCheck,
    #[serde(flatten)]
    pub limits: ResourceLimits,
    #[serde(flatten)]
    pub hooks: DeploymentHooks,
    #[serde(flatten)]
    pub secrets: WebhookSecrets,
}

/// `POST /applications/dockercompose`. The compose file travels as plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDockerComposeApplication {
    #[serde(flatten)]
    pub scope: ApplicationScope,
    pub docker_compose_raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_build_server: Option<bool>,
}

/// One of the six application create bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CreateApplication {
    /// Any git-sourced variant.
    Git(CreateGitApplication),
    /// Inline Dockerfile.
    Dockerfile(CreateDockerfileApplication),
    /// Prebuilt registry image.
    DockerImage(CreateDockerImageApplication),
    /// Inline compose file.
    DockerCompose(CreateDockerComposeApplication),
}

/// `PATCH /applications/{uuid}`: one shape for every source type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateApplication {
    #[serde(flatten)]
    pub scope: ApplicationScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_pack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_exposes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_app_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
    #[serde(flatten)]
    pub build: ApplicationBuild,
    #[serde(flatten)]
    pub health: HealthCheck,
    #[serde(flatten)]
    pub limits: ResourceLimits,
    #[serde(flatten)]
    pub hooks: DeploymentHooks,
    #[serde(flatten)]
    pub secrets: WebhookSecrets,
}

// =============================================================================
// Databases
// =============================================================================

/// Fields every database engine shares in a read.
///
/// Engine-specific fields live next to each engine and are decoded from the
/// same body once `database_type` has been resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub database_type: Option<String>,
    pub image: Option<String>,
    pub is_public: Option<bool>,
    pub public_port: Option<i64>,
    pub internal_db_url: Option<String>,
    pub external_db_url: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub limits: ResourceLimits,
}

/// Placement of a new database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseScope {
    pub server_uuid: String,
    pub project_uuid: String,
    pub environment_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
}

/// Settings accepted on both create and update of any engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_port: Option<i64>,
    #[serde(flatten)]
    pub limits: ResourceLimits,
}

/// `POST /databases/{engine}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDatabase<E> {
    #[serde(flatten)]
    pub scope: DatabaseScope,
    #[serde(flatten)]
    pub settings: DatabaseSettings,
    #[serde(flatten)]
    pub engine: E,
}

/// `PATCH /databases/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDatabase<E> {
    #[serde(flatten)]
    pub settings: DatabaseSettings,
    #[serde(flatten)]
    pub engine: E,
}

// =============================================================================
// Services
// =============================================================================

/// A one-click or compose service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
    pub docker_compose_raw: Option<String>,
    pub server_id: Option<i64>,
    pub environment_id: Option<i64>,
    pub destination_id: Option<i64>,
    pub destination_type: Option<String>,
    pub connect_to_docker_network: Option<bool>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

/// `POST /services`. The compose file is base64.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateService {
    pub server_uuid: String,
    pub project_uuid: String,
    pub environment_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
    pub docker_compose_raw: String,
    pub connect_to_docker_network: bool,
}

/// `PATCH /services/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_compose_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_deploy: Option<bool>,
}

// =============================================================================
// Servers
// =============================================================================

/// A server as returned by `GET /servers[/{uuid}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub port: Option<i64>,
    pub user: Option<String>,
    pub proxy_type: Option<String>,
    pub swarm_cluster: Option<String>,
    pub validation_logs: Option<String>,
    pub unreachable_count: Option<i64>,
    pub unreachable_notification_sent: Option<bool>,
    pub log_drain_notification_sent: Option<bool>,
    pub high_disk_usage_notification_sent: Option<bool>,
    pub settings: Option<ServerSettings>,
}

/// The settings object nested in a server read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub id: Option<i64>,
    pub server_id: Option<i64>,
    pub concurrent_builds: Option<i64>,
    pub dynamic_timeout: Option<i64>,
    pub delete_unused_networks: Option<bool>,
    pub delete_unused_volumes: Option<bool>,
    pub docker_cleanup_frequency: Option<String>,
    pub docker_cleanup_threshold: Option<i64>,
    pub force_disabled: Option<bool>,
    pub force_server_cleanup: Option<bool>,
    pub is_build_server: Option<bool>,
    pub is_cloudflare_tunnel: Option<bool>,
    pub is_jump_server: Option<bool>,
    pub is_logdrain_axiom_enabled: Option<bool>,
    pub is_logdrain_custom_enabled: Option<bool>,
    pub is_logdrain_highlight_enabled: Option<bool>,
    pub is_logdrain_newrelic_enabled: Option<bool>,
    pub is_metrics_enabled: Option<bool>,
    pub is_reachable: Option<bool>,
    pub is_sentinel_enabled: Option<bool>,
    pub is_swarm_manager: Option<bool>,
    pub is_swarm_worker: Option<bool>,
    pub is_usable: Option<bool>,
    pub logdrain_axiom_api_key: Option<String>,
    pub logdrain_axiom_dataset_name: Option<String>,
    pub logdrain_custom_config: Option<String>,
    pub logdrain_custom_config_parser: Option<String>,
    pub logdrain_highlight_project_id: Option<String>,
    pub logdrain_newrelic_base_uri: Option<String>,
    pub logdrain_newrelic_license_key: Option<String>,
    pub sentinel_metrics_history_days: Option<i64>,
    pub sentinel_metrics_refresh_rate_seconds: Option<i64>,
    pub sentinel_token: Option<String>,
    pub wildcard_domain: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// `POST /servers` and `PATCH /servers/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_build_server: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instant_validate: Option<bool>,
}

// =============================================================================
// Projects
// =============================================================================

/// A project and its environments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub environments: Option<Vec<Environment>>,
}

/// One environment of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// `POST /projects` and `PATCH /projects/{uuid}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Private keys
// =============================================================================

/// An SSH private key stored on the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateKey {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    pub fingerprint: Option<String>,
    pub is_git_related: Option<bool>,
    pub team_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// `POST /security/keys` and `PATCH /security/keys`.
///
/// Updates carry the key's uuid in the body rather than the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrivateKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}
