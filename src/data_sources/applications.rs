use crate::client::models::Application;
use crate::client::Collection;
use crate::schema::{AttributeType, Schema};

use super::{computed_attributes, Listing};

/// Applications, listed or looked up.
pub struct Applications;

impl Listing for Applications {
    type Wire = Application;

    const COLLECTION: Collection = Collection::Applications;
    const LABEL: &'static str = "application";
    const SINGLE: &'static str = "coolify_application";
    const LIST: &'static str = "coolify_applications";
    const LIST_KEY: &'static str = "applications";
    const FILTERS: &'static [&'static str] = &["id", "uuid", "name", "description", "fqdn"];
    const SENSITIVE: &'static [&'static str] = &[
        "manual_webhook_secret_bitbucket",
        "manual_webhook_secret_gitea",
        "manual_webhook_secret_github",
        "manual_webhook_secret_gitlab",
    ];

    fn attributes() -> Schema {
        use AttributeType::{Bool, Int64, String};

        computed_attributes(&[
            ("id", Int64),
            ("uuid", String),
            ("name", String),
            ("description", String),
            ("fqdn", String),
            ("status", String),
            ("git_repository", String),
            ("git_branch", String),
            ("git_commit_sha", String),
            ("git_full_url", String),
            ("build_pack", String),
            ("ports_exposes", String),
            ("ports_mappings", String),
            ("base_directory", String),
            ("publish_directory", String),
            ("install_command", String),
            ("build_command", String),
            ("start_command", String),
            ("static_image", String),
            ("dockerfile", String),
            ("dockerfile_location", String),
            ("dockerfile_target_build", String),
            ("docker_registry_image_name", String),
            ("docker_registry_image_tag", String),
            ("docker_compose", String),
            ("docker_compose_raw", String),
            ("docker_compose_domains", String),
            ("docker_compose_location", String),
            ("docker_compose_custom_start_command", String),
            ("docker_compose_custom_build_command", String),
            ("compose_parsing_version", String),
            ("config_hash", String),
            ("custom_healthcheck_found", Bool),
            ("custom_nginx_configuration", String),
            ("is_http_basic_auth_enabled", Bool),
            ("http_basic_auth_username", String),
            ("preview_url_template", String),
            ("destination_id", Int64),
            ("destination_type", String),
            ("environment_id", Int64),
            ("private_key_id", Int64),
            ("repository_project_id", Int64),
            ("source_id", Int64),
            ("swarm_replicas", Int64),
            ("swarm_placement_constraints", String),
            ("created_at", String),
            ("updated_at", String),
            ("deleted_at", String),
            ("health_check_enabled", Bool),
            ("health_check_path", String),
            ("health_check_port", String),
            ("health_check_host", String),
            ("health_check_method", String),
            ("health_check_return_code", Int64),
            ("health_check_scheme", String),
            ("health_check_response_text", String),
            ("health_check_interval", Int64),
            ("health_check_timeout", Int64),
            ("health_check_retries", Int64),
            ("health_check_start_period", Int64),
            ("limits_memory", String),
            ("limits_memory_swap", String),
            ("limits_memory_swappiness", Int64),
            ("limits_memory_reservation", String),
            ("limits_cpus", String),
            ("limits_cpuset", String),
            ("limits_cpu_shares", Int64),
            ("custom_labels", String),
            ("custom_docker_run_options", String),
            ("post_deployment_command", String),
            ("post_deployment_command_container", String),
            ("pre_deployment_command", String),
            ("pre_deployment_command_container", String),
            ("redirect", String),
            ("watch_paths", String),
            ("manual_webhook_secret_github", String),
            ("manual_webhook_secret_gitlab", String),
            ("manual_webhook_secret_bitbucket", String),
            ("manual_webhook_secret_gitea", String),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_for;
    use crate::data_sources::read_all;
    use crate::filter::FilterClause;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_filter_by_fqdn() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "uuid": "app-1", "name": "site", "fqdn": "https://site.example.com"},
                {"id": 2, "uuid": "app-2", "name": "api", "fqdn": "https://api.example.com"},
                {"id": 3, "uuid": "app-3", "name": "worker", "fqdn": null}
            ])))
            .mount(&server)
            .await;

        let clauses = vec![FilterClause::new("fqdn", ["https://api.example.com", ""])];
        let kept = read_all::<Applications>(&client_for(&server), &clauses)
            .await
            .unwrap();
        // a null fqdn has no string form
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["uuid"], "app-2");
    }

    #[test]
    fn test_every_filter_is_an_attribute() {
        let schema = Applications::attributes();
        for name in Applications::FILTERS {
            assert!(schema.attribute(name).is_some(), "{name}");
        }
    }
}
