//! `coolify_server`: a machine Coolify deploys onto over SSH.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{carry_forward, CreateRequest, ImportFormat, Resource};
use crate::client::models::{Server, ServerRequest, ServerSettings};
use crate::client::Collection;
use crate::error::ProviderError;
use crate::schema::{Attribute, AttributeType, Schema};
use crate::value::Attr;

/// Local record of a server.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerModel {
    pub uuid: Attr<String>,
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub ip: Attr<String>,
    pub port: Attr<i64>,
    pub user: Attr<String>,
    pub is_build_server: Attr<bool>,
    pub private_key_uuid: Attr<String>,
    pub instant_validate: Attr<bool>,
    pub proxy_type: Attr<String>,
    pub swarm_cluster: Attr<String>,
    pub validation_logs: Attr<String>,
    pub unreachable_count: Attr<i64>,
    pub unreachable_notification_sent: Attr<bool>,
    pub log_drain_notification_sent: Attr<bool>,
    pub high_disk_usage_notification_sent: Attr<bool>,
    pub settings: Attr<ServerSettings>,
}

impl ServerModel {
    /// Map the remote-authoritative part of a read.
    pub fn from_wire(server: Server) -> Self {
        let settings = server.settings;
        Self {
            uuid: Attr::from_wire(server.uuid),
            id: Attr::from_wire(settings.as_ref().and_then(|s| s.server_id)),
            name: Attr::from_wire(server.name),
            description: Attr::from_wire(server.description),
            ip: Attr::from_wire(server.ip),
            port: Attr::from_wire(server.port),
            user: Attr::from_wire(server.user),
            is_build_server: Attr::from_wire(settings.as_ref().and_then(|s| s.is_build_server)),
            private_key_uuid: Attr::Null,
            instant_validate: Attr::Null,
            proxy_type: Attr::from_wire(server.proxy_type),
            swarm_cluster: Attr::from_wire(server.swarm_cluster),
            validation_logs: Attr::from_wire(server.validation_logs),
            unreachable_count: Attr::from_wire(server.unreachable_count),
            unreachable_notification_sent: Attr::from_wire(server.unreachable_notification_sent),
            log_drain_notification_sent: Attr::from_wire(server.log_drain_notification_sent),
            high_disk_usage_notification_sent: Attr::from_wire(
                server.high_disk_usage_notification_sent,
            ),
            settings: Attr::from_wire(settings),
        }
    }

    fn request(&self) -> ServerRequest {
        ServerRequest {
            name: self.name.to_wire(),
            description: self.description.to_wire(),
            ip: self.ip.to_wire(),
            port: self.port.to_wire(),
            user: self.user.to_wire(),
            private_key_uuid: self.private_key_uuid.to_wire(),
            is_build_server: self.is_build_server.to_wire(),
            instant_validate: self.instant_validate.to_wire(),
        }
    }
}

fn settings_type() -> AttributeType {
    let fields = [
        ("id", AttributeType::Int64),
        ("server_id", AttributeType::Int64),
        ("concurrent_builds", AttributeType::Int64),
        ("dynamic_timeout", AttributeType::Int64),
        ("delete_unused_networks", AttributeType::Bool),
        ("delete_unused_volumes", AttributeType::Bool),
        ("docker_cleanup_frequency", AttributeType::String),
        ("docker_cleanup_threshold", AttributeType::Int64),
        ("force_disabled", AttributeType::Bool),
        ("force_server_cleanup", AttributeType::Bool),
        ("is_build_server", AttributeType::Bool),
        ("is_cloudflare_tunnel", AttributeType::Bool),
        ("is_jump_server", AttributeType::Bool),
        ("is_logdrain_axiom_enabled", AttributeType::Bool),
        ("is_logdrain_custom_enabled", AttributeType::Bool),
        ("is_logdrain_highlight_enabled", AttributeType::Bool),
        ("is_logdrain_newrelic_enabled", AttributeType::Bool),
        ("is_metrics_enabled", AttributeType::Bool),
        ("is_reachable", AttributeType::Bool),
        ("is_sentinel_enabled", AttributeType::Bool),
        ("is_swarm_manager", AttributeType::Bool),
        ("is_swarm_worker", AttributeType::Bool),
        ("is_usable", AttributeType::Bool),
        ("logdrain_axiom_api_key", AttributeType::String),
        ("logdrain_axiom_dataset_name", AttributeType::String),
        ("logdrain_custom_config", AttributeType::String),
        ("logdrain_custom_config_parser", AttributeType::String),
        ("logdrain_highlight_project_id", AttributeType::String),
        ("logdrain_newrelic_base_uri", AttributeType::String),
        ("logdrain_newrelic_license_key", AttributeType::String),
        ("sentinel_metrics_history_days", AttributeType::Int64),
        ("sentinel_metrics_refresh_rate_seconds", AttributeType::Int64),
        ("sentinel_token", AttributeType::String),
        ("wildcard_domain", AttributeType::String),
        ("created_at", AttributeType::String),
        ("updated_at", AttributeType::String),
    ];
    let fields: HashMap<String, AttributeType> = fields
        .into_iter()
        .map(|(name, ty)| (name.to_string(), ty))
        .collect();
    AttributeType::object(fields)
}

/// Server attributes reported by the platform, shared with the server data sources.
pub(crate) fn server_attributes() -> Schema {
    Schema::v0()
        .with_attribute("uuid", Attribute::computed_string().with_description("UUID of the server."))
        .with_attribute("id", Attribute::computed_int64())
        .with_attribute("proxy_type", Attribute::computed_string())
        .with_attribute("swarm_cluster", Attribute::computed_string())
        .with_attribute("validation_logs", Attribute::computed_string())
        .with_attribute("unreachable_count", Attribute::computed_int64())
        .with_attribute("unreachable_notification_sent", Attribute::computed_bool())
        .with_attribute("log_drain_notification_sent", Attribute::computed_bool())
        .with_attribute("high_disk_usage_notification_sent", Attribute::computed_bool())
        .with_attribute(
            "settings",
            Attribute::computed(settings_type()).with_description("Server settings."),
        )
}

/// The server kind.
pub struct ServerResource;

impl Resource for ServerResource {
    type Model = ServerModel;
    type Wire = Server;

    const TYPE_NAME: &'static str = "coolify_server";
    const LABEL: &'static str = "server";
    const COLLECTION: Collection = Collection::Servers;
    const IMPORT: ImportFormat = ImportFormat::Bare;
    const NOT_ECHOED: &'static [&'static str] = &["private_key_uuid", "instant_validate"];
    const SENSITIVE: &'static [&'static str] = &["settings"];
    // the platform answers server updates with 201
    const UPDATE_STATUSES: &'static [u16] = &[201];

    fn base_schema() -> Schema {
        server_attributes()
            .with_description("Create, read, update, and delete a Coolify server resource.")
            .with_attribute("name", Attribute::required_string())
            .with_attribute("ip", Attribute::required_string().with_description("IP address or hostname."))
            .with_attribute("description", Attribute::optional_computed_string())
            .with_attribute("port", Attribute::optional_computed_int64().with_description("SSH port."))
            .with_attribute("user", Attribute::optional_computed_string().with_description("SSH user."))
            .with_attribute("is_build_server", Attribute::optional_computed_bool())
            .with_attribute(
                "private_key_uuid",
                Attribute::required_string().with_description("UUID of the private key used to connect."),
            )
            .with_attribute(
                "instant_validate",
                Attribute::required_bool().with_description("Validate the connection right after create."),
            )
    }

    fn uuid(model: &ServerModel) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &ServerModel) -> Result<CreateRequest, ProviderError> {
        CreateRequest::new(None, &plan.request())
    }

    fn to_api_update(plan: &ServerModel, _uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(plan.request())?)
    }

    fn from_api(wire: Server, _prior: &ServerModel) -> Result<ServerModel, ProviderError> {
        Ok(ServerModel::from_wire(wire))
    }

    fn merge_prior(remote: ServerModel, prior: &ServerModel) -> Result<ServerModel, ProviderError> {
        let mut merged = carry_forward(remote, prior, Self::NOT_ECHOED)?;
        if merged.private_key_uuid.is_null() {
            merged.private_key_uuid = Attr::value(String::new());
        }
        Ok(merged)
    }
}
