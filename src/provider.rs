//! The Coolify provider: dispatches host calls to resource and data source kinds.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::client::CoolifyClient;
use crate::config::{self, ProviderConfig, MIN_COOLIFY_VERSION};
use crate::data_sources::{self, DataSourceHandler};
use crate::error::ProviderError;
use crate::host::ProviderService;
use crate::resources::{self, ResourceHandler};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::types::{ImportedResource, PlanResult};
use crate::validation;

/// Provider for a self-hosted Coolify instance.
pub struct CoolifyProvider {
    client: RwLock<Option<CoolifyClient>>,
    resources: HashMap<&'static str, Box<dyn ResourceHandler>>,
    data_sources: HashMap<&'static str, Box<dyn DataSourceHandler>>,
}

impl Default for CoolifyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CoolifyProvider {
    /// A provider serving every kind, not yet configured.
    pub fn new() -> Self {
        Self {
            client: RwLock::new(None),
            resources: resources::all()
                .into_iter()
                .map(|h| (h.type_name(), h))
                .collect(),
            data_sources: data_sources::all()
                .into_iter()
                .map(|h| (h.type_name(), h))
                .collect(),
        }
    }

    /// A provider already holding a client.
    pub fn with_client(client: CoolifyClient) -> Self {
        let provider = Self::new();
        Self {
            client: RwLock::new(Some(client)),
            ..provider
        }
    }

    async fn client(&self) -> Result<CoolifyClient, ProviderError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::Configuration("provider not configured".to_string()))
    }

    fn resource(&self, resource_type: &str) -> Result<&dyn ResourceHandler, ProviderError> {
        self.resources
            .get(resource_type)
            .map(|h| h.as_ref())
            .ok_or_else(|| {
                ProviderError::UnknownResource(format!("Unknown resource type: {}", resource_type))
            })
    }

    fn data_source(&self, data_source_type: &str) -> Result<&dyn DataSourceHandler, ProviderError> {
        self.data_sources
            .get(data_source_type)
            .map(|h| h.as_ref())
            .ok_or_else(|| {
                ProviderError::UnknownResource(format!(
                    "Unknown data source type: {}",
                    data_source_type
                ))
            })
    }
}

fn token_from_env() -> bool {
    std::env::var(config::ENV_KEY_TOKEN).is_ok_and(|t| !t.is_empty())
}

#[async_trait::async_trait]
impl ProviderService for CoolifyProvider {
    fn schema(&self) -> ProviderSchema {
        let schema = ProviderSchema::new().with_provider_config(config::provider_schema(token_from_env()));
        let schema = self
            .resources
            .iter()
            .fold(schema, |schema, (name, h)| schema.with_resource(*name, h.schema()));
        self.data_sources
            .iter()
            .fold(schema, |schema, (name, h)| schema.with_data_source(*name, h.schema()))
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validation::validate(
            &config::provider_schema(token_from_env()),
            &config,
        ))
    }

    #[instrument(skip_all, name = "provider.configure")]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let resolved = match ProviderConfig::from_json(&config)?.resolve() {
            Ok(resolved) => resolved,
            Err(e) => return Ok(vec![e.to_diagnostic()]),
        };
        let client = CoolifyClient::new(&resolved)?;

        let mut diagnostics = Vec::new();
        match client.version().await {
            Ok(version) if !config::is_version_compatible(&version, MIN_COOLIFY_VERSION) => {
                return Ok(vec![Diagnostic::error("Unsupported API version").with_detail(format!(
                    "The Coolify API version {} is not supported. The minimum supported version is {}",
                    version, MIN_COOLIFY_VERSION
                ))]);
            },
            Ok(version) => info!(
                endpoint = %client.base_url(),
                version = %version,
                "Successfully connected to Coolify API"
            ),
            Err(e) => {
                warn!(error = %e, "Could not read the Coolify API version");
                diagnostics.push(
                    Diagnostic::warning("Unable to verify Coolify API version")
                        .with_detail(e.to_string()),
                );
            },
        }

        *self.client.write().await = Some(client);
        Ok(diagnostics)
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        self.client.write().await.take();
        debug!("Provider stopped");
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(self.resource(resource_type)?.validate(&config))
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.resource(resource_type)?
            .plan(prior_state.as_ref(), proposed_state, &config)
    }

    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let handler = self.resource(resource_type)?;
        handler.create(&self.client().await?, planned_state).await
    }

    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let handler = self.resource(resource_type)?;
        handler.read(&self.client().await?, current_state).await
    }

    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let handler = self.resource(resource_type)?;
        handler
            .update(&self.client().await?, prior_state, planned_state)
            .await
    }

    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let handler = self.resource(resource_type)?;
        handler.delete(&self.client().await?, current_state).await
    }

    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let seed = self.resource(resource_type)?.import(id)?;
        Ok(vec![ImportedResource::new(resource_type, seed)])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(self.data_source(data_source_type)?.validate(&config))
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let handler = self.data_source(data_source_type)?;
        handler.read(&self.client().await?, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_for, TEST_TOKEN};
    use crate::schema::DiagnosticSeverity;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn version_server(version: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/version"))
            .respond_with(ResponseTemplate::new(200).set_body_string(version))
            .mount(&server)
            .await;
        server
    }

    fn provider_config(server: &MockServer) -> Value {
        json!({"endpoint": format!("{}/api/v1", server.uri()), "token": TEST_TOKEN})
    }

    #[tokio::test]
    async fn test_calls_before_configure_fail() {
        let provider = CoolifyProvider::new();
        let err = provider
            .read("coolify_project", json!({"uuid": "prj-1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(ref m) if m == "provider not configured"));

        let err = provider
            .read_data_source("coolify_projects", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unknown_types() {
        let provider = CoolifyProvider::new();
        let err = provider.read("coolify_volume", json!({})).await.unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(_)));
        let err = provider
            .validate_data_source_config("coolify_volumes", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(_)));
    }

    #[tokio::test]
    async fn test_configure_accepts_supported_version() {
        let server = version_server("4.0.0-beta.380").await;
        let provider = CoolifyProvider::new();
        let diagnostics = assert_ok!(provider.configure(provider_config(&server)).await);
        assert!(diagnostics.is_empty());
        assert_ok!(provider.client().await);
    }

    #[tokio::test]
    async fn test_configure_rejects_old_version() {
        let server = version_server("4.0.0-beta.300").await;
        let provider = CoolifyProvider::new();
        let diagnostics = assert_ok!(provider.configure(provider_config(&server)).await);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Error);
        assert_eq!(diagnostics[0].summary, "Unsupported API version");
        assert_err!(provider.client().await);
    }

    #[tokio::test]
    async fn test_configure_warns_when_version_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/version"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let provider = CoolifyProvider::new();
        let diagnostics = assert_ok!(provider.configure(provider_config(&server)).await);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert_ok!(provider.client().await);
    }

    #[tokio::test]
    async fn test_configure_reports_bad_token() {
        let provider = CoolifyProvider::new();
        let diagnostics = provider
            .configure(json!({"endpoint": "http://127.0.0.1:9/api/v1", "token": "not-a-token"}))
            .await
            .unwrap();
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("token"));
        assert_eq!(diagnostics[0].detail.as_deref(), Some("invalid token format"));
    }

    #[test]
    fn test_schema_covers_every_kind() {
        let schema = CoolifyProvider::new().schema();
        assert_eq!(schema.resources.len(), 13);
        assert_eq!(schema.data_sources.len(), 10);
        assert!(schema.resources.contains_key("coolify_postgresql_database"));
        assert!(schema.data_sources.contains_key("coolify_private_keys"));
        assert!(schema.provider.attribute("token").unwrap().flags.sensitive);
    }

    #[test]
    fn test_metadata_advertises_destroy_plans() {
        let metadata = CoolifyProvider::new().metadata();
        assert!(metadata.capabilities.plan_destroy);
        assert_eq!(metadata.resources.len(), 13);
        assert_eq!(metadata.resources[0], "coolify_application");
    }

    #[tokio::test]
    async fn test_import_wraps_seed() {
        let provider = CoolifyProvider::new();
        let imported = provider
            .import_resource("coolify_redis_database", "srv-1/prj-1/production/db-1")
            .await
            .unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].resource_type, "coolify_redis_database");
        assert_eq!(imported[0].state["uuid"], "db-1");
    }

    #[tokio::test]
    async fn test_validate_resource_config_runs_kind_checks() {
        let provider = CoolifyProvider::new();
        let diagnostics = provider
            .validate_resource_config(
                "coolify_application",
                json!({
                    "source_type": "dockerfile",
                    "project_uuid": "prj-1",
                    "server_uuid": "srv-1",
                    "environment_name": "production"
                }),
            )
            .await
            .unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("dockerfile"));
    }

    #[tokio::test]
    async fn test_read_drift_returns_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/services/svc-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let provider = CoolifyProvider::with_client(client_for(&server));
        let state = provider
            .read("coolify_service", json!({"uuid": "svc-1"}))
            .await
            .unwrap();
        assert!(state.is_null());
    }
}
