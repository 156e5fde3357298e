//! Drive a [`ProviderService`] the way the host does.
//!
//! [`ProviderTester`] wraps a provider and exposes each host call plus
//! lifecycle helpers (plan, then apply, then read back). Pair it with a
//! mocked Coolify API to exercise a kind end to end.
//!
//! # Example
//!
//! ```ignore
//! use coolify_provider::testing::ProviderTester;
//! use coolify_provider::CoolifyProvider;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_project_lifecycle() {
//!     let tester = ProviderTester::new(CoolifyProvider::new());
//!     tester
//!         .configure(json!({"endpoint": "http://127.0.0.1:8000/api/v1", "token": "1|abc"}))
//!         .await
//!         .unwrap();
//!
//!     let state = tester
//!         .lifecycle_create("coolify_project", json!({"name": "web"}))
//!         .await
//!         .unwrap();
//!     assert_eq!(state["name"], "web");
//! }
//! ```

use std::fmt;

use serde_json::Value;

use crate::error::ProviderError;
use crate::host::ProviderService;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::types::{ImportedResource, PlanResult};

/// Host-side harness around one provider.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The published schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Resource type names, sorted.
    pub fn resource_types(&self) -> Vec<String> {
        self.provider.metadata().resources
    }

    /// Data source type names, sorted.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    /// Validate the provider block. Error diagnostics become [`TestError::Diagnostics`].
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        errors_only(self.provider.validate_provider_config(config).await?)
    }

    /// Configure the provider. Error diagnostics become [`TestError::Diagnostics`].
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        errors_only(self.provider.configure(config).await?)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    /// Validate a resource config.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        errors_only(
            self.provider
                .validate_resource_config(resource_type, config)
                .await?,
        )
    }

    /// Plan a create: no prior state, config equals the proposal.
    pub async fn plan_create(&self, resource_type: &str, config: Value) -> Result<PlanResult, ProviderError> {
        self.plan(resource_type, None, config.clone(), config).await
    }

    /// Plan an update where config equals the proposal.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.plan(resource_type, Some(prior_state), config.clone(), config)
            .await
    }

    /// Plan a destroy.
    pub async fn plan_delete(&self, resource_type: &str, prior_state: Value) -> Result<PlanResult, ProviderError> {
        self.plan(resource_type, Some(prior_state), Value::Null, Value::Null)
            .await
    }

    /// Plan with an explicit proposal and config.
    pub async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, prior_state, proposed_state, config)
            .await
    }

    /// Apply a planned create.
    pub async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned_state).await
    }

    /// Refresh a record; JSON `null` means it drifted away.
    pub async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        self.provider.read(resource_type, current_state).await
    }

    /// Apply a planned update.
    pub async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        self.provider
            .update(resource_type, prior_state, planned_state)
            .await
    }

    /// Delete a record.
    pub async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, current_state).await
    }

    /// Seed records for an import id.
    pub async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    /// Import, then read each seed back.
    pub async fn import_and_read(&self, resource_type: &str, id: &str) -> Result<Vec<Value>, ProviderError> {
        let mut states = Vec::new();
        for imported in self.import_resource(resource_type, id).await? {
            states.push(self.read(&imported.resource_type, imported.state).await?);
        }
        Ok(states)
    }

    /// Validate a data source config.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        errors_only(
            self.provider
                .validate_data_source_config(data_source_type, config)
                .await?,
        )
    }

    /// Read a data source.
    pub async fn read_data_source(&self, data_source_type: &str, config: Value) -> Result<Value, ProviderError> {
        self.provider.read_data_source(data_source_type, config).await
    }

    /// Plan, create, then read back.
    pub async fn lifecycle_create(&self, resource_type: &str, config: Value) -> Result<Value, ProviderError> {
        let plan = self.plan_create(resource_type, config).await?;
        let created = self.create(resource_type, plan.planned_state).await?;
        self.read(resource_type, created).await
    }

    /// Plan, update, then read back.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior_state: Value,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let plan = self
            .plan_update(resource_type, prior_state.clone(), config)
            .await?;
        let updated = self
            .update(resource_type, prior_state, plan.planned_state)
            .await?;
        self.read(resource_type, updated).await
    }

    /// Plan a destroy, then delete.
    pub async fn lifecycle_delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        self.plan_delete(resource_type, current_state.clone()).await?;
        self.delete(resource_type, current_state).await
    }

    /// Create, update, delete. Returns the state as it was after the update.
    pub async fn lifecycle_crud(
        &self,
        resource_type: &str,
        initial_config: Value,
        updated_config: Value,
    ) -> Result<Value, ProviderError> {
        let created = self.lifecycle_create(resource_type, initial_config).await?;
        let updated = self
            .lifecycle_update(resource_type, created, updated_config)
            .await?;
        self.lifecycle_delete(resource_type, updated.clone()).await?;
        Ok(updated)
    }
}

/// Failure of a harness call.
#[derive(Debug)]
pub enum TestError {
    /// The call returned error diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The call failed outright.
    Provider(ProviderError),
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "{} error diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  {}", diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attribute) = &diag.attribute {
                        write!(f, " (at {})", attribute)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

fn is_error(diagnostic: &Diagnostic) -> bool {
    diagnostic.severity == DiagnosticSeverity::Error
}

fn errors_only(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<Diagnostic> = diagnostics.into_iter().filter(is_error).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

fn changed_paths(plan: &PlanResult) -> Vec<&str> {
    plan.changes.iter().map(|c| c.path.as_str()).collect()
}

/// Panics unless the plan creates without replacing.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(!plan.changes.is_empty(), "expected a create, but the plan has no changes");
    assert!(!plan.requires_replace, "expected a create, not a replacement");
}

/// Panics if the plan changes anything.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        plan.changes.is_empty(),
        "expected no changes, got {:?}",
        changed_paths(plan)
    );
}

/// Panics if the plan changes nothing.
pub fn assert_plan_has_changes(plan: &PlanResult) {
    assert!(!plan.changes.is_empty(), "expected changes, the plan has none");
}

/// Panics unless the plan replaces the resource.
pub fn assert_plan_replaces(plan: &PlanResult) {
    assert!(
        plan.requires_replace,
        "expected a replacement, changed attributes: {:?}",
        changed_paths(plan)
    );
}

/// Panics if the plan replaces the resource.
pub fn assert_plan_updates_in_place(plan: &PlanResult) {
    assert!(
        !plan.requires_replace,
        "expected an in-place update, changed attributes: {:?}",
        changed_paths(plan)
    );
}

/// Panics unless `path` is among the changed attributes.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    let paths = changed_paths(plan);
    assert!(paths.contains(&path), "expected '{}' to change, changed attributes: {:?}", path, paths);
}

/// Panics if `path` is among the changed attributes.
pub fn assert_plan_does_not_change_attribute(plan: &PlanResult, path: &str) {
    assert!(
        !changed_paths(plan).contains(&path),
        "expected '{}' to stay unchanged",
        path
    );
}

/// Panics on any error diagnostic.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<&str> = diagnostics
        .iter()
        .filter(|d| is_error(d))
        .map(|d| d.summary.as_str())
        .collect();
    assert!(errors.is_empty(), "Expected no errors, got {:?}", errors);
}

/// Panics unless there is at least one error diagnostic.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics.iter().any(is_error),
        "expected at least one error diagnostic"
    );
}

/// Panics unless an error diagnostic's summary contains `substring`.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    assert!(
        diagnostics
            .iter()
            .any(|d| is_error(d) && d.summary.contains(substring)),
        "expected an error containing '{}', got {:?}",
        substring,
        diagnostics.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::TEST_TOKEN;
    use crate::CoolifyProvider;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn configured(server: &MockServer) -> ProviderTester<CoolifyProvider> {
        Mock::given(method("GET"))
            .and(path("/api/v1/version"))
            .respond_with(ResponseTemplate::new(200).set_body_string("4.0.0-beta.400"))
            .mount(server)
            .await;
        let tester = ProviderTester::new(CoolifyProvider::new());
        tester
            .configure(json!({
                "endpoint": format!("{}/api/v1", server.uri()),
                "token": TEST_TOKEN
            }))
            .await
            .unwrap();
        tester
    }

    fn project(name: &str, description: Option<&str>) -> Value {
        json!({
            "id": 7,
            "uuid": "prj-1",
            "name": name,
            "description": description,
            "environments": [{"id": 1, "name": "production", "project_id": 7}]
        })
    }

    #[tokio::test]
    async fn test_resource_and_data_source_types() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        let resources = tester.resource_types();
        assert!(resources.contains(&"coolify_application".to_string()));
        assert!(resources.contains(&"coolify_mongodb_database".to_string()));
        // metadata lists are sorted
        let mut sorted = resources.clone();
        sorted.sort();
        assert_eq!(resources, sorted);
        assert_eq!(tester.data_source_types().len(), 10);
    }

    #[tokio::test]
    async fn test_plan_create_marks_computed_unknown() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        let plan = tester
            .plan_create("coolify_project", json!({"name": "web"}))
            .await
            .unwrap();
        assert_plan_creates(&plan);
        assert_plan_changes_attribute(&plan, "name");
        assert!(crate::value::is_unknown_json(&plan.planned_state["uuid"]));
    }

    #[tokio::test]
    async fn test_plan_update_and_delete() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        let prior = json!({
            "uuid": "key-1",
            "id": 1,
            "name": "deploy",
            "private_key": "pem-a",
            "public_key": "ssh-ed25519 AAAA",
            "fingerprint": "SHA256:xyz",
            "is_git_related": false,
            "team_id": 0,
            "created_at": "2024-01-01",
            "updated_at": "2024-01-01"
        });

        let mut renamed = prior.clone();
        renamed["name"] = json!("deploy-2");
        let plan = tester
            .plan_update("coolify_private_key", prior.clone(), renamed)
            .await
            .unwrap();
        assert_plan_updates_in_place(&plan);
        assert_plan_changes_attribute(&plan, "name");
        assert_plan_does_not_change_attribute(&plan, "private_key");

        let mut rekeyed = prior.clone();
        rekeyed["private_key"] = json!("pem-b");
        let plan = tester
            .plan_update("coolify_private_key", prior.clone(), rekeyed)
            .await
            .unwrap();
        assert_plan_replaces(&plan);

        let plan = tester
            .plan_update("coolify_private_key", prior.clone(), prior.clone())
            .await
            .unwrap();
        assert_plan_no_changes(&plan);

        let plan = tester.plan_delete("coolify_private_key", prior).await.unwrap();
        assert!(plan.planned_state.is_null());
        assert_plan_has_changes(&plan);
    }

    #[tokio::test]
    async fn test_project_lifecycle_crud() {
        let server = MockServer::start().await;
        let tester = configured(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/projects"))
            .and(body_json(json!({"name": "web"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "prj-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/projects/prj-1"))
            .and(body_json(json!({"name": "web", "description": "frontends"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "prj-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Project deleted."})))
            .expect(1)
            .mount(&server)
            .await;
        // first two reads see the created record, the rest the updated one
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project("web", None)))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project("web", Some("frontends"))))
            .mount(&server)
            .await;

        let updated = tester
            .lifecycle_crud(
                "coolify_project",
                json!({"name": "web"}),
                json!({"name": "web", "description": "frontends"}),
            )
            .await
            .unwrap();
        assert_eq!(updated["description"], "frontends");
        assert_eq!(updated["environments"][0]["name"], "production");
    }

    #[tokio::test]
    async fn test_import_scoped_database_then_read() {
        let server = MockServer::start().await;
        let tester = configured(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/databases/db-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uuid": "db-1",
                "name": "cache",
                "database_type": "standalone-redis",
                "image": "redis:7.2",
                "is_public": false,
                "internal_db_url": "redis://default:pw@db-1:6379/0",
                "redis_password": "pw"
            })))
            .mount(&server)
            .await;

        let states = tester
            .import_and_read("coolify_redis_database", "srv-1/prj-1/production/db-1")
            .await
            .unwrap();
        assert_eq!(states.len(), 1);
        let state = &states[0];
        assert_eq!(state["uuid"], "db-1");
        assert_eq!(state["name"], "cache");
        // never returned by a read, kept from the import id
        assert_eq!(state["server_uuid"], "srv-1");
        assert_eq!(state["project_uuid"], "prj-1");
        assert_eq!(state["environment_name"], "production");

        let again = tester
            .read("coolify_redis_database", state.clone())
            .await
            .unwrap();
        assert_eq!(&again, state);
    }

    #[tokio::test]
    async fn test_import_rejects_bare_id_for_scoped_kind() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        assert!(tester
            .import_and_read("coolify_redis_database", "db-1")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_import_project_and_reads_are_idempotent() {
        let server = MockServer::start().await;
        let tester = configured(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project("web", None)))
            .expect(3)
            .mount(&server)
            .await;

        let states = tester.import_and_read("coolify_project", "prj-1").await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0]["name"], "web");

        let first = tester.read("coolify_project", states[0].clone()).await.unwrap();
        let second = tester.read("coolify_project", first.clone()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, states[0]);

        let plan = tester
            .plan_update("coolify_project", first.clone(), json!({"name": "web"}))
            .await
            .unwrap();
        assert_plan_no_changes(&plan);
    }

    #[tokio::test]
    async fn test_configure_failure_surfaces_diagnostics() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        let err = tester
            .configure(json!({"endpoint": "", "token": TEST_TOKEN}))
            .await
            .unwrap_err();
        match err {
            TestError::Diagnostics(diags) => {
                assert_eq!(diags[0].attribute.as_deref(), Some("endpoint"));
                assert!(err_text(&diags).contains("No API Endpoint provided"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    fn err_text(diags: &[Diagnostic]) -> String {
        TestError::Diagnostics(diags.to_vec()).to_string()
    }

    #[tokio::test]
    async fn test_validate_data_source_config() {
        let tester = ProviderTester::new(CoolifyProvider::new());
        tester
            .validate_data_source_config(
                "coolify_servers",
                json!({"filter": [{"name": "is_usable", "values": ["true"]}]}),
            )
            .await
            .unwrap();
        let err = tester
            .validate_data_source_config(
                "coolify_servers",
                json!({"filter": [{"name": "settings", "values": ["x"]}]}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TestError::Diagnostics(_)));
    }

    #[test]
    fn test_assertions_on_diagnostics() {
        let diags = vec![
            Diagnostic::warning("Unable to verify Coolify API version"),
            Diagnostic::error("Missing required field").with_attribute("dockerfile"),
        ];
        assert_has_errors(&diags);
        assert_error_contains(&diags, "Missing required");
        assert_no_errors(&diags[..1]);
    }

    #[test]
    #[should_panic(expected = "Expected no errors")]
    fn test_assert_no_errors_panics_on_error() {
        assert_no_errors(&[Diagnostic::error("Unsupported API version")]);
    }
}
