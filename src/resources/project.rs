//! `coolify_project`: a named group of environments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CreateRequest, ImportFormat, Resource};
use crate::client::models::{Environment, Project, ProjectRequest};
use crate::client::Collection;
use crate::error::ProviderError;
use crate::schema::{Attribute, AttributeType, Schema};
use crate::value::Attr;

/// Local record of a project.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectModel {
    pub uuid: Attr<String>,
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub environments: Attr<Vec<EnvironmentModel>>,
}

/// One environment of a project, as stored in state.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentModel {
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub project_id: Attr<i64>,
    pub created_at: Attr<String>,
    pub updated_at: Attr<String>,
}

impl From<Environment> for EnvironmentModel {
    fn from(env: Environment) -> Self {
        Self {
            id: Attr::from_wire(env.id),
            name: Attr::from_wire(env.name),
            description: Attr::from_wire(env.description),
            project_id: Attr::from_wire(env.project_id),
            created_at: Attr::from_wire(env.created_at),
            updated_at: Attr::from_wire(env.updated_at),
        }
    }
}

fn environment_type() -> AttributeType {
    AttributeType::object(
        [
            ("id", AttributeType::Int64),
            ("name", AttributeType::String),
            ("description", AttributeType::String),
            ("project_id", AttributeType::Int64),
            ("created_at", AttributeType::String),
            ("updated_at", AttributeType::String),
        ]
        .into_iter()
        .map(|(k, t)| (k.to_string(), t))
        .collect(),
    )
}

/// Project schema attributes, shared with the project data sources.
pub(crate) fn project_attributes() -> Schema {
    Schema::v0()
        .with_attribute("uuid", Attribute::computed_string().with_description("UUID of the project."))
        .with_attribute("id", Attribute::computed_int64())
        .with_attribute(
            "environments",
            Attribute::computed(AttributeType::list(environment_type()))
                .with_description("Environments of the project."),
        )
}

/// The project kind.
pub struct ProjectResource;

impl Resource for ProjectResource {
    type Model = ProjectModel;
    type Wire = Project;

    const TYPE_NAME: &'static str = "coolify_project";
    const LABEL: &'static str = "project";
    const COLLECTION: Collection = Collection::Projects;
    const IMPORT: ImportFormat = ImportFormat::Bare;
    const UPDATE_STATUSES: &'static [u16] = &[200, 201];

    fn base_schema() -> Schema {
        project_attributes()
            .with_description("Create, read, update, and delete a Coolify project resource.")
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Name of the project."),
            )
            .with_attribute(
                "description",
                Attribute::optional_string().with_description("Description of the project."),
            )
    }

    fn uuid(model: &ProjectModel) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &ProjectModel) -> Result<CreateRequest, ProviderError> {
        CreateRequest::new(
            None,
            &ProjectRequest {
                name: plan.name.to_wire(),
                description: plan.description.to_wire(),
            },
        )
    }

    fn to_api_update(plan: &ProjectModel, _uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(ProjectRequest {
            name: plan.name.to_wire(),
            description: plan.description.to_wire(),
        })?)
    }

    fn from_api(wire: Project, _prior: &ProjectModel) -> Result<ProjectModel, ProviderError> {
        Ok(ProjectModel {
            uuid: Attr::from_wire(wire.uuid),
            id: Attr::from_wire(wire.id),
            name: Attr::from_wire(wire.name),
            description: Attr::from_wire(wire.description),
            environments: Attr::from_wire(
                wire.environments
                    .map(|envs| envs.into_iter().map(EnvironmentModel::from).collect()),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_for;
    use crate::resources::{self, handler};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project_body() -> Value {
        json!({
            "id": 4,
            "uuid": "prj-1",
            "name": "web",
            "description": "frontends",
            "environments": [
                {"id": 9, "name": "production", "project_id": 4, "created_at": "2024-11-01T10:00:00Z"}
            ]
        })
    }

    #[tokio::test]
    async fn test_create_then_reads_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/projects"))
            .and(body_json(json!({"name": "web", "description": "frontends"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "prj-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
            .mount(&server)
            .await;

        let plan = ProjectModel {
            name: "web".into(),
            description: "frontends".into(),
            ..Default::default()
        };
        let created = resources::create::<ProjectResource>(&client_for(&server), plan)
            .await
            .unwrap();
        assert_eq!(created.uuid, Attr::value("prj-1".to_string()));
        assert_eq!(created.id, Attr::Value(4));
        let envs = created.environments.get().unwrap();
        assert_eq!(envs[0].name, Attr::value("production".to_string()));
        assert_eq!(envs[0].description, Attr::Null);
    }

    #[tokio::test]
    async fn test_create_failure_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/projects"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "name taken"})))
            .mount(&server)
            .await;

        let err = resources::create::<ProjectResource>(
            &client_for(&server),
            ProjectModel {
                name: "web".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        match err {
            ProviderError::RemoteStatus { status, operation, .. } => {
                assert_eq!(status, 422);
                assert_eq!(operation, "creating project");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_update_accepts_201() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/projects/prj-1"))
            .and(body_json(json!({"name": "web2"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"uuid": "prj-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
            .mount(&server)
            .await;

        let prior = ProjectModel {
            uuid: "prj-1".into(),
            name: "web".into(),
            ..Default::default()
        };
        let plan = ProjectModel {
            uuid: "prj-1".into(),
            name: "web2".into(),
            ..Default::default()
        };
        let updated = resources::update::<ProjectResource>(&client_for(&server), prior, plan)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.uuid, Attr::value("prj-1".to_string()));
    }

    #[tokio::test]
    async fn test_import_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
            .mount(&server)
            .await;

        let handler = handler::<ProjectResource>();
        let seed = handler.import("prj-1").unwrap();
        let state = handler.read(&client_for(&server), seed).await.unwrap();
        assert_eq!(state["uuid"], "prj-1");
        assert_eq!(state["name"], "web");
        assert_eq!(state["environments"][0]["id"], 9);
    }

    #[tokio::test]
    async fn test_delete_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/projects/prj-1"))
            .respond_with(ResponseTemplate::new(400).set_body_string("project has resources"))
            .mount(&server)
            .await;

        let state = ProjectModel {
            uuid: "prj-1".into(),
            ..Default::default()
        };
        let err = resources::delete::<ProjectResource>(&client_for(&server), state)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("project has resources"));
    }

    #[test]
    fn test_schema_shape() {
        let schema = ProjectResource::schema();
        assert!(schema.attribute("name").unwrap().flags.required);
        assert!(schema.attribute("environments").unwrap().is_computed_only());
        assert!(schema.sensitive_attributes().is_empty());
    }
}
