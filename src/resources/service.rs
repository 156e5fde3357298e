//! `coolify_service`: a docker compose stack managed as one unit.
//!
//! Only `uuid`, `name` and `description` come back from a read; the
//! placement, the deploy toggle and the compose file are carried forward.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{scope_schema, CreateRequest, ImportFormat, Resource};
use crate::client::models::{CreateService, Service, UpdateService};
use crate::client::{Collection, DeleteOptions};
use crate::codec;
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// Local record of a service.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceModel {
    pub uuid: Attr<String>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub server_uuid: Attr<String>,
    pub project_uuid: Attr<String>,
    pub environment_name: Attr<String>,
    pub environment_uuid: Attr<String>,
    pub destination_uuid: Attr<String>,
    pub instant_deploy: Attr<bool>,
    /// Compose file, plain text.
    pub compose: Attr<String>,
}

/// The service kind.
pub struct ServiceResource;

impl Resource for ServiceResource {
    type Model = ServiceModel;
    type Wire = Service;

    const TYPE_NAME: &'static str = "coolify_service";
    const LABEL: &'static str = "service";
    const COLLECTION: Collection = Collection::Services;
    const IMPORT: ImportFormat = ImportFormat::Scoped("service");
    const NOT_ECHOED: &'static [&'static str] = &[
        "server_uuid",
        "project_uuid",
        "environment_name",
        "environment_uuid",
        "destination_uuid",
        "instant_deploy",
        "compose",
    ];
    const DELETE_OPTIONS: Option<DeleteOptions> = Some(DeleteOptions::CLEANUP);

    fn base_schema() -> Schema {
        scope_schema()
            .with_description("Create, read, update, and delete a Coolify service resource.")
            .with_attribute("uuid", Attribute::computed_string().with_description("UUID of the service."))
            .with_attribute(
                "name",
                Attribute::optional_computed_string().with_description("Name of the service."),
            )
            .with_attribute(
                "description",
                Attribute::optional_computed_string()
                    .with_description("Description of the service.")
                    .with_force_new(),
            )
            .with_attribute(
                "destination_uuid",
                Attribute::optional_computed_string()
                    .with_description("UUID of the destination if the server has multiple destinations.")
                    .with_default(Value::String(String::new()))
                    .with_force_new(),
            )
            .with_attribute(
                "environment_uuid",
                Attribute::optional_string()
                    .with_description("UUID of the environment. Will replace environment_name in future.")
                    .with_force_new(),
            )
            .with_attribute(
                "instant_deploy",
                Attribute::optional_computed_bool()
                    .with_description("Instant deploy the service.")
                    .with_default(Value::Bool(false))
                    .with_force_new(),
            )
            .with_attribute(
                "compose",
                Attribute::required_string()
                    .with_description("The Docker Compose raw content.")
                    .with_force_new(),
            )
    }

    fn uuid(model: &ServiceModel) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &ServiceModel) -> Result<CreateRequest, ProviderError> {
        let body = CreateService {
            server_uuid: plan.server_uuid.required_scalar(),
            project_uuid: plan.project_uuid.required_scalar(),
            environment_name: plan.environment_name.required_scalar(),
            environment_uuid: plan.environment_uuid.to_wire_omit_empty(),
            destination_uuid: plan.destination_uuid.to_wire_omit_empty(),
            name: plan.name.to_wire(),
            description: plan.description.to_wire(),
            instant_deploy: plan.instant_deploy.to_wire(),
            docker_compose_raw: codec::encode(plan.compose.as_str()),
            connect_to_docker_network: false,
        };
        CreateRequest::new(None, &body)
    }

    fn to_api_update(plan: &ServiceModel, _uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(UpdateService {
            name: plan.name.to_wire(),
            description: plan.description.to_wire(),
            docker_compose_raw: codec::encode_attr(&plan.compose),
            instant_deploy: plan.instant_deploy.to_wire(),
        })?)
    }

    fn from_api(wire: Service, _prior: &ServiceModel) -> Result<ServiceModel, ProviderError> {
        Ok(ServiceModel {
            uuid: Attr::from_wire(wire.uuid),
            name: Attr::from_wire(wire.name),
            description: Attr::from_wire(wire.description),
            ..Default::default()
        })
    }

    fn instant_deploy(model: &ServiceModel) -> bool {
        model.instant_deploy.get().copied().unwrap_or(false)
    }
}
