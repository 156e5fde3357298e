//! `coolify_private_key`: an SSH key used for servers and git deploy keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CreateRequest, ImportFormat, Resource};
use crate::client::models::{PrivateKey, PrivateKeyRequest};
use crate::client::Collection;
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// Local record of a private key.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateKeyModel {
    pub uuid: Attr<String>,
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub private_key: Attr<String>,
    pub public_key: Attr<String>,
    pub fingerprint: Attr<String>,
    pub is_git_related: Attr<bool>,
    pub team_id: Attr<i64>,
    pub created_at: Attr<String>,
    pub updated_at: Attr<String>,
}

impl PrivateKeyModel {
    /// Map a read. Every attribute is remote-authoritative.
    pub fn from_wire(key: PrivateKey) -> Self {
        Self {
            uuid: Attr::from_wire(key.uuid),
            id: Attr::from_wire(key.id),
            name: Attr::from_wire(key.name),
            description: Attr::from_wire(key.description),
            private_key: Attr::from_wire(key.private_key),
            public_key: Attr::from_wire(key.public_key),
            fingerprint: Attr::from_wire(key.fingerprint),
            is_git_related: Attr::from_wire(key.is_git_related),
            team_id: Attr::from_wire(key.team_id),
            created_at: Attr::from_wire(key.created_at),
            updated_at: Attr::from_wire(key.updated_at),
        }
    }
}

/// The private key kind.
pub struct PrivateKeyResource;

impl Resource for PrivateKeyResource {
    type Model = PrivateKeyModel;
    type Wire = PrivateKey;

    const TYPE_NAME: &'static str = "coolify_private_key";
    const LABEL: &'static str = "private key";
    const COLLECTION: Collection = Collection::PrivateKeys;
    const IMPORT: ImportFormat = ImportFormat::Bare;
    const SENSITIVE: &'static [&'static str] = &["private_key"];
    const UPDATE_STATUSES: &'static [u16] = &[200, 201];

    fn base_schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify private key resource.")
            .with_attribute("uuid", Attribute::computed_string())
            .with_attribute("id", Attribute::computed_int64())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("description", Attribute::optional_string())
            .with_attribute(
                "private_key",
                Attribute::required_string()
                    .with_description("The private key in PEM format.")
                    .with_force_new(),
            )
            .with_attribute("public_key", Attribute::computed_string())
            .with_attribute("fingerprint", Attribute::computed_string())
            .with_attribute("is_git_related", Attribute::optional_computed_bool())
            .with_attribute("team_id", Attribute::computed_int64())
            .with_attribute("created_at", Attribute::computed_string())
            .with_attribute("updated_at", Attribute::computed_string())
    }

    fn uuid(model: &PrivateKeyModel) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &PrivateKeyModel) -> Result<CreateRequest, ProviderError> {
        CreateRequest::new(
            None,
            &PrivateKeyRequest {
                uuid: None,
                name: plan.name.to_wire(),
                description: plan.description.to_wire(),
                private_key: plan.private_key.to_wire(),
            },
        )
    }

    fn to_api_update(plan: &PrivateKeyModel, uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(PrivateKeyRequest {
            uuid: Some(uuid.to_string()),
            name: plan.name.to_wire(),
            description: plan.description.to_wire(),
            private_key: plan.private_key.to_wire(),
        })?)
    }

    fn update_path(_uuid: &str) -> String {
        Collection::PrivateKeys.path().to_string()
    }

    fn from_api(wire: PrivateKey, _prior: &PrivateKeyModel) -> Result<PrivateKeyModel, ProviderError> {
        Ok(PrivateKeyModel::from_wire(wire))
    }
}
