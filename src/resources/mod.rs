//! Resource kinds and the lifecycle they share.
//!
//! Every kind implements [`Resource`]: a typed local record (`Model`), the
//! wire shape of a read (`Wire`), and three pure mappers (`from_api`,
//! `to_api_create`, `to_api_update`). The lifecycle itself (create, read,
//! update, delete, import and plan) is written once in this module and is
//! generic over the kind.
//!
//! Fields the platform accepts but never returns are declared per kind in
//! [`Resource::NOT_ECHOED`] and copied from the prior record after every read
//! by [`carry_forward`].
//!
//! The provider dispatches on type names through the object-safe
//! [`ResourceHandler`], produced by [`handler`].

pub mod application;
pub mod database;
pub mod private_key;
pub mod project;
pub mod server;
pub mod service;

use std::collections::BTreeSet;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::client::models::ResourceLimits;
use crate::client::{Collection, CoolifyClient, DeleteOptions};
use crate::error::ProviderError;
use crate::schema::{Attribute, Diagnostic, Schema};
use crate::validation;
use crate::types::{AttributeChange, ImportId, PlanResult};
use crate::value::{is_unknown_json, merge_json, unknown_json, Attr};

/// How a kind's import id is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// `<uuid>`
    Bare,
    /// `<server_uuid>/<project_uuid>/<environment_name>/<{0}_uuid>`
    Scoped(&'static str),
}

/// A create call: optional path suffix under the collection plus the body.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    /// Variant path segment, e.g. `dockerimage` or `redis`.
    pub variant: Option<&'static str>,
    /// JSON body.
    pub body: Value,
}

impl CreateRequest {
    /// Build from a typed body.
    pub fn new<B: Serialize>(variant: Option<&'static str>, body: &B) -> Result<Self, ProviderError> {
        Ok(Self {
            variant,
            body: serde_json::to_value(body)?,
        })
    }
}

/// One manageable kind of remote entity.
pub trait Resource: Send + Sync + 'static {
    /// The local record.
    type Model: Serialize + DeserializeOwned + Clone + Default + Send + Sync;
    /// The remote read shape.
    type Wire: DeserializeOwned + Send;

    /// Host-visible type name, e.g. `coolify_project`.
    const TYPE_NAME: &'static str;
    /// Human label used in messages, e.g. `Redis database`.
    const LABEL: &'static str;
    /// Endpoint family.
    const COLLECTION: Collection;
    /// Import id shape.
    const IMPORT: ImportFormat;
    /// Attributes sent on write but never returned by a read.
    const NOT_ECHOED: &'static [&'static str] = &[];
    /// Attributes hidden from host output.
    const SENSITIVE: &'static [&'static str] = &[];
    /// Cleanup flags sent on delete, if the kind takes any.
    const DELETE_OPTIONS: Option<DeleteOptions> = None;
    /// Statuses accepted from an update call.
    const UPDATE_STATUSES: &'static [u16] = &[200];

    /// Attribute declarations, before the sensitive pass.
    fn base_schema() -> Schema;

    /// The published schema.
    fn schema() -> Schema {
        Self::base_schema().mark_sensitive(Self::SENSITIVE)
    }

    /// The identity attribute.
    fn uuid(model: &Self::Model) -> &Attr<String>;

    /// Validate a planned record and build the create call.
    fn to_api_create(plan: &Self::Model) -> Result<CreateRequest, ProviderError>;

    /// Build the update body.
    fn to_api_update(plan: &Self::Model, uuid: &str) -> Result<Value, ProviderError>;

    /// Path of the update call.
    fn update_path(uuid: &str) -> String {
        format!("{}/{}", Self::COLLECTION.path(), uuid)
    }

    /// Map a read onto a fresh record. Not-echoed fields may be left null.
    fn from_api(wire: Self::Wire, prior: &Self::Model) -> Result<Self::Model, ProviderError>;

    /// Fill not-echoed fields of `remote` from `prior`.
    fn merge_prior(remote: Self::Model, prior: &Self::Model) -> Result<Self::Model, ProviderError> {
        carry_forward(remote, prior, Self::NOT_ECHOED)
    }

    /// Whether an update should be followed by a restart.
    fn instant_deploy(_model: &Self::Model) -> bool {
        false
    }

    /// Adjust a plan against prior state. Runs only on updates.
    fn modify_plan(_plan: &mut Self::Model, _prior: &Self::Model) {}

    /// Kind-specific configuration checks, run after the schema checks.
    fn validate_config(_config: &Self::Model) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Copy `fields` from `prior` into `remote`.
///
/// Each named field ends up exactly as it is in `prior`, null included. A
/// stored record never holds unknowns, so an unknown prior value lands as null.
pub fn carry_forward<M>(remote: M, prior: &M, fields: &[&str]) -> Result<M, ProviderError>
where
    M: Serialize + DeserializeOwned,
{
    if fields.is_empty() {
        return Ok(remote);
    }
    let mut merged = serde_json::to_value(remote)?;
    let prior = serde_json::to_value(prior)?;
    if let (Some(target), Some(source)) = (merged.as_object_mut(), prior.as_object()) {
        for field in fields {
            let carried = source
                .get(*field)
                .filter(|v| !is_unknown_json(v))
                .cloned()
                .unwrap_or(Value::Null);
            target.insert((*field).to_string(), carried);
        }
    }
    Ok(serde_json::from_value(merged)?)
}

fn decode_record<M: DeserializeOwned>(record: Value, what: &str) -> Result<M, ProviderError> {
    serde_json::from_value(record)
        .map_err(|e| ProviderError::InvalidRequest(format!("malformed {} record: {}", what, e)))
}

fn require_uuid<R: Resource>(model: &R::Model) -> Result<String, ProviderError> {
    match R::uuid(model) {
        Attr::Value(uuid) if !uuid.is_empty() => Ok(uuid.clone()),
        _ => Err(ProviderError::InvalidRequest(format!(
            "No UUID found in {} state",
            R::TYPE_NAME
        ))),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Compute the planned record.
///
/// On create, computed-only attributes are unknown and optional+computed
/// attributes left out of config take their default or become unknown. On
/// update both kinds keep the prior value, null included, unless config sets
/// one; then the kind's [`Resource::modify_plan`] hook runs.
///
/// A stored record reads an absent key as null.
pub fn plan<R: Resource>(
    prior: Option<&Value>,
    proposed: Value,
    config: &Value,
) -> Result<PlanResult, ProviderError> {
    let schema = R::schema();
    let mut planned = match proposed {
        Value::Object(map) => map,
        // destroy
        Value::Null if prior.is_some_and(|p| !p.is_null()) => {
            let changes = diff(&schema, prior, &Value::Null);
            return Ok(PlanResult::with_changes(Value::Null, changes, false));
        },
        Value::Null => Map::new(),
        other => {
            return Err(ProviderError::InvalidRequest(format!(
                "proposed {} record is not an object: {}",
                R::TYPE_NAME,
                other
            )))
        },
    };

    let prior = prior.filter(|p| !p.is_null());
    for (name, attr) in &schema.block.attributes {
        let from_config = present(config.get(name));
        let from_prior = prior.map(|p| p.get(name).cloned().unwrap_or(Value::Null));
        if attr.is_computed_only() {
            planned.insert(name.clone(), from_prior.unwrap_or_else(unknown_json));
        } else if attr.is_optional_computed() {
            let value = plan_optional_computed(attr, from_config, from_prior.as_ref());
            planned.insert(name.clone(), value);
        }
    }

    let mut planned = Value::Object(planned);
    if let Some(prior) = prior {
        let mut plan_model: R::Model = decode_record(planned, R::TYPE_NAME)?;
        let prior_model: R::Model = decode_record(prior.clone(), R::TYPE_NAME)?;
        R::modify_plan(&mut plan_model, &prior_model);
        planned = serde_json::to_value(plan_model)?;
    }

    let changes = diff(&schema, prior, &planned);
    // an unknown planned value is not yet a difference
    let requires_replace = prior.is_some()
        && changes.iter().any(|change| {
            change.after.as_ref().map_or(true, |v| !is_unknown_json(v))
                && schema
                    .attribute(&change.path)
                    .is_some_and(|attr: &Attribute| attr.force_new)
        });

    Ok(PlanResult::with_changes(planned, changes, requires_replace))
}

/// Three-way merge for one optional+computed attribute.
fn plan_optional_computed(attr: &Attribute, config: Option<&Value>, prior: Option<&Value>) -> Value {
    if let Some(interpolated) = config.filter(|v| is_unknown_json(v)) {
        return interpolated.clone();
    }
    let merged = merge_json(config, prior);
    if !is_unknown_json(&merged) {
        return merged;
    }
    match (prior, &attr.default) {
        // the remote side left it unset last time
        (Some(Value::Null), _) => Value::Null,
        (_, Some(default)) => default.clone(),
        _ => merged,
    }
}

fn diff(schema: &Schema, prior: Option<&Value>, planned: &Value) -> Vec<AttributeChange> {
    let names: BTreeSet<&String> = schema.block.attributes.keys().collect();
    names
        .into_iter()
        .filter_map(|name| {
            let before = prior.and_then(|p| present(p.get(name))).cloned();
            let after = present(planned.get(name)).cloned();
            match (before, after) {
                (None, Some(after)) => Some(AttributeChange::added(name.clone(), after)),
                (Some(before), None) => Some(AttributeChange::removed(name.clone(), before)),
                (Some(before), Some(after)) if before != after => {
                    Some(AttributeChange::modified(name.clone(), before, after))
                },
                _ => None,
            }
        })
        .collect()
}

async fn fetch<R: Resource>(
    client: &CoolifyClient,
    uuid: &str,
    prior: &R::Model,
) -> Result<Option<R::Model>, ProviderError> {
    let response = client.fetch(R::COLLECTION, uuid).await?;
    if response.is_not_found() {
        return Ok(None);
    }
    let response = response.expect(&format!("reading {}: uuid={}", R::LABEL, uuid), &[200])?;
    let wire: R::Wire = response.json()?;
    let remote = R::from_api(wire, prior)?;
    R::merge_prior(remote, prior).map(Some)
}

/// Create the remote entity, then read it back.
#[instrument(skip_all, name = "resource.create", fields(resource_type = R::TYPE_NAME))]
pub async fn create<R: Resource>(
    client: &CoolifyClient,
    plan: R::Model,
) -> Result<R::Model, ProviderError> {
    let request = R::to_api_create(&plan)?;
    debug!(variant = ?request.variant, "Creating {}", R::LABEL);

    let operation = format!("creating {}", R::LABEL);
    let uuid = client
        .create(R::COLLECTION, request.variant, &request.body)
        .await?
        .expect(&operation, &[201])?
        .created_uuid(&operation)?;

    match fetch::<R>(client, &uuid, &plan).await? {
        Some(created) => {
            info!(uuid = %uuid, "Created {}", R::LABEL);
            Ok(created)
        },
        None => Err(ProviderError::NotFound(format!(
            "{} {} disappeared right after creation",
            R::LABEL,
            uuid
        ))),
    }
}

/// Refresh a record. `None` means it no longer exists remotely.
#[instrument(skip_all, name = "resource.read", fields(resource_type = R::TYPE_NAME))]
pub async fn read<R: Resource>(
    client: &CoolifyClient,
    state: R::Model,
) -> Result<Option<R::Model>, ProviderError> {
    let uuid = require_uuid::<R>(&state)?;
    debug!(uuid = %uuid, "Reading {}", R::LABEL);
    let refreshed = fetch::<R>(client, &uuid, &state).await?;
    if refreshed.is_none() {
        warn!(uuid = %uuid, "{} not found, removing from state", R::LABEL);
    }
    Ok(refreshed)
}

/// Push a planned record, restart if asked to, then read it back.
///
/// The identity always comes from `prior`.
#[instrument(skip_all, name = "resource.update", fields(resource_type = R::TYPE_NAME))]
pub async fn update<R: Resource>(
    client: &CoolifyClient,
    prior: R::Model,
    plan: R::Model,
) -> Result<Option<R::Model>, ProviderError> {
    let uuid = require_uuid::<R>(&prior)?;
    debug!(uuid = %uuid, "Updating {}", R::LABEL);

    let body = R::to_api_update(&plan, &uuid)?;
    client
        .patch(&R::update_path(&uuid), &body)
        .await?
        .expect(&format!("updating {}: uuid={}", R::LABEL, uuid), R::UPDATE_STATUSES)?;

    if R::instant_deploy(&plan) {
        spawn_restart(client.clone(), R::COLLECTION, uuid.clone(), R::LABEL);
    }

    let mut plan = plan;
    if !R::uuid(&plan).is_value() {
        set_uuid::<R>(&mut plan, &uuid)?;
    }
    let refreshed = fetch::<R>(client, &uuid, &plan).await?;
    match &refreshed {
        Some(_) => info!(uuid = %uuid, "Updated {}", R::LABEL),
        None => warn!(uuid = %uuid, "{} not found after update, removing from state", R::LABEL),
    }
    Ok(refreshed)
}

fn set_uuid<R: Resource>(model: &mut R::Model, uuid: &str) -> Result<(), ProviderError> {
    let mut record = serde_json::to_value(&*model)?;
    if let Some(map) = record.as_object_mut() {
        map.insert("uuid".to_string(), Value::String(uuid.to_string()));
    }
    *model = serde_json::from_value(record)?;
    Ok(())
}

/// Trigger a restart without waiting for its outcome.
fn spawn_restart(client: CoolifyClient, collection: Collection, uuid: String, label: &'static str) {
    tokio::spawn(async move {
        match client.restart(collection, &uuid).await {
            Ok(response) if (200..300).contains(&response.status) => {
                debug!(uuid = %uuid, "Restart of {} queued", label);
            },
            Ok(response) => {
                warn!(uuid = %uuid, status = response.status, "Restart of {} was refused", label);
            },
            Err(e) => warn!(uuid = %uuid, error = %e, "Restart of {} failed", label),
        }
    });
}

/// Delete the remote entity. On failure the caller keeps its record.
#[instrument(skip_all, name = "resource.delete", fields(resource_type = R::TYPE_NAME))]
pub async fn delete<R: Resource>(client: &CoolifyClient, state: R::Model) -> Result<(), ProviderError> {
    let uuid = require_uuid::<R>(&state)?;
    debug!(uuid = %uuid, "Deleting {}", R::LABEL);
    client
        .remove(R::COLLECTION, &uuid, R::DELETE_OPTIONS.as_ref())
        .await?
        .expect(&format!("deleting {}: uuid={}", R::LABEL, uuid), &[200, 204])?;
    info!(uuid = %uuid, "Deleted {}", R::LABEL);
    Ok(())
}

/// Turn an import id into the seed record of a subsequent read.
pub fn import<R: Resource>(id: &str) -> Result<Value, ProviderError> {
    let parsed = match R::IMPORT {
        ImportFormat::Bare => ImportId::parse_bare(id)?,
        ImportFormat::Scoped(resource) => ImportId::parse_scoped(id, resource)?,
    };
    debug!(resource_type = R::TYPE_NAME, id = %parsed, "Importing");
    Ok(parsed.seed())
}

/// Type-erased access to one kind, keyed by its type name.
#[async_trait::async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Host-visible type name.
    fn type_name(&self) -> &'static str;
    /// Published schema.
    fn schema(&self) -> Schema;
    /// Check a configuration without touching the remote system.
    fn validate(&self, config: &Value) -> Vec<Diagnostic>;
    /// See [`plan`].
    fn plan(
        &self,
        prior: Option<&Value>,
        proposed: Value,
        config: &Value,
    ) -> Result<PlanResult, ProviderError>;
    /// See [`create`].
    async fn create(&self, client: &CoolifyClient, planned: Value) -> Result<Value, ProviderError>;
    /// See [`read`]; drift yields JSON `null`.
    async fn read(&self, client: &CoolifyClient, state: Value) -> Result<Value, ProviderError>;
    /// See [`update`]; drift yields JSON `null`.
    async fn update(
        &self,
        client: &CoolifyClient,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError>;
    /// See [`delete`].
    async fn delete(&self, client: &CoolifyClient, state: Value) -> Result<(), ProviderError>;
    /// See [`import`].
    fn import(&self, id: &str) -> Result<Value, ProviderError>;
}

struct Handler<R>(PhantomData<fn() -> R>);

fn to_record<M: Serialize>(model: Option<M>) -> Result<Value, ProviderError> {
    match model {
        Some(model) => Ok(serde_json::to_value(model)?),
        None => Ok(Value::Null),
    }
}

#[async_trait::async_trait]
impl<R: Resource> ResourceHandler for Handler<R> {
    fn type_name(&self) -> &'static str {
        R::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        R::schema()
    }

    fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = validation::validate(&R::schema(), config);
        if diagnostics.is_empty() {
            match decode_record::<R::Model>(config.clone(), R::TYPE_NAME) {
                Ok(model) => diagnostics.extend(R::validate_config(&model)),
                Err(e) => diagnostics.push(e.to_diagnostic()),
            }
        }
        diagnostics
    }

    fn plan(
        &self,
        prior: Option<&Value>,
        proposed: Value,
        config: &Value,
    ) -> Result<PlanResult, ProviderError> {
        plan::<R>(prior, proposed, config)
    }

    async fn create(&self, client: &CoolifyClient, planned: Value) -> Result<Value, ProviderError> {
        let planned: R::Model = decode_record(planned, R::TYPE_NAME)?;
        to_record(Some(create::<R>(client, planned).await?))
    }

    async fn read(&self, client: &CoolifyClient, state: Value) -> Result<Value, ProviderError> {
        let state: R::Model = decode_record(state, R::TYPE_NAME)?;
        to_record(read::<R>(client, state).await?)
    }

    async fn update(
        &self,
        client: &CoolifyClient,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError> {
        let prior: R::Model = decode_record(prior, R::TYPE_NAME)?;
        let planned: R::Model = decode_record(planned, R::TYPE_NAME)?;
        to_record(update::<R>(client, prior, planned).await?)
    }

    async fn delete(&self, client: &CoolifyClient, state: Value) -> Result<(), ProviderError> {
        let state: R::Model = decode_record(state, R::TYPE_NAME)?;
        delete::<R>(client, state).await
    }

    fn import(&self, id: &str) -> Result<Value, ProviderError> {
        import::<R>(id)
    }
}

/// Box a kind for dynamic dispatch.
pub fn handler<R: Resource>() -> Box<dyn ResourceHandler> {
    Box::new(Handler::<R>(PhantomData))
}

/// Every resource kind the provider manages.
pub fn all() -> Vec<Box<dyn ResourceHandler>> {
    let mut handlers = vec![
        handler::<application::ApplicationResource>(),
        handler::<service::ServiceResource>(),
        handler::<server::ServerResource>(),
        handler::<project::ProjectResource>(),
        handler::<private_key::PrivateKeyResource>(),
    ];
    handlers.extend(database::handlers());
    handlers
}

// =============================================================================
// Shared schema fragments
// =============================================================================

/// Placement attributes of environment-scoped kinds.
pub(crate) fn scope_schema() -> Schema {
    Schema::v0()
        .with_attribute(
            "server_uuid",
            Attribute::required_string()
                .with_description("UUID of the server.")
                .with_force_new(),
        )
        .with_attribute(
            "project_uuid",
            Attribute::required_string()
                .with_description("UUID of the project.")
                .with_force_new(),
        )
        .with_attribute(
            "environment_name",
            Attribute::required_string()
                .with_description("Name of the environment.")
                .with_force_new(),
        )
        .with_attribute(
            "destination_uuid",
            Attribute::optional_computed_string()
                .with_description("UUID of the destination if the server has multiple destinations.")
                .with_force_new(),
        )
}

/// Container resource limit attributes.
pub(crate) fn limits_schema() -> Schema {
    Schema::v0()
        .with_attribute(
            "limits_memory",
            Attribute::optional_computed_string().with_description("Memory limit, e.g. `512m`."),
        )
        .with_attribute(
            "limits_memory_swap",
            Attribute::optional_computed_string().with_description("Memory swap limit."),
        )
        .with_attribute(
            "limits_memory_swappiness",
            Attribute::optional_computed_int64().with_description("Memory swappiness."),
        )
        .with_attribute(
            "limits_memory_reservation",
            Attribute::optional_computed_string().with_description("Memory reservation."),
        )
        .with_attribute(
            "limits_cpus",
            Attribute::optional_computed_string().with_description("CPU limit."),
        )
        .with_attribute(
            "limits_cpuset",
            Attribute::optional_computed_string().with_description("CPU set."),
        )
        .with_attribute(
            "limits_cpu_shares",
            Attribute::optional_computed_int64().with_description("CPU shares."),
        )
}

/// Container resource limits as stored in state.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LimitsModel {
    pub limits_memory: Attr<String>,
    pub limits_memory_swap: Attr<String>,
    pub limits_memory_swappiness: Attr<i64>,
    pub limits_memory_reservation: Attr<String>,
    pub limits_cpus: Attr<String>,
    pub limits_cpuset: Attr<String>,
    pub limits_cpu_shares: Attr<i64>,
}

impl LimitsModel {
    pub(crate) fn from_wire(limits: ResourceLimits) -> Self {
        Self {
            limits_memory: Attr::from_wire(limits.limits_memory),
            limits_memory_swap: Attr::from_wire(limits.limits_memory_swap),
            limits_memory_swappiness: Attr::from_wire(limits.limits_memory_swappiness),
            limits_memory_reservation: Attr::from_wire(limits.limits_memory_reservation),
            limits_cpus: Attr::from_wire(limits.limits_cpus),
            limits_cpuset: Attr::from_wire(limits.limits_cpuset),
            limits_cpu_shares: Attr::from_wire(limits.limits_cpu_shares),
        }
    }

    pub(crate) fn to_wire(&self) -> ResourceLimits {
        ResourceLimits {
            limits_memory: self.limits_memory.to_wire(),
            limits_memory_swap: self.limits_memory_swap.to_wire(),
            limits_memory_swappiness: self.limits_memory_swappiness.to_wire(),
            limits_memory_reservation: self.limits_memory_reservation.to_wire(),
            limits_cpus: self.limits_cpus.to_wire(),
            limits_cpuset: self.limits_cpuset.to_wire(),
            limits_cpu_shares: self.limits_cpu_shares.to_wire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    fn is_unknown_at(record: &Value, name: &str) -> bool {
        record.get(name).is_some_and(is_unknown_json)
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Widget {
        uuid: Attr<String>,
        name: Attr<String>,
        size: Attr<i64>,
        color: Attr<String>,
        secret: Attr<String>,
        region: Attr<String>,
        derived: Attr<String>,
    }

    struct WidgetResource;

    impl Resource for WidgetResource {
        type Model = Widget;
        type Wire = Value;

        const TYPE_NAME: &'static str = "coolify_widget";
        const LABEL: &'static str = "widget";
        const COLLECTION: Collection = Collection::Projects;
        const IMPORT: ImportFormat = ImportFormat::Bare;
        const NOT_ECHOED: &'static [&'static str] = &["secret"];
        const SENSITIVE: &'static [&'static str] = &["secret"];

        fn base_schema() -> Schema {
            Schema::v0()
                .with_attribute("uuid", Attribute::computed_string())
                .with_attribute("name", Attribute::required_string())
                .with_attribute("size", Attribute::optional_computed_int64())
                .with_attribute("color", Attribute::optional_computed_string())
                .with_attribute("secret", Attribute::optional_string())
                .with_attribute("region", Attribute::required_string().with_force_new())
                .with_attribute("derived", Attribute::computed_string())
        }

        fn uuid(model: &Widget) -> &Attr<String> {
            &model.uuid
        }

        fn to_api_create(plan: &Widget) -> Result<CreateRequest, ProviderError> {
            CreateRequest::new(None, &json!({"name": plan.name.to_wire()}))
        }

        fn to_api_update(plan: &Widget, _uuid: &str) -> Result<Value, ProviderError> {
            Ok(json!({"name": plan.name.to_wire()}))
        }

        fn from_api(wire: Value, _prior: &Widget) -> Result<Widget, ProviderError> {
            Ok(serde_json::from_value(wire)?)
        }

        fn modify_plan(plan: &mut Widget, prior: &Widget) {
            if plan.name != prior.name {
                plan.derived = Attr::Unknown;
            }
        }
    }

    #[test]
    fn test_plan_create_marks_computed_unknown() {
        let config = json!({"name": "w", "region": "eu"});
        let result = plan::<WidgetResource>(None, config.clone(), &config).unwrap();
        let planned = &result.planned_state;
        assert!(is_unknown_at(planned, "uuid"));
        assert!(is_unknown_at(planned, "size"));
        assert!(is_unknown_at(planned, "color"));
        assert!(is_unknown_at(planned, "derived"));
        assert!(!result.requires_replace);
    }

    #[test]
    fn test_plan_update_merges_and_keeps_computed() {
        let prior = json!({
            "uuid": "w-1", "name": "w", "size": 3, "color": "red",
            "secret": null, "region": "eu", "derived": "w@eu"
        });
        let config = json!({"name": "w", "region": "eu"});
        let result = plan::<WidgetResource>(Some(&prior), config.clone(), &config).unwrap();
        let planned = &result.planned_state;
        assert_eq!(planned["uuid"], "w-1");
        assert_eq!(planned["size"], 3);
        assert_eq!(planned["color"], "red");
        assert_eq!(planned["derived"], "w@eu");
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_plan_update_keeps_prior_nulls() {
        let prior = json!({
            "uuid": "w-1", "name": "w", "size": null,
            "region": "eu", "derived": null
        });
        let config = json!({"name": "w", "region": "eu"});
        let result = plan::<WidgetResource>(Some(&prior), config.clone(), &config).unwrap();
        let planned = &result.planned_state;
        // absent keys read as null
        assert_eq!(planned["color"], Value::Null);
        assert_eq!(planned["size"], Value::Null);
        assert_eq!(planned["derived"], Value::Null);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_plan_update_config_overrides_prior() {
        let prior = json!({"uuid": "w-1", "name": "w", "size": 3, "color": "red", "region": "eu"});
        let config = json!({"name": "w", "color": "blue", "region": "eu"});
        let result = plan::<WidgetResource>(Some(&prior), config.clone(), &config).unwrap();
        assert_eq!(result.planned_state["color"], "blue");
        assert_eq!(result.planned_state["size"], 3);
        let paths: Vec<&str> = result.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["color"]);
    }

    #[test]
    fn test_plan_update_interpolated_config_stays_unknown() {
        let prior = json!({"uuid": "w-1", "name": "w", "size": 3, "color": "red", "region": "eu"});
        let config = json!({"name": "w", "color": unknown_json(), "region": "eu"});
        let result = plan::<WidgetResource>(Some(&prior), config.clone(), &config).unwrap();
        assert!(is_unknown_at(&result.planned_state, "color"));
        assert!(!result.requires_replace);
    }

    #[test]
    fn test_plan_modify_hook_and_replace() {
        let prior = json!({"uuid": "w-1", "name": "w", "size": 3, "region": "eu", "derived": "w@eu"});
        let config = json!({"name": "w2", "size": 3, "color": "red", "region": "us"});
        let result = plan::<WidgetResource>(Some(&prior), config.clone(), &config).unwrap();
        assert!(is_unknown_at(&result.planned_state, "derived"));
        assert!(result.requires_replace);
        let paths: Vec<&str> = result.changes.iter().map(|c| c.path.as_str()).collect();
        assert!(paths.contains(&"name"));
        assert!(paths.contains(&"region"));
    }

    #[test]
    fn test_schema_passes_applied() {
        let schema = WidgetResource::schema();
        assert_eq!(schema.sensitive_attributes(), vec!["secret"]);
        assert!(schema.attribute("size").unwrap().is_optional_computed());
        assert!(!schema.attribute("secret").unwrap().flags.computed);
    }

    #[test]
    fn test_carry_forward_copies_nulls_too() {
        let remote = Widget {
            name: "from-remote".into(),
            secret: "leaked?".into(),
            ..Default::default()
        };
        let prior = Widget::default();
        let merged = carry_forward(remote, &prior, &["secret"]).unwrap();
        assert_eq!(merged.name, Attr::value("from-remote".to_string()));
        assert_eq!(merged.secret, Attr::Null);
    }

    #[test]
    fn test_import_formats() {
        assert_eq!(import::<WidgetResource>("w-1").unwrap(), json!({"uuid": "w-1"}));
        assert!(import::<WidgetResource>("a/b/c/d").is_err());
    }

    proptest! {
        #[test]
        fn not_echoed_survives_any_read_sequence(
            first in proptest::option::of("[a-z]{0,8}"),
            remotes in prop::collection::vec(proptest::option::of("[a-z]{0,8}"), 1..6),
        ) {
            let initial = Widget { secret: Attr::from_wire(first.clone()), ..Default::default() };
            let mut current = initial.clone();
            for remote_secret in remotes {
                let remote = Widget { secret: Attr::from_wire(remote_secret), ..Default::default() };
                current = WidgetResource::merge_prior(remote, &current).unwrap();
            }
            prop_assert_eq!(current.secret, initial.secret);
        }
    }
}
