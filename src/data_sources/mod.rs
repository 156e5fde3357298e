//! Read-only data sources.
//!
//! Each listing kind yields two data sources: a single record looked up by
//! `uuid` (`coolify_project`) and a filtered list (`coolify_projects`).
//! Records are the platform's read shape, serialized as-is, with a few
//! nested values lifted to the top level where the kind asks for it.
//!
//! Unlike resource reads, a missing record is an error here, not drift.

mod applications;
mod private_keys;
mod projects;
mod servers;
mod services;

pub use applications::Applications;
pub use private_keys::PrivateKeys;
pub use projects::Projects;
pub use servers::Servers;
pub use services::Services;

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::{Collection, CoolifyClient};
use crate::error::ProviderError;
use crate::filter::{self, FilterClause};
use crate::schema::{Attribute, AttributeFlags, AttributeType, Diagnostic, Schema};
use crate::validation;

/// A platform collection exposed through data sources.
pub trait Listing: Send + Sync + 'static {
    /// The remote read shape.
    type Wire: Serialize + DeserializeOwned + Send;

    /// Endpoint family.
    const COLLECTION: Collection;
    /// Human label of one record, e.g. `private key`.
    const LABEL: &'static str;
    /// Type name of the single-record data source.
    const SINGLE: &'static str;
    /// Type name of the list data source.
    const LIST: &'static str;
    /// Output attribute holding the list.
    const LIST_KEY: &'static str;
    /// Attributes a list filter may name.
    const FILTERS: &'static [&'static str];
    /// Attributes hidden from host output on the single-record data source.
    const SENSITIVE: &'static [&'static str] = &[];

    /// Computed attributes of one record.
    fn attributes() -> Schema;

    /// Turn one read into an output record.
    fn record(wire: Self::Wire) -> Result<Map<String, Value>, ProviderError> {
        match serde_json::to_value(wire)? {
            Value::Object(map) => Ok(map),
            other => Err(ProviderError::Conversion(format!(
                "{} record is not an object: {}",
                Self::LABEL,
                other
            ))),
        }
    }
}

/// Build a schema of computed attributes from `(name, type)` pairs.
pub(crate) fn computed_attributes(fields: &[(&str, AttributeType)]) -> Schema {
    fields.iter().fold(Schema::v0(), |schema, (name, attr_type)| {
        schema.with_attribute(*name, Attribute::computed(attr_type.clone()))
    })
}

/// The same attributes, all computed.
pub(crate) fn computed_view(schema: Schema) -> Schema {
    let mut view = schema;
    for attr in view.block.attributes.values_mut() {
        attr.flags = AttributeFlags {
            sensitive: attr.flags.sensitive,
            ..AttributeFlags::computed()
        };
        attr.force_new = false;
        attr.default = None;
    }
    view
}

fn object_type(schema: &Schema) -> AttributeType {
    let fields: HashMap<String, AttributeType> = schema
        .block
        .attributes
        .iter()
        .map(|(name, attr)| (name.clone(), attr.attr_type.clone()))
        .collect();
    AttributeType::object(fields)
}

/// Type-erased access to one data source, keyed by its type name.
#[async_trait::async_trait]
pub trait DataSourceHandler: Send + Sync {
    /// Host-visible type name.
    fn type_name(&self) -> &'static str;
    /// Published schema.
    fn schema(&self) -> Schema;
    /// Check a configuration without touching the remote system.
    fn validate(&self, config: &Value) -> Vec<Diagnostic>;
    /// Read the data source.
    async fn read(&self, client: &CoolifyClient, config: Value) -> Result<Value, ProviderError>;
}

struct Single<L>(PhantomData<fn() -> L>);

struct List<L>(PhantomData<fn() -> L>);

/// Look up one record by `uuid`.
#[instrument(skip_all, name = "data_source.read", fields(data_source_type = L::SINGLE))]
pub async fn read_one<L: Listing>(
    client: &CoolifyClient,
    uuid: &str,
) -> Result<Map<String, Value>, ProviderError> {
    debug!(uuid = %uuid, "Reading {}", L::LABEL);
    let response = client
        .fetch(L::COLLECTION, uuid)
        .await?
        .expect(&format!("reading {}: uuid={}", L::LABEL, uuid), &[200])?;
    L::record(response.json()?)
}

/// List every record and keep those passing `clauses`.
#[instrument(skip_all, name = "data_source.read", fields(data_source_type = L::LIST))]
pub async fn read_all<L: Listing>(
    client: &CoolifyClient,
    clauses: &[FilterClause],
) -> Result<Vec<Map<String, Value>>, ProviderError> {
    let response = client
        .list(L::COLLECTION)
        .await?
        .expect(&format!("listing {}s", L::LABEL), &[200])?;
    let wires: Vec<L::Wire> = response.json()?;
    let total = wires.len();
    let records = wires
        .into_iter()
        .map(L::record)
        .collect::<Result<Vec<_>, _>>()?;
    let kept = filter::apply(records, clauses);
    debug!(total, kept = kept.len(), "Listed {}s", L::LABEL);
    Ok(kept)
}

#[async_trait::async_trait]
impl<L: Listing> DataSourceHandler for Single<L> {
    fn type_name(&self) -> &'static str {
        L::SINGLE
    }

    fn schema(&self) -> Schema {
        L::attributes()
            .with_description(format!("Get a Coolify {} by `uuid`.", L::LABEL))
            .with_attribute(
                "uuid",
                Attribute::required_string().with_description(format!("UUID of the {}.", L::LABEL)),
            )
            .mark_sensitive(L::SENSITIVE)
    }

    fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        validation::validate(&self.schema(), config)
    }

    async fn read(&self, client: &CoolifyClient, config: Value) -> Result<Value, ProviderError> {
        let uuid = config
            .get("uuid")
            .and_then(Value::as_str)
            .filter(|uuid| !uuid.is_empty())
            .ok_or_else(|| {
                ProviderError::validation(
                    "uuid",
                    "Missing required field",
                    format!("uuid is required to read a {}", L::LABEL),
                )
            })?;
        let mut record = read_one::<L>(client, uuid).await?;
        record.insert("uuid".to_string(), Value::String(uuid.to_string()));
        Ok(Value::Object(record))
    }
}

#[async_trait::async_trait]
impl<L: Listing> DataSourceHandler for List<L> {
    fn type_name(&self) -> &'static str {
        L::LIST
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description(format!("Get a list of Coolify {}s.", L::LABEL))
            .with_attribute(
                L::LIST_KEY,
                Attribute::computed(AttributeType::list(object_type(&L::attributes()))),
            )
            .with_block("filter", filter::filter_block(L::FILTERS))
    }

    fn validate(&self, config: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = validation::validate(&self.schema(), config);
        if let Err(e) = filter::parse_clauses(config, L::FILTERS) {
            diagnostics.push(e.to_diagnostic());
        }
        diagnostics
    }

    async fn read(&self, client: &CoolifyClient, config: Value) -> Result<Value, ProviderError> {
        let clauses = filter::parse_clauses(&config, L::FILTERS)?;
        let records = read_all::<L>(client, &clauses).await?;

        let mut output = Map::new();
        output.insert(
            "filter".to_string(),
            config.get("filter").cloned().unwrap_or(Value::Null),
        );
        output.insert(
            L::LIST_KEY.to_string(),
            Value::Array(records.into_iter().map(Value::Object).collect()),
        );
        Ok(Value::Object(output))
    }
}

fn pair<L: Listing>() -> [Box<dyn DataSourceHandler>; 2] {
    [Box::new(Single::<L>(PhantomData)), Box::new(List::<L>(PhantomData))]
}

/// Every data source the provider serves.
pub fn all() -> Vec<Box<dyn DataSourceHandler>> {
    [
        pair::<Applications>(),
        pair::<Services>(),
        pair::<Servers>(),
        pair::<Projects>(),
        pair::<PrivateKeys>(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
