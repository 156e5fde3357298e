use serde_json::{Map, Value};

use crate::client::models::Server;
use crate::client::Collection;
use crate::error::ProviderError;
use crate::resources::server::server_attributes;
use crate::schema::{Attribute, Schema};

use super::Listing;

/// Servers, listed or looked up.
///
/// `is_reachable` and `is_usable` live under `settings` on the wire and are
/// lifted to the top level so they can be filtered on.
pub struct Servers;

impl Listing for Servers {
    type Wire = Server;

    const COLLECTION: Collection = Collection::Servers;
    const LABEL: &'static str = "server";
    const SINGLE: &'static str = "coolify_server";
    const LIST: &'static str = "coolify_servers";
    const LIST_KEY: &'static str = "servers";
    const FILTERS: &'static [&'static str] = &[
        "uuid",
        "name",
        "description",
        "ip",
        "port",
        "user",
        "proxy_type",
        "is_reachable",
        "is_usable",
    ];
    const SENSITIVE: &'static [&'static str] = &["settings"];

    fn attributes() -> Schema {
        server_attributes()
            .with_attribute("name", Attribute::computed_string())
            .with_attribute("description", Attribute::computed_string())
            .with_attribute("ip", Attribute::computed_string())
            .with_attribute("port", Attribute::computed_int64())
            .with_attribute("user", Attribute::computed_string())
            .with_attribute("is_reachable", Attribute::computed_bool())
            .with_attribute("is_usable", Attribute::computed_bool())
    }

    fn record(server: Server) -> Result<Map<String, Value>, ProviderError> {
        let lifted = server
            .settings
            .as_ref()
            .map(|s| (s.is_reachable, s.is_usable))
            .unwrap_or_default();
        let mut record = match serde_json::to_value(server)? {
            Value::Object(map) => map,
            other => {
                return Err(ProviderError::Conversion(format!(
                    "server record is not an object: {}",
                    other
                )))
            },
        };
        record.insert("is_reachable".to_string(), lifted.0.map_or(Value::Null, Value::Bool));
        record.insert("is_usable".to_string(), lifted.1.map_or(Value::Null, Value::Bool));
        Ok(record)
    }
}
