use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// ClickHouse fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickhouseWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickhouse_admin_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickhouse_admin_password: Option<String>,
}

/// ClickHouse attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickhouseFields {
    pub clickhouse_admin_user: Attr<String>,
    pub clickhouse_admin_password: Attr<String>,
}

/// ClickHouse.
pub struct Clickhouse;

impl Engine for Clickhouse {
    const KIND: DatabaseEngine = DatabaseEngine::Clickhouse;
    const SENSITIVE: &'static [&'static str] = &["clickhouse_admin_password"];

    type Fields = ClickhouseFields;
    type Wire = ClickhouseWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (ClickHouse) resource.")
            .with_attribute(
                "clickhouse_admin_user",
                Attribute::required_string().with_description("ClickHouse admin user"),
            )
            .with_attribute(
                "clickhouse_admin_password",
                Attribute::required_string().with_description("ClickHouse admin password"),
            )
    }

    fn from_wire(wire: ClickhouseWire, _prior: &ClickhouseFields) -> ClickhouseFields {
        ClickhouseFields {
            clickhouse_admin_user: Attr::from_wire(wire.clickhouse_admin_user),
            clickhouse_admin_password: Attr::from_wire(wire.clickhouse_admin_password),
        }
    }

    fn to_wire(fields: &ClickhouseFields) -> ClickhouseWire {
        ClickhouseWire {
            clickhouse_admin_user: fields.clickhouse_admin_user.to_wire(),
            clickhouse_admin_password: fields.clickhouse_admin_password.to_wire(),
        }
    }

    fn credentials(fields: &ClickhouseFields) -> Vec<&Attr<String>> {
        vec![&fields.clickhouse_admin_user, &fields.clickhouse_admin_password]
    }
}
