use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::codec;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// MySQL fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysqlWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_root_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mysql_conf: Option<String>,
}

/// MySQL attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysqlFields {
    pub mysql_user: Attr<String>,
    pub mysql_password: Attr<String>,
    pub mysql_root_password: Attr<String>,
    pub mysql_database: Attr<String>,
    pub mysql_conf: Attr<String>,
}

/// MySQL.
pub struct Mysql;

impl Engine for Mysql {
    const KIND: DatabaseEngine = DatabaseEngine::Mysql;
    const SENSITIVE: &'static [&'static str] = &["mysql_password", "mysql_root_password"];

    type Fields = MysqlFields;
    type Wire = MysqlWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (MySQL) resource.")
            .with_attribute("mysql_user", Attribute::optional_computed_string().with_description("MySQL user"))
            .with_attribute(
                "mysql_password",
                Attribute::optional_computed_string().with_description("MySQL password"),
            )
            .with_attribute(
                "mysql_root_password",
                Attribute::optional_computed_string().with_description("MySQL root password"),
            )
            .with_attribute(
                "mysql_database",
                Attribute::optional_computed_string().with_description("MySQL database"),
            )
            .with_attribute("mysql_conf", Attribute::optional_string().with_description("MySQL conf"))
    }

    fn from_wire(wire: MysqlWire, prior: &MysqlFields) -> MysqlFields {
        MysqlFields {
            mysql_user: Attr::from_wire(wire.mysql_user),
            mysql_password: Attr::from_wire(wire.mysql_password),
            mysql_root_password: Attr::from_wire(wire.mysql_root_password),
            mysql_database: Attr::from_wire(wire.mysql_database),
            mysql_conf: codec::decode_attr(wire.mysql_conf.as_deref(), &prior.mysql_conf),
        }
    }

    fn to_wire(fields: &MysqlFields) -> MysqlWire {
        MysqlWire {
            mysql_user: fields.mysql_user.to_wire(),
            mysql_password: fields.mysql_password.to_wire(),
            mysql_root_password: fields.mysql_root_password.to_wire(),
            mysql_database: fields.mysql_database.to_wire(),
            mysql_conf: codec::encode_attr(&fields.mysql_conf),
        }
    }

    fn credentials(fields: &MysqlFields) -> Vec<&Attr<String>> {
        vec![
            &fields.mysql_user,
            &fields.mysql_password,
            &fields.mysql_root_password,
            &fields.mysql_database,
        ]
    }
}
