use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::codec;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// MariaDB fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MariadbWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mariadb_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mariadb_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mariadb_root_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mariadb_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mariadb_conf: Option<String>,
}

/// MariaDB attributes. Credentials are always user supplied.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MariadbFields {
    pub mariadb_user: Attr<String>,
    pub mariadb_password: Attr<String>,
    pub mariadb_root_password: Attr<String>,
    pub mariadb_database: Attr<String>,
    pub mariadb_conf: Attr<String>,
}

/// MariaDB.
pub struct Mariadb;

impl Engine for Mariadb {
    const KIND: DatabaseEngine = DatabaseEngine::Mariadb;
    const SENSITIVE: &'static [&'static str] = &["mariadb_password", "mariadb_root_password"];

    type Fields = MariadbFields;
    type Wire = MariadbWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (MariaDB) resource.")
            .with_attribute("mariadb_user", Attribute::required_string().with_description("MariaDB user"))
            .with_attribute(
                "mariadb_password",
                Attribute::required_string().with_description("MariaDB password"),
            )
            .with_attribute(
                "mariadb_root_password",
                Attribute::required_string().with_description("MariaDB root password"),
            )
            .with_attribute(
                "mariadb_database",
                Attribute::required_string().with_description("MariaDB database"),
            )
            .with_attribute("mariadb_conf", Attribute::optional_string().with_description("MariaDB conf"))
    }

    fn from_wire(wire: MariadbWire, prior: &MariadbFields) -> MariadbFields {
        MariadbFields {
            mariadb_user: Attr::from_wire(wire.mariadb_user),
            mariadb_password: Attr::from_wire(wire.mariadb_password),
            mariadb_root_password: Attr::from_wire(wire.mariadb_root_password),
            mariadb_database: Attr::from_wire(wire.mariadb_database),
            mariadb_conf: codec::decode_attr(wire.mariadb_conf.as_deref(), &prior.mariadb_conf),
        }
    }

    fn to_wire(fields: &MariadbFields) -> MariadbWire {
        MariadbWire {
            mariadb_user: fields.mariadb_user.to_wire(),
            mariadb_password: fields.mariadb_password.to_wire(),
            mariadb_root_password: fields.mariadb_root_password.to_wire(),
            mariadb_database: fields.mariadb_database.to_wire(),
            mariadb_conf: codec::encode_attr(&fields.mariadb_conf),
        }
    }

    fn credentials(fields: &MariadbFields) -> Vec<&Attr<String>> {
        vec![
            &fields.mariadb_user,
            &fields.mariadb_password,
            &fields.mariadb_root_password,
            &fields.mariadb_database,
        ]
    }
}
