use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::codec;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// KeyDB fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeydbWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keydb_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keydb_conf: Option<String>,
}

/// KeyDB attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeydbFields {
    pub keydb_password: Attr<String>,
    pub keydb_conf: Attr<String>,
}

/// KeyDB.
pub struct Keydb;

impl Engine for Keydb {
    const KIND: DatabaseEngine = DatabaseEngine::Keydb;
    const SENSITIVE: &'static [&'static str] = &["keydb_password"];

    type Fields = KeydbFields;
    type Wire = KeydbWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (KeyDB) resource.")
            .with_attribute("keydb_password", Attribute::optional_string().with_description("KeyDB password"))
            .with_attribute("keydb_conf", Attribute::optional_string().with_description("KeyDB conf"))
    }

    fn from_wire(wire: KeydbWire, prior: &KeydbFields) -> KeydbFields {
        KeydbFields {
            keydb_password: Attr::from_wire(wire.keydb_password),
            keydb_conf: codec::decode_attr(wire.keydb_conf.as_deref(), &prior.keydb_conf),
        }
    }

    fn to_wire(fields: &KeydbFields) -> KeydbWire {
        KeydbWire {
            keydb_password: fields.keydb_password.to_wire(),
            keydb_conf: codec::encode_attr(&fields.keydb_conf),
        }
    }

    fn credentials(fields: &KeydbFields) -> Vec<&Attr<String>> {
        vec![&fields.keydb_password]
    }
}
