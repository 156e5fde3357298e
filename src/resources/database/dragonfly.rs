use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// Dragonfly fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragonflyWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragonfly_password: Option<String>,
}

/// Dragonfly attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragonflyFields {
    pub dragonfly_password: Attr<String>,
}

/// Dragonfly.
pub struct Dragonfly;

impl Engine for Dragonfly {
    const KIND: DatabaseEngine = DatabaseEngine::Dragonfly;
    const SENSITIVE: &'static [&'static str] = &["dragonfly_password"];

    type Fields = DragonflyFields;
    type Wire = DragonflyWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (Dragonfly) resource.")
            .with_attribute(
                "dragonfly_password",
                Attribute::optional_string().with_description("Dragonfly password"),
            )
    }

    fn from_wire(wire: DragonflyWire, _prior: &DragonflyFields) -> DragonflyFields {
        DragonflyFields {
            dragonfly_password: Attr::from_wire(wire.dragonfly_password),
        }
    }

    fn to_wire(fields: &DragonflyFields) -> DragonflyWire {
        DragonflyWire {
            dragonfly_password: fields.dragonfly_password.to_wire(),
        }
    }

    fn credentials(fields: &DragonflyFields) -> Vec<&Attr<String>> {
        vec![&fields.dragonfly_password]
    }
}
