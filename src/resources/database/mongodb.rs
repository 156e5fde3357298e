use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::codec;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// MongoDB fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongodbWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_initdb_root_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_initdb_root_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_initdb_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_conf: Option<String>,
}

/// MongoDB attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongodbFields {
    pub mongo_initdb_root_username: Attr<String>,
    pub mongo_initdb_root_password: Attr<String>,
    pub mongo_initdb_database: Attr<String>,
    pub mongo_conf: Attr<String>,
}

/// MongoDB.
pub struct Mongodb;

impl Engine for Mongodb {
    const KIND: DatabaseEngine = DatabaseEngine::Mongodb;
    const SENSITIVE: &'static [&'static str] = &["mongo_initdb_root_password"];

    type Fields = MongodbFields;
    type Wire = MongodbWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (MongoDB) resource.")
            .with_attribute(
                "mongo_initdb_root_username",
                Attribute::required_string().with_description("MongoDB initdb root username"),
            )
            .with_attribute(
                "mongo_initdb_root_password",
                Attribute::required_string().with_description("MongoDB initdb root password"),
            )
            .with_attribute(
                "mongo_initdb_database",
                Attribute::optional_string().with_description("MongoDB initdb database"),
            )
            .with_attribute("mongo_conf", Attribute::optional_string().with_description("MongoDB conf"))
    }

    fn from_wire(wire: MongodbWire, prior: &MongodbFields) -> MongodbFields {
        MongodbFields {
            mongo_initdb_root_username: Attr::from_wire(wire.mongo_initdb_root_username),
            mongo_initdb_root_password: Attr::from_wire(wire.mongo_initdb_root_password),
            mongo_initdb_database: Attr::from_wire(wire.mongo_initdb_database),
            mongo_conf: codec::decode_attr(wire.mongo_conf.as_deref(), &prior.mongo_conf),
        }
    }

    fn to_wire(fields: &MongodbFields) -> MongodbWire {
        MongodbWire {
            mongo_initdb_root_username: fields.mongo_initdb_root_username.to_wire(),
            mongo_initdb_root_password: fields.mongo_initdb_root_password.to_wire(),
            mongo_initdb_database: fields.mongo_initdb_database.to_wire(),
            mongo_conf: codec::encode_attr(&fields.mongo_conf),
        }
    }

    fn credentials(fields: &MongodbFields) -> Vec<&Attr<String>> {
        vec![
            &fields.mongo_initdb_root_username,
            &fields.mongo_initdb_root_password,
            &fields.mongo_initdb_database,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::super::DatabaseResource;
    use super::*;
    use crate::resources;
    use crate::value::is_unknown_json;
    use serde_json::json;

    #[test]
    fn test_database_rename_recomputes_url() {
        let prior = json!({
            "uuid": "db-1",
            "server_uuid": "srv-1",
            "project_uuid": "prj-1",
            "environment_name": "production",
            "environment_uuid": "env-1",
            "mongo_initdb_root_username": "root",
            "mongo_initdb_root_password": "pw",
            "mongo_initdb_database": "app",
            "internal_db_url": "mongodb://root:pw@db-1:27017/?directConnection=true"
        });
        let mut config = prior.clone();
        config["mongo_initdb_database"] = json!("app2");
        config["uuid"] = serde_json::Value::Null;
        config["internal_db_url"] = serde_json::Value::Null;

        let result =
            resources::plan::<DatabaseResource<Mongodb>>(Some(&prior), config.clone(), &config).unwrap();
        assert!(is_unknown_json(&result.planned_state["internal_db_url"]));
    }
}
