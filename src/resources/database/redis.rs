use serde::{Deserialize, Serialize};

use super::{DatabaseEngine, Engine};
use crate::codec;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// Redis fields on the wire.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_conf: Option<String>,
}

/// Redis attributes.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisFields {
    pub redis_password: Attr<String>,
    /// `redis.conf`, plain text.
    pub redis_conf: Attr<String>,
}

/// Redis.
pub struct Redis;

impl Engine for Redis {
    const KIND: DatabaseEngine = DatabaseEngine::Redis;
    const SENSITIVE: &'static [&'static str] = &["redis_password"];

    type Fields = RedisFields;
    type Wire = RedisWire;

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Create, read, update, and delete a Coolify database (Redis) resource.")
            .with_attribute("redis_password", Attribute::optional_string().with_description("Redis password"))
            .with_attribute("redis_conf", Attribute::optional_string().with_description("Redis conf"))
    }

    fn from_wire(wire: RedisWire, prior: &RedisFields) -> RedisFields {
        RedisFields {
            redis_password: Attr::from_wire(wire.redis_password),
            redis_conf: codec::decode_attr(wire.redis_conf.as_deref(), &prior.redis_conf),
        }
    }

    fn to_wire(fields: &RedisFields) -> RedisWire {
        RedisWire {
            redis_password: fields.redis_password.to_wire(),
            redis_conf: codec::encode_attr(&fields.redis_conf),
        }
    }

    fn credentials(fields: &RedisFields) -> Vec<&Attr<String>> {
        vec![&fields.redis_password]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conf_is_base64_on_the_wire() {
        let fields = RedisFields {
            redis_password: Attr::Null,
            redis_conf: "maxmemory 100mb".into(),
        };
        let wire = Redis::to_wire(&fields);
        assert_eq!(wire.redis_password, None);
        assert_eq!(wire.redis_conf.as_deref(), Some("bWF4bWVtb3J5IDEwMG1i"));
        assert_eq!(Redis::from_wire(wire, &RedisFields::default()), fields);
    }

    #[test]
    fn test_verbatim_conf_echo_is_kept() {
        let prior = RedisFields {
            redis_password: Attr::Null,
            redis_conf: "YWJj".into(),
        };
        // plain text that also decodes as base64
        let echoed = RedisWire {
            redis_password: None,
            redis_conf: Some("YWJj".to_string()),
        };
        assert_eq!(Redis::from_wire(echoed, &prior).redis_conf, prior.redis_conf);
    }
}
