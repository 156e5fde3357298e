//! Standalone databases, one resource kind per engine.
//!
//! All engines share the placement, the container settings and the derived
//! connection URL; they differ only in their credential and configuration
//! fields. [`DatabaseResource`] implements the lifecycle once and is
//! parameterised by an [`Engine`].

mod clickhouse;
mod dragonfly;
mod keydb;
mod mariadb;
mod mongodb;
mod mysql;
mod postgresql;
mod redis;

pub use clickhouse::{Clickhouse, ClickhouseFields};
pub use dragonfly::{Dragonfly, DragonflyFields};
pub use keydb::{Keydb, KeydbFields};
pub use mariadb::{Mariadb, MariadbFields};
pub use mongodb::{Mongodb, MongodbFields};
pub use mysql::{Mysql, MysqlFields};
pub use postgresql::{Postgresql, PostgresqlFields};
pub use redis::{Redis, RedisFields};

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{handler, limits_schema, scope_schema, CreateRequest, ImportFormat, LimitsModel, Resource, ResourceHandler};
use crate::client::models::{CreateDatabase, Database, DatabaseScope, DatabaseSettings, UpdateDatabase};
use crate::client::{Collection, DeleteOptions};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::value::Attr;

/// The engines the platform can run as a standalone database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseEngine {
    /// PostgreSQL
    Postgresql,
    /// MySQL
    Mysql,
    /// MariaDB
    Mariadb,
    /// MongoDB
    Mongodb,
    /// Redis
    Redis,
    /// KeyDB
    Keydb,
    /// Dragonfly
    Dragonfly,
    /// ClickHouse
    Clickhouse,
}

impl DatabaseEngine {
    /// Every engine, in registration order.
    pub const ALL: [DatabaseEngine; 8] = [
        Self::Postgresql,
        Self::Mysql,
        Self::Mariadb,
        Self::Mongodb,
        Self::Redis,
        Self::Keydb,
        Self::Dragonfly,
        Self::Clickhouse,
    ];

    /// Path segment of the create call, `POST /databases/{path}`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Mariadb => "mariadb",
            Self::Mongodb => "mongodb",
            Self::Redis => "redis",
            Self::Keydb => "keydb",
            Self::Dragonfly => "dragonfly",
            Self::Clickhouse => "clickhouse",
        }
    }

    /// The `database_type` value the platform reports in reads.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Postgresql => "standalone-postgresql",
            Self::Mysql => "standalone-mysql",
            Self::Mariadb => "standalone-mariadb",
            Self::Mongodb => "standalone-mongodb",
            Self::Redis => "standalone-redis",
            Self::Keydb => "standalone-keydb",
            Self::Dragonfly => "standalone-dragonfly",
            Self::Clickhouse => "standalone-clickhouse",
        }
    }

    /// Host-visible resource type name.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Postgresql => "coolify_postgresql_database",
            Self::Mysql => "coolify_mysql_database",
            Self::Mariadb => "coolify_mariadb_database",
            Self::Mongodb => "coolify_mongodb_database",
            Self::Redis => "coolify_redis_database",
            Self::Keydb => "coolify_keydb_database",
            Self::Dragonfly => "coolify_dragonfly_database",
            Self::Clickhouse => "coolify_clickhouse_database",
        }
    }

    /// Label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Postgresql => "PostgreSQL database",
            Self::Mysql => "MySQL database",
            Self::Mariadb => "MariaDB database",
            Self::Mongodb => "MongoDB database",
            Self::Redis => "Redis database",
            Self::Keydb => "KeyDB database",
            Self::Dragonfly => "Dragonfly database",
            Self::Clickhouse => "ClickHouse database",
        }
    }

    /// Resolve a reported `database_type`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|engine| engine.tag() == tag)
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Engine-specific half of a database kind.
pub trait Engine: Send + Sync + 'static {
    /// Which engine this is.
    const KIND: DatabaseEngine;
    /// Engine attributes hidden from host output.
    const SENSITIVE: &'static [&'static str] = &[];

    /// Local engine attributes.
    type Fields: Serialize + DeserializeOwned + Clone + Default + PartialEq + fmt::Debug + Send + Sync;
    /// Engine fields on the wire, used for reads and for request bodies.
    type Wire: Serialize + DeserializeOwned + Default + Send;

    /// Engine attribute declarations.
    fn schema() -> Schema;

    /// Map the engine half of a read; `prior` is the recorded engine half.
    fn from_wire(wire: Self::Wire, prior: &Self::Fields) -> Self::Fields;

    /// Build the engine half of a create or update body.
    fn to_wire(fields: &Self::Fields) -> Self::Wire;

    /// The attributes the connection URL is derived from.
    fn credentials(fields: &Self::Fields) -> Vec<&Attr<String>>;
}

/// A database read: the shared fields plus the engine's.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseRecord<W> {
    #[serde(flatten)]
    common: Database,
    #[serde(flatten)]
    engine: W,
}

/// Local record of a database of engine `F`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseModel<F> {
    pub uuid: Attr<String>,
    pub server_uuid: Attr<String>,
    pub project_uuid: Attr<String>,
    pub environment_name: Attr<String>,
    pub environment_uuid: Attr<String>,
    pub destination_uuid: Attr<String>,
    pub instant_deploy: Attr<bool>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub image: Attr<String>,
    pub is_public: Attr<bool>,
    pub public_port: Attr<i64>,
    #[serde(flatten)]
    pub limits: LimitsModel,
    /// Derived by the platform from the credentials.
    pub internal_db_url: Attr<String>,
    #[serde(flatten)]
    pub engine: F,
}

impl<F> DatabaseModel<F> {
    fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            name: self.name.to_wire(),
            description: self.description.to_wire(),
            image: self.image.to_wire(),
            is_public: self.is_public.to_wire(),
            public_port: self.public_port.to_wire(),
            limits: self.limits.to_wire(),
        }
    }
}

/// The database kind for engine `E`.
pub struct DatabaseResource<E>(PhantomData<fn() -> E>);

impl<E: Engine> Resource for DatabaseResource<E> {
    type Model = DatabaseModel<E::Fields>;
    type Wire = DatabaseRecord<E::Wire>;

    const TYPE_NAME: &'static str = E::KIND.type_name();
    const LABEL: &'static str = E::KIND.label();
    const COLLECTION: Collection = Collection::Databases;
    const IMPORT: ImportFormat = ImportFormat::Scoped("database");
    const NOT_ECHOED: &'static [&'static str] = &[
        "server_uuid",
        "project_uuid",
        "environment_name",
        "environment_uuid",
        "destination_uuid",
        "instant_deploy",
    ];
    const SENSITIVE: &'static [&'static str] = &["internal_db_url"];
    const DELETE_OPTIONS: Option<DeleteOptions> = Some(DeleteOptions::CLEANUP);

    fn base_schema() -> Schema {
        scope_schema()
            .merged_with(limits_schema())
            .merged_with(E::schema())
            .with_attribute("uuid", Attribute::computed_string().with_description("UUID of the database."))
            .with_attribute(
                "environment_uuid",
                Attribute::required_string()
                    .with_description("UUID of the environment.")
                    .with_force_new(),
            )
            .with_attribute(
                "instant_deploy",
                Attribute::optional_computed_bool()
                    .with_description("Instant deploy the database.")
                    .with_default(Value::Bool(false)),
            )
            .with_attribute("name", Attribute::optional_computed_string().with_description("Name of the database."))
            .with_attribute(
                "description",
                Attribute::optional_computed_string().with_description("Description of the database."),
            )
            .with_attribute("image", Attribute::optional_computed_string().with_description("Docker image."))
            .with_attribute(
                "is_public",
                Attribute::optional_computed_bool().with_description("Whether the database is publicly reachable."),
            )
            .with_attribute(
                "public_port",
                Attribute::optional_computed_int64().with_description("Public port of the database."),
            )
            .with_attribute(
                "internal_db_url",
                Attribute::computed_string().with_description("Internal URL of the database."),
            )
    }

    fn schema() -> Schema {
        Self::base_schema()
            .mark_sensitive(Self::SENSITIVE)
            .mark_sensitive(E::SENSITIVE)
    }

    fn uuid(model: &Self::Model) -> &Attr<String> {
        &model.uuid
    }

    fn to_api_create(plan: &Self::Model) -> Result<CreateRequest, ProviderError> {
        let body = CreateDatabase {
            scope: DatabaseScope {
                server_uuid: plan.server_uuid.required_scalar(),
                project_uuid: plan.project_uuid.required_scalar(),
                environment_name: plan.environment_name.required_scalar(),
                environment_uuid: plan.environment_uuid.to_wire_omit_empty(),
                destination_uuid: plan.destination_uuid.to_wire_omit_empty(),
                instant_deploy: plan.instant_deploy.to_wire(),
            },
            settings: plan.settings(),
            engine: E::to_wire(&plan.engine),
        };
        CreateRequest::new(Some(E::KIND.path()), &body)
    }

    fn to_api_update(plan: &Self::Model, _uuid: &str) -> Result<Value, ProviderError> {
        Ok(serde_json::to_value(UpdateDatabase {
            settings: plan.settings(),
            engine: E::to_wire(&plan.engine),
        })?)
    }

    fn from_api(wire: Self::Wire, prior: &Self::Model) -> Result<Self::Model, ProviderError> {
        let DatabaseRecord { common, engine } = wire;
        if let Some(tag) = common.database_type.as_deref() {
            if tag != E::KIND.tag() {
                return Err(ProviderError::Conversion(format!(
                    "expected a {} but the platform reports database_type {:?}",
                    E::KIND.tag(),
                    tag
                )));
            }
        }
        Ok(DatabaseModel {
            uuid: Attr::from_wire(common.uuid),
            name: Attr::from_wire(common.name),
            description: Attr::from_wire(common.description),
            image: Attr::from_wire(common.image),
            is_public: Attr::from_wire(common.is_public),
            public_port: Attr::from_wire(common.public_port),
            limits: LimitsModel::from_wire(common.limits),
            internal_db_url: Attr::from_wire(common.internal_db_url),
            engine: E::from_wire(engine, &prior.engine),
            ..Default::default()
        })
    }

    fn instant_deploy(model: &Self::Model) -> bool {
        model.instant_deploy.get().copied().unwrap_or(false)
    }

    fn modify_plan(plan: &mut Self::Model, prior: &Self::Model) {
        if E::credentials(&plan.engine) != E::credentials(&prior.engine) {
            debug!(resource_type = Self::TYPE_NAME, "Credentials changed, connection URL will be recomputed");
            plan.internal_db_url = Attr::Unknown;
        }
    }
}

/// Handlers for every engine.
pub fn handlers() -> Vec<Box<dyn ResourceHandler>> {
    vec![
        handler::<DatabaseResource<Postgresql>>(),
        handler::<DatabaseResource<Mysql>>(),
        handler::<DatabaseResource<Mariadb>>(),
        handler::<DatabaseResource<Mongodb>>(),
        handler::<DatabaseResource<Redis>>(),
        handler::<DatabaseResource<Keydb>>(),
        handler::<DatabaseResource<Dragonfly>>(),
        handler::<DatabaseResource<Clickhouse>>(),
    ]
}
