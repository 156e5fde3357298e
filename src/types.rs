//! Plan, import and metadata types exchanged with the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// One top-level attribute whose planned value differs from prior state.
///
/// `before` is `None` on create, `after` is `None` on destroy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// Attribute name, e.g. `internal_db_url`.
    pub path: String,
    /// Prior value.
    pub before: Option<Value>,
    /// Planned value.
    pub after: Option<Value>,
}

impl AttributeChange {
    /// Appears in the plan but not in prior state.
    pub fn added(path: impl Into<String>, after: Value) -> Self {
        Self { path: path.into(), before: None, after: Some(after) }
    }

    /// Present in prior state, gone from the plan.
    pub fn removed(path: impl Into<String>, before: Value) -> Self {
        Self { path: path.into(), before: Some(before), after: None }
    }

    /// Present on both sides with different values.
    pub fn modified(path: impl Into<String>, before: Value, after: Value) -> Self {
        Self { path: path.into(), before: Some(before), after: Some(after) }
    }
}

/// What `plan` hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// The record the apply step will receive; JSON `null` for a destroy.
    pub planned_state: Value,
    /// Every attribute that differs from prior state.
    pub changes: Vec<AttributeChange>,
    /// A force-new attribute changed.
    pub requires_replace: bool,
}

impl PlanResult {
    /// Assemble a plan.
    pub fn with_changes(planned_state: Value, changes: Vec<AttributeChange>, requires_replace: bool) -> Self {
        Self { planned_state, changes, requires_replace }
    }
}

/// Seed record produced by an import; the host reads it back afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedResource {
    /// Resource type name.
    pub resource_type: String,
    /// Seed attributes, at least `uuid`.
    pub state: Value,
}

impl ImportedResource {
    /// Wrap a seed record.
    pub fn new(resource_type: impl Into<String>, state: Value) -> Self {
        Self { resource_type: resource_type.into(), state }
    }
}

/// Type names and capability flags the host reads before planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// Resource type names, sorted.
    pub resources: Vec<String>,
    /// Data source type names, sorted.
    pub data_sources: Vec<String>,
    /// Optional host protocol features.
    pub capabilities: Capabilities,
}

/// Capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Capabilities {
    /// `plan` accepts a null proposal and returns a destroy plan.
    pub plan_destroy: bool,
}

/// Expected shape of an environment-scoped import id.
fn scoped_format(resource: &str) -> String {
    format!(
        "<server_uuid>/<project_uuid>/<environment_name>/<{}_uuid>",
        resource
    )
}

/// A parsed import identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportId {
    /// A top-level resource addressed by its uuid alone.
    Bare {
        /// The resource uuid.
        uuid: String,
    },
    /// A resource living inside a project environment.
    Scoped {
        /// UUID of the server the resource runs on.
        server_uuid: String,
        /// UUID of the owning project.
        project_uuid: String,
        /// Name of the project environment.
        environment_name: String,
        /// The resource uuid.
        uuid: String,
    },
}

impl ImportId {
    /// Parse `<server_uuid>/<project_uuid>/<environment_name>/<uuid>`.
    ///
    /// `resource` names the kind in the error message, e.g. `database`.
    pub fn parse_scoped(id: &str, resource: &str) -> Result<Self, ProviderError> {
        let parts: Vec<&str> = id.split('/').collect();
        match parts.as_slice() {
            [server, project, env, uuid]
                if [server, project, env, uuid].iter().all(|p| !p.is_empty()) =>
            {
                Ok(Self::Scoped {
                    server_uuid: server.to_string(),
                    project_uuid: project.to_string(),
                    environment_name: env.to_string(),
                    uuid: uuid.to_string(),
                })
            },
            _ => Err(ProviderError::InvalidRequest(format!(
                "Invalid import ID. Import ID should be in the format: {}",
                scoped_format(resource)
            ))),
        }
    }

    /// Parse a bare `<uuid>`.
    pub fn parse_bare(id: &str) -> Result<Self, ProviderError> {
        if id.is_empty() || id.contains('/') {
            return Err(ProviderError::InvalidRequest(
                "Invalid import ID. Import ID should be in the format: <uuid>".to_string(),
            ));
        }
        Ok(Self::Bare {
            uuid: id.to_string(),
        })
    }

    /// The resource uuid.
    pub fn uuid(&self) -> &str {
        match self {
            Self::Bare { uuid } | Self::Scoped { uuid, .. } => uuid,
        }
    }

    /// Seed attributes for a fresh record, as a JSON object.
    pub fn seed(&self) -> Value {
        match self {
            Self::Bare { uuid } => serde_json::json!({ "uuid": uuid }),
            Self::Scoped {
                server_uuid,
                project_uuid,
                environment_name,
                uuid,
            } => serde_json::json!({
                "server_uuid": server_uuid,
                "project_uuid": project_uuid,
                "environment_name": environment_name,
                "uuid": uuid,
            }),
        }
    }
}

impl std::fmt::Display for ImportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bare { uuid } => write!(f, "{}", uuid),
            Self::Scoped {
                server_uuid,
                project_uuid,
                environment_name,
                uuid,
            } => write!(
                f,
                "{}/{}/{}/{}",
                server_uuid, project_uuid, environment_name, uuid
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_sides() {
        let created = AttributeChange::added("uuid", json!("prj-1"));
        let destroyed = AttributeChange::removed("name", json!("web"));
        let edited = AttributeChange::modified("redis_password", json!("a"), json!("b"));

        assert_eq!((created.before, created.after), (None, Some(json!("prj-1"))));
        assert_eq!((destroyed.before, destroyed.after), (Some(json!("web")), None));
        assert_eq!(edited.path, "redis_password");
        assert!(edited.before.is_some() && edited.after.is_some());
    }

    #[test]
    fn test_destroy_plan_serializes_null_state() {
        let plan = PlanResult::with_changes(Value::Null, vec![AttributeChange::removed("name", json!("web"))], false);
        let encoded = serde_json::to_value(&plan).unwrap();
        assert_eq!(encoded["planned_state"], Value::Null);
        assert_eq!(encoded["changes"][0]["before"], "web");
        assert_eq!(encoded["changes"][0]["after"], Value::Null);
    }

    #[test]
    fn test_import_id_scoped() {
        let id = ImportId::parse_scoped("srv/prj/production/db", "database").unwrap();
        assert_eq!(id.uuid(), "db");
        assert_eq!(id.to_string(), "srv/prj/production/db");
        let seed = id.seed();
        assert_eq!(seed["server_uuid"], "srv");
        assert_eq!(seed["project_uuid"], "prj");
        assert_eq!(seed["environment_name"], "production");
        assert_eq!(seed["uuid"], "db");
    }

    #[test]
    fn test_import_id_wrong_segment_count() {
        for bad in ["db", "a/b/c", "a/b/c/d/e", "a//c/d", ""] {
            let err = ImportId::parse_scoped(bad, "database").unwrap_err();
            assert_eq!(
                err.message(),
                "Invalid import ID. Import ID should be in the format: \
                 <server_uuid>/<project_uuid>/<environment_name>/<database_uuid>"
            );
        }
    }

    #[test]
    fn test_import_id_bare() {
        let id = ImportId::parse_bare("k-123").unwrap();
        assert_eq!(id, ImportId::Bare { uuid: "k-123".into() });
        assert_eq!(id.seed(), json!({"uuid": "k-123"}));
        assert!(ImportId::parse_bare("a/b").is_err());
        assert!(ImportId::parse_bare("").is_err());
    }
}
