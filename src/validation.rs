//! Configuration validation.
//!
//! Two layers:
//!
//! - [`validate`] checks a JSON record against a [`Schema`]: presence of
//!   required attributes, attribute types, and `filter` block shapes.
//! - [`require_for`] checks the discriminant-scoped rules of polymorphic
//!   kinds, such as "`dockerfile` is required for source_type dockerfile".
//!
//! Unknown values (the [`UNKNOWN_SENTINEL`](crate::value::UNKNOWN_SENTINEL))
//! are accepted everywhere: they are resolved later in the lifecycle.
//!
//! # Example
//!
//! ```
//! use coolify_provider::schema::{Attribute, Schema};
//! use coolify_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("name", Attribute::required_string())
//!     .with_attribute("public_port", Attribute::optional_int64());
//!
//! assert!(validate(&schema, &json!({"name": "cache", "public_port": 6379})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"name": "cache", "public_port": "6379"}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("public_port".to_string()));
//! ```

use crate::error::ProviderError;
use crate::schema::{Attribute, AttributeType, Block, Diagnostic, NestedBlock, Schema};
use crate::value::{is_unknown_json, Attr};
use serde_json::Value;

/// Check a JSON record against `schema`. An empty result means valid.
///
/// Computed-only attributes are not checked. A required attribute may be
/// unknown but not null. `filter` elements are checked recursively.
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut walk = Walk::default();
    walk.block(&schema.block, value, "");
    walk.diagnostics
}

/// [`validate`], as a `Result`.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    match validate(schema, value) {
        diagnostics if diagnostics.is_empty() => Ok(()),
        diagnostics => Err(diagnostics),
    }
}

/// `true` when [`validate`] finds nothing.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

/// Require a string attribute for one value of a discriminant.
///
/// Null, unknown and empty values all count as missing.
pub fn require_for(
    field: &str,
    value: &Attr<String>,
    discriminant: &str,
    variant: &str,
) -> Result<(), ProviderError> {
    if value.is_blank() {
        return Err(ProviderError::validation(
            field,
            "Missing required field",
            format!("{} is required for {} {}", field, discriminant, variant),
        ));
    }
    Ok(())
}

/// Run several [`require_for`] checks and collect every failure as a diagnostic.
pub fn collect_missing<'a, I>(checks: I, discriminant: &str, variant: &str) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = (&'a str, &'a Attr<String>)>,
{
    checks
        .into_iter()
        .filter_map(|(field, value)| require_for(field, value, discriminant, variant).err())
        .map(|err| err.to_diagnostic())
        .collect()
}

#[derive(Default)]
struct Walk {
    diagnostics: Vec<Diagnostic>,
}

impl Walk {
    fn block(&mut self, block: &Block, value: &Value, path: &str) {
        if value.is_null() || is_unknown_json(value) {
            return;
        }
        let Some(fields) = value.as_object() else {
            let diagnostic = Diagnostic::error("Expected object")
                .with_detail(format!("Got {}", kind_of(value)));
            self.diagnostics.push(if path.is_empty() {
                diagnostic
            } else {
                diagnostic.with_attribute(path)
            });
            return;
        };

        for (name, attr) in &block.attributes {
            self.attribute(attr, fields.get(name), &child(path, name));
        }
        for (name, nested) in &block.blocks {
            self.nested(nested, fields.get(name), &child(path, name));
        }
    }

    fn attribute(&mut self, attr: &Attribute, value: Option<&Value>, path: &str) {
        if attr.is_computed_only() {
            return;
        }
        match value.filter(|v| !v.is_null()) {
            None if attr.flags.required => self.diagnostics.push(
                Diagnostic::error(format!("Missing required attribute '{}'", path))
                    .with_detail("This attribute must be set")
                    .with_attribute(path),
            ),
            None => {},
            Some(v) => self.typed(&attr.attr_type, v, path),
        }
    }

    fn typed(&mut self, attr_type: &AttributeType, value: &Value, path: &str) {
        if is_unknown_json(value) {
            return;
        }
        let expected = match (attr_type, value) {
            (AttributeType::String, Value::String(_)) | (AttributeType::Bool, Value::Bool(_)) => return,
            (AttributeType::Int64, v) if is_int64(v) => return,
            (AttributeType::List(element), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.typed(element, item, &format!("{}.{}", path, i));
                }
                return;
            },
            (AttributeType::Object(fields), Value::Object(members)) => {
                // object members carry no presence flags; null is always fine
                for (name, field_type) in fields {
                    if let Some(member) = members.get(name).filter(|m| !m.is_null()) {
                        self.typed(field_type, member, &child(path, name));
                    }
                }
                return;
            },
            (AttributeType::String, _) => "string",
            (AttributeType::Int64, _) => "int64",
            (AttributeType::Bool, _) => "bool",
            (AttributeType::List(_), _) => "list",
            (AttributeType::Object(_), _) => "object",
        };
        self.diagnostics.push(
            Diagnostic::error(format!("Invalid type for attribute '{}'", path))
                .with_detail(format!("Expected {}, got {}", expected, kind_of(value)))
                .with_attribute(path),
        );
    }

    fn nested(&mut self, nested: &NestedBlock, value: Option<&Value>, path: &str) {
        match value {
            None | Some(Value::Null) => {},
            Some(v) if is_unknown_json(v) => {},
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.block(&nested.block, item, &format!("{}.{}", path, i));
                }
            },
            Some(v) => self.diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", kind_of(v)))
                    .with_attribute(path),
            ),
        }
    }
}

fn child(path: &str, name: &str) -> String {
    match path {
        "" => name.to_string(),
        _ => format!("{}.{}", path, name),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whole numbers only; `6379.0` passes, `6379.5` does not.
fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64()
                || n.as_f64()
                    .is_some_and(|f| f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_block;
    use crate::schema::{AttributeFlags, NestedBlock};
    use crate::value::UNKNOWN_SENTINEL;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("project_uuid", Attribute::required_string());

        assert!(validate(&schema, &json!({"project_uuid": "p1"})).is_empty());

        let diagnostics = validate(&schema, &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("project_uuid".to_string()));

        assert_eq!(validate(&schema, &json!({"project_uuid": null})).len(), 1);

        let diagnostics = validate(&schema, &json!({"project_uuid": 123}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
    }

    #[test]
    fn test_unknown_values_are_accepted() {
        let schema = Schema::v0()
            .with_attribute("server_uuid", Attribute::required_string())
            .with_attribute("public_port", Attribute::optional_int64())
            .with_attribute("is_public", Attribute::optional_bool());

        let record = json!({
            "server_uuid": UNKNOWN_SENTINEL,
            "public_port": UNKNOWN_SENTINEL,
            "is_public": UNKNOWN_SENTINEL,
        });
        assert!(validate(&schema, &record).is_empty());
    }

    #[test]
    fn test_validate_computed_attribute_skipped() {
        let schema = Schema::v0().with_attribute("internal_db_url", Attribute::computed_string());

        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"internal_db_url": 123})).is_empty());
    }

    #[test]
    fn test_validate_int64() {
        let schema = Schema::v0().with_attribute("port", Attribute::required_int64());

        assert!(validate(&schema, &json!({"port": 22})).is_empty());
        assert!(validate(&schema, &json!({"port": 22.0})).is_empty());
        assert_eq!(validate(&schema, &json!({"port": 22.5})).len(), 1);
        assert_eq!(validate(&schema, &json!({"port": "22"})).len(), 1);
    }

    #[test]
    fn test_validate_bool() {
        let schema = Schema::v0().with_attribute("instant_validate", Attribute::required_bool());

        assert!(validate(&schema, &json!({"instant_validate": true})).is_empty());
        assert_eq!(validate(&schema, &json!({"instant_validate": "true"})).len(), 1);
    }

    #[test]
    fn test_validate_list() {
        let schema = Schema::v0().with_attribute(
            "values",
            Attribute::new(
                AttributeType::list(AttributeType::String),
                AttributeFlags::required(),
            ),
        );

        assert!(validate(&schema, &json!({"values": ["a", "b"]})).is_empty());
        assert!(validate(&schema, &json!({"values": []})).is_empty());

        let diagnostics = validate(&schema, &json!({"values": ["a", 1]}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("values.1".to_string()));

        assert_eq!(validate(&schema, &json!({"values": "a"})).len(), 1);
    }

    #[test]
    fn test_validate_object_type() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), AttributeType::String);
        fields.insert("project_id".to_string(), AttributeType::Int64);

        let schema = Schema::v0().with_attribute(
            "environments",
            Attribute::new(
                AttributeType::list(AttributeType::Object(fields)),
                AttributeFlags::optional(),
            ),
        );

        assert!(validate(
            &schema,
            &json!({"environments": [{"name": "production", "project_id": 1}]})
        )
        .is_empty());

        let diagnostics = validate(
            &schema,
            &json!({"environments": [{"name": "production", "project_id": "1"}]}),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].attribute,
            Some("environments.0.project_id".to_string())
        );
    }

    #[test]
    fn test_validate_filter_block() {
        let schema = Schema::v0().with_block("filter", filter_block(&["name", "uuid"]));

        assert!(validate(
            &schema,
            &json!({"filter": [{"name": "name", "values": ["web"]}]})
        )
        .is_empty());
        assert!(validate(&schema, &json!({})).is_empty());

        let diagnostics = validate(&schema, &json!({"filter": [{"values": ["web"]}]}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("filter.0.name".to_string()));

        let diagnostics = validate(&schema, &json!({"filter": {"name": "name"}}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected list"));
    }

    #[test]
    fn test_require_for() {
        let missing = Attr::<String>::Null;
        let err = require_for("docker_registry_image_name", &missing, "source_type", "dockerimage")
            .unwrap_err();
        match err {
            ProviderError::Validation {
                attribute,
                summary,
                detail,
            } => {
                assert_eq!(attribute, "docker_registry_image_name");
                assert_eq!(summary, "Missing required field");
                assert_eq!(
                    detail,
                    "docker_registry_image_name is required for source_type dockerimage"
                );
            },
            other => panic!("unexpected error: {other}"),
        }

        let empty = Attr::<String>::from("");
        assert!(require_for("dockerfile", &empty, "source_type", "dockerfile").is_err());

        let present = Attr::<String>::from("nginx");
        assert!(require_for("docker_registry_image_name", &present, "source_type", "dockerimage").is_ok());
    }

    #[test]
    fn test_collect_missing() {
        let repo = Attr::<String>::from("https://github.com/coollabsio/coolify-examples");
        let branch = Attr::<String>::Null;
        let ports = Attr::<String>::from("");

        let diagnostics = collect_missing(
            [
                ("git_repository", &repo),
                ("git_branch", &branch),
                ("ports_exposes", &ports),
            ],
            "source_type",
            "public",
        );
        let attrs: Vec<_> = diagnostics.iter().filter_map(|d| d.attribute.as_deref()).collect();
        assert_eq!(attrs, vec!["git_branch", "ports_exposes"]);
    }

    #[test]
    fn test_is_valid_and_result_helpers() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(is_valid(&schema, &json!({"name": "web"})));
        assert!(!is_valid(&schema, &json!({})));
        assert!(validate_result(&schema, &json!({"name": "web"})).is_ok());
        assert_eq!(validate_result(&schema, &json!({})).unwrap_err().len(), 1);
    }

    #[test]
    fn test_validate_root_not_object() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        let diagnostics = validate(&schema, &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected object"));
    }
}
