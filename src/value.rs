//! Three-state attribute values.
//!
//! Every attribute of a resource record is either known, explicitly null, or
//! not yet known (the remote system will decide). [`Attr`] models that, and
//! this module provides the conversions to and from the optional scalars used
//! on the wire.
//!
//! # JSON encoding
//!
//! Records travel between the host and the provider as JSON objects. A null
//! attribute is `null` (or an absent key) and an unknown attribute is the
//! sentinel string [`UNKNOWN_SENTINEL`].
//!
//! ```
//! use coolify_provider::value::{Attr, UNKNOWN_SENTINEL};
//!
//! let name: Attr<String> = Attr::value("db".to_string());
//! assert_eq!(name.to_wire(), Some("db".to_string()));
//!
//! let unknown: Attr<String> = serde_json::from_value(serde_json::json!(UNKNOWN_SENTINEL)).unwrap();
//! assert!(unknown.is_unknown());
//! assert_eq!(unknown.to_wire(), None);
//! ```

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};

/// JSON stand-in for a value that is not known until apply.
pub const UNKNOWN_SENTINEL: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// A configuration/state value that may be known, null or unknown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Attr<T> {
    /// Explicitly absent.
    #[default]
    Null,
    /// Not yet known; the remote system decides.
    Unknown,
    /// A concrete value.
    Value(T),
}

impl<T> Attr<T> {
    /// Wrap a known value.
    pub fn value(v: T) -> Self {
        Self::Value(v)
    }

    /// An explicitly null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// A value to be computed remotely.
    pub fn unknown() -> Self {
        Self::Unknown
    }

    /// Lift a wire optional: absent becomes null.
    pub fn from_wire(v: Option<T>) -> Self {
        match v {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// Whether the value is explicitly null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is unknown.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Whether a concrete value is present.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the concrete value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Three-way merge of an Optional+Computed attribute.
    ///
    /// The explicit config value wins; otherwise the prior known value is
    /// kept; otherwise the result is unknown so the remote system can default
    /// it.
    pub fn merge(config: &Attr<T>, prior: Option<&Attr<T>>) -> Attr<T>
    where
        T: Clone,
    {
        if let Attr::Value(v) = config {
            return Attr::Value(v.clone());
        }
        match prior {
            Some(Attr::Value(v)) => Attr::Value(v.clone()),
            _ => Attr::Unknown,
        }
    }
}

impl<T: Clone> Attr<T> {
    /// Wire optional: absent if null or unknown, else the scalar.
    pub fn to_wire(&self) -> Option<T> {
        self.get().cloned()
    }
}

impl<T: Clone + Default> Attr<T> {
    /// The scalar, or its zero value when null or unknown.
    ///
    /// Only for fields whose presence the caller contract already guarantees.
    pub fn required_scalar(&self) -> T {
        self.get().cloned().unwrap_or_default()
    }
}

impl Attr<String> {
    /// Like [`Attr::to_wire`], but an empty string is also absent.
    pub fn to_wire_omit_empty(&self) -> Option<String> {
        match self {
            Attr::Value(v) if !v.is_empty() => Some(v.clone()),
            _ => None,
        }
    }

    /// Whether the value is null, unknown, or the empty string.
    pub fn is_blank(&self) -> bool {
        self.get().map_or(true, |s| s.is_empty())
    }

    /// Borrow the string, or `""` when null or unknown.
    pub fn as_str(&self) -> &str {
        self.get().map_or("", String::as_str)
    }
}

impl<T> From<T> for Attr<T> {
    fn from(v: T) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for Attr<String> {
    fn from(v: &str) -> Self {
        Self::Value(v.to_string())
    }
}

impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Null => serializer.serialize_none(),
            Attr::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
            Attr::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw {
            serde_json::Value::Null => Ok(Attr::Null),
            serde_json::Value::String(ref s) if s == UNKNOWN_SENTINEL => Ok(Attr::Unknown),
            other => T::deserialize(other).map(Attr::Value).map_err(D::Error::custom),
        }
    }
}

/// Whether a JSON value is the unknown sentinel.
pub fn is_unknown_json(value: &serde_json::Value) -> bool {
    value.as_str() == Some(UNKNOWN_SENTINEL)
}

/// The JSON form of an unknown value.
pub fn unknown_json() -> serde_json::Value {
    serde_json::Value::String(UNKNOWN_SENTINEL.to_string())
}

/// Three-way merge on JSON attribute values, used by the generic planner.
pub fn merge_json(
    config: Option<&serde_json::Value>,
    prior: Option<&serde_json::Value>,
) -> serde_json::Value {
    let present = |v: Option<&serde_json::Value>| {
        v.filter(|v| !v.is_null() && !is_unknown_json(v)).cloned()
    };
    present(config)
        .or_else(|| present(prior))
        .unwrap_or_else(unknown_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_wire_helpers() {
        let v: Attr<String> = Attr::value("abc".into());
        assert_eq!(v.to_wire(), Some("abc".to_string()));
        assert_eq!(Attr::<String>::Null.to_wire(), None);
        assert_eq!(Attr::<String>::Unknown.to_wire(), None);

        assert_eq!(Attr::<String>::from("").to_wire(), Some(String::new()));
        assert_eq!(Attr::<String>::from("").to_wire_omit_empty(), None);
        assert_eq!(Attr::<String>::from("x").to_wire_omit_empty(), Some("x".to_string()));
        assert_eq!(Attr::<String>::Unknown.to_wire_omit_empty(), None);
    }

    #[test]
    fn test_required_scalar_zero_values() {
        assert_eq!(Attr::<String>::Null.required_scalar(), "");
        assert_eq!(Attr::<i64>::Unknown.required_scalar(), 0);
        assert!(!Attr::<bool>::Null.required_scalar());
        assert_eq!(Attr::value(42i64).required_scalar(), 42);
    }

    #[test]
    fn test_from_wire() {
        assert_eq!(Attr::from_wire(Some(3i64)), Attr::Value(3));
        assert_eq!(Attr::<i64>::from_wire(None), Attr::Null);
    }

    #[test]
    fn test_json_encoding() {
        assert_eq!(serde_json::to_value(Attr::<i64>::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(Attr::<i64>::Unknown).unwrap(),
            json!(UNKNOWN_SENTINEL)
        );
        assert_eq!(serde_json::to_value(Attr::value(true)).unwrap(), json!(true));

        let unknown: Attr<bool> = serde_json::from_value(json!(UNKNOWN_SENTINEL)).unwrap();
        assert!(unknown.is_unknown());
        let null: Attr<bool> = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_null());
        let port: Attr<i64> = serde_json::from_value(json!(5432)).unwrap();
        assert_eq!(port, Attr::Value(5432));
    }

    #[test]
    fn test_json_type_mismatch_is_error() {
        let res: Result<Attr<i64>, _> = serde_json::from_value(json!("not a number"));
        assert!(res.is_err());
    }

    #[test]
    fn test_merge_json() {
        assert_eq!(merge_json(Some(&json!("a")), Some(&json!("b"))), json!("a"));
        assert_eq!(merge_json(None, Some(&json!("b"))), json!("b"));
        assert_eq!(merge_json(Some(&json!(null)), Some(&json!(7))), json!(7));
        assert_eq!(merge_json(None, None), unknown_json());
        assert_eq!(merge_json(None, Some(&unknown_json())), unknown_json());
    }

    fn arb_attr() -> impl Strategy<Value = Attr<i64>> {
        prop_oneof![
            Just(Attr::Null),
            Just(Attr::Unknown),
            any::<i64>().prop_map(Attr::Value),
        ]
    }

    proptest! {
        #[test]
        fn merge_prefers_config_value(v in any::<i64>(), prior in proptest::option::of(arb_attr())) {
            let merged = Attr::merge(&Attr::Value(v), prior.as_ref());
            prop_assert_eq!(merged, Attr::Value(v));
        }

        #[test]
        fn merge_without_prior_is_unknown(config in prop_oneof![Just(Attr::<i64>::Null), Just(Attr::Unknown)]) {
            prop_assert_eq!(Attr::merge(&config, None), Attr::Unknown);
        }

        #[test]
        fn merge_keeps_prior_when_config_absent(p in any::<i64>()) {
            let merged = Attr::merge(&Attr::Null, Some(&Attr::Value(p)));
            prop_assert_eq!(merged, Attr::Value(p));
        }
    }
}
