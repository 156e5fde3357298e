//! Schema types for describing provider and resource structure.
//!
//! Schemas describe the shape of provider configuration, resources, and data sources.
//! Besides documentation, they drive the generic planner: which attributes are
//! computed, which force replacement, and which take a default when left out
//! of configuration.
//!
//! Sensitivity is not set at each attribute's construction site. Each resource
//! kind declares it as a name list and applies it with [`Schema::mark_sensitive`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 text.
    String,
    /// Signed 64-bit integer.
    Int64,
    /// `true` or `false`.
    Bool,
    /// Homogeneous list.
    List(Box<AttributeType>),
    /// Fixed set of named fields, e.g. a project environment.
    Object(HashMap<String, AttributeType>),
}

impl AttributeType {
    /// `List` of `element`.
    pub fn list(element: AttributeType) -> Self {
        Self::List(Box::new(element))
    }

    /// `Object` with the given fields.
    pub fn object(fields: HashMap<String, AttributeType>) -> Self {
        Self::Object(fields)
    }
}

/// Who sets an attribute, and whether the host may show it.
///
/// Optional plus computed means the server fills the value in when the
/// configuration leaves it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// Config must set it.
    pub required: bool,
    /// Config may set it.
    pub optional: bool,
    /// The remote side may set it.
    pub computed: bool,
    /// Hidden in plan output and logs.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Must be configured.
    pub fn required() -> Self {
        Self { required: true, ..Self::default() }
    }

    /// May be configured; absent means nothing is sent.
    pub fn optional() -> Self {
        Self { optional: true, ..Self::default() }
    }

    /// Read-only, always set by the remote side.
    pub fn computed() -> Self {
        Self { computed: true, ..Self::default() }
    }

    /// May be configured, otherwise defaulted remotely.
    pub fn optional_computed() -> Self {
        Self { optional: true, computed: true, ..Self::default() }
    }

    /// Same flags, marked sensitive.
    pub fn sensitive(self) -> Self {
        Self { sensitive: true, ..self }
    }
}

/// One attribute of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Value type.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Usage flags.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Shown in generated docs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A change to this attribute replaces the resource.
    #[serde(default)]
    pub force_new: bool,
    /// Value planned when the configuration leaves the attribute out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

macro_rules! typed_constructors {
    ($($name:ident => $ty:ident, $flags:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($ty), "` attribute, `", stringify!($flags), "`.")]
            pub fn $name() -> Self {
                Self::new(AttributeType::$ty, AttributeFlags::$flags())
            }
        )*
    };
}

impl Attribute {
    /// Attribute of any type.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            force_new: false,
            default: None,
        }
    }

    typed_constructors! {
        required_string => String, required;
        optional_string => String, optional;
        computed_string => String, computed;
        optional_computed_string => String, optional_computed;
        required_int64 => Int64, required;
        optional_int64 => Int64, optional;
        computed_int64 => Int64, computed;
        optional_computed_int64 => Int64, optional_computed;
        required_bool => Bool, required;
        optional_bool => Bool, optional;
        computed_bool => Bool, computed;
        optional_computed_bool => Bool, optional_computed;
    }

    /// Computed attribute of any type, used for lists and objects.
    pub fn computed(attr_type: AttributeType) -> Self {
        Self::new(attr_type, AttributeFlags::computed())
    }

    /// Read-only: computed and never configurable.
    pub fn is_computed_only(&self) -> bool {
        self.flags.computed && !self.flags.optional && !self.flags.required
    }

    /// Configurable, with a remote default.
    pub fn is_optional_computed(&self) -> bool {
        self.flags.computed && self.flags.optional
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the resource when this changes.
    pub fn with_force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Plan `default` when config leaves the attribute out.
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Hide the value from host output.
    pub fn sensitive(mut self) -> Self {
        self.flags = self.flags.sensitive();
        self
    }
}

/// Attributes plus nested blocks. The root of every [`Schema`], and the body
/// of the `filter` block on list data sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    /// Keyed by attribute name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Attribute>,
    /// Keyed by block name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub blocks: HashMap<String, NestedBlock>,
    /// Shown in generated docs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Block {
    /// No attributes, no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Insert or replace a nested block.
    pub fn with_block(mut self, name: impl Into<String>, block: NestedBlock) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A repeatable nested block, configured as an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// Shape of each element.
    #[serde(flatten)]
    pub block: Block,
}

impl NestedBlock {
    /// Zero or more blocks of this shape.
    pub fn list(block: Block) -> Self {
        Self { block }
    }
}

/// Versioned root block of one resource, data source, or the provider itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Bumped when stored state needs an upgrade.
    #[serde(default)]
    pub version: u64,
    /// Top-level attributes and blocks.
    #[serde(flatten)]
    pub block: Block,
}

impl Schema {
    /// Empty schema at `version`.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            block: Block::new(),
        }
    }

    /// Empty schema at version 0. Every kind here is still at 0.
    pub fn v0() -> Self {
        Self::new(0)
    }

    /// See [`Block::with_attribute`].
    pub fn with_attribute(self, name: impl Into<String>, attr: Attribute) -> Self {
        Self {
            block: self.block.with_attribute(name, attr),
            ..self
        }
    }

    /// See [`Block::with_block`].
    pub fn with_block(self, name: impl Into<String>, block: NestedBlock) -> Self {
        Self {
            block: self.block.with_block(name, block),
            ..self
        }
    }

    /// See [`Block::with_description`].
    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            block: self.block.with_description(description),
            ..self
        }
    }

    /// Merge another schema's attributes and blocks into this one.
    ///
    /// Attributes in `other` replace same-named attributes here.
    pub fn merged_with(mut self, other: Schema) -> Self {
        self.block.attributes.extend(other.block.attributes);
        self.block.blocks.extend(other.block.blocks);
        if other.block.description.is_some() {
            self.block.description = other.block.description;
        }
        self
    }

    /// Look up a root attribute.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.get(name)
    }

    /// Mark the named root attributes as sensitive.
    ///
    /// Names that are not attributes of this schema are ignored.
    pub fn mark_sensitive(mut self, names: &[&str]) -> Self {
        for name in names {
            if let Some(attr) = self.block.attributes.get_mut(*name) {
                attr.flags.sensitive = true;
            }
        }
        self
    }

    /// Names of the sensitive root attributes, sorted.
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .block
            .attributes
            .iter()
            .filter(|(_, attr)| attr.flags.sensitive)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Everything the provider publishes: its own config block plus one schema
/// per resource and data source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// The provider block: `endpoint` and `token`.
    #[serde(default)]
    pub provider: Schema,
    /// Keyed by type name, e.g. `coolify_project`.
    #[serde(default)]
    pub resources: HashMap<String, Schema>,
    /// Keyed by type name, e.g. `coolify_projects`.
    #[serde(default)]
    pub data_sources: HashMap<String, Schema>,
}

impl ProviderSchema {
    /// No provider attributes and no types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the provider block.
    pub fn with_provider_config(self, provider: Schema) -> Self {
        Self { provider, ..self }
    }

    /// Register a resource type.
    pub fn with_resource(mut self, type_name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(type_name.into(), schema);
        self
    }

    /// Register a data source type.
    pub fn with_data_source(mut self, type_name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(type_name.into(), schema);
        self
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::v0()
    }
}

/// How bad a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The call failed.
    Error,
    /// The call went through, but the host should show this.
    Warning,
}

/// A message for the host, optionally pinned to an attribute path such as
/// `filter.0.name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: DiagnosticSeverity,
    /// One line, e.g. `Missing required field`.
    pub summary: String,
    /// Longer explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Attribute path the message is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    fn with_severity(severity: DiagnosticSeverity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// An error.
    pub fn error(summary: impl Into<String>) -> Self {
        Self::with_severity(DiagnosticSeverity::Error, summary)
    }

    /// A warning.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self::with_severity(DiagnosticSeverity::Warning, summary)
    }

    /// Attach a detail line.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Pin to an attribute path.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}
