//! Type definitions for table schemas

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Default value meaning "evaluate at record-creation time"
pub const NOW_SENTINEL: &str = "Date.now";

/// Logical type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
}

impl FieldType {
    /// All field types, in declaration order
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Date,
        FieldType::Boolean,
    ];

    /// The type name, which doubles as its bare token
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Boolean => "Boolean",
        }
    }

    /// Look up a type by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::parse(format!("Unknown field type: {}", s)))
    }
}

/// Specification of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl FieldSpec {
    /// Create a field with only its type set
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            default: None,
            min: None,
            max: None,
        }
    }

    /// Set the default value
    pub fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// Set the lower bound
    pub fn min(mut self, min: &str) -> Self {
        self.min = Some(min.to_string());
        self
    }

    /// Set the upper bound
    pub fn max(mut self, max: &str) -> Self {
        self.max = Some(max.to_string());
        self
    }

    /// Whether `type` is the only attribute set; such fields encode as a bare token
    pub fn is_bare(&self) -> bool {
        self.default.is_none() && self.min.is_none() && self.max.is_none()
    }

    /// Whether the default is the "now" sentinel on a Date field
    pub fn defaults_to_now(&self) -> bool {
        self.field_type == FieldType::Date && self.default.as_deref() == Some(NOW_SENTINEL)
    }
}

/// One logical table and its fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub model: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub property: IndexMap<String, FieldSpec>,
}

impl TableInfo {
    /// Create a table description with no fields
    pub fn new(model: &str, table: &str) -> Self {
        Self {
            module: None,
            model: model.to_string(),
            table: table.to_string(),
            property: IndexMap::new(),
        }
    }

    /// Set the owning module
    pub fn with_module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }

    /// Add or replace a field
    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.property.insert(name.to_string(), spec);
        self
    }

    /// The module name, or `MissingModule` when unset or blank
    pub fn require_module(&self) -> Result<&str> {
        match self.module.as_deref() {
            Some(module) if !module.trim().is_empty() => Ok(module),
            _ => Err(Error::MissingModule),
        }
    }
}

/// A top-level section of a `TableInfo` that can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Module,
    Model,
    Table,
    Property,
}

impl View {
    /// Every view, in rendering order
    pub const ALL: [View; 4] = [View::Module, View::Model, View::Table, View::Property];

    /// The key this view is rendered under
    pub fn key(&self) -> &'static str {
        match self {
            View::Module => "module",
            View::Model => "model",
            View::Table => "table",
            View::Property => "property",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_names() {
        for field_type in FieldType::ALL {
            assert_eq!(FieldType::from_name(field_type.as_str()), Some(field_type));
        }
        assert_eq!(FieldType::from_name("string"), None);
        assert!("Object".parse::<FieldType>().is_err());
    }

    #[test]
    fn test_bare_field() {
        assert!(FieldSpec::new(FieldType::String).is_bare());
        assert!(!FieldSpec::new(FieldType::String).default_value("").is_bare());
        assert!(FieldSpec::new(FieldType::Date)
            .default_value(NOW_SENTINEL)
            .defaults_to_now());
        assert!(!FieldSpec::new(FieldType::String)
            .default_value(NOW_SENTINEL)
            .defaults_to_now());
    }

    #[test]
    fn test_require_module() {
        let info = TableInfo::new("User", "users");
        assert!(matches!(info.require_module(), Err(Error::MissingModule)));
        let info = info.with_module("  ");
        assert!(matches!(info.require_module(), Err(Error::MissingModule)));
        let info = TableInfo::new("User", "users").with_module("user");
        assert_eq!(info.require_module().unwrap(), "user");
    }

    #[test]
    fn test_json_shape() {
        let info = TableInfo::new("User", "users")
            .field("name", FieldSpec::new(FieldType::String))
            .field("bornAt", FieldSpec::new(FieldType::Date).default_value(NOW_SENTINEL));
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"model":"User","table":"users","property":{"name":{"type":"String"},"bornAt":{"type":"Date","default":"Date.now"}}}"#
        );
        let back: TableInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
