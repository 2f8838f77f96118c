//! Validation of `TableInfo` values before anything is written

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::schema::literal::Literal;
use crate::schema::types::{FieldSpec, FieldType, TableInfo};

static MODULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("module regex is valid"));
static MODEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_$]*$").expect("model regex is valid"));
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("field regex is valid"));

/// Check a table description, collecting every problem into one error
pub fn validate_table_info(info: &TableInfo) -> Result<()> {
    let mut problems = Vec::new();

    if let Some(module) = &info.module {
        if !MODULE_RE.is_match(module) {
            problems.push(format!("module '{}' is not a valid directory name", module));
        }
    }
    if !MODEL_RE.is_match(&info.model) {
        problems.push(format!(
            "model '{}' must be a PascalCase identifier",
            info.model
        ));
    }
    if info.table.trim().is_empty() {
        problems.push("table name is empty".to_string());
    }

    for (name, spec) in &info.property {
        if !FIELD_RE.is_match(name) {
            problems.push(format!("field name '{}' is not a valid identifier", name));
        }
        validate_field(name, spec, &mut problems);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationError(problems))
    }
}

fn validate_field(name: &str, spec: &FieldSpec, problems: &mut Vec<String>) {
    if spec.field_type != FieldType::Date && (spec.min.is_some() || spec.max.is_some()) {
        problems.push(format!(
            "field '{}': min/max are only allowed on Date fields",
            name
        ));
    }
    for (key, bound) in [("min", &spec.min), ("max", &spec.max)] {
        if matches!(bound, Some(b) if b.trim().is_empty()) {
            problems.push(format!("field '{}': {} is empty", name, key));
        }
    }

    let Some(default) = &spec.default else { return };
    match spec.field_type {
        FieldType::Number if !Literal::is_number_text(default) => {
            problems.push(format!("field '{}': default '{}' is not a number", name, default));
        }
        FieldType::Boolean if default != "true" && default != "false" => {
            problems.push(format!(
                "field '{}': default '{}' is not true or false",
                name, default
            ));
        }
        FieldType::Date if default.trim().is_empty() => {
            problems.push(format!("field '{}': default is empty", name));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::NOW_SENTINEL;

    #[test]
    fn test_valid_table() {
        let info = TableInfo::new("UserProfile", "user_profiles")
            .with_module("user")
            .field("name", FieldSpec::new(FieldType::String).default_value("He said \"hi\""))
            .field("age", FieldSpec::new(FieldType::Number).default_value("18"))
            .field("active", FieldSpec::new(FieldType::Boolean).default_value("false"))
            .field(
                "bornAt",
                FieldSpec::new(FieldType::Date)
                    .default_value(NOW_SENTINEL)
                    .min("1900-01-01"),
            );
        assert!(validate_table_info(&info).is_ok());
    }

    #[test]
    fn test_collects_every_problem() {
        let info = TableInfo::new("user", " ")
            .with_module("../etc")
            .field("first name", FieldSpec::new(FieldType::String))
            .field("age", FieldSpec::new(FieldType::Number).default_value("old").min("1"))
            .field("ok", FieldSpec::new(FieldType::Boolean).default_value("yes"))
            .field("at", FieldSpec::new(FieldType::Date).max(""));

        match validate_table_info(&info) {
            Err(Error::ValidationError(problems)) => {
                assert_eq!(problems.len(), 8, "{problems:#?}");
                assert!(problems.iter().any(|p| p.contains("../etc")));
                assert!(problems.iter().any(|p| p.contains("PascalCase")));
                assert!(problems.iter().any(|p| p.contains("table name is empty")));
                assert!(problems.iter().any(|p| p.contains("first name")));
                assert!(problems.iter().any(|p| p.contains("not a number")));
                assert!(problems.iter().any(|p| p.contains("only allowed on Date")));
                assert!(problems.iter().any(|p| p.contains("not true or false")));
                assert!(problems.iter().any(|p| p.contains("max is empty")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
