//! Conversion between `TableInfo` and schema literal text
//!
//! Decoding normalizes bare type tokens to field specs and the `Date.now`
//! sentinel to the string `"Date.now"`; encoding performs the inverse,
//! compacting type-only fields back to a bare token.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::schema::literal::Literal;
use crate::schema::parser::{parse_literal, parse_literal_prefix};
use crate::schema::printer::print_literal;
use crate::schema::types::{FieldSpec, FieldType, TableInfo, View, NOW_SENTINEL};

/// Marker preceding the schema literal in a model file
pub const LITERAL_START: &str = "const info = ";

/// Marker following the schema literal in a model file
pub const LITERAL_END: &str = "export";

/// Decode schema literal text into a `TableInfo`
pub fn text_to_table_info(text: &str) -> Result<TableInfo> {
    literal_to_table_info(parse_literal(text)?)
}

fn literal_to_table_info(literal: Literal) -> Result<TableInfo> {
    let entries = match literal {
        Literal::Object(entries) => entries,
        other => {
            return Err(Error::parse(format!(
                "Schema literal must be an object, found {}",
                other.kind()
            )))
        }
    };

    let mut module = None;
    let mut model = None;
    let mut table = None;
    let mut property = None;

    for (key, value) in entries {
        match key.as_str() {
            "module" => module = optional_string(&key, value)?,
            "model" => model = optional_string(&key, value)?,
            "table" => table = optional_string(&key, value)?,
            "property" => property = Some(decode_property(value)?),
            other => tracing::debug!(key = other, "Ignoring unknown schema key"),
        }
    }

    Ok(TableInfo {
        module,
        model: model.ok_or_else(|| Error::parse("Schema literal is missing 'model'"))?,
        table: table.ok_or_else(|| Error::parse("Schema literal is missing 'table'"))?,
        property: property.ok_or_else(|| Error::parse("Schema literal is missing 'property'"))?,
    })
}

/// Locate the schema literal inside a model file and decode it.
///
/// The literal starts right after `const info = ` and runs to the end of the
/// value; only whitespace, comments and a `;` may separate it from the
/// `export` that follows.
pub fn extract_table_info(file_text: &str) -> Result<TableInfo> {
    let start = file_text
        .find(LITERAL_START)
        .map(|i| i + LITERAL_START.len())
        .ok_or_else(|| Error::parse(format!("Missing '{}' marker", LITERAL_START.trim_end())))?;
    let (literal, rest) = parse_literal_prefix(&file_text[start..])?;
    if !rest.starts_with(LITERAL_END) {
        return Err(Error::parse(format!(
            "Missing '{}' marker after the schema literal",
            LITERAL_END
        )));
    }
    literal_to_table_info(literal)
}

/// Encode the requested views of a `TableInfo` as schema literal text.
///
/// Views are always emitted in `module, model, table, property` order.
/// When `views` is exactly `[View::Property]` the field mapping is returned
/// unwrapped.
pub fn table_info_to_code_text(info: &TableInfo, views: &[View]) -> String {
    let property = || {
        Literal::Object(
            info.property
                .iter()
                .map(|(name, spec)| (name.clone(), field_literal(spec)))
                .collect(),
        )
    };

    if matches!(views, [View::Property]) {
        return print_literal(&property());
    }

    let mut object = IndexMap::new();
    for view in View::ALL {
        if !views.contains(&view) {
            continue;
        }
        let value = match view {
            View::Module => match &info.module {
                Some(module) => Literal::String(module.clone()),
                None => continue,
            },
            View::Model => Literal::String(info.model.clone()),
            View::Table => Literal::String(info.table.clone()),
            View::Property => property(),
        };
        object.insert(view.key().to_string(), value);
    }
    print_literal(&Literal::Object(object))
}

fn optional_string(key: &str, value: Literal) -> Result<Option<String>> {
    match value {
        Literal::String(s) => Ok(Some(s)),
        Literal::Null => Ok(None),
        other => Err(Error::parse(format!(
            "'{}' must be a string, found {}",
            key,
            other.kind()
        ))),
    }
}

fn decode_property(value: Literal) -> Result<IndexMap<String, FieldSpec>> {
    let fields = match value {
        Literal::Object(fields) => fields,
        other => {
            return Err(Error::parse(format!(
                "'property' must be an object, found {}",
                other.kind()
            )))
        }
    };
    fields
        .into_iter()
        .map(|(name, raw)| {
            let spec = decode_field(&name, raw)?;
            Ok((name, spec))
        })
        .collect()
}

fn decode_field(name: &str, raw: Literal) -> Result<FieldSpec> {
    let attributes = match raw {
        Literal::Type(field_type) => return Ok(FieldSpec::new(field_type)),
        Literal::Object(attributes) => attributes,
        other => {
            return Err(Error::parse(format!(
                "Field '{}' must be a type token or an object, found {}",
                name,
                other.kind()
            )))
        }
    };

    let field_type = match attributes.get("type") {
        Some(Literal::Type(field_type)) => *field_type,
        Some(Literal::String(type_name)) => type_name.parse()?,
        Some(other) => {
            return Err(Error::parse(format!(
                "Field '{}' has an invalid type ({})",
                name,
                other.kind()
            )))
        }
        None => return Err(Error::parse(format!("Field '{}' is missing 'type'", name))),
    };

    let mut spec = FieldSpec::new(field_type);
    for (key, value) in attributes {
        match key.as_str() {
            "type" => {}
            "default" => spec.default = scalar_text(name, field_type, &key, value)?,
            "min" => spec.min = scalar_text(name, field_type, &key, value)?,
            "max" => spec.max = scalar_text(name, field_type, &key, value)?,
            other => {
                return Err(Error::parse(format!(
                    "Field '{}' has unsupported attribute '{}'",
                    name, other
                )))
            }
        }
    }
    Ok(spec)
}

fn scalar_text(
    field: &str,
    field_type: FieldType,
    key: &str,
    value: Literal,
) -> Result<Option<String>> {
    match value {
        Literal::Null => Ok(None),
        Literal::String(s) | Literal::Number(s) => Ok(Some(s)),
        Literal::Bool(b) => Ok(Some(b.to_string())),
        // The sentinel only means "now" on Date fields
        Literal::Now if key == "default" && field_type == FieldType::Date => {
            Ok(Some(NOW_SENTINEL.to_string()))
        }
        other => Err(Error::parse(format!(
            "Field '{}' has an unsupported '{}' value ({})",
            field,
            key,
            other.kind()
        ))),
    }
}

/// Inverse of `decode_field`
fn field_literal(spec: &FieldSpec) -> Literal {
    if spec.is_bare() {
        return Literal::Type(spec.field_type);
    }

    let mut attributes = IndexMap::new();
    attributes.insert("type".to_string(), Literal::Type(spec.field_type));
    if let Some(default) = &spec.default {
        let value = if spec.defaults_to_now() {
            Literal::Now
        } else {
            scalar_literal(spec.field_type, default)
        };
        attributes.insert("default".to_string(), value);
    }
    for (key, bound) in [("min", &spec.min), ("max", &spec.max)] {
        let Some(bound) = bound else { continue };
        if spec.field_type == FieldType::Date {
            if !bound.is_empty() {
                attributes.insert(key.to_string(), Literal::String(bound.clone()));
            }
        } else {
            attributes.insert(key.to_string(), scalar_literal(spec.field_type, bound));
        }
    }
    Literal::Object(attributes)
}

/// Numbers and booleans stay bare when their text allows it
fn scalar_literal(field_type: FieldType, text: &str) -> Literal {
    match field_type {
        FieldType::Number if Literal::is_number_text(text) => Literal::Number(text.to_string()),
        FieldType::Boolean if text == "true" || text == "false" => Literal::Bool(text == "true"),
        _ => Literal::String(text.to_string()),
    }
}
