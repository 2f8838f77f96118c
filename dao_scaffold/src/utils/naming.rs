//! Naming utilities for DaoScaffold
//!
//! This module derives generated file names, class and instance names from
//! a model name.

use inflector::Inflector;

/// Lowercase the first character, leaving the rest untouched
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `<Model>Model.<ext>`
pub fn model_file_name(model: &str, extension: &str) -> String {
    format!("{}Model.{}", model, extension)
}

/// `<Model>DAO.<ext>`
pub fn dao_file_name(model: &str, extension: &str) -> String {
    format!("{}DAO.{}", model, extension)
}

/// `<Model>Service.<ext>`
pub fn service_file_name(model: &str, extension: &str) -> String {
    format!("{}Service.{}", model, extension)
}

/// Convert a singular name to plural
pub fn pluralize(name: &str) -> String {
    // Handle special cases first
    match name.to_lowercase().as_str() {
        "person" => "people".to_string(),
        "child" => "children".to_string(),
        "man" => "men".to_string(),
        "woman" => "women".to_string(),
        "foot" => "feet".to_string(),
        "tooth" => "teeth".to_string(),
        "goose" => "geese".to_string(),
        "mouse" => "mice".to_string(),
        _ => name.to_plural(),
    }
}

/// Suggest a collection name for a model: snake_case, last word pluralized
pub fn suggest_table_name(model: &str) -> String {
    let snake = model.to_snake_case();
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, pluralize(last)),
        None => pluralize(&snake),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("User"), "user");
        assert_eq!(lower_first("UserProfile"), "userProfile");
        assert_eq!(lower_first("URL"), "uRL");
        assert_eq!(lower_first("Éclair"), "éclair");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(model_file_name("User", "js"), "UserModel.js");
        assert_eq!(dao_file_name("User", "js"), "UserDAO.js");
        assert_eq!(service_file_name("User", "ts"), "UserService.ts");
    }

    #[test]
    fn test_suggest_table_name() {
        assert_eq!(suggest_table_name("User"), "users");
        assert_eq!(suggest_table_name("UserProfile"), "user_profiles");
        assert_eq!(suggest_table_name("Person"), "people");
        assert_eq!(suggest_table_name("OrderChild"), "order_children");
    }
}
