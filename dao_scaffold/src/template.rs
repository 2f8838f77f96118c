//! Templates for generated source files
//!
//! Fixed-shape bodies for the model, DAO and service files. Import paths
//! are derived from the module and model names and the file extension.

use crate::utils::naming::{dao_file_name, lower_first, model_file_name};

/// Model file: embeds the schema literal and registers the model
pub fn model_file_text(info: &str, model: &str) -> String {
    format!(
        r#"import mongoose, {{ Schema }} from 'mongoose';

/**
 * {model} table
 */
const info = {info};

export const Model = mongoose.model(info.model, new Schema(info.property), info.table);
"#
    )
}

/// DAO file: a class extending `BaseDAO` plus a singleton instance
pub fn dao_file_text(module: &str, model: &str, extension: &str) -> String {
    let instance = lower_first(model);
    let model_file = model_file_name(model, extension);
    format!(
        r#"import {{ BaseDAO }} from '#dao/BaseDAO.{extension}';
import {{ Model }} from '#dao/{module}/model/{model_file}';

/**
 * {model} data access
 *
 * @extends {{BaseDAO<typeof Model>}}
 */
class {model}DAO extends BaseDAO {{}}

const {instance}DAO = new {model}DAO(Model);
export {{ {model}DAO, {instance}DAO }};
"#
    )
}

/// Service file: a class extending `BaseService` wrapping the DAO singleton
pub fn service_file_text(module: &str, model: &str, extension: &str) -> String {
    let instance = lower_first(model);
    let dao_file = dao_file_name(model, extension);
    format!(
        r#"import {{ BaseService }} from '#service/BaseService.{extension}';
import {{ {instance}DAO }} from '#dao/{module}/{dao_file}';

/** @typedef {{import('#dao/{module}/{model}DAO').{model}DAO}} DAO */
/** @typedef {{import('#service/BaseService').ExtractModel<DAO>}} Model */

/**
 * {model} service
 *
 * @extends {{BaseService<DAO, Model>}}
 */
class {model}Service extends BaseService {{}}

const {instance}Service = new {model}Service({instance}DAO);
export {{ {model}Service, {instance}Service }};
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{extract_table_info, table_info_to_code_text, FieldSpec, FieldType, TableInfo, View};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_model_file_embeds_literal() {
        let info = TableInfo::new("User", "users").field("name", FieldSpec::new(FieldType::String));
        let text = model_file_text(
            &table_info_to_code_text(&info, &[View::Model, View::Table, View::Property]),
            "User",
        );
        assert!(text.contains("const info = {\n    model: \"User\","));
        assert!(text.contains(" * User table\n"));
        assert!(text.ends_with("info.table);\n"));
        assert_eq!(extract_table_info(&text).unwrap(), info);
    }

    #[test]
    fn test_dao_file() {
        let expected = r#"import { BaseDAO } from '#dao/BaseDAO.js';
import { Model } from '#dao/user/model/UserProfileModel.js';

/**
 * UserProfile data access
 *
 * @extends {BaseDAO<typeof Model>}
 */
class UserProfileDAO extends BaseDAO {}

const userProfileDAO = new UserProfileDAO(Model);
export { UserProfileDAO, userProfileDAO };
"#;
        assert_eq!(dao_file_text("user", "UserProfile", "js"), expected);
    }

    #[test]
    fn test_service_file() {
        let text = service_file_text("user", "User", "js");
        assert!(text.starts_with("import { BaseService } from '#service/BaseService.js';\n"));
        assert!(text.contains("import { userDAO } from '#dao/user/UserDAO.js';"));
        assert!(text.contains("/** @typedef {import('#dao/user/UserDAO').UserDAO} DAO */"));
        assert!(text.contains("class UserService extends BaseService {}"));
        assert!(text.contains("const userService = new UserService(userDAO);"));
        assert!(text.ends_with("export { UserService, userService };\n"));
    }
}
