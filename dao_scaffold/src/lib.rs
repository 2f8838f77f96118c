//! DaoScaffold: generates model, DAO and service source files from table schemas
//!
//! A table schema lives as a literal inside `dao/<module>/model/<Model>Model.js`.
//! DaoScaffold reads those literals back into `TableInfo` values, writes edited
//! schemas out again, and generates the DAO and service files that wrap them.

pub mod config;
pub mod error;
pub mod project;
pub mod schema;
pub mod storage;
pub mod template;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use error::{Error, Result};
pub use project::{FileOutcome, GeneratedFile, Project};
pub use schema::{
    extract_table_info, table_info_to_code_text, text_to_table_info, FieldSpec, FieldType,
    TableInfo, View,
};
pub use storage::{EntryPath, FsStorage, Storage, WriteMode};

/// Open the project configured in `config`.
///
/// Returns `Ok(None)` when the project directory cannot be opened; the
/// caller should treat that as the user aborting.
pub async fn open_project(config: &Config) -> Result<Option<Project<FsStorage>>> {
    match FsStorage::open(&config.project.root).await {
        Some(storage) => Ok(Some(Project::new(storage, config))),
        None => {
            tracing::warn!(root = %config.project.root, "No project directory available");
            Ok(None)
        }
    }
}

/// Load the configuration file and open its project
pub async fn init(config_path: &str) -> Result<Option<Project<FsStorage>>> {
    let config = config::load_from_file(config_path)?;
    open_project(&config).await
}
