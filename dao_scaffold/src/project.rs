//! Project orchestration
//!
//! Lists the table schemas of a project, saves a schema back to its model
//! file, and generates or removes the DAO and service files that depend on
//! it. Project layout:
//!
//! ```text
//! <root>/dao/<module>/model/<Model>Model.<ext>
//! <root>/dao/<module>/<Model>DAO.<ext>
//! <root>/service/<module>/<Model>Service.<ext>
//! ```

use futures::future;

use crate::config::{Config, GenerationConfig, ProjectConfig};
use crate::error::{Error, Result};
use crate::schema::{extract_table_info, table_info_to_code_text, validate_table_info, TableInfo, View};
use crate::storage::{EntryPath, Storage, WriteMode};
use crate::template;
use crate::utils::naming::{dao_file_name, model_file_name, service_file_name};

/// What happened to a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Overwritten,
    /// The file existed and overwriting was not requested
    Skipped,
}

/// A file touched by `generate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: EntryPath,
    pub outcome: FileOutcome,
}

/// A project directory seen through a storage backend
pub struct Project<S: Storage> {
    storage: S,
    layout: ProjectConfig,
    generation: GenerationConfig,
}

impl<S: Storage> Project<S> {
    /// Create a project over `storage` using the layout from `config`
    pub fn new(storage: S, config: &Config) -> Self {
        Self {
            storage,
            layout: config.project.clone(),
            generation: config.generation.clone(),
        }
    }

    /// The underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether `generate` overwrites existing files unless told otherwise
    pub fn default_cover(&self) -> bool {
        self.generation.cover
    }

    fn dao_dir(&self) -> EntryPath {
        EntryPath::new([self.layout.dao_dir.as_str()])
    }

    fn model_dir(&self, module: &str) -> EntryPath {
        self.dao_dir().join(module).join(&self.layout.model_dir)
    }

    fn service_dir(&self, module: &str) -> EntryPath {
        EntryPath::new([self.layout.service_dir.as_str(), module])
    }

    /// Path of the model file for `model` in `module`
    pub fn model_path(&self, module: &str, model: &str) -> EntryPath {
        self.model_dir(module)
            .join(&model_file_name(model, &self.layout.extension))
    }

    /// Path of the DAO file for `model` in `module`
    pub fn dao_path(&self, module: &str, model: &str) -> EntryPath {
        self.dao_dir()
            .join(module)
            .join(&dao_file_name(model, &self.layout.extension))
    }

    /// Path of the service file for `model` in `module`
    pub fn service_path(&self, module: &str, model: &str) -> EntryPath {
        self.service_dir(module)
            .join(&service_file_name(model, &self.layout.extension))
    }

    fn check(&self, info: &TableInfo) -> Result<()> {
        if self.generation.validate {
            validate_table_info(info)?;
        }
        Ok(())
    }

    /// List every table schema under `dao/<module>/model/`.
    ///
    /// Reserved module directories are skipped. Each result is tagged with
    /// the directory it was found in.
    pub async fn list_models(&self) -> Result<Vec<TableInfo>> {
        let dao_dir = self.dao_dir();
        self.storage.get_directory(&dao_dir, true).await?;

        let suffix = format!(".{}", self.layout.extension);
        let mut tables = Vec::new();

        for module in self.storage.list_entries(&dao_dir).await? {
            if !module.is_dir() || self.layout.reserved_modules.contains(&module.name) {
                continue;
            }

            let model_dir = self.model_dir(&module.name);
            match self.storage.get_directory(&model_dir, false).await {
                Ok(()) => {}
                Err(Error::NotFound(_)) if !self.layout.strict_listing => {
                    tracing::warn!(module = %module.name, "Module has no model directory, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            }

            for file in self.storage.list_entries(&model_dir).await? {
                if !file.is_file() || !file.name.ends_with(&suffix) {
                    continue;
                }
                let path = model_dir.join(&file.name);
                let mut info = self.read_model_file(&path).await?;
                info.module = Some(module.name.clone());
                tables.push(info);
            }
        }

        tracing::debug!(count = tables.len(), "Listed table schemas");
        Ok(tables)
    }

    /// Load a single table schema by module and model name
    pub async fn load_model(&self, module: &str, model: &str) -> Result<TableInfo> {
        let mut info = self.read_model_file(&self.model_path(module, model)).await?;
        info.module = Some(module.to_string());
        Ok(info)
    }

    async fn read_model_file(&self, path: &EntryPath) -> Result<TableInfo> {
        let content = self.storage.read_text(path).await?;
        extract_table_info(&content).map_err(|e| match e {
            Error::ParseError {
                line,
                column,
                message,
            } => Error::ParseError {
                line,
                column,
                message: format!("{}: {}", path, message),
            },
            other => other,
        })
    }

    /// Write the model file for `info`, always replacing its content
    pub async fn save_model(&self, info: &TableInfo) -> Result<EntryPath> {
        let module = info.require_module()?;
        self.check(info)?;

        self.storage.get_directory(&self.model_dir(module), true).await?;
        let path = self.model_path(module, &info.model);
        let literal = table_info_to_code_text(info, &[View::Model, View::Table, View::Property]);
        let text = template::model_file_text(&literal, &info.model);
        self.storage.write_text(&path, &text, WriteMode::Overwrite).await?;

        tracing::info!(path = %path, "Saved model file");
        Ok(path)
    }

    /// Render and write the DAO and service files for `info`.
    ///
    /// Existing files are only replaced when `cover` is set. Both files are
    /// written concurrently; the first failure is reported after both settle.
    pub async fn generate(&self, info: &TableInfo, cover: bool) -> Result<Vec<GeneratedFile>> {
        let module = info.require_module()?;
        self.check(info)?;

        let ext = &self.layout.extension;
        let dao = self.write_generated(
            self.dao_dir().join(module),
            self.dao_path(module, &info.model),
            template::dao_file_text(module, &info.model, ext),
            cover,
        );
        let service = self.write_generated(
            self.service_dir(module),
            self.service_path(module, &info.model),
            template::service_file_text(module, &info.model, ext),
            cover,
        );

        let (dao, service) = future::join(dao, service).await;
        Ok(vec![dao?, service?])
    }

    async fn write_generated(
        &self,
        dir: EntryPath,
        path: EntryPath,
        text: String,
        cover: bool,
    ) -> Result<GeneratedFile> {
        self.storage.get_directory(&dir, true).await?;

        let outcome = if self.storage.file_exists(&path).await? {
            if !cover {
                tracing::info!(path = %path, "File exists, leaving it untouched");
                return Ok(GeneratedFile {
                    path,
                    outcome: FileOutcome::Skipped,
                });
            }
            FileOutcome::Overwritten
        } else {
            FileOutcome::Created
        };

        self.storage.write_text(&path, &text, WriteMode::Overwrite).await?;
        tracing::info!(path = %path, ?outcome, "Generated file");
        Ok(GeneratedFile { path, outcome })
    }

    /// Delete the DAO, service and model files of `info`.
    ///
    /// The three deletions run concurrently; the first failure (in that
    /// order) is reported after all of them settle.
    pub async fn remove(&self, info: &TableInfo) -> Result<()> {
        let module = info.require_module()?;

        let paths = [
            self.dao_path(module, &info.model),
            self.service_path(module, &info.model),
            self.model_path(module, &info.model),
        ];
        let results =
            future::join_all(paths.iter().map(|path| self.storage.remove_entry(path))).await;

        let mut first_error = None;
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(()) => tracing::info!(path = %path, "Removed file"),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Failed to remove file");
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsStorage;

    #[tokio::test]
    async fn test_paths_follow_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.project.extension = "ts".to_string();
        let project = Project::new(FsStorage::open(dir.path()).await.unwrap(), &config);

        assert_eq!(
            project.model_path("user", "User").to_string(),
            "dao/user/model/UserModel.ts"
        );
        assert_eq!(project.dao_path("user", "User").to_string(), "dao/user/UserDAO.ts");
        assert_eq!(
            project.service_path("user", "User").to_string(),
            "service/user/UserService.ts"
        );
    }
}
