//! Filesystem-backed storage
//!
//! This module implements `Storage` on top of `tokio::fs`, rooted at a
//! project directory the user chose.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::storage::{Entry, EntryKind, EntryPath, Storage, WriteMode};

/// Storage rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Open `root` as a project directory.
    ///
    /// Returns `None` when the directory is missing, not a directory or not
    /// readable; callers treat that as the operation being aborted.
    pub async fn open(root: impl AsRef<Path>) -> Option<Self> {
        let root = root.as_ref();
        match tokio::fs::metadata(root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                tracing::warn!(path = %root.display(), "Project path is not a directory");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %root.display(), error = %e, "Cannot open project directory");
                return None;
            }
        }
        if let Err(e) = tokio::fs::read_dir(root).await {
            tracing::warn!(path = %root.display(), error = %e, "Project directory is not readable");
            return None;
        }
        Some(Self {
            root: root.to_path_buf(),
        })
    }

    /// The project directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn an entry path into a filesystem path below the root
    fn resolve(&self, path: &EntryPath) -> Result<PathBuf> {
        let mut resolved = self.root.clone();
        for segment in path.segments() {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains(|c: char| c == '/' || c == '\\')
            {
                return Err(Error::PermissionError(format!(
                    "'{}' is not a valid entry name in {}",
                    segment, path
                )));
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn get_directory(&self, path: &EntryPath, create: bool) -> Result<()> {
        let dir = self.resolve(path)?;
        tracing::debug!(path = %path, create, "Opening directory");
        if create {
            return tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| Error::from_io(e, &path.to_string()));
        }
        let meta = tokio::fs::metadata(&dir)
            .await
            .map_err(|e| Error::from_io(e, &path.to_string()))?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(Error::NotFound(format!("{} is not a directory", path)))
        }
    }

    async fn list_entries(&self, path: &EntryPath) -> Result<Vec<Entry>> {
        let dir = self.resolve(path)?;
        tracing::debug!(path = %path, "Listing directory");
        let mut read_dir = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| Error::from_io(e, &path.to_string()))?;

        let mut entries = Vec::new();
        while let Some(dir_entry) = read_dir.next_entry().await? {
            let file_type = dir_entry.file_type().await?;
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            entries.push(Entry {
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn file_exists(&self, path: &EntryPath) -> Result<bool> {
        let file = self.resolve(path)?;
        match tokio::fs::metadata(&file).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::from_io(e, &path.to_string())),
        }
    }

    async fn read_text(&self, path: &EntryPath) -> Result<String> {
        let file = self.resolve(path)?;
        tracing::debug!(path = %path, "Reading file");
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| Error::from_io(e, &path.to_string()))
    }

    async fn write_text(&self, path: &EntryPath, contents: &str, mode: WriteMode) -> Result<()> {
        let file = self.resolve(path)?;
        tracing::debug!(path = %path, ?mode, bytes = contents.len(), "Writing file");
        let mut options = tokio::fs::OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let mut handle = options
            .open(&file)
            .await
            .map_err(|e| Error::from_io(e, &path.to_string()))?;
        handle.write_all(contents.as_bytes()).await?;
        handle.flush().await?;
        Ok(())
    }

    async fn remove_entry(&self, path: &EntryPath) -> Result<()> {
        let file = self.resolve(path)?;
        tracing::debug!(path = %path, "Removing file");
        tokio::fs::remove_file(&file)
            .await
            .map_err(|e| Error::from_io(e, &path.to_string()))
    }
}
