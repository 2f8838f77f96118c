//! Storage module for DaoScaffold
//!
//! Hierarchical named storage rooted at a project directory. Directories
//! are created on demand, files are probed before conditional writes, and
//! missing entries surface as `Error::NotFound`.

pub mod fs;

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

pub use fs::FsStorage;

/// A path of entry names relative to the storage root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EntryPath {
    segments: Vec<String>,
}

impl EntryPath {
    /// The storage root itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from its segments
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A child path one level below this one
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The path's segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, if any
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A named entry inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// How `write_text` treats existing content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file's content
    Overwrite,
    /// Keep existing content and add to its end
    Append,
}

/// Storage backend a project lives in
#[async_trait]
pub trait Storage: Send + Sync {
    /// Open a directory, creating it and its parents when `create` is set
    async fn get_directory(&self, path: &EntryPath, create: bool) -> Result<()>;

    /// List a directory's entries, sorted by name
    async fn list_entries(&self, path: &EntryPath) -> Result<Vec<Entry>>;

    /// Probe whether a file exists
    async fn file_exists(&self, path: &EntryPath) -> Result<bool>;

    /// Read a file as UTF-8 text
    async fn read_text(&self, path: &EntryPath) -> Result<String>;

    /// Write text to a file, creating it if absent. The parent directory must exist.
    async fn write_text(&self, path: &EntryPath, contents: &str, mode: WriteMode) -> Result<()>;

    /// Remove a file
    async fn remove_entry(&self, path: &EntryPath) -> Result<()>;
}
