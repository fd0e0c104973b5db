//! Where shader source text comes from.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

/// Supplies shader source text for an identifier (usually a path).
pub trait SourceProvider {
    fn read(&self, id: &str) -> io::Result<String>;
}

/// Reads sources from the file system, relative to `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: Some(root.into()) }
    }

    pub fn resolve(&self, id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(id),
            None => Path::new(id).to_path_buf(),
        }
    }
}

impl SourceProvider for FileSource {
    fn read(&self, id: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(id))
    }
}

/// Sources kept in memory, for embedded shaders and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sources: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I: Into<String>, S: Into<String>>(&mut self, id: I, source: S) {
        self.sources.insert(id.into(), source.into());
    }
}

impl SourceProvider for MemorySource {
    fn read(&self, id: &str) -> io::Result<String> {
        self.sources
            .get(id)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no source named {}", id)))
    }
}

/// Reads `id`, or returns an empty string if it can't be read.
///
/// The read error is logged and otherwise dropped: an empty source fails in the compiler, and that
/// diagnostic is what reaches the caller.
pub fn load_or_empty<P: SourceProvider + ?Sized>(provider: &P, id: &str) -> String {
    match provider.read(id) {
        Ok(source) => source,
        Err(e) => {
            warn!("could not read shader source {}: {}", id, e);
            String::new()
        }
    }
}
