//! Provide [`StoreBuilder`].
use std::path::{Path, PathBuf};

use crate::FileStore;

pub(crate) const DEFAULT_NAME: &str = ".env";

/// A builder of [`FileStore`].
///
/// Candidate files are every path joined with every name, paths first.
/// Without names, `.env` is used.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    paths: Vec<PathBuf>,
    names: Vec<String>,
    short_circuit: bool,
}

impl StoreBuilder {
    /// Create an empty builder.
    pub fn create() -> Self {
        Self::default()
    }

    /// Set directories to search.
    pub fn with_paths<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.paths = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
        self
    }

    /// Set file names to search in each directory.
    pub fn with_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.names = names.iter().map(|n| n.as_ref().to_owned()).collect();
        self
    }

    /// Stop reading at the first file found.
    pub fn short_circuit(mut self) -> Self {
        self.short_circuit = true;
        self
    }

    fn file_paths(&self) -> Vec<PathBuf> {
        let default = [DEFAULT_NAME.to_owned()];
        let names: &[String] = if self.names.is_empty() {
            &default
        } else {
            &self.names
        };
        self.paths
            .iter()
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .collect()
    }

    /// Build store.
    pub fn make(&self) -> FileStore {
        FileStore::new(self.file_paths(), self.short_circuit)
    }
}
