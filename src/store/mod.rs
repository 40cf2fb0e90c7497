//! Provide raw `.env` content sources.
#[cfg(feature = "enable_log")]
use log::{debug, trace};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::DotenvError;

pub(crate) mod builder;

/// A source of raw `.env` content.
pub trait Store {
    /// Read raw content.
    fn read(&self) -> Result<String, DotenvError>;
}

/// [`Store`] reading content from candidate files.
#[derive(Debug, Clone)]
pub struct FileStore {
    file_paths: Vec<PathBuf>,
    short_circuit: bool,
}

impl FileStore {
    /// Create a [`FileStore`] over candidate files, in search order.
    /// With `short_circuit`, reading stops at the first readable file.
    pub fn new(file_paths: Vec<PathBuf>, short_circuit: bool) -> Self {
        Self {
            file_paths,
            short_circuit,
        }
    }

    /// Candidate files.
    pub fn file_paths(&self) -> &[PathBuf] {
        &self.file_paths
    }

    fn read_file(path: &Path) -> Result<Option<String>, DotenvError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                #[cfg(feature = "enable_log")]
                debug!("Read environment file {}.", path.display());
                Ok(Some(content))
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => Err(DotenvError::InvalidFile(
                format!("File {} is not valid UTF-8.", path.display()),
            )),
            Err(_err) => {
                #[cfg(feature = "enable_log")]
                trace!("Skip environment file {}: {}.", path.display(), _err);
                Ok(None)
            }
        }
    }
}

impl Store for FileStore {
    fn read(&self) -> Result<String, DotenvError> {
        if self.file_paths.is_empty() {
            return Err(DotenvError::InvalidPath(
                "At least one environment file path must be provided.".to_owned(),
            ));
        }
        let mut contents = vec![];
        for path in self.file_paths.iter() {
            if let Some(content) = Self::read_file(path)? {
                contents.push(content);
                if self.short_circuit {
                    break;
                }
            }
        }
        if contents.is_empty() {
            return Err(DotenvError::InvalidPath(format!(
                "Unable to read any of the environment file(s) at [{}].",
                self.file_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        Ok(contents.join("\n"))
    }
}

/// [`Store`] wrapping in-memory content.
#[derive(Debug, Clone)]
pub struct StringStore(String);

impl StringStore {
    /// Create a [`StringStore`].
    pub fn new<S: Into<String>>(content: S) -> Self {
        StringStore(content.into())
    }
}

impl Store for StringStore {
    fn read(&self) -> Result<String, DotenvError> {
        Ok(self.0.clone())
    }
}
