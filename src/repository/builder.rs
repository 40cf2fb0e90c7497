//! Provide [`RepositoryBuilder`].
#[cfg(feature = "enable_log")]
use log::debug;
use std::sync::Arc;

use crate::{
    filter_by_availability, Adapter, AdapterRepository, ApacheAdapter, EnvConstAdapter,
    PutenvAdapter, Reader, ServerConstAdapter, Writer,
};

/// Default adapters shared by the reader side and the writer side.
pub(crate) struct AdapterSet {
    readers: Vec<Arc<dyn Reader>>,
    writers: Vec<Arc<dyn Writer>>,
}

fn default_adapters() -> AdapterSet {
    let adapters: Vec<Arc<dyn Adapter>> = vec![
        Arc::new(ApacheAdapter::new()),
        Arc::new(EnvConstAdapter::new()),
        Arc::new(ServerConstAdapter::new()),
        Arc::new(PutenvAdapter::new()),
    ];
    let adapters = filter_by_availability(adapters);
    #[cfg(feature = "enable_log")]
    debug!(
        "Use default adapters [{}].",
        adapters
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    AdapterSet {
        readers: adapters.iter().map(|a| Arc::clone(a).into_reader()).collect(),
        writers: adapters.into_iter().map(|a| a.into_writer()).collect(),
    }
}

/// A builder of [`AdapterRepository`].
///
/// Builder never changes in place, every `with_*` call returns a new builder.
///
/// ```
/// use dotenv_loader::*;
/// let mut repository = RepositoryBuilder::create().immutable().make();
/// std::env::set_var("DOTENV_LOADER_DOC", "outer");
/// repository.set("DOTENV_LOADER_DOC", Some("inner"));
/// assert_eq!(Some("outer".to_owned()), repository.get("DOTENV_LOADER_DOC"));
/// ```
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct RepositoryBuilder {
    readers: Option<Vec<Arc<dyn Reader>>>,
    writers: Option<Vec<Arc<dyn Writer>>>,
    immutable: bool,
    defaults: fn() -> AdapterSet,
}

impl RepositoryBuilder {
    /// Create a builder using default adapters on both sides.
    pub fn create() -> Self {
        RepositoryBuilder {
            readers: None,
            writers: None,
            immutable: false,
            defaults: default_adapters,
        }
    }

    /// Use given readers, unsupported ones are dropped. `None` means default adapters.
    pub fn with_readers(&self, readers: Option<Vec<Arc<dyn Reader>>>) -> Self {
        RepositoryBuilder {
            readers: readers.map(filter_by_availability),
            ..self.clone()
        }
    }

    /// Use given writers, unsupported ones are dropped. `None` means default adapters.
    pub fn with_writers(&self, writers: Option<Vec<Arc<dyn Writer>>>) -> Self {
        RepositoryBuilder {
            writers: writers.map(filter_by_availability),
            ..self.clone()
        }
    }

    /// Make repository immutable.
    pub fn immutable(&self) -> Self {
        RepositoryBuilder {
            immutable: true,
            ..self.clone()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_defaults(&self, defaults: fn() -> AdapterSet) -> Self {
        RepositoryBuilder {
            defaults,
            ..self.clone()
        }
    }

    /// Build repository.
    pub fn make(&self) -> AdapterRepository {
        let (readers, writers) = match (&self.readers, &self.writers) {
            (Some(r), Some(w)) => (r.clone(), w.clone()),
            (r, w) => {
                let set = (self.defaults)();
                (
                    r.clone().unwrap_or(set.readers),
                    w.clone().unwrap_or(set.writers),
                )
            }
        };
        AdapterRepository::new(readers, writers, self.immutable)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::create()
    }
}
