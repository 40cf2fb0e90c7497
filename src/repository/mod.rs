//! Provide [`Repository`] implementations.
#[cfg(feature = "enable_log")]
use log::debug;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub(crate) mod adapter;
pub(crate) mod builder;

use crate::{Reader, Writer};

/// A unified view of environment variables, used by loaders and validators.
pub trait Repository {
    /// Check whether variable exists.
    fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get variable by name.
    fn get(&self, name: &str) -> Option<String>;

    /// Set variable, returns `false` if the write was rejected.
    fn set(&mut self, name: &str, value: Option<&str>) -> bool;

    /// Clear variable, returns `false` if the clear was rejected.
    fn clear(&mut self, name: &str) -> bool;
}

/// An implementation of [`Repository`] backed by [`Reader`]s and [`Writer`]s.
///
/// Readers are consulted in order and the first one reporting a value wins,
/// writes go to every writer. An immutable repository never overwrites a
/// variable which is already present, or which it has already written.
pub struct AdapterRepository {
    readers: Vec<Arc<dyn Reader>>,
    writers: Vec<Arc<dyn Writer>>,
    immutable: bool,
    loaded: HashSet<String>,
}

impl AdapterRepository {
    pub(crate) fn new(
        readers: Vec<Arc<dyn Reader>>,
        writers: Vec<Arc<dyn Writer>>,
        immutable: bool,
    ) -> Self {
        Self {
            readers,
            writers,
            immutable,
            loaded: HashSet::new(),
        }
    }

    /// Readers in precedence order.
    pub fn readers(&self) -> &[Arc<dyn Reader>] {
        &self.readers
    }

    /// Writers.
    pub fn writers(&self) -> &[Arc<dyn Writer>] {
        &self.writers
    }

    /// Check whether repository is immutable.
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }
}

impl Debug for AdapterRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRepository")
            .field(
                "readers",
                &self.readers.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field(
                "writers",
                &self.writers.iter().map(|w| w.name()).collect::<Vec<_>>(),
            )
            .field("immutable", &self.immutable)
            .finish()
    }
}

impl Repository for AdapterRepository {
    fn get(&self, name: &str) -> Option<String> {
        self.readers.iter().find_map(|r| r.get(name))
    }

    fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        if self.immutable && (self.loaded.contains(name) || self.has(name)) {
            #[cfg(feature = "enable_log")]
            debug!("Skip overwriting immutable variable {}.", name);
            return false;
        }
        for w in self.writers.iter() {
            w.set(name, value);
        }
        self.loaded.insert(name.to_owned());
        true
    }

    fn clear(&mut self, name: &str) -> bool {
        if self.immutable && !self.loaded.contains(name) {
            return false;
        }
        for w in self.writers.iter() {
            w.clear(name);
        }
        self.loaded.remove(name);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::sync::Arc;

    fn array_repository(immutable: bool) -> (Arc<ArrayAdapter>, AdapterRepository) {
        let adapter = Arc::new(ArrayAdapter::new());
        let reader: Arc<dyn Reader> = adapter.clone();
        let writer: Arc<dyn Writer> = adapter.clone();
        let mut builder = RepositoryBuilder::create()
            .with_readers(Some(vec![reader]))
            .with_writers(Some(vec![writer]));
        if immutable {
            builder = builder.immutable();
        }
        (adapter, builder.make())
    }

    #[test]
    fn mutable_test() {
        let (_, mut repo) = array_repository(false);
        assert_eq!(false, repo.has("A"));
        assert_eq!(true, repo.set("A", Some("1")));
        assert_eq!(true, repo.set("A", Some("2")));
        assert_eq!(Some("2".to_owned()), repo.get("A"));
        assert_eq!(true, repo.clear("A"));
        assert_eq!(false, repo.has("A"));
    }

    #[test]
    fn immutable_test() {
        let (_, mut repo) = array_repository(true);
        assert_eq!(true, repo.set("A", Some("1")));
        assert_eq!(false, repo.set("A", Some("2")));
        assert_eq!(Some("1".to_owned()), repo.get("A"));
    }

    #[test]
    fn immutable_existing_test() {
        let (adapter, mut repo) = array_repository(true);
        adapter.set("A", Some("outer"));
        assert_eq!(false, repo.set("A", Some("inner")));
        assert_eq!(false, repo.clear("A"));
        assert_eq!(Some("outer".to_owned()), repo.get("A"));

        assert_eq!(true, repo.set("B", Some("1")));
        assert_eq!(true, repo.clear("B"));
        assert_eq!(false, repo.has("B"));
    }

    #[test]
    fn immutable_without_readers_test() {
        let adapter = Arc::new(ArrayAdapter::new());
        let writer: Arc<dyn Writer> = adapter.clone();
        let mut repo = RepositoryBuilder::create()
            .with_readers(Some(vec![]))
            .with_writers(Some(vec![writer]))
            .immutable()
            .make();
        assert_eq!(true, repo.set("A", Some("1")));
        assert_eq!(false, repo.set("A", Some("2")));
        assert_eq!(Some("1".to_owned()), adapter.get("A"));
    }

    #[test]
    fn reader_precedence_test() {
        let first = Arc::new(ArrayAdapter::new());
        let second = Arc::new(ArrayAdapter::new());
        first.set("A", Some("first"));
        second.set("A", Some("second"));
        second.set("B", Some("second"));
        let readers: Vec<Arc<dyn Reader>> = vec![first.clone(), second.clone()];
        let writers: Vec<Arc<dyn Writer>> = vec![first.clone(), second.clone()];
        let mut repo = RepositoryBuilder::create()
            .with_readers(Some(readers))
            .with_writers(Some(writers))
            .make();
        assert_eq!(Some("first".to_owned()), repo.get("A"));
        assert_eq!(Some("second".to_owned()), repo.get("B"));

        repo.set("C", Some("both"));
        assert_eq!(Some("both".to_owned()), first.get("C"));
        assert_eq!(Some("both".to_owned()), second.get("C"));
    }

    #[test]
    fn debug_test() {
        let (_, repo) = array_repository(true);
        assert_eq!(
            "AdapterRepository { readers: [\"Array\"], writers: [\"Array\"], immutable: true }",
            format!("{:?}", repo)
        );
    }
}
