//! Provide the [`Dotenv`] facade.
#[cfg(feature = "enable_log")]
use log::debug;
use std::path::Path;
use std::sync::Arc;

use crate::{
    AdapterRepository, ArrayAdapter, DefaultLoader, DotenvError, EnvMap, Loader, Reader,
    Repository, RepositoryBuilder, Store, StoreBuilder, StringStore, Validator, Writer,
};

/// State of the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never loaded.
    Unloaded,
    /// Load in progress.
    Loading,
    /// Last load succeeded.
    Loaded,
    /// Last load failed.
    Failed,
}

/// Load `.env` files into a [`Repository`].
///
/// ```no_run
/// use dotenv_loader::*;
///
/// let mut dotenv = Dotenv::create_immutable(&["."], None, true);
/// dotenv.safe_load().unwrap();
/// dotenv.required(&["DATABASE_URL"]).unwrap().not_empty().unwrap();
/// ```
#[allow(missing_debug_implementations)]
pub struct Dotenv {
    loader: Box<dyn Loader>,
    repository: Box<dyn Repository>,
    store: Box<dyn Store>,
    state: LoadState,
}

fn array_backed() -> AdapterRepository {
    let adapter = Arc::new(ArrayAdapter::new());
    let reader: Arc<dyn Reader> = adapter.clone();
    let writer: Arc<dyn Writer> = adapter;
    RepositoryBuilder::create()
        .with_readers(Some(vec![reader]))
        .with_writers(Some(vec![writer]))
        .make()
}

impl Dotenv {
    /// Create [`Dotenv`] with custom loader, repository and store.
    pub fn new<L, R, S>(loader: L, repository: R, store: S) -> Self
    where
        L: Loader + 'static,
        R: Repository + 'static,
        S: Store + 'static,
    {
        Dotenv {
            loader: Box::new(loader),
            repository: Box::new(repository),
            store: Box::new(store),
            state: LoadState::Unloaded,
        }
    }

    /// Create [`Dotenv`] reading files named `names` (default `.env`) under `paths`.
    /// With `short_circuit`, only the first file found is read.
    pub fn create<R: Repository + 'static, P: AsRef<Path>>(
        repository: R,
        paths: &[P],
        names: Option<&[&str]>,
        short_circuit: bool,
    ) -> Self {
        let mut builder = StoreBuilder::create()
            .with_paths(paths)
            .with_names(names.unwrap_or_default());
        if short_circuit {
            builder = builder.short_circuit();
        }
        Self::new(DefaultLoader::new(), repository, builder.make())
    }

    /// Create [`Dotenv`] with default adapters, which overwrites existing variables.
    pub fn create_mutable<P: AsRef<Path>>(
        paths: &[P],
        names: Option<&[&str]>,
        short_circuit: bool,
    ) -> Self {
        Self::create(
            RepositoryBuilder::create().make(),
            paths,
            names,
            short_circuit,
        )
    }

    /// Create [`Dotenv`] with default adapters, which never overwrites existing variables.
    pub fn create_immutable<P: AsRef<Path>>(
        paths: &[P],
        names: Option<&[&str]>,
        short_circuit: bool,
    ) -> Self {
        Self::create(
            RepositoryBuilder::create().immutable().make(),
            paths,
            names,
            short_circuit,
        )
    }

    /// Create [`Dotenv`] backed by an in-memory adapter, the process is left untouched.
    pub fn create_array_backed<P: AsRef<Path>>(
        paths: &[P],
        names: Option<&[&str]>,
        short_circuit: bool,
    ) -> Self {
        Self::create(array_backed(), paths, names, short_circuit)
    }

    /// Parse content and resolve nested variables without touching the environment.
    ///
    /// ```
    /// use dotenv_loader::*;
    /// let vars = Dotenv::parse("A=1\nB=${A}2").unwrap();
    /// assert_eq!(Some(Some("12")), vars.get("B"));
    /// ```
    pub fn parse(content: &str) -> Result<EnvMap, DotenvError> {
        Self::new(DefaultLoader::new(), array_backed(), StringStore::new(content)).load()
    }

    /// Read and load environment files.
    pub fn load(&mut self) -> Result<EnvMap, DotenvError> {
        self.state = LoadState::Loading;
        let result = match self.store.read() {
            Ok(content) => self.loader.load(&mut *self.repository, &content),
            Err(err) => Err(err),
        };
        match &result {
            Ok(_vars) => {
                #[cfg(feature = "enable_log")]
                debug!("Loaded {} environment variables.", _vars.len());
                self.state = LoadState::Loaded;
            }
            Err(_) => self.state = LoadState::Failed,
        }
        result
    }

    /// Read and load environment files, a missing file gives no variables.
    /// Malformed files still fail.
    pub fn safe_load(&mut self) -> Result<EnvMap, DotenvError> {
        match self.load() {
            Err(DotenvError::InvalidPath(_msg)) => {
                #[cfg(feature = "enable_log")]
                debug!("Ignore missing environment file: {}", _msg);
                Ok(EnvMap::new())
            }
            v => v,
        }
    }

    /// Validator asserting that the variables exist.
    pub fn required<S: AsRef<str>>(&self, variables: &[S]) -> Result<Validator<'_>, DotenvError> {
        Validator::new(&*self.repository, variables, true)
    }

    /// Validator checking only the variables which exist.
    pub fn if_present<S: AsRef<str>>(
        &self,
        variables: &[S],
    ) -> Result<Validator<'_>, DotenvError> {
        Validator::new(&*self.repository, variables, false)
    }

    /// Underlying repository.
    pub fn repository(&self) -> &dyn Repository {
        &*self.repository
    }

    /// State of the last load.
    pub fn state(&self) -> LoadState {
        self.state
    }
}
