//! Provide environment adapters.
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Capability check of an environment adapter.
pub trait Availability: Send + Sync {
    /// Adapter name.
    fn name(&self) -> &str;

    /// Check whether the backing mechanism is usable in the current process.
    fn is_supported(&self) -> bool;
}

/// Adapter which can read variables.
pub trait Reader: Availability {
    /// Get variable by name.
    fn get(&self, name: &str) -> Option<String>;
}

/// Adapter which can write variables.
pub trait Writer: Availability {
    /// Set variable, `None` means the variable has no value.
    fn set(&self, name: &str, value: Option<&str>);

    /// Clear variable.
    fn clear(&self, name: &str);
}

/// Adapter which can both read and write variables.
pub trait Adapter: Reader + Writer {
    /// Convert into a reader handle sharing the same backing store.
    fn into_reader(self: Arc<Self>) -> Arc<dyn Reader>;

    /// Convert into a writer handle sharing the same backing store.
    fn into_writer(self: Arc<Self>) -> Arc<dyn Writer>;
}

impl<A: Reader + Writer + 'static> Adapter for A {
    fn into_reader(self: Arc<Self>) -> Arc<dyn Reader> {
        self
    }

    fn into_writer(self: Arc<Self>) -> Arc<dyn Writer> {
        self
    }
}

/// Keep adapters which are supported, in their original order.
pub fn filter_by_availability<T: Availability + ?Sized>(adapters: Vec<Arc<T>>) -> Vec<Arc<T>> {
    adapters.into_iter().filter(|a| a.is_supported()).collect()
}

#[derive(Debug, Default)]
struct Table(RwLock<HashMap<String, Option<String>>>);

impl Table {
    fn from_process() -> Self {
        Table(RwLock::new(
            std::env::vars().map(|(k, v)| (k, Some(v))).collect(),
        ))
    }

    fn get(&self, name: &str) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .flatten()
    }

    fn set(&self, name: &str, value: Option<&str>) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), value.map(str::to_owned));
    }

    fn remove(&self, name: &str) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

lazy_static! {
    static ref MODULE_TABLE: Table = Table::default();
    static ref ENV_TABLE: Table = Table::from_process();
    static ref SERVER_TABLE: Table = Table::from_process();
}

/// In-memory adapter, variables never leave the adapter.
#[derive(Debug, Default)]
pub struct ArrayAdapter(Table);

impl ArrayAdapter {
    /// Create an empty [`ArrayAdapter`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl Availability for ArrayAdapter {
    fn name(&self) -> &str {
        "Array"
    }

    fn is_supported(&self) -> bool {
        true
    }
}

impl Reader for ArrayAdapter {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name)
    }
}

impl Writer for ArrayAdapter {
    fn set(&self, name: &str, value: Option<&str>) {
        self.0.set(name, value)
    }

    fn clear(&self, name: &str) {
        self.0.remove(name)
    }
}

/// Adapter of the web server module table, the environment a web server hands
/// to its gateway children.
///
/// Only supported when the process runs behind a web server gateway, which is
/// detected by `GATEWAY_INTERFACE`. The table cannot delete entries, clearing
/// writes an empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApacheAdapter;

impl ApacheAdapter {
    /// Create a new [`ApacheAdapter`].
    pub fn new() -> Self {
        ApacheAdapter
    }
}

impl Availability for ApacheAdapter {
    fn name(&self) -> &str {
        "Apache"
    }

    fn is_supported(&self) -> bool {
        std::env::var_os("GATEWAY_INTERFACE").is_some()
    }
}

impl Reader for ApacheAdapter {
    fn get(&self, name: &str) -> Option<String> {
        MODULE_TABLE.get(name)
    }
}

impl Writer for ApacheAdapter {
    fn set(&self, name: &str, value: Option<&str>) {
        MODULE_TABLE.set(name, Some(value.unwrap_or_default()))
    }

    fn clear(&self, name: &str) {
        MODULE_TABLE.set(name, Some(""))
    }
}

/// Adapter of the process-wide environment constant table.
///
/// The table is a snapshot of the process environment taken on first use,
/// writes stay in the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConstAdapter;

impl EnvConstAdapter {
    /// Create a new [`EnvConstAdapter`].
    pub fn new() -> Self {
        EnvConstAdapter
    }
}

impl Availability for EnvConstAdapter {
    fn name(&self) -> &str {
        "EnvConst"
    }

    fn is_supported(&self) -> bool {
        true
    }
}

impl Reader for EnvConstAdapter {
    fn get(&self, name: &str) -> Option<String> {
        ENV_TABLE.get(name)
    }
}

impl Writer for EnvConstAdapter {
    fn set(&self, name: &str, value: Option<&str>) {
        ENV_TABLE.set(name, value)
    }

    fn clear(&self, name: &str) {
        ENV_TABLE.remove(name)
    }
}

/// Adapter of the process-wide server and request scoped table.
///
/// Seeded like [`EnvConstAdapter`], but kept apart from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerConstAdapter;

impl ServerConstAdapter {
    /// Create a new [`ServerConstAdapter`].
    pub fn new() -> Self {
        ServerConstAdapter
    }
}

impl Availability for ServerConstAdapter {
    fn name(&self) -> &str {
        "ServerConst"
    }

    fn is_supported(&self) -> bool {
        true
    }
}

impl Reader for ServerConstAdapter {
    fn get(&self, name: &str) -> Option<String> {
        SERVER_TABLE.get(name)
    }
}

impl Writer for ServerConstAdapter {
    fn set(&self, name: &str, value: Option<&str>) {
        SERVER_TABLE.set(name, value)
    }

    fn clear(&self, name: &str) {
        SERVER_TABLE.remove(name)
    }
}

/// Adapter of the real process environment.
///
/// A variable without value is written as an empty string. Names the
/// operating system cannot hold are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutenvAdapter;

impl PutenvAdapter {
    /// Create a new [`PutenvAdapter`].
    pub fn new() -> Self {
        PutenvAdapter
    }
}

fn is_os_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(&['=', '\0'][..])
}

impl Availability for PutenvAdapter {
    fn name(&self) -> &str {
        "Putenv"
    }

    fn is_supported(&self) -> bool {
        true
    }
}

impl Reader for PutenvAdapter {
    fn get(&self, name: &str) -> Option<String> {
        if !is_os_name(name) {
            return None;
        }
        std::env::var(name).ok()
    }
}

impl Writer for PutenvAdapter {
    fn set(&self, name: &str, value: Option<&str>) {
        let value = value.unwrap_or_default();
        if is_os_name(name) && !value.contains('\0') {
            std::env::set_var(name, value);
        }
    }

    fn clear(&self, name: &str) {
        if is_os_name(name) {
            std::env::remove_var(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Probe(usize, bool);

    impl Availability for Probe {
        fn name(&self) -> &str {
            "Probe"
        }
        fn is_supported(&self) -> bool {
            self.1
        }
    }

    #[quickcheck]
    fn filter_by_availability_test(flags: Vec<bool>) -> bool {
        let adapters: Vec<Arc<Probe>> = flags
            .iter()
            .enumerate()
            .map(|(i, f)| Arc::new(Probe(i, *f)))
            .collect();
        let expect: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| i)
            .collect();
        let actual: Vec<usize> = filter_by_availability(adapters)
            .iter()
            .map(|p| p.0)
            .collect();
        expect == actual
    }

    #[test]
    fn filter_empty_test() {
        let adapters: Vec<Arc<dyn Reader>> = vec![];
        assert_eq!(true, filter_by_availability(adapters).is_empty());
    }

    #[test]
    fn array_adapter_test() {
        let adapter = ArrayAdapter::new();
        assert_eq!(None, adapter.get("a"));
        adapter.set("a", Some("1"));
        assert_eq!(Some("1".to_owned()), adapter.get("a"));
        adapter.set("a", None);
        assert_eq!(None, adapter.get("a"));
        adapter.set("a", Some("2"));
        adapter.clear("a");
        assert_eq!(None, adapter.get("a"));
    }

    #[test]
    fn array_adapter_isolated_test() {
        let a = ArrayAdapter::new();
        let b = ArrayAdapter::new();
        a.set("x", Some("1"));
        assert_eq!(None, b.get("x"));
        assert_eq!(Some("1".to_owned()), a.get("x"));
    }

    #[test]
    fn putenv_adapter_test() {
        let adapter = PutenvAdapter::new();
        adapter.set("DOTENV_LOADER_ADAPTER_PUTENV", Some("value"));
        assert_eq!(
            Ok("value".to_owned()),
            std::env::var("DOTENV_LOADER_ADAPTER_PUTENV")
        );
        assert_eq!(
            Some("value".to_owned()),
            adapter.get("DOTENV_LOADER_ADAPTER_PUTENV")
        );
        adapter.set("DOTENV_LOADER_ADAPTER_PUTENV", None);
        assert_eq!(
            Some("".to_owned()),
            adapter.get("DOTENV_LOADER_ADAPTER_PUTENV")
        );
        adapter.clear("DOTENV_LOADER_ADAPTER_PUTENV");
        assert_eq!(None, adapter.get("DOTENV_LOADER_ADAPTER_PUTENV"));

        adapter.set("BAD=NAME", Some("value"));
        adapter.set("", Some("value"));
        assert_eq!(None, adapter.get("BAD=NAME"));
    }

    #[test]
    fn const_adapter_test() {
        let env = EnvConstAdapter::new();
        let server = ServerConstAdapter::new();
        env.set("DOTENV_LOADER_ADAPTER_CONST", Some("env"));
        assert_eq!(
            Some("env".to_owned()),
            env.get("DOTENV_LOADER_ADAPTER_CONST")
        );
        assert_eq!(None, server.get("DOTENV_LOADER_ADAPTER_CONST"));
        assert_eq!(true, std::env::var("DOTENV_LOADER_ADAPTER_CONST").is_err());
        env.clear("DOTENV_LOADER_ADAPTER_CONST");
        assert_eq!(None, env.get("DOTENV_LOADER_ADAPTER_CONST"));
    }

    #[test]
    fn apache_adapter_test() {
        let adapter = ApacheAdapter::new();
        assert_eq!(
            std::env::var_os("GATEWAY_INTERFACE").is_some(),
            adapter.is_supported()
        );
        adapter.set("DOTENV_LOADER_ADAPTER_APACHE", Some("1"));
        assert_eq!(
            Some("1".to_owned()),
            adapter.get("DOTENV_LOADER_ADAPTER_APACHE")
        );
        adapter.clear("DOTENV_LOADER_ADAPTER_APACHE");
        assert_eq!(
            Some("".to_owned()),
            adapter.get("DOTENV_LOADER_ADAPTER_APACHE")
        );
    }

    #[test]
    fn into_handle_test() {
        let adapter = Arc::new(ArrayAdapter::new());
        let reader = Arc::clone(&adapter).into_reader();
        let writer = adapter.into_writer();
        writer.set("a", Some("1"));
        assert_eq!(Some("1".to_owned()), reader.get("a"));
    }
}
