//! Provide ordered variable mapping.
use std::iter::FromIterator;

/// Ordered mapping from variable name to value, as produced by a load.
///
/// Names keep the position of their first insertion, later insertions of the
/// same name only replace the value. A value of `None` means the entry had a
/// name but no `=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, Option<String>)>,
}

impl EnvMap {
    /// Create an empty [`EnvMap`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, replacing the value of an existing name in place.
    pub fn insert<K: Into<String>>(&mut self, name: K, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get variable by name. Outer `None` means the name was never loaded.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref())
    }

    /// Check whether the name was loaded.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no variable was loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate variables in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl IntoIterator for EnvMap {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Option<String>)> for EnvMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        let mut map = EnvMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn insert_test() {
        let mut map = EnvMap::new();
        map.insert("a", Some("1".to_owned()));
        map.insert("b", None);
        map.insert("a", Some("2".to_owned()));
        assert_eq!(2, map.len());
        assert_eq!(Some(Some("2")), map.get("a"));
        assert_eq!(Some(None), map.get("b"));
        assert_eq!(None, map.get("c"));
        assert_eq!(
            vec![("a", Some("2")), ("b", None)],
            map.iter().collect::<Vec<_>>()
        );
    }
}
