use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Key/value settings loaded from `botmill.properties`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    entries: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parse a value with `FromStr`, `None` when missing or unparsable
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Set a value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Configuration {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_writer_wins() {
        let mut config = Configuration::new();
        assert_eq!(config.set("token", "a"), None);
        assert_eq!(config.set("token", "b"), Some("a".to_string()));
        assert_eq!(config.get("token"), Some("b"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_get_parsed() {
        let config: Configuration = [("port", " 8080 "), ("debug", "true"), ("bad", "x")]
            .into_iter()
            .collect();
        assert_eq!(config.get_parsed::<u16>("port"), Some(8080));
        assert_eq!(config.get_parsed::<bool>("debug"), Some(true));
        assert_eq!(config.get_parsed::<u16>("bad"), None);
        assert_eq!(config.get_parsed::<u16>("missing"), None);
        assert_eq!(config.get_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_iteration_is_sorted() {
        let config: Configuration = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
