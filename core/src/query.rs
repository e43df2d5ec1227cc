//! Query parameters and their `?a=b&c=d` rendering.
//!
//! Keys and values are emitted as given; callers pass them pre-encoded.
//! Pairs render in key order so the same parameters always yield the same
//! URL.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merge every pair of `other`, later values overwriting earlier ones.
    pub fn merge<I, K, V>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in other {
            self.params.insert(k.into(), v.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `?k=v&...` over the non-empty values, or `""` when there are none.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (k, v) in self.params.iter().filter(|(_, v)| !v.is_empty()) {
            out.push(if out.is_empty() { '?' } else { '&' });
            out.push_str(k);
            out.push('=');
            out.push_str(v);
        }
        out
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut query = Query::new();
        query.merge(iter);
        query
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Query {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
