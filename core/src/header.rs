//! Header map with one canonical value per key.
//!
//! # Design
//! Transports hand back headers as a list where a name may repeat; this map
//! keeps the first value it sees for each name and drops the rest. Empty
//! values are legal in the map but are treated as absent when headers are
//! copied out to a transport. Names are unique case-insensitively: writing a
//! name in a new casing replaces the old entry and keeps the latest casing.

use std::collections::{BTreeMap, HashMap};

use crate::content_type::{ContentType, CONTENT_TYPE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: BTreeMap<String, String>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a single header. An existing entry under the
    /// same name in another casing is replaced, and the new casing kept.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.entries.retain(|k, _| !k.eq_ignore_ascii_case(&key));
        self.entries.insert(key, value.into());
        self
    }

    /// Merge every entry of `other`, later values overwriting earlier ones
    /// regardless of casing.
    pub fn merge<I, K, V>(&mut self, other: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in other {
            self.set(k, v);
        }
        self
    }

    /// Exact-key lookup first, then a case-insensitive scan.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn content_type(&self) -> ContentType {
        self.get(CONTENT_TYPE).map(ContentType::parse).unwrap_or_default()
    }

    /// Replace any content type header, whatever its casing, with `Content-Type`.
    pub fn set_content_type(&mut self, content_type: &ContentType) -> &mut Self {
        self.set(CONTENT_TYPE, content_type.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy without any empty-valued entries.
    pub fn without_empty(&self) -> Header {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Headers in transport form; empty values are not sent.
    pub fn to_transport(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Collapse a transport header list, keeping the first value per
    /// case-insensitive name.
    pub fn from_transport(headers: &[(String, String)]) -> Header {
        let mut header = Header::new();
        for (k, v) in headers {
            if !header.contains_key(k) {
                header.entries.insert(k.clone(), v.clone());
            }
        }
        header
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut header = Header::new();
        header.merge(iter);
        header
    }
}

impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Header {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Header {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
