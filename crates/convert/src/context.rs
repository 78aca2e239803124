use std::collections::HashMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Read-only view of the request being bound.
///
/// Converters receive it for completeness; the built-in scalar converters
/// never look at it.
pub trait RequestContext: Send + Sync {
    /// Raw value of the named parameter, `None` if the request lacks it.
    fn parameter(&self, name: &str) -> Option<&str>;
}

/// A context with no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyContext;

impl RequestContext for EmptyContext {
    fn parameter(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Raw request parameters, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMap {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

impl ParameterMap {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw value by parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set the raw value of a parameter, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Remove a parameter, returning its value if it existed.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parameter names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl RequestContext for ParameterMap {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Index<&str> for ParameterMap {
    type Output = str;

    fn index(&self, name: &str) -> &Self::Output {
        &self.values[name]
    }
}
