//! Request parameters as delivered by the host dispatcher.

/// Find the first value whose key matches `key` exactly.
///
/// `keys` and `values` are the host's parallel arrays. An empty key array
/// never matches; a key without a paired value is treated as absent.
pub fn value_for_key<'a, K, V>(keys: &[K], values: &'a [V], key: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let index = keys.iter().position(|k| k.as_ref() == key)?;
    values.get(index).map(AsRef::as_ref)
}

/// A single extension request: method name plus ordered key/value pairs.
///
/// Keys are not guaranteed unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequest {
    pub method: String,
    pub params: Vec<(String, String)>,
}

impl ServiceRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Build a request from the host's parallel key/value arrays.
    ///
    /// Pairs are zipped, so arrays of unequal length are truncated to the shorter.
    pub fn from_parallel<K, V>(method: impl Into<String>, keys: &[K], values: &[V]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            method: method.into(),
            params: keys
                .iter()
                .zip(values)
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
                .collect(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
