//! The flat parameter set sent as a request's query string.

/// Ordered mapping from parameter name to its wire string.
///
/// Built by the endpoint catalog with `source` as the first entry. There is
/// no public way to mutate it, so a validated set stays valid until it is
/// consumed by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(&'static str, String)>,
}

impl RequestParams {
    pub(crate) fn new(source: &'static str) -> Self {
        Self {
            pairs: vec![("source", source.to_string())],
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: String) {
        self.pairs.push((name, value));
    }

    /// The `source` discriminator of the endpoint that built these params.
    pub fn source(&self) -> &str {
        self.get("source").unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(key, _)| *key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encode as `name=value&...`, preserving insertion order.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
