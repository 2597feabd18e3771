//! Ordered, last-write-wins header set.

/// Header name that marks a request as SOAP.
pub const SOAP_ACTION: &str = "SOAPAction";

/// Content type header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Header mapping with unique names.
///
/// Names compare ASCII case-insensitively. Setting an existing name replaces
/// its value in place, so wire order follows first insertion.
///
/// Names and values stay unvalidated strings until the request is prepared,
/// where they become an [`http::HeaderMap`]. `set_header` is infallible and
/// an invalid header is reported as [`crate::CourierError::InvalidHeader`]
/// by `prepare` or `execute`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, overwriting any previous value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a header value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    /// Check whether a header is present under any casing.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no headers are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}
