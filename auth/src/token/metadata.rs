use std::collections::HashMap;

use http::HeaderMap;

use super::errors::TokenError;

/// Request-scoped transport metadata.
///
/// Maps header names to one or more values. Names are compared
/// case-insensitively (stored lowercase); values keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    entries: HashMap<String, Vec<String>>,
}

impl RequestMetadata {
    pub const AUTHORIZATION: &'static str = "authorization";

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `name`.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .entry(name.as_ref().to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Append a value for `name` (builder form).
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// All values recorded for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestMetadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (name, value) in iter {
            metadata.insert(name, value);
        }
        metadata
    }
}

/// Header values that are not visible ASCII are skipped.
impl From<&HeaderMap> for RequestMetadata {
    fn from(headers: &HeaderMap) -> Self {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str(), value.to_string()))
            })
            .collect()
    }
}

/// Extract the session token presented in request metadata.
///
/// The `authorization` value is expected as `<scheme> <token>`; only the first
/// word after the scheme is taken. A value with no whitespace is taken as the
/// token itself. More than one authorization value is treated as an ambiguous
/// request and rejected rather than picking one.
///
/// # Errors
/// * `Unauthenticated` - Authorization entry is absent, empty or repeated, or
///   nothing follows the scheme
pub fn extract_presented_token(metadata: &RequestMetadata) -> Result<String, TokenError> {
    let value = match metadata.get_all(RequestMetadata::AUTHORIZATION) {
        [value] => value.trim_start(),
        _ => return Err(TokenError::Unauthenticated),
    };

    let token = match value.split_once(char::is_whitespace) {
        Some((_scheme, rest)) => rest.split_whitespace().next(),
        None => Some(value).filter(|token| !token.is_empty()),
    };

    token
        .map(str::to_string)
        .ok_or(TokenError::Unauthenticated)
}
