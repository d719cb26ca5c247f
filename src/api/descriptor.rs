use std::collections::BTreeMap;
use std::fmt;

use crate::locale::Locale;

/// Immutable description of one GET request.
///
/// Equal descriptors address the same resource with the same headers, so a
/// view can compare the descriptor it wants against the one it last issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestDescriptor {
    endpoint: String,
    query: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Describe a GET of `path` relative to `base_url`.
    pub fn get(base_url: &str, path: &str) -> Self {
        let endpoint = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self {
            endpoint,
            query: Vec::new(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a query parameter. A repeated key replaces the earlier value.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Add a header. Header names are case-insensitive and stored lowercased.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_locale(self, locale: Locale, header_name: &str) -> Self {
        self.with_header(header_name, locale.header_value())
    }

    /// Add 1-based `page` and `limit` parameters for list endpoints.
    pub fn with_page(self, page: u32, limit: u32) -> Self {
        self.with_query("page", page).with_query("limit", limit)
    }

    /// Append `segment` to the endpoint path as one percent-encoded segment.
    ///
    /// `/`, `?`, `#` and `%` in `segment` cannot change which endpoint is
    /// read. The `.` and `..` segments are skipped by the URL parser, so
    /// callers must reject them first.
    pub fn with_segment(mut self, segment: &str) -> Self {
        match reqwest::Url::parse(&self.endpoint) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(segment);
                }
                self.endpoint = url.into();
            }
            // Stays unresolvable; keep the segment so descriptors still differ.
            Err(_) => {
                self.endpoint.push('/');
                self.endpoint.push_str(segment);
            }
        }
        self
    }

    /// URL without the query string.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Full URL with the encoded query string, or `None` if the endpoint is
    /// not a valid absolute URL.
    pub fn url(&self) -> Option<reqwest::Url> {
        reqwest::Url::parse_with_params(&self.endpoint, &self.query).ok()
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            Some(url) => write!(f, "GET {}", url),
            None => write!(f, "GET {}", self.endpoint),
        }
    }
}
