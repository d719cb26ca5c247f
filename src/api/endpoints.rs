//! Descriptor builders for the site's collections.

use std::fmt;
use std::str::FromStr;

use crate::api::descriptor::RequestDescriptor;
use crate::config::ApiConfig;
use crate::locale::Locale;

/// Collections published by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Colleges,
    Centers,
    Staff,
    News,
    Partners,
    Events,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Colleges,
        Collection::Centers,
        Collection::Staff,
        Collection::News,
        Collection::Partners,
        Collection::Events,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Collection::Colleges => "colleges",
            Collection::Centers => "centers",
            Collection::Staff => "staff",
            Collection::News => "news",
            Collection::Partners => "partners",
            Collection::Events => "events",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown collection '{0}'")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Collection::ALL
            .into_iter()
            .find(|c| c.path() == wanted)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// Builds descriptors against one configured backend.
#[derive(Debug, Clone)]
pub struct SiteApi {
    base_url: String,
    locale_header: String,
}

impl SiteApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            locale_header: config.locale_header.clone(),
        }
    }

    /// Descriptor for one page of a filtered collection.
    pub fn list_page(
        &self,
        collection: Collection,
        locale: Locale,
        filters: &[(String, String)],
        page: u32,
        limit: u32,
    ) -> RequestDescriptor {
        filters
            .iter()
            .fold(
                RequestDescriptor::get(&self.base_url, collection.path()),
                |d, (key, value)| d.with_query(key.clone(), value),
            )
            .with_page(page, limit)
            .with_locale(locale, &self.locale_header)
    }

    /// Descriptor factory for a paginated view over `collection`.
    pub fn list_factory(
        &self,
        collection: Collection,
        locale: Locale,
        filters: Vec<(String, String)>,
    ) -> impl Fn(u32, u32) -> RequestDescriptor + Send + 'static {
        let api = self.clone();
        move |page, limit| api.list_page(collection, locale, &filters, page, limit)
    }

    /// Descriptor for a single resource; the body is the object itself.
    ///
    /// `id` usually arrives from user input and is sent as one encoded path
    /// segment. Returns `None` (nothing to fetch) for an empty id or a dot
    /// segment.
    pub fn item(
        &self,
        collection: Collection,
        id: &str,
        locale: Locale,
    ) -> Option<RequestDescriptor> {
        let id = id.trim();
        if matches!(id, "" | "." | "..") {
            return None;
        }
        Some(
            RequestDescriptor::get(&self.base_url, collection.path())
                .with_segment(id)
                .with_locale(locale, &self.locale_header),
        )
    }
}
