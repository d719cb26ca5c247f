use crate::locale::{Direction, Locale};

use super::rich_text::plain_text;

const DESCRIPTION_LIMIT: usize = 160;

/// Document-level metadata for one rendered page.
///
/// Built once per render and handed to the layout, instead of views mutating
/// the document title as a side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
    pub locale: Locale,
    pub direction: Direction,
}

impl PageMeta {
    /// `"{page} | {site}"`, or just the site name for the home page.
    pub fn new(site_name: &str, page_title: Option<&str>, locale: Locale) -> Self {
        let title = match page_title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(page) => format!("{} | {}", page, site_name),
            None => site_name.to_string(),
        };
        Self {
            title,
            description: None,
            locale,
            direction: locale.direction(),
        }
    }

    /// Derive the description from rich text, flattened and shortened on a
    /// character boundary.
    pub fn with_description(mut self, html: &str) -> Self {
        let text = plain_text(html);
        if text.is_empty() {
            self.description = None;
            return self;
        }
        self.description = Some(if text.chars().count() > DESCRIPTION_LIMIT {
            let cut: String = text.chars().take(DESCRIPTION_LIMIT - 1).collect();
            format!("{}…", cut.trim_end())
        } else {
            text
        });
        self
    }
}
