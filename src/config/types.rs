use serde::{Deserialize, Serialize};

use crate::content::RichTextPolicy;
use crate::locale::Locale;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub content: ContentConfig,
}

/// REST backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the backend (e.g., "https://api.university.edu.iq").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Header carrying the requested locale.
    #[serde(default = "default_locale_header")]
    pub locale_header: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Default settings for page views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Locale used when none is requested.
    #[serde(default)]
    pub locale: Locale,
    /// Items requested per page by paginated views (default: 9).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Content rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Site name used in page titles.
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// How server-supplied rich text is treated before rendering.
    #[serde(default)]
    pub rich_text: RichTextPolicy,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_locale_header() -> String {
    "website-language".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    9
}

fn default_site_name() -> String {
    "University".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            locale_header: default_locale_header(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            rich_text: RichTextPolicy::default(),
        }
    }
}
