//! Site content: typed models, rich-text handling and page metadata.

mod models;
mod page_meta;
mod rich_text;

pub use models::{Center, College, Event, NewsArticle, Partner, StaffMember};
pub use page_meta::PageMeta;
pub use rich_text::{escape_html, plain_text, sanitize_html, sanitize_value, RichTextPolicy};
