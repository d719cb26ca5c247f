//! Client core for the university website.
//!
//! Pages read localized content from a REST backend through two reusable
//! primitives: [`resource::Resource`] for single reads and
//! [`paginate::PaginatedList`] for "load more" collections.

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod locale;
pub mod logging;
pub mod mvi;
pub mod paginate;
pub mod resource;
