//! Read-only access to the site's REST backend.
//!
//! A [`RequestDescriptor`] names one GET request. A [`Fetcher`] executes it
//! and returns the JSON body; [`decode`] turns that body into a typed value,
//! treating an application-level error marker as a failure.

mod descriptor;
mod endpoints;
mod error;
mod fetcher;
mod page;

pub use descriptor::RequestDescriptor;
pub use endpoints::{Collection, SiteApi, UnknownCollection};
pub use error::{application_error, ErrorKind, FetchError, FetchFailure};
pub use fetcher::{decode, Fetcher, HttpFetcher};
pub use page::Page;
