//! Content API access
//!
//! A small client for a Prismic-style REST API: resolve the master ref,
//! run a search query, follow `next_page` cursors.

mod client;
mod document;
mod error;
mod query;

use std::future::Future;

pub use client::{is_same_origin, ContentClient};
pub use document::{ApiInfo, ApiResponse, Document, DocumentData, Ref};
pub use error::Error;
pub use query::Query;

/// Anything that can answer content queries
///
/// [`ContentClient`] talks to the real API; tests substitute in-memory sources.
pub trait ContentSource {
    /// Run a search query and return the first page of results
    fn query(&self, query: &Query) -> impl Future<Output = Result<ApiResponse, Error>> + Send;

    /// Fetch a page by the cursor URL the API handed out
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<ApiResponse, Error>> + Send;

    /// Look up a single document by its uid
    fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> impl Future<Output = Result<Option<Document>, Error>> + Send;
}
