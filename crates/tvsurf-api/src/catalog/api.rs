//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::SearchEntry;

/// Catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Searches the show directory.
    ///
    /// The query is passed through verbatim; an empty query is delegated
    /// to the service unchanged. Returns entries in server-supplied order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_shows(&self, query: &str) -> Result<Vec<SearchEntry>>;
}
