//! TVMaze API response types.

use serde::Deserialize;

/// One entry of a `search/shows` response.
///
/// The API wraps each show record together with a relevance score;
/// response order is the server-supplied relevance order and is
/// preserved as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEntry {
    /// Relevance score for the query.
    pub score: Option<f64>,
    /// The show record itself.
    pub show: ShowRecord,
}

/// A single show record from the catalog.
///
/// Only `id` and `name` are guaranteed by the API; everything else is
/// nullable and must degrade to an absent rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowRecord {
    /// Unique, stable show identifier.
    pub id: u64,
    /// Show name.
    pub name: String,
    /// Public page URL on the catalog site.
    pub url: Option<String>,
    /// Production status (e.g. "Running", "Ended").
    pub status: Option<String>,
    /// Premiere date (YYYY-MM-DD or null).
    pub premiered: Option<String>,
    /// Genre labels.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Aggregate rating.
    pub rating: Option<Rating>,
    /// Poster image references, both resolutions optional.
    pub image: Option<ShowImage>,
    /// Summary text; may contain inline HTML markup.
    pub summary: Option<String>,
}

/// Aggregate rating block.
#[derive(Debug, Clone, Deserialize)]
pub struct Rating {
    /// Average user rating (null when unrated).
    pub average: Option<f64>,
}

/// Poster image references for a show.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowImage {
    /// Thumbnail-resolution URL.
    pub medium: Option<String>,
    /// Full-resolution URL.
    pub original: Option<String>,
}

/// Error body returned by the API for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogErrorResponse {
    /// Error name (e.g. "Not Found").
    pub name: String,
    /// Human-readable message.
    pub message: Option<String>,
    /// HTTP status echoed in the body.
    pub status: Option<u16>,
    /// API-specific error code.
    pub code: Option<u32>,
}
