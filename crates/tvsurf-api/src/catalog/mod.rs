//! TVMaze catalog API client.
//!
//! The catalog exposes a single read-only operation consumed here:
//! `GET search/shows?q=<query>`, returning an ordered list of wrapper
//! entries each carrying one show record.

mod api;
mod client;
/// Summary text sanitization helpers.
pub mod text;
mod types;

pub use api::{CatalogApi, LocalCatalogApi};
pub use client::{CatalogClient, CatalogClientBuilder};
pub use types::{CatalogErrorResponse, Rating, SearchEntry, ShowImage, ShowRecord};
