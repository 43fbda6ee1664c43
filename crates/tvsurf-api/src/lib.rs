//! API client library for tvsurf.
//!
//! Provides a client for the TVMaze show directory API.

/// TVMaze catalog API client.
pub mod catalog;
