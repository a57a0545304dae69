//! Tile server access.
//!
//! This module provides the HTTP client abstraction used by the fetcher and
//! the URL scheme of the remote tile endpoint. The [`AsyncHttpClient`]
//! trait exists so the retry logic can be exercised against scripted mock
//! responses in tests.

mod endpoint;
mod http;

pub use endpoint::{TileEndpoint, DEFAULT_BACKEND_URL};
pub use http::{AsyncHttpClient, HttpError, HttpResponse, ReqwestClient};

#[cfg(test)]
pub use http::tests::MockHttpClient;
