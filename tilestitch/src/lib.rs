//! Tilestitch - grid tile downloader and compositor
//!
//! This library fetches a rectangular range of fixed-size image tiles
//! ("chunks") from a remote tile server, caches each tile on disk, and
//! stitches the results into a single composite RGBA image.
//!
//! # Architecture
//!
//! ```text
//! GridCompositor ──► ChunkFetcher ──► DiskCache (cache-first)
//!                         │
//!                         └─────────► AsyncHttpClient (retry/backoff)
//! ```
//!
//! The compositor enumerates a [`coord::ChunkRange`] in column-major order,
//! drives one [`fetcher::ChunkFetcher::fetch`] call per coordinate, and
//! assembles every successfully retrieved tile onto a transparent canvas
//! sized to cover the full requested grid. Tiles that cannot be obtained
//! leave their region transparent; nothing aborts the batch.

pub mod cache;
pub mod compositor;
pub mod config;
pub mod coord;
pub mod fetcher;
pub mod provider;

pub use cache::{CacheError, DiskCache};
pub use compositor::{ComposeError, GridCompositor};
pub use config::StitchConfig;
pub use coord::{Chunk, ChunkRange};
pub use fetcher::{ChunkFetcher, FetchOutcome, FetchPolicy, FetchResult};
pub use provider::{AsyncHttpClient, HttpError, HttpResponse, ReqwestClient, TileEndpoint};
