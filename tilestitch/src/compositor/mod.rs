//! Range driving and image assembly.
//!
//! The [`GridCompositor`] walks a [`ChunkRange`] in column-major order,
//! fetching one chunk at a time, then stitches every retrieved tile onto a
//! transparent canvas covering the full requested grid. Chunks that could
//! not be obtained leave their region transparent.
//!
//! Fetching is strictly sequential with a fixed pacing delay after every
//! request that actually hit the network. This is deliberate
//! self-throttling against the backend, not a throughput ceiling to be
//! optimized away.

use std::time::Duration;

use image::{imageops, RgbaImage};
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::DiskCache;
use crate::config::StitchConfig;
use crate::coord::ChunkRange;
use crate::fetcher::{ChunkFetcher, FetchResult};
use crate::provider::{AsyncHttpClient, HttpError, ReqwestClient, TileEndpoint};

/// Edge length of one square tile, in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 1_000;

/// Default delay between consecutive network requests (500ms).
pub const DEFAULT_PACING_MS: u64 = 500;

/// Errors from composing fetched tiles into one image.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// There are no results to compose an image from.
    #[error("cannot compose an image from an empty result set")]
    EmptyRange,
}

/// Drives per-chunk fetches over a range and assembles the composite.
pub struct GridCompositor<C: AsyncHttpClient> {
    fetcher: ChunkFetcher<C>,
    tile_size: u32,
    pacing: Duration,
}

impl GridCompositor<ReqwestClient> {
    /// Wires up a compositor from a [`StitchConfig`].
    ///
    /// The per-attempt timeout from the fetch policy becomes the HTTP
    /// client's request deadline, so a slow attempt is cancelled rather
    /// than raced against a timer.
    pub fn from_config(config: &StitchConfig) -> Result<Self, HttpError> {
        let client = ReqwestClient::with_timeout(config.fetch_policy.attempt_timeout)?;
        let fetcher = ChunkFetcher::with_policy(
            client,
            TileEndpoint::new(&config.backend_url),
            DiskCache::new(&config.cache_dir),
            config.fetch_policy.clone(),
        );

        Ok(Self::new(fetcher)
            .with_tile_size(config.tile_size)
            .with_pacing(config.pacing))
    }
}

impl<C: AsyncHttpClient> GridCompositor<C> {
    /// Creates a compositor with the reference tile size and pacing.
    pub fn new(fetcher: ChunkFetcher<C>) -> Self {
        Self {
            fetcher,
            tile_size: DEFAULT_TILE_SIZE,
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }

    /// The underlying chunk fetcher.
    pub fn fetcher(&self) -> &ChunkFetcher<C> {
        &self.fetcher
    }

    /// Sets the tile edge length in pixels.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Sets the inter-request pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Fetches every chunk in the range, sequentially.
    ///
    /// Returns one [`FetchResult`] per requested coordinate in column-major
    /// enumeration order, missing chunks included. After each result that
    /// did not come from cache, the pacing delay is slept before moving on;
    /// cache hits proceed immediately.
    pub async fn fetch_range(&self, range: ChunkRange, force_refresh: bool) -> Vec<FetchResult> {
        let total = range.len();
        info!(total, force_refresh, "fetching chunk range");

        let mut results = Vec::with_capacity(total);
        for chunk in range {
            let result = self.fetcher.fetch(chunk, force_refresh).await;
            let paced = !result.from_cache();
            results.push(result);
            info!(progress = results.len(), total, "chunk progress");

            if paced {
                tokio::time::sleep(self.pacing).await;
            }
        }

        info!(total, "fetched all chunks");
        results
    }

    /// Stitches fetched tiles into a single RGBA image.
    ///
    /// The canvas covers the bounding rectangle of *all* result
    /// coordinates, present or missing, so a partially failed grid still
    /// produces a full-size image. Each present tile is overlaid at its
    /// grid offset relative to the minimum column and row; missing or
    /// undecodable tiles leave their region transparent.
    pub fn compose(&self, results: &[FetchResult]) -> Result<RgbaImage, ComposeError> {
        let first = results.first().ok_or(ComposeError::EmptyRange)?.chunk;

        let (mut min_col, mut max_col) = (first.col, first.col);
        let (mut min_row, mut max_row) = (first.row, first.row);
        for result in results {
            min_col = min_col.min(result.chunk.col);
            max_col = max_col.max(result.chunk.col);
            min_row = min_row.min(result.chunk.row);
            max_row = max_row.max(result.chunk.row);
        }

        let width = (max_col - min_col + 1) * self.tile_size;
        let height = (max_row - min_row + 1) * self.tile_size;
        // Zeroed RGBA is fully transparent.
        let mut canvas = RgbaImage::new(width, height);

        for result in results {
            let Some(bytes) = result.bytes() else {
                continue;
            };
            let tile = match image::load_from_memory(bytes) {
                Ok(tile) => tile.into_rgba8(),
                Err(e) => {
                    warn!(chunk = %result.chunk, error = %e, "skipping undecodable tile");
                    continue;
                }
            };

            let x = ((result.chunk.col - min_col) * self.tile_size) as i64;
            let y = ((result.chunk.row - min_row) * self.tile_size) as i64;
            imageops::overlay(&mut canvas, &tile, x, y);
        }

        Ok(canvas)
    }

    /// Fetches a range and composes the result in one step.
    pub async fn stitch(
        &self,
        range: ChunkRange,
        force_refresh: bool,
    ) -> Result<RgbaImage, ComposeError> {
        let results = self.fetch_range(range, force_refresh).await;
        self.compose(&results)
    }
}
