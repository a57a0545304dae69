//! Per-chunk retrieval engine.
//!
//! The [`ChunkFetcher`] resolves one chunk coordinate to image bytes:
//! cache first, then the network with a bounded retry loop. Failures are
//! never fatal for the batch - a chunk that cannot be retrieved within the
//! attempt budget yields [`FetchOutcome::Missing`] and the caller moves on.
//!
//! # Retry policy
//!
//! Each network attempt races against a per-attempt deadline enforced by
//! the HTTP client. Timeouts, transport errors, and non-2xx statuses all
//! consume one attempt; HTTP 429 additionally sleeps an extended backoff
//! before the next attempt so the fetcher self-throttles against a
//! rate-limiting server.

mod policy;
mod result;

pub use policy::FetchPolicy;
pub use result::{FetchOutcome, FetchResult};

use tracing::{debug, info, warn};

use crate::cache::DiskCache;
use crate::coord::Chunk;
use crate::provider::{AsyncHttpClient, HttpError, TileEndpoint};

/// Status code the backend uses to signal rate limiting.
const STATUS_RATE_LIMITED: u16 = 429;

/// Fetches individual chunks, cache-first with bounded network retries.
///
/// The fetcher holds no per-coordinate state, so a single instance is
/// safely reused across an arbitrary number of sequential `fetch` calls.
pub struct ChunkFetcher<C: AsyncHttpClient> {
    http_client: C,
    endpoint: TileEndpoint,
    cache: DiskCache,
    policy: FetchPolicy,
}

impl<C: AsyncHttpClient> ChunkFetcher<C> {
    /// Creates a fetcher with the default retry policy.
    pub fn new(http_client: C, endpoint: TileEndpoint, cache: DiskCache) -> Self {
        Self::with_policy(http_client, endpoint, cache, FetchPolicy::default())
    }

    /// Creates a fetcher with an explicit retry policy.
    pub fn with_policy(
        http_client: C,
        endpoint: TileEndpoint,
        cache: DiskCache,
        policy: FetchPolicy,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            cache,
            policy,
        }
    }

    /// The retry policy in effect.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &C {
        &self.http_client
    }

    /// The disk cache backing this fetcher.
    pub fn cache(&self) -> &DiskCache {
        &self.cache
    }

    /// Resolves one chunk to bytes, or to absence.
    ///
    /// With `force_refresh` unset, a cache hit returns immediately with no
    /// network traffic. Otherwise the chunk is requested from the backend
    /// up to [`FetchPolicy::max_attempts`] times; the first successful
    /// response is written through to the cache. Exhausting the budget is
    /// not an error - it yields [`FetchOutcome::Missing`] for this one
    /// coordinate and the larger batch continues.
    pub async fn fetch(&self, chunk: Chunk, force_refresh: bool) -> FetchResult {
        if !force_refresh && self.cache.contains(chunk).await {
            debug!(%chunk, "chunk found in cache");
            match self.cache.read(chunk).await {
                Ok(bytes) => return FetchResult::cached(chunk, bytes),
                // A cache entry that vanished or became unreadable between
                // the existence check and the read falls through to the
                // network path.
                Err(e) => warn!(%chunk, error = %e, "cache read failed, fetching from network"),
            }
        }

        let url = self.endpoint.chunk_url(chunk);
        info!(%chunk, %url, "fetching chunk");

        let max = self.policy.max_attempts;
        for attempt in 1..=max {
            match self.http_client.get(&url).await {
                Err(HttpError::Timeout) => {
                    warn!(%chunk, attempt, max, "timeout fetching chunk, retrying");
                }
                Err(HttpError::Transport(e)) => {
                    warn!(%chunk, attempt, max, error = %e, "error fetching chunk, retrying");
                }
                Ok(response) if !response.is_success() => {
                    warn!(
                        %chunk,
                        attempt,
                        max,
                        status = response.status,
                        "unexpected status fetching chunk, retrying"
                    );
                    if response.status == STATUS_RATE_LIMITED {
                        tokio::time::sleep(self.policy.rate_limit_backoff).await;
                    }
                }
                Ok(response) => {
                    let bytes = response.body;
                    info!(%chunk, size = bytes.len(), "fetched chunk");

                    if let Err(e) = self.cache.write(chunk, &bytes).await {
                        // A failed cache write costs a re-download next
                        // run, nothing more.
                        warn!(%chunk, error = %e, "failed to cache chunk");
                    }

                    return FetchResult::downloaded(chunk, bytes);
                }
            }
        }

        warn!(%chunk, max, "giving up on chunk after exhausting attempts");
        FetchResult::missing(chunk)
    }
}
