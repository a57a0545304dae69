//! Top-level configuration.
//!
//! Every constant of the reference behavior is externalized here with its
//! reference value as the default: backend URL, tile size, cache
//! directory, retry budget, per-attempt timeout, rate-limit backoff, and
//! inter-request pacing. Components take the pieces they need; this struct
//! is the single place the CLI (or any embedder) tweaks behavior.

use std::path::PathBuf;
use std::time::Duration;

use crate::compositor::{DEFAULT_PACING_MS, DEFAULT_TILE_SIZE};
use crate::fetcher::FetchPolicy;
use crate::provider::DEFAULT_BACKEND_URL;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = "./cache";

/// Configuration for a stitch run.
///
/// # Example
///
/// ```
/// use tilestitch::StitchConfig;
/// use std::time::Duration;
///
/// let config = StitchConfig::default()
///     .with_cache_dir("/tmp/tiles")
///     .with_pacing(Duration::from_millis(250))
///     .with_force_refresh(true);
/// assert_eq!(config.tile_size, 1000);
/// ```
#[derive(Clone, Debug)]
pub struct StitchConfig {
    /// Base URL of the tile backend.
    pub backend_url: String,
    /// Edge length of one square tile, in pixels.
    pub tile_size: u32,
    /// Directory holding cached tiles.
    pub cache_dir: PathBuf,
    /// Retry policy for individual chunk fetches.
    pub fetch_policy: FetchPolicy,
    /// Delay between consecutive network requests.
    pub pacing: Duration,
    /// Bypass the cache and always hit the network.
    pub force_refresh: bool,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            tile_size: DEFAULT_TILE_SIZE,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            fetch_policy: FetchPolicy::default(),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            force_refresh: false,
        }
    }
}

impl StitchConfig {
    /// Sets the backend base URL.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Sets the tile edge length.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Sets the cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Sets the fetch retry policy.
    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    /// Sets the inter-request pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the force-refresh flag.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }
}
