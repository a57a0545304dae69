//! Tile server URL scheme.

use crate::coord::Chunk;

/// Default backend serving the global tile grid.
pub const DEFAULT_BACKEND_URL: &str = "https://backend.wplace.live";

/// Builds chunk URLs for a tile backend.
///
/// The backend serves one PNG per grid coordinate under
/// `{base}/files/s0/tiles/{col}/{row}.png`. No authentication is required.
///
/// # Example
///
/// ```
/// use tilestitch::provider::TileEndpoint;
/// use tilestitch::coord::Chunk;
///
/// let endpoint = TileEndpoint::new("https://backend.wplace.live");
/// assert_eq!(
///     endpoint.chunk_url(Chunk::new(1126, 695)),
///     "https://backend.wplace.live/files/s0/tiles/1126/695.png"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TileEndpoint {
    base_url: String,
}

impl TileEndpoint {
    /// Creates an endpoint for the given base URL.
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The configured base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the tile image for a chunk coordinate.
    pub fn chunk_url(&self, chunk: Chunk) -> String {
        format!(
            "{}/files/s0/tiles/{}/{}.png",
            self.base_url, chunk.col, chunk.row
        )
    }
}

impl Default for TileEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
