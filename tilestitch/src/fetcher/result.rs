//! Fetch result types.

use crate::coord::Chunk;

/// How a chunk's bytes were (or were not) obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Bytes served from the disk cache; no network call was made.
    Cached(Vec<u8>),
    /// Bytes downloaded from the backend on this call.
    Downloaded(Vec<u8>),
    /// The retry budget was exhausted without a successful response.
    Missing,
}

/// The outcome of one chunk fetch, tagged with its coordinate.
///
/// A result is produced for every requested coordinate, present or not,
/// so the compositor can size its canvas from the full requested grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResult {
    /// The coordinate this result belongs to.
    pub chunk: Chunk,
    /// How the bytes were obtained.
    pub outcome: FetchOutcome,
}

impl FetchResult {
    pub(crate) fn cached(chunk: Chunk, bytes: Vec<u8>) -> Self {
        Self {
            chunk,
            outcome: FetchOutcome::Cached(bytes),
        }
    }

    pub(crate) fn downloaded(chunk: Chunk, bytes: Vec<u8>) -> Self {
        Self {
            chunk,
            outcome: FetchOutcome::Downloaded(bytes),
        }
    }

    pub(crate) fn missing(chunk: Chunk) -> Self {
        Self {
            chunk,
            outcome: FetchOutcome::Missing,
        }
    }

    /// The tile bytes, if the chunk was obtained.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.outcome {
            FetchOutcome::Cached(bytes) | FetchOutcome::Downloaded(bytes) => Some(bytes),
            FetchOutcome::Missing => None,
        }
    }

    /// True if the bytes came from the disk cache.
    ///
    /// Drives request pacing: only non-cached results are followed by the
    /// inter-request delay, since a cache hit put no load on the backend.
    pub fn from_cache(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Cached(_))
    }
}
