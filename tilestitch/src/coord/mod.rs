//! Chunk coordinate types
//!
//! Provides the grid coordinate vocabulary used throughout the crate: a
//! [`Chunk`] addresses one fixed-size tile by (column, row), and a
//! [`ChunkRange`] spans an inclusive rectangle of chunks.

mod types;

pub use types::{Chunk, ChunkRange, ChunkRangeIter};
