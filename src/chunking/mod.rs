//! Text chunking for the rewrite pipeline.
//!
//! Splits long source text into word-safe chunks small enough for a single generation call.

mod words;

pub use words::split_into_chunks;

use serde::{Deserialize, Serialize};

/// A bounded-length fragment of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 1-based position of this chunk in the source.
    pub position: usize,
    /// Text content of this chunk.
    pub content: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(position: usize, content: String) -> Self {
        Self { position, content }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Rejoin chunks into their word sequence.
pub fn join_chunks(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
