//! Rewrite results and per-chunk outcomes.

use crate::generation::GenerationError;
use serde::Serialize;

/// Outcome of rewriting one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    /// Rewritten text for the chunk.
    Rewritten(String),
    /// The chunk could not be rewritten.
    Failed(GenerationError),
}

impl ChunkOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkOutcome::Failed(_))
    }
}

/// Outcome of one chunk together with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    /// 1-based chunk position.
    pub position: usize,
    /// Number of generation attempts made.
    pub attempts: u32,
    pub outcome: ChunkOutcome,
}

/// How a rewrite run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteStatus {
    /// Every chunk was attempted.
    Completed,
    /// Stopped by the caller between chunks.
    Cancelled,
    /// Stopped at a failed chunk under the abort policy.
    Aborted,
}

impl std::fmt::Display for RewriteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewriteStatus::Completed => write!(f, "completed"),
            RewriteStatus::Cancelled => write!(f, "cancelled"),
            RewriteStatus::Aborted => write!(f, "aborted"),
        }
    }
}

/// Ordered per-chunk outcomes of a rewrite run.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    /// Outcomes in chunk order, one per attempted chunk.
    pub chunks: Vec<ChunkResult>,
    /// Number of chunks the source text was split into.
    pub total_chunks: usize,
    pub status: RewriteStatus,
}

impl RewriteResult {
    /// Result of rewriting empty input.
    pub fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            total_chunks: 0,
            status: RewriteStatus::Completed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Positions of chunks that failed.
    pub fn failed_positions(&self) -> Vec<usize> {
        self.chunks
            .iter()
            .filter(|c| c.outcome.is_failed())
            .map(|c| c.position)
            .collect()
    }

    /// True when every chunk was attempted and none failed.
    pub fn is_complete(&self) -> bool {
        self.status == RewriteStatus::Completed
            && self.chunks.len() == self.total_chunks
            && self.failed_positions().is_empty()
    }

    /// Final text: outcomes joined by newlines, failed chunks marked in place.
    pub fn text(&self) -> String {
        self.chunks
            .iter()
            .map(|c| match &c.outcome {
                ChunkOutcome::Rewritten(text) => text.clone(),
                ChunkOutcome::Failed(err) => {
                    format!("[section {} could not be rewritten: {}]", c.position, err)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line summary for display.
    pub fn summary(&self) -> String {
        let failed = self.failed_positions();
        let mut line = format!(
            "{} of {} chunks rewritten",
            self.chunks.len() - failed.len(),
            self.total_chunks
        );
        if !failed.is_empty() {
            let list: Vec<String> = failed.iter().map(|p| p.to_string()).collect();
            line.push_str(&format!("; failed: {}", list.join(", ")));
        }
        if self.status != RewriteStatus::Completed {
            line.push_str(&format!(" ({})", self.status));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(position: usize, text: &str) -> ChunkResult {
        ChunkResult {
            position,
            attempts: 1,
            outcome: ChunkOutcome::Rewritten(text.to_string()),
        }
    }

    #[test]
    fn test_text_joins_with_newlines() {
        let result = RewriteResult {
            chunks: vec![rewritten(1, "a"), rewritten(2, "b")],
            total_chunks: 2,
            status: RewriteStatus::Completed,
        };
        assert_eq!(result.text(), "a\nb");
        assert!(result.is_complete());
        assert_eq!(result.summary(), "2 of 2 chunks rewritten");
    }

    #[test]
    fn test_failed_chunk_is_marked() {
        let result = RewriteResult {
            chunks: vec![
                rewritten(1, "a"),
                ChunkResult {
                    position: 2,
                    attempts: 3,
                    outcome: ChunkOutcome::Failed(GenerationError::Fatal("boom".into())),
                },
            ],
            total_chunks: 3,
            status: RewriteStatus::Aborted,
        };
        assert_eq!(result.failed_positions(), vec![2]);
        assert_eq!(result.text(), "a\n[section 2 could not be rewritten: boom]");
        assert!(!result.is_complete());
        assert_eq!(result.summary(), "1 of 3 chunks rewritten; failed: 2 (aborted)");
    }

    #[test]
    fn test_empty() {
        let result = RewriteResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.text(), "");
        assert!(result.is_complete());
    }
}
