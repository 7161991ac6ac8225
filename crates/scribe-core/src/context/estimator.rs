//! Token estimation for transcript entries
//!
//! Exact tokenization varies by model, so costs are approximated from
//! character counts with a fixed characters-per-token ratio plus flat
//! per-kind overheads for tool call framing. The approximation is policy;
//! no real tokenizer is consulted.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ScribeError, ScribeResult};
use crate::transcript::{ContentSegment, Transcript, TranscriptEntry};

use super::config::ContextConfig;

/// Token estimator for transcript content
#[derive(Debug, Clone)]
pub struct TokenEstimator {
    /// Characters per token (average)
    chars_per_token: f32,
    /// Overhead tokens per tool call
    tool_call_overhead: usize,
    /// Overhead tokens per tool output entry
    tool_output_overhead: usize,
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::from_config(&ContextConfig::default())
    }
}

impl TokenEstimator {
    /// Create an estimator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator from a context configuration
    pub fn from_config(config: &ContextConfig) -> Self {
        Self {
            chars_per_token: config.chars_per_token,
            tool_call_overhead: config.tool_call_overhead,
            tool_output_overhead: config.tool_output_overhead,
        }
    }

    /// Estimate tokens for a string
    ///
    /// Empty input costs zero; any non-empty string costs at least one token,
    /// so short strings are never rounded away.
    pub fn estimate_text(&self, text: &str) -> usize {
        let chars = text.chars().count();
        if chars == 0 {
            return 0;
        }
        ((chars as f32 / self.chars_per_token).ceil() as usize).max(1)
    }

    /// Estimate tokens for an already-parsed JSON value
    ///
    /// Sizes the value by its compact JSON rendering, which cannot fail.
    pub fn estimate_value(&self, value: &Value) -> usize {
        self.estimate_text(&value.to_string())
    }

    /// Estimate tokens for any serializable payload
    ///
    /// Serializes to compact JSON first. A serialization failure is surfaced
    /// to the caller rather than reported as zero cost; the caller decides
    /// whether to fall back or abort accounting.
    pub fn estimate_json<T: Serialize>(&self, payload: &T) -> ScribeResult<usize> {
        let rendered = serde_json::to_string(payload).map_err(ScribeError::from)?;
        Ok(self.estimate_text(&rendered))
    }

    /// Estimate tokens for a content segment
    pub fn estimate_segment(&self, segment: &ContentSegment) -> usize {
        match segment {
            ContentSegment::Text { text } => self.estimate_text(text),
            ContentSegment::Structured { value } => self.estimate_value(value),
            ContentSegment::Unknown => 0,
        }
    }

    /// Estimate tokens for a single transcript entry
    ///
    /// Unknown entry kinds cost zero rather than erroring, so an entry
    /// written by a newer producer never halts accounting.
    pub fn estimate_entry(&self, entry: &TranscriptEntry) -> usize {
        match entry {
            TranscriptEntry::Instructions { segments }
            | TranscriptEntry::Prompt { segments }
            | TranscriptEntry::Response { segments } => self.estimate_segments(segments),
            TranscriptEntry::ToolCalls { calls } => calls
                .iter()
                .map(|call| {
                    self.estimate_text(&call.name)
                        + self.estimate_value(&call.arguments)
                        + self.tool_call_overhead
                })
                .sum(),
            TranscriptEntry::ToolOutput { segments } => {
                self.estimate_segments(segments) + self.tool_output_overhead
            }
            TranscriptEntry::Unknown => 0,
        }
    }

    /// Estimate tokens for an entire transcript
    pub fn estimate_transcript(&self, transcript: &Transcript) -> usize {
        transcript.iter().map(|e| self.estimate_entry(e)).sum()
    }

    fn estimate_segments(&self, segments: &[ContentSegment]) -> usize {
        segments.iter().map(|s| self.estimate_segment(s)).sum()
    }
}
