//! Context accounting configuration
//!
//! All numeric constants here are policy, not derived from any tokenizer.
//! They are named fields so tests and callers can override them.

use serde::{Deserialize, Serialize};

/// Average characters per token assumed by the estimator
pub const DEFAULT_CHARS_PER_TOKEN: f32 = 4.5;

/// Flat token overhead added per tool call (framing/delimiter approximation)
pub const DEFAULT_TOOL_CALL_OVERHEAD: usize = 5;

/// Flat token overhead added once per tool output entry
pub const DEFAULT_TOOL_OUTPUT_OVERHEAD: usize = 3;

/// Fraction of the base estimate added as estimation-error margin
pub const DEFAULT_SAFETY_MARGIN_RATIO: f32 = 0.25;

/// Flat token addend reserved for system overhead
pub const DEFAULT_SAFETY_MARGIN_TOKENS: usize = 100;

/// Fraction of the maximum context at which the limit check trips
pub const DEFAULT_LIMIT_THRESHOLD: f32 = 0.70;

/// Default maximum context window size in tokens
pub const DEFAULT_MAX_CONTEXT_TOKENS: usize = 4096;

/// Fraction of the maximum context used as the trim budget when compacting
pub const DEFAULT_TRIM_BUDGET_FRACTION: f32 = 0.60;

/// Configuration for context window accounting
///
/// `limit_threshold` and `max_context_tokens` are deliberately not validated:
/// a threshold above 1.0 simply raises the trigger point, and a negative
/// threshold floors the limit to zero through the unsigned conversion, making
/// every non-empty transcript count as approaching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Maximum context window size in tokens
    pub max_context_tokens: usize,

    /// Average characters per token
    pub chars_per_token: f32,

    /// Token overhead per tool call
    pub tool_call_overhead: usize,

    /// Token overhead per tool output entry
    pub tool_output_overhead: usize,

    /// Proportional safety margin applied to the base estimate
    pub safety_margin_ratio: f32,

    /// Flat safety margin in tokens
    pub safety_margin_tokens: usize,

    /// Fraction of `max_context_tokens` at which the limit check trips
    pub limit_threshold: f32,

    /// Fraction of `max_context_tokens` used as the compaction budget
    pub trim_budget_fraction: f32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_context_tokens: DEFAULT_MAX_CONTEXT_TOKENS,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            tool_call_overhead: DEFAULT_TOOL_CALL_OVERHEAD,
            tool_output_overhead: DEFAULT_TOOL_OUTPUT_OVERHEAD,
            safety_margin_ratio: DEFAULT_SAFETY_MARGIN_RATIO,
            safety_margin_tokens: DEFAULT_SAFETY_MARGIN_TOKENS,
            limit_threshold: DEFAULT_LIMIT_THRESHOLD,
            trim_budget_fraction: DEFAULT_TRIM_BUDGET_FRACTION,
        }
    }
}

impl ContextConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum context window size
    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_context_tokens = max;
        self
    }

    /// Set the limit threshold fraction
    pub fn with_limit_threshold(mut self, threshold: f32) -> Self {
        self.limit_threshold = threshold;
        self
    }

    /// Set the trim budget fraction
    pub fn with_trim_fraction(mut self, fraction: f32) -> Self {
        self.trim_budget_fraction = fraction;
        self
    }

    /// Set the characters-per-token ratio
    pub fn with_chars_per_token(mut self, ratio: f32) -> Self {
        self.chars_per_token = ratio;
        self
    }

    /// The token count above which the limit check trips
    ///
    /// `floor(max_context_tokens * limit_threshold)`.
    pub fn limit_tokens(&self) -> usize {
        (self.max_context_tokens as f32 * self.limit_threshold).floor() as usize
    }

    /// The token budget used when compacting a transcript
    ///
    /// `floor(max_context_tokens * trim_budget_fraction)`.
    pub fn trim_budget(&self) -> usize {
        (self.max_context_tokens as f32 * self.trim_budget_fraction).floor() as usize
    }
}
