//! Context window accounting
//!
//! This module estimates the token cost of a transcript, applies a safety
//! margin, detects proximity to a context-window limit, and selects a
//! recency-biased subset of history that fits a token budget.

mod config;
mod estimator;
mod manager;
mod pruner;

pub use config::{
    ContextConfig, DEFAULT_CHARS_PER_TOKEN, DEFAULT_LIMIT_THRESHOLD, DEFAULT_MAX_CONTEXT_TOKENS,
    DEFAULT_SAFETY_MARGIN_RATIO, DEFAULT_SAFETY_MARGIN_TOKENS, DEFAULT_TOOL_CALL_OVERHEAD,
    DEFAULT_TOOL_OUTPUT_OVERHEAD, DEFAULT_TRIM_BUDGET_FRACTION,
};
pub use estimator::TokenEstimator;
pub use manager::{ContextManager, ContextUsageStats};
pub use pruner::{PruneResult, TranscriptPruner};
