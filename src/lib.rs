//! Scribe umbrella crate
//!
//! Re-exports the core transcript budgeting library and the bundled
//! adapter tools so downstream users can depend on a single crate.

pub use scribe_core::context::{ContextConfig, ContextManager, ContextUsageStats, TokenEstimator};
pub use scribe_core::error::{ScribeError, ScribeResult};
pub use scribe_core::session::{CompactReport, Session};
pub use scribe_core::tools::{Tool, ToolCall, ToolExecutor, ToolRegistry, ToolResult};
pub use scribe_core::transcript::{ContentSegment, ToolInvocation, Transcript, TranscriptEntry};

pub use scribe_tools::default_tools;
