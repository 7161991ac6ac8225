//! Scribe Core Library
//!
//! This crate provides the core functionality for the Scribe agent runtime:
//! the conversational transcript model, token estimation and budget-constrained
//! history selection, session management, and the uniform tool call interface.

pub mod context;
pub mod error;
pub mod session;
pub mod tools;
pub mod transcript;

// Re-export commonly used types
pub use context::{ContextConfig, ContextManager, ContextUsageStats, TokenEstimator};
pub use error::{ScribeError, ScribeResult};
pub use session::{CompactReport, Session};
pub use tools::{Tool, ToolCall, ToolError, ToolExecutor, ToolRegistry, ToolResult};
pub use transcript::{ContentSegment, ToolInvocation, Transcript, TranscriptEntry};
