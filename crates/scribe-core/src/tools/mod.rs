//! Uniform tool call interface
//!
//! Every adapter tool speaks the same contract: validate arguments, perform
//! the operation, and map the outcome (success or failure) into a structured
//! result with a status flag and a human-readable message. Errors never cross
//! the tool boundary as panics or raw error values.

pub mod base;
pub mod executor;
pub mod registry;
pub mod types;

pub use base::{Tool, ToolError};
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
