//! Base trait for tools

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::ScribeError;
use crate::tools::types::{ToolCall, ToolResult, ToolSchema};

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Tool timeout
    #[error("Tool execution timeout")]
    Timeout,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<ToolError> for ScribeError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => ScribeError::tool(name, "Tool not found"),
            other => ScribeError::tool("unknown", other.to_string()),
        }
    }
}

/// Base trait for all adapter tools
///
/// A tool is a thin translation layer over a platform or network service:
/// validate arguments, call the service, map the result into a [`ToolResult`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (lowercase with underscores)
    fn name(&self) -> &str;

    /// Description shown to the model so it knows when to use this tool
    fn description(&self) -> &str;

    /// JSON schema for the tool's input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments before execution
    ///
    /// Default implementation accepts everything. Override for custom checks.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Maximum execution time for this tool
    fn max_execution_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(30))
    }

    /// Execute with timing, folding every failure into an error result
    ///
    /// This is the boundary where the uniform convention is enforced: domain
    /// errors become a structured result with a status flag and message, and
    /// never propagate out of the tool layer.
    async fn execute_with_timing(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64);
        }

        match self.execute(call).await {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        }
    }
}
