//! Tool executor
//!
//! Resolves tool calls against a registry and runs them under their timeout.
//! The executor always returns a [`ToolResult`]: unknown tools, validation
//! failures, execution errors, and timeouts all become error results with a
//! descriptive message.

use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolCall, ToolResult};

/// Executes tool calls against a registry
#[derive(Default)]
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    /// Create an executor with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor from a registry
    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for registration
    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    /// Execute a single tool call
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.registry.get(&call.name) else {
            tracing::debug!(tool = %call.name, "tool not found");
            return ToolResult::error(
                &call.id,
                &call.name,
                format!("Tool not found: {}", call.name),
            );
        };

        match tool.max_execution_duration() {
            Some(limit) => {
                match tokio::time::timeout(limit, tool.execute_with_timing(call)).await {
                    Ok(result) => result,
                    Err(_) => ToolResult::error(
                        &call.id,
                        &call.name,
                        format!("Tool execution timed out after {}s", limit.as_secs()),
                    ),
                }
            }
            None => tool.execute_with_timing(call).await,
        }
    }

    /// Execute a batch of tool calls sequentially, in order
    pub async fn execute_all(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.execute(call).await);
        }
        results
    }
}
