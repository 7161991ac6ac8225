//! Current date and time tool

use async_trait::async_trait;
use chrono::{Local, Utc};
use scribe_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};

const SUPPORTED_FORMATS: &[&str] = &["rfc3339", "rfc2822", "unix", "human"];

/// Tool reporting the current date and time
#[derive(Debug, Clone, Default)]
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    /// Create a new current time tool
    pub fn new() -> Self {
        Self
    }

    fn render(&self, format: &str) -> Result<String, ToolError> {
        let now = Utc::now();
        match format {
            "rfc3339" => Ok(now.to_rfc3339()),
            "rfc2822" => Ok(now.to_rfc2822()),
            "unix" => Ok(now.timestamp().to_string()),
            "human" => Ok(format!(
                "{} UTC (local: {})",
                now.format("%A, %B %-d %Y, %H:%M:%S"),
                Local::now().format("%H:%M:%S %Z")
            )),
            other => Err(ToolError::InvalidArguments(format!(
                "Unsupported format '{}', expected one of: {}",
                other,
                SUPPORTED_FORMATS.join(", ")
            ))),
        }
    }
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time. Use when the user asks about today's date, the current time, or needs a timestamp."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::optional_string(
                "format",
                "Output format: rfc3339 (default), rfc2822, unix, or human",
            )],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        if let Some(format) = call.get_string("format") {
            if !SUPPORTED_FORMATS.contains(&format.as_str()) {
                return Err(ToolError::InvalidArguments(format!(
                    "Unsupported format '{}'",
                    format
                )));
            }
        }
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let format = call
            .get_string("format")
            .unwrap_or_else(|| "rfc3339".to_string());
        let rendered = self.render(&format)?;
        Ok(ToolResult::success(&call.id, self.name(), rendered)
            .with_metadata("format", format.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn call_with_format(format: &str) -> ToolCall {
        let mut args = HashMap::new();
        args.insert("format".to_string(), json!(format));
        ToolCall::new("c1", "current_time", args)
    }

    #[tokio::test]
    async fn test_default_format_is_rfc3339() {
        let call = ToolCall::new("c1", "current_time", HashMap::new());
        let result = CurrentTimeTool::new().execute(&call).await.unwrap();
        assert!(result.success);
        // RFC 3339 timestamps contain a 'T' date/time separator.
        assert!(result.output.as_deref().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_unix_format_is_numeric() {
        let result = CurrentTimeTool::new()
            .execute(&call_with_format("unix"))
            .await
            .unwrap();
        let output = result.output.unwrap();
        assert!(output.parse::<i64>().is_ok(), "not numeric: {output}");
    }

    #[test]
    fn test_unsupported_format_rejected_by_validation() {
        let err = CurrentTimeTool::new()
            .validate(&call_with_format("stardate"))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
