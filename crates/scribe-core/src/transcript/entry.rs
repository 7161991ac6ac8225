//! Transcript entry and content segment types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A piece of content within a transcript entry
///
/// Unrecognized segment kinds deserialize to `Unknown` instead of failing,
/// so a transcript written by a newer producer can still be accounted for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSegment {
    /// Plain text content
    Text { text: String },
    /// Structured content, sized by its compact JSON form
    Structured { value: Value },
    /// Unrecognized segment kind; costs zero tokens
    #[serde(other)]
    Unknown,
}

impl ContentSegment {
    /// Create a text segment
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a structured segment
    pub fn structured(value: Value) -> Self {
        Self::Structured { value }
    }
}

/// A single tool invocation recorded in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the invoked tool
    pub name: String,
    /// Arguments payload passed to the tool
    pub arguments: Value,
}

impl ToolInvocation {
    /// Create a new tool invocation
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// One unit of the transcript
///
/// Exactly one variant is active at a time. Unrecognized entry kinds
/// deserialize to `Unknown`, which the estimator treats as zero cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    /// System-level guidance
    Instructions { segments: Vec<ContentSegment> },
    /// User input
    Prompt { segments: Vec<ContentSegment> },
    /// Model output
    Response { segments: Vec<ContentSegment> },
    /// One or more tool invocations issued by the model
    ToolCalls { calls: Vec<ToolInvocation> },
    /// Result returned by a tool
    ToolOutput { segments: Vec<ContentSegment> },
    /// Unrecognized entry kind; costs zero tokens
    #[serde(other)]
    Unknown,
}

impl TranscriptEntry {
    /// Create an instructions entry from plain text
    pub fn instructions(text: impl Into<String>) -> Self {
        Self::Instructions {
            segments: vec![ContentSegment::text(text)],
        }
    }

    /// Create a prompt entry from plain text
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::Prompt {
            segments: vec![ContentSegment::text(text)],
        }
    }

    /// Create a response entry from plain text
    pub fn response(text: impl Into<String>) -> Self {
        Self::Response {
            segments: vec![ContentSegment::text(text)],
        }
    }

    /// Create a tool calls entry
    pub fn tool_calls(calls: Vec<ToolInvocation>) -> Self {
        Self::ToolCalls { calls }
    }

    /// Create a tool output entry from plain text
    pub fn tool_output(text: impl Into<String>) -> Self {
        Self::ToolOutput {
            segments: vec![ContentSegment::text(text)],
        }
    }

    /// Whether this entry is an instructions entry
    pub fn is_instructions(&self) -> bool {
        matches!(self, Self::Instructions { .. })
    }

    /// The content segments of this entry, if it carries any
    pub fn segments(&self) -> Option<&[ContentSegment]> {
        match self {
            Self::Instructions { segments }
            | Self::Prompt { segments }
            | Self::Response { segments }
            | Self::ToolOutput { segments } => Some(segments),
            Self::ToolCalls { .. } | Self::Unknown => None,
        }
    }

    /// Short name of the entry kind, for logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Instructions { .. } => "instructions",
            Self::Prompt { .. } => "prompt",
            Self::Response { .. } => "response",
            Self::ToolCalls { .. } => "tool_calls",
            Self::ToolOutput { .. } => "tool_output",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_constructors() {
        let entry = TranscriptEntry::prompt("hello");
        assert_eq!(entry.kind_name(), "prompt");
        assert_eq!(entry.segments().unwrap().len(), 1);
        assert!(!entry.is_instructions());

        let entry = TranscriptEntry::instructions("be helpful");
        assert!(entry.is_instructions());
    }

    #[test]
    fn test_tool_calls_have_no_segments() {
        let entry = TranscriptEntry::tool_calls(vec![ToolInvocation::new(
            "weather",
            json!({"city": "Oslo"}),
        )]);
        assert!(entry.segments().is_none());
    }

    #[test]
    fn test_entry_round_trip() {
        let entry = TranscriptEntry::Response {
            segments: vec![
                ContentSegment::text("done"),
                ContentSegment::structured(json!({"ok": true})),
            ],
        };
        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: TranscriptEntry = serde_json::from_str(&encoded).unwrap();
        assert_eq!(entry, decoded);
    }

    #[test]
    fn test_unknown_entry_kind_tolerated() {
        let decoded: TranscriptEntry =
            serde_json::from_str(r#"{"kind": "hologram", "frames": 3}"#).unwrap();
        assert_eq!(decoded, TranscriptEntry::Unknown);
    }

    #[test]
    fn test_unknown_segment_kind_tolerated() {
        let decoded: ContentSegment =
            serde_json::from_str(r#"{"type": "audio", "samples": []}"#).unwrap();
        assert_eq!(decoded, ContentSegment::Unknown);
    }
}
