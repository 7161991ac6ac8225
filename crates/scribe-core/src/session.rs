//! Conversational session management
//!
//! A session owns a transcript and a context manager. It appends one entry
//! per turn and, before a model call, compacts its history when the safe
//! token estimate approaches the context limit.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::context::{ContextConfig, ContextManager, ContextUsageStats};
use crate::transcript::{ToolInvocation, Transcript, TranscriptEntry};

/// Report of a compaction performed by [`Session::compact_if_needed`]
#[derive(Debug, Clone)]
pub struct CompactReport {
    /// Token budget the transcript was trimmed to
    pub budget: usize,
    /// Base estimate before trimming
    pub before_tokens: usize,
    /// Base estimate after trimming
    pub after_tokens: usize,
    /// Number of entries dropped
    pub removed_count: usize,
}

/// A conversational session owning a transcript
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    transcript: Transcript,
    context: ContextManager,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

impl Session {
    /// Create a new session with the given context configuration
    pub fn new(config: ContextConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            transcript: Transcript::new(),
            context: ContextManager::new(config),
        }
    }

    /// Create a session seeded with an existing transcript
    pub fn with_transcript(config: ContextConfig, transcript: Transcript) -> Self {
        let mut session = Self::new(config);
        session.transcript = transcript;
        session
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Session creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The current transcript snapshot
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The context manager
    pub fn context(&self) -> &ContextManager {
        &self.context
    }

    /// Record system instructions
    pub fn record_instructions(&mut self, text: impl Into<String>) {
        self.push(TranscriptEntry::instructions(text));
    }

    /// Record a user prompt
    pub fn record_prompt(&mut self, text: impl Into<String>) {
        self.push(TranscriptEntry::prompt(text));
    }

    /// Record a model response
    pub fn record_response(&mut self, text: impl Into<String>) {
        self.push(TranscriptEntry::response(text));
    }

    /// Record tool invocations issued by the model
    pub fn record_tool_calls(&mut self, calls: Vec<ToolInvocation>) {
        self.push(TranscriptEntry::tool_calls(calls));
    }

    /// Record a tool's output
    pub fn record_tool_output(&mut self, text: impl Into<String>) {
        self.push(TranscriptEntry::tool_output(text));
    }

    /// Append an arbitrary entry
    pub fn push(&mut self, entry: TranscriptEntry) {
        tracing::debug!(session = %self.id, kind = entry.kind_name(), "transcript append");
        self.transcript.push(entry);
    }

    /// Usage statistics for the current transcript
    pub fn usage(&self) -> ContextUsageStats {
        self.context.usage_stats(&self.transcript)
    }

    /// Compact the transcript if it is approaching the context limit
    ///
    /// Replaces the owned transcript with the budget-constrained selection
    /// and reports what changed. Returns `None` when under the limit.
    pub fn compact_if_needed(&mut self) -> Option<CompactReport> {
        let before_tokens = self.context.estimated_tokens(&self.transcript);
        let result = self.context.trim_if_needed(&self.transcript)?;
        let budget = self.context.config().trim_budget();
        let report = CompactReport {
            budget,
            before_tokens,
            after_tokens: result.kept_tokens,
            removed_count: result.removed_count,
        };
        self.transcript = result.kept;
        tracing::info!(
            session = %self.id,
            before_tokens = report.before_tokens,
            after_tokens = report.after_tokens,
            removed = report.removed_count,
            budget = report.budget,
            "transcript compacted"
        );
        Some(report)
    }
}
