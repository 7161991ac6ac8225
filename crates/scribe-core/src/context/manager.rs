//! Context window manager
//!
//! Orchestrates token estimation, safety-margin accounting, limit detection,
//! and budget-constrained trimming over a transcript snapshot. Every method
//! is read-only over the transcript; trimming returns a new transcript.

use crate::transcript::Transcript;

use super::config::ContextConfig;
use super::estimator::TokenEstimator;
use super::pruner::{PruneResult, TranscriptPruner};

/// Context usage statistics for a transcript snapshot
#[derive(Debug, Clone)]
pub struct ContextUsageStats {
    /// Base estimated token count
    pub current_tokens: usize,
    /// Safety-padded estimate
    pub safe_tokens: usize,
    /// Configured maximum context size
    pub max_tokens: usize,
    /// Token count above which the limit check trips
    pub limit_tokens: usize,
    /// Safe estimate as a percentage of the maximum
    pub usage_percentage: f32,
    /// Number of entries in the transcript
    pub entry_count: usize,
    /// Whether the safe estimate exceeds the limit
    pub is_approaching_limit: bool,
}

/// Context window manager for transcripts
#[derive(Debug, Clone)]
pub struct ContextManager {
    config: ContextConfig,
    estimator: TokenEstimator,
    pruner: TranscriptPruner,
}

impl Default for ContextManager {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

impl ContextManager {
    /// Create a manager from a configuration
    pub fn new(config: ContextConfig) -> Self {
        let estimator = TokenEstimator::from_config(&config);
        let pruner = TranscriptPruner::with_estimator(estimator.clone());
        Self {
            config,
            estimator,
            pruner,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// The token estimator
    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    /// Base estimated token count of a transcript
    pub fn estimated_tokens(&self, transcript: &Transcript) -> usize {
        self.estimator.estimate_transcript(transcript)
    }

    /// Safety-padded token estimate
    ///
    /// `base + floor(base * safety_margin_ratio) + safety_margin_tokens`.
    /// The margin covers estimation error plus reserved system overhead.
    pub fn safe_estimated_tokens(&self, transcript: &Transcript) -> usize {
        let base = self.estimated_tokens(transcript);
        base + (base as f32 * self.config.safety_margin_ratio).floor() as usize
            + self.config.safety_margin_tokens
    }

    /// Whether the transcript is approaching the configured limit
    ///
    /// True iff the safe estimate exceeds
    /// `floor(max_context_tokens * limit_threshold)`.
    pub fn is_approaching_limit(&self, transcript: &Transcript) -> bool {
        self.safe_estimated_tokens(transcript) > self.config.limit_tokens()
    }

    /// Limit check against caller-supplied threshold and maximum
    ///
    /// Neither argument is validated; see `ContextConfig` for the behavior of
    /// out-of-range thresholds.
    pub fn is_approaching_limit_with(
        &self,
        transcript: &Transcript,
        threshold: f32,
        max_tokens: usize,
    ) -> bool {
        let limit = (max_tokens as f32 * threshold).floor() as usize;
        self.safe_estimated_tokens(transcript) > limit
    }

    /// Usage statistics for a transcript snapshot
    pub fn usage_stats(&self, transcript: &Transcript) -> ContextUsageStats {
        let current_tokens = self.estimated_tokens(transcript);
        let safe_tokens = self.safe_estimated_tokens(transcript);
        let max_tokens = self.config.max_context_tokens;
        let limit_tokens = self.config.limit_tokens();

        ContextUsageStats {
            current_tokens,
            safe_tokens,
            max_tokens,
            limit_tokens,
            usage_percentage: if max_tokens == 0 {
                0.0
            } else {
                safe_tokens as f32 / max_tokens as f32 * 100.0
            },
            entry_count: transcript.len(),
            is_approaching_limit: safe_tokens > limit_tokens,
        }
    }

    /// Trim a transcript to an explicit token budget
    pub fn trim_to_budget(&self, transcript: &Transcript, budget: usize) -> PruneResult {
        self.pruner.prune(transcript, budget)
    }

    /// Trim a transcript only if it is approaching the limit
    ///
    /// Uses the configured trim budget. Returns `None` when no trim is
    /// needed, leaving the caller's transcript untouched.
    pub fn trim_if_needed(&self, transcript: &Transcript) -> Option<PruneResult> {
        if !self.is_approaching_limit(transcript) {
            return None;
        }
        let safe = self.safe_estimated_tokens(transcript);
        tracing::warn!(
            safe_tokens = safe,
            limit_tokens = self.config.limit_tokens(),
            max_tokens = self.config.max_context_tokens,
            "transcript approaching context limit, trimming"
        );
        Some(self.trim_to_budget(transcript, self.config.trim_budget()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptEntry;

    fn manager() -> ContextManager {
        ContextManager::default()
    }

    #[test]
    fn test_safe_estimate_formula() {
        let manager = manager();
        // 90 chars -> exactly 20 tokens at 4.5 chars/token
        let transcript =
            Transcript::from_entries(vec![TranscriptEntry::prompt("x".repeat(90))]);
        assert_eq!(manager.estimated_tokens(&transcript), 20);
        // 20 + floor(20 * 0.25) + 100 = 125
        assert_eq!(manager.safe_estimated_tokens(&transcript), 125);
    }

    #[test]
    fn test_safe_estimate_of_empty_transcript_is_flat_margin() {
        let manager = manager();
        assert_eq!(manager.safe_estimated_tokens(&Transcript::new()), 100);
    }

    #[test]
    fn test_limit_check_boundary() {
        let manager = manager();
        // Default limit is floor(4096 * 0.70) = 2867; the check is strict.
        // safe(base) = base + floor(base/4) + 100; base 2214 -> 2867 exactly.
        let at_limit =
            Transcript::from_entries(vec![TranscriptEntry::prompt("x".repeat(2214 * 9 / 2))]);
        assert_eq!(manager.safe_estimated_tokens(&at_limit), 2867);
        assert!(!manager.is_approaching_limit(&at_limit));

        let over_limit =
            Transcript::from_entries(vec![TranscriptEntry::prompt("x".repeat(2215 * 9 / 2))]);
        assert_eq!(manager.safe_estimated_tokens(&over_limit), 2868);
        assert!(manager.is_approaching_limit(&over_limit));
    }

    #[test]
    fn test_limit_check_with_caller_supplied_bounds() {
        let manager = manager();
        let transcript =
            Transcript::from_entries(vec![TranscriptEntry::prompt("y".repeat(90))]);
        // safe = 125
        assert!(manager.is_approaching_limit_with(&transcript, 0.5, 240)); // limit 120
        assert!(!manager.is_approaching_limit_with(&transcript, 0.5, 260)); // limit 130
    }

    #[test]
    fn test_usage_stats() {
        let manager = manager();
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("sys"),
            TranscriptEntry::prompt("question"),
        ]);
        let stats = manager.usage_stats(&transcript);
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.max_tokens, 4096);
        assert_eq!(stats.limit_tokens, 2867);
        assert_eq!(
            stats.safe_tokens,
            manager.safe_estimated_tokens(&transcript)
        );
        assert!(!stats.is_approaching_limit);
    }

    #[test]
    fn test_trim_if_needed_noop_under_limit() {
        let manager = manager();
        let transcript = Transcript::from_entries(vec![TranscriptEntry::prompt("short")]);
        assert!(manager.trim_if_needed(&transcript).is_none());
    }

    #[test]
    fn test_trim_if_needed_trims_to_budget() {
        let config = ContextConfig::new().with_max_tokens(100);
        let manager = ContextManager::new(config);

        // Ten prompts of 20 tokens each: base 200, safe 350, limit 70.
        let transcript = Transcript::from_entries(
            (0..10)
                .map(|_| TranscriptEntry::prompt("z".repeat(90)))
                .collect(),
        );
        let result = manager.trim_if_needed(&transcript).expect("should trim");
        // Trim budget is floor(100 * 0.6) = 60 -> three 20-token entries kept.
        assert_eq!(result.kept.len(), 3);
        assert_eq!(result.kept_tokens, 60);
        assert_eq!(result.removed_count, 7);
    }
}
