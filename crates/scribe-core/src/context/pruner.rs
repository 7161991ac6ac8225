//! Budget-constrained transcript window selection
//!
//! Selects the largest recency-biased subset of a transcript that fits a
//! token budget, always preferring to retain the first instructions entry.
//! This is a greedy heuristic, not an optimal knapsack: recency wins over
//! entry count or wasted budget.

use crate::transcript::{Transcript, TranscriptEntry};

use super::estimator::TokenEstimator;

/// Outcome of pruning a transcript to a budget
#[derive(Debug, Clone)]
pub struct PruneResult {
    /// Entries that fit the budget, in original chronological order
    pub kept: Transcript,
    /// Estimated token total of the kept entries
    pub kept_tokens: usize,
    /// Number of entries that were dropped
    pub removed_count: usize,
}

/// Selects transcript subsets that fit a token budget
#[derive(Debug, Clone, Default)]
pub struct TranscriptPruner {
    estimator: TokenEstimator,
}

impl TranscriptPruner {
    /// Create a pruner with a default estimator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pruner using the given estimator
    pub fn with_estimator(estimator: TokenEstimator) -> Self {
        Self { estimator }
    }

    /// Select the entries of `transcript` that fit within `budget` tokens
    ///
    /// The first instructions entry is the anchor: if its own cost fits the
    /// budget it is always retained and emitted first. Remaining entries are
    /// scanned most-recent-first; each is kept if it still fits, and a skipped
    /// expensive entry does not stop the scan, so an older cheaper entry may
    /// still be kept. The result is a subsequence of the input in original
    /// chronological order (anchor first). The input is never mutated.
    pub fn entries_within_budget(
        &self,
        transcript: &Transcript,
        budget: usize,
    ) -> Vec<TranscriptEntry> {
        let entries = transcript.entries();
        let anchor_index = entries.iter().position(TranscriptEntry::is_instructions);

        let mut running_total = 0usize;
        let mut kept_anchor: Option<usize> = None;
        if let Some(index) = anchor_index {
            let cost = self.estimator.estimate_entry(&entries[index]);
            if cost <= budget {
                running_total = cost;
                kept_anchor = Some(index);
            }
            // An anchor that alone exceeds the budget is dropped, not truncated.
        }

        let mut picked: Vec<usize> = Vec::new();
        for (index, entry) in entries.iter().enumerate().rev() {
            if Some(index) == anchor_index {
                continue;
            }
            let cost = self.estimator.estimate_entry(entry);
            if running_total + cost <= budget {
                running_total += cost;
                picked.push(index);
            }
        }
        picked.reverse();

        let mut selected = Vec::with_capacity(picked.len() + 1);
        if let Some(index) = kept_anchor {
            selected.push(entries[index].clone());
        }
        selected.extend(picked.into_iter().map(|i| entries[i].clone()));
        selected
    }

    /// Prune `transcript` to `budget`, reporting what was kept and dropped
    pub fn prune(&self, transcript: &Transcript, budget: usize) -> PruneResult {
        let selected = self.entries_within_budget(transcript, budget);
        let removed_count = transcript.len() - selected.len();
        let kept = Transcript::from_entries(selected);
        let kept_tokens = self.estimator.estimate_transcript(&kept);
        PruneResult {
            kept,
            kept_tokens,
            removed_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pruner() -> TranscriptPruner {
        TranscriptPruner::new()
    }

    fn cost(entry: &TranscriptEntry) -> usize {
        TokenEstimator::new().estimate_entry(entry)
    }

    #[test]
    fn test_empty_transcript_yields_empty_selection() {
        let selected = pruner().entries_within_budget(&Transcript::new(), 100);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_zero_budget_yields_empty_selection() {
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("system guidance here"),
            TranscriptEntry::prompt("a question"),
        ]);
        let selected = pruner().entries_within_budget(&transcript, 0);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_everything_fits_under_large_budget() {
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("sys"),
            TranscriptEntry::prompt("q1"),
            TranscriptEntry::response("r1"),
        ]);
        let selected = pruner().entries_within_budget(&transcript, 10_000);
        assert_eq!(selected, transcript.entries());
    }

    #[test]
    fn test_recent_entries_preferred_with_anchor() {
        // Instruction anchor plus two question/answer rounds; budget admits
        // the anchor and only the most recent round.
        let sys = TranscriptEntry::instructions("twenty chars of sys!");
        let q1 = TranscriptEntry::prompt("first question, quite long here");
        let r1 = TranscriptEntry::response("first answer, also quite long!!");
        let q2 = TranscriptEntry::prompt("second question, same size here");
        let r2 = TranscriptEntry::response("second answer, same size here!!");

        let budget = cost(&sys) + cost(&q2) + cost(&r2);
        let transcript = Transcript::from_entries(vec![
            sys.clone(),
            q1,
            r1,
            q2.clone(),
            r2.clone(),
        ]);

        let selected = pruner().entries_within_budget(&transcript, budget);
        assert_eq!(selected, vec![sys, q2, r2]);
    }

    #[test]
    fn test_skipped_expensive_entry_does_not_stop_scan() {
        let cheap_old = TranscriptEntry::prompt("hi");
        let expensive = TranscriptEntry::response("x".repeat(450)); // 100 tokens
        let cheap_new = TranscriptEntry::prompt("ok");

        let transcript = Transcript::from_entries(vec![
            cheap_old.clone(),
            expensive,
            cheap_new.clone(),
        ]);
        // Budget fits both cheap entries but not the expensive middle one.
        let selected = pruner().entries_within_budget(&transcript, 2);
        assert_eq!(selected, vec![cheap_old, cheap_new]);
    }

    #[test]
    fn test_oversized_anchor_dropped_silently() {
        let sys = TranscriptEntry::instructions("s".repeat(450)); // 100 tokens
        let q = TranscriptEntry::prompt("small");
        let transcript = Transcript::from_entries(vec![sys, q.clone()]);

        let selected = pruner().entries_within_budget(&transcript, 5);
        assert_eq!(selected, vec![q]);
    }

    #[test]
    fn test_only_first_instructions_entry_is_anchored() {
        // A later instructions entry competes for budget like any other entry
        // and is more recent than the prompt, so it wins the reverse scan.
        let first = TranscriptEntry::instructions("anchor instructions!");
        let prompt = TranscriptEntry::prompt("an old prompt in between");
        let second = TranscriptEntry::instructions("later instructions entry");
        let transcript =
            Transcript::from_entries(vec![first.clone(), prompt, second.clone()]);

        let budget = cost(&first) + cost(&second);
        let selected = pruner().entries_within_budget(&transcript, budget);
        assert_eq!(selected, vec![first, second]);
    }

    #[test]
    fn test_budget_respected() {
        let estimator = TokenEstimator::new();
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("some system instructions"),
            TranscriptEntry::prompt("question one, with padding"),
            TranscriptEntry::response("answer one, with padding!"),
            TranscriptEntry::prompt("question two, with padding"),
            TranscriptEntry::response("answer two, with padding!"),
        ]);
        for budget in 0..40 {
            let kept = Transcript::from_entries(
                pruner().entries_within_budget(&transcript, budget),
            );
            assert!(
                estimator.estimate_transcript(&kept) <= budget,
                "budget {} exceeded",
                budget
            );
        }
    }

    #[test]
    fn test_selection_preserves_relative_order() {
        let entries = vec![
            TranscriptEntry::prompt("alpha question"),
            TranscriptEntry::response("alpha answer!!"),
            TranscriptEntry::prompt("beta question!"),
            TranscriptEntry::response("beta answer!!!"),
        ];
        let transcript = Transcript::from_entries(entries.clone());
        let selected = pruner().entries_within_budget(&transcript, 9);

        // Whatever was kept must appear as a subsequence of the original.
        let mut cursor = entries.iter();
        for kept in &selected {
            assert!(cursor.any(|e| e == kept), "order not preserved");
        }
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("system instructions!"),
            TranscriptEntry::prompt("question one, padded out"),
            TranscriptEntry::response("answer one, padded out!!"),
            TranscriptEntry::prompt("question two, padded out"),
            TranscriptEntry::response("answer two, padded out!!"),
        ]);
        let budget = 20;
        let once = pruner().entries_within_budget(&transcript, budget);
        let twice =
            pruner().entries_within_budget(&Transcript::from_entries(once.clone()), budget);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prune_reports_counts() {
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::instructions("sys!"),
            TranscriptEntry::prompt("p".repeat(450)),
            TranscriptEntry::response("ok"),
        ]);
        let result = pruner().prune(&transcript, 5);
        assert_eq!(result.removed_count, 1);
        assert_eq!(result.kept.len(), 2);
        assert!(result.kept_tokens <= 5);
    }

    #[test]
    fn test_input_not_mutated() {
        let transcript = Transcript::from_entries(vec![
            TranscriptEntry::prompt("untouched"),
            TranscriptEntry::response("also untouched"),
        ]);
        let before = transcript.clone();
        let _ = pruner().entries_within_budget(&transcript, 1);
        assert_eq!(transcript, before);
    }
}
