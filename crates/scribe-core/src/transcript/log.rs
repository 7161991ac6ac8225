//! The transcript log

use serde::{Deserialize, Serialize};

use super::entry::TranscriptEntry;

/// Ordered, append-only log of conversational entries
///
/// A transcript is owned by a single session. It grows by appending entries;
/// trimming produces a new `Transcript` holding a selected subsequence rather
/// than deleting in place, so accounting over a snapshot stays pure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript from an initial sequence of entries
    pub fn from_entries(entries: Vec<TranscriptEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// All entries, in chronological order
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Iterate over entries in chronological order
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the transcript, returning its entries
    pub fn into_entries(self) -> Vec<TranscriptEntry> {
        self.entries
    }
}

impl FromIterator<TranscriptEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = TranscriptEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
