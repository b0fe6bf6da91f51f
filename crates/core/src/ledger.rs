//! High-score ledger - ranked top-N session scores
//!
//! Entries are ranked by score (descending) with ties broken by name
//! (ascending), and only the best [`LEDGER_CAPACITY`] are kept.
//!
//! # Storage format
//!
//! The ledger lives under the `high_scores` preference as a JSON array of
//! `"name:score"` strings. The stored collection behaves like a set: an
//! identical `(name, score)` pair is kept once, while different scores for
//! the same name are separate entries. Entries that fail to parse are dropped
//! one by one on load; the rest of the ledger survives.

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::error::StoreError;
use crate::prefs::PreferencesStore;
use crate::types::{LEDGER_CAPACITY, PREF_HIGH_SCORES};

/// A recorded session score
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parse a stored `"name:score"` string
    ///
    /// The score follows the last `:`, so names may themselves contain colons.
    /// Returns `None` for an empty name or a non-numeric score.
    pub fn parse(raw: &str) -> Option<Self> {
        let (name, score) = raw.rsplit_once(':')?;
        if name.is_empty() {
            return None;
        }
        let score = score.trim().parse().ok()?;
        Some(Self::new(name, score))
    }

    /// Stored `"name:score"` form
    pub fn encode(&self) -> String {
        format!("{}:{}", self.name, self.score)
    }
}

/// Ranking order: score descending, then name ascending
pub fn rank(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreLedger {
    entries: ArrayVec<ScoreEntry, LEDGER_CAPACITY>,
}

impl HighScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank arbitrary entries and keep the best
    pub fn from_entries(entries: impl IntoIterator<Item = ScoreEntry>) -> Self {
        let mut ledger = Self::new();
        ledger.rebuild(entries.into_iter().collect());
        ledger
    }

    /// Read the ledger from `store`, tolerating a missing or damaged value
    pub fn load(store: &impl PreferencesStore) -> Self {
        match store.get(PREF_HIGH_SCORES) {
            Some(raw) => Self::decode(&raw),
            None => Self::new(),
        }
    }

    /// Decode the stored JSON array, dropping malformed entries individually
    pub fn decode(raw: &str) -> Self {
        let items: Vec<String> = match serde_json::from_str(raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable high-score ledger");
                return Self::new();
            }
        };

        let entries = items.iter().filter_map(|item| {
            let entry = ScoreEntry::parse(item);
            if entry.is_none() {
                tracing::warn!(entry = %item, "dropping malformed high-score entry");
            }
            entry
        });
        Self::from_entries(entries)
    }

    /// Stored JSON form (ranked order)
    pub fn encode(&self) -> Result<String, StoreError> {
        let items: Vec<String> = self.entries.iter().map(ScoreEntry::encode).collect();
        Ok(serde_json::to_string(&items)?)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge one entry in memory and return the ranked list
    pub fn merge(&mut self, entry: ScoreEntry) -> &[ScoreEntry] {
        let mut all: Vec<ScoreEntry> = self.entries.drain(..).collect();
        all.push(entry);
        self.rebuild(all);
        &self.entries
    }

    /// Merge `(name, score)` and persist the result
    ///
    /// A blank name records nothing: there is no player to attribute the
    /// score to. The store is left untouched in that case. On a failed write
    /// the ledger keeps its previous entries.
    pub fn record(
        &mut self,
        name: &str,
        score: u32,
        store: &mut impl PreferencesStore,
    ) -> Result<&[ScoreEntry], StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(&self.entries);
        }

        let mut next = self.clone();
        next.merge(ScoreEntry::new(name, score));
        store.set(PREF_HIGH_SCORES, &next.encode()?)?;
        *self = next;
        tracing::debug!(name, score, entries = self.entries.len(), "high score recorded");
        Ok(&self.entries)
    }

    fn rebuild(&mut self, mut all: Vec<ScoreEntry>) {
        all.sort_by(rank);
        all.dedup();
        self.entries = all.into_iter().take(LEDGER_CAPACITY).collect();
    }
}
