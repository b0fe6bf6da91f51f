//! High-score ledger tests

use tile_recall::core::{HighScoreLedger, MemoryPreferences, PreferencesStore, ScoreEntry};
use tile_recall::types::PREF_HIGH_SCORES;

fn pairs(entries: &[ScoreEntry]) -> Vec<(String, u32)> {
    entries
        .iter()
        .map(|e| (e.name.clone(), e.score))
        .collect()
}

fn expected(list: &[(&str, u32)]) -> Vec<(String, u32)> {
    list.iter().map(|(n, s)| (n.to_string(), *s)).collect()
}

#[test]
fn test_four_records_keep_best_three() {
    let mut store = MemoryPreferences::new();
    let mut ledger = HighScoreLedger::new();

    for (name, score) in [("A", 50), ("B", 80), ("C", 80), ("D", 10)] {
        ledger.record(name, score, &mut store).unwrap();
    }

    assert_eq!(
        pairs(ledger.entries()),
        expected(&[("B", 80), ("C", 80), ("A", 50)])
    );
}

#[test]
fn test_ties_break_by_name() {
    let ledger = HighScoreLedger::from_entries([
        ScoreEntry::new("zed", 40),
        ScoreEntry::new("amy", 40),
        ScoreEntry::new("max", 40),
    ]);
    assert_eq!(
        pairs(ledger.entries()),
        expected(&[("amy", 40), ("max", 40), ("zed", 40)])
    );
}

#[test]
fn test_record_persists_and_reloads() {
    let mut store = MemoryPreferences::new();
    let mut ledger = HighScoreLedger::load(&store);
    assert!(ledger.is_empty());

    ledger.record("Ada", 30, &mut store).unwrap();
    ledger.record("Bob", 60, &mut store).unwrap();

    assert_eq!(
        store.get(PREF_HIGH_SCORES).as_deref(),
        Some(r#"["Bob:60","Ada:30"]"#)
    );

    let reloaded = HighScoreLedger::load(&store);
    assert_eq!(reloaded, ledger);
}

#[test]
fn test_same_name_keeps_both_scores() {
    let mut store = MemoryPreferences::new();
    let mut ledger = HighScoreLedger::new();
    ledger.record("Ada", 30, &mut store).unwrap();
    ledger.record("Ada", 50, &mut store).unwrap();

    assert_eq!(
        pairs(ledger.entries()),
        expected(&[("Ada", 50), ("Ada", 30)])
    );
}

#[test]
fn test_identical_entry_is_stored_once() {
    let mut store = MemoryPreferences::new();
    let mut ledger = HighScoreLedger::new();
    ledger.record("Ada", 30, &mut store).unwrap();
    ledger.record("Ada", 30, &mut store).unwrap();
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_blank_name_records_nothing() {
    let mut store = MemoryPreferences::new();
    let mut ledger = HighScoreLedger::new();
    ledger.record("   ", 90, &mut store).unwrap();

    assert!(ledger.is_empty());
    assert_eq!(store.get(PREF_HIGH_SCORES), None);
}

#[test]
fn test_damaged_store_is_tolerated() {
    let store = MemoryPreferences::new().with(
        PREF_HIGH_SCORES,
        r#"["Ada:30","garbage",":5","Bob:lots","Cy:Rus:70"]"#,
    );
    let ledger = HighScoreLedger::load(&store);
    assert_eq!(
        pairs(ledger.entries()),
        expected(&[("Cy:Rus", 70), ("Ada", 30)])
    );

    let store = MemoryPreferences::new().with(PREF_HIGH_SCORES, "not json at all");
    assert!(HighScoreLedger::load(&store).is_empty());
}
