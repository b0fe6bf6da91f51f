//! Integration tests for full game sessions

use tile_recall::core::{
    HighScoreLedger, MemoryPreferences, PreferencesStore, RoundEngine, RoundEvent,
};
use tile_recall::engine::{
    RecordingPresentation, SessionController, SessionSettings, SessionStatus, SessionUpdate,
};
use tile_recall::runtime::JsonFilePreferences;
use tile_recall::types::{
    RoundConfig, RoundOutcome, RoundState, SelectionOutcome, Tier, TileVisual, PREF_DIFFICULTY,
    PREF_HIGH_SCORES, PREF_PLAYER_NAME,
};

type Session<P> = SessionController<P, RecordingPresentation>;

fn session<P: PreferencesStore>(prefs: P, seed: u32) -> Session<P> {
    let settings = SessionSettings {
        seed,
        ..SessionSettings::default()
    };
    SessionController::new(prefs, RecordingPresentation::new(), settings).unwrap()
}

fn open_selection<P: PreferencesStore>(s: &mut Session<P>) {
    s.tick(3000);
    assert_eq!(s.state().round_state, RoundState::AwaitingSelection);
}

fn win_round<P: PreferencesStore>(s: &mut Session<P>) {
    open_selection(s);
    let targets: Vec<usize> = s.engine().targets().iter().collect();
    for index in targets {
        s.on_tile_selected(index);
    }
    s.tick(1000);
}

fn lose_round<P: PreferencesStore>(s: &mut Session<P>) {
    open_selection(s);
    let miss = (0..36)
        .find(|i| !s.engine().targets().contains(*i))
        .unwrap();
    s.on_tile_selected(miss);
}

#[test]
fn test_round_lifecycle_events() {
    let mut engine = RoundEngine::new(36, 12345).unwrap();
    engine.begin_round(RoundConfig::for_tier(Tier::Easy)).unwrap();

    let events: Vec<RoundEvent> = engine.drain_events().collect();
    let shown = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                RoundEvent::TileVisualChanged {
                    visual: TileVisual::Shown,
                    ..
                }
            )
        })
        .count();
    assert_eq!(shown, 4);
    assert_eq!(
        events.last(),
        Some(&RoundEvent::PhaseChanged {
            phase: RoundState::Memorizing,
            remaining_ms: Some(3000)
        })
    );

    // Selections during memorize are ignored.
    let target = engine.targets().as_slice()[0];
    assert_eq!(engine.on_tile_selected(target), None);

    engine.tick(3000);
    assert_eq!(engine.state(), RoundState::AwaitingSelection);
    let events: Vec<RoundEvent> = engine.drain_events().collect();
    assert!(events.contains(&RoundEvent::TilesEnabledChanged { enabled: true }));

    assert_eq!(
        engine.on_tile_selected(target),
        Some(SelectionOutcome::MarkedCorrect)
    );
    assert_eq!(
        engine.on_tile_selected(target),
        Some(SelectionOutcome::AlreadySelected)
    );
    assert_eq!(engine.correct_selections(), 1);
}

#[test]
fn test_full_game_escalates_then_ends() {
    let prefs = MemoryPreferences::new().with(PREF_PLAYER_NAME, "  Ada  ");
    let mut s = session(prefs, 4242);
    s.start_session(Some(Tier::Easy)).unwrap();

    for round in 1..=3 {
        assert_eq!(s.state().current_round, round);
        assert_eq!(s.engine().targets().len(), 4);
        win_round(&mut s);
    }

    let state = s.state();
    assert_eq!(state.tier, Tier::Hard);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.score, 30);
    assert_eq!(s.engine().targets().len(), 5);

    win_round(&mut s);
    win_round(&mut s);
    assert_eq!(s.state().score, 70);
    assert_eq!(s.state().tier, Tier::Hard);

    lose_round(&mut s);
    assert_eq!(s.status(), SessionStatus::Finished);

    let summary = s.summary().unwrap();
    assert_eq!(summary.final_score, 70);
    assert_eq!(summary.outcome, RoundOutcome::WrongTile);
    assert_eq!(summary.player_name.as_deref(), Some("Ada"));
    assert!(summary.recorded);

    let scores: Vec<u32> = s
        .view()
        .updates
        .iter()
        .filter_map(|u| match u {
            SessionUpdate::Score { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(scores, vec![0, 10, 20, 30, 50, 70]);
}

#[test]
fn test_missed_targets_are_revealed_on_timeout() {
    let mut s = session(MemoryPreferences::new(), 7);
    s.start_session(None).unwrap();
    open_selection(&mut s);

    let first = s.engine().targets().as_slice()[0];
    s.on_tile_selected(first);
    s.view_mut().take();

    s.tick(5000);
    assert_eq!(s.summary().unwrap().outcome, RoundOutcome::Timeout);

    let board = s.engine().board();
    assert_eq!(board.slot(first).unwrap().visual(), TileVisual::Correct);
    for index in s.engine().targets().iter().filter(|&i| i != first) {
        assert_eq!(board.slot(index).unwrap().visual(), TileVisual::Shown);
    }
    assert!(!board.is_enabled());

    let updates = s.view_mut().take();
    assert_eq!(
        updates.last(),
        Some(&SessionUpdate::RoundEnded {
            outcome: RoundOutcome::Timeout,
            final_score: Some(0)
        })
    );
}

#[test]
fn test_scores_survive_across_sessions_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    {
        let mut prefs = JsonFilePreferences::open(&path).unwrap();
        prefs.set(PREF_PLAYER_NAME, "Ada").unwrap();

        let mut s = session(prefs, 1);
        s.start_session(Some(Tier::Hard)).unwrap();
        win_round(&mut s);
        lose_round(&mut s);
        assert_eq!(s.summary().unwrap().final_score, 20);
    }

    {
        let mut prefs = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(prefs.get(PREF_DIFFICULTY).as_deref(), Some("hard"));
        prefs.set(PREF_PLAYER_NAME, "Bob").unwrap();

        let mut s = session(prefs, 2);
        s.start_session(None).unwrap();
        assert_eq!(s.state().tier, Tier::Hard);
        win_round(&mut s);
        win_round(&mut s);
        lose_round(&mut s);
    }

    let prefs = JsonFilePreferences::open(&path).unwrap();
    assert_eq!(
        prefs.get(PREF_HIGH_SCORES).as_deref(),
        Some(r#"["Bob:40","Ada:20"]"#)
    );
    let ledger = HighScoreLedger::load(&prefs);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn test_restart_after_game_over() {
    let mut s = session(MemoryPreferences::new(), 99);
    s.start_session(None).unwrap();
    win_round(&mut s);
    lose_round(&mut s);

    s.restart().unwrap();
    let state = s.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.current_round, 1);
    assert_eq!(state.round_state, RoundState::Memorizing);
    assert_eq!(s.status(), SessionStatus::Playing);
}

#[test]
fn test_session_snapshot_json() {
    let mut s = session(MemoryPreferences::new(), 5);
    s.start_session(Some(Tier::Hard)).unwrap();
    open_selection(&mut s);

    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["status"], "playing");
    assert_eq!(json["session"]["tier"], "hard");
    assert_eq!(json["session"]["currentRound"], 1);
    assert_eq!(json["round"]["state"], "awaitingSelection");
    assert_eq!(json["round"]["enabled"], true);
    assert_eq!(json["round"]["remainingMs"], 5000);
    assert_eq!(json["round"]["tiles"].as_array().unwrap().len(), 36);
    assert!(json["summary"].is_null());
}
