//! Runtime driver end-to-end test: env-style config, file preferences, paused time

use std::time::Duration;

use tile_recall::core::PreferencesStore;
use tile_recall::engine::SessionUpdate;
use tile_recall::runtime::{JsonFilePreferences, RuntimeConfig, SessionHandle};
use tile_recall::types::{RoundOutcome, PREF_HIGH_SCORES, PREF_PLAYER_NAME};
use tokio_test::assert_ok;

#[tokio::test(start_paused = true)]
async fn test_session_from_config_records_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    {
        let mut prefs = JsonFilePreferences::open(&path).unwrap();
        prefs.set(PREF_PLAYER_NAME, "Ada").unwrap();
    }

    let path_str = path.to_string_lossy().into_owned();
    let config = RuntimeConfig::from_lookup(|key| match key {
        "TILE_RECALL_PREFS_PATH" => Some(path_str.clone()),
        "TILE_RECALL_SEED" => Some("11".to_string()),
        "TILE_RECALL_PUMP_MS" => Some("100".to_string()),
        _ => None,
    });

    let mut handle = assert_ok!(SessionHandle::spawn_from_config(&config));
    assert_ok!(handle.start(None).await);

    // Nobody selects anything: memorize, then the selection deadline.
    let ended = tokio::time::timeout(Duration::from_secs(60), async {
        while let Some(update) = handle.next_update().await {
            if let SessionUpdate::RoundEnded { final_score, .. } = update {
                if final_score.is_some() {
                    return Some(update);
                }
            }
        }
        None
    })
    .await;

    assert_eq!(
        assert_ok!(ended),
        Some(SessionUpdate::RoundEnded {
            outcome: RoundOutcome::Timeout,
            final_score: Some(0),
        })
    );

    assert_ok!(handle.exit().await);
    let summary = assert_ok!(handle.join().await).unwrap();
    assert!(summary.recorded);

    let prefs = JsonFilePreferences::open(&path).unwrap();
    assert_eq!(prefs.get(PREF_HIGH_SCORES).as_deref(), Some(r#"["Ada:0"]"#));
}
