//! Runtime integration - tokio driver, environment config, file-backed preferences
//!
//! The session layer is synchronous and clock-agnostic. This crate supplies
//! what a real process needs around it:
//!
//! - [`driver`]: a tokio task that pumps measured elapsed time into the
//!   session and exchanges [`SessionCommand`]s and [`SessionUpdate`]s over
//!   channels
//! - [`config`]: [`RuntimeConfig::from_env`]
//! - [`file_prefs`]: a JSON-file [`PreferencesStore`](crate::core::PreferencesStore)
//! - [`logging`]: `tracing-subscriber` setup
//!
//! # Environment Variables
//!
//! - `TILE_RECALL_PREFS_PATH`: preferences file (default: in-memory only)
//! - `TILE_RECALL_BOARD_SIZE`: tile count (default: 36)
//! - `TILE_RECALL_SEED`: RNG seed (default: wall-clock millis)
//! - `TILE_RECALL_PUMP_MS`: pump interval in ms (default: 50)
//! - `RUST_LOG`: log filter (default: `info`)
//!
//! # Example
//!
//! ```no_run
//! use tile_recall_runtime::{logging, RuntimeConfig, SessionHandle};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     logging::init();
//!     let mut handle = SessionHandle::spawn_from_config(&RuntimeConfig::from_env())?;
//!     handle.start(None).await?;
//!     while let Some(update) = handle.next_update().await {
//!         println!("{}", serde_json::to_string(&update)?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod file_prefs;
pub mod logging;
pub mod prefs;

pub use tile_recall_core as core;
pub use tile_recall_engine as engine;
pub use tile_recall_types as types;

pub use config::RuntimeConfig;
pub use driver::{run_session, SessionCommand, SessionHandle};
pub use engine::SessionUpdate;
pub use file_prefs::JsonFilePreferences;
pub use prefs::RuntimePreferences;
