//! Tile Recall (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as one `tile_recall::{types,core,engine,runtime}`
//! public API.

pub use tile_recall_core as core;
pub use tile_recall_engine as engine;
pub use tile_recall_runtime as runtime;
pub use tile_recall_types as types;
