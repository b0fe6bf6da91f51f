//! Session layer (presentation-facing).
//!
//! [`SessionController`] is the composition root: it owns the round engine,
//! the score tracker and the high-score ledger, reads and writes the injected
//! preferences store, and reports every change through the [`Presentation`]
//! traits. It is independent of any UI framework and of real time; feed it
//! elapsed milliseconds with `tick`.

pub mod session;
pub mod settings;
pub mod surface;

pub use tile_recall_core as core;
pub use tile_recall_types as types;

pub use session::{SessionController, SessionSnapshot, SessionState, SessionStatus, SessionSummary};
pub use settings::SessionSettings;
pub use surface::{
    Presentation, RecordingPresentation, SessionEvents, SessionUpdate, TileSurface, UpdateSink,
};
