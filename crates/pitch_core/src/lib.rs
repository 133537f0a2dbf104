//! # pitch_core - Match-Day Pitch Board Engine
//!
//! This library implements the substitution and game-clock engine behind the
//! club app's pitch-board feature:
//!
//! - greedy formation assignment under position-eligibility constraints
//! - pure eligibility queries (bench candidates, swap targets, movers)
//! - fairness-based auto-substitution planning with live recompute
//! - a two-half game clock with wall-clock catch-up after suspension
//! - a bounded undo history over roster mutations
//!
//! All state is held by explicit values ([`PitchBoard`], [`GameClock`]);
//! there are no singletons, so every piece is independently testable. A JSON
//! API for the presentation layer lives in [`api`], durable storage of the
//! board blob in [`save`].

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;

pub use engine::{
    assign_formation, movable_pitch_players, plan_auto_subs, plan_excluding,
    valid_bench_candidates, valid_swap_targets, GameClock, PitchBoard, PlanConfig, TickOutcome,
    UndoSnapshot, UndoStack,
};
pub use error::{BoardError, Result};
pub use models::{
    formations_for, Category, Eligibility, FormationTemplate, GoalEvent, PitchCoord, Player,
    PositionSwap, Slot, SubstitutionEvent,
};
pub use save::{BoardSave, BoardStore, SaveError, SAVE_VERSION};
