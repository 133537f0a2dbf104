//! Match-day engine: formation assignment, eligibility queries, the
//! auto-substitution planner, the game clock and undo history, tied
//! together by the [`PitchBoard`] facade.

pub mod assignment;
pub mod board;
pub mod clock;
pub mod eligibility;
pub mod history;
pub mod planner;

pub use assignment::assign_formation;
pub use board::PitchBoard;
pub use clock::{GameClock, TickOutcome};
pub use eligibility::{movable_pitch_players, valid_bench_candidates, valid_swap_targets};
pub use history::{UndoSnapshot, UndoStack, MAX_UNDO_DEPTH, UNDO_AFFORDANCE_MS};
pub use planner::{plan_auto_subs, plan_excluding, PlanConfig, MIN_SECONDS_PER_SUB};
