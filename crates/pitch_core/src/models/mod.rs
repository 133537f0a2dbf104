pub mod events;
pub mod formation;
pub mod player;

pub use events::{GoalEvent, PositionSwap, SubstitutionEvent};
pub use formation::{formations_for, FormationTemplate, Slot};
pub use player::{Category, Eligibility, PitchCoord, Player};
