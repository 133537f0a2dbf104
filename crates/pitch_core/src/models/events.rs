use super::player::Category;
use serde::{Deserialize, Serialize};

/// A pitch player moving to a different category so an otherwise-ineligible
/// bench player can come on into the vacated one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionSwap {
    pub player_id: String,
    pub from_category: Category,
    pub to_category: Category,
}

/// One planned or executed substitution.
///
/// `time_seconds` is relative to the event's own half. `executed` also covers
/// events consumed without a roster mutation (skipped or failed
/// re-validation), so planning stays consistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionEvent {
    pub time_seconds: u32,
    pub half: u8,
    pub player_out: String,
    pub player_in: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_swap: Option<PositionSwap>,
    #[serde(default)]
    pub executed: bool,
}

impl SubstitutionEvent {
    pub fn is_due(&self, half: u8, elapsed_seconds: u32) -> bool {
        !self.executed
            && (self.half < half || (self.half == half && self.time_seconds <= elapsed_seconds))
    }

    /// Minute label for notification text, e.g. "H2 03'".
    pub fn minute_label(&self) -> String {
        format!("H{} {:02}'", self.half, self.time_seconds / 60)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorer_id: Option<String>,
    pub time_seconds: u32,
    pub half: u8,
    #[serde(default)]
    pub is_opponent_goal: bool,
}
