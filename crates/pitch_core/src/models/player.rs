use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Pitch category a slot or player can occupy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    GK,
    DEF,
    MID,
    FWD,
}

impl Category {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Category::GK)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::GK => "GK",
            Category::DEF => "DEF",
            Category::MID => "MID",
            Category::FWD => "FWD",
        }
    }
}

/// Which categories a player may occupy.
///
/// An explicit `Unrestricted` variant keeps "no restriction" distinct from
/// "restricted to an empty set" (which would mean the player can play
/// nowhere).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", content = "categories")]
pub enum Eligibility {
    #[default]
    Unrestricted,
    RestrictedTo(BTreeSet<Category>),
}

impl Eligibility {
    /// Convenience constructor for a single-category restriction.
    pub fn only(category: Category) -> Self {
        let mut set = BTreeSet::new();
        set.insert(category);
        Eligibility::RestrictedTo(set)
    }

    pub fn restricted_to(categories: impl IntoIterator<Item = Category>) -> Self {
        Eligibility::RestrictedTo(categories.into_iter().collect())
    }

    /// Whether the player may occupy `category`. Unrestricted satisfies
    /// any category test.
    pub fn allows(&self, category: Category) -> bool {
        match self {
            Eligibility::Unrestricted => true,
            Eligibility::RestrictedTo(set) => set.contains(&category),
        }
    }

    /// The single category this eligibility is restricted to, if exactly one.
    pub fn specialist_category(&self) -> Option<Category> {
        match self {
            Eligibility::Unrestricted => None,
            Eligibility::RestrictedTo(set) if set.len() == 1 => set.iter().next().copied(),
            Eligibility::RestrictedTo(_) => None,
        }
    }

    pub fn is_goalkeeper_only(&self) -> bool {
        self.specialist_category() == Some(Category::GK)
    }
}

/// Normalized pitch-board coordinate. `x` runs left to right, `y` from the
/// opponent goal (0.0) down to our own goal line (1.0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PitchCoord {
    pub x: f32,
    pub y: f32,
}

impl PitchCoord {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Roster entry mutated in place by engine operations.
///
/// Invariant: a player is on pitch iff `position` is set iff
/// `current_category` is set. `seconds_played` only ever increases, and only
/// while the player is on pitch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub jersey_number: u8,

    #[serde(default)]
    pub eligibility: Eligibility,

    /// Category currently occupied; set only while on pitch.
    #[serde(default)]
    pub current_category: Option<Category>,

    /// Pitch coordinate; `None` means the player sits on the bench.
    #[serde(default)]
    pub position: Option<PitchCoord>,

    /// Accumulated playing time in seconds, monotone non-decreasing.
    #[serde(default)]
    pub seconds_played: u32,

    #[serde(default)]
    pub is_injured: bool,

    /// Guest filling in for the day; tracked for roster display only.
    #[serde(default)]
    pub is_fill_in: bool,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, jersey_number: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            jersey_number,
            eligibility: Eligibility::Unrestricted,
            current_category: None,
            position: None,
            seconds_played: 0,
            is_injured: false,
            is_fill_in: false,
        }
    }

    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn is_on_pitch(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_on_bench(&self) -> bool {
        self.position.is_none()
    }

    /// Place the player on pitch, keeping position and category in lockstep.
    pub fn place(&mut self, coord: PitchCoord, category: Category) {
        self.position = Some(coord);
        self.current_category = Some(category);
    }

    /// Clear position and category together.
    pub fn send_to_bench(&mut self) {
        self.position = None;
        self.current_category = None;
    }
}
