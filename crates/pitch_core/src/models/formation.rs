//! Formation templates and the built-in template table.
//!
//! A template is an ordered list of slots; slot order matters because the
//! assignment passes and the planner break ties by it.

use super::player::{Category, PitchCoord};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A formation-defined pitch location with a target category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub coord: PitchCoord,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormationTemplate {
    /// Canonical code string, e.g. "2-3-1" (defenders-midfielders-forwards).
    pub name: String,
    pub slots: Vec<Slot>,
}

impl FormationTemplate {
    /// Build a template from row counts. The GK row is implicit.
    pub fn from_rows(name: &str, defenders: usize, midfielders: usize, forwards: usize) -> Self {
        let mut slots = Vec::with_capacity(1 + defenders + midfielders + forwards);
        slots.push(Slot { coord: PitchCoord::new(0.5, 0.94), category: Category::GK });
        slots.extend(row(Category::DEF, defenders, 0.72));
        slots.extend(row(Category::MID, midfielders, 0.48));
        slots.extend(row(Category::FWD, forwards, 0.22));
        Self { name: name.to_string(), slots }
    }

    pub fn team_size(&self) -> usize {
        self.slots.len()
    }

    pub fn slots_of(&self, category: Category) -> usize {
        self.slots.iter().filter(|s| s.category == category).count()
    }
}

fn row(category: Category, count: usize, y: f32) -> Vec<Slot> {
    (0..count)
        .map(|i| Slot {
            coord: PitchCoord::new((i as f32 + 1.0) / (count as f32 + 1.0), y),
            category,
        })
        .collect()
}

/// Built-in formation table keyed by team size.
static FORMATIONS: Lazy<BTreeMap<usize, Vec<FormationTemplate>>> = Lazy::new(|| {
    let mut table = BTreeMap::new();
    table.insert(
        5,
        vec![
            FormationTemplate::from_rows("2-1-1", 2, 1, 1),
            FormationTemplate::from_rows("1-2-1", 1, 2, 1),
        ],
    );
    table.insert(
        7,
        vec![
            FormationTemplate::from_rows("2-3-1", 2, 3, 1),
            FormationTemplate::from_rows("3-2-1", 3, 2, 1),
            FormationTemplate::from_rows("2-2-2", 2, 2, 2),
        ],
    );
    table.insert(
        9,
        vec![
            FormationTemplate::from_rows("3-3-2", 3, 3, 2),
            FormationTemplate::from_rows("3-2-3", 3, 2, 3),
            FormationTemplate::from_rows("4-3-1", 4, 3, 1),
        ],
    );
    table.insert(
        11,
        vec![
            FormationTemplate::from_rows("4-4-2", 4, 4, 2),
            FormationTemplate::from_rows("4-3-3", 4, 3, 3),
            FormationTemplate::from_rows("3-5-2", 3, 5, 2),
        ],
    );
    table
});

/// Templates available for a team size. Unknown sizes yield an empty slice;
/// callers treat that as "nothing to assign".
pub fn formations_for(team_size: usize) -> &'static [FormationTemplate] {
    FORMATIONS.get(&team_size).map(Vec::as_slice).unwrap_or(&[])
}
