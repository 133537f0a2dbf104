//! Pure eligibility queries over the current roster.
//!
//! These are recomputed from the roster and selection on every call; they
//! never mutate state. Empty results mean "nothing to offer", not an error —
//! callers check emptiness before prompting.

use crate::models::{Category, Player};

fn find<'a>(roster: &'a [Player], id: &str) -> Option<&'a Player> {
    roster.iter().find(|p| p.id == id)
}

/// Bench players who could replace `pitch_player_id`: directly eligible for
/// its category, or reachable indirectly because some other pitch player can
/// vacate into that category while the bench candidate covers the category
/// they vacate.
pub fn valid_bench_candidates(roster: &[Player], pitch_player_id: &str) -> Vec<String> {
    let target = match find(roster, pitch_player_id).and_then(|p| p.current_category) {
        Some(category) => category,
        None => return Vec::new(),
    };

    roster
        .iter()
        .filter(|candidate| candidate.is_on_bench() && !candidate.is_injured)
        .filter(|candidate| {
            candidate.eligibility.allows(target)
                || roster.iter().any(|mover| {
                    mover.id != pitch_player_id
                        && mover.is_on_pitch()
                        && mover.eligibility.allows(target)
                        && mover
                            .current_category
                            .is_some_and(|vacated| candidate.eligibility.allows(vacated))
                })
        })
        .map(|candidate| candidate.id.clone())
        .collect()
}

/// Pitch players the selected pitch player can trade places with: the
/// selected player must be able to occupy the target's category and vice
/// versa. Two-way swaps only, which makes the relation symmetric.
pub fn valid_swap_targets(roster: &[Player], selected_pitch_id: &str) -> Vec<String> {
    let selected = match find(roster, selected_pitch_id) {
        Some(p) if p.is_on_pitch() => p,
        _ => return Vec::new(),
    };
    let selected_category = match selected.current_category {
        Some(category) => category,
        None => return Vec::new(),
    };

    roster
        .iter()
        .filter(|other| other.id != selected_pitch_id && other.is_on_pitch())
        .filter(|other| match other.current_category {
            Some(other_category) => {
                selected.eligibility.allows(other_category)
                    && other.eligibility.allows(selected_category)
            }
            None => false,
        })
        .map(|other| other.id.clone())
        .collect()
}

/// Pitch players who can move into `required_category` so that
/// `bench_player_id` can come on into the category they vacate.
/// `replaced_pitch_id` is the player leaving the pitch and is excluded.
pub fn movable_pitch_players(
    roster: &[Player],
    bench_player_id: &str,
    required_category: Category,
    replaced_pitch_id: Option<&str>,
) -> Vec<String> {
    let bench_player = match find(roster, bench_player_id) {
        Some(p) if p.is_on_bench() => p,
        _ => return Vec::new(),
    };

    roster
        .iter()
        .filter(|mover| mover.is_on_pitch() && Some(mover.id.as_str()) != replaced_pitch_id)
        .filter(|mover| {
            mover.eligibility.allows(required_category)
                && mover
                    .current_category
                    .is_some_and(|vacated| bench_player.eligibility.allows(vacated))
        })
        .map(|mover| mover.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Eligibility, PitchCoord};
    use proptest::prelude::*;

    fn on_pitch(id: &str, category: Category, eligibility: Eligibility) -> Player {
        let mut p = Player::new(id, id, 0).with_eligibility(eligibility);
        p.place(PitchCoord::new(0.5, 0.5), category);
        p
    }

    fn on_bench(id: &str, eligibility: Eligibility) -> Player {
        Player::new(id, id, 0).with_eligibility(eligibility)
    }

    #[test]
    fn direct_bench_candidates() {
        let roster = vec![
            on_pitch("mid", Category::MID, Eligibility::only(Category::MID)),
            on_bench("any", Eligibility::Unrestricted),
            on_bench("mid2", Eligibility::only(Category::MID)),
            on_bench("gk", Eligibility::only(Category::GK)),
        ];
        let candidates = valid_bench_candidates(&roster, "mid");
        assert_eq!(candidates, vec!["any".to_string(), "mid2".to_string()]);
    }

    #[test]
    fn injured_bench_players_are_excluded() {
        let mut roster = vec![
            on_pitch("mid", Category::MID, Eligibility::Unrestricted),
            on_bench("hurt", Eligibility::Unrestricted),
        ];
        roster[1].is_injured = true;
        assert!(valid_bench_candidates(&roster, "mid").is_empty());
    }

    #[test]
    fn indirect_candidate_via_vacating_pitch_player() {
        // "def" leaves DEF. "fwd_only" cannot play DEF, but "flex" (on pitch
        // at FWD) can drop into DEF while "fwd_only" covers FWD.
        let roster = vec![
            on_pitch("def", Category::DEF, Eligibility::only(Category::DEF)),
            on_pitch(
                "flex",
                Category::FWD,
                Eligibility::restricted_to([Category::DEF, Category::FWD]),
            ),
            on_bench("fwd_only", Eligibility::only(Category::FWD)),
        ];
        assert_eq!(valid_bench_candidates(&roster, "def"), vec!["fwd_only".to_string()]);

        let movers = movable_pitch_players(&roster, "fwd_only", Category::DEF, Some("def"));
        assert_eq!(movers, vec!["flex".to_string()]);
    }

    #[test]
    fn movable_players_exclude_the_replaced_player() {
        let roster = vec![
            on_pitch("def", Category::DEF, Eligibility::Unrestricted),
            on_bench("sub", Eligibility::only(Category::DEF)),
        ];
        // The departing player itself cannot be the mover.
        assert!(movable_pitch_players(&roster, "sub", Category::DEF, Some("def")).is_empty());
    }

    #[test]
    fn swap_targets_require_two_way_eligibility() {
        let roster = vec![
            on_pitch("a", Category::MID, Eligibility::restricted_to([Category::MID, Category::FWD])),
            on_pitch("b", Category::FWD, Eligibility::restricted_to([Category::MID, Category::FWD])),
            on_pitch("c", Category::DEF, Eligibility::only(Category::DEF)),
            on_bench("d", Eligibility::Unrestricted),
        ];
        assert_eq!(valid_swap_targets(&roster, "a"), vec!["b".to_string()]);
        // "c" cannot play MID and "a" cannot play DEF.
        assert!(!valid_swap_targets(&roster, "a").contains(&"c".to_string()));
        // Bench players have no swap targets.
        assert!(valid_swap_targets(&roster, "d").is_empty());
    }

    #[test]
    fn stale_player_references_yield_empty_results() {
        let roster = vec![on_pitch("a", Category::MID, Eligibility::Unrestricted)];
        assert!(valid_bench_candidates(&roster, "ghost").is_empty());
        assert!(valid_swap_targets(&roster, "ghost").is_empty());
        assert!(movable_pitch_players(&roster, "ghost", Category::MID, None).is_empty());
    }

    // Arbitrary rosters for the symmetry property.
    fn arb_category() -> impl Strategy<Value = Category> {
        prop_oneof![
            Just(Category::GK),
            Just(Category::DEF),
            Just(Category::MID),
            Just(Category::FWD),
        ]
    }

    fn arb_eligibility() -> impl Strategy<Value = Eligibility> {
        prop_oneof![
            Just(Eligibility::Unrestricted),
            prop::collection::btree_set(arb_category(), 1..=4).prop_map(Eligibility::RestrictedTo),
        ]
    }

    fn arb_roster() -> impl Strategy<Value = Vec<Player>> {
        prop::collection::vec((arb_eligibility(), arb_category(), any::<bool>()), 2..8).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (eligibility, category, pitched))| {
                        let mut p = Player::new(format!("p{}", i), format!("p{}", i), i as u8)
                            .with_eligibility(eligibility);
                        if pitched {
                            p.place(PitchCoord::new(0.1 * i as f32, 0.5), category);
                        }
                        p
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn swap_targets_are_symmetric(roster in arb_roster()) {
            for a in &roster {
                for b in valid_swap_targets(&roster, &a.id) {
                    let back = valid_swap_targets(&roster, &b);
                    prop_assert!(back.contains(&a.id), "{} -> {} not symmetric", a.id, b);
                }
            }
        }
    }
}
