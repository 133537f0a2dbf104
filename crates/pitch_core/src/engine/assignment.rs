//! Greedy formation assignment.
//!
//! Three deterministic passes over roster order, no backtracking: once a
//! pass places a player the placement is final, even if a later pass could
//! have produced a better global matching. Reproducibility of this exact
//! order-dependent behavior is relied upon elsewhere (planning, tests).

use crate::models::{FormationTemplate, Player};

/// Assign `roster` onto `template`'s slots. Players left without a slot are
/// benched; an empty template benches everyone.
pub fn assign_formation(roster: &mut [Player], template: &FormationTemplate) {
    for player in roster.iter_mut() {
        player.send_to_bench();
    }
    if template.slots.is_empty() {
        return;
    }

    let mut taken = vec![false; template.slots.len()];

    // Pass 1: specialists claim the first open slot of their category.
    for player in roster.iter_mut() {
        if let Some(category) = player.eligibility.specialist_category() {
            claim_slot(player, template, &mut taken, |slot_category| slot_category == category);
        }
    }

    // Pass 2: multi-category players claim any open slot they are eligible
    // for, in slot order.
    for player in roster.iter_mut() {
        if player.is_on_pitch() || player.eligibility.specialist_category().is_some() {
            continue;
        }
        let eligibility = player.eligibility.clone();
        if matches!(eligibility, crate::models::Eligibility::RestrictedTo(_)) {
            claim_slot(player, template, &mut taken, |slot_category| {
                eligibility.allows(slot_category)
            });
        }
    }

    // Pass 3: unrestricted players fill whatever is left.
    for player in roster.iter_mut() {
        if player.is_on_pitch() {
            continue;
        }
        if matches!(player.eligibility, crate::models::Eligibility::Unrestricted) {
            claim_slot(player, template, &mut taken, |_| true);
        }
    }
}

fn claim_slot(
    player: &mut Player,
    template: &FormationTemplate,
    taken: &mut [bool],
    accepts: impl Fn(crate::models::Category) -> bool,
) {
    for (idx, slot) in template.slots.iter().enumerate() {
        if !taken[idx] && accepts(slot.category) {
            taken[idx] = true;
            player.place(slot.coord, slot.category);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{formations_for, Category, Eligibility};

    fn unrestricted(id: &str) -> Player {
        Player::new(id, id, 0)
    }

    fn specialist(id: &str, category: Category) -> Player {
        Player::new(id, id, 0).with_eligibility(Eligibility::only(category))
    }

    #[test]
    fn specialists_claim_their_category_first() {
        let template = &formations_for(7)[2]; // 2-2-2
        let mut roster = vec![
            unrestricted("u1"),
            specialist("gk", Category::GK),
            specialist("fwd", Category::FWD),
            unrestricted("u2"),
            unrestricted("u3"),
            unrestricted("u4"),
            unrestricted("u5"),
        ];
        assign_formation(&mut roster, template);

        assert_eq!(roster[1].current_category, Some(Category::GK));
        assert_eq!(roster[2].current_category, Some(Category::FWD));
        assert!(roster.iter().all(Player::is_on_pitch));
    }

    #[test]
    fn no_slot_is_double_booked() {
        let template = &formations_for(7)[0];
        let mut roster: Vec<Player> =
            (0..9).map(|i| unrestricted(&format!("p{}", i))).collect();
        assign_formation(&mut roster, template);

        let mut coords: Vec<_> = roster.iter().filter_map(|p| p.position).collect();
        assert_eq!(coords.len(), 7);
        coords.sort_by(|a, b| (a.y, a.x).partial_cmp(&(b.y, b.x)).unwrap());
        coords.dedup();
        assert_eq!(coords.len(), 7);
    }

    #[test]
    fn restricted_players_never_leave_their_categories() {
        let template = &formations_for(7)[0]; // 2-3-1
        let mut roster = vec![
            specialist("gk", Category::GK),
            Player::new("dm", "dm", 0)
                .with_eligibility(Eligibility::restricted_to([Category::DEF, Category::MID])),
            specialist("d1", Category::DEF),
            specialist("d2", Category::DEF),
            specialist("d3", Category::DEF), // one DEF too many
            unrestricted("u1"),
            unrestricted("u2"),
            unrestricted("u3"),
        ];
        assign_formation(&mut roster, template);

        for player in &roster {
            if let Some(category) = player.current_category {
                assert!(player.eligibility.allows(category), "{} misplaced", player.id);
            }
        }
        // Both DEF slots were claimed by earlier specialists; d3 is benched.
        assert!(roster[4].is_on_bench());
        // The DEF/MID player ran after the specialists and took the MID slot.
        assert_eq!(roster[1].current_category, Some(Category::MID));
    }

    #[test]
    fn surplus_players_are_benched_in_pass_order() {
        let template = &formations_for(5)[0];
        let mut roster: Vec<Player> =
            (0..8).map(|i| unrestricted(&format!("p{}", i))).collect();
        assign_formation(&mut roster, template);

        assert_eq!(roster.iter().filter(|p| p.is_on_pitch()).count(), 5);
        // Unrestricted pass walks roster order, so the tail is benched.
        assert!(roster[5].is_on_bench());
        assert!(roster[6].is_on_bench());
        assert!(roster[7].is_on_bench());
    }

    #[test]
    fn reassignment_clears_previous_positions() {
        let template = &formations_for(5)[0];
        let mut roster: Vec<Player> =
            (0..5).map(|i| unrestricted(&format!("p{}", i))).collect();
        roster.push(specialist("stuck", Category::GK));

        assign_formation(&mut roster, template);
        assert!(roster[5].is_on_pitch()); // GK specialist got the GK slot

        // Make the specialist lose out on the second run.
        roster.insert(0, specialist("gk2", Category::GK));
        assign_formation(&mut roster, template);
        assert!(roster[0].is_on_pitch());
        assert!(roster[6].is_on_bench());
        assert!(roster[6].current_category.is_none());
    }
}
