//! Fairness-based auto-substitution planning.
//!
//! The planner produces a rotation schedule for the remainder of the match.
//! It runs against a simulated pitch mapping seeded from the live roster, so
//! each planned event accounts for the rotations planned before it. The
//! pairing rule is greedy on purpose: most-played pitch player out,
//! least-played eligible bench player in. Exact output ordering is relied on
//! by callers and tests; do not "improve" it into a global optimum.

use crate::engine::clock::GameClock;
use crate::models::{Category, Player, PositionSwap, SubstitutionEvent};
use serde::{Deserialize, Serialize};

/// Minimum stretch of play a rotation is worth; caps how many subs fit into
/// the remaining window.
pub const MIN_SECONDS_PER_SUB: u32 = 120;

/// Planner behavior toggles, persisted with the board settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanConfig {
    /// When false, at most one event is scheduled per timestamp.
    #[serde(default = "default_true")]
    pub batch_subs: bool,
    /// When false, candidates that would need a position swap are skipped in
    /// favor of the next bench candidate.
    #[serde(default = "default_true")]
    pub position_swaps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self { batch_subs: true, position_swaps: true }
    }
}

/// Plan the rotation for the remainder of the match.
pub fn plan_auto_subs(
    roster: &[Player],
    clock: &GameClock,
    config: PlanConfig,
) -> Vec<SubstitutionEvent> {
    plan_excluding(roster, clock, config, None)
}

/// Like [`plan_auto_subs`], but keeps `excluded` (a just-skipped out/in
/// pairing) from being reselected for the first planned event.
pub fn plan_excluding(
    roster: &[Player],
    clock: &GameClock,
    config: PlanConfig,
    excluded: Option<(&str, &str)>,
) -> Vec<SubstitutionEvent> {
    if clock.finished || roster.is_empty() {
        return Vec::new();
    }

    let half_secs = clock.half_seconds();
    let start_total = clock.total_elapsed();
    let end_total = half_secs * 2;
    let window = end_total.saturating_sub(start_total);

    // Simulated pitch mapping; the live roster is never touched.
    let mut sim_cat: Vec<Option<Category>> = roster.iter().map(|p| p.current_category).collect();
    let mut sim_sec: Vec<u32> = roster.iter().map(|p| p.seconds_played).collect();

    // Goalkeeper handling is independent: one swap at the half-2 boundary,
    // and only when exactly one bench player is GK-restricted-only.
    let mut gk_pending: Option<(usize, usize)> = None;
    if clock.half == 1 {
        let specialists: Vec<usize> = roster
            .iter()
            .enumerate()
            .filter(|(i, p)| {
                sim_cat[*i].is_none() && !p.is_injured && p.eligibility.is_goalkeeper_only()
            })
            .map(|(i, _)| i)
            .collect();
        if specialists.len() == 1 {
            if let Some(gk_out) = sim_cat.iter().position(|c| *c == Some(Category::GK)) {
                gk_pending = Some((gk_out, specialists[0]));
            }
        }
    }

    let bench_outfield_count = roster
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            sim_cat[*i].is_none() && !p.is_injured && !p.eligibility.is_goalkeeper_only()
        })
        .count();
    let subs_needed = bench_outfield_count.min((window / MIN_SECONDS_PER_SUB) as usize);

    // Even timestamps in total-match seconds. Events fill the current half
    // first, each half spaced evenly on its own; only the overflow beyond
    // the half's capacity spills across the boundary into half 2.
    let mut times: Vec<u32> = Vec::new();
    if subs_needed > 0 {
        if clock.half == 1 {
            let first_half_window = half_secs - start_total;
            let capacity = (first_half_window / MIN_SECONDS_PER_SUB) as usize;
            let in_first = subs_needed.min(capacity);
            push_even_times(&mut times, start_total, first_half_window, in_first, config.batch_subs);
            push_even_times(&mut times, half_secs, half_secs, subs_needed - in_first, config.batch_subs);
        } else {
            push_even_times(&mut times, start_total, window, subs_needed, config.batch_subs);
        }
    }

    let mut events: Vec<SubstitutionEvent> = Vec::new();
    let mut cursor = start_total;

    for (k, &t) in times.iter().enumerate() {
        advance_sim(&mut sim_sec, &mut sim_cat, roster, cursor, t, half_secs, &mut gk_pending, &mut events);
        cursor = t;

        // Most-played outfield pitch player; ties go to roster order.
        let out = match most_played_outfield(&sim_cat, &sim_sec) {
            Some(idx) => idx,
            None => break,
        };
        let out_cat = match sim_cat[out] {
            Some(c) => c,
            None => break,
        };

        let mut bench: Vec<usize> = (0..roster.len())
            .filter(|&i| {
                sim_cat[i].is_none()
                    && !roster[i].is_injured
                    && !roster[i].eligibility.is_goalkeeper_only()
            })
            .collect();
        if bench.is_empty() {
            break;
        }
        bench.sort_by_key(|&i| (sim_sec[i], i));

        let skip_pair = |cand: usize| -> bool {
            k == 0
                && excluded.is_some_and(|(out_id, in_id)| {
                    roster[out].id == out_id && roster[cand].id == in_id
                })
        };

        let mut chosen: Option<(usize, Option<usize>)> = None;
        for &cand in &bench {
            if skip_pair(cand) {
                continue;
            }
            if roster[cand].eligibility.allows(out_cat) {
                chosen = Some((cand, None));
                break;
            }
            if config.position_swaps {
                let mover = (0..roster.len()).find(|&m| {
                    m != out
                        && sim_cat[m].is_some()
                        && sim_cat[m] != Some(Category::GK)
                        && roster[m].eligibility.allows(out_cat)
                        && roster[cand].eligibility.allows(sim_cat[m].unwrap())
                });
                if let Some(m) = mover {
                    chosen = Some((cand, Some(m)));
                    break;
                }
            }
        }

        // Permissive fallback: pair most-played-out with least-played-in
        // regardless of category mismatch. This is a deliberate carry-over
        // the callers depend on, not a defect.
        let (cand, mover) = chosen.unwrap_or_else(|| {
            let fallback = bench.iter().copied().find(|&c| !skip_pair(c)).unwrap_or(bench[0]);
            (fallback, None)
        });

        let position_swap = mover.map(|m| {
            let vacated = sim_cat[m].unwrap();
            PositionSwap {
                player_id: roster[m].id.clone(),
                from_category: vacated,
                to_category: out_cat,
            }
        });

        // Apply to the simulation so later timestamps see this rotation.
        match mover {
            Some(m) => {
                let vacated = sim_cat[m].unwrap();
                sim_cat[m] = Some(out_cat);
                sim_cat[cand] = Some(vacated);
            }
            None => sim_cat[cand] = Some(out_cat),
        }
        sim_cat[out] = None;

        let (half, time_seconds) =
            if t >= half_secs { (2, t - half_secs) } else { (1, t) };
        events.push(SubstitutionEvent {
            time_seconds,
            half,
            player_out: roster[out].id.clone(),
            player_in: roster[cand].id.clone(),
            position_swap,
            executed: false,
        });
    }

    // A GK swap that no outfield timestamp reached still gets scheduled.
    if let Some((gk_out, gk_in)) = gk_pending.take() {
        events.push(gk_boundary_event(roster, gk_out, gk_in));
    }

    events.sort_by_key(|e| (e.half, e.time_seconds));
    log::debug!(
        "planned {} substitution event(s) over {}s window",
        events.len(),
        window
    );
    events
}

/// Append `count` timestamps spaced evenly over `[start, start + len)`.
/// With batch subs disabled, a timestamp colliding with the previous one is
/// bumped forward a second so at most one event lands per timestamp.
fn push_even_times(times: &mut Vec<u32>, start: u32, len: u32, count: usize, batch_subs: bool) {
    if count == 0 || len == 0 {
        return;
    }
    let interval = len / (count as u32 + 1);
    let mut prev = times.last().copied();
    for k in 1..=count as u32 {
        let mut t = start + k * interval;
        if !batch_subs {
            if let Some(p) = prev {
                if t <= p {
                    t = p + 1;
                }
            }
        }
        if t >= start + len {
            break;
        }
        prev = Some(t);
        times.push(t);
    }
}

/// Credit simulated playing time from `from` to `to`, applying the pending
/// GK boundary swap when the boundary is crossed.
#[allow(clippy::too_many_arguments)]
fn advance_sim(
    sim_sec: &mut [u32],
    sim_cat: &mut [Option<Category>],
    roster: &[Player],
    from: u32,
    to: u32,
    boundary: u32,
    gk_pending: &mut Option<(usize, usize)>,
    events: &mut Vec<SubstitutionEvent>,
) {
    let credit = |sim_sec: &mut [u32], sim_cat: &[Option<Category>], dt: u32| {
        for (sec, cat) in sim_sec.iter_mut().zip(sim_cat.iter()) {
            if cat.is_some() {
                *sec += dt;
            }
        }
    };

    if from < boundary && to >= boundary {
        credit(sim_sec, sim_cat, boundary - from);
        if let Some((gk_out, gk_in)) = gk_pending.take() {
            sim_cat[gk_out] = None;
            sim_cat[gk_in] = Some(Category::GK);
            events.push(gk_boundary_event(roster, gk_out, gk_in));
        }
        credit(sim_sec, sim_cat, to - boundary);
    } else {
        credit(sim_sec, sim_cat, to - from);
    }
}

fn gk_boundary_event(roster: &[Player], gk_out: usize, gk_in: usize) -> SubstitutionEvent {
    SubstitutionEvent {
        time_seconds: 0,
        half: 2,
        player_out: roster[gk_out].id.clone(),
        player_in: roster[gk_in].id.clone(),
        position_swap: None,
        executed: false,
    }
}

fn most_played_outfield(sim_cat: &[Option<Category>], sim_sec: &[u32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in 0..sim_cat.len() {
        match sim_cat[i] {
            Some(Category::GK) | None => continue,
            Some(_) => {
                if best.map_or(true, |b| sim_sec[i] > sim_sec[b]) {
                    best = Some(i);
                }
            }
        }
    }
    best
}
