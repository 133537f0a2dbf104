//! Match-day pitch board facade.
//!
//! `PitchBoard` owns the roster, clock, auto-sub plan, goal log and undo
//! history for one session and exposes the operations the presentation
//! layer calls. All inputs arrive as explicit parameters; there is no
//! singleton state, so a board is independently testable.

use crate::engine::assignment::assign_formation;
use crate::engine::clock::{GameClock, TickOutcome};
use crate::engine::eligibility;
use crate::engine::history::UndoStack;
use crate::engine::planner::{plan_auto_subs, plan_excluding, PlanConfig};
use crate::models::{
    formations_for, Category, FormationTemplate, GoalEvent, PitchCoord, Player, SubstitutionEvent,
};
use crate::save::BoardSave;

#[derive(Debug)]
pub struct PitchBoard {
    pub players: Vec<Player>,
    pub team_size: usize,
    pub selected_formation_index: usize,
    pub ball_position: Option<PitchCoord>,
    pub clock: GameClock,
    pub plan: Vec<SubstitutionEvent>,
    pub plan_config: PlanConfig,
    pub auto_sub_active: bool,
    pub auto_sub_paused: bool,
    pub mock_mode: bool,
    pub linked_event_id: Option<String>,
    pub goals: Vec<GoalEvent>,
    /// Last accounted total elapsed seconds across the match; used to credit
    /// player minutes after a suspension.
    pub last_timer_seconds: u32,
    history: UndoStack,
    restoring: bool,
}

impl PitchBoard {
    pub fn new(players: Vec<Player>, team_size: usize, minutes_per_half: u32) -> Self {
        Self {
            players,
            team_size,
            selected_formation_index: 0,
            ball_position: None,
            clock: GameClock::new(minutes_per_half),
            plan: Vec::new(),
            plan_config: PlanConfig::default(),
            auto_sub_active: false,
            auto_sub_paused: false,
            mock_mode: false,
            linked_event_id: None,
            goals: Vec::new(),
            last_timer_seconds: 0,
            history: UndoStack::new(),
            restoring: false,
        }
    }

    // ========================
    // Formation
    // ========================

    /// Currently selected formation template, if the team size has one.
    pub fn formation(&self) -> Option<&'static FormationTemplate> {
        formations_for(self.team_size).get(self.selected_formation_index)
    }

    /// Assign the roster onto the selected formation. No-op when the team
    /// size has no template table.
    pub fn assign_formation(&mut self) {
        if let Some(template) = self.formation() {
            assign_formation(&mut self.players, template);
            log::info!("assigned formation {} for team size {}", template.name, self.team_size);
        }
    }

    // ========================
    // Eligibility queries (pure)
    // ========================

    pub fn valid_bench_candidates(&self, pitch_player_id: &str) -> Vec<String> {
        eligibility::valid_bench_candidates(&self.players, pitch_player_id)
    }

    pub fn valid_swap_targets(&self, selected_pitch_id: &str) -> Vec<String> {
        eligibility::valid_swap_targets(&self.players, selected_pitch_id)
    }

    pub fn movable_pitch_players(
        &self,
        bench_player_id: &str,
        required_category: Category,
        replaced_pitch_id: Option<&str>,
    ) -> Vec<String> {
        eligibility::movable_pitch_players(
            &self.players,
            bench_player_id,
            required_category,
            replaced_pitch_id,
        )
    }

    // ========================
    // Auto-substitution plan
    // ========================

    pub fn plan_auto_subs(&mut self) {
        self.plan = plan_auto_subs(&self.players, &self.clock, self.plan_config);
        self.auto_sub_active = !self.plan.is_empty();
    }

    /// Discard all unexecuted events and re-plan from the live roster and
    /// current elapsed time.
    pub fn recalculate_plan(&mut self, excluded: Option<(&str, &str)>) {
        self.plan.retain(|e| e.executed);
        let mut fresh = plan_excluding(&self.players, &self.clock, self.plan_config, excluded);
        self.plan.append(&mut fresh);
    }

    /// Consume a pending event without executing it, then re-plan with the
    /// skipped pairing excluded from immediate reselection.
    pub fn skip_event(&mut self, index: usize) {
        let Some(event) = self.plan.get_mut(index) else {
            return;
        };
        if event.executed {
            return;
        }
        event.executed = true;
        let pair = (event.player_out.clone(), event.player_in.clone());
        log::info!("skipped planned substitution {} -> {}", pair.0, pair.1);
        self.recalculate_plan(Some((pair.0.as_str(), pair.1.as_str())));
    }

    /// Flag a player injured. If the player was scheduled to come on, the
    /// remaining plan is recomputed.
    pub fn set_injured(&mut self, player_id: &str, injured: bool) {
        let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) else {
            return;
        };
        player.is_injured = injured;
        let scheduled_in =
            self.plan.iter().any(|e| !e.executed && e.player_in == player_id);
        if injured && scheduled_in {
            log::info!("scheduled incoming player {} injured, re-planning", player_id);
            self.recalculate_plan(None);
        }
    }

    /// Execute every due, unexecuted event against the live roster. Each
    /// event re-validates both players first; an invalid event is consumed
    /// without touching the roster. Returns human-readable notification
    /// strings for the caller's text-notification collaborator.
    pub fn fire_due_events(&mut self, now_ms: u64) -> Vec<String> {
        if !self.auto_sub_active || self.auto_sub_paused {
            return Vec::new();
        }
        let mut notices = Vec::new();
        let (half, elapsed) = (self.clock.half, self.clock.elapsed_seconds);

        for idx in 0..self.plan.len() {
            if !self.plan[idx].is_due(half, elapsed) {
                continue;
            }
            let event = self.plan[idx].clone();
            if let Some(notice) = self.execute_event(&event, now_ms) {
                notices.push(notice);
            }
            self.plan[idx].executed = true;
        }
        notices
    }

    /// The roster may have drifted since planning: out must still be on
    /// pitch, in must still be a fit bench player, and any swap partner must
    /// still be on pitch.
    fn execute_event(&mut self, event: &SubstitutionEvent, now_ms: u64) -> Option<String> {
        let out_idx = self.index_of(&event.player_out)?;
        let in_idx = self.index_of(&event.player_in)?;
        if !self.players[out_idx].is_on_pitch()
            || !self.players[in_idx].is_on_bench()
            || self.players[in_idx].is_injured
        {
            log::debug!(
                "planned substitution {} -> {} no longer valid, consumed without effect",
                event.player_out,
                event.player_in
            );
            return None;
        }
        let mover_idx = match &event.position_swap {
            Some(swap) => {
                let idx = self.index_of(&swap.player_id)?;
                if !self.players[idx].is_on_pitch() {
                    return None;
                }
                Some(idx)
            }
            None => None,
        };

        let out_name = self.players[out_idx].name.clone();
        let in_name = self.players[in_idx].name.clone();
        self.push_undo(format!("Auto substitution: {} on for {}", in_name, out_name), now_ms);

        let out_coord = self.players[out_idx].position.unwrap_or_default();
        let out_cat = self.players[out_idx].current_category;
        self.players[out_idx].send_to_bench();

        match (mover_idx, &event.position_swap) {
            (Some(m), Some(swap)) => {
                let vacated_coord = self.players[m].position.unwrap_or_default();
                self.players[m].place(out_coord, swap.to_category);
                self.players[in_idx].place(vacated_coord, swap.from_category);
            }
            _ => {
                if let Some(cat) = out_cat {
                    self.players[in_idx].place(out_coord, cat);
                }
            }
        }

        let mut notice =
            format!("{} {} comes on for {}", event.minute_label(), in_name, out_name);
        if let Some(swap) = &event.position_swap {
            if let Some(m) = mover_idx {
                notice.push_str(&format!(
                    ", {} moves {} to {}",
                    self.players[m].name,
                    swap.from_category.label(),
                    swap.to_category.label()
                ));
            }
        }
        log::info!("{}", notice);
        Some(notice)
    }

    // ========================
    // Manual mutations
    // ========================

    /// Manual substitution confirmed by the caller. Returns false (no-op)
    /// when the pair is no longer valid.
    pub fn apply_substitution(&mut self, out_id: &str, in_id: &str, now_ms: u64) -> bool {
        let Some(out_idx) = self.index_of(out_id) else { return false };
        let Some(in_idx) = self.index_of(in_id) else { return false };
        let Some(category) = self.players[out_idx].current_category else { return false };
        if !self.players[in_idx].is_on_bench()
            || self.players[in_idx].is_injured
            || !self.players[in_idx].eligibility.allows(category)
        {
            return false;
        }

        let description = format!(
            "Substitution: {} on for {}",
            self.players[in_idx].name, self.players[out_idx].name
        );
        self.push_undo(description, now_ms);

        let coord = self.players[out_idx].position.unwrap_or_default();
        self.players[out_idx].send_to_bench();
        self.players[in_idx].place(coord, category);
        true
    }

    /// Symmetric two-way position swap between two pitch players.
    pub fn apply_swap(&mut self, a_id: &str, b_id: &str, now_ms: u64) -> bool {
        let Some(a) = self.index_of(a_id) else { return false };
        let Some(b) = self.index_of(b_id) else { return false };
        if a == b {
            return false;
        }
        let (Some(a_cat), Some(b_cat)) =
            (self.players[a].current_category, self.players[b].current_category)
        else {
            return false;
        };
        if !self.players[a].eligibility.allows(b_cat) || !self.players[b].eligibility.allows(a_cat)
        {
            return false;
        }

        let description =
            format!("Swap: {} <-> {}", self.players[a].name, self.players[b].name);
        self.push_undo(description, now_ms);

        let a_coord = self.players[a].position.unwrap_or_default();
        let b_coord = self.players[b].position.unwrap_or_default();
        self.players[a].place(b_coord, b_cat);
        self.players[b].place(a_coord, a_cat);
        true
    }

    // ========================
    // Clock
    // ========================

    /// One-second tick. Accrues playing time for everyone on pitch whenever
    /// the total elapsed time actually grew; a bare boundary transition
    /// (half already spent after a capped catch-up) credits nothing.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let before = self.clock.total_elapsed();
        let outcome = self.clock.tick(now_ms);
        let accrued = self.clock.total_elapsed().saturating_sub(before);
        if accrued > 0 {
            for player in self.players.iter_mut().filter(|p| p.is_on_pitch()) {
                player.seconds_played += accrued;
            }
        }
        if outcome.advanced() {
            self.last_timer_seconds = self.clock.total_elapsed();
        }
        outcome
    }

    pub fn toggle(&mut self, now_ms: u64) -> bool {
        self.clock.toggle(now_ms)
    }

    /// Discard the session: clock back to a paused first half, plan, goals
    /// and undo history cleared.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.plan.clear();
        self.goals.clear();
        self.history.clear();
        self.auto_sub_active = false;
        self.auto_sub_paused = false;
        self.last_timer_seconds = 0;
        log::info!("pitch board reset");
    }

    /// Catch up after application suspension: credit wall-clock time to the
    /// running clock (capped at the half duration), then credit the delta
    /// between the last accounted total and the recomputed total to every
    /// player currently on pitch.
    pub fn reconcile_after_resume(&mut self, now_ms: u64) {
        self.clock.catch_up(now_ms);

        let current_total = self.clock.total_elapsed();
        let delta = current_total.saturating_sub(self.last_timer_seconds);
        if delta > 0 {
            for player in self.players.iter_mut().filter(|p| p.is_on_pitch()) {
                player.seconds_played += delta;
            }
            log::info!("credited {}s of playing time after resume", delta);
        }
        self.last_timer_seconds = current_total;
    }

    // ========================
    // Goals
    // ========================

    pub fn record_goal(&mut self, scorer_id: Option<&str>, is_opponent_goal: bool) {
        self.goals.push(GoalEvent {
            scorer_id: scorer_id.map(str::to_string),
            time_seconds: self.clock.elapsed_seconds,
            half: self.clock.half,
            is_opponent_goal,
        });
    }

    /// (our goals, opponent goals)
    pub fn score(&self) -> (u32, u32) {
        let theirs = self.goals.iter().filter(|g| g.is_opponent_goal).count() as u32;
        (self.goals.len() as u32 - theirs, theirs)
    }

    // ========================
    // Undo history
    // ========================

    /// Snapshot the current roster before a mutation.
    pub fn push_undo(&mut self, description: impl Into<String>, now_ms: u64) {
        self.history.push(&self.players, description, now_ms);
    }

    /// Replace the live roster with the most recent snapshot. No-op on an
    /// empty stack.
    pub fn undo(&mut self) -> bool {
        self.undo_with(|_| {})
    }

    /// Like [`undo`](Self::undo), but runs `on_restore` while the restore
    /// guard is up. Reactive callers (plan refresh, UI sync) go through this
    /// so they can check `is_restoring` and suppress side effects triggered
    /// purely by the restored state.
    pub fn undo_with(&mut self, on_restore: impl FnOnce(&mut Self)) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.restoring = true;
        self.players = snapshot.roster;
        on_restore(self);
        self.restoring = false;
        log::info!("undid: {}", snapshot.description);
        true
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn undo_available(&self, now_ms: u64) -> bool {
        self.history.undo_available(now_ms)
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    // ========================
    // Persistence
    // ========================

    /// Convert the live board to the persisted blob shape.
    pub fn to_save(&self) -> BoardSave {
        BoardSave {
            version: crate::save::SAVE_VERSION,
            last_update_time: crate::save::current_timestamp(),
            players: self.players.clone(),
            team_size: self.team_size,
            selected_formation_index: self.selected_formation_index,
            ball_position: self.ball_position,
            auto_sub_plan: self.plan.clone(),
            auto_sub_active: self.auto_sub_active,
            auto_sub_paused: self.auto_sub_paused,
            plan_config: Some(self.plan_config),
            mock_mode: self.mock_mode,
            linked_event_id: self.linked_event_id.clone(),
            goals: self.goals.clone(),
            clock: self.clock.clone(),
            last_timer_seconds: self.last_timer_seconds,
        }
    }

    /// Restore a board from a persisted blob. The undo history is per
    /// session and starts empty.
    pub fn from_save(save: BoardSave) -> Self {
        Self {
            players: save.players,
            team_size: save.team_size,
            selected_formation_index: save.selected_formation_index,
            ball_position: save.ball_position,
            clock: save.clock,
            plan: save.auto_sub_plan,
            plan_config: save.plan_config.unwrap_or_default(),
            auto_sub_active: save.auto_sub_active,
            auto_sub_paused: save.auto_sub_paused,
            mock_mode: save.mock_mode,
            linked_event_id: save.linked_event_id,
            goals: save.goals,
            last_timer_seconds: save.last_timer_seconds,
            history: UndoStack::new(),
            restoring: false,
        }
    }
}
