//! JSON entry points for the presentation layer.
//!
//! Each function takes a JSON request string and returns a JSON response
//! string; failures come back as `{"success": false, "error": ...}` with the
//! message rendered from [`BoardError`]. These wrappers stay thin — all
//! behavior lives in `engine`.
//!
//! Pure queries carry just the roster. Stateful operations carry the full
//! board blob and return it updated; the undo history is session-local and
//! never part of the blob, so undo stays on [`PitchBoard`] itself.

use crate::engine::board::PitchBoard;
use crate::engine::clock::{GameClock, TickOutcome};
use crate::engine::planner::{plan_auto_subs, PlanConfig};
use crate::engine::{assignment, eligibility};
use crate::error::BoardError;
use crate::models::{formations_for, Category, Player, SubstitutionEvent};
use crate::save::BoardSave;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_json(err: BoardError) -> String {
    let response = ErrorResponse { success: false, error: err.to_string() };
    serde_json::to_string(&response)
        .unwrap_or_else(|_| r#"{"success":false,"error":"serialization failure"}"#.to_string())
}

fn ok_json<T: Serialize>(response: &T) -> String {
    match serde_json::to_string(response) {
        Ok(json) => json,
        Err(err) => error_json(BoardError::from(err)),
    }
}

fn parse_request<T: serde::de::DeserializeOwned>(request_json: &str) -> Result<T, BoardError> {
    serde_json::from_str(request_json).map_err(|err| BoardError::Deserialization(err.to_string()))
}

// ========================
// Pure queries
// ========================

#[derive(Debug, Deserialize)]
pub struct AssignFormationRequest {
    pub players: Vec<Player>,
    pub team_size: usize,
    #[serde(default)]
    pub selected_formation_index: usize,
}

#[derive(Debug, Serialize)]
pub struct AssignFormationResponse {
    pub success: bool,
    pub formation: String,
    pub players: Vec<Player>,
}

pub fn assign_formation_json(request_json: &str) -> String {
    let mut request: AssignFormationRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let Some(template) =
        formations_for(request.team_size).get(request.selected_formation_index)
    else {
        return error_json(BoardError::InvalidFormation(format!(
            "no template at index {} for team size {}",
            request.selected_formation_index, request.team_size
        )));
    };
    assignment::assign_formation(&mut request.players, template);
    ok_json(&AssignFormationResponse {
        success: true,
        formation: template.name.clone(),
        players: request.players,
    })
}

#[derive(Debug, Deserialize)]
pub struct BenchCandidatesRequest {
    pub players: Vec<Player>,
    pub pitch_player_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerIdsResponse {
    pub success: bool,
    pub player_ids: Vec<String>,
}

pub fn bench_candidates_json(request_json: &str) -> String {
    let request: BenchCandidatesRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let player_ids =
        eligibility::valid_bench_candidates(&request.players, &request.pitch_player_id);
    ok_json(&PlayerIdsResponse { success: true, player_ids })
}

#[derive(Debug, Deserialize)]
pub struct SwapTargetsRequest {
    pub players: Vec<Player>,
    pub selected_pitch_id: String,
}

pub fn swap_targets_json(request_json: &str) -> String {
    let request: SwapTargetsRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let player_ids = eligibility::valid_swap_targets(&request.players, &request.selected_pitch_id);
    ok_json(&PlayerIdsResponse { success: true, player_ids })
}

#[derive(Debug, Deserialize)]
pub struct MovablePlayersRequest {
    pub players: Vec<Player>,
    pub bench_player_id: String,
    pub required_category: Category,
    #[serde(default)]
    pub replaced_pitch_id: Option<String>,
}

pub fn movable_players_json(request_json: &str) -> String {
    let request: MovablePlayersRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let player_ids = eligibility::movable_pitch_players(
        &request.players,
        &request.bench_player_id,
        request.required_category,
        request.replaced_pitch_id.as_deref(),
    );
    ok_json(&PlayerIdsResponse { success: true, player_ids })
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub players: Vec<Player>,
    pub clock: GameClock,
    #[serde(default)]
    pub config: Option<PlanConfig>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub events: Vec<SubstitutionEvent>,
}

pub fn plan_auto_subs_json(request_json: &str) -> String {
    let request: PlanRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let events =
        plan_auto_subs(&request.players, &request.clock, request.config.unwrap_or_default());
    ok_json(&PlanResponse { success: true, events })
}

// ========================
// Stateful board operations
// ========================

#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub board: BoardSave,
    #[serde(default)]
    pub now_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub success: bool,
    pub board: BoardSave,
}

#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub success: bool,
    pub outcome: String,
    pub notifications: Vec<String>,
    pub board: BoardSave,
}

/// One driver-loop step: tick the clock, then fire any due planned events.
pub fn tick_json(request_json: &str) -> String {
    let request: BoardRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let mut board = PitchBoard::from_save(request.board);
    let outcome = board.tick(request.now_ms);
    let notifications = board.fire_due_events(request.now_ms);
    let outcome = match outcome {
        TickOutcome::Idle => "idle",
        TickOutcome::Advanced => "advanced",
        TickOutcome::HalfTime => "half_time",
        TickOutcome::FullTime => "full_time",
    };
    ok_json(&TickResponse {
        success: true,
        outcome: outcome.to_string(),
        notifications,
        board: board.to_save(),
    })
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub running: bool,
    pub board: BoardSave,
}

pub fn toggle_json(request_json: &str) -> String {
    let request: BoardRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let mut board = PitchBoard::from_save(request.board);
    let running = board.toggle(request.now_ms);
    ok_json(&ToggleResponse { success: true, running, board: board.to_save() })
}

pub fn reset_json(request_json: &str) -> String {
    let request: BoardRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let mut board = PitchBoard::from_save(request.board);
    board.reset();
    ok_json(&BoardResponse { success: true, board: board.to_save() })
}

#[derive(Debug, Deserialize)]
pub struct RecalculatePlanRequest {
    pub board: BoardSave,
    #[serde(default)]
    pub excluded_out: Option<String>,
    #[serde(default)]
    pub excluded_in: Option<String>,
}

pub fn recalculate_plan_json(request_json: &str) -> String {
    let request: RecalculatePlanRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let mut board = PitchBoard::from_save(request.board);
    let excluded = request.excluded_out.as_deref().zip(request.excluded_in.as_deref());
    board.recalculate_plan(excluded);
    ok_json(&BoardResponse { success: true, board: board.to_save() })
}

#[derive(Debug, Deserialize)]
pub struct RecordGoalRequest {
    pub board: BoardSave,
    #[serde(default)]
    pub scorer_id: Option<String>,
    #[serde(default)]
    pub is_opponent_goal: bool,
}

#[derive(Debug, Serialize)]
pub struct RecordGoalResponse {
    pub success: bool,
    /// (our goals, opponent goals)
    pub score: (u32, u32),
    pub board: BoardSave,
}

pub fn record_goal_json(request_json: &str) -> String {
    let request: RecordGoalRequest = match parse_request(request_json) {
        Ok(r) => r,
        Err(err) => return error_json(err),
    };
    let mut board = PitchBoard::from_save(request.board);
    board.record_goal(request.scorer_id.as_deref(), request.is_opponent_goal);
    ok_json(&RecordGoalResponse { success: true, score: board.score(), board: board.to_save() })
}
