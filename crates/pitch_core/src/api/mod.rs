pub mod board_json;

pub use board_json::{
    assign_formation_json, bench_candidates_json, movable_players_json, plan_auto_subs_json,
    recalculate_plan_json, record_goal_json, reset_json, swap_targets_json, tick_json,
    toggle_json,
};
