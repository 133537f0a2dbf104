//! Two-half game clock state machine.
//!
//! The clock is driven by a periodic one-second `tick` plus discrete
//! `toggle`/`reset` calls. Suspension is handled by `catch_up`, which credits
//! wall-clock time elapsed since the last stamp, capped at the half duration
//! so a long suspension never rolls the match into the next half by itself.

use serde::{Deserialize, Serialize};

/// What a single tick did. Callers translate `HalfTime`/`FullTime` into
/// user-visible notifications; the clock itself emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (paused or finished); nothing happened.
    Idle,
    /// One second accrued within the current half.
    Advanced,
    /// Half 1 expired; clock is now paused at the start of half 2.
    HalfTime,
    /// Half 2 expired; clock is finished and frozen at the maximum.
    FullTime,
}

impl TickOutcome {
    /// Whether the tick moved the clock state at all. Note a boundary
    /// transition after a capped catch-up moves state without accruing a
    /// second; callers crediting playing time compare `total_elapsed`.
    pub fn advanced(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameClock {
    pub minutes_per_half: u32,
    /// 1 or 2.
    pub half: u8,
    /// Seconds into the current half.
    pub elapsed_seconds: u32,
    pub running: bool,
    pub finished: bool,
    /// Wall-clock stamp (unix ms) of the last tick/toggle, used by catch-up.
    pub last_timestamp_ms: u64,
}

impl GameClock {
    pub fn new(minutes_per_half: u32) -> Self {
        Self {
            minutes_per_half,
            half: 1,
            elapsed_seconds: 0,
            running: false,
            finished: false,
            last_timestamp_ms: 0,
        }
    }

    /// Duration of one half in seconds.
    pub fn half_seconds(&self) -> u32 {
        self.minutes_per_half * 60
    }

    /// Total seconds elapsed across the whole match so far.
    pub fn total_elapsed(&self) -> u32 {
        if self.half >= 2 {
            self.half_seconds() + self.elapsed_seconds
        } else {
            self.elapsed_seconds
        }
    }

    /// Seconds left in the current half.
    pub fn remaining_in_half(&self) -> u32 {
        self.half_seconds().saturating_sub(self.elapsed_seconds)
    }

    /// Seconds left across the remainder of the match.
    pub fn remaining_total(&self) -> u32 {
        if self.finished {
            return 0;
        }
        let mut remaining = self.remaining_in_half();
        if self.half == 1 {
            remaining += self.half_seconds();
        }
        remaining
    }

    /// Pause/resume within the active half. No-op once finished. Returns the
    /// new running state.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        self.running = !self.running;
        self.last_timestamp_ms = now_ms;
        self.running
    }

    /// Advance one second. Only effective while running. A half that is
    /// already at its duration (possible after a capped catch-up) transitions
    /// without accruing another second.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if !self.running || self.finished {
            return TickOutcome::Idle;
        }
        self.last_timestamp_ms = now_ms;
        if self.elapsed_seconds < self.half_seconds() {
            self.elapsed_seconds += 1;
        }
        if self.elapsed_seconds < self.half_seconds() {
            return TickOutcome::Advanced;
        }
        if self.half == 1 {
            // Half time: pause at the start of half 2, elapsed reset.
            self.running = false;
            self.half = 2;
            self.elapsed_seconds = 0;
            log::info!("game clock: half time");
            TickOutcome::HalfTime
        } else {
            // Full time: freeze at the maximum, no further ticks processed.
            self.running = false;
            self.finished = true;
            self.elapsed_seconds = self.half_seconds();
            log::info!("game clock: full time");
            TickOutcome::FullTime
        }
    }

    /// Back to a paused first half at zero.
    pub fn reset(&mut self) {
        self.half = 1;
        self.elapsed_seconds = 0;
        self.running = false;
        self.finished = false;
    }

    /// Credit wall-clock seconds elapsed since `last_timestamp_ms`, capped at
    /// the half duration. Returns the seconds actually credited.
    pub fn catch_up(&mut self, now_ms: u64) -> u32 {
        if !self.running || self.finished {
            self.last_timestamp_ms = now_ms;
            return 0;
        }
        let wall_seconds = (now_ms.saturating_sub(self.last_timestamp_ms) / 1000) as u32;
        let credited = wall_seconds.min(self.remaining_in_half());
        self.elapsed_seconds += credited;
        self.last_timestamp_ms = now_ms;
        if credited > 0 {
            log::debug!("game clock: caught up {}s after suspension", credited);
        }
        credited
    }
}
