use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::rng::DEFAULT_BUFFER_LEN;

/// Timing and rule knobs for a single match.
///
/// All durations are whole seconds of game clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Length of each half
    pub half_duration_secs: u32,
    /// Clock cost of a pass attempt
    pub time_per_pass: u32,
    /// Clock cost of a shot attempt
    pub time_per_shot: u32,
    /// Clock lost restarting play after a goal
    pub time_after_score: u32,
    /// Backup keepers open the second half and hand back to the starters
    /// this many seconds before the half's midpoint
    pub keeper_return_lead_secs: u32,
    /// When false a level score at full time is a configuration error
    pub allow_ties: bool,
    /// Number of uniform draws pre-generated per refill of the probability stack
    pub probability_buffer: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            half_duration_secs: 30 * 60,
            time_per_pass: 2,
            time_per_shot: 5,
            time_after_score: 15,
            keeper_return_lead_secs: 30,
            allow_ties: true,
            probability_buffer: DEFAULT_BUFFER_LEN,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.half_duration_secs == 0 {
            return Err(EngineError::InvalidConfig(
                "half_duration_secs must be >0".into(),
            ));
        }
        // A zero-cost action would let a possession loop forever without
        // moving the clock.
        if self.time_per_pass == 0 || self.time_per_shot == 0 {
            return Err(EngineError::InvalidConfig(
                "time_per_pass and time_per_shot must be >0".into(),
            ));
        }
        if self.keeper_return_lead_secs > self.half_duration_secs / 2 {
            return Err(EngineError::InvalidConfig(
                "keeper_return_lead_secs must not exceed half of half_duration_secs".into(),
            ));
        }
        if self.probability_buffer == 0 {
            return Err(EngineError::InvalidConfig(
                "probability_buffer must be >0".into(),
            ));
        }
        Ok(())
    }

    /// Remaining second-half time at which starting keepers return.
    pub fn keeper_return_at(&self) -> u32 {
        self.half_duration_secs / 2 + self.keeper_return_lead_secs
    }
}
