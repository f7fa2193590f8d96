/// Result of a single clock decrement.
///
/// `just_expired` is true only for the decrement that moves the clock from
/// running to zero; decrementing an already expired clock reports `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub remaining: u32,
    pub just_expired: bool,
}

/// Countdown timer for one half of play, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameClock {
    remaining: u32,
}

impl GameClock {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn set_time(&mut self, seconds: u32) {
        self.remaining = seconds;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Runs the clock down by `amount`, flooring at zero.
    pub fn decrement(&mut self, amount: u32) -> ClockTick {
        if self.remaining == 0 {
            return ClockTick {
                remaining: 0,
                just_expired: false,
            };
        }
        self.remaining = self.remaining.saturating_sub(amount);
        ClockTick {
            remaining: self.remaining,
            just_expired: self.remaining == 0,
        }
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
