/// Default quiz length in seconds (30 minutes).
pub const DEFAULT_DURATION_SECS: u32 = 1800;

/// Remaining-time counter for one session. Only ever counts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { remaining: u32 },
    Expired,
}

impl Countdown {
    /// A zero duration is bumped to one second so a session is never born expired.
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        let total = total_secs.max(1);
        Self {
            total,
            remaining: total,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.total - self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) -> Tick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            Tick::Expired
        } else {
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

/// Render seconds as `MM:SS`.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
