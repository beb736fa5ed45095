use std::time::{Duration, Instant};

use rand::Rng;

pub const TICK: Duration = Duration::from_millis(300);
pub const DONE_WINDOW: Duration = Duration::from_millis(700);
const START: f32 = 2.0;
const CEILING: f32 = 95.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Running { last_tick: Instant },
    Done { at: Instant },
}

/// Cosmetic progress for one outstanding request.
///
/// Creeps toward `CEILING` while running, snaps to 100 on completion, and
/// falls back to 0 once `DONE_WINDOW` has elapsed.
#[derive(Clone, Debug)]
pub struct Progress {
    value: f32,
    phase: Phase,
    completions: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            value: 0.0,
            phase: Phase::Idle,
            completions: 0,
        }
    }
}

impl Progress {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Number of times `finish` has taken effect since construction.
    pub fn completions(&self) -> u32 {
        self.completions
    }

    /// Restarts from scratch; any previous run is discarded.
    pub fn start(&mut self, now: Instant) {
        self.value = START;
        self.phase = Phase::Running { last_tick: now };
    }

    pub fn tick<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        match self.phase {
            Phase::Idle => {}
            Phase::Running { mut last_tick } => {
                while now.saturating_duration_since(last_tick) >= TICK {
                    last_tick += TICK;
                    let remaining = CEILING - self.value;
                    let step = remaining * rng.gen_range(0.03f32..0.12f32);
                    self.value = (self.value + step).min(CEILING);
                }
                self.phase = Phase::Running { last_tick };
            }
            Phase::Done { at } => {
                if now.saturating_duration_since(at) >= DONE_WINDOW {
                    self.value = 0.0;
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    /// Snaps to 100. Ignored unless a run is in progress.
    pub fn finish(&mut self, now: Instant) {
        if self.is_running() {
            self.value = 100.0;
            self.phase = Phase::Done { at: now };
            self.completions += 1;
        }
    }

    /// Time until the next visible change, for repaint scheduling.
    pub fn next_wakeup(&self) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running { .. } => Some(TICK),
            Phase::Done { .. } => Some(DONE_WINDOW),
        }
    }
}
