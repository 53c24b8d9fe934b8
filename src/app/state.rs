use crate::config::AppConfig;
use crate::countdown::{digits, CountdownConfig, CountdownState, Direction, TimeUnits};
use std::time::{Duration, Instant};

/// Minimum digits shown per group.
pub const GROUP_WIDTH: usize = 2;

/// One digit cell and its most recent change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitFlip {
    pub current: u8,
    pub previous: Option<u8>,
    pub changed_at: Option<Instant>,
}

impl DigitFlip {
    pub fn settled(digit: u8) -> Self {
        Self {
            current: digit,
            previous: None,
            changed_at: None,
        }
    }

    /// Linear progress of the flip in `0.0..=1.0`. Settled digits are at 1.
    pub fn progress(&self, now: Instant, duration: Duration) -> f32 {
        match self.changed_at {
            Some(at) if !duration.is_zero() => {
                let elapsed = now.saturating_duration_since(at);
                (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            }
            _ => 1.0,
        }
    }

    pub fn is_flipping(&self, now: Instant, duration: Duration) -> bool {
        self.previous.is_some() && self.progress(now, duration) < 1.0
    }
}

/// Ease-out cubic.
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Digit cells for days, hours, minutes, seconds. Cosmetic only: the values
/// always come from the latest countdown snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FlipBoard {
    groups: [Vec<DigitFlip>; 4],
}

impl FlipBoard {
    pub fn new(units: TimeUnits) -> Self {
        Self {
            groups: units
                .fields()
                .map(|field| digits(field, GROUP_WIDTH).into_iter().map(DigitFlip::settled).collect()),
        }
    }

    /// Start a flip on every digit whose value changed. A group that gains or
    /// loses a digit is redrawn without animation.
    pub fn update(&mut self, units: TimeUnits, now: Instant) {
        for (group, field) in self.groups.iter_mut().zip(units.fields()) {
            let next = digits(field, GROUP_WIDTH);
            if next.len() != group.len() {
                *group = next.into_iter().map(DigitFlip::settled).collect();
                continue;
            }
            for (cell, digit) in group.iter_mut().zip(next) {
                if cell.current != digit {
                    *cell = DigitFlip {
                        current: digit,
                        previous: Some(cell.current),
                        changed_at: Some(now),
                    };
                }
            }
        }
    }

    pub fn groups(&self) -> &[Vec<DigitFlip>; 4] {
        &self.groups
    }

    pub fn is_animating(&self, now: Instant, duration: Duration) -> bool {
        self.groups
            .iter()
            .flatten()
            .any(|cell| cell.is_flipping(now, duration))
    }
}

/// What the status bar reports about the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Done,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Running => "RUNNING",
            Status::Paused => "PAUSED",
            Status::Done => "DONE",
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub countdown: CountdownState,
    pub stop: i64,
    pub direction: Direction,
    pub interval: Duration,
    pub flips: FlipBoard,
    /// Whether the previous frame still had a flip in progress.
    pub animating: bool,
    pub dirty: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, countdown: &CountdownConfig, initial: CountdownState) -> Self {
        Self {
            config,
            countdown: initial,
            stop: countdown.stop,
            direction: countdown.direction,
            interval: countdown.interval,
            flips: FlipBoard::new(TimeUnits::from_count(initial.value)),
            animating: false,
            dirty: true,
            should_quit: false,
        }
    }

    /// Take a new countdown snapshot.
    pub fn apply(&mut self, snapshot: CountdownState, now: Instant) {
        if snapshot.value != self.countdown.value {
            self.flips.update(TimeUnits::from_count(snapshot.value), now);
        }
        self.countdown = snapshot;
        self.dirty = true;
    }

    pub fn at_bound(&self) -> bool {
        self.countdown.value == self.stop
    }

    pub fn status(&self) -> Status {
        if self.countdown.is_running {
            Status::Running
        } else if self.at_bound() {
            Status::Done
        } else {
            Status::Paused
        }
    }
}
