//! Periodic callback driver.
//!
//! An [`Interval`] owns at most one spawned schedule. The schedule is keyed
//! only by the period: swapping the callback goes through a shared cell and
//! leaves the running schedule (and its phase) alone, while changing the
//! period cancels the pending schedule and starts a fresh one.
//!
//! Cancellation is synchronous: once `set_period` or `drop` returns, no tick
//! of the old schedule is running and none will run, even on a
//! multi-threaded runtime where the old task may already be past its timer.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Invoked once per period. Returning `Break` ends the current schedule.
pub type Callback = Box<dyn FnMut() -> ControlFlow<()> + Send>;

/// Smallest period a schedule actually runs at. A zero period is accepted
/// and rounded up to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// The current callback and the generation of the schedule allowed to call
/// it. Cancelling bumps the generation under the same lock.
struct Slot {
    callback: Callback,
    generation: u64,
}

pub struct Interval {
    slot: Arc<Mutex<Slot>>,
    period: Option<Duration>,
    task: Option<JoinHandle<()>>,
}

impl Interval {
    /// Create a driver. `None` means paused: nothing is scheduled until a
    /// period is supplied.
    ///
    /// Must be called from within a tokio runtime when `period` is `Some`.
    pub fn new<F>(callback: F, period: Option<Duration>) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let mut interval = Self {
            slot: Arc::new(Mutex::new(Slot {
                callback: Box::new(callback),
                generation: 0,
            })),
            period: None,
            task: None,
        };
        interval.set_period(period);
        interval
    }

    /// Replace the callback. The next tick calls the new one; timing is
    /// unaffected.
    pub fn set_callback<F>(&self, callback: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        lock(&self.slot).callback = Box::new(callback);
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Whether a schedule is live. False when paused, cancelled, or after the
    /// callback returned `Break`.
    pub fn is_scheduled(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Change the period. Same period with a live schedule is a no-op;
    /// anything else cancels the pending schedule and starts over, with the
    /// first tick one full period from now.
    ///
    /// Waits for an in-flight tick to finish, so it must not be called from
    /// inside the callback.
    pub fn set_period(&mut self, period: Option<Duration>) {
        if period == self.period && (period.is_none() || self.is_scheduled()) {
            return;
        }
        let generation = self.cancel();
        self.period = period;
        if let Some(period) = period {
            debug!(?period, generation, "interval scheduled");
            self.task = Some(spawn_schedule(Arc::clone(&self.slot), generation, period));
        } else {
            debug!("interval paused");
        }
    }

    #[cfg(test)]
    fn generation(&self) -> u64 {
        lock(&self.slot).generation
    }

    /// Retire the current schedule and return the generation for the next one.
    fn cancel(&mut self) -> u64 {
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.generation
        };
        if let Some(task) = self.task.take() {
            task.abort();
        }
        generation
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval")
            .field("period", &self.period)
            .field("scheduled", &self.is_scheduled())
            .finish()
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one tick for the schedule of `generation`. A retired schedule ends
/// without calling back.
fn fire(slot: &Mutex<Slot>, generation: u64) -> ControlFlow<()> {
    let mut slot = lock(slot);
    if slot.generation != generation {
        return ControlFlow::Break(());
    }
    (slot.callback)()
}

fn spawn_schedule(slot: Arc<Mutex<Slot>>, generation: u64, period: Duration) -> JoinHandle<()> {
    let period = period.max(MIN_PERIOD);
    // Computed before spawning so the phase does not depend on when the task
    // is first polled.
    let first = Instant::now() + period;
    tokio::spawn(async move {
        let mut ticker = time::interval_at(first, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if fire(&slot, generation).is_break() {
                trace!(generation, "interval schedule ended");
                break;
            }
        }
    })
}
