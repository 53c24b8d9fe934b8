//! Countdown state machine driven by an [`Interval`].

use super::counter::Counter;
use super::interval::Interval;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Increment,
    #[default]
    Decrement,
}

/// Parameters of one countdown. Fixed for the lifetime of a [`Countdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig {
    pub start: i64,
    pub stop: i64,
    pub interval: Duration,
    pub direction: Direction,
    pub running_initially: bool,
}

impl CountdownConfig {
    pub fn new(start: i64) -> Self {
        Self {
            start,
            stop: 0,
            interval: DEFAULT_INTERVAL,
            direction: Direction::Decrement,
            running_initially: true,
        }
    }

    pub fn stop(mut self, stop: i64) -> Self {
        self.stop = stop;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn running_initially(mut self, running: bool) -> Self {
        self.running_initially = running;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Snapshot handed to listeners and readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub value: i64,
    pub is_running: bool,
}

impl CountdownState {
    pub fn run_state(&self) -> RunState {
        if self.is_running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}

/// Observer notified with the new state after every transition.
pub type Listener = Box<dyn FnMut(CountdownState) + Send>;

struct Shared {
    config: CountdownConfig,
    counter: Counter,
    running: bool,
    listener: Option<Listener>,
}

impl Shared {
    fn snapshot(&self) -> CountdownState {
        CountdownState {
            value: self.counter.value(),
            is_running: self.running,
        }
    }

    fn notify(&mut self) {
        let state = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(state);
        }
    }

    fn step(&mut self) {
        match self.config.direction {
            Direction::Increment => self.counter.increment(),
            Direction::Decrement => self.counter.decrement(),
        }
    }

    fn tick(&mut self) -> ControlFlow<()> {
        if !self.running {
            return ControlFlow::Break(());
        }
        if self.counter.value() == self.config.stop {
            self.running = false;
            debug!(value = self.config.stop, "countdown already at bound");
            self.notify();
            return ControlFlow::Break(());
        }
        self.step();
        if self.counter.value() == self.config.stop {
            self.running = false;
            info!(value = self.config.stop, "countdown reached bound");
        }
        self.notify();
        if self.running {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }
}

/// A value that steps once per interval until it reaches its bound.
///
/// Each instance owns its timer. Once `stop`, `reset` or drop returns, no
/// tick from the earlier schedule can change the value, on any runtime
/// flavor.
pub struct Countdown {
    shared: Arc<Mutex<Shared>>,
    driver: Interval,
}

impl Countdown {
    /// Must be called from within a tokio runtime if the countdown starts
    /// running.
    pub fn new(config: CountdownConfig) -> Self {
        let running = config.running_initially;
        let period = running.then_some(config.interval);
        let shared = Arc::new(Mutex::new(Shared {
            counter: Counter::new(config.start),
            config,
            running,
            listener: None,
        }));
        let tick_state = Arc::clone(&shared);
        let driver = Interval::new(move || lock(&tick_state).tick(), period);
        Self { shared, driver }
    }

    /// Register the observer, replacing any previous one. It runs with the
    /// countdown locked and must not call back into it.
    pub fn set_listener<F>(&self, listener: F)
    where
        F: FnMut(CountdownState) + Send + 'static,
    {
        let listener: Listener = Box::new(listener);
        lock(&self.shared).listener = Some(listener);
    }

    pub fn state(&self) -> CountdownState {
        lock(&self.shared).snapshot()
    }

    pub fn value(&self) -> i64 {
        lock(&self.shared).counter.value()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).running
    }

    pub fn config(&self) -> CountdownConfig {
        lock(&self.shared).config.clone()
    }

    /// Resume ticking from the current value. A stopped countdown gets a
    /// fresh schedule, so the next step lands one full interval from now.
    pub fn start(&mut self) {
        let (was_running, interval) = {
            let mut shared = lock(&self.shared);
            let was_running = shared.running;
            shared.running = true;
            shared.notify();
            (was_running, shared.config.interval)
        };
        debug!(was_running, "countdown started");
        if !was_running {
            // Retire whatever schedule is left, including one that ended
            // itself at the bound.
            self.driver.set_period(None);
        }
        self.driver.set_period(Some(interval));
    }

    pub fn stop(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.running = false;
            shared.notify();
        }
        debug!("countdown stopped");
        self.driver.set_period(None);
    }

    /// Stop and restore the starting value.
    pub fn reset(&mut self) {
        {
            let mut shared = lock(&self.shared);
            shared.running = false;
            shared.counter.reset();
            shared.notify();
        }
        debug!("countdown reset");
        self.driver.set_period(None);
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("state", &self.state())
            .field("driver", &self.driver)
            .finish()
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    async fn advance(ms: u64) {
        time::advance(Duration::from_millis(ms)).await;
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    fn recorded(countdown: &Countdown) -> Arc<Mutex<Vec<CountdownState>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        countdown.set_listener(move |state| sink.lock().unwrap().push(state));
        log
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_bound_and_stops() {
        let countdown = Countdown::new(CountdownConfig::new(5));
        assert_eq!(
            countdown.state(),
            CountdownState {
                value: 5,
                is_running: true
            }
        );

        let mut seen = vec![countdown.value()];
        for _ in 0..5 {
            advance(1000).await;
            seen.push(countdown.value());
            assert_eq!(countdown.is_running(), countdown.value() != 0);
        }
        assert_eq!(seen, vec![5, 4, 3, 2, 1, 0]);

        advance(1000).await;
        assert_eq!(countdown.value(), 0);
        assert!(!countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_sees_every_tick() {
        let countdown = Countdown::new(CountdownConfig::new(2));
        let log = recorded(&countdown);

        for _ in 0..4 {
            advance(1000).await;
        }
        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                CountdownState {
                    value: 1,
                    is_running: true
                },
                CountdownState {
                    value: 0,
                    is_running: false
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_start_and_stops() {
        let mut countdown = Countdown::new(CountdownConfig::new(10));
        advance(1000).await;
        advance(1000).await;
        assert_eq!(countdown.value(), 8);

        countdown.reset();
        assert_eq!(countdown.value(), 10);
        assert!(!countdown.is_running());
        advance(3000).await;
        assert_eq!(countdown.value(), 10);

        countdown.stop();
        countdown.reset();
        assert_eq!(
            countdown.state(),
            CountdownState {
                value: 10,
                is_running: false
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_then_start_resumes_without_skipping() {
        let mut countdown = Countdown::new(CountdownConfig::new(5));
        advance(1000).await;
        advance(1000).await;
        assert_eq!(countdown.value(), 3);

        advance(500).await;
        countdown.stop();
        assert_eq!(countdown.state().run_state(), RunState::Stopped);
        advance(5000).await;
        assert_eq!(countdown.value(), 3);

        countdown.start();
        assert_eq!(countdown.state().run_state(), RunState::Running);
        advance(999).await;
        assert_eq!(countdown.value(), 3);
        advance(1).await;
        assert_eq!(countdown.value(), 2);
        advance(1000).await;
        assert_eq!(countdown.value(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_running_keeps_phase() {
        let mut countdown = Countdown::new(CountdownConfig::new(5));
        advance(600).await;
        countdown.start();
        advance(400).await;
        assert_eq!(countdown.value(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_increment_direction() {
        let countdown = Countdown::new(
            CountdownConfig::new(0)
                .stop(3)
                .direction(Direction::Increment)
                .interval(Duration::from_millis(250)),
        );
        for expected in 1..=3 {
            advance(250).await;
            assert_eq!(countdown.value(), expected);
        }
        assert!(!countdown.is_running());
        advance(250).await;
        assert_eq!(countdown.value(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initially_stopped_waits_for_start() {
        let mut countdown = Countdown::new(CountdownConfig::new(3).running_initially(false));
        assert!(!countdown.is_running());
        advance(5000).await;
        assert_eq!(countdown.value(), 3);

        countdown.start();
        advance(1000).await;
        assert_eq!(countdown.value(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_starting_at_bound_stops_without_change() {
        let countdown = Countdown::new(CountdownConfig::new(0));
        let log = recorded(&countdown);
        advance(1000).await;
        assert_eq!(countdown.value(), 0);
        assert!(!countdown.is_running());
        assert_eq!(
            *log.lock().unwrap(),
            vec![CountdownState {
                value: 0,
                is_running: false
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_reaching_bound() {
        let mut countdown = Countdown::new(CountdownConfig::new(1));
        advance(1000).await;
        assert_eq!(countdown.value(), 0);
        assert!(!countdown.is_running());

        countdown.reset();
        countdown.start();
        advance(1000).await;
        assert_eq!(countdown.value(), 0);

        // Starting at the bound only stops again.
        countdown.start();
        assert!(countdown.is_running());
        advance(1000).await;
        assert_eq!(countdown.value(), 0);
        assert!(!countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_transitions_notify() {
        let mut countdown = Countdown::new(CountdownConfig::new(4).running_initially(false));
        let log = recorded(&countdown);

        countdown.start();
        countdown.stop();
        countdown.reset();
        let log = log.lock().unwrap();
        let running: Vec<bool> = log.iter().map(|s| s.is_running).collect();
        assert_eq!(running, vec![true, false, false]);
        assert!(log.iter().all(|s| s.value == 4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let countdown = Countdown::new(CountdownConfig::new(100));
        let log = recorded(&countdown);
        advance(1000).await;
        assert_eq!(log.lock().unwrap().len(), 1);

        drop(countdown);
        for _ in 0..5 {
            advance(1000).await;
        }
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_still_ticks() {
        let countdown = Countdown::new(CountdownConfig::new(3).interval(Duration::ZERO));
        for _ in 0..3 {
            advance(1).await;
        }
        assert_eq!(countdown.value(), 0);
        assert!(!countdown.is_running());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stop_start_never_skips_on_worker_threads() {
        let mut countdown = Countdown::new(
            CountdownConfig::new(i64::MAX).interval(Duration::from_millis(20)),
        );
        for cycle in 0..500 {
            countdown.stop();
            let value = countdown.value();
            countdown.start();
            assert_eq!(countdown.value(), value, "stepped during restart {}", cycle);
            if cycle % 25 == 0 {
                std::thread::sleep(Duration::from_millis(21));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_events_after_drop_on_worker_threads() {
        for _ in 0..50 {
            let countdown = Countdown::new(
                CountdownConfig::new(i64::MAX).interval(Duration::from_millis(1)),
            );
            let log = recorded(&countdown);
            std::thread::sleep(Duration::from_millis(3));
            drop(countdown);
            let seen = log.lock().unwrap().len();
            std::thread::sleep(Duration::from_millis(5));
            assert_eq!(log.lock().unwrap().len(), seen);
        }
    }
}
