use crate::countdown::CountdownState;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// The countdown changed state (tick, start, stop, reset)
    Countdown(CountdownState),

    /// Frame tick for animation refresh
    Tick,
}
