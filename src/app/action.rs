/// Requests from the event handler that act on the countdown or the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Toggle,
    Reset,
    Quit,
}
