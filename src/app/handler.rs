use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

pub fn handle_event(state: &mut AppState, event: AppEvent, now: Instant) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::Countdown(snapshot) => {
            state.apply(snapshot, now);
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state, now);
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => {
            key_action(key).into_iter().collect()
        }
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')).then_some(Action::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Stop),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Redraw while any digit is mid-flip, plus one frame after the last one
/// settles.
fn handle_tick(state: &mut AppState, now: Instant) {
    let animating = state.flips.is_animating(now, state.config.ui.animation());
    if animating || state.animating {
        state.dirty = true;
    }
    state.animating = animating;
}
