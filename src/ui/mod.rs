mod clock;
mod glyphs;
mod layout;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use std::time::Instant;

pub fn render(frame: &mut Frame, state: &AppState, now: Instant) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    clock::render(frame, app_layout.clock, state, now);
    status_bar::render(frame, app_layout.status_bar, state);
}
