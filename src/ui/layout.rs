use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub clock: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: clock | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Clock, centered inside
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        clock: chunks[0],
        status_bar: chunks[1],
    }
}
