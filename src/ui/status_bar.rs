use crate::app::state::{AppState, Status};
use crate::countdown::Direction;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const KEY_HINTS: &str = " space start/stop · r reset · q quit ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(status_spans(state, area.width));
    frame.render_widget(Paragraph::new(line), area);
}

fn status_spans(state: &AppState, width: u16) -> Vec<Span<'static>> {
    let status = state.status();
    let arrow = match state.direction {
        Direction::Increment => '↑',
        Direction::Decrement => '↓',
    };

    let mut parts = vec![
        Span::styled(format!(" {} ", status.label()), status_style(status)),
        Span::styled(
            format!(
                " {} {} {} every {}ms ",
                state.countdown.value,
                arrow,
                state.stop,
                state.interval.as_millis()
            ),
            Theme::status_bar(),
        ),
    ];

    // Pad to push the key hints to the right edge
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = usize::from(width).saturating_sub(used + KEY_HINTS.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(KEY_HINTS, Theme::key_hint()));
    parts
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Running => Theme::status_running(),
        Status::Paused => Theme::status_paused(),
        Status::Done => Theme::status_done(),
    }
}
