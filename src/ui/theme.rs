use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Cyan;
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_MUTED: Color = Color::DarkGray;

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn digit() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// New digit during the first half of its flip.
    pub fn digit_entering() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).add_modifier(Modifier::DIM)
    }

    /// Old digit on its way out.
    pub fn digit_leaving() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn digit_done() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn unit_label() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn status_running() -> Style {
        Style::default()
            .fg(Color::Green)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_paused() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_done() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::DarkGray)
    }
}
