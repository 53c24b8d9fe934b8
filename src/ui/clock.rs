//! The flip clock: four bordered digit groups drawn in a block font, with a
//! slide-and-fade transition on each digit change.

use crate::app::state::{ease_out, AppState, DigitFlip, FlipBoard};
use crate::ui::glyphs::{self, COLS, ROWS};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const PIXEL: &str = "██";
const BLANK: &str = "  ";
const CELL_WIDTH: usize = COLS * 2 + 2;
const GROUP_GAP: &str = "  ";

pub const CLOCK_HEIGHT: u16 = ROWS as u16 + 2;

/// Per-frame inputs shared by every cell.
struct Paint {
    now: Instant,
    duration: Duration,
    base: Style,
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
    let labels = &state.config.ui.labels;
    let paint = Paint {
        now,
        duration: state.config.ui.animation(),
        base: base_style(state),
    };

    let needed = full_width(&state.flips, labels);
    if usize::from(area.width) >= needed && area.height >= CLOCK_HEIGHT {
        let top = area.y + (area.height - CLOCK_HEIGHT) / 2;
        let clock_area = Rect::new(area.x, top, area.width, CLOCK_HEIGHT);
        let lines = clock_lines(&state.flips, labels, &paint);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), clock_area);
    } else if area.height > 0 {
        let mid = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        let line = compact_line(&state.flips, labels, &paint);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), mid);
    }
}

fn base_style(state: &AppState) -> Style {
    if state.at_bound() && !state.countdown.is_running {
        Theme::digit_done()
    } else {
        Theme::digit()
    }
}

/// Columns needed for the full-size clock.
pub fn full_width(board: &FlipBoard, labels: &[String; 4]) -> usize {
    let groups: usize = board
        .groups()
        .iter()
        .zip(labels)
        .map(|(cells, label)| group_width(cells.len(), label))
        .sum();
    groups + GROUP_GAP.len() * (board.groups().len() - 1)
}

fn group_width(cells: usize, label: &str) -> usize {
    // Outer borders, inner separators, then a space and the label.
    2 + cells * CELL_WIDTH + cells.saturating_sub(1) + 1 + label.width()
}

fn clock_lines(board: &FlipBoard, labels: &[String; 4], paint: &Paint) -> Vec<Line<'static>> {
    let height = usize::from(CLOCK_HEIGHT);
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new(); height];
    for (index, (cells, label)) in board.groups().iter().zip(labels).enumerate() {
        if index > 0 {
            for line in lines.iter_mut() {
                line.push(Span::raw(GROUP_GAP));
            }
        }
        for (line, spans) in lines.iter_mut().zip(group_lines(cells, label, paint)) {
            line.extend(spans);
        }
    }
    lines.into_iter().map(Line::from).collect()
}

fn group_lines(cells: &[DigitFlip], label: &str, paint: &Paint) -> Vec<Vec<Span<'static>>> {
    let border = Theme::border();
    let rule = "─".repeat(CELL_WIDTH);
    let edge = |left: &str, join: &str, right: &str| {
        let body = vec![rule.as_str(); cells.len()].join(join);
        Span::styled(format!("{}{}{}", left, body, right), border)
    };
    let label_pad = " ".repeat(label.width() + 1);
    let label_row = ROWS / 2;

    let mut out = Vec::with_capacity(ROWS + 2);
    out.push(vec![edge("╭", "┬", "╮"), Span::raw(label_pad.clone())]);
    for row in 0..ROWS {
        let mut spans = vec![Span::styled("│", border)];
        for cell in cells {
            spans.extend(cell_row(cell, row, paint));
            spans.push(Span::styled("│", border));
        }
        if row == label_row {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label.to_string(), Theme::unit_label()));
        } else {
            spans.push(Span::raw(label_pad.clone()));
        }
        out.push(spans);
    }
    out.push(vec![edge("╰", "┴", "╯"), Span::raw(label_pad)]);
    out
}

/// One row of a digit cell. The incoming glyph slides down from above while
/// the outgoing one drops half a cell and fades.
fn cell_row(cell: &DigitFlip, row: usize, paint: &Paint) -> Vec<Span<'static>> {
    let progress = cell.progress(paint.now, paint.duration);
    let (eased, outgoing) = match cell.previous {
        Some(previous) if progress < 1.0 => (ease_out(progress), Some(previous)),
        _ => (1.0, None),
    };
    let shift_in = ((1.0 - eased) * ROWS as f32).round() as i32;
    let shift_out = (eased * ROWS as f32 / 2.0).round() as i32;
    let incoming = if eased < 0.5 {
        paint.base.patch(Theme::digit_entering())
    } else {
        paint.base
    };

    let row = row as i32;
    let mut spans = Vec::with_capacity(COLS + 2);
    spans.push(Span::raw(" "));
    for col in 0..COLS {
        let span = if glyphs::lit(cell.current, row + shift_in, col) {
            Span::styled(PIXEL, incoming)
        } else if outgoing.is_some_and(|old| glyphs::lit(old, row - shift_out, col)) {
            Span::styled(PIXEL, Theme::digit_leaving())
        } else {
            Span::raw(BLANK)
        };
        spans.push(span);
    }
    spans.push(Span::raw(" "));
    spans
}

/// Single-line fallback for small terminals, e.g. `05d 18h 53m 20s`.
fn compact_line(board: &FlipBoard, labels: &[String; 4], paint: &Paint) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, (cells, label)) in board.groups().iter().zip(labels).enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        for cell in cells {
            let style = if cell.is_flipping(paint.now, paint.duration) {
                paint.base.patch(Theme::digit_entering())
            } else {
                paint.base
            };
            spans.push(Span::styled(cell.current.to_string(), style));
        }
        spans.push(Span::styled(label.clone(), Theme::unit_label()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::TimeUnits;

    fn labels() -> [String; 4] {
        ["d".into(), "h".into(), "m".into(), "s".into()]
    }

    fn paint(now: Instant) -> Paint {
        Paint {
            now,
            duration: Duration::from_millis(400),
            base: Theme::digit(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_compact_line() {
        let board = FlipBoard::new(TimeUnits::from_seconds(500_000));
        let line = compact_line(&board, &labels(), &paint(Instant::now()));
        assert_eq!(text(&line), "05d 18h 53m 20s");
    }

    #[test]
    fn test_full_clock_geometry() {
        let board = FlipBoard::new(TimeUnits::from_seconds(500_000));
        let lines = clock_lines(&board, &labels(), &paint(Instant::now()));
        assert_eq!(lines.len(), usize::from(CLOCK_HEIGHT));

        let width = full_width(&board, &labels());
        assert_eq!(width, 4 * 21 + 3 * 2);
        for line in &lines {
            assert_eq!(line.width(), width);
        }
        assert!(text(&lines[0]).starts_with("╭────────┬────────╮"));
        assert!(text(&lines[3]).contains("│ d"));
    }

    #[test]
    fn test_wide_day_group() {
        let board = FlipBoard::new(TimeUnits::from_seconds(123 * 86_400));
        let narrow = FlipBoard::new(TimeUnits::from_seconds(0));
        assert_eq!(
            full_width(&board, &labels()),
            full_width(&narrow, &labels()) + CELL_WIDTH + 1
        );
    }

    #[test]
    fn test_flip_shows_old_digit_first_and_new_digit_last() {
        let start = Instant::now();
        let mut board = FlipBoard::new(TimeUnits::from_seconds(1));
        board.update(TimeUnits::from_seconds(0), start);
        let cell = board.groups()[3][1];

        // At the start of the flip the new digit is still above the cell.
        let before = cell_row(&cell, 1, &paint(start));
        let before: String = before.iter().map(|s| s.content.as_ref()).collect();
        // Row 1 of "1" is "██", lit pixels at cols 0 and 1.
        assert_eq!(before, " ████   ");

        let after = cell_row(&cell, 1, &paint(start + Duration::from_millis(400)));
        let after: String = after.iter().map(|s| s.content.as_ref()).collect();
        // Row 1 of "0" is "█ █".
        assert_eq!(after, " ██  ██ ");
    }

    #[test]
    fn test_mid_flip_mixes_styles() {
        let start = Instant::now();
        let mut board = FlipBoard::new(TimeUnits::from_seconds(8));
        board.update(TimeUnits::from_seconds(7), start);
        let cell = board.groups()[3][1];
        let p = paint(start + Duration::from_millis(60));

        let styles: Vec<Style> = (0..ROWS)
            .flat_map(|row| cell_row(&cell, row, &p))
            .filter(|s| s.content == PIXEL)
            .map(|s| s.style)
            .collect();
        assert!(styles.contains(&Theme::digit_leaving()));
    }
}
