use super::app::{App, HistoryEntry};
use super::helpers::{highlight_functions, wrap_text};
use super::keys::action_for_event;
use super::Tui;
use crate::calc_engine::{format_compact, format_complex, format_with_spaces, CalcError, Step};
use crate::render_help::render_help;
use anyhow::Result;
use num_complex::Complex64;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 10;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const KEYS: [(&str, &str); 5] = [
    ("Enter", "evaluate"),
    ("↑↓ PgUp PgDn", "history"),
    ("F1", "help"),
    ("Ctrl+U", "clear"),
    ("details <expr>", "steps"),
];

pub fn run_ui_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| draw(frame, app))?;

        if crossterm::event::poll(POLL_INTERVAL)? {
            let event = crossterm::event::read()?;
            if let Some(action) = action_for_event(&event, app.show_help) {
                app.apply(action);
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    if app.show_help {
        render_help(frame, app);
        return;
    }
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_resize_message(frame, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    render_input(frame, app, rows[0]);
    render_status(frame, rows[1]);
    app.list_height = rows[2].height as usize;
    render_history(frame, app, rows[2]);
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn titled_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(title)
        .title_alignment(Alignment::Center)
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!(
                "Window is {}x{}, needs at least {MIN_WIDTH}x{MIN_HEIGHT}",
                area.width, area.height
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enlarge the terminal to continue",
            Style::default().fg(Color::Yellow),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = titled_block(" History ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let hint = Paragraph::new("No calculations yet. Try 3+4i or log(2, 8).")
            .style(dim())
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    }

    let width = inner.width as usize;
    let mut lines = Vec::new();
    let mut selected = None;
    for (index, entry) in app.history.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(Span::styled("-".repeat(width), dim())));
        }
        let is_selected = index == app.cursor_history;
        if is_selected {
            selected = Some(lines.len());
        }
        lines.extend(entry_lines(entry, is_selected, width));
    }

    if app.scroll_to_bottom {
        app.history_scroll = lines.len().saturating_sub(inner.height as usize);
        app.scroll_to_bottom = false;
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    let mut state = ListState::default()
        .with_selected(selected)
        .with_offset(app.history_scroll);
    frame.render_stateful_widget(list, inner, &mut state);
}

/// Rows for one history entry: the echoed expression (wrapped, highlighted)
/// with its result on the first row, then steps and timing for `details` lines.
fn entry_lines(entry: &HistoryEntry, selected: bool, width: usize) -> Vec<Line<'static>> {
    let expression_style = Style::default().fg(if selected { Color::Yellow } else { Color::Cyan });
    let echoed = format_with_spaces(entry.expression());

    let mut lines: Vec<Line<'static>> = wrap_text(&echoed, width.saturating_sub(4))
        .into_iter()
        .enumerate()
        .map(|(row, text)| {
            let marker = if row == 0 {
                Span::styled("> ", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            let mut spans = vec![marker];
            spans.extend(highlight_functions(&text, expression_style));
            Line::from(spans)
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(">", Style::default().fg(Color::Green))));
    }

    if let Some(first) = lines.first_mut() {
        first.spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
        first.spans.push(result_span(&entry.result));
    }
    if let Some(steps) = &entry.steps {
        lines.extend(detail_lines(steps, entry.duration, width));
    }
    lines
}

// Parse and evaluation failures get different shades of red.
fn result_span(result: &Result<Complex64, CalcError>) -> Span<'static> {
    let (text, color) = match result {
        Ok(value) if value.im == 0.0 => (format_complex(*value), Color::LightMagenta),
        Ok(value) => (format_complex(*value), Color::LightCyan),
        Err(error @ CalcError::Parse(_)) => (format!("Error: {error}"), Color::Red),
        Err(error @ CalcError::Evaluation(_)) => (format!("Error: {error}"), Color::LightRed),
    };
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn detail_lines(steps: &[Step], duration: Duration, width: usize) -> Vec<Line<'static>> {
    let numbered = steps.iter().enumerate().map(|(n, step)| {
        let text = format!("Step {}: {} = {}", n + 1, step.operation, format_compact(step.result));
        (text, Color::DarkGray)
    });
    let timing = (
        format!("Time: {:.6} ms", duration.as_secs_f64() * 1000.0),
        Color::Magenta,
    );

    numbered
        .chain(std::iter::once(timing))
        .flat_map(|(text, color)| bulleted(&text, width.saturating_sub(10), color))
        .collect()
}

fn bulleted(text: &str, width: usize, color: Color) -> Vec<Line<'static>> {
    wrap_text(text, width)
        .into_iter()
        .enumerate()
        .map(|(row, part)| {
            let bullet = if row == 0 { "    - " } else { "      " };
            Line::from(Span::styled(format!("{bullet}{part}"), Style::default().fg(color)))
        })
        .collect()
}

fn render_status(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = KEYS
        .iter()
        .flat_map(|&(key, what)| {
            [Span::styled(key, key_style), Span::styled(format!(" {what}  "), dim())]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = titled_block(" Expression ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Two cells go to the "> " prompt.
    let width = inner.width.saturating_sub(2) as usize;
    app.adjust_input_scroll(width);
    let window: String = app.input.graphemes(true).skip(app.input_scroll).take(width).collect();
    let before_cursor: String = window
        .graphemes(true)
        .take(app.cursor_position.saturating_sub(app.input_scroll))
        .collect();

    frame.render_widget(Paragraph::new(format!("> {window}")), inner);
    frame.set_cursor(inner.x + 2 + before_cursor.width() as u16, inner.y);

    let hidden_left = app.input_scroll > 0;
    let hidden_right = app.input_len() > app.input_scroll + width;
    let right_edge = inner.right().saturating_sub(1);
    for (shown, x, mark) in [(hidden_left, inner.x, "<"), (hidden_right, right_edge, ">")] {
        if shown {
            frame.render_widget(Paragraph::new(mark).style(dim()), Rect::new(x, inner.y, 1, 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_engine::{EvalError, ParseError};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn submitted(input: &str) -> HistoryEntry {
        let mut app = App::new();
        app.input = input.to_string();
        app.submit();
        app.history.remove(0)
    }

    #[test]
    fn result_row_follows_the_echoed_expression() {
        let lines = entry_lines(&submitted("3+4i"), false, 60);
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "> 3 + 4i = (3.000000+4.000000i)");
    }

    #[test]
    fn details_rows_list_steps_then_time() {
        let lines = entry_lines(&submitted("details 1+2*3"), false, 60);
        let rows: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rows[0], "> 1 + 2 * 3 = 7.000000");
        assert_eq!(rows[1], "    - Step 1: 2 * 3 = 6");
        assert_eq!(rows[2], "    - Step 2: 1 + 6 = 7");
        assert!(rows[3].starts_with("    - Time: "));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn failure_kinds_are_colored_apart() {
        let parse = result_span(&Err(CalcError::Parse(ParseError::RootCount(0))));
        let eval = result_span(&Err(CalcError::Evaluation(EvalError::DivisionByZero)));
        assert_eq!(parse.style.fg, Some(Color::Red));
        assert_eq!(eval.style.fg, Some(Color::LightRed));
        assert_eq!(eval.content, "Error: evaluation failed: division by zero");
    }

    #[test]
    fn long_steps_wrap_under_their_bullet() {
        let steps = vec![Step {
            operation: "log(2, 1024) + log(2, 1024) + log(2, 1024)".to_string(),
            result: Complex64::new(30.0, 0.0),
        }];
        let rows: Vec<String> = detail_lines(&steps, Duration::ZERO, 30).iter().map(text).collect();
        assert!(rows[0].starts_with("    - Step 1:"));
        assert!(rows[1].starts_with("      "));
        assert!(rows.last().is_some_and(|row| row.contains("Time: 0.000000 ms")));
    }
}
