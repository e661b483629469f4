use super::keys::Action;
use crate::calc_engine::{calculate, split_details, CalcError, EvaluationTrace, Step};
use num_complex::Complex64;
use std::time::{Duration, Instant};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// One submitted line. `input` is the line as typed, so recalling it keeps a
/// `details` prefix.
pub struct HistoryEntry {
    pub input: String,
    pub result: Result<Complex64, CalcError>,
    /// Evaluation steps, present only for `details` lines.
    pub steps: Option<Vec<Step>>,
    pub duration: Duration,
}

impl HistoryEntry {
    /// The expression part of the line, without a `details` marker.
    pub fn expression(&self) -> &str {
        split_details(&self.input).1
    }
}

/// Editor and history state. `cursor_position` and `input_scroll` count
/// grapheme clusters, not bytes.
pub struct App {
    pub input: String,
    pub cursor_position: usize,
    pub input_scroll: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor_position: 0,
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Submit => self.submit(),
            Action::Insert(c) => self.insert_char(c),
            Action::DeleteBackward => self.delete_before_cursor(),
            Action::DeleteForward => self.delete_at_cursor(),
            Action::MoveCursor(delta) => self.move_cursor(delta),
            Action::MoveWord(delta) => self.move_cursor_by_words(delta),
            Action::Home => {
                self.cursor_position = 0;
                self.input_scroll = 0;
            }
            Action::End => self.cursor_position = self.input_len(),
            Action::ClearInput => self.clear_input(),
            Action::Recall(delta) => self.navigate_history(delta),
            Action::PageHistory(delta) => self.scroll_history(delta),
            Action::ScrollHistory(delta) => scroll_by(&mut self.history_scroll, delta),
            Action::OpenHelp => self.open_help(),
            Action::CloseHelp => {
                self.show_help = false;
                self.help_scroll = 0;
            }
            Action::ScrollHelp(delta) => scroll_by(&mut self.help_scroll, delta),
        }
    }

    pub fn input_len(&self) -> usize {
        self.input.graphemes(true).count()
    }

    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input_len();
        let cursor_pos = self.cursor_position;

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos - visible_width + 1;
        }

        if self.input_scroll > total.saturating_sub(visible_width) {
            self.input_scroll = total.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                self.should_quit = true;
                return;
            }
            "clear" | "reset" => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            "help" => {
                self.open_help();
                self.clear_input();
                return;
            }
            _ => {}
        }

        // A bare `details` evaluates the empty expression and records its parse failure.
        let (detailed, expression) = split_details(&input);
        let started = Instant::now();
        let mut trace = EvaluationTrace::new(detailed);
        let result = calculate(expression, &mut trace);
        let duration = started.elapsed();
        debug!(input = expression, ?duration, ok = result.is_ok(), "submitted");

        self.history.push(HistoryEntry {
            input,
            result,
            steps: detailed.then_some(trace.steps),
            duration,
        });

        self.cursor_history = self.history.len() - 1;
        self.clear_input();
        self.scroll_to_bottom = true;
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::grapheme_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        // A combining mark can merge into the previous cluster.
        self.cursor_position = (self.cursor_position + 1).min(self.input_len());
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.delete_at_cursor();
        }
    }

    pub fn delete_at_cursor(&mut self) {
        let start = Self::grapheme_index_to_byte_index(&self.input, self.cursor_position);
        let end = Self::grapheme_index_to_byte_index(&self.input, self.cursor_position + 1);
        self.input.drain(start..end);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor_position = self
            .cursor_position
            .saturating_add_signed(delta)
            .min(self.input_len());
    }

    pub fn move_cursor_by_words(&mut self, direction: isize) {
        let graphemes: Vec<&str> = self.input.graphemes(true).collect();
        let is_space = |g: &str| g.chars().all(char::is_whitespace);
        let mut pos = self.cursor_position.min(graphemes.len());

        if direction < 0 {
            while pos > 0 && is_space(graphemes[pos - 1]) {
                pos -= 1;
            }
            while pos > 0 && !is_space(graphemes[pos - 1]) {
                pos -= 1;
            }
        } else {
            let len = graphemes.len();
            while pos < len && !is_space(graphemes[pos]) {
                pos += 1;
            }
            while pos < len && is_space(graphemes[pos]) {
                pos += 1;
            }
        }

        self.cursor_position = pos;
    }

    /// Moves the history selection and loads the selected line into the editor.
    pub fn navigate_history(&mut self, delta: isize) {
        if self.history.is_empty() {
            return;
        }
        self.cursor_history = self
            .cursor_history
            .saturating_add_signed(delta)
            .min(self.history.len() - 1);
        self.input = self.history[self.cursor_history].input.clone();
        self.cursor_position = self.input_len();
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    // One page is the visible list height less a line of overlap.
    pub fn scroll_history(&mut self, pages: isize) {
        let page = self.list_height.saturating_sub(1) as isize;
        self.navigate_history(pages * page);
    }

    fn open_help(&mut self) {
        self.show_help = true;
        self.help_scroll = 0;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.input_scroll = 0;
    }

    pub fn grapheme_index_to_byte_index(s: &str, index: usize) -> usize {
        s.grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    }
}

fn scroll_by(offset: &mut usize, delta: isize) {
    *offset = offset.saturating_add_signed(delta);
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
