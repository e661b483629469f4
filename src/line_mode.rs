use crate::calc_engine::{
    calculate, format_compact, format_complex, format_with_spaces, split_details, EvaluationTrace,
};
use anyhow::{Context, Result};
use std::io::{stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "Expression: ";

// Позиция символа -> байтовая позиция
fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// 1-based terminal column of the cursor, counted in display cells.
fn cursor_column(expression: &str, cursor_pos: usize) -> u16 {
    let prefix = &expression[..char_index_to_byte_index(expression, cursor_pos)];
    let column = PROMPT.width() + prefix.width() + 1;
    u16::try_from(column).unwrap_or(u16::MAX)
}

fn remove_char_at(s: &mut String, char_index: usize) {
    let byte_idx = char_index_to_byte_index(s, char_index);
    if let Some(c) = s[byte_idx..].chars().next() {
        s.drain(byte_idx..byte_idx + c.len_utf8());
    }
}

pub fn run_line() -> Result<()> {
    println!("Rust Complex Calculator");
    println!("Supports: +, -, *, /, ^, unary signs, imaginary literals (4i)");
    println!("Functions: sin, cos, tan, cot, sec, csc, log(base, x), rt(n, x)");
    println!("Constants: pi, e");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history");
    println!("Special commands: 'quit' to exit, 'clear' to reset history");
    println!("\rAdd 'details' before expression for step-by-step evaluation\n");

    let mut stdout = stdout()
        .into_raw_mode()
        .context("failed to switch the terminal to raw mode")?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;

    loop {
        write!(stdout, "{}{}", ClearLine, PROMPT)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0;
        let (_, initial_y) = stdout.cursor_pos()?;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(stdout, "{}{}{}{}", Goto(1, initial_y), ClearLine, PROMPT, expression)?;

            write!(stdout, "{}", Goto(cursor_column(&expression, cursor_pos), initial_y))?;
            stdout.flush()?;

            let Some(key) = keys.next() else {
                // stdin closed
                println!("\r");
                return Ok(());
            };

            match key? {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    println!("\r\nGoodbye!\r");
                    return Ok(());
                }
                Key::Ctrl('u') => {
                    expression.clear();
                    cursor_pos = 0;
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                    } else {
                        history_index = history.len();
                        expression.clear();
                    }
                    cursor_pos = expression.chars().count();
                }
                _ => {}
            }
        }

        let input = expression.trim();
        if input.is_empty() {
            print!("\r\n");
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\r\nGoodbye!\r");
                return Ok(());
            }
            "clear" | "reset" => {
                history.clear();
                history_index = 0;
                println!("\r\nHistory cleared\r\n\r");
                continue;
            }
            _ => {}
        }

        let (detailed_mode, processed_input) = split_details(input);

        if processed_input.is_empty() {
            println!("\r\nPlease enter a valid expression after 'details'\r");
            continue;
        }

        history.push(input.to_string());
        history_index = history.len();

        let formatted_expr = format_with_spaces(processed_input);
        let mut trace = EvaluationTrace::new(detailed_mode);
        match calculate(processed_input, &mut trace) {
            Ok(result) => {
                print!("\r\n  {} = {}\r\n", formatted_expr, format_complex(result));

                if detailed_mode && !trace.steps.is_empty() {
                    print!("\r\n  Step-by-step evaluation:\r\n");
                    for (i, step) in trace.steps.iter().enumerate() {
                        print!(
                            "\r  Step {}: {} = {}\r\n",
                            i + 1,
                            step.operation,
                            format_compact(step.result)
                        );
                    }
                }
                print!("\r\n");
            }
            Err(e) => {
                debug!(input = processed_input, error = %e, "line rejected");
                print!("\r\n  {} = Error: {}\r\n\r\n", formatted_expr, e);
            }
        }
        stdout.flush()?;
    }
}
