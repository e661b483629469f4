use crate::calc_engine::{tokenize, Constant, Function, TokenKind};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                    if chunk_width + char_width > width && !chunk.is_empty() {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(current_line.trim().to_string());
                    current_line.clear();
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(current_line.trim().to_string());
            current_line.clear();
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line.trim().to_string());
    }

    lines
}

pub fn is_math_function(word: &str) -> bool {
    Function::from_name(word).is_some() || Constant::from_name(word).is_some()
}

/// Colors an already spaced expression. Words are classified with the same
/// tables the parser uses, so unknown identifiers stay in the base style.
pub fn highlight_functions(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let function_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_number = false;

    let flush = |spans: &mut Vec<Span<'static>>, current: &mut String, in_word: bool| {
        if current.is_empty() {
            return;
        }
        let style = if !in_word {
            number_style
        } else if is_math_function(current) {
            function_style
        } else {
            base_style
        };
        spans.push(Span::styled(std::mem::take(current), style));
    };

    for c in expr.chars() {
        if c.is_ascii_digit() || c == '.' || (in_number && c == 'i') {
            if in_word {
                flush(&mut spans, &mut current, true);
                in_word = false;
            }
            current.push(c);
            in_number = c != 'i';
            if c == 'i' {
                flush(&mut spans, &mut current, false);
            }
        } else if c.is_ascii_alphabetic() {
            if in_number {
                flush(&mut spans, &mut current, false);
                in_number = false;
            }
            current.push(c);
            in_word = true;
        } else {
            flush(&mut spans, &mut current, in_word);
            in_word = false;
            in_number = false;

            let token = c.to_string();
            let kind = tokenize(&token).first().map(|t| t.kind);
            match kind {
                Some(TokenKind::Operator) => spans.push(Span::styled(token, operator_style)),
                Some(_) if c == ' ' => spans.push(Span::raw(" ")),
                _ => spans.push(Span::styled(token, base_style)),
            }
        }
    }

    flush(&mut spans, &mut current, in_word);
    spans
}
