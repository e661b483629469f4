use crate::calc_engine::{Constant, Function};
use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

fn function_line(function: Function) -> Line<'static> {
    let (signature, description) = match function {
        Function::Sin => ("sin(z)", "Sine (z in radians)"),
        Function::Cos => ("cos(z)", "Cosine"),
        Function::Tan => ("tan(z)", "Tangent"),
        Function::Cot => ("cot(z)", "Cotangent, 1 / tan(z)"),
        Function::Sec => ("sec(z)", "Secant, 1 / cos(z)"),
        Function::Csc => ("csc(z)", "Cosecant, 1 / sin(z)"),
        Function::Log => ("log(b, z)", "Logarithm of z to base b"),
        Function::Rt => ("rt(n, z)", "n-th root of z, z ^ (1/n)"),
    };
    Line::from(format!("  {:<10}: {}", signature, description))
}

fn constant_line(constant: Constant) -> Line<'static> {
    let description = match constant {
        Constant::Pi => "π (3.14159...)",
        Constant::E => "Euler's number (2.71828...)",
    };
    Line::from(format!("  {:<3}: {}", constant.name(), description))
}

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" RustCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let mut help_text = vec![
        Line::from(Span::styled(
            "RustCalc - Complex Number Calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Operators:"),
        Line::from("  + : Addition        (e.g., 3 + 4i)"),
        Line::from("  - : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  * : Multiplication  (e.g., 2i * 2i = -4)"),
        Line::from("  / : Division        (division by exactly 0 is an error)"),
        Line::from("  ^ : Power           (right-associative: 2 ^ 3 ^ 2 = 512)"),
        Line::from("  % : Modulo          (accepted, but not supported for complex values)"),
        Line::from("  Unary + and - bind tighter than every binary operator."),
        Line::from(""),
        heading("Numbers:"),
        Line::from("  42, 3.5, .25 : real literals"),
        Line::from("  4i, 0.5i     : imaginary literals"),
        Line::from("  3 + 4i       : a complex value is built with arithmetic"),
        Line::from(""),
        heading("Functions:"),
    ];
    help_text.extend(Function::ALL.into_iter().map(function_line));
    help_text.push(Line::from(""));
    help_text.push(heading("Constants:"));
    help_text.extend(Constant::ALL.into_iter().map(constant_line));
    help_text.extend([
        Line::from(""),
        heading("Results:"),
        Line::from("  Real results print alone: 14.000000"),
        Line::from("  Otherwise (re+imi): (3.000000+4.000000i), (3.000000+-4.000000i)"),
        Line::from(""),
        heading("Advanced Features:"),
        Line::from("  details <expression> : Show step-by-step evaluation with time"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  help : Show this help screen"),
        Line::from("  quit : Exit the calculator"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Navigate calculation history"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Esc : Close this screen"),
        Line::from(""),
        heading("Examples:"),
        Line::from("  (1 + 2i) * (3 + 4i)"),
        Line::from("  e ^ (1i * pi)"),
        Line::from("  rt(2, -4)"),
        Line::from("  details log(2, 8)"),
    ]);

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
