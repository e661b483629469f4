use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use rustcalc::calc_engine::{calculate, format_compact, format_complex, EvaluationTrace};
use tracing_subscriber::EnvFilter;

/// Complex-number calculator.
#[derive(Debug, Parser)]
#[command(name = "rustcalc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a single expression and print the result
    Eval {
        /// The expression to evaluate, e.g. "3+4i"
        expression: String,

        /// Print every evaluation step
        #[arg(long)]
        details: bool,
    },
    /// Full-screen terminal interface
    #[cfg(feature = "tui")]
    Tui,
    /// Line editor in raw terminal mode
    #[cfg(feature = "line")]
    Line,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "rustcalc=warn",
        1 => "rustcalc=debug",
        _ => "rustcalc=trace",
    }
}

fn init_logging(verbose: u8, full_screen: bool) {
    let from_env = EnvFilter::try_from_default_env().ok();
    // Log lines on stderr would tear the alternate screen; stay silent there
    // unless logging was asked for explicitly.
    if full_screen && from_env.is_none() && verbose == 0 {
        return;
    }
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(directive_for_verbosity(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_eval(expression: &str, details: bool) -> Result<()> {
    let mut trace = EvaluationTrace::new(details);
    let value = calculate(expression, &mut trace)?;
    for (i, step) in trace.steps.iter().enumerate() {
        println!("Step {}: {} = {}", i + 1, step.operation, format_compact(step.result));
    }
    println!("{}", format_complex(value));
    Ok(())
}

#[allow(unreachable_code)]
fn run_interactive() -> Result<()> {
    #[cfg(feature = "tui")]
    return rustcalc::tui_mode::run_tui();
    #[cfg(feature = "line")]
    return rustcalc::line_mode::run_line();
    bail!("no interactive mode compiled in; enable the `tui` or `line` feature, or use `rustcalc eval`")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Eval { expression, details }) => {
            init_logging(cli.verbose, false);
            run_eval(&expression, details)
        }
        #[cfg(feature = "tui")]
        Some(Commands::Tui) => {
            init_logging(cli.verbose, true);
            rustcalc::tui_mode::run_tui()
        }
        #[cfg(feature = "line")]
        Some(Commands::Line) => {
            init_logging(cli.verbose, false);
            rustcalc::line_mode::run_line()
        }
        None => {
            init_logging(cli.verbose, cfg!(feature = "tui"));
            run_interactive()
        }
    }
}
