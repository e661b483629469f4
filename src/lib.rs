//! Complex-number calculator: a shunting-yard expression engine plus the
//! interactive front-ends built on top of it.

pub mod calc_engine;

#[cfg(feature = "line")]
pub mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
pub mod tui_mode;
