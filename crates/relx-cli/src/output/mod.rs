//! Terminal output.
//!
//! Results go to stdout, diagnostics to stderr. Color is decided once at
//! startup from `--no-ansi`, `NO_COLOR` and whether each stream is a terminal.

mod style;

pub use style::Theme;

use once_cell::sync::OnceCell;

#[derive(Debug, Clone, Copy)]
struct ColorState {
    stdout: bool,
    stderr: bool,
}

static COLORS: OnceCell<ColorState> = OnceCell::new();

fn detect(no_ansi: bool) -> ColorState {
    let allowed = !no_ansi && std::env::var_os("NO_COLOR").is_none();
    ColorState {
        stdout: allowed && console::colors_enabled(),
        stderr: allowed && console::colors_enabled_stderr(),
    }
}

/// Decide color support. Later calls have no effect.
pub fn init(no_ansi: bool) {
    let _ = COLORS.set(detect(no_ansi));
}

fn state() -> ColorState {
    *COLORS.get_or_init(|| detect(false))
}

/// Theme for stdout.
pub fn theme() -> Theme {
    Theme::new(state().stdout)
}

fn stderr_theme() -> Theme {
    Theme::new(state().stderr)
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{}: {message}", stderr_theme().error("error"));
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{}: {message}", stderr_theme().warning("warning"));
}
