//! Styling for terminal output.

use owo_colors::OwoColorize;

/// Colors for one output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors_enabled: bool,
}

impl Theme {
    /// Create a new theme
    pub const fn new(colors_enabled: bool) -> Self {
        Self { colors_enabled }
    }

    /// Format an artifact name
    pub fn artifact(&self, name: &str) -> String {
        if self.colors_enabled {
            name.green().to_string()
        } else {
            name.to_string()
        }
    }

    /// Format a project name
    pub fn project(&self, name: &str) -> String {
        if self.colors_enabled {
            name.yellow().to_string()
        } else {
            name.to_string()
        }
    }

    /// Format an error
    pub fn error(&self, text: &str) -> String {
        if self.colors_enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a warning
    pub fn warning(&self, text: &str) -> String {
        if self.colors_enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format dim/secondary text
    pub fn dim(&self, text: &str) -> String {
        if self.colors_enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format header text
    pub fn header(&self, text: &str) -> String {
        if self.colors_enabled {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
