//! Status indicators for CLI output.
//!
//! Provides `[ok]`, `[!!]`, `[--]` and `[..]` prefixes.

use console::style;

/// Status indicator states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Success - green `[ok]`
    Ok,
    /// Degraded but usable - yellow `[..]`
    Warn,
    /// Failure - red `[!!]`
    Error,
    /// Not applicable or switched off - dim `[--]`
    Skip,
}

impl Status {
    /// Render the status indicator as a styled string.
    #[must_use]
    pub fn render(self) -> String {
        match self {
            Self::Ok => format!("[{}]", style("ok").green()),
            Self::Warn => format!("[{}]", style("..").yellow()),
            Self::Error => format!("[{}]", style("!!").red()),
            Self::Skip => format!("[{}]", style("--").dim()),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// A status line with indicator and message.
pub struct StatusLine {
    status: Status,
    message: String,
}

impl StatusLine {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Status::Ok, message)
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Status::Warn, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Status::Error, message)
    }

    #[must_use]
    pub fn skip(message: impl Into<String>) -> Self {
        Self::new(Status::Skip, message)
    }

    /// Print the status line with proper indentation.
    pub fn print(&self) {
        println!("  {} {}", self.status, self.message);
    }
}

/// Print an error message with help text.
pub fn print_error(message: &str, help: Option<&str>) {
    println!();
    StatusLine::error(message).print();

    if let Some(help_text) = help {
        println!();
        for line in help_text.lines() {
            println!("  {line}");
        }
    }
    println!();
}

/// Print a dim hint line.
pub fn hint(message: &str) {
    println!("  {}", style(message).dim());
}

/// Print a bold heading.
pub fn heading(title: &str) {
    println!("{}", style(title).bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_every_variant() {
        for status in [Status::Ok, Status::Warn, Status::Error, Status::Skip] {
            assert!(console::strip_ansi_codes(&status.render()).starts_with('['));
        }
    }

    #[test]
    fn status_line_creates_variants() {
        assert_eq!(StatusLine::ok("x").status, Status::Ok);
        assert_eq!(StatusLine::warn("x").status, Status::Warn);
        assert_eq!(StatusLine::error("x").status, Status::Error);
        assert_eq!(StatusLine::skip("x").status, Status::Skip);
    }
}
