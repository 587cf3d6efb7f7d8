//! Operator activity log.
//!
//! An append-only list of timestamped lines that the host can scroll. Lines
//! are optionally mirrored to a file so the daily report can read them back
//! after the session ends.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Timestamp layout used in the mirror file.
pub const MIRROR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Anything that accepts activity lines.
pub trait LogSink {
    fn log(&mut self, text: &str);
}

/// One activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl LogLine {
    /// `[HH:MM:SS] text` followed by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}] {}\n", self.timestamp.format("%H:%M:%S"), self.text)
    }
}

/// In-memory activity buffer with an optional append-only file mirror.
#[derive(Debug, Default)]
pub struct ActivityLog {
    lines: Vec<LogLine>,
    mirror: Option<PathBuf>,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append every line to `path` (created on first write).
    #[must_use]
    pub fn with_mirror(mut self, path: impl Into<PathBuf>) -> Self {
        self.mirror = Some(path.into());
        self
    }

    /// Append a line stamped with the given time.
    pub fn record(&mut self, timestamp: DateTime<Local>, text: &str) {
        tracing::info!(target: "activity", "{text}");

        let line = LogLine {
            timestamp,
            text: text.to_string(),
        };

        if let Some(path) = &self.mirror
            && let Err(e) = append_mirror(path, &line)
        {
            tracing::warn!("Failed to write activity log {}: {e}", path.display());
        }

        self.lines.push(line);
    }

    #[must_use]
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// The last `count` lines, oldest first.
    #[must_use]
    pub fn tail(&self, count: usize) -> &[LogLine] {
        let start = self.lines.len().saturating_sub(count);
        &self.lines[start..]
    }

    /// The whole buffer as display text.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.iter().map(LogLine::render).collect()
    }

    /// Drop every in-memory line. The mirror file is left alone.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn mirror(&self) -> Option<&Path> {
        self.mirror.as_deref()
    }
}

impl LogSink for ActivityLog {
    fn log(&mut self, text: &str) {
        self.record(Local::now(), text);
    }
}

fn append_mirror(path: &Path, line: &LogLine) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(
        file,
        "{}\t{}",
        line.timestamp.format(MIRROR_TIME_FORMAT),
        line.text.replace('\n', " ")
    )
}
