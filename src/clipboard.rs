//! Clipboard access.
//!
//! The system clipboard is reached through the platform's command-line
//! tools. Every call is bounded by a timeout and reports failure as a value;
//! callers decide how to degrade. When no tool exists the clipboard fails
//! closed: every call returns [`ClipboardError::Unavailable`].

#[cfg(test)]
use std::cell::RefCell;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::activity::LogSink;

/// Upper bound for a single clipboard subprocess.
pub const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found (tried {0})")]
    Unavailable(String),

    #[error("`{0}` did not finish within {secs}s", secs = CLIPBOARD_TIMEOUT.as_secs())]
    Timeout(String),

    #[error("`{command}` failed: {reason}")]
    Command { command: String, reason: String },

    #[error("clipboard is empty")]
    Empty,
}

/// Set and read clipboard text.
pub trait Clipboard {
    fn set(&self, text: &str) -> Result<(), ClipboardError>;
    fn get(&self) -> Result<String, ClipboardError>;
}

/// Appended to the activity line of a copy whose clipboard write failed.
pub const COPY_FAILED_SUFFIX: &str = " (copy failed)";

/// Write `text` to the clipboard and log `line`.
///
/// The line is logged either way; a failed write gets [`COPY_FAILED_SUFFIX`].
pub fn copy_logged(
    clipboard: &dyn Clipboard,
    log: &mut dyn LogSink,
    text: &str,
    line: &str,
) -> Result<(), ClipboardError> {
    match clipboard.set(text) {
        Ok(()) => {
            log.log(line);
            Ok(())
        }
        Err(e) => {
            log.log(&format!("{line}{COPY_FAILED_SUFFIX}"));
            Err(e)
        }
    }
}

/// Stand-in used when no clipboard tool was found. Every call fails.
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    tried: String,
}

impl UnavailableClipboard {
    #[must_use]
    pub fn new(detect_error: ClipboardError) -> Self {
        let tried = match detect_error {
            ClipboardError::Unavailable(tried) => tried,
            other => other.to_string(),
        };
        Self { tried }
    }
}

impl Clipboard for UnavailableClipboard {
    fn set(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.tried.clone()))
    }

    fn get(&self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable(self.tried.clone()))
    }
}

/// Clipboard kept in process memory, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }

    fn get(&self) -> Result<String, ClipboardError> {
        self.contents.borrow().clone().ok_or(ClipboardError::Empty)
    }
}

/// Clipboard backed by platform tools (`pbcopy`, `wl-copy`, `xclip`, `clip`).
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    copy: Vec<String>,
    paste: Vec<String>,
    timeout: Duration,
}

impl SystemClipboard {
    /// Pick the clipboard tools for this platform.
    pub fn detect() -> Result<Self, ClipboardError> {
        let candidates = candidates();
        let tried = candidates
            .iter()
            .map(|(copy, _)| copy[0])
            .collect::<Vec<_>>()
            .join(", ");

        candidates
            .into_iter()
            .find(|(copy, _)| tool_exists(copy[0]))
            .map(|(copy, paste)| Self {
                copy: copy.iter().map(|s| (*s).to_string()).collect(),
                paste: paste.iter().map(|s| (*s).to_string()).collect(),
                timeout: CLIPBOARD_TIMEOUT,
            })
            .ok_or(ClipboardError::Unavailable(tried))
    }

    fn run(&self, argv: &[String], input: Option<&str>) -> Result<String, ClipboardError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ClipboardError::Unavailable(String::new()))?;

        let command_error = |reason: String| ClipboardError::Command {
            command: program.clone(),
            reason,
        };

        // Copy tools may leave a daemon holding the selection, so stdout is
        // only captured when reading.
        let mut child = Command::new(program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(if input.is_some() {
                Stdio::null()
            } else {
                Stdio::piped()
            })
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| command_error(e.to_string()))?;

        // Both pipes are serviced on helper threads so the deadline covers
        // the whole exchange, not just the wait.
        let writer = match (input, child.stdin.take()) {
            (Some(text), Some(mut stdin)) => {
                let text = text.to_string();
                Some(std::thread::spawn(move || stdin.write_all(text.as_bytes())))
            }
            _ => None,
        };

        let reader = child.stdout.take().map(|mut stdout| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stdout.read_to_end(&mut buf);
                buf
            })
        });

        let status = match wait_with_timeout(&mut child, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => return Err(ClipboardError::Timeout(program.clone())),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(command_error(e.to_string()));
            }
        };

        if !status.success() {
            return Err(command_error(format!("exited with {status}")));
        }

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(command_error(e.to_string())),
                Err(_) => return Err(command_error("stdin writer panicked".to_string())),
            }
        }

        let bytes = reader
            .map(|handle| handle.join().unwrap_or_default())
            .unwrap_or_default();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Clipboard for SystemClipboard {
    fn set(&self, text: &str) -> Result<(), ClipboardError> {
        self.run(&self.copy, Some(text)).map(|_| ())
    }

    fn get(&self) -> Result<String, ClipboardError> {
        let text = self.run(&self.paste, None)?;
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(text)
    }
}

/// Wait for the child, killing it once `timeout` has passed.
///
/// Returns `Ok(None)` on timeout.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

type ToolPair = (&'static [&'static str], &'static [&'static str]);

const MACOS: ToolPair = (&["pbcopy"], &["pbpaste"]);
const WINDOWS: ToolPair = (
    &["clip"],
    &["powershell", "-NoProfile", "-Command", "Get-Clipboard"],
);
const WAYLAND: ToolPair = (&["wl-copy"], &["wl-paste", "--no-newline"]);
const XCLIP: ToolPair = (
    &["xclip", "-selection", "clipboard"],
    &["xclip", "-selection", "clipboard", "-o"],
);
const XSEL: ToolPair = (
    &["xsel", "--clipboard", "--input"],
    &["xsel", "--clipboard", "--output"],
);

fn candidates() -> Vec<ToolPair> {
    if cfg!(target_os = "macos") {
        vec![MACOS]
    } else if cfg!(windows) {
        vec![WINDOWS]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        vec![WAYLAND, XCLIP, XSEL]
    } else {
        vec![XCLIP, XSEL]
    }
}

fn tool_exists(program: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
