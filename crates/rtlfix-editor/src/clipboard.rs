//! Clipboard integration
//!
//! Write-only access to the system clipboard through the platform's
//! command-line tools.

use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Clipboard error types
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("No clipboard tool found (tried {0})")]
    NoBackend(String),

    #[error("Clipboard tool {tool} failed: {source}")]
    Io { tool: &'static str, source: io::Error },

    #[error("Clipboard tool {0} exited with an error")]
    Failed(&'static str),
}

/// Destination for copied text
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Programs tried in order, with their arguments
#[cfg(target_os = "macos")]
const TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const TOOLS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const TOOLS: &[(&str, &[&str])] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("wl-copy", &[]),
];

/// System clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for &(tool, args) in TOOLS {
            let mut child = match Command::new(tool)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ClipboardError::Io { tool, source }),
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .map_err(|source| ClipboardError::Io { tool, source })?;
            }

            let status = child
                .wait()
                .map_err(|source| ClipboardError::Io { tool, source })?;
            if status.success() {
                tracing::debug!("Copied {} byte(s) with {}", text.len(), tool);
                return Ok(());
            }
            return Err(ClipboardError::Failed(tool));
        }

        let tried: Vec<&str> = TOOLS.iter().map(|(tool, _)| *tool).collect();
        Err(ClipboardError::NoBackend(tried.join(", ")))
    }
}

/// In-memory clipboard for headless use and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
