//! rtlfix Editor - interactive reshaping session
//!
//! A UI-free model of the reshaping editor: two buffers, the
//! delete-harakat and live toggles, and the process/copy/swap/clear
//! actions. Front-ends drive it through [`InteractiveSession`].

pub mod clipboard;
mod session;

pub use clipboard::{ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard};
pub use session::{InteractiveSession, Notice, SessionConfig, SessionState};
