//! rtlfix XML - batch attribute fixer
//!
//! Walks a directory of XML files and reshapes one attribute (`Value` by
//! default) on every element, writing `<stem>_fixed.xml` next to each
//! source. Sources are never modified, and a file that fails to parse is
//! reported without stopping the batch.
//!
//! # Example
//! ```rust,ignore
//! use rtlfix_text::ShapingService;
//! use rtlfix_xml::{BatchXmlFixer, FixerConfig};
//!
//! let fixer = BatchXmlFixer::new(&ShapingService::detect(), FixerConfig::default())?;
//! let report = fixer.run(Path::new("strings"))?;
//! ```

mod batch;
mod config;
pub mod document;
pub mod encoding;

use std::io;
use std::path::PathBuf;

pub use batch::{BatchReport, BatchXmlFixer, FileOutcome, FileReport};
pub use config::FixerConfig;
pub use document::{FixedDocument, fix_document};
pub use encoding::decode_xml_bytes;

/// Batch fixer error types
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{} cannot be decoded as {encoding}", path.display())]
    Encoding { path: PathBuf, encoding: &'static str },

    #[error("Malformed document {}: {source}", path.display())]
    MalformedDocument { path: PathBuf, source: roxmltree::Error },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Shaping(#[from] rtlfix_text::TextError),
}

pub type Result<T> = std::result::Result<T, FixError>;
