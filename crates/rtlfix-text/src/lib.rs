//! rtlfix Text - Arabic display fixing
//!
//! This crate turns logical-order Arabic text into a form that displays
//! correctly in renderers without native right-to-left support:
//! - Contextual letter forms (Arabic Presentation Forms A/B)
//! - Optional harakat removal
//! - Logical-to-visual reordering (unicode-bidi)
//! - Line-by-line processing that keeps line structure intact
//!
//! # Example
//! ```rust,ignore
//! use rtlfix_text::{LineProcessor, ShapingOptions, ShapingService};
//!
//! let ctx = ShapingService::detect().prepare(ShapingOptions::preserve_diacritics())?;
//! let fixed = LineProcessor::default().process_text("مرحبا\nworld", &ctx);
//! ```

pub mod shaping;
pub mod layout;

pub use shaping::{
    ArabicReshaper, DisplayReorder, ShapingContext, ShapingOptions, ShapingService,
    contains_arabic, prepare,
};
pub use layout::{JoinPolicy, LineProcessor, TextBlock};

/// Text processing error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("{capability} is unavailable: {hint}")]
    CapabilityUnavailable { capability: String, hint: String },
}

pub type Result<T> = std::result::Result<T, TextError>;
