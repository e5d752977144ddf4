//! Shaping service
//!
//! The capability provider behind every reshape-and-reorder call. It is
//! queried once at startup; a missing reordering backend shows up as a
//! typed error from [`ShapingService::prepare`] instead of a null check at
//! every call site.

use std::sync::Arc;

use super::arabic::ArabicReshaper;
use super::bidi::DisplayReorder;
use crate::{Result, TextError};

/// Name of the reordering capability, as reported when it is missing
pub const REORDER_CAPABILITY: &str = "bidirectional reordering (unicode-bidi)";

/// How to obtain the reordering capability
pub const REORDER_HINT: &str = "rebuild rtlfix-text with the `bidi` feature enabled";

/// Options for building a shaping context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapingOptions {
    /// Strip harakat from the output
    pub delete_harakat: bool,
}

impl ShapingOptions {
    /// Keep diacritics (the batch fixer's policy)
    pub fn preserve_diacritics() -> Self {
        Self { delete_harakat: false }
    }

    /// Strip diacritics
    pub fn delete_diacritics() -> Self {
        Self { delete_harakat: true }
    }

    pub fn from_preserve(preserve_diacritics: bool) -> Self {
        Self { delete_harakat: !preserve_diacritics }
    }

    pub fn preserves_diacritics(self) -> bool {
        !self.delete_harakat
    }
}

#[derive(Debug, Clone)]
enum Capability {
    Available(Arc<dyn DisplayReorder>),
    Missing { capability: String, hint: String },
}

/// Provider of shaping contexts
#[derive(Debug, Clone)]
pub struct ShapingService {
    capability: Capability,
}

impl ShapingService {
    /// Probe the capabilities compiled into this build
    pub fn detect() -> Self {
        #[cfg(feature = "bidi")]
        {
            Self::with_reorderer(Arc::new(super::bidi::UnicodeBidi))
        }

        #[cfg(not(feature = "bidi"))]
        {
            tracing::warn!("{} is not compiled in", REORDER_CAPABILITY);
            Self::unavailable(REORDER_CAPABILITY, REORDER_HINT)
        }
    }

    /// Service backed by the given reorderer
    pub fn with_reorderer(reorder: Arc<dyn DisplayReorder>) -> Self {
        Self {
            capability: Capability::Available(reorder),
        }
    }

    /// Service whose every `prepare` fails with `CapabilityUnavailable`
    pub fn unavailable(capability: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            capability: Capability::Missing {
                capability: capability.into(),
                hint: hint.into(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.capability, Capability::Available(_))
    }

    /// The error `prepare` would return, if the capability is missing
    pub fn missing(&self) -> Option<TextError> {
        match &self.capability {
            Capability::Available(_) => None,
            Capability::Missing { capability, hint } => Some(TextError::CapabilityUnavailable {
                capability: capability.clone(),
                hint: hint.clone(),
            }),
        }
    }

    /// Build a reusable context configured with `options`
    pub fn prepare(&self, options: ShapingOptions) -> Result<ShapingContext> {
        match &self.capability {
            Capability::Available(reorder) => {
                tracing::debug!("Preparing shaping context (delete_harakat={})", options.delete_harakat);
                Ok(ShapingContext {
                    options,
                    reshaper: ArabicReshaper::new(options.delete_harakat),
                    reorder: Arc::clone(reorder),
                })
            }
            Capability::Missing { capability, hint } => Err(TextError::CapabilityUnavailable {
                capability: capability.clone(),
                hint: hint.clone(),
            }),
        }
    }
}

impl Default for ShapingService {
    fn default() -> Self {
        Self::detect()
    }
}

/// Build a context from the detected capabilities
pub fn prepare(preserve_diacritics: bool) -> Result<ShapingContext> {
    ShapingService::detect().prepare(ShapingOptions::from_preserve(preserve_diacritics))
}

/// Whether `text` contains any code point of the Arabic block (U+0600..U+06FF)
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// A configured reshaper plus reorderer
#[derive(Debug, Clone)]
pub struct ShapingContext {
    options: ShapingOptions,
    reshaper: ArabicReshaper,
    reorder: Arc<dyn DisplayReorder>,
}

impl ShapingContext {
    pub fn options(&self) -> ShapingOptions {
        self.options
    }

    /// Reshape Arabic letters into presentation forms and reorder the
    /// result into visual order.
    ///
    /// Text without Arabic code points is returned as is. Deterministic,
    /// but not stable under re-application: feeding the output back in
    /// reverses the visual-order runs a second time.
    pub fn reshape_and_reorder(&self, text: &str) -> String {
        if !contains_arabic(text) {
            return text.to_string();
        }

        let reshaped = self.reshaper.reshape(text);
        self.reorder.visual_order(&reshaped)
    }
}
