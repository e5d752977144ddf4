//! Text shaping module

pub mod arabic;
pub mod bidi;
mod service;

pub use arabic::{ArabicReshaper, JoiningType, PositionalForm};
#[cfg(feature = "bidi")]
pub use bidi::UnicodeBidi;
pub use bidi::DisplayReorder;
pub use service::{
    REORDER_CAPABILITY, REORDER_HINT, ShapingContext, ShapingOptions, ShapingService,
    contains_arabic, prepare,
};
