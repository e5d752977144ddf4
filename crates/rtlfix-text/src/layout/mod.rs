//! Text layout module

mod line;

pub use line::{JoinPolicy, LineProcessor, TextBlock};
