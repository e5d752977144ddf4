//! Display reordering (UAX #9)
//!
//! Logical-to-visual conversion for renderers that lay text out strictly
//! left to right. The bidirectional algorithm itself comes from the
//! `unicode-bidi` crate; this module only turns its visual runs back into
//! a string.

use std::fmt;

/// Logical-to-visual reordering capability
pub trait DisplayReorder: fmt::Debug + Send + Sync {
    /// Reorder `text` into left-to-right display order
    fn visual_order(&self, text: &str) -> String;
}

/// Reorderer backed by `unicode-bidi`.
///
/// Each paragraph takes its base direction from its first strong
/// character. Characters in right-to-left runs are emitted reversed, with
/// paired brackets mirrored.
#[cfg(feature = "bidi")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBidi;

#[cfg(feature = "bidi")]
impl DisplayReorder for UnicodeBidi {
    fn visual_order(&self, text: &str) -> String {
        use unicode_bidi::{BidiClass, BidiInfo, bidi_class};

        let info = BidiInfo::new(text, None);
        let mut out = String::with_capacity(text.len());

        for para in &info.paragraphs {
            let range = para.range.clone();
            // Paragraph separators stay where they are
            let body = text[range.clone()].trim_end_matches(|c: char| bidi_class(c) == BidiClass::B);
            let body_end = range.start + body.len();

            if body_end > range.start {
                let (levels, runs) = info.visual_runs(para, range.start..body_end);
                for run in runs {
                    let slice = &text[run.clone()];
                    if levels[run.start].is_rtl() {
                        out.extend(slice.chars().rev().map(mirror_char));
                    } else {
                        out.push_str(slice);
                    }
                }
            }

            out.push_str(&text[body_end..range.end]);
        }

        out
    }
}

/// Mirror a character for RTL display
pub fn mirror_char(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        '⁅' => '⁆',
        '⁆' => '⁅',
        '⟨' => '⟩',
        '⟩' => '⟨',
        '⟪' => '⟫',
        '⟫' => '⟪',
        _ => c,
    }
}
