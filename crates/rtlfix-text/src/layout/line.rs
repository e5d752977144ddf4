//! Line-preserving processing

use crate::shaping::ShapingContext;

/// How processed lines are put back together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Concatenate lines with no separator. Paragraph breaks are lost;
    /// this matches what the editor has always produced.
    #[default]
    Concatenate,
    /// Join lines with `\n`
    Newline,
}

impl JoinPolicy {
    fn separator(self) -> &'static str {
        match self {
            JoinPolicy::Concatenate => "",
            JoinPolicy::Newline => "\n",
        }
    }
}

/// An ordered sequence of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split text on line boundaries.
    ///
    /// Recognizes `\n`, `\r\n`, `\r`, VT, FF, the information separators
    /// U+001C..U+001E, NEL, LS and PS. A trailing terminator does not start
    /// an extra empty line.
    pub fn split(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut chars = text.char_indices().peekable();
        let mut line_start = 0;

        while let Some((i, c)) = chars.next() {
            if !is_line_boundary(c) {
                continue;
            }

            lines.push(text[line_start..i].to_string());
            let mut end = i + c.len_utf8();

            // CRLF
            if c == '\r' && chars.peek().map(|(_, c)| *c) == Some('\n') {
                chars.next();
                end += 1;
            }

            line_start = end;
        }

        if line_start < text.len() {
            lines.push(text[line_start..].to_string());
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join lines back into a string
    pub fn join(&self, policy: JoinPolicy) -> String {
        self.lines.join(policy.separator())
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{001C}'..='\u{001E}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Applies a shaping context line by line.
///
/// Shaping never crosses a line boundary: a letter at the end of a line
/// takes its final or isolated form even when the next line starts with a
/// connecting letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineProcessor {
    join_policy: JoinPolicy,
}

impl LineProcessor {
    pub fn new(join_policy: JoinPolicy) -> Self {
        Self { join_policy }
    }

    pub fn join_policy(&self) -> JoinPolicy {
        self.join_policy
    }

    /// Reshape and reorder every line independently
    pub fn process(&self, block: &TextBlock, ctx: &ShapingContext) -> TextBlock {
        let lines = block
            .lines
            .iter()
            .map(|line| ctx.reshape_and_reorder(line))
            .collect();

        TextBlock { lines }
    }

    /// Split, process and rejoin `text` with this processor's join policy
    pub fn process_text(&self, text: &str, ctx: &ShapingContext) -> String {
        let block = TextBlock::split(text);
        tracing::debug!("Processing {} line(s)", block.len());
        self.process(&block, ctx).join(self.join_policy)
    }
}
