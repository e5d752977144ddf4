//! Attribute rewriting for a single XML document
//!
//! The document is parsed only to locate attribute values. The output is
//! the source text with the changed values spliced in, so comments,
//! formatting, sibling attributes and quoting survive untouched. A
//! declared encoding other than UTF-8 is relabelled, since the output is
//! always UTF-8.

use std::borrow::Cow;
use std::ops::Range;

use roxmltree::{Document, ParsingOptions};
use rtlfix_text::ShapingContext;

use crate::encoding::{declaration, encoding_label};

/// Declaration written when the source has none
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>\n";

/// Result of fixing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDocument {
    /// Serialized output, including an XML declaration
    pub xml: String,
    /// Elements carrying the attribute
    pub visited: usize,
    /// Elements whose attribute value changed
    pub changed: usize,
}

/// Reshape every `attribute` value in `source`.
///
/// Elements are visited in document order. Only attributes without a
/// namespace match.
pub fn fix_document(
    source: &str,
    attribute: &str,
    ctx: &ShapingContext,
) -> Result<FixedDocument, roxmltree::Error> {
    let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
    let relabelled = relabel_declaration(source);
    let source: &str = &relabelled;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(source, options)?;

    let mut visited = 0;
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        let Some(attr) = node
            .attributes()
            .find(|a| a.name() == attribute && a.namespace().is_none())
        else {
            continue;
        };

        visited += 1;
        let fixed = ctx.reshape_and_reorder(attr.value());
        if fixed != attr.value() {
            edits.push((attr.range_value(), escape_attribute(&fixed)));
        }
    }

    let changed = edits.len();
    let mut xml = String::with_capacity(source.len() + XML_DECLARATION.len());
    if declaration(source.as_bytes()).is_none() {
        xml.push_str(XML_DECLARATION);
    }

    let mut cursor = 0;
    for (range, value) in edits {
        xml.push_str(&source[cursor..range.start]);
        xml.push_str(&value);
        cursor = range.end;
    }
    xml.push_str(&source[cursor..]);

    Ok(FixedDocument { xml, visited, changed })
}

fn relabel_declaration(source: &str) -> Cow<'_, str> {
    let Some(range) = declaration(source.as_bytes()).and_then(encoding_label) else {
        return Cow::Borrowed(source);
    };
    if source[range.clone()].eq_ignore_ascii_case("utf-8") {
        return Cow::Borrowed(source);
    }
    Cow::Owned(format!("{}utf-8{}", &source[..range.start], &source[range.end..]))
}

/// Escape a value for either quote style
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtlfix_text::{ShapingOptions, ShapingService};

    fn ctx() -> ShapingContext {
        ShapingService::detect()
            .prepare(ShapingOptions::preserve_diacritics())
            .unwrap()
    }

    #[test]
    fn test_changes_only_arabic_values() {
        let src = r#"<Items><Item Value="مرحبا"/><Item Value="hello"/></Items>"#;
        let fixed = fix_document(src, "Value", &ctx()).unwrap();

        assert_eq!(fixed.visited, 2);
        assert_eq!(fixed.changed, 1);
        assert!(fixed.xml.starts_with(XML_DECLARATION));
        assert!(fixed.xml.contains(r#"<Item Value="hello"/>"#));
        assert!(!fixed.xml.contains("مرحبا"));
    }

    #[test]
    fn test_keeps_existing_declaration_and_layout() {
        let src = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- note -->\n<Root a='1' Value='x'>\n  <Child/>\n</Root>\n";
        let fixed = fix_document(src, "Value", &ctx()).unwrap();

        assert_eq!(fixed.changed, 0);
        assert_eq!(fixed.xml, src);
    }

    #[test]
    fn test_nested_elements_visited() {
        let src = r#"<a Value="ب"><b><c Value="ت"/></b><d Name="ث"/></a>"#;
        let fixed = fix_document(src, "Value", &ctx()).unwrap();

        assert_eq!(fixed.visited, 2);
        assert_eq!(fixed.changed, 2);
        assert!(fixed.xml.contains(r#"<d Name="ث"/>"#));
    }

    #[test]
    fn test_other_attribute_name() {
        let src = r#"<a Text="ب" Value="ت"/>"#;
        let fixed = fix_document(src, "Text", &ctx()).unwrap();

        assert_eq!(fixed.changed, 1);
        assert!(fixed.xml.contains(r#"Value="ت""#));
        assert!(fixed.xml.contains("Text=\"\u{FE8F}\""));
    }

    #[test]
    fn test_legacy_declaration_relabelled() {
        let src = "<?xml version='1.0' encoding='windows-1256'?><a Value='&#1576;'/>";
        let fixed = fix_document(src, "Value", &ctx()).unwrap();

        assert_eq!(fixed.changed, 1);
        assert!(fixed.xml.starts_with("<?xml version='1.0' encoding='utf-8'?><a Value='\u{FE8F}'/>"));
    }

    #[test]
    fn test_bom_is_dropped() {
        let src = "\u{FEFF}<a/>";
        let fixed = fix_document(src, "Value", &ctx()).unwrap();
        assert_eq!(fixed.xml, format!("{XML_DECLARATION}<a/>"));
    }

    #[test]
    fn test_malformed() {
        assert!(fix_document("<a><b></a>", "Value", &ctx()).is_err());
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute(r#"a&b<c>"d'"#), "a&amp;b&lt;c&gt;&quot;d&apos;");
    }
}
