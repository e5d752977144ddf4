//! Input decoding for XML files
//!
//! A byte order mark wins, then the `encoding` named in the XML
//! declaration, then UTF-8. Outputs are always written as UTF-8.

use std::ops::Range;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

/// Decode raw file bytes into a `String`.
///
/// On failure returns the encoding the bytes were not valid in.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String, &'static Encoding> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode(encoding, &bytes[bom_len..]);
    }

    // "<?" in UTF-16 without a BOM
    if bytes.starts_with(&[0x3C, 0x00, 0x3F, 0x00]) {
        return decode(UTF_16LE, bytes);
    }
    if bytes.starts_with(&[0x00, 0x3C, 0x00, 0x3F]) {
        return decode(UTF_16BE, bytes);
    }

    // A declaration readable as ASCII rules out a UTF-16 label
    let declared = declaration(bytes)
        .and_then(|decl| encoding_label(decl).map(|range| &decl[range]))
        .and_then(Encoding::for_label)
        .filter(|encoding| encoding.is_ascii_compatible());

    decode(declared.unwrap_or(UTF_8), bytes)
}

fn decode(encoding: &'static Encoding, bytes: &[u8]) -> Result<String, &'static Encoding> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(encoding)
}

/// The `<?xml ... ?>` declaration at the very start of `bytes`
pub fn declaration(bytes: &[u8]) -> Option<&[u8]> {
    let rest = bytes.strip_prefix(b"<?xml")?;
    if !rest.first().is_some_and(|b| b.is_ascii_whitespace()) {
        return None;
    }
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    Some(&bytes[..end + 2])
}

/// Byte range of the `encoding` value inside a declaration, quotes excluded
pub fn encoding_label(decl: &[u8]) -> Option<Range<usize>> {
    let skip_whitespace = |mut i: usize| {
        while decl.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
            i += 1;
        }
        i
    };

    let key = decl.windows(8).position(|w| w == b"encoding")?;
    let mut i = skip_whitespace(key + 8);
    if decl.get(i) != Some(&b'=') {
        return None;
    }
    i = skip_whitespace(i + 1);

    let quote = *decl.get(i).filter(|&&q| q == b'"' || q == b'\'')?;
    let start = i + 1;
    let len = decl[start..].iter().position(|&b| b == quote)?;
    Some(start..start + len)
}
