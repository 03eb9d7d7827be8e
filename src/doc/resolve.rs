//! Object Resolver: typed, sentinel-based reads over the engine's object
//! graph.
//!
//! The engine exposes every PDF value through a single variant type. The
//! helpers here narrow it to what the rest of the crate needs: a resolved
//! dictionary entry, a name, string bytes, or decoded text. Anything that
//! does not fit returns `None`; nothing here mutates the document or panics
//! on malformed input.

use lopdf::{Dictionary, Document, Object};

/// Look up `key` in `dict` and follow one level of indirection.
///
/// A missing key or a dangling reference resolves to `None`.
pub(crate) fn dict_get<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let obj = dict.get(key).ok()?;
    resolve(doc, obj)
}

/// Follow one level of indirection; idempotent on direct objects.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        direct => Some(direct),
    }
}

/// Resolve the trailer's Root entry to the catalog dictionary.
pub(crate) fn catalog(doc: &Document) -> Option<&Dictionary> {
    dict_get(doc, &doc.trailer, b"Root").and_then(as_dict)
}

/// Narrow to a dictionary.
pub(crate) fn as_dict(obj: &Object) -> Option<&Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Narrow to a name.
pub(crate) fn as_name(obj: &Object) -> Option<&[u8]> {
    match obj {
        Object::Name(name) => Some(name),
        _ => None,
    }
}

/// Narrow to the raw bytes of a string object.
pub(crate) fn as_string(obj: &Object) -> Option<&[u8]> {
    match obj {
        Object::String(bytes, _) => Some(bytes),
        _ => None,
    }
}

/// Decode a PDF text string to UTF-8.
///
/// UTF-16BE with BOM first, then UTF-8, then a byte-per-char fallback
/// (PDFDocEncoding is close enough to Latin-1 for metadata strings).
pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|unit| u16::from_be_bytes([unit[0], unit[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
