//! Metadata extraction: Info dictionary entries and format version.

use log::warn;

use crate::doc::document::Document;
use crate::doc::resolve;

impl Document {
    /// Keys of the trailer's Info dictionary, in dictionary order.
    ///
    /// Empty when the document is not readable or has no Info dictionary;
    /// never an error.
    pub fn info_keys(&self) -> Vec<String> {
        let Some(info) = self.info_dict() else {
            return Vec::new();
        };
        info.iter()
            .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
            .collect()
    }

    /// Decoded text for `key` in the Info dictionary.
    ///
    /// An absent key gives an empty string. A key that resolves to
    /// something other than a string is an anomaly seen in plenty of real
    /// files; it is logged and degrades to an empty string instead of
    /// failing the call.
    pub fn info_value(&self, key: &str) -> String {
        let (Some(engine), Some(info)) = (self.engine(), self.info_dict()) else {
            return String::new();
        };
        let Some(obj) = resolve::dict_get(engine, info, key.as_bytes()) else {
            return String::new();
        };
        match resolve::as_string(obj) {
            Some(bytes) => resolve::decode_text_string(bytes),
            None => {
                warn!("Info entry {key} is not a string");
                String::new()
            }
        }
    }

    /// PDF format version as `major + minor/10`, or `0.0` when the document
    /// is closed or the version is unrecognized.
    ///
    /// The single-float encoding ("PDF 1.7" reads as `1.7`) is a host
    /// compatibility contract; keep it stable.
    pub fn pdf_version(&self) -> f32 {
        match self.engine() {
            Some(engine) => parse_version(&engine.version),
            None => 0.0,
        }
    }
}

/// Parse a `major.minor` version ("1.7", or "PDF 1.7" as engine format
/// strings spell it) into the single-float encoding.
fn parse_version(version: &str) -> f32 {
    let digits = version.trim().trim_start_matches("PDF").trim_start();
    let Some((major, minor)) = digits.split_once('.') else {
        return 0.0;
    };
    match (major.parse::<u32>(), minor.parse::<u32>()) {
        (Ok(major), Ok(minor)) => major as f32 + minor as f32 / 10.0,
        _ => 0.0,
    }
}
