//! Encoding detection over raw file bytes.
//!
//! Decision order
//! - UTF-8 BOM → `Utf8Bom`
//! - UTF-16 LE/BE BOM → `Utf16`
//! - strict UTF-8 validation → `Utf8`
//! - anything else → the caller's legacy single-byte code page
//!
//! Detection is total: every byte sequence resolves to exactly one label.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1254};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";

/// Default legacy code page for undecodable input.
pub const DEFAULT_FALLBACK: &Encoding = WINDOWS_1254;

/// Encoding a file was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    Utf8Bom,
    Utf16 { big_endian: bool },
    Utf8,
    Legacy(&'static Encoding),
}

impl DetectedEncoding {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            DetectedEncoding::Utf8Bom => "utf-8 with BOM",
            DetectedEncoding::Utf16 { .. } => "utf-16",
            DetectedEncoding::Utf8 => "utf-8",
            DetectedEncoding::Legacy(enc) => enc.name(),
        }
    }

    /// Decode `bytes` with replacement for malformed sequences.
    /// Returns the text and whether any replacement happened.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> (Cow<'a, str>, bool) {
        match self {
            DetectedEncoding::Utf8Bom => {
                UTF_8.decode_without_bom_handling(strip(bytes, UTF8_BOM))
            }
            DetectedEncoding::Utf16 { big_endian: false } => {
                UTF_16LE.decode_without_bom_handling(strip(bytes, UTF16_LE_BOM))
            }
            DetectedEncoding::Utf16 { big_endian: true } => {
                UTF_16BE.decode_without_bom_handling(strip(bytes, UTF16_BE_BOM))
            }
            DetectedEncoding::Utf8 => UTF_8.decode_without_bom_handling(bytes),
            DetectedEncoding::Legacy(enc) => enc.decode_without_bom_handling(bytes),
        }
    }
}

impl fmt::Display for DetectedEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `bytes`, falling back to `fallback` when nothing else fits.
pub fn detect(bytes: &[u8], fallback: &'static Encoding) -> DetectedEncoding {
    if bytes.starts_with(UTF8_BOM) {
        return DetectedEncoding::Utf8Bom;
    }
    if bytes.starts_with(UTF16_LE_BOM) {
        return DetectedEncoding::Utf16 { big_endian: false };
    }
    if bytes.starts_with(UTF16_BE_BOM) {
        return DetectedEncoding::Utf16 { big_endian: true };
    }
    if std::str::from_utf8(bytes).is_ok() {
        return DetectedEncoding::Utf8;
    }
    DetectedEncoding::Legacy(fallback)
}

/// Resolve a WHATWG encoding label (e.g. "windows-1254", "latin1").
pub fn resolve_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

fn strip<'a>(bytes: &'a [u8], bom: &[u8]) -> &'a [u8] {
    bytes.strip_prefix(bom).unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_order() {
        assert_eq!(detect(b"\xEF\xBB\xBFhi", DEFAULT_FALLBACK), DetectedEncoding::Utf8Bom);
        assert_eq!(
            detect(b"\xFF\xFEh\x00", DEFAULT_FALLBACK),
            DetectedEncoding::Utf16 { big_endian: false }
        );
        assert_eq!(
            detect(b"\xFE\xFF\x00h", DEFAULT_FALLBACK),
            DetectedEncoding::Utf16 { big_endian: true }
        );
        assert_eq!(detect("çay".as_bytes(), DEFAULT_FALLBACK), DetectedEncoding::Utf8);
        assert_eq!(detect(b"", DEFAULT_FALLBACK), DetectedEncoding::Utf8);
        assert_eq!(
            detect(b"\xE7ay", DEFAULT_FALLBACK),
            DetectedEncoding::Legacy(WINDOWS_1254)
        );
    }

    #[test]
    fn bom_is_stripped_when_decoding() {
        let (text, replaced) = DetectedEncoding::Utf8Bom.decode(b"\xEF\xBB\xBFhello");
        assert_eq!(text, "hello");
        assert!(!replaced);

        let (text, _) = DetectedEncoding::Utf16 { big_endian: false }.decode(b"\xFF\xFEh\x00i\x00");
        assert_eq!(text, "hi");

        let (text, _) = DetectedEncoding::Utf16 { big_endian: true }.decode(b"\xFE\xFF\x00h\x00i");
        assert_eq!(text, "hi");
    }

    #[test]
    fn legacy_page_decodes_turkish_letters() {
        // 0xFE is 'ş' and 0xF0 is 'ğ' in windows-1254
        let enc = detect(b"\xFEe\xF0", DEFAULT_FALLBACK);
        assert_eq!(enc.label(), "windows-1254");
        let (text, replaced) = enc.decode(b"\xFEe\xF0");
        assert_eq!(text, "şeğ");
        assert!(!replaced);
    }

    #[test]
    fn odd_utf16_payload_reports_replacement() {
        let (_, replaced) = DetectedEncoding::Utf16 { big_endian: false }.decode(b"\xFF\xFEh");
        assert!(replaced);
    }

    #[test]
    fn labels_resolve() {
        assert_eq!(resolve_label("windows-1254"), Some(WINDOWS_1254));
        assert_eq!(resolve_label(" latin1 ").map(|e| e.name()), Some("windows-1252"));
        assert!(resolve_label("klingon").is_none());
    }
}
