//! Smart reader: bytes from disk to decoded, newline-normalized text.
//!
//! Encoding choice is delegated to `infra::encoding`; the loader only adds
//! the file access, the strict/lossy policy and '\r' normalization.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::TextError;
use crate::infra::encoding::{DEFAULT_FALLBACK, DetectedEncoding, detect};
use crate::infra::lines::LineSequence;

/// How the loader decodes bytes.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Code page used when bytes are neither BOM-marked nor valid UTF-8
    pub fallback: &'static Encoding,
    /// Fail instead of inserting replacement characters
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK,
            strict: false,
        }
    }
}

/// Decoded, newline-normalized file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    text: String,
    encoding: DetectedEncoding,
    ends_with_newline: bool,
}

impl EncodedText {
    /// Build from already-decoded text; normalizes newlines.
    pub fn new(text: &str, encoding: DetectedEncoding) -> Self {
        let text = normalize_newlines(text).into_owned();
        let ends_with_newline = text.ends_with('\n');
        Self {
            text,
            encoding,
            ends_with_newline,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> DetectedEncoding {
        self.encoding
    }

    /// Whether the text ends with the normalized newline.
    pub fn ends_with_newline(&self) -> bool {
        self.ends_with_newline
    }

    /// Raw segments: split on '\n', trailing empty segment kept.
    pub fn segments(&self) -> LineSequence<'_> {
        LineSequence::segments(&self.text)
    }

    /// Logical lines: one trailing empty segment dropped.
    pub fn lines(&self) -> LineSequence<'_> {
        LineSequence::logical(&self.text, self.ends_with_newline)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for EncodedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Read `path`, detect its encoding, decode and normalize newlines.
pub fn read_text_smart<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<EncodedText, TextError> {
    let path = path.as_ref();

    // The handle is closed inside fs::read on every exit path
    let bytes = std::fs::read(path).map_err(|e| TextError::from_io("read", path, e))?;

    let encoding = detect(&bytes, opts.fallback);
    let (decoded, replaced) = encoding.decode(&bytes);
    debug!(
        path = %path.display(),
        encoding = encoding.label(),
        bytes = bytes.len(),
        replaced,
        "decoded file"
    );

    if replaced && opts.strict {
        return Err(TextError::DecodeFailure {
            path: path.to_path_buf(),
            encoding: encoding.label().to_string(),
        });
    }

    Ok(EncodedText::new(&decoded, encoding))
}

/// Collapse "\r\n" and lone '\r' into '\n'. Borrows when nothing changes.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}
