//! Line views over normalized text.
//!
//! Notes
//! - Text reaching this module only contains '\n' line endings.
//! - `segments` mirrors a plain split: "a\n" has 2 segments, "" has 1.
//! - `logical` drops the one trailing empty segment a final newline (or an
//!   empty buffer) produces: "a\n" has 1 line, "" has 0.
//! - Line numbers handed out are 1-based.

use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence<'a> {
    lines: Vec<&'a str>,
}

impl<'a> LineSequence<'a> {
    /// Split on every '\n', keeping a trailing empty segment.
    pub fn segments(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::with_capacity(bytes.len() / 48 + 1);
        let mut start = 0usize;

        // Single pass over newline offsets
        for nl in memchr::memchr_iter(b'\n', bytes) {
            lines.push(&text[start..nl]);
            start = nl + 1;
        }
        lines.push(&text[start..]);

        Self { lines }
    }

    /// Segments with the synthetic trailing empty segment removed.
    pub fn logical(text: &'a str, ends_with_newline: bool) -> Self {
        let mut seq = Self::segments(text);
        if ends_with_newline || text.is_empty() {
            seq.lines.pop();
        }
        seq
    }

    /// First `n` lines (all of them when `n` exceeds the count).
    pub fn head(&self, n: usize) -> &[&'a str] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// Last `n` lines (all of them when `n` exceeds the count).
    pub fn tail(&self, n: usize) -> &[&'a str] {
        let len = self.lines.len();
        &self.lines[len - n.min(len)..]
    }

    /// Lines paired with their 1-based numbers.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, l)| (i + 1, *l))
    }

    /// Digits needed to print the largest line number (at least 1).
    pub fn number_width(&self) -> usize {
        self.lines.len().max(1).to_string().len()
    }

    /// Join lines in reverse order, each terminated by '\n'.
    pub fn reversed_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in self.lines.iter().rev() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl<'a> Deref for LineSequence<'a> {
    type Target = [&'a str];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}
