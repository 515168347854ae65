//! Byte ranges into a source document.

use std::ops::Range;

/// A half-open byte range `start..end` into a source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Create a span covering the character at a 1-based `line` and `column`.
    ///
    /// Readers such as `serde_json` and `roxmltree` report positions this
    /// way. Positions past the end of a line or of the source are clamped;
    /// a position at the very end of the source yields an empty span there.
    ///
    /// # Examples
    ///
    /// ```
    /// # use umlsheet_parser::Span;
    /// let source = "{\n  \"a\": ]\n}";
    /// let span = Span::from_line_column(source, 2, 8);
    /// assert_eq!(&source[span.start()..span.end()], "]");
    /// ```
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start: usize = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let line_text = source[line_start..].split('\n').next().unwrap_or_default();

        let mut start = line_start + column.saturating_sub(1).min(line_text.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }

        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());
        Self::new(start..end)
    }

    /// Get the start offset of the span.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
