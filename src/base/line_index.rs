//! Byte offset to line/column conversion.

use text_size::TextSize;

use super::Position;

/// Precomputed newline table over a decoded text.
///
/// Built once per read; converts tokenizer byte offsets into 1-indexed
/// line/column positions in O(log n).
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the first character of each line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a [`Position`].
    ///
    /// Offsets past the end of `text` clamp to the end. The column counts
    /// characters from the line start, so multi-byte characters advance it
    /// by one.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(text));
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = text[usize::from(line_start)..usize::from(offset)]
            .chars()
            .count() as u32;
        Position::new(line as u32 + 1, column + 1, offset)
    }
}
