use std::borrow::Cow;
use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Rope, RopeInfo};

use crate::editing::buffer::{BufferError, LineBuffer, check_edits};
use crate::editing::{LineEdit, Patch};
use crate::parsing::IndentStyle;

/// In-memory markdown document backed by an xi-rope buffer.
///
/// The rope is the single source of truth: lines are sliced out of it on
/// demand and every batch of [`LineEdit`]s is compiled into one `Delta`, so a
/// batch either lands completely or not at all and bumps the version once.
/// Line endings are preserved; replacing a line never touches its terminator.
#[derive(Debug, Clone)]
pub struct Document {
    /// xi-rope buffer containing the entire document
    pub(crate) buffer: Rope,
    /// Current selection/cursor position as byte offsets in buffer
    pub(crate) selection: Range<usize>,
    /// Version counter incremented on each applied batch
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        Self {
            buffer,
            selection: len..len, // Start with cursor at end
            version: 0,
        }
    }

    /// Builds a `\n`-separated document from individual lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&text)
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// All lines without their terminators.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|i| self.line_span(i))
            .map(|span| self.buffer.slice_to_cow(span).into_owned())
            .collect()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn set_selection(&mut self, selection: Range<usize>) {
        self.selection = selection;
    }

    /// Line holding the start of the selection (the smaller of anchor and head).
    pub fn selection_top_line(&self) -> usize {
        let offset = self.selection.start.min(self.selection.end);
        self.buffer.line_of_offset(offset.min(self.buffer.len()))
    }

    /// Moves the cursor to the start of `line`, clamped to the last line.
    pub fn set_cursor_line(&mut self, line: usize) {
        let line = line.min(self.last_line());
        let offset = self.buffer.offset_of_line(line);
        self.selection = offset..offset;
    }

    /// Indentation style of the numbered items in this document.
    pub fn detect_indent_style(&self) -> IndentStyle {
        let lines = self.lines();
        IndentStyle::detect(lines.iter().map(String::as_str))
    }

    /// Apply a batch of line replacements as a single delta.
    ///
    /// Every edit is validated against the current content before anything is
    /// changed; a stale or out-of-range edit rejects the whole batch.
    pub fn apply_edits(&mut self, edits: &[LineEdit]) -> Result<Patch, BufferError> {
        check_edits(&*self, edits)?;

        if edits.is_empty() {
            return Ok(Patch {
                changed: Vec::new(),
                version: self.version,
            });
        }

        let mut ordered: Vec<&LineEdit> = edits.iter().collect();
        ordered.sort_by_key(|e| e.line);

        let mut builder = Builder::<RopeInfo>::new(self.buffer.len());
        let mut changed = Vec::with_capacity(ordered.len());
        let mut shift: isize = 0;
        for edit in ordered {
            let span = self.line_span(edit.line);
            let new_start = (span.start as isize + shift) as usize;
            changed.push(new_start..new_start + edit.new_text.len());
            shift += edit.new_text.len() as isize - span.len() as isize;
            builder.replace(span, Rope::from(edit.new_text.as_str()));
        }

        let delta = builder.build();
        self.buffer = delta.apply(&self.buffer);
        self.selection = self.clamp(self.selection.clone());
        self.version += 1;

        log::debug!(
            "applied {} line edits, document version {}",
            changed.len(),
            self.version
        );

        Ok(Patch {
            changed,
            version: self.version,
        })
    }

    /// Byte span of line `index` excluding its `\n` or `\r\n` terminator.
    fn line_span(&self, index: usize) -> Range<usize> {
        let start = self.buffer.offset_of_line(index);
        if index + 1 >= self.line_count() {
            return start..self.buffer.len();
        }
        let mut end = self.buffer.offset_of_line(index + 1) - 1;
        if end > start && self.buffer.slice_to_cow(end - 1..end) == "\r" {
            end -= 1;
        }
        start..end
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.buffer.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        start..end
    }
}

impl LineBuffer for Document {
    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn line(&self, index: usize) -> Result<Cow<'_, str>, BufferError> {
        let line_count = self.line_count();
        if index >= line_count {
            return Err(BufferError::LineOutOfBounds { index, line_count });
        }
        Ok(self.buffer.slice_to_cow(self.line_span(index)))
    }

    fn apply_edit_batch(&mut self, edits: &[LineEdit]) -> Result<(), BufferError> {
        self.apply_edits(edits).map(|_| ())
    }
}
