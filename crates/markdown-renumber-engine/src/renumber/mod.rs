//! Renumbering of ordered list items.
//!
//! [`Renumberer`] is the public entry point. It resolves where a list starts
//! ([`locate_start`]), asks the [`RenumberEngine`] for edits and applies them
//! to the buffer as one batch.

pub mod engine;
pub mod locate;
pub mod stack;

pub use engine::{RenumberEngine, ScanMode, ScanResult};
pub use locate::locate_start;
pub use stack::IndentStack;

use crate::editing::{BufferError, Document, LineBuffer, LineEdit};
use crate::parsing::{IndentStyle, classify};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renumberer {
    engine: RenumberEngine,
}

impl Renumberer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_style(indent_style: IndentStyle) -> Self {
        Self {
            engine: RenumberEngine::new(indent_style),
        }
    }

    pub fn engine(&self) -> &RenumberEngine {
        &self.engine
    }

    /// Local fix-up starting at `line`.
    pub fn renumber_locally<B: LineBuffer + ?Sized>(
        &self,
        buffer: &B,
        line: usize,
    ) -> Result<ScanResult, BufferError> {
        self.engine.scan(buffer, line, ScanMode::Local, None)
    }

    /// Full renumbering of the block containing `line`, or `None` if `line` is
    /// not a numbered item.
    pub fn renumber_block<B: LineBuffer + ?Sized>(
        &self,
        buffer: &B,
        line: usize,
    ) -> Result<Option<ScanResult>, BufferError> {
        match locate_start(buffer, line)? {
            Some(start) => self.engine.scan(buffer, start, ScanMode::Full, None).map(Some),
            None => Ok(None),
        }
    }

    /// Fixes the list under the cursor and applies the edits.
    ///
    /// The local scan runs from the first line of the cursor's block, so it
    /// stops at the first already-correct item below the top of the list.
    /// Returns whether the buffer changed.
    pub fn renumber_list_at_cursor<B: LineBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        cursor_line: usize,
    ) -> Result<bool, BufferError> {
        let Some(start) = locate_start(&*buffer, cursor_line)? else {
            log::debug!("line {cursor_line} is not part of a numbered list");
            return Ok(false);
        };

        let mut changes = self.renumber_locally(&*buffer, start)?.edits;
        Self::apply_changes(buffer, &mut changes)
    }

    /// [`renumber_list_at_cursor`](Self::renumber_list_at_cursor) at the top
    /// line of the document's selection.
    pub fn renumber_list_at_selection(&self, doc: &mut Document) -> Result<bool, BufferError> {
        let line = doc.selection_top_line();
        self.renumber_list_at_cursor(doc, line)
    }

    /// Edits that renumber every list intersecting `[start, end]`.
    ///
    /// Each block is scanned once from its first line; `end` past the last
    /// line is clamped.
    pub fn collect_range<B: LineBuffer + ?Sized>(
        &self,
        buffer: &B,
        start: usize,
        end: usize,
    ) -> Result<Vec<LineEdit>, BufferError> {
        let end = end.min(buffer.last_line());
        let mut changes = Vec::new();
        let mut line = start;

        while line <= end {
            if classify(&buffer.line(line)?).is_list_item()
                && let Some(block) = self.renumber_block(buffer, line)?
            {
                changes.extend(block.edits);
                line = line.max(block.end_line);
            }
            line += 1;
        }

        Ok(changes)
    }

    /// Renumbers every list in `[start, end]` in one batch.
    pub fn renumber_all_lists_in_range<B: LineBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        start: usize,
        end: usize,
    ) -> Result<bool, BufferError> {
        let mut changes = self.collect_range(&*buffer, start, end)?;
        Self::apply_changes(buffer, &mut changes)
    }

    pub fn renumber_document<B: LineBuffer + ?Sized>(
        &self,
        buffer: &mut B,
    ) -> Result<bool, BufferError> {
        let last = buffer.last_line();
        self.renumber_all_lists_in_range(buffer, 0, last)
    }

    /// Applies `changes` as one batch and empties the vector.
    ///
    /// Returns `false` without touching the buffer when there is nothing to
    /// apply.
    pub fn apply_changes<B: LineBuffer + ?Sized>(
        buffer: &mut B,
        changes: &mut Vec<LineEdit>,
    ) -> Result<bool, BufferError> {
        if changes.is_empty() {
            return Ok(false);
        }

        buffer.apply_edit_batch(changes)?;
        log::debug!("renumbered {} lines", changes.len());
        changes.clear();
        Ok(true)
    }
}
