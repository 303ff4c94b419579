use std::borrow::Cow;

use crate::editing::{BufferError, LineBuffer, LineEdit};
use crate::parsing::{IndentStyle, LineInfo, classify};

use super::stack::IndentStack;

/// When a scan stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Stop at the first already-correct item after the start line.
    Local,
    /// Continue to the end of the contiguous numbered block.
    Full,
}

/// Edits proposed by one scan, plus the last line consumed into the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub edits: Vec<LineEdit>,
    pub end_line: usize,
}

impl ScanResult {
    fn empty(end_line: usize) -> Self {
        Self {
            edits: Vec::new(),
            end_line,
        }
    }
}

/// One line as seen by the scan loop.
#[derive(Debug)]
enum ScanLine<'a> {
    ListItem {
        text: Cow<'a, str>,
        info: LineInfo,
        depth: usize,
        ordinal: u64,
    },
    PlainLine,
    EndOfBuffer,
}

/// Computes renumbering edits for a numbered block.
///
/// Holds no per-call state: each [`scan`](RenumberEngine::scan) builds its own
/// [`IndentStack`] from the lines above the start point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenumberEngine {
    indent_style: IndentStyle,
}

impl RenumberEngine {
    pub fn new(indent_style: IndentStyle) -> Self {
        Self { indent_style }
    }

    pub fn indent_style(&self) -> IndentStyle {
        self.indent_style
    }

    /// Scans forward from `start_line` and proposes edits for every item whose
    /// ordinal does not continue its sequence.
    ///
    /// The start point is adjusted first. Line 0 has nothing above it to be
    /// compared with, so the scan begins at line 1. Any other start line moves
    /// down one when the line above is not a numbered item or sits at a
    /// shallower depth; the start line then opens its sequence and is taken
    /// as declared. A positive `seed` overrides the depth-0 counter so the
    /// next top-level item becomes `seed + 1`.
    pub fn scan<B: LineBuffer + ?Sized>(
        &self,
        buffer: &B,
        start_line: usize,
        mode: ScanMode,
        seed: Option<u64>,
    ) -> Result<ScanResult, BufferError> {
        let text = buffer.line(start_line)?;
        let info = classify(&text);
        if !info.is_list_item() {
            return Ok(ScanResult::empty(start_line));
        }
        let depth = self.indent_style.depth(info.indent(&text));

        let mut start = start_line;
        if start == 0 {
            if buffer.last_line() == 0 {
                return Ok(ScanResult::empty(start_line));
            }
            start = 1;
        } else {
            match self.read(buffer, start - 1)? {
                ScanLine::ListItem {
                    depth: prev_depth, ..
                } if prev_depth >= depth => {}
                _ => start += 1,
            }
        }

        let mut stack = IndentStack::above(buffer, start, self.indent_style)?;
        if let Some(seed) = seed.filter(|&v| v > 0) {
            stack.set_initial_value(seed);
        }

        self.generate(buffer, start, mode, stack)
    }

    fn generate<B: LineBuffer + ?Sized>(
        &self,
        buffer: &B,
        start: usize,
        mode: ScanMode,
        mut stack: IndentStack,
    ) -> Result<ScanResult, BufferError> {
        let mut edits = Vec::new();
        let mut current = start;
        let mut first = true;

        loop {
            let (text, info, depth, actual) = match self.read(buffer, current)? {
                ScanLine::ListItem {
                    text,
                    info,
                    depth,
                    ordinal,
                } => (text, info, depth, ordinal),
                ScanLine::PlainLine | ScanLine::EndOfBuffer => break,
            };

            log::debug!(
                "line: {current}, depth: {depth}, curr num: {actual}, text index: {}",
                info.content_offset
            );

            // Only depths already on the stack have an expected value.
            let expected = stack.value_at(depth).and_then(|v| v.checked_add(1));

            match expected {
                Some(expected) if expected != actual => {
                    if let Some(new_text) = info.renumbered(&text, expected) {
                        edits.push(LineEdit::new(current, &*text, new_text));
                    }
                    stack.record_line(depth, expected);
                }
                Some(_) if mode == ScanMode::Local && !first => break,
                _ => stack.record_line(depth, actual),
            }

            first = false;
            current += 1;
        }

        Ok(ScanResult {
            edits,
            end_line: current.saturating_sub(1),
        })
    }

    fn read<'b, B: LineBuffer + ?Sized>(
        &self,
        buffer: &'b B,
        index: usize,
    ) -> Result<ScanLine<'b>, BufferError> {
        if index >= buffer.line_count() {
            return Ok(ScanLine::EndOfBuffer);
        }
        let text = buffer.line(index)?;
        let info = classify(&text);
        Ok(match info.ordinal() {
            Some(ordinal) => {
                let depth = self.indent_style.depth(info.indent(&text));
                ScanLine::ListItem {
                    text,
                    info,
                    depth,
                    ordinal,
                }
            }
            None => ScanLine::PlainLine,
        })
    }
}
