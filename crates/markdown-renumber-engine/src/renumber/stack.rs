use crate::editing::{BufferError, LineBuffer};
use crate::parsing::{IndentStyle, classify};

use super::locate::locate_start;

/// Last ordinal seen at each nesting depth during one scan.
///
/// Depths are contiguous from 0 to `height() - 1`. Recording at a shallower
/// depth drops every deeper counter, so a nested list that appears later starts
/// over from whatever its first item declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentStack {
    values: Vec<u64>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack state left by the contiguous numbered lines directly above `line`,
    /// each recorded with its declared ordinal.
    pub fn above<B: LineBuffer + ?Sized>(
        buffer: &B,
        line: usize,
        style: IndentStyle,
    ) -> Result<Self, BufferError> {
        let mut stack = Self::new();
        if line == 0 {
            return Ok(stack);
        }
        let Some(block_start) = locate_start(buffer, line - 1)? else {
            return Ok(stack);
        };

        for index in block_start..line {
            let text = buffer.line(index)?;
            let info = classify(&text);
            if let Some(ordinal) = info.ordinal() {
                stack.record_line(style.depth(info.indent(&text)), ordinal);
            }
        }
        Ok(stack)
    }

    pub fn value_at(&self, depth: usize) -> Option<u64> {
        self.values.get(depth).copied()
    }

    pub fn height(&self) -> usize {
        self.values.len()
    }

    /// Seeds depth 0 so the next top-level item continues after `value`.
    pub fn set_initial_value(&mut self, value: u64) {
        self.record_line(0, value);
    }

    /// Records `ordinal` as the current value at `depth`.
    ///
    /// A depth past the current height never opens a gap: the line is taken
    /// as continuing the top-of-stack depth instead.
    pub fn record_line(&mut self, depth: usize, ordinal: u64) {
        let height = self.height();
        if depth < height {
            self.values.truncate(depth + 1);
            self.values[depth] = ordinal;
        } else if depth == height || height == 0 {
            self.values.push(ordinal);
        } else {
            self.values[height - 1] = ordinal;
        }
    }
}
