use std::borrow::Cow;

use super::edit::LineEdit;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("line {index} is out of bounds (buffer has {line_count} lines)")]
    LineOutOfBounds { index: usize, line_count: usize },
    #[error("edit for line {line} is stale: expected {expected:?}, found {found:?}")]
    StaleEdit {
        line: usize,
        expected: String,
        found: String,
    },
    #[error("more than one edit targets line {0}")]
    DuplicateEdit(usize),
}

/// Line-oriented text buffer the renumbering engine reads from and writes to.
///
/// The engine only ever reads through `line`; edits are handed back to the
/// caller, which applies them with [`LineBuffer::apply_edit_batch`].
pub trait LineBuffer {
    /// Number of lines; always at least one, an empty buffer has one empty line.
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator.
    fn line(&self, index: usize) -> Result<Cow<'_, str>, BufferError>;

    /// Index of the final line.
    fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Replaces each edited line's full text. Either every edit is applied or
    /// none is.
    fn apply_edit_batch(&mut self, edits: &[LineEdit]) -> Result<(), BufferError>;
}

/// Plain vector of lines, mostly useful for tests and small tools.
impl LineBuffer for Vec<String> {
    fn line_count(&self) -> usize {
        self.len().max(1)
    }

    fn line(&self, index: usize) -> Result<Cow<'_, str>, BufferError> {
        match self.get(index) {
            Some(text) => Ok(Cow::Borrowed(text.as_str())),
            None if self.is_empty() && index == 0 => Ok(Cow::Borrowed("")),
            None => Err(BufferError::LineOutOfBounds {
                index,
                line_count: self.line_count(),
            }),
        }
    }

    fn apply_edit_batch(&mut self, edits: &[LineEdit]) -> Result<(), BufferError> {
        check_edits(&*self, edits)?;
        for edit in edits {
            if self.is_empty() {
                self.push(String::new());
            }
            self[edit.line] = edit.new_text.clone();
        }
        Ok(())
    }
}

/// Verifies a batch against the buffer without touching it: every line exists,
/// is targeted once, and still holds the text the edit was computed from.
pub(crate) fn check_edits<B: LineBuffer + ?Sized>(
    buffer: &B,
    edits: &[LineEdit],
) -> Result<(), BufferError> {
    let mut seen: Vec<usize> = edits.iter().map(|e| e.line).collect();
    seen.sort_unstable();
    if let Some(w) = seen.windows(2).find(|w| w[0] == w[1]) {
        return Err(BufferError::DuplicateEdit(w[0]));
    }

    for edit in edits {
        let current = buffer.line(edit.line)?;
        if current != edit.old_text {
            return Err(BufferError::StaleEdit {
                line: edit.line,
                expected: edit.old_text.clone(),
                found: current.into_owned(),
            });
        }
    }
    Ok(())
}
