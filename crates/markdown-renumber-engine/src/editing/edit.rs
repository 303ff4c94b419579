/// A full-line replacement proposed by the renumbering engine.
///
/// Edits are positional: `line` refers to the buffer as it was when the edit was
/// produced, and `old_text` is what the line held at that time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub line: usize,
    pub old_text: String,
    pub new_text: String,
}

impl LineEdit {
    pub fn new(line: usize, old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            line,
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }
}
