/// Result of applying a batch of line edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of the replacement text in the updated buffer
    pub changed: Vec<std::ops::Range<usize>>,
    pub version: u64,
}
