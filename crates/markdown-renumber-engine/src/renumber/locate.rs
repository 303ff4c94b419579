use crate::editing::{BufferError, LineBuffer};
use crate::parsing::classify;

/// Finds the first line of the numbered block containing `from`.
///
/// Walks upward while the previous line is a numbered item, at any depth.
/// Returns `None` when `from` itself is not a numbered item.
pub fn locate_start<B: LineBuffer + ?Sized>(
    buffer: &B,
    from: usize,
) -> Result<Option<usize>, BufferError> {
    if !classify(&buffer.line(from)?).is_list_item() {
        return Ok(None);
    }

    let mut start = from;
    while start > 0 && classify(&buffer.line(start - 1)?).is_list_item() {
        start -= 1;
    }
    Ok(Some(start))
}
