/*!
 * # Editing Module
 *
 * The text buffer side of renumbering. The engine never mutates text itself:
 * it reads lines through the [`LineBuffer`] trait and hands back
 * [`LineEdit`]s, which the buffer applies as one all-or-nothing batch.
 *
 * ## Module Structure
 *
 * - **`buffer`**: `LineBuffer` collaborator trait and `BufferError`
 * - **`document`**: xi-rope backed `Document` implementing `LineBuffer`
 * - **`edit`**: `LineEdit`, a positional full-line replacement
 * - **`patch`**: metadata returned after a batch is applied
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_renumber_engine::editing::*;
 *
 * let mut doc = Document::from_bytes(b"1. a\n3. b").unwrap();
 * assert_eq!(doc.line(1).unwrap(), "3. b");
 *
 * let patch = doc.apply_edits(&[LineEdit::new(1, "3. b", "2. b")]).unwrap();
 * assert_eq!(patch.version, 1);
 * assert_eq!(doc.text(), "1. a\n2. b");
 * ```
 */

pub mod buffer;
pub mod document;
pub mod edit;
pub mod patch;

pub use buffer::{BufferError, LineBuffer};
pub use document::Document;
pub use edit::LineEdit;
pub use patch::Patch;
