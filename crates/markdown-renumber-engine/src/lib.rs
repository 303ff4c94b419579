//! Renumbering of ordered markdown lists.
//!
//! Sibling items at the same depth are made to count up by one from the first
//! item's declared number; nested lists keep their own sequences.
//!
//! ```rust
//! use markdown_renumber_engine::{Document, Renumberer};
//!
//! let mut doc = Document::from_bytes(b"1. a\n1. b\n\t3. x\n\t3. y\n1. c").unwrap();
//! let changed = Renumberer::new().renumber_document(&mut doc).unwrap();
//!
//! assert!(changed);
//! assert_eq!(doc.text(), "1. a\n2. b\n\t3. x\n\t4. y\n3. c");
//! ```

pub mod editing;
pub mod io;
pub mod parsing;
pub mod renumber;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BufferError, Document, LineBuffer, LineEdit, Patch};
pub use io::*;
pub use parsing::{IndentStyle, LineInfo, classify};
pub use renumber::{IndentStack, RenumberEngine, Renumberer, ScanMode, ScanResult, locate_start};
