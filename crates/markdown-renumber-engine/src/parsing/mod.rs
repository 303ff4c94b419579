//! Line-level parsing for numbered list markers.
//!
//! Nothing here looks beyond a single line: [`classify`] reports indentation and
//! marker facts, [`IndentStyle`] turns indentation into a nesting depth.

pub mod indent;
pub mod line;

pub use indent::IndentStyle;
pub use line::{Delimiter, LineInfo, ListMarker, classify};
