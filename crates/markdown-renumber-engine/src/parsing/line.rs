use std::sync::LazyLock;

use regex::Regex;

/// Matches a numbered marker at the start of the line: indentation, digits,
/// delimiter, exactly one space consumed.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([0-9]+)([.)]) ").expect("list marker pattern is valid")
});

/// The character that follows the digits of a list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `1. item`
    Period,
    /// `1) item`
    Paren,
}

impl Delimiter {
    fn from_capture(s: &str) -> Option<Self> {
        match s {
            "." => Some(Delimiter::Period),
            ")" => Some(Delimiter::Paren),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Period => '.',
            Delimiter::Paren => ')',
        }
    }
}

/// A numbered list marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub ordinal: u64,
    pub delimiter: Delimiter,
}

/// Classification of a single line containing only local facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    /// Number of leading space/tab characters.
    pub indent_width: usize,
    /// Present only when the line is a numbered list item.
    pub marker: Option<ListMarker>,
    /// Byte offset where the item content starts (after the marker's space, or
    /// after the indentation for non-list lines).
    pub content_offset: usize,
}

impl LineInfo {
    pub fn ordinal(&self) -> Option<u64> {
        self.marker.map(|m| m.ordinal)
    }

    pub fn is_list_item(&self) -> bool {
        self.marker.is_some()
    }

    /// The leading whitespace of `text`, which must be the line this info was
    /// classified from.
    pub fn indent<'a>(&self, text: &'a str) -> &'a str {
        &text[..self.indent_width]
    }

    /// Rebuilds `text` with `ordinal` in place of the current digits, keeping
    /// indentation, delimiter and content byte for byte.
    ///
    /// Returns `None` for lines without a marker.
    pub fn renumbered(&self, text: &str, ordinal: u64) -> Option<String> {
        let marker = self.marker?;
        let content = &text[self.content_offset..];
        let mut out = String::with_capacity(text.len() + 2);
        out.push_str(self.indent(text));
        out.push_str(&ordinal.to_string());
        out.push(marker.delimiter.as_char());
        out.push(' ');
        out.push_str(content);
        Some(out)
    }
}

/// Classifies one line of text.
///
/// Never fails: anything that is not a well-formed marker at the start of the
/// line (after indentation) is reported as a plain line.
pub fn classify(line: &str) -> LineInfo {
    let indent_width = line
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();

    let marker = LIST_MARKER.captures(line).and_then(|caps| {
        let ordinal = caps.get(1)?.as_str().parse::<u64>().ok()?;
        let delimiter = Delimiter::from_capture(caps.get(2)?.as_str())?;
        Some((ListMarker { ordinal, delimiter }, caps.get(0)?.end()))
    });

    match marker {
        Some((marker, content_offset)) => LineInfo {
            indent_width,
            marker: Some(marker),
            content_offset,
        },
        None => LineInfo {
            indent_width,
            marker: None,
            content_offset: indent_width,
        },
    }
}
