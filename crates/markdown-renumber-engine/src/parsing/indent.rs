use super::line::classify;

/// How leading whitespace maps to list nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Every leading whitespace character is one nesting level.
    #[default]
    Tabs,
    /// Number of columns per nesting level; a tab counts as a full level.
    Spaces(usize),
}

impl IndentStyle {
    /// Convert an indentation string to depth level
    pub fn depth(&self, indent_str: &str) -> usize {
        match self {
            IndentStyle::Tabs => indent_str
                .chars()
                .take_while(|&c| c == ' ' || c == '\t')
                .count(),
            IndentStyle::Spaces(spaces_per_level) => {
                let per_level = (*spaces_per_level).max(1);
                let columns: usize = indent_str
                    .chars()
                    .map_while(|c| match c {
                        ' ' => Some(1),
                        '\t' => Some(per_level),
                        _ => None,
                    })
                    .sum();
                columns / per_level
            }
        }
    }

    /// Infers the style from the numbered items of a document.
    ///
    /// A tab-indented item wins outright; otherwise the narrowest space indent
    /// of any numbered item sets the level width. Documents without indented
    /// items fall back to [`IndentStyle::Tabs`].
    pub fn detect<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut narrowest: Option<usize> = None;

        for line in lines {
            let info = classify(line);
            if !info.is_list_item() || info.indent_width == 0 {
                continue;
            }
            if line.starts_with('\t') {
                return IndentStyle::Tabs;
            }
            narrowest = Some(narrowest.map_or(info.indent_width, |n| n.min(info.indent_width)));
        }

        narrowest.map_or(IndentStyle::Tabs, IndentStyle::Spaces)
    }
}
