//! Card model used by the grid layout.

use crate::model::invention::Invention;

pub const CARD_TITLE_LINES: usize = 2;
pub const CARD_DETAIL_LINES: usize = 4;
pub const CARD_LINK_LINES: usize = 1;

const ELLIPSIS: char = '…';

/// Pre-wrapped card content for one invention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: Vec<String>,
    pub details: Vec<String>,
    /// Present only when the link parses.
    pub link: Option<String>,
}

impl Card {
    /// Builds a card whose text fits in `width` columns.
    pub fn from_invention(invention: &Invention, width: usize) -> Self {
        let width = width.max(1);
        Self {
            title: wrap_lines(invention.display_title(), width, CARD_TITLE_LINES),
            details: wrap_lines(invention.details_text(), width, CARD_DETAIL_LINES),
            link: invention.link().map(|link| {
                wrap_lines(link.text, width, CARD_LINK_LINES)
                    .into_iter()
                    .next()
                    .unwrap_or_default()
            }),
        }
    }

    /// All card lines in render order.
    pub fn lines(&self) -> Vec<&str> {
        self.title
            .iter()
            .chain(self.details.iter())
            .chain(self.link.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Greedy word wrap capped at `max_lines`; an overflow marks the last line
/// with an ellipsis.
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            for chunk in split_long_word(word, width) {
                let needed = if current.is_empty() {
                    chunk.chars().count()
                } else {
                    current.chars().count() + 1 + chunk.chars().count()
                };
                if needed > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&chunk);
            }
        }
        lines.push(current);
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            mark_truncated(last, width);
        }
    }

    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let chars = word.chars().collect::<Vec<_>>();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn mark_truncated(line: &mut String, width: usize) {
    if line.chars().count() >= width {
        let kept = line.chars().take(width.saturating_sub(1)).collect::<String>();
        *line = kept;
    }
    line.push(ELLIPSIS);
}

#[cfg(test)]
mod tests {
    use super::{wrap_lines, Card};
    use crate::model::invention::Invention;

    #[test]
    fn wrap_respects_width_and_line_cap() {
        let lines = wrap_lines("one two three four five six", 9, 2);
        assert_eq!(lines, vec!["one two", "three…"]);
    }

    #[test]
    fn wrap_splits_words_longer_than_width() {
        let lines = wrap_lines("abcdefgh", 3, 5);
        assert_eq!(lines, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn card_uses_placeholder_title_and_skips_bad_link() {
        let mut invention = Invention::new_default();
        invention.title = None;
        invention.details = None;
        invention.link_string = Some("not a link".to_string());

        let card = Card::from_invention(&invention, 20);
        assert_eq!(card.title, vec!["Untitled".to_string()]);
        assert!(card.details.is_empty());
        assert!(card.link.is_none());
    }

    #[test]
    fn card_caps_details_at_four_lines() {
        let mut invention = Invention::new_default();
        invention.details = Some("a\nb\nc\nd\ne\nf".to_string());
        let card = Card::from_invention(&invention, 10);
        assert_eq!(card.details.len(), 4);
        assert!(card.details[3].ends_with('…'));
    }
}
