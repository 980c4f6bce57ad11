//! List, detail and grid renderers.

use crate::model::invention::{Invention, InventionId};
use crate::view::card::{wrap_lines, Card};
use serde::{Deserialize, Serialize};

/// Placeholder shown in the detail pane when nothing is selected.
pub const DETAIL_PLACEHOLDER: &str = "Select an invention";

const GRID_GAP: usize = 2;

/// Front-end arrangement of the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Every record as a card; opening a card starts editing.
    #[default]
    Grid,
    /// Title list plus a detail pane; opening a row only selects it.
    MasterDetail,
}

/// Column arrangement for the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub card_width: usize,
}

impl GridLayout {
    pub fn fixed(columns: usize, total_width: usize) -> Self {
        let columns = columns.max(1);
        let gaps = GRID_GAP.saturating_mul(columns - 1);
        Self {
            columns,
            card_width: (total_width.saturating_sub(gaps) / columns).max(8),
        }
    }

    /// Fits as many columns of at least `min_card_width` as `total_width` allows.
    pub fn adaptive(total_width: usize, min_card_width: usize) -> Self {
        let min_card_width = min_card_width.max(8);
        let columns = ((total_width + GRID_GAP) / (min_card_width + GRID_GAP)).max(1);
        Self::fixed(columns, total_width)
    }
}

/// Renders the sidebar list, numbering rows from 1 and marking the selection.
pub fn render_list(items: &[&Invention], selected: Option<InventionId>) -> String {
    if items.is_empty() {
        return "(no inventions)\n".to_string();
    }

    let width = items.len().to_string().len();
    let mut out = String::new();
    for (index, invention) in items.iter().enumerate() {
        let marker = if Some(invention.id) == selected { '>' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:>width$}. {}\n",
            index + 1,
            invention.display_title()
        ));
    }
    out
}

/// Renders the detail pane for the selected invention, if any.
pub fn render_detail(invention: Option<&Invention>, width: usize) -> String {
    let Some(invention) = invention else {
        return format!("{DETAIL_PLACEHOLDER}\n");
    };

    let mut out = format!("{}\n", invention.display_title());
    out.push_str(&"=".repeat(invention.display_title().chars().count()));
    out.push('\n');
    for line in wrap_lines(invention.details_text(), width, usize::MAX) {
        out.push_str(&line);
        out.push('\n');
    }
    if let Some(link) = invention.link() {
        let suffix = if link.has_scheme { "" } else { " (relative)" };
        out.push_str(&format!("link: {}{suffix}\n", link.text));
    }
    out.push_str(&format!("id: {}\n", invention.id));
    out
}

/// Renders numbered cards in rows of `layout.columns`.
pub fn render_grid(items: &[&Invention], layout: GridLayout) -> String {
    if items.is_empty() {
        return "(no inventions)\n".to_string();
    }

    let inner = layout.card_width.saturating_sub(4).max(1);
    let mut out = String::new();
    for (row_index, row) in items.chunks(layout.columns).enumerate() {
        let boxes = row
            .iter()
            .enumerate()
            .map(|(offset, invention)| {
                let number = row_index * layout.columns + offset + 1;
                card_box(number, &Card::from_invention(invention, inner), inner)
            })
            .collect::<Vec<_>>();
        let height = boxes.iter().map(Vec::len).max().unwrap_or(0);

        for line_index in 0..height {
            let line = boxes
                .iter()
                .map(|lines| {
                    lines
                        .get(line_index)
                        .cloned()
                        .unwrap_or_else(|| " ".repeat(inner + 4))
                })
                .collect::<Vec<_>>()
                .join(&" ".repeat(GRID_GAP));
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

fn card_box(number: usize, card: &Card, inner: usize) -> Vec<String> {
    let label = format!("-{number}");
    let top_fill = (inner + 2).saturating_sub(label.chars().count());
    let mut lines = vec![format!("+{label}{}+", "-".repeat(top_fill))];
    for text in card.lines() {
        let pad = inner.saturating_sub(text.chars().count());
        lines.push(format!("| {text}{} |", " ".repeat(pad)));
    }
    lines.push(format!("+{}+", "-".repeat(inner + 2)));
    lines
}

#[cfg(test)]
mod tests {
    use super::{render_detail, render_grid, render_list, GridLayout, DETAIL_PLACEHOLDER};
    use crate::model::invention::Invention;

    fn named(title: &str) -> Invention {
        let mut invention = Invention::new_default();
        invention.title = Some(title.to_string());
        invention
    }

    #[test]
    fn adaptive_grid_fits_columns_to_width() {
        assert_eq!(GridLayout::adaptive(98, 30).columns, 3);
        assert_eq!(GridLayout::adaptive(20, 30).columns, 1);
    }

    #[test]
    fn fixed_grid_saturates_huge_column_counts() {
        let layout = GridLayout::fixed(usize::MAX, 96);
        assert_eq!(layout.columns, usize::MAX);
        assert_eq!(layout.card_width, 8);
        assert_eq!(GridLayout::fixed(0, 96).columns, 1);
    }

    #[test]
    fn list_marks_selected_row() {
        let a = named("Abacus");
        let b = named("Bicycle");
        let rendered = render_list(&[&a, &b], Some(b.id));
        assert_eq!(rendered, "  1. Abacus\n> 2. Bicycle\n");
    }

    #[test]
    fn detail_without_selection_shows_placeholder() {
        assert_eq!(render_detail(None, 40), format!("{DETAIL_PLACEHOLDER}\n"));
    }

    #[test]
    fn detail_marks_links_without_a_scheme() {
        let mut invention = named("Loom");
        invention.link_string = Some("https://example.com/loom".to_string());
        let absolute = render_detail(Some(&invention), 40);
        assert!(absolute.contains("link: https://example.com/loom\n"));

        invention.link_string = Some("example.com/loom".to_string());
        let relative = render_detail(Some(&invention), 40);
        assert!(relative.contains("link: example.com/loom (relative)\n"));

        invention.link_string = Some("not a link".to_string());
        assert!(!render_detail(Some(&invention), 40).contains("link:"));
    }

    #[test]
    fn grid_renders_every_card() {
        let records = ["Abacus", "Bicycle", "Compass"].map(named);
        let refs = records.iter().collect::<Vec<_>>();
        let rendered = render_grid(&refs, GridLayout::fixed(2, 60));
        for title in ["Abacus", "Bicycle", "Compass"] {
            assert!(rendered.contains(title), "missing {title}");
        }
        assert!(rendered.contains("+-3"));
    }
}
