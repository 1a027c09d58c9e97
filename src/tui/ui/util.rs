//! Utility functions for UI rendering
//!
//! Pure functions for layout calculations, truncation, and search highlighting.

use crate::search::{self, Query};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate a centered rectangular area within a parent area.
///
/// Returns a `Rect` that is centered both horizontally and vertically,
/// sized as a percentage of the parent area.
pub fn centered_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Centered popup sized as a percentage of `area`, but never smaller than
/// `min_width` x `min_height` (clamped to the parent).
pub fn popup_area(
    area: Rect,
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let centered = centered_area(area, percent_x, percent_y);
    let width = centered.width.max(min_width).min(area.width);
    let height = centered.height.max(min_height).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cut `text` to at most `width` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Split `text` into spans, styling the characters the search query matched.
pub fn highlight_search_matches(
    text: &str,
    query: &Query,
    base_style: Style,
    highlight_style: Style,
) -> Vec<Span<'static>> {
    let ranges = search::highlight(text, query);
    if ranges.is_empty() {
        return vec![Span::styled(text.to_string(), base_style)];
    }
    search::segments(text, &ranges)
        .into_iter()
        .map(|(segment, marked)| {
            let style = if marked { highlight_style } else { base_style };
            Span::styled(segment, style)
        })
        .collect()
}

/// Build a Line with optional search highlighting, after a prefix.
pub fn build_highlighted_line(
    prefix: Vec<Span<'static>>,
    text: &str,
    query: Option<&Query>,
    base_style: Style,
    highlight_style: Style,
) -> Line<'static> {
    let mut spans = prefix;

    match query {
        Some(q) => spans.extend(highlight_search_matches(text, q, base_style, highlight_style)),
        None => spans.push(Span::styled(text.to_string(), base_style)),
    }

    Line::from(spans)
}
