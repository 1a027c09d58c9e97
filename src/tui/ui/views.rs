//! Painting of the tree, column and raw views.

use super::util::truncate_to_width;
use crate::document::path;
use crate::render::{column, tree};
use crate::tui::app::App;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState,
};

/// Columns shown at once; deeper paths scroll the leftmost ones out.
const MAX_VISIBLE_COLUMNS: usize = 4;

const SUMMARY_WIDTH: usize = 40;

pub fn render_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let rows = tree::render(app.nav.document(), app.nav.state());

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let indicator = match (row.expandable, row.expanded) {
                (true, true) => "▼ ",
                (true, false) => "▶ ",
                _ => "  ",
            };
            let mut spans = vec![
                Span::raw(format!("{}{}", indent, indicator)),
                Span::styled(
                    row.label.clone(),
                    Style::default()
                        .fg(theme.depth_color(row.depth_color))
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if !row.expanded {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    truncate_to_width(&row.summary, SUMMARY_WIDTH),
                    Style::default().fg(theme.kind_color(row.kind)),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", row.type_label),
                Style::default()
                    .fg(theme.type_label_fg)
                    .add_modifier(Modifier::DIM),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    app.tree_state.select(rows.iter().position(|row| row.selected));
    app.page_size = area.height.saturating_sub(2) as usize;

    let title = format!(" Tree · {} ", path::display(app.nav.selection()));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(title),
        )
        .style(theme.content_style())
        .highlight_style(theme.selection_style())
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.tree_state);

    let mut scrollbar_state =
        ScrollbarState::new(rows.len()).position(app.tree_state.selected().unwrap_or(0));
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.border_unfocused)),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

pub fn render_columns(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let columns = column::render(app.nav.document(), app.nav.state());
    app.page_size = area.height.saturating_sub(2) as usize;

    let skip = columns.len().saturating_sub(MAX_VISIBLE_COLUMNS);
    let shown = &columns[skip..];
    if shown.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, shown.len() as u32); shown.len()];
    let areas = Layout::horizontal(constraints).split(area);
    let last = shown.len() - 1;

    for (i, (col, col_area)) in shown.iter().zip(areas.iter()).enumerate() {
        let width = col_area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = col
            .entries
            .iter()
            .map(|entry| {
                let marker = if entry.is_container { " ›" } else { "" };
                let label = truncate_to_width(&entry.label, width.saturating_sub(marker.len()));
                let mut spans = vec![Span::styled(
                    label,
                    Style::default().fg(if entry.is_container {
                        theme.key_fg
                    } else {
                        theme.kind_color(entry.kind)
                    }),
                )];
                if entry.is_container {
                    spans.push(Span::styled(
                        marker,
                        Style::default().fg(theme.type_label_fg),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = match path::last_segment(&col.parent) {
            Some(segment) => format!(" {} ", segment),
            None => format!(" {} ", path::ROOT_MARKER),
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(i == last))
                    .title(title),
            )
            .style(theme.content_style())
            .highlight_style(if i == last {
                theme.selection_style()
            } else {
                Style::default()
                    .fg(theme.selection_fg)
                    .add_modifier(Modifier::UNDERLINED)
            });

        let mut state = ListState::default();
        state.select(col.selected);
        frame.render_stateful_widget(list, *col_area, &mut state);
    }
}

pub fn render_raw(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let doc = app.nav.document();
    let text = app.raw.text(doc);
    let total = text.lines().count();
    let height = area.height.saturating_sub(2) as usize;
    app.page_size = height;

    let gutter = total.to_string().len();
    let lines: Vec<Line> = app
        .highlighter
        .highlight_window(text, "json", app.raw_scroll, height)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} │ ", app.raw_scroll + i + 1, width = gutter),
                Style::default().fg(theme.type_label_fg),
            )];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    let title = format!(" Raw · {} ", doc.source());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(title),
        )
        .style(theme.content_style());
    frame.render_widget(paragraph, area);

    let mut scrollbar_state = ScrollbarState::new(total).position(app.raw_scroll);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(theme.border_unfocused)),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
