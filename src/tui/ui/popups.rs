//! Popup and overlay rendering for the TUI
//!
//! The help screen and the search results list.

use crate::search::Query;
use crate::tui::app::App;
use crate::tui::help_text;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};

use super::util::{build_highlighted_line, popup_area, truncate_to_width};

const RESULT_VALUE_WIDTH: usize = 48;

/// Render the help popup with keyboard shortcuts
pub fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    // Min 40 cols for readability, min 10 rows for usable scroll area
    let popup_area = popup_area(area, 70, 80, 40, 10);
    let theme = &app.theme;

    frame.render_widget(Clear, popup_area);

    let help_lines = help_text::build_help_text(theme, &app.keybindings);
    let help_text_len = help_lines.len();

    let paragraph = Paragraph::new(help_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.modal_border()))
                .title(" Help ")
                .style(Style::default().bg(theme.modal_bg())),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, popup_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme.modal_border()));

    let mut scrollbar_state = ScrollbarState::new(help_text_len).position(app.help_scroll as usize);

    frame.render_stateful_widget(
        scrollbar,
        popup_area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Render the ranked search results over the body area.
pub fn render_search_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let popup_area = popup_area(area, 80, 70, 40, 8);
    frame.render_widget(Clear, popup_area);

    let query = Query::parse(&app.search.applied);
    let highlight = theme.search_match_style();

    let items: Vec<ListItem> = app
        .search
        .results
        .iter()
        .filter_map(|result| app.index.get(result.position))
        .map(|node| {
            let key_line = build_highlighted_line(
                vec![Span::raw("  ")],
                &node.key,
                Some(&query),
                Style::default()
                    .fg(theme.key_fg)
                    .add_modifier(Modifier::BOLD),
                highlight,
            );
            let mut spans = key_line.spans;
            spans.push(Span::raw("  "));
            spans.extend(
                build_highlighted_line(
                    Vec::new(),
                    &truncate_to_width(&node.display_value, RESULT_VALUE_WIDTH),
                    Some(&query),
                    Style::default().fg(theme.kind_color(node.kind)),
                    highlight,
                )
                .spans,
            );
            let path_line = build_highlighted_line(
                vec![Span::raw("    ")],
                &node.path,
                Some(&query),
                Style::default().fg(theme.type_label_fg),
                highlight,
            );
            ListItem::new(vec![Line::from(spans), path_line])
        })
        .collect();

    let title = if app.search.is_pending() {
        " Results · searching… ".to_string()
    } else if app.search.results.is_empty() {
        " No matches ".to_string()
    } else {
        format!(
            " Results {}/{} ",
            app.search.selected + 1,
            app.search.results.len()
        )
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.modal_border()))
                .title(title)
                .style(Style::default().bg(theme.modal_bg())),
        )
        .highlight_style(theme.selection_style());

    let mut state = ListState::default();
    if !app.search.results.is_empty() {
        state.select(Some(app.search.selected));
    }
    frame.render_stateful_widget(list, popup_area, &mut state);
}
