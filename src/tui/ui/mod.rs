mod layout;
mod popups;
mod preview;
mod util;
mod views;

use layout::{DynamicLayout, Section};

use crate::nav::ViewMode;
use crate::render::StatusInfo;
use crate::tui::app::{App, AppMode};
use popups::{render_help_popup, render_search_results};
use preview::render_preview;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use views::{render_columns, render_raw, render_tree};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let show_prompt = matches!(app.mode, AppMode::Search | AppMode::GotoPath);
    let main_layout = DynamicLayout::vertical(area)
        .section(Section::Title, Constraint::Length(1))
        .section_if(show_prompt, Section::Prompt, Constraint::Length(3))
        .section(Section::Body, Constraint::Min(0))
        .section(Section::Status, Constraint::Length(1))
        .build();

    render_title_bar(frame, app, main_layout.area(Section::Title));

    if let Some(prompt_area) = main_layout.get(Section::Prompt) {
        render_prompt(frame, app, prompt_area);
    }

    let body = main_layout.area(Section::Body);
    let body_layout = DynamicLayout::horizontal(body)
        .section(
            Section::Navigation,
            if app.show_preview {
                Constraint::Percentage(app.tree_width)
            } else {
                Constraint::Percentage(100)
            },
        )
        .section_if(
            app.show_preview,
            Section::Preview,
            Constraint::Percentage(100 - app.tree_width),
        )
        .build();

    let nav_area = body_layout.area(Section::Navigation);
    match app.view_mode() {
        ViewMode::Tree => render_tree(frame, app, nav_area),
        ViewMode::Column => render_columns(frame, app, nav_area),
        ViewMode::Raw => render_raw(frame, app, nav_area),
    }
    if let Some(preview_area) = body_layout.get(Section::Preview) {
        render_preview(frame, app, preview_area);
    }

    render_status_bar(frame, app, main_layout.area(Section::Status));

    if app.mode == AppMode::Search && !app.search.input.is_empty() {
        render_search_results(frame, app, body);
    }
    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = format!(
        "treenav - {} - {} nodes",
        app.document().source(),
        app.index.len()
    );
    let title = Paragraph::new(title_text).style(
        Style::default()
            .fg(app.theme.title_bar_fg)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, area);
}

fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let input_style = Style::default()
        .fg(theme.search_match_fg)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(theme.type_label_fg);

    let (title, spans) = match app.mode {
        AppMode::GotoPath => (
            " Go to path ",
            vec![
                Span::raw(": "),
                Span::styled(format!("{}_", app.goto_input), input_style),
                Span::styled("  (Enter: go, Esc: cancel)", hint_style),
            ],
        ),
        _ => {
            let match_info = if app.search.is_pending() {
                " [searching…]".to_string()
            } else if app.search.input.is_empty() {
                String::new()
            } else if app.search.results.is_empty() {
                " [no matches]".to_string()
            } else {
                format!(
                    " [{}/{}]",
                    app.search.selected + 1,
                    app.search.results.len()
                )
            };
            (
                " Search ",
                vec![
                    Span::raw("/ "),
                    Span::styled(format!("{}_", app.search.input), input_style),
                    Span::raw(match_info),
                    Span::styled("  (Enter: jump, ↑↓: pick, Esc: cancel)", hint_style),
                ],
            )
        }
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            app.theme
                .status_bar_style()
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let info = StatusInfo::new(app.nav.state(), app.index.len());
    let status_text = format!(
        " {} │ {} │ ?:Help",
        info,
        app.keybinding_mode().display_name()
    );
    let status = Paragraph::new(status_text).style(app.theme.status_bar_style());
    frame.render_widget(status, area);
}
