//! Preview pane: property table on top, type-specific body below.

use crate::document::MediaCategory;
use crate::host::FilePreview;
use crate::keybindings::Action;
use crate::preview::media::format_position;
use crate::preview::{PreviewBody, QueryResult, format_bytes};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::path::Path;
use std::time::Instant;

const PROPERTY_NAME_WIDTH: usize = 10;
const SWATCH_ROWS: usize = 4;
const SWATCH_WIDTH: usize = 16;

pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let preview = app.preview();

    let mut lines: Vec<Line<'static>> = preview
        .properties
        .iter()
        .map(|property| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", property.name, width = PROPERTY_NAME_WIDTH),
                    Style::default().fg(theme.key_fg),
                ),
                Span::raw(property.value.clone()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.extend(body_lines(app, &preview.body));

    let title = format!(" Preview · {} ", preview.composer);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(title),
        )
        .style(theme.content_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn body_lines(app: &App, body: &PreviewBody) -> Vec<Line<'static>> {
    let theme = &app.theme;
    match body {
        PreviewBody::Empty => vec![dim(theme, "Nothing selected")],
        PreviewBody::Text(text) => text
            .lines()
            .map(|line| Line::styled(line.to_string(), Style::default().fg(theme.string_fg)))
            .collect(),
        PreviewBody::Markdown(source) => app.highlighter.highlight_code(source, "md"),
        PreviewBody::Json { text, hidden_lines } => {
            let mut lines = app.highlighter.highlight_code(text, "json");
            if *hidden_lines > 0 {
                lines.push(dim(theme, &format!("… {} more lines", hidden_lines)));
            }
            lines
        }
        PreviewBody::Color(rgba) => {
            let swatch = Color::Rgb(rgba.r, rgba.g, rgba.b);
            (0..SWATCH_ROWS)
                .map(|_| Line::styled(" ".repeat(SWATCH_WIDTH), Style::default().bg(swatch)))
                .collect()
        }
        PreviewBody::Date { long_form } => vec![Line::styled(
            long_form.clone(),
            Style::default()
                .fg(theme.number_fg)
                .add_modifier(Modifier::BOLD),
        )],
        PreviewBody::Link { href, media } => {
            let mut lines = vec![Line::styled(
                format!("↗ {}", href),
                Style::default()
                    .fg(theme.link_fg)
                    .add_modifier(Modifier::UNDERLINED),
            )];
            if let Some(media) = media {
                lines.push(dim(
                    theme,
                    &format!("{} link (.{})", media.category, media.extension),
                ));
            }
            lines.push(key_hint(app, Action::OpenExternal, "open in browser"));
            lines
        }
        PreviewBody::File { path, media, result } => {
            file_lines(app, path, media.as_ref().map(|m| m.category), result.as_ref())
        }
    }
}

fn file_lines(
    app: &App,
    path: &str,
    category: Option<MediaCategory>,
    result: Option<&QueryResult>,
) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let Some(result) = result else {
        return vec![dim(theme, "Checking file…")];
    };
    match result {
        QueryResult::Missing => vec![error(theme, "✗ File not found")],
        QueryResult::Directory(_) => vec![
            Line::styled("Directory", Style::default().fg(theme.key_fg)),
            key_hint(app, Action::OpenExternal, "open"),
        ],
        QueryResult::File { content, .. } => match content {
            FilePreview::Text {
                content,
                truncated,
                total_bytes,
            } => {
                let ext = Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("txt");
                let mut lines = app.highlighter.highlight_code(content, ext);
                if *truncated {
                    lines.push(dim(
                        theme,
                        &format!(
                            "… showing {} of {}",
                            format_bytes(content.len() as u64),
                            format_bytes(*total_bytes)
                        ),
                    ));
                }
                lines
            }
            FilePreview::Image {
                width,
                height,
                format,
                bytes,
            } => vec![
                Line::from(format!("{} image, {}×{}", format, width, height)),
                dim(theme, &format_bytes(*bytes)),
                key_hint(app, Action::OpenExternal, "open in viewer"),
            ],
            FilePreview::Audio { format, bytes } => {
                audio_lines(app, path, format, *bytes)
            }
            FilePreview::Unknown { bytes } => {
                let label = match category {
                    Some(MediaCategory::Video) => "Video file",
                    Some(MediaCategory::Document) => "Document",
                    _ => "Binary file",
                };
                vec![
                    Line::from(format!("{}, {}", label, format_bytes(*bytes))),
                    key_hint(app, Action::OpenExternal, "open"),
                ]
            }
            FilePreview::Error { message } => vec![error(theme, &format!("✗ {}", message))],
        },
    }
}

fn audio_lines(app: &App, path: &str, format: &str, bytes: u64) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let now = Instant::now();
    let playing = app.audio.is_playing(path);
    let position = format_position(app.audio.position(path, now));
    let state = if playing {
        Span::styled(
            format!("▶ {} timer running (no sound output)", position),
            Style::default()
                .fg(theme.boolean_fg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("⏸ {} timer paused", position), Style::default().fg(theme.null_fg))
    };
    vec![
        Line::from(format!("♪ {} audio, {}", format, format_bytes(bytes))),
        Line::from(state),
        key_hint(app, Action::ToggleAudio, "start/stop timer"),
    ]
}

fn key_hint(app: &App, action: Action, label: &str) -> Line<'static> {
    let keys = app.keybindings.keys_for_action(app.keybinding_mode(), action);
    let Some(key) = keys.first() else {
        return Line::from("");
    };
    Line::from(vec![
        Span::styled(key.clone(), Style::default().fg(app.theme.help_key_fg)),
        Span::styled(
            format!(": {}", label),
            Style::default().fg(app.theme.help_desc_fg),
        ),
    ])
}

fn dim(theme: &Theme, text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default()
            .fg(theme.type_label_fg)
            .add_modifier(Modifier::ITALIC),
    )
}

fn error(theme: &Theme, text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(theme.null_fg))
}
