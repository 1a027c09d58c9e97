use crate::keybindings::{KeybindingMode, Keybindings};
use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use strum::IntoEnumIterator;

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpLine {
    Title(&'static str),
    Description(&'static str),
    SectionHeader(String),
    KeyBinding { keys: String, desc: &'static str },
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.modal_title())
                    .add_modifier(Modifier::BOLD),
            )]),
            HelpLine::Description(text) => Line::from(vec![Span::styled(
                text.to_string(),
                Style::default()
                    .fg(theme.help_desc_fg)
                    .add_modifier(Modifier::ITALIC),
            )]),
            HelpLine::SectionHeader(text) => Line::from(vec![Span::styled(
                text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            HelpLine::KeyBinding { keys, desc } => {
                let formatted_keys = format!("  {:<width$}", keys, width = KEY_COLUMN_WIDTH);
                Line::from(vec![
                    Span::styled(formatted_keys, Style::default().fg(theme.help_key_fg)),
                    Span::raw(desc.to_string()),
                ])
            }
            HelpLine::Blank => Line::from(""),
        }
    }
}

/// Help content for every mode, generated from the active bindings so user
/// overrides show up.
pub fn help_lines(keybindings: &Keybindings) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::Title("treenav - Keyboard Shortcuts"),
        HelpLine::Description("Browse JSON and TOML documents as a tree, in columns, or raw"),
        HelpLine::Blank,
    ];

    for mode in KeybindingMode::iter() {
        let entries = keybindings.help_entries(mode);
        if entries.is_empty() {
            continue;
        }
        let mut category = "";
        for (action, keys) in entries {
            if action.category() != category {
                category = action.category();
                lines.push(HelpLine::SectionHeader(format!(
                    "{} · {}",
                    mode.display_name(),
                    category
                )));
            }
            lines.push(HelpLine::KeyBinding {
                keys: keys.join(" "),
                desc: action.description(),
            });
        }
        lines.push(HelpLine::Blank);
    }

    lines.push(HelpLine::Description(
        "Paths look like a.b[0].c; $ is the document root",
    ));
    lines
}

pub fn build_help_text(theme: &Theme, keybindings: &Keybindings) -> Vec<Line<'static>> {
    help_lines(keybindings)
        .iter()
        .map(|line| line.to_line(theme))
        .collect()
}
