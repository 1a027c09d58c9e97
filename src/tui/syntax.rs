//! syntect highlighting for the raw view and text previews.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme as SyntectTheme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Beyond this line the raw view is shown plain (syntect must walk from line 0).
const MAX_HIGHLIGHT_START_LINE: usize = 5000;

const THEME_NAME: &str = "base16-eighties.dark";

pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn theme(&self) -> Option<&SyntectTheme> {
        self.theme_set
            .themes
            .get(THEME_NAME)
            .or_else(|| self.theme_set.themes.values().next())
    }

    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlight a whole snippet. `language` is a name or extension (`json`, `md`, `toml`).
    pub fn highlight_code(&self, content: &str, language: &str) -> Vec<Line<'static>> {
        self.highlight_window(content, language, 0, usize::MAX)
    }

    /// Highlight `height` lines starting at `start`, for scrolled views.
    pub fn highlight_window(
        &self,
        content: &str,
        language: &str,
        start: usize,
        height: usize,
    ) -> Vec<Line<'static>> {
        let end = start.saturating_add(height);
        let plain = || {
            content
                .lines()
                .skip(start)
                .take(height)
                .map(|l| Line::from(l.to_string()))
                .collect()
        };

        let Some(theme) = self.theme() else {
            return plain();
        };
        if start > MAX_HIGHLIGHT_START_LINE {
            return plain();
        }

        let mut highlighter = HighlightLines::new(self.syntax_for(language), theme);
        let mut lines = Vec::new();
        for (idx, line) in LinesWithEndings::from(content).enumerate() {
            if idx >= end {
                break;
            }
            let ranges = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges,
                Err(e) => {
                    tracing::debug!(error = %e, "highlighting failed, showing plain text");
                    return plain();
                }
            };
            if idx < start {
                continue;
            }
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| {
                    let mut span_style = Style::default().fg(to_color(style.foreground));
                    if style.font_style.contains(FontStyle::BOLD) {
                        span_style = span_style.add_modifier(Modifier::BOLD);
                    }
                    if style.font_style.contains(FontStyle::ITALIC) {
                        span_style = span_style.add_modifier(Modifier::ITALIC);
                    }
                    if style.font_style.contains(FontStyle::UNDERLINE) {
                        span_style = span_style.add_modifier(Modifier::UNDERLINED);
                    }
                    let text = text.trim_end_matches(['\n', '\r']);
                    Span::styled(text.to_string(), span_style)
                })
                .collect();
            lines.push(Line::from(spans));
        }
        lines
    }
}

fn to_color(color: syntect::highlighting::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}
