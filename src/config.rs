use crate::host::ReadLimits;
use crate::keybindings::{Keybindings, KeybindingsConfig};
use crate::nav::ViewMode;
use crate::preview::PreviewOptions;
use crate::tui::theme::ThemeName;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub theme: CustomThemeConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// View shown at startup
    #[serde(default)]
    pub default_view: ViewMode,

    /// Navigation pane width, as a percentage of the terminal
    #[serde(default = "default_tree_width")]
    pub tree_width: u16,

    #[serde(default = "default_show_preview")]
    pub show_preview: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_view: ViewMode::default(),
            tree_width: default_tree_width(),
            show_preview: default_show_preview(),
        }
    }
}

fn default_theme() -> String {
    "OceanDark".to_string()
}

fn default_tree_width() -> u16 {
    45
}

fn default_show_preview() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_results: default_max_results(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    150
}

fn default_max_results() -> usize {
    crate::search::MAX_RESULTS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Text file previews are cut off past this many bytes
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: u64,

    /// Media files larger than this are not decoded
    #[serde(default = "default_max_media_bytes")]
    pub max_media_bytes: u64,

    /// Lines of serialized JSON shown for a selected container
    #[serde(default = "default_json_line_cap")]
    pub json_line_cap: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: default_max_text_bytes(),
            max_media_bytes: default_max_media_bytes(),
            json_line_cap: default_json_line_cap(),
        }
    }
}

fn default_max_text_bytes() -> u64 {
    ReadLimits::default().max_text_bytes
}

fn default_max_media_bytes() -> u64 {
    ReadLimits::default().max_media_bytes
}

fn default_json_line_cap() -> usize {
    PreviewOptions::default().json_line_cap
}

/// Custom theme color overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_focused: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_unfocused: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_bar_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_bar_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_label_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_fg: Option<ColorValue>,
    // Search highlighting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_match_bg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_match_fg: Option<ColorValue>,
    // Footer keybinding hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_key_fg: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_desc_fg: Option<ColorValue>,
    /// Replaces the tree depth palette (cycled by depth)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_palette: Option<Vec<ColorValue>>,
}

/// Color value that can be specified in multiple formats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Named color (e.g., "Red", "Cyan", "White")
    Named(String),
    /// RGB color { rgb = [r, g, b] }
    Rgb { rgb: [u8; 3] },
    /// Indexed color { indexed = 235 }
    Indexed { indexed: u8 },
}

impl ColorValue {
    /// Convert to ratatui Color
    pub fn to_color(&self) -> Option<Color> {
        match self {
            ColorValue::Named(name) => match name.to_lowercase().as_str() {
                "black" => Some(Color::Black),
                "red" => Some(Color::Red),
                "green" => Some(Color::Green),
                "yellow" => Some(Color::Yellow),
                "blue" => Some(Color::Blue),
                "magenta" => Some(Color::Magenta),
                "cyan" => Some(Color::Cyan),
                "gray" | "grey" => Some(Color::Gray),
                "darkgray" | "darkgrey" => Some(Color::DarkGray),
                "lightred" => Some(Color::LightRed),
                "lightgreen" => Some(Color::LightGreen),
                "lightyellow" => Some(Color::LightYellow),
                "lightblue" => Some(Color::LightBlue),
                "lightmagenta" => Some(Color::LightMagenta),
                "lightcyan" => Some(Color::LightCyan),
                "white" => Some(Color::White),
                // CSS-style hex and names, shared with the color preview
                other => crate::document::color::parse(other).map(|c| Color::Rgb(c.r, c.g, c.b)),
            },
            ColorValue::Rgb { rgb } => Some(Color::Rgb(rgb[0], rgb[1], rgb[2])),
            ColorValue::Indexed { indexed } => Some(Color::Indexed(*indexed)),
        }
    }
}

impl Config {
    /// Platform config file path
    /// - macOS: ~/Library/Application Support/treenav/config.toml
    /// - Linux: ~/.config/treenav/config.toml
    /// - Windows: %APPDATA%/treenav/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("treenav").join("config.toml"))
    }

    /// Load config from file, or return default if it is missing or malformed
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    pub fn theme_name(&self) -> ThemeName {
        self.ui.theme.parse().unwrap_or_default()
    }

    /// Update navigation pane width and save config
    pub fn set_tree_width(&mut self, width: u16) -> Result<(), Box<dyn std::error::Error>> {
        self.ui.tree_width = width;
        self.save()
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }

    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits {
            max_text_bytes: self.preview.max_text_bytes,
            max_media_bytes: self.preview.max_media_bytes,
        }
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            json_line_cap: self.preview.json_line_cap,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
