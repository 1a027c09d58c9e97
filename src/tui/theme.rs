use crate::config::CustomThemeConfig;
use crate::document::NodeKind;
use crate::render::tree::DEPTH_PALETTE_SIZE;
use ratatui::style::{Color, Modifier, Style};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ThemeName {
    #[default]
    OceanDark,
    Nord,
    Gruvbox,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub title_bar_fg: Color,
    pub key_fg: Color,
    pub string_fg: Color,
    pub number_fg: Color,
    pub boolean_fg: Color,
    pub null_fg: Color,
    pub type_label_fg: Color,
    pub link_fg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub help_key_fg: Color,
    pub help_desc_fg: Color,
    pub depth_palette: [Color; DEPTH_PALETTE_SIZE],
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::OceanDark => Self::ocean_dark(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Gruvbox => Self::gruvbox(),
        }
    }

    fn ocean_dark() -> Self {
        Self {
            name: ThemeName::OceanDark.to_string(),
            background: Color::Rgb(22, 27, 34),
            foreground: Color::Rgb(201, 209, 217),
            border_focused: Color::Rgb(88, 166, 255),
            border_unfocused: Color::Rgb(48, 54, 61),
            selection_bg: Color::Rgb(31, 58, 95),
            selection_fg: Color::Rgb(230, 237, 243),
            status_bar_bg: Color::Rgb(33, 38, 45),
            status_bar_fg: Color::Rgb(139, 148, 158),
            title_bar_fg: Color::Rgb(88, 166, 255),
            key_fg: Color::Rgb(121, 192, 255),
            string_fg: Color::Rgb(165, 214, 255),
            number_fg: Color::Rgb(255, 166, 87),
            boolean_fg: Color::Rgb(210, 168, 255),
            null_fg: Color::Rgb(110, 118, 129),
            type_label_fg: Color::Rgb(110, 118, 129),
            link_fg: Color::Rgb(86, 211, 100),
            search_match_bg: Color::Rgb(187, 128, 9),
            search_match_fg: Color::Black,
            help_key_fg: Color::Rgb(255, 166, 87),
            help_desc_fg: Color::Rgb(139, 148, 158),
            depth_palette: [
                Color::Rgb(88, 166, 255),
                Color::Rgb(86, 211, 100),
                Color::Rgb(255, 166, 87),
                Color::Rgb(210, 168, 255),
                Color::Rgb(255, 123, 114),
                Color::Rgb(57, 197, 207),
                Color::Rgb(227, 179, 65),
                Color::Rgb(247, 120, 186),
            ],
        }
    }

    fn nord() -> Self {
        Self {
            name: ThemeName::Nord.to_string(),
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(216, 222, 233),
            border_focused: Color::Rgb(136, 192, 208),
            border_unfocused: Color::Rgb(76, 86, 106),
            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(236, 239, 244),
            status_bar_bg: Color::Rgb(59, 66, 82),
            status_bar_fg: Color::Rgb(216, 222, 233),
            title_bar_fg: Color::Rgb(136, 192, 208),
            key_fg: Color::Rgb(129, 161, 193),
            string_fg: Color::Rgb(163, 190, 140),
            number_fg: Color::Rgb(180, 142, 173),
            boolean_fg: Color::Rgb(208, 135, 112),
            null_fg: Color::Rgb(97, 110, 136),
            type_label_fg: Color::Rgb(97, 110, 136),
            link_fg: Color::Rgb(143, 188, 187),
            search_match_bg: Color::Rgb(235, 203, 139),
            search_match_fg: Color::Rgb(46, 52, 64),
            help_key_fg: Color::Rgb(235, 203, 139),
            help_desc_fg: Color::Rgb(216, 222, 233),
            depth_palette: [
                Color::Rgb(136, 192, 208),
                Color::Rgb(163, 190, 140),
                Color::Rgb(235, 203, 139),
                Color::Rgb(180, 142, 173),
                Color::Rgb(191, 97, 106),
                Color::Rgb(143, 188, 187),
                Color::Rgb(208, 135, 112),
                Color::Rgb(129, 161, 193),
            ],
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: ThemeName::Gruvbox.to_string(),
            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            border_focused: Color::Rgb(250, 189, 47),
            border_unfocused: Color::Rgb(80, 73, 69),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(251, 241, 199),
            status_bar_bg: Color::Rgb(60, 56, 54),
            status_bar_fg: Color::Rgb(213, 196, 161),
            title_bar_fg: Color::Rgb(250, 189, 47),
            key_fg: Color::Rgb(131, 165, 152),
            string_fg: Color::Rgb(184, 187, 38),
            number_fg: Color::Rgb(211, 134, 155),
            boolean_fg: Color::Rgb(254, 128, 25),
            null_fg: Color::Rgb(146, 131, 116),
            type_label_fg: Color::Rgb(146, 131, 116),
            link_fg: Color::Rgb(142, 192, 124),
            search_match_bg: Color::Rgb(250, 189, 47),
            search_match_fg: Color::Rgb(40, 40, 40),
            help_key_fg: Color::Rgb(254, 128, 25),
            help_desc_fg: Color::Rgb(213, 196, 161),
            depth_palette: [
                Color::Rgb(131, 165, 152),
                Color::Rgb(184, 187, 38),
                Color::Rgb(250, 189, 47),
                Color::Rgb(211, 134, 155),
                Color::Rgb(251, 73, 52),
                Color::Rgb(142, 192, 124),
                Color::Rgb(254, 128, 25),
                Color::Rgb(213, 196, 161),
            ],
        }
    }

    /// Apply `[theme]` overrides from the config file
    pub fn with_custom_colors(mut self, custom: &CustomThemeConfig) -> Self {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(color) = custom.$field.as_ref().and_then(|c| c.to_color()) {
                        self.$field = color;
                    }
                )*
            };
        }

        apply!(
            background,
            foreground,
            border_focused,
            border_unfocused,
            selection_bg,
            selection_fg,
            status_bar_bg,
            status_bar_fg,
            title_bar_fg,
            key_fg,
            string_fg,
            number_fg,
            boolean_fg,
            null_fg,
            type_label_fg,
            link_fg,
            search_match_bg,
            search_match_fg,
            help_key_fg,
            help_desc_fg,
        );

        if let Some(palette) = &custom.depth_palette {
            let colors: Vec<Color> = palette.iter().filter_map(|c| c.to_color()).collect();
            if !colors.is_empty() {
                for (i, slot) in self.depth_palette.iter_mut().enumerate() {
                    *slot = colors[i % colors.len()];
                }
            }
        }

        self
    }

    pub fn depth_color(&self, index: usize) -> Color {
        self.depth_palette[index % DEPTH_PALETTE_SIZE]
    }

    pub fn kind_color(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Object | NodeKind::Array => self.type_label_fg,
            NodeKind::String => self.string_fg,
            NodeKind::Number => self.number_fg,
            NodeKind::Boolean => self.boolean_fg,
            NodeKind::Null => self.null_fg,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_unfocused)
        }
    }

    pub fn content_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().bg(self.status_bar_bg).fg(self.status_bar_fg)
    }

    pub fn search_match_style(&self) -> Style {
        Style::default()
            .bg(self.search_match_bg)
            .fg(self.search_match_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal_bg(&self) -> Color {
        self.status_bar_bg
    }

    pub fn modal_border(&self) -> Color {
        self.border_focused
    }

    pub fn modal_title(&self) -> Color {
        self.title_bar_fg
    }
}
