use ratatui::style::Color;

/// Colors used by the carousel and status bar
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey2: Color,

    /// Border and title of the current slide
    pub current: Color,
    /// Border of every other slide
    pub border: Color,
    pub accent: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            current: Color::Rgb(0xd8, 0xa6, 0x57),
            border: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}
