use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

/// RGB color. Construct with `Color::new(r, g, b)` or use named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DARK_GRAY: Color = Color::new(88, 88, 88);
    pub const CHARCOAL: Color = Color::new(48, 48, 48);

    // Garden accents
    pub const TEAL: Color = Color::new(95, 255, 215);
    pub const BRIGHT_TEAL: Color = Color::new(0, 255, 255);
    pub const PINK: Color = Color::new(255, 135, 215);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const MUTE_COLOR: Color = Color::new(255, 100, 100);

    // UI colors
    pub const SELECTION_BG: Color = Color::new(48, 48, 48);
    pub const HINT: Color = Color::new(98, 98, 98);
}

/// Star palette, dimmest first. The render picks an index from the
/// beat flash countdown, the last two entries are the flash peaks.
pub const STAR_PALETTE: [Color; 10] = [
    Color::new(88, 88, 88),
    Color::new(128, 128, 128),
    Color::new(188, 188, 188),
    Color::new(228, 228, 228),
    Color::new(255, 255, 215),
    Color::new(255, 255, 0),
    Color::new(255, 215, 135),
    Color::new(95, 255, 215),
    Color::new(255, 135, 215),
    Color::new(255, 255, 255),
];

/// Create style with conditional selection background.
pub fn selected_style_bold(is_selected: bool, fg: Color) -> Style {
    if is_selected {
        Style::new().fg(fg).bg(Color::SELECTION_BG).bold()
    } else {
        Style::new().fg(fg)
    }
}

/// Text style with foreground, background, and attributes.
///
/// Builder methods (all const, chainable):
/// - `fg(Color)`: set foreground color
/// - `bg(Color)`: set background color
/// - `bold()`: enable bold
/// - `italic()`: enable italic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            italic: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

// --- Conversions to ratatui types ---

impl From<Color> for RatatuiColor {
    fn from(c: Color) -> Self {
        RatatuiColor::Rgb(c.r, c.g, c.b)
    }
}

impl From<Style> for RatatuiStyle {
    fn from(s: Style) -> Self {
        let mut rs = RatatuiStyle::default();
        if let Some(fg) = s.fg {
            rs = rs.fg(RatatuiColor::from(fg));
        }
        if let Some(bg) = s.bg {
            rs = rs.bg(RatatuiColor::from(bg));
        }
        if s.bold {
            rs = rs.add_modifier(Modifier::BOLD);
        }
        if s.italic {
            rs = rs.add_modifier(Modifier::ITALIC);
        }
        rs
    }
}
