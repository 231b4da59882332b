//! Glyph cells and the color palette

/// Palette color, stored as the video mode's RGB332 pixel value
///
/// Any byte is a valid color; SGR 38;5/48;5 write raw indices straight
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0x00);
    pub const DARKBLUE: Color = Color(0x02);
    pub const SEMIBLUE: Color = Color(0x01);
    pub const BLUE: Color = Color(0x03);
    pub const DARKGREEN: Color = Color(0x10);
    pub const GREEN: Color = Color(0x1C);
    pub const DARKCYAN: Color = Color(0x12);
    pub const CYAN: Color = Color(0x1F);
    pub const DARKRED: Color = Color(0x80);
    pub const RED: Color = Color(0xE0);
    pub const DARKMAGENTA: Color = Color(0x82);
    pub const MAGENTA: Color = Color(0xE3);
    pub const BROWN: Color = Color(0x88);
    pub const YELLOW: Color = Color(0xFC);
    pub const ORANGE: Color = Color(0xF0);
    pub const PINK: Color = Color(0xF2);
    pub const LIGHTBLUE: Color = Color(0x5B);
    pub const LIGHTGREEN: Color = Color(0x7D);
    pub const LIGHTRED: Color = Color(0xED);
    pub const PURPLE: Color = Color(0x62);
    pub const DARKGRAY: Color = Color(0x49);
    pub const GRAY: Color = Color(0x92);
    pub const LIGHTGRAY: Color = Color(0xB6);
    pub const WHITE: Color = Color(0xFF);

    /// Colors offered by the configuration surface
    pub const PALETTE: [Color; 24] = [
        Color::BLACK,
        Color::DARKBLUE,
        Color::SEMIBLUE,
        Color::BLUE,
        Color::DARKGREEN,
        Color::GREEN,
        Color::DARKCYAN,
        Color::CYAN,
        Color::DARKRED,
        Color::RED,
        Color::DARKMAGENTA,
        Color::MAGENTA,
        Color::BROWN,
        Color::YELLOW,
        Color::ORANGE,
        Color::PINK,
        Color::LIGHTBLUE,
        Color::LIGHTGREEN,
        Color::LIGHTRED,
        Color::PURPLE,
        Color::DARKGRAY,
        Color::GRAY,
        Color::LIGHTGRAY,
        Color::WHITE,
    ];

    /// SGR 30-37 / 40-47 colors
    pub const ANSI: [Color; 8] = [
        Color::BLACK,
        Color::RED,
        Color::GREEN,
        Color::YELLOW,
        Color::BLUE,
        Color::MAGENTA,
        Color::CYAN,
        Color::WHITE,
    ];

    /// ANSI color by index (0-7)
    pub fn ansi(index: usize) -> Option<Color> {
        Self::ANSI.get(index).copied()
    }

    /// Next palette entry, wrapping around
    ///
    /// A raw color outside the palette steps to the first entry.
    pub fn next(self) -> Color {
        match Self::PALETTE.iter().position(|&c| c == self) {
            Some(i) => Self::PALETTE[(i + 1) % Self::PALETTE.len()],
            None => Self::PALETTE[0],
        }
    }
}

/// Foreground/background pair applied to written glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attrs {
    pub fg: Color,
    pub bg: Color,
}

impl Attrs {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Reverse video
    pub const fn swapped(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
        }
    }
}

/// One screen cell, laid out as the scan-out expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct Glyph {
    /// Font code point
    pub code: u8,
    /// Background color
    pub bg: Color,
    /// Foreground color
    pub fg: Color,
}

impl Glyph {
    pub const fn new(code: u8, attrs: Attrs) -> Self {
        Self {
            code,
            bg: attrs.bg,
            fg: attrs.fg,
        }
    }

    /// Space in the given colors
    pub const fn blank(attrs: Attrs) -> Self {
        Self::new(b' ', attrs)
    }

    pub const fn attrs(&self) -> Attrs {
        Attrs::new(self.fg, self.bg)
    }

    /// Backing-store bytes: code, background, foreground
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.code, self.bg.0, self.fg.0]
    }
}
