use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board frame color
    pub border: Color,
    /// Tile fill color
    pub tile_bg: Color,
    /// Tile number color
    pub tile_face: Color,
    /// Selected tile background
    pub selected_bg: Color,
    /// Marker for the empty cell under the cursor
    pub empty: Color,
    /// Solved/success color
    pub success: Color,
    /// Header and status text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            tile_bg: Color::Rgb { r: 50, g: 60, b: 90 },
            tile_face: Color::Rgb { r: 255, g: 225, b: 120 },
            selected_bg: Color::Rgb { r: 90, g: 115, b: 170 },
            empty: Color::Rgb { r: 60, g: 65, b: 80 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 60, g: 60, b: 80 },
            tile_bg: Color::Rgb { r: 205, g: 215, b: 240 },
            tile_face: Color::Rgb { r: 20, g: 60, b: 140 },
            selected_bg: Color::Rgb { r: 150, g: 180, b: 245 },
            empty: Color::Rgb { r: 225, g: 225, b: 235 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            tile_bg: Color::DarkBlue,
            tile_face: Color::Yellow,
            selected_bg: Color::Blue,
            empty: Color::DarkGrey,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }
}
