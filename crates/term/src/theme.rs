//! Color themes.
//!
//! A [`Palette`] collects the handful of colors a theme controls. Piece
//! colors are fixed across themes so shapes stay recognizable.

use crate::fb::{Cell, CellStyle, Rgb};
use crate::types::{PieceKind, Theme};

/// Accent color for titles and the selected menu item.
pub const HIGHLIGHT: Rgb = Rgb::new(255, 255, 0);

/// Accent color for the game over banner.
pub const ALERT: Rgb = Rgb::new(255, 0, 0);

/// Colors a theme assigns to the chrome around the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub ghost: Rgb,
}

impl Palette {
    pub fn text_style(&self) -> CellStyle {
        CellStyle::new(self.text, self.background)
    }

    pub fn muted_style(&self) -> CellStyle {
        CellStyle::new(self.muted, self.background)
    }

    pub fn border_style(&self) -> CellStyle {
        CellStyle::new(self.border, self.background)
    }

    pub fn ghost_style(&self) -> CellStyle {
        let mut style = CellStyle::new(self.ghost, self.background);
        style.dim = true;
        style
    }

    pub fn highlight_style(&self) -> CellStyle {
        let mut style = CellStyle::new(HIGHLIGHT, self.background);
        style.bold = true;
        style
    }

    pub fn alert_style(&self) -> CellStyle {
        let mut style = CellStyle::new(ALERT, self.background);
        style.bold = true;
        style
    }

    /// Cell used to wipe the frame before drawing.
    pub fn blank(&self) -> Cell {
        Cell::new(' ', CellStyle::new(self.text, self.background))
    }
}

/// Palette for a theme.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Classic => Palette {
            background: Rgb::new(0, 0, 0),
            border: Rgb::new(128, 128, 128),
            text: Rgb::new(255, 255, 255),
            muted: Rgb::new(192, 192, 192),
            ghost: Rgb::new(64, 64, 64),
        },
        Theme::Neon => Palette {
            background: Rgb::new(8, 10, 28),
            border: Rgb::new(0, 255, 204),
            text: Rgb::new(220, 255, 255),
            muted: Rgb::new(120, 200, 200),
            ghost: Rgb::new(0, 150, 140),
        },
        Theme::Pastel => Palette {
            background: Rgb::new(20, 20, 24),
            border: Rgb::new(200, 180, 220),
            text: Rgb::new(250, 240, 255),
            muted: Rgb::new(180, 170, 200),
            ghost: Rgb::new(120, 120, 140),
        },
    }
}

/// Fill color for a locked or falling piece.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(255, 0, 255),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
