//! GameView: paints a running game into a framebuffer.
//!
//! Pure cell-pushing with no terminal I/O, so every layout decision here is
//! unit-testable.

use crate::core::session::GameSession;
use crate::fb::{CellStyle, FrameBuffer};
use crate::theme::{piece_color, Palette};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal dimensions the frame is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Presentation switches, sourced from the settings file.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub show_ghost: bool,
    pub show_next: bool,
    pub show_grid: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_ghost: true,
            show_next: true,
            show_grid: false,
        }
    }
}

/// Width of the info panel to the right of the playfield.
const PANEL_W: u16 = 18;
/// Gap between the playfield frame and the panel.
const PANEL_GAP: u16 = 2;

const CONTROLS: [&str; 6] = [
    "← → Move",
    "↑ Rotate",
    "↓ Soft drop",
    "Space Hard drop",
    "P Pause",
    "ESC Menu",
];

struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    panel_x: u16,
}

/// Renders the playfield, falling piece, ghost and the side panel.
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn render_into(
        &self,
        session: &GameSession,
        palette: &Palette,
        opts: ViewOptions,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(palette.blank());

        let layout = self.layout(viewport);
        if viewport.width < layout.frame_w || viewport.height < layout.frame_h {
            fb.put_str_centered(
                viewport.height / 2,
                "Terminal too small",
                palette.text_style(),
            );
            return;
        }

        fb.draw_box(
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            palette.border_style(),
        );

        self.draw_grid(session, palette, opts, &layout, fb);
        if opts.show_ghost {
            self.draw_ghost(session, palette, &layout, fb);
        }
        self.draw_active_piece(session, palette, &layout, fb);
        self.draw_panel(session, palette, opts, &layout, fb);
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = u16::from(BOARD_WIDTH) * self.cell_w + 2;
        let frame_h = u16::from(BOARD_HEIGHT) * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
            panel_x: start_x + frame_w + PANEL_GAP,
        }
    }

    /// Fill one board cell. Cells above the top edge stay off screen.
    fn fill_cell(
        &self,
        layout: &Layout,
        cell_x: i8,
        cell_y: i8,
        ch: char,
        style: CellStyle,
        fb: &mut FrameBuffer,
    ) {
        if cell_x < 0 || cell_y < 0 {
            return;
        }
        let px = layout.start_x + 1 + (cell_x as u16) * self.cell_w;
        let py = layout.start_y + 1 + (cell_y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_grid(
        &self,
        session: &GameSession,
        palette: &Palette,
        opts: ViewOptions,
        layout: &Layout,
        fb: &mut FrameBuffer,
    ) {
        let board = session.board();
        let mut dot_style = palette.muted_style();
        dot_style.dim = true;

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match board.cell(x, y) {
                    Some(v) if v > 0 => {
                        if let Some(kind) = PieceKind::from_index(v as usize - 1) {
                            let style = CellStyle::new(piece_color(kind), palette.background);
                            self.fill_cell(layout, x, y, '█', style, fb);
                        }
                    }
                    _ => {
                        if opts.show_grid {
                            let px = layout.start_x + 1 + (x as u16) * self.cell_w;
                            let py = layout.start_y + 1 + (y as u16) * self.cell_h;
                            fb.put_char(px, py, '·', dot_style);
                        }
                    }
                }
            }
        }
    }

    fn draw_ghost(
        &self,
        session: &GameSession,
        palette: &Palette,
        layout: &Layout,
        fb: &mut FrameBuffer,
    ) {
        let Some(ghost) = session.board().ghost() else {
            return;
        };
        for (x, y) in ghost.occupied_cells() {
            self.fill_cell(layout, x, y, '░', palette.ghost_style(), fb);
        }
    }

    fn draw_active_piece(
        &self,
        session: &GameSession,
        palette: &Palette,
        layout: &Layout,
        fb: &mut FrameBuffer,
    ) {
        let Some(piece) = session.board().current() else {
            return;
        };
        let mut style = CellStyle::new(piece_color(piece.kind), palette.background);
        style.bold = true;
        for (x, y) in piece.occupied_cells() {
            self.fill_cell(layout, x, y, '█', style, fb);
        }
    }

    fn draw_panel(
        &self,
        session: &GameSession,
        palette: &Palette,
        opts: ViewOptions,
        layout: &Layout,
        fb: &mut FrameBuffer,
    ) {
        let x = layout.panel_x;
        if fb.width().saturating_sub(x) < PANEL_W {
            return;
        }

        let text = palette.text_style();
        let mut value = text;
        value.bold = true;
        let muted = palette.muted_style();
        let mut y = layout.start_y;

        if opts.show_next {
            fb.put_str(x, y, "Next:", text);
            if let Some(next) = session.board().next() {
                let style = CellStyle::new(piece_color(next.kind), palette.background);
                let shape = next.shape();
                for row in 0..shape.rows() {
                    for col in 0..shape.cols() {
                        if shape.filled(row, col) {
                            let px = x + 2 + (col as u16) * self.cell_w;
                            let py = y + 1 + row as u16;
                            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
                        }
                    }
                }
            }
        }
        y += 4;

        fb.put_str(x, y, "Score: ", text);
        fb.put_u32(x + 7, y, session.score(), value);
        y += 1;
        fb.put_str(x, y, "Level: ", text);
        fb.put_u32(x + 7, y, session.level(), value);
        y += 1;
        fb.put_str(x, y, "Lines: ", text);
        fb.put_u32(x + 7, y, session.lines_cleared(), value);
        y += 1;
        fb.put_str(x, y, "Difficulty: ", text);
        fb.put_str(x + 12, y, session.difficulty().label(), value);
        y += 2;

        fb.put_str(x, y, "Controls:", text);
        for (i, line) in CONTROLS.iter().enumerate() {
            fb.put_str(x, y + 1 + i as u16, line, muted);
        }
    }
}
