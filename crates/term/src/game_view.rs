//! GameView: paints a [`GameSnapshot`] into a framebuffer.
//!
//! Pure: no I/O, so layouts are unit-tested directly.

use crate::core::{GameSnapshot, Mask, Piece};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Side length, in board cells, of the next-piece preview grid.
pub const PREVIEW_CELLS: u16 = 5;

/// Where the preview mask's top-left lands inside the preview grid.
const PREVIEW_ORIGIN: (u16, u16) = (1, 1);

/// Columns reserved left of the board for `--debug` row indices.
const DEBUG_GUTTER: u16 = 4;

const PLAYFIELD_BG: Rgb = Rgb::new(25, 25, 35);
const GRID: Rgb = Rgb::new(70, 70, 80);
const WALL: Rgb = Rgb::new(161, 161, 161);
const GHOST: Rgb = Rgb::new(255, 132, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal layout for one blockfall session.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    debug: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            debug: false,
        }
    }
}

/// Board-relative placement computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    /// Top-left of the board frame (border included).
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Print each row's starting board index beside the playfield.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let layout = self.layout(viewport);
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.draw_box(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                self.draw_cell(fb, layout, col as i16, row as i16, snap.cell(col, row));
            }
        }

        if self.debug {
            self.draw_row_indices(fb, layout);
        }

        if snap.shows_active_piece() {
            self.draw_ghost(fb, layout, &snap.drop_preview);
            self.draw_piece(fb, layout, &snap.current);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.mode {
            GameMode::Menu => {
                self.draw_overlay(fb, layout, &["BLOCKFALL", "ENTER to start"]);
            }
            GameMode::GameOver => {
                self.draw_overlay(fb, layout, &["GAME OVER", "ENTER to restart"]);
            }
            GameMode::Playing | GameMode::AnimatingGameOver => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let gutter = if self.debug { DEBUG_GUTTER } else { 0 };

        let frame_x = gutter + viewport.width.saturating_sub(frame_w + gutter) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of board cell `(col, row)`, if it is on the board.
    fn cell_origin(&self, layout: Layout, col: i16, row: i16) -> Option<(u16, u16)> {
        if !(0..BOARD_WIDTH as i16).contains(&col) || !(0..BOARD_HEIGHT as i16).contains(&row) {
            return None;
        }
        Some((
            layout.frame_x + 1 + col as u16 * self.cell_w,
            layout.frame_y + 1 + row as u16 * self.cell_h,
        ))
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, layout: Layout, col: i16, row: i16, cell: Cell) {
        let Some((x, y)) = self.cell_origin(layout, col, row) else {
            return;
        };
        let (ch, style) = match cell {
            Cell::Empty => ('·', Style::new(GRID, PLAYFIELD_BG).dim()),
            Cell::Blocked => ('▓', Style::new(WALL, PLAYFIELD_BG)),
            Cell::Piece(kind) => ('█', Style::new(piece_color(kind), PLAYFIELD_BG).bold()),
        };
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, layout: Layout, piece: &Piece) {
        for (col, row) in piece_cells(piece.col as i16, piece.row as i16, &piece.tiles) {
            self.draw_cell(fb, layout, col, row, Cell::Piece(piece.kind));
        }
    }

    /// Outline-only copy of the active piece at its landing row.
    fn draw_ghost(&self, fb: &mut FrameBuffer, layout: Layout, ghost: &Piece) {
        let style = Style::new(GHOST, PLAYFIELD_BG);
        for (col, row) in piece_cells(ghost.col as i16, ghost.row as i16, &ghost.tiles) {
            let Some((x, y)) = self.cell_origin(layout, col, row) else {
                continue;
            };
            if self.cell_w >= 2 {
                fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
                for dy in 0..self.cell_h {
                    fb.put_char(x, y + dy, '[', style);
                    fb.put_char(x + self.cell_w - 1, y + dy, ']', style);
                }
            } else {
                fb.fill_rect(x, y, self.cell_w, self.cell_h, '░', style);
            }
        }
    }

    fn draw_row_indices(&self, fb: &mut FrameBuffer, layout: Layout) {
        let style = Style::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        let Some(right_x) = layout.frame_x.checked_sub(2) else {
            return;
        };
        for row in 0..BOARD_HEIGHT as u16 {
            let y = layout.frame_y + 1 + row * self.cell_h;
            fb.put_u32_right(right_x, y, (row as usize * BOARD_WIDTH) as u32, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.frame_x + layout.frame_w + 2;
        let preview_w = PREVIEW_CELLS * self.cell_w + 2;
        if panel_x.saturating_add(preview_w) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        self.draw_preview(fb, panel_x, y, &snap.next);
        y += PREVIEW_CELLS * self.cell_h + 3;

        for (name, amount) in [
            ("SCORE", snap.score),
            ("LINES", snap.cleared_lines),
            ("HIGH SCORE", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, amount, value);
            y += 3;
        }

        // Speed is shown to two decimals.
        fb.put_str(panel_x, y, "SPEED", label);
        let hundredths = (snap.speed * 100.0).round().max(0.0) as u32;
        fb.put_u32(panel_x, y + 1, hundredths / 100, value);
        let frac_x = panel_x + digit_count(hundredths / 100);
        fb.put_char(frac_x, y + 1, '.', value);
        fb.put_u32(frac_x + 1, y + 1, hundredths % 100 / 10, value);
        fb.put_u32(frac_x + 2, y + 1, hundredths % 10, value);
    }

    /// Next piece drawn at a fixed origin inside its own box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, next: &Piece) {
        let box_w = PREVIEW_CELLS * self.cell_w + 2;
        let box_h = PREVIEW_CELLS * self.cell_h + 2;
        fb.draw_box(x, y, box_w, box_h, Style::default().dim());
        fb.fill_rect(
            x + 1,
            y + 1,
            box_w - 2,
            box_h - 2,
            ' ',
            Style::new(GRID, PLAYFIELD_BG),
        );

        let style = Style::new(piece_color(next.kind), PLAYFIELD_BG).bold();
        let (ox, oy) = PREVIEW_ORIGIN;
        for (col, row) in piece_cells(ox as i16, oy as i16, &next.tiles) {
            let (col, row) = (col as u16, row as u16);
            if col >= PREVIEW_CELLS || row >= PREVIEW_CELLS {
                continue;
            }
            fb.fill_rect(
                x + 1 + col * self.cell_w,
                y + 1 + row * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: Layout, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = layout.frame_y + layout.frame_h / 2;
        let top = mid_y.saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = layout.frame_x + layout.frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

/// Board-space positions of a mask placed at `(col, row)`.
fn piece_cells(col: i16, row: i16, mask: &Mask) -> impl Iterator<Item = (i16, i16)> + '_ {
    mask.occupied()
        .map(move |(mc, mr)| (col + mc as i16, row + mr as i16))
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::L => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(13, 255, 0),
        PieceKind::I => Rgb::new(9, 5, 247),
        PieceKind::Square => Rgb::new(255, 255, 0),
        PieceKind::Z => Rgb::new(255, 132, 0),
        PieceKind::S => Rgb::new(157, 0, 255),
        PieceKind::Triangle => Rgb::new(0, 200, 200),
    }
}

fn digit_count(mut value: u32) -> u16 {
    let mut n = 1;
    while value >= 10 {
        value /= 10;
        n += 1;
    }
    n
}
