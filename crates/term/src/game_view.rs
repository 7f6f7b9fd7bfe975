//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const PREVIEW_SIZE: u16 = 4;

/// Terminal viewport dimensions.
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

/// Text drawn over the middle of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Seconds left before play begins.
    Countdown(u32),
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Lays out the playfield and the side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_px_w = u16::from(BOARD_WIDTH) * self.cell_w;
        let board_px_h = u16::from(BOARD_HEIGHT) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let inner_x = origin_x + 1;
        let inner_y = origin_y + 1;

        fb.fill_rect(
            inner_x,
            inner_y,
            board_px_w,
            board_px_h,
            ' ',
            Style::new(PLAY_BG, PLAY_BG),
        );
        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                let (cx, cy) = (x as u16, y as u16);
                match PieceKind::from_tag(tag) {
                    Some(kind) => self.draw_block(fb, inner_x, inner_y, cx, cy, kind),
                    None => self.fill_cell(
                        fb,
                        inner_x,
                        inner_y,
                        cx,
                        cy,
                        '·',
                        Style::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            for (dx, dy) in active.shape.minos() {
                let x = active.x + dx;
                let y = active.y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, inner_x, inner_y, x as u16, y as u16, active.shape.kind());
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin_x + frame_w + 2, origin_y);

        let mid_y = origin_y.saturating_add(frame_h / 2);
        match overlay {
            Overlay::None => {}
            Overlay::Countdown(secs) => {
                let digit = char::from_digit(secs.min(9), 10).unwrap_or('0');
                let mut buf = [0u8; 4];
                draw_centered(fb, origin_x, mid_y, frame_w, digit.encode_utf8(&mut buf));
            }
            Overlay::Paused => draw_centered(fb, origin_x, mid_y, frame_w, "PAUSED"),
            Overlay::GameOver => {
                draw_centered(fb, origin_x, mid_y, frame_w, "GAME OVER");
                draw_centered(fb, origin_x, mid_y.saturating_add(2), frame_w, "r:restart q:quit");
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        inner_x: u16,
        inner_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = Style::new(piece_color(kind), PLAY_BG).bold();
        self.fill_cell(fb, inner_x, inner_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        inner_x: u16,
        inner_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: Style,
    ) {
        let px = inner_x + x * self.cell_w;
        let py = inner_y + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        top: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = top;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y.saturating_add(1), snap.next.as_ref(), false);
        y = y.saturating_add(PREVIEW_SIZE + 2);

        fb.put_str(panel_x, y, "HOLD", label);
        self.draw_preview(fb, panel_x, y.saturating_add(1), snap.hold.as_ref(), !snap.can_hold);
    }

    /// Draw a shape's grid in a fixed 4x4 box.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        shape: Option<&Shape>,
        dimmed: bool,
    ) {
        let Some(shape) = shape else {
            fb.put_char(x, y, '-', Style::default());
            return;
        };

        let size = usize::from(shape.size());
        for gy in 0..size {
            for gx in 0..size {
                let Some(kind) = shape.cell(gx, gy).kind() else {
                    continue;
                };
                let mut style = Style::new(piece_color(kind), PANEL_BG);
                if dimmed {
                    style = style.dim();
                }
                let px = x.saturating_add(gx as u16 * 2);
                let py = y.saturating_add(gy as u16);
                fb.fill_rect(px, py, 2, 1, '█', style);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    fb.put_str(tx, y, text, Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold());
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn draws_frame_and_labels() {
        let mut game = GameState::new(7);
        game.start();
        let fb = GameView::default().render(&game.snapshot(), Overlay::None, Viewport::new(60, 24));

        assert!(contains(&fb, "┌"));
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "NEXT"));
        assert!(contains(&fb, "HOLD"));
        assert!(!contains(&fb, "PAUSED"));
    }

    #[test]
    fn overlays_are_drawn() {
        let snap = GameSnapshot::default();
        let view = GameView::default();
        let vp = Viewport::new(60, 24);

        assert!(contains(&view.render(&snap, Overlay::Paused, vp), "PAUSED"));
        let fb = view.render(&snap, Overlay::GameOver, vp);
        assert!(contains(&fb, "GAME OVER"));
        assert!(contains(&fb, "r:restart"));

        let fb = view.render(&snap, Overlay::Countdown(3), vp);
        let mid = fb.row_text(12);
        assert!(mid.contains('3'));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Overlay::GameOver, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
        assert_eq!(fb.height(), 3);
    }
}
