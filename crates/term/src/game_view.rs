//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Point, CELL_HEIGHT, CELL_WIDTH};

pub const HEAD_GLYPH: char = '█';
pub const BODY_GLYPH: char = '▓';
pub const FOOD_GLYPH: char = '●';
pub const EMPTY_GLYPH: char = '·';

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_HINT_TEXT: &str = "Press R to Restart";
pub const TOO_SMALL_TEXT: &str = "Terminal too small";

const FIELD_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal renderer for the Snake game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new(CELL_WIDTH, CELL_HEIGHT)
    }
}

/// Where the play area landed in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Top-left corner of the border.
    pub start_x: u16,
    pub start_y: u16,
    /// Border size, inclusive of the border itself.
    pub frame_w: u16,
    pub frame_h: u16,
}

impl FieldLayout {
    /// Columns and rows needed to show the field and the score line.
    pub fn required_size(&self) -> (u16, u16) {
        (self.frame_w, self.frame_h.saturating_add(1))
    }

    pub fn fits(&self, viewport: Viewport) -> bool {
        let (w, h) = self.required_size();
        w <= viewport.width && h <= viewport.height
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

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    /// Compute where the bordered play area sits for `snap` in `viewport`.
    ///
    /// One extra row below the border is reserved for the score line.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> FieldLayout {
        let frame_w = snap.grid.width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.grid.height.saturating_mul(self.cell_h).saturating_add(2);
        let total_h = frame_h.saturating_add(1);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        FieldLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Terminal position of the top-left character of grid cell `p`.
    pub fn cell_origin(&self, layout: &FieldLayout, p: Point) -> (u16, u16) {
        (
            layout
                .start_x
                .saturating_add(1)
                .saturating_add((p.x as u16).saturating_mul(self.cell_w)),
            layout
                .start_y
                .saturating_add(1)
                .saturating_add((p.y as u16).saturating_mul(self.cell_h)),
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap, viewport);
        if !layout.fits(viewport) {
            self.draw_too_small(fb, &layout, viewport);
            return;
        }

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        self.draw_border(fb, &layout, border);

        // Empty cells.
        let empty = CellStyle::new(Rgb::new(60, 60, 60), FIELD_BG).dim();
        for y in 0..snap.grid.height {
            for x in 0..snap.grid.width {
                self.fill_cell(fb, &layout, Point::new(x as i16, y as i16), EMPTY_GLYPH, empty);
            }
        }

        // Food goes first so the snake covers it when they overlap.
        let food = CellStyle::new(Rgb::new(230, 40, 40), FIELD_BG).bold();
        if snap.grid.contains(snap.food) {
            self.fill_cell(fb, &layout, snap.food, FOOD_GLYPH, food);
        }

        // Body, then head on top.
        let body = CellStyle::new(Rgb::new(0, 160, 0), FIELD_BG);
        for &p in snap.segments.iter().skip(1) {
            if snap.grid.contains(p) {
                self.fill_cell(fb, &layout, p, BODY_GLYPH, body);
            }
        }
        if let Some(head) = snap.head() {
            let style = CellStyle::new(Rgb::new(50, 205, 50), FIELD_BG).bold();
            if snap.grid.contains(head) {
                self.fill_cell(fb, &layout, head, HEAD_GLYPH, style);
            }
        }

        self.draw_score_line(fb, snap, &layout);
        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over() {
            self.draw_game_over(fb, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &FieldLayout, style: CellStyle) {
        let (x, y, w, h) = (layout.start_x, layout.start_y, layout.frame_w, layout.frame_h);
        if w < 2 || h < 2 {
            return;
        }

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

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &FieldLayout, p: Point, ch: char, style: CellStyle) {
        let (px, py) = self.cell_origin(layout, p);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_score_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &FieldLayout) {
        let y = layout.start_y.saturating_add(layout.frame_h);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        let label = "Score: ";
        let x = layout.start_x.saturating_add(1);
        fb.put_str(x, y, label, style);
        fb.put_u32(x.saturating_add(label.len() as u16), y, snap.score, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &FieldLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.best_score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LENGTH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.segments.len() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.episode_id.saturating_add(1), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "arrows move", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "r restart", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q quit", hint);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: &FieldLayout) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let title = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let prompt = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));

        self.put_centered(fb, layout, mid_y, GAME_OVER_TEXT, title);
        self.put_centered(fb, layout, mid_y.saturating_add(2), RESTART_HINT_TEXT, prompt);
    }

    /// Replaces a clipped field: "Terminal too small" over "need WxH".
    fn draw_too_small(&self, fb: &mut FrameBuffer, layout: &FieldLayout, viewport: Viewport) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let (need_w, need_h) = layout.required_size();

        let y = viewport.height.saturating_sub(2) / 2;
        let title_w = TOO_SMALL_TEXT.chars().count() as u16;
        fb.put_str(viewport.width.saturating_sub(title_w) / 2, y, TOO_SMALL_TEXT, style);

        // "need " + W + "x" + H, centred without formatting into a String.
        let line_w = 6 + digit_count(need_w) + digit_count(need_h);
        let mut x = viewport.width.saturating_sub(line_w) / 2;
        let y = y.saturating_add(1);
        fb.put_str(x, y, "need ", hint);
        x = x.saturating_add(5);
        x = x.saturating_add(fb.put_u32(x, y, need_w as u32, hint));
        fb.put_char(x, y, 'x', hint);
        fb.put_u32(x.saturating_add(1), y, need_h as u32, hint);
    }

    fn put_centered(&self, fb: &mut FrameBuffer, layout: &FieldLayout, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

fn digit_count(mut n: u16) -> u16 {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}
