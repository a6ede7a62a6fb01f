//! Rendering layer: all terminal I/O lives here.
//!
//! The core draws into [`TermCanvas`] through the `Surface` trait in
//! playfield coordinates; the canvas scales them onto the terminal grid
//! and flushes the result with crossterm. No game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use shard_shooter::entities::{BoundingBox, GameState, GameStatus};
use shard_shooter::hud::HudSnapshot;
use shard_shooter::render::{render_scene, Rgb, Surface};

const C_HINT: Color = Color::DarkGrey;
const C_BACKGROUND: Color = Color::Black;

/// Below this opacity a filled cell is drawn with a light shade.
const SOLID_ALPHA: f32 = 0.6;

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Character-grid surface sized to the terminal.
pub struct TermCanvas {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
    cells: Vec<Option<Cell>>,
}

impl TermCanvas {
    /// Map a `field_width` × `field_height` playfield onto `cols` × `rows`.
    pub fn new(cols: u16, rows: u16, field_width: f32, field_height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale_x: cols as f32 / field_width.max(1.0),
            scale_y: rows as f32 / field_height.max(1.0),
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Some(cell);
    }

    /// Write the grid to `out` row by row.
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        for row in 0..self.rows {
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];
            for (col, cell) in line.iter().enumerate() {
                let Some(cell) = cell else { continue };
                out.queue(cursor::MoveTo(col as u16, row))?;
                out.queue(style::SetForegroundColor(cell.color))?;
                out.queue(Print(cell.glyph))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb, alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * a).round() as u8;
    Color::Rgb { r: scale(rgb.0), g: scale(rgb.1), b: scale(rgb.2) }
}

impl Surface for TermCanvas {
    fn fill_rect(&mut self, rect: BoundingBox, color: Rgb, alpha: f32) {
        if alpha <= 0.0 || !rect.is_finite() {
            return;
        }
        let glyph = if alpha >= SOLID_ALPHA { '█' } else { '░' };
        let cell = Cell { glyph, color: to_color(color, alpha.max(0.3)) };

        let c0 = (rect.x * self.scale_x).floor() as i32;
        let r0 = (rect.y * self.scale_y).floor() as i32;
        // at least one cell so small sprites stay visible
        let c1 = ((rect.x + rect.width) * self.scale_x).ceil().max(c0 as f32 + 1.0) as i32;
        let r1 = ((rect.y + rect.height) * self.scale_y).ceil().max(r0 as f32 + 1.0) as i32;
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, cell);
            }
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb) {
        let len = text.chars().count() as i32;
        let col = (x * self.scale_x).round() as i32 - len / 2;
        let row = (y * self.scale_y).round() as i32;
        for (i, glyph) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { glyph, color: to_color(color, 1.0) });
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let field = state.field;
    let mut canvas = TermCanvas::new(cols, rows.saturating_sub(1), field.width, field.height);

    render_scene(state, &mut canvas);
    HudSnapshot::capture(state).draw(&mut canvas, field.width, field.height);
    canvas.flush(out)?;

    draw_controls_hint(out, state, rows)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, rows: u16) -> std::io::Result<()> {
    let hint = if state.status.is_terminal() {
        "R : Play Again   Q : Quit"
    } else if state.status == GameStatus::Paused {
        "P : Resume   Q : Quit"
    } else {
        "← → ↑ ↓ / WASD : Move   SPACE / Z : Shoot   P : Pause   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
