//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only maps
//! logical playfield coordinates onto the terminal cell grid and
//! translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::entities::{Beam, Bomb, Explosion, GameState, GameStatus, Player, PlayerVisual, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_BEAM: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal geometry captured once at startup.
///
/// Row 0 is the HUD, row 1 and row `rows-2` the border bars, the last
/// row the controls hint; the playfield scales onto the cells between.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    fn inner_cols(&self) -> i64 {
        i64::from(self.cols.saturating_sub(2)).max(1)
    }

    fn inner_rows(&self) -> i64 {
        i64::from(self.rows.saturating_sub(4)).max(1)
    }

    /// Map a logical playfield point to a terminal cell.
    fn cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = 1 + i64::from(x) * self.inner_cols() / i64::from(FIELD_WIDTH + 1);
        let row = 2 + i64::from(y) * self.inner_rows() / i64::from(FIELD_HEIGHT + 1);
        (
            col.clamp(0, i64::from(self.cols.saturating_sub(1))) as u16,
            row.clamp(0, i64::from(self.rows.saturating_sub(1))) as u16,
        )
    }

    /// Cell under a rect's center.
    fn cell_of(&self, rect: &Rect) -> (u16, u16) {
        let (cx, cy) = rect.center();
        self.cell(cx, cy)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state)?;

    for bomb in &state.bombs {
        draw_bomb(out, bomb, view)?;
    }
    for beam in &state.beams {
        draw_beam(out, beam, view)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion, view)?;
    }

    draw_player(out, &state.player, view)?;
    draw_controls_hint(out, view)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn player_glyph(player: &Player) -> &'static str {
    match player.visual {
        PlayerVisual::Defeated => "✖",
        PlayerVisual::Scoring => "☺",
        PlayerVisual::Normal => match (player.facing.0.signum(), player.facing.1.signum()) {
            (1, 0) => "→",
            (1, -1) => "↗",
            (0, -1) => "↑",
            (-1, -1) => "↖",
            (-1, 0) => "←",
            (-1, 1) => "↙",
            (0, 1) => "↓",
            (1, 1) => "↘",
            _ => "→",
        },
    }
}

fn draw_player<W: Write>(out: &mut W, player: &Player, view: &Viewport) -> std::io::Result<()> {
    let (col, row) = view.cell_of(&player.rect);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(player_glyph(player)))?;
    Ok(())
}

fn draw_bomb<W: Write>(out: &mut W, bomb: &Bomb, view: &Viewport) -> std::io::Result<()> {
    let (col, row) = view.cell_of(&bomb.rect);
    let (r, g, b) = bomb.color;
    out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("●"))?;
    Ok(())
}

fn draw_beam<W: Write>(out: &mut W, beam: &Beam, view: &Viewport) -> std::io::Result<()> {
    let (_, cy) = beam.rect.center();
    let (c0, row) = view.cell(beam.rect.left(), cy);
    let (c1, _) = view.cell(beam.rect.right(), cy);
    let len = usize::from(c1.saturating_sub(c0)).max(1);
    out.queue(style::SetForegroundColor(C_BEAM))?;
    out.queue(cursor::MoveTo(c0, row))?;
    out.queue(Print("─".repeat(len)))?;
    Ok(())
}

fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &Explosion,
    view: &Viewport,
) -> std::io::Result<()> {
    // Two variants alternated by life parity (the flicker)
    let glyph = if explosion.life % 2 == 0 { "✺" } else { "✹" };
    let (col, row) = view.cell_of(&explosion.rect);
    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER    ║", C_GAME_OVER),
        ("╚══════════════════╝", C_GAME_OVER),
        (&score_line, C_HUD_SCORE),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
