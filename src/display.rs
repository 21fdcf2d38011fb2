/// Rendering layer — all terminal I/O lives here.
///
/// The world is drawn scaled so the whole view fits the terminal: row 0 is
/// the HUD, the last row holds the controls hint, everything in between is
/// the play area.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use cyberbird::compute::score_text;
use cyberbird::entities::{
    Aabb, Drone, Facing, GameSession, GameStatus, ParallaxLayer, PipeSegment, SegmentKind,
    BIRD_FLY, DRONE_IDLE,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_INFO: Color = Color::DarkCyan;
const C_PLAYER: Color = Color::Yellow;
const C_PLAYER_TINT: Color = Color::Red;
const C_PIPE: Color = Color::Green;
const C_PIPE_END: Color = Color::DarkGreen;
const C_DRONE: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::DarkMagenta;

// ── Sprites ───────────────────────────────────────────────────────────────────

const BIRD_RIGHT: [&str; 4] = ["\\o>", "-o>", "/o>", "-o>"];
const BIRD_LEFT: [&str; 4] = ["<o/", "<o-", "<o\\", "<o-"];
const DRONE_FRAMES: [&str; 4] = ["<◎>", "=◎=", "<◎>", "-◎-"];

/// Background layers, far to near: pattern, row as a fraction of the play
/// area height, colour.
const LAYER_STYLES: [(&str, f32, Color); 5] = [
    ("   .        *          .     ", 0.05, Color::DarkGrey),
    ("      ~~~            ~~~~    ", 0.18, Color::DarkBlue),
    ("▁▂▃▂▁  ▃▅▃  ▁▂▁   ▂▃▂▁ ", 0.90, Color::DarkBlue),
    ("  ▂▄▆▄▂    ▃▅▇▅▃   ", 0.95, Color::Blue),
    ("═══╪════╪══════╪═", 1.0, Color::DarkCyan),
];

// ── World → screen mapping ────────────────────────────────────────────────────

struct Viewport {
    cols: u16,
    rows: u16,
    scroll_x: f32,
    /// World units per column / per row.
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(state: &GameSession, cols: u16, rows: u16) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Viewport {
            cols,
            rows,
            scroll_x: state.camera.scroll_x,
            sx: state.camera.width / cols.max(1) as f32,
            sy: state.camera.height / play_rows as f32,
        }
    }

    fn first_play_row(&self) -> i32 {
        1
    }

    fn last_play_row(&self) -> i32 {
        self.rows as i32 - 2
    }

    fn col(&self, wx: f32) -> i32 {
        ((wx - self.scroll_x) / self.sx).floor() as i32
    }

    fn row(&self, wy: f32) -> i32 {
        self.first_play_row() + (wy / self.sy).floor() as i32
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0
            && col < self.cols as i32
            && row >= self.first_play_row()
            && row <= self.last_play_row()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(state, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for (layer, layer_style) in state.layers.iter().zip(LAYER_STYLES.iter()) {
        draw_layer(out, &vp, layer, layer_style)?;
    }
    for pair in &state.pipe_pairs {
        for segment in &pair.segments {
            draw_segment(out, &vp, segment)?;
        }
    }
    for drone in &state.drones {
        draw_drone(out, &vp, drone, state.scheduler.now_ms())?;
    }

    draw_player(out, &vp, state)?;
    draw_hud(out, &vp, state)?;
    draw_controls_hint(out, &vp)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, &vp, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_layer<W: Write>(
    out: &mut W,
    vp: &Viewport,
    layer: &ParallaxLayer,
    &(pattern, height, color): &(&str, f32, Color),
) -> std::io::Result<()> {
    let glyphs: Vec<char> = pattern.chars().collect();
    if glyphs.is_empty() {
        return Ok(());
    }
    let span = (vp.last_play_row() - vp.first_play_row()) as f32;
    let row = vp.first_play_row() + (span * height).round() as i32;
    let shift = (layer.offset / vp.sx) as usize;

    let line: String = (0..vp.cols as usize)
        .map(|col| glyphs[(col + shift) % glyphs.len()])
        .collect();

    out.queue(cursor::MoveTo(0, row.max(0) as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(line))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill the cells covered by `rect` with `glyph`, clipped to the play area.
fn fill_rect<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Aabb,
    glyph: char,
) -> std::io::Result<()> {
    let c0 = vp.col(rect.x).max(0);
    let c1 = (((rect.right() - vp.scroll_x) / vp.sx).ceil() as i32 - 1).min(vp.cols as i32 - 1);
    let r0 = vp.row(rect.y).max(vp.first_play_row());
    let r1 = (vp.first_play_row() + (rect.bottom() / vp.sy).ceil() as i32 - 1)
        .min(vp.last_play_row());
    if c0 > c1 || r0 > r1 {
        return Ok(());
    }

    let run: String = std::iter::repeat(glyph).take((c1 - c0 + 1) as usize).collect();
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0 as u16, row as u16))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

fn draw_segment<W: Write>(
    out: &mut W,
    vp: &Viewport,
    segment: &PipeSegment,
) -> std::io::Result<()> {
    let (glyph, color) = match segment.kind {
        SegmentKind::Middle => ('█', C_PIPE),
        SegmentKind::End => ('▓', C_PIPE_END),
    };
    out.queue(style::SetForegroundColor(color))?;
    fill_rect(out, vp, &segment.body(), glyph)
}

/// Print a 3-column sprite centred on a world position.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    wx: f32,
    wy: f32,
    sprite: &str,
) -> std::io::Result<()> {
    let col = vp.col(wx) - 1;
    let row = vp.row(wy);
    if !vp.contains(col, row) || !vp.contains(col + 2, row) {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_drone<W: Write>(
    out: &mut W,
    vp: &Viewport,
    drone: &Drone,
    now_ms: u64,
) -> std::io::Result<()> {
    let frame = DRONE_IDLE.frame_at(now_ms.saturating_sub(drone.spawned_at_ms)) as usize;
    out.queue(style::SetForegroundColor(C_DRONE))?;
    draw_sprite(out, vp, drone.x, drone.y, DRONE_FRAMES[frame % DRONE_FRAMES.len()])
}

fn draw_player<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    let p = &state.player;
    let frames = match p.facing {
        Facing::Right => &BIRD_RIGHT,
        Facing::Left => &BIRD_LEFT,
    };
    let frame = BIRD_FLY.frame_at(state.scheduler.now_ms()) as usize;
    let color = if p.tinted { C_PLAYER_TINT } else { C_PLAYER };

    out.queue(style::SetForegroundColor(color))?;
    draw_sprite(out, vp, p.x, p.y, frames[frame % frames.len()])
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, state: &GameSession) -> std::io::Result<()> {
    // Drone pressure — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_INFO))?;
    out.queue(Print(format!(
        "Drones: {:>2}  Spawn odds: 1/{}",
        state.drones.len(),
        state.drone_spawn_chance
    )))?;

    // Score and high score — right, fixed to the screen
    let text = score_text(state);
    let x = vp.cols.saturating_sub(text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ ← → / W A S D : Fly   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    vp: &Viewport,
    state: &GameSession,
) -> std::io::Result<()> {
    let new_best = state.score > 0 && state.score >= state.high_score;
    let score_line = format!("Final Score: {:>6}", state.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.high_score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };

    let lines: [(&str, Color); 3] = [
        ("╔════════════════════╗", C_GAME_OVER),
        ("║     GAME  OVER     ║", C_GAME_OVER),
        ("╚════════════════════╝", C_GAME_OVER),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = vp.cols / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + best + hint
    let start_row = (vp.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Restart  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
