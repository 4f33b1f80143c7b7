//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; this module only translates
//! state into terminal commands. Every maze cell maps to two terminal
//! columns and one row, so movers render at half-cell resolution.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use maze_muncher::difficulty::Difficulty;
use maze_muncher::ghost::Mode;
use maze_muncher::maze::Cell;
use maze_muncher::mover::Mover;
use maze_muncher::session::{Session, SessionState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkBlue;
const C_PELLET: Color = Color::Grey;
const C_POWER_PELLET: Color = Color::Yellow;
const C_PLAYER: Color = Color::Yellow;
const C_GHOST_SCARED: Color = Color::DarkBlue;
const C_GHOST_FLASH: Color = Color::White;
const C_GHOST_RETURNING: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_POWER_ACTIVE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Per-ghost body colours, assigned by spawn order.
const GHOST_COLORS: [Color; 4] = [Color::Red, Color::Magenta, Color::Cyan, Color::Green];

/// Scared ghosts flash during the last stretch of power mode.
const SCARED_FLASH_MS: f32 = 2000.0;
const FLASH_PERIOD_MS: f32 = 250.0;

/// Rows above the board reserved for the HUD.
const HUD_ROWS: u16 = 1;

// ── Board-to-terminal mapping ─────────────────────────────────────────────────

fn board_width(session: &Session) -> u16 {
    (session.maze.cols * 2) as u16
}

fn cell_col(x: i32) -> u16 {
    (x * 2).max(0) as u16
}

fn cell_row(y: i32) -> u16 {
    y.max(0) as u16 + HUD_ROWS
}

fn mover_col(m: &Mover) -> u16 {
    ((m.x / m.cell_size) * 2.0).floor().max(0.0) as u16
}

fn mover_row(m: &Mover) -> u16 {
    (m.y / m.cell_size).floor().max(0.0) as u16 + HUD_ROWS
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw a full frame of the session to the terminal.
pub fn render<W: Write>(out: &mut W, session: &Session, high_score: u32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_maze(out, session)?;
    draw_pellets(out, session)?;
    draw_hud(out, session, high_score)?;

    draw_ghosts(out, session)?;
    draw_player(out, session)?;
    draw_controls_hint(out, session)?;

    match session.state {
        SessionState::Paused => draw_paused(out, session)?,
        SessionState::Win => draw_win(out, session)?,
        SessionState::GameOver => draw_game_over(out, session, high_score)?,
        _ => {}
    }

    // Leave the cursor below the board, then flush the whole frame
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, session.maze.rows as u16 + HUD_ROWS))?;
    out.flush()?;
    Ok(())
}

// ── Board ─────────────────────────────────────────────────────────────────────

fn draw_maze<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_WALL))?;
    for y in 0..session.maze.rows {
        for x in 0..session.maze.cols {
            if session.maze.grid[y][x] == Cell::Wall {
                out.queue(cursor::MoveTo(cell_col(x as i32), cell_row(y as i32)))?;
                out.queue(Print("██"))?;
            }
        }
    }
    Ok(())
}

fn draw_pellets<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PELLET))?;
    for &(x, y) in &session.pellets {
        out.queue(cursor::MoveTo(cell_col(x), cell_row(y)))?;
        out.queue(Print("·"))?;
    }
    out.queue(style::SetForegroundColor(C_POWER_PELLET))?;
    for &(x, y) in &session.power_pellets {
        out.queue(cursor::MoveTo(cell_col(x), cell_row(y)))?;
        out.queue(Print("✦"))?;
    }
    Ok(())
}

// ── Status row ────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, high_score: u32) -> std::io::Result<()> {
    let width = board_width(session);

    // Score, high score and level — left
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if high_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}  Lv:{}",
            session.score, high_score, session.level
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}  Lv:{}", session.score, session.level)))?;
    }

    // Difficulty tag — centre
    let tag = match session.difficulty {
        Difficulty::Heaven => "[ HEAVEN ]",
        Difficulty::Human => "[ HUMAN ]",
        Difficulty::Hell => "[ HELL ]",
    };
    let tag_color = match session.difficulty {
        Difficulty::Heaven => Color::Green,
        Difficulty::Human => Color::Yellow,
        Difficulty::Hell => Color::Red,
    };
    let tx = (width / 2).saturating_sub(tag.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(tag_color))?;
    out.queue(Print(tag))?;

    // Power countdown + lives — right side, right-aligned
    let power_tag = if session.power_mode {
        format!(
            "[★ POWER {:>2}s] ",
            (session.power_timer_ms / 1000.0).ceil() as u32
        )
    } else {
        String::new()
    };
    let hearts: String = "♥".repeat(session.lives as usize);
    let lives_str = format!("Lives:{}", hearts);

    let right_len = (power_tag.chars().count() + lives_str.chars().count()) as u16;
    let rx = width.saturating_sub(right_len);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWER_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let m = &session.player.mover;
    out.queue(cursor::MoveTo(mover_col(m), mover_row(m)))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("◉"))?;
    Ok(())
}

fn draw_ghosts<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    for (i, ghost) in session.ghosts.iter().enumerate() {
        let color = match ghost.mode {
            Mode::Scared => scared_color(session.power_timer_ms),
            Mode::Returning => C_GHOST_RETURNING,
            Mode::Chase => GHOST_COLORS[i % GHOST_COLORS.len()],
        };
        let m = &ghost.mover;
        out.queue(cursor::MoveTo(mover_col(m), mover_row(m)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print("Ω"))?;
    }
    Ok(())
}

fn scared_color(power_timer_ms: f32) -> Color {
    let flashing = power_timer_ms < SCARED_FLASH_MS
        && ((power_timer_ms / FLASH_PERIOD_MS) as i32) % 2 == 0;
    if flashing {
        C_GHOST_FLASH
    } else {
        C_GHOST_SCARED
    }
}

// ── Key hint row ──────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, session.maze.rows as u16 + HUD_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ ↓ → / WASD : Steer   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered_lines<W: Write>(
    out: &mut W,
    session: &Session,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = board_width(session) / 2;
    let start_row =
        (session.maze.rows as u16 / 2 + HUD_ROWS).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg.as_str()))?;
    }
    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let lines = vec![
        ("╔══════════════════╗".to_string(), Color::Yellow),
        ("║      PAUSED      ║".to_string(), Color::Yellow),
        ("╚══════════════════╝".to_string(), Color::Yellow),
        ("P - Resume   Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, session, &lines)
}

fn draw_win<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let lines = vec![
        ("╔════════════════════╗".to_string(), Color::Green),
        ("║   LEVEL  CLEAR!    ║".to_string(), Color::Green),
        ("╚════════════════════╝".to_string(), Color::Green),
        (format!("Score: {:>6}", session.score), Color::Yellow),
        (format!("Next up: level {}", session.level), Color::White),
        ("ENTER - Next Level   M - Menu   Q - Quit".to_string(), Color::DarkGrey),
    ];
    draw_centered_lines(out, session, &lines)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &Session,
    high_score: u32,
) -> std::io::Result<()> {
    let best = high_score.max(session.score);
    let new_best = session.score >= high_score && session.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", best)
    } else {
        format!("Best Score:  {:>6}", best)
    };

    let lines = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║     GAME  OVER     ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", session.score), Color::Yellow),
        (
            best_line,
            if new_best { Color::Yellow } else { Color::DarkGrey },
        ),
        ("R - Play Again   M - Menu   Q - Quit".to_string(), Color::White),
    ];
    draw_centered_lines(out, session, &lines)
}
