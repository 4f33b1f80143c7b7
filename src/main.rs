mod display;
mod storage;

use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use maze_muncher::difficulty::Difficulty;
use maze_muncher::session::{GameEvent, Session, SessionState};

use crate::storage::HighScores;

/// Default frame cadence; override with the MAZE_MUNCHER_FPS env var.
const DEFAULT_FPS: u64 = 60;

/// Cap on a single simulated step so a stalled terminal can't let
/// entities tunnel through walls when the loop catches up.
const MAX_STEP_MS: f32 = 100.0;

fn frame_duration() -> Duration {
    let fps = std::env::var("MAZE_MUNCHER_FPS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&fps| fps > 0)
        .unwrap_or(DEFAULT_FPS)
        .min(1000);
    Duration::from_millis(1000 / fps)
}

// ── Difficulty select ─────────────────────────────────────────────────────────

fn select_difficulty<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    scores: &HighScores,
) -> Result<Option<Difficulty>> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◉  MAZE  MUNCHER  ◉";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, Difficulty, Color, &str, &str)] = &[
        (
            "1",
            Difficulty::Heaven,
            Color::Green,
            "Heaven",
            "Slow ghosts, sparse walls, long power",
        ),
        (
            "2",
            Difficulty::Human,
            Color::Yellow,
            "Human ",
            "The intended challenge",
        ),
        (
            "3",
            Difficulty::Hell,
            Color::Red,
            "Hell  ",
            "Dense maze, relentless ghosts",
        ),
    ];

    for (i, (key, difficulty, color, label, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
        let best = scores.get(*difficulty);
        if best > 0 {
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(format!("  (best {})", best)))?;
        }
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("1-3 : Choose   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Wait on the channel until the user settles on an option
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) => {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Char('1') => return Ok(Some(Difficulty::Heaven)),
                    KeyCode::Char('2') => return Ok(Some(Difficulty::Human)),
                    KeyCode::Char('3') => return Ok(Some(Difficulty::Hell)),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(None),
                    _ => {}
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(None),
        }
    }
}

// ── Title menu ────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Back,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    difficulty: Difficulty,
    best: u32,
) -> Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◉  MAZE  MUNCHER  ◉";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let (tag, tag_color) = match difficulty {
        Difficulty::Heaven => ("[ HEAVEN ]", Color::Green),
        Difficulty::Human => ("[ HUMAN ]", Color::Yellow),
        Difficulty::Hell => ("[ HELL ]", Color::Red),
    };
    let tag_line = format!("Difficulty: {}", tag);
    out.queue(cursor::MoveTo(
        cx.saturating_sub(tag_line.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(tag_color))?;
    out.queue(Print(&tag_line))?;

    if best > 0 {
        let hs_str = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    // Scoring legend
    let legend: &[(&str, Color, &str)] = &[
        ("·", Color::Grey, " Pellet        +10"),
        ("✦", Color::Yellow, " Power pellet  +50, ghosts turn blue"),
        ("Ω", Color::Red, " Scared ghost  +200 while powered"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("ENTER : Start   B : Difficulty   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) => {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                    KeyCode::Char('b') | KeyCode::Char('B') => return Ok(MenuResult::Back),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(MenuResult::Quit);
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to the menus.
///
/// Input model: steering keys buffer a requested direction into the
/// player on both press and repeat, and the session applies it the
/// moment it becomes legal, so a tap ahead of a junction still takes
/// the turn. One-shot keys (pause, quit, restart) act on the initial
/// press only.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut ThreadRng,
    scores: &mut HighScores,
    scores_path: &Path,
) -> Result<bool> {
    let frame = frame_duration();
    let mut events: Vec<GameEvent> = Vec::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt_ms = (frame_start.duration_since(last).as_secs_f32() * 1000.0).min(MAX_STEP_MS);
        last = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            let pressed = kind == KeyEventKind::Press;
            match code {
                // Steering buffers on press and repeat alike
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    session.player.set_direction(-1.0, 0.0);
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    session.player.set_direction(1.0, 0.0);
                }
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                    session.player.set_direction(0.0, -1.0);
                }
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                    session.player.set_direction(0.0, 1.0);
                }
                // One-shots act on the initial press only
                KeyCode::Char('p') | KeyCode::Char('P') if pressed => {
                    session.toggle_pause();
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if pressed => {
                    return Ok(true);
                }
                KeyCode::Char('c') if pressed && modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if pressed && session.state == SessionState::GameOver =>
                {
                    session.start_game(rng);
                }
                KeyCode::Char('m') | KeyCode::Char('M')
                    if pressed
                        && matches!(
                            session.state,
                            SessionState::GameOver | SessionState::Win
                        ) =>
                {
                    return Ok(false);
                }
                KeyCode::Enter | KeyCode::Char(' ')
                    if pressed && session.state == SessionState::Win =>
                {
                    session.start_game(rng);
                }
                _ => {}
            }
        }

        session.update(dt_ms, rng, &mut events);

        // ── Consume this tick's gameplay events ───────────────────────────────
        let mut bell = false;
        for ev in events.drain(..) {
            match ev {
                GameEvent::PowerPelletEaten | GameEvent::GhostEaten | GameEvent::PlayerCaught => {
                    bell = true;
                }
                // Persist right away so an in-place restart can't lose it
                GameEvent::GameOver | GameEvent::LevelCleared => {
                    if scores.record(session.difficulty, session.score) {
                        let _ = storage::save_scores_atomic(scores_path, scores);
                    }
                }
                GameEvent::PelletEaten => {}
            }
        }
        if bell {
            out.write_all(b"\x07")?;
        }

        display::render(out, session, scores.get(session.difficulty))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // A dedicated thread owns the blocking event::read calls and forwards
    // everything over a channel, keeping the frame loop free of I/O stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Restore the terminal no matter how the run ended
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let scores_path = storage::scores_path()?;
    let mut scores = storage::load_scores(&scores_path);
    let mut rng = thread_rng();

    loop {
        let mut session = Session::new();

        let difficulty = match select_difficulty(out, rx, &scores)? {
            Some(d) => d,
            None => break,
        };
        session.set_difficulty(difficulty);

        match show_menu(out, rx, difficulty, scores.get(difficulty))? {
            MenuResult::Start => {}
            MenuResult::Back => continue,
            MenuResult::Quit => break,
        }

        session.start_game(&mut rng);
        let quit = game_loop(out, &mut session, rx, &mut rng, &mut scores, &scores_path)?;

        // Catch anything the in-loop saves missed (e.g. quitting mid-run)
        if scores.record(session.difficulty, session.score) {
            storage::save_scores_atomic(&scores_path, &scores)?;
        }

        if quit {
            break;
        }
        // Otherwise loop back to the difficulty select
    }
    Ok(())
}
