#![cfg(feature = "std")]

//! Text front end: board rendering and command parsing for the CLI.

use std::fmt::Write;

use crate::{
    common::{Coord, ShotOutcome},
    config::GRID_SIZE,
    game::{GameEngine, GameEvent, Phase, Side},
    marks::Marks,
    session::Command,
    ship::ShipKind,
};

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Placement: <cell> to preview (again to place), rotate, ship <name>, place,
           auto, clear, start
Battle:    <cell> to fire, back
Any time:  show, new, help, quit
Cells are a column letter and a row number, e.g. C5.";

/// Parse a coordinate such as `C5` (column letter, 1-based row).
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let last_col = (b'A' + GRID_SIZE as u8 - 1) as char;
    let mut chars = input.trim().chars();
    let col_ch = chars
        .next()
        .ok_or_else(|| "Empty input".to_string())?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-{}", col_ch, last_col));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-{}", col_ch, last_col));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, GRID_SIZE))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, GRID_SIZE));
    }
    Ok(Coord::new(row - 1, col))
}

fn parse_kind(name: &str) -> Result<ShipKind, String> {
    ShipKind::ALL
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("Unknown ship '{}'", name))
}

/// Parse a line in the context of the current phase. A bare cell means
/// "tap" during placement and "fire" during battle.
pub fn parse_input(line: &str, phase: Phase) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Input::Show);
    };
    let input = match first.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        "show" => Input::Show,
        "r" | "rotate" => Input::Command(Command::Rotate),
        "place" | "commit" => Input::Command(Command::Commit),
        "auto" => Input::Command(Command::AutoPlace),
        "clear" => Input::Command(Command::Clear),
        "start" => Input::Command(Command::StartBattle),
        "back" => Input::Command(Command::BackToPlacement),
        "new" | "reset" => Input::Command(Command::Reset),
        "ship" | "select" => {
            let name = words.next().ok_or_else(|| "Which ship?".to_string())?;
            Input::Command(Command::Select(parse_kind(name)?))
        }
        _ => {
            let at = parse_coord(first)?;
            match phase {
                Phase::Placement => Input::Command(Command::Tap(at)),
                _ => Input::Command(Command::Fire(at)),
            }
        }
    };
    Ok(input)
}

fn write_grid(out: &mut String, title: &str, marks: &Marks, overlay: &[(Coord, char)]) {
    let _ = writeln!(out, "    {}", title);
    let _ = write!(out, "    ");
    for c in 0..GRID_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    let _ = writeln!(out);
    for (r, row) in marks.rows().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for (c, mark) in row.iter().enumerate() {
            let symbol = overlay
                .iter()
                .find(|(at, _)| *at == Coord::new(r, c))
                .map(|(_, ch)| *ch)
                .unwrap_or_else(|| mark.symbol());
            let _ = write!(out, " {}", symbol);
        }
        let _ = writeln!(out);
    }
}

/// Render the boards relevant to the current phase.
pub fn render(engine: &GameEngine) -> String {
    let mut out = String::new();
    match engine.phase() {
        Phase::Placement => {
            let overlay: Vec<(Coord, char)> = engine
                .draft()
                .map(|draft| {
                    let ch = if draft.valid { '+' } else { '!' };
                    draft
                        .cells
                        .iter()
                        .filter(|c| c.in_bounds())
                        .map(|c| (*c, ch))
                        .collect()
                })
                .unwrap_or_default();
            write_grid(&mut out, "Your Fleet", &engine.player_marks(), &overlay);
            let placed: Vec<ShipKind> = engine.placed_kinds().collect();
            let _ = write!(out, "    Ships:");
            for kind in ShipKind::ALL {
                let tag = if placed.contains(&kind) {
                    "placed"
                } else if engine.selected_ship() == Some(kind) {
                    "selected"
                } else {
                    "-"
                };
                let _ = write!(out, " {}({}) {}", kind, kind.length(), tag);
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "    Orientation: {}", engine.orientation().label());
        }
        phase => {
            write_grid(&mut out, "Your Fleet", &engine.player_marks(), &[]);
            write_grid(&mut out, "Enemy Waters", &engine.opponent_marks(), &[]);
            let status = match phase {
                Phase::GameOver(Side::Player) => "You won!".to_string(),
                Phase::GameOver(Side::Opponent) => "The enemy sank your fleet.".to_string(),
                _ if engine.turn() == Side::Player => "Your turn".to_string(),
                _ => "Enemy turn".to_string(),
            };
            let _ = writeln!(out, "    {}  Shots: {}", status, engine.shot_count());
        }
    }
    let _ = write!(out, "    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water");
    out
}

/// One-line description of an event, if it is worth telling the user.
pub fn describe(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::ShipSelected(kind) => format!("Placing {}", kind),
        GameEvent::Rotated(o) => format!("Orientation {}", o.label()),
        GameEvent::DraftUpdated { valid: false, .. } => "That ship does not fit there".to_string(),
        GameEvent::ShipPlaced { kind, .. } => format!("{} placed", kind),
        GameEvent::FleetCleared => "Fleet cleared".to_string(),
        GameEvent::BattleStarted => "Battle stations!".to_string(),
        GameEvent::ShotResolved { by, at, outcome } => {
            let who = match by {
                Side::Player => "You fire",
                Side::Opponent => "Enemy fires",
            };
            let what = match outcome {
                ShotOutcome::Miss => "miss".to_string(),
                ShotOutcome::Hit => "hit!".to_string(),
                ShotOutcome::Sunk { kind, .. } => format!("{} sunk!", kind),
            };
            format!("{} at {}: {}", who, at, what)
        }
        GameEvent::GameOver { winner: Side::Player } => "Victory!".to_string(),
        GameEvent::GameOver { winner: Side::Opponent } => "Defeat.".to_string(),
        GameEvent::ReturnedToPlacement => "Back to placement".to_string(),
        GameEvent::Reset => "New game".to_string(),
        _ => return None,
    };
    Some(text)
}
