use std::io::{self, Write};

use super::{ClickScript, TerminalDisplay};
use crate::BoardView;
use crate::board::Square;
use crate::feedback::compute_feedback;
use crate::game::{ClickOutcome, GameState};
use crate::session::Session;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game on the given session.
pub fn run_interactive_terminal(session: Session) {
    let mut display = TerminalDisplay::new();

    clear_screen();
    draw_interface(&mut display, &session.snapshot(), None);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::error!("failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("failed to read input: {e}");
                break;
            }
        }

        let trimmed = input.trim();
        let (command, argument) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(c, a)| (c, a.trim()));

        match command {
            "" => continue,
            "c" => match argument.parse::<Square>() {
                Ok(square) => {
                    let (outcome, state) = session.click(square);
                    clear_screen();
                    draw_interface(&mut display, &state, Some(outcome));
                }
                Err(e) => println!("❌ {e}"),
            },
            "s" => {
                let mut script = ClickScript::new();
                match script.push_script(argument) {
                    Ok(()) => {
                        let last = script.drain_into(&session).pop();
                        clear_screen();
                        draw_interface(&mut display, &session.snapshot(), last);
                    }
                    Err(e) => println!("❌ {e}"),
                }
            }
            "load" => {
                let fen = if argument == "startpos" {
                    Ok(GameState::new())
                } else {
                    GameState::from_fen(argument)
                };
                match fen {
                    Ok(state) => {
                        let state = session.load(state);
                        clear_screen();
                        draw_interface(&mut display, &state, None);
                        println!("\n✅ Position loaded from FEN");
                    }
                    Err(e) => println!("❌ {e}"),
                }
            }
            "r" => {
                let state = session.reset();
                clear_screen();
                draw_interface(&mut display, &state, None);
                println!("\n🔄 Reset to initial state");
            }
            "p" => {
                clear_screen();
                draw_interface(&mut display, &session.snapshot(), None);
            }
            "q" => break,
            _ => println!("Unknown command"),
        }
    }
}

/// Draws help text, the last click's result and the board.
fn draw_interface(display: &mut TerminalDisplay, state: &GameState, last: Option<ClickOutcome>) {
    println!("♟️  Click Chess");
    println!();
    println!("Commands: c <square> | s <script> | load <fen> | r (reset) | p (refresh) | q (quit)");
    println!();

    if let Err(e) = display.render(state, &compute_feedback(state)) {
        log::error!("{e}");
    }

    if let Some(outcome) = last {
        println!("{}", describe(outcome));
    }
}

fn describe(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Selected(square) => format!("Selected {square}"),
        ClickOutcome::Ignored => "Pick one of your own pieces".to_string(),
        ClickOutcome::Deselected(square) => format!("Deselected {square}"),
        ClickOutcome::Moved {
            from,
            to,
            captured: Some(piece),
        } => format!("{from}{to}, captured {}", piece.char()),
        ClickOutcome::Moved { from, to, .. } => format!("{from}{to}"),
        ClickOutcome::Rejected { from, to } => format!("Illegal move {from}{to}"),
    }
}
