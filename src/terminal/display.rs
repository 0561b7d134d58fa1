use std::io::{self, Write};

use shakmaty::{Color, Piece, Role};

use crate::BoardView;
use crate::board::{BOARD_SIZE, Square};
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game::GameState;

/// Terminal-based board display for development and testing.
///
/// Renders the board as an 8×8 grid of piece glyphs with ANSI color-coded
/// highlights for the selected piece and its destinations.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardView for TerminalDisplay {
    type Error = DisplayError;

    fn render(&mut self, state: &GameState, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), state, feedback)
    }
}

/// Render the board to any writer. Extracted for testability.
pub(crate) fn render_board(
    w: &mut impl Write,
    state: &GameState,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for square in Square::all() {
        if square.col() == 0 {
            write!(w, " {} ", BOARD_SIZE - square.row())?;
        }
        let glyph = piece_glyph(state.piece_at(square));
        write!(w, "{}", format_square(glyph, feedback.get(square)))?;
        if square.col() == BOARD_SIZE - 1 {
            writeln!(w)?;
        }
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w, "{} to move", color_name(state.current_player()))?;
    w.flush()?;
    Ok(())
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn piece_glyph(cell: Option<Piece>) -> char {
    let Some(piece) = cell else {
        return '·';
    };
    match (piece.role, piece.color) {
        (Role::Pawn, Color::White) => '♙',
        (Role::Rook, Color::White) => '♖',
        (Role::Knight, Color::White) => '♘',
        (Role::Bishop, Color::White) => '♗',
        (Role::Queen, Color::White) => '♕',
        (Role::King, Color::White) => '♔',
        (Role::Pawn, Color::Black) => '♟',
        (Role::Rook, Color::Black) => '♜',
        (Role::Knight, Color::Black) => '♞',
        (Role::Bishop, Color::Black) => '♝',
        (Role::Queen, Color::Black) => '♛',
        (Role::King, Color::Black) => '♚',
    }
}

/// Wrap a glyph in the ANSI background for its feedback.
fn format_square(glyph: char, feedback: Option<SquareFeedback>) -> String {
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {glyph} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {glyph} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {glyph} \x1b[0m"),
        None => format!(" {glyph} "),
    }
}
