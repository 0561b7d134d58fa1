//! Per-piece move legality.
//!
//! Only the movement shape, obstruction and capture rules of each piece are
//! enforced. Checks, castling, en passant and promotion are not modelled.

use shakmaty::{Color, Role};

use crate::board::{Board, Square, color_of};

/// Decide whether `mover` may move the piece on `from` to `to`.
///
/// `from` is expected to hold one of `mover`'s pieces. An empty origin is
/// never legal. A destination holding one of `mover`'s own pieces is
/// rejected before the piece rule is consulted.
pub fn is_valid_move(board: &Board, mover: Color, from: Square, to: Square) -> bool {
    if color_of(board.piece_at(to)) == Some(mover) {
        return false;
    }

    let Some(piece) = board.piece_at(from) else {
        return false;
    };

    let delta = Delta::between(from, to);
    match piece.role {
        Role::Pawn => is_valid_pawn_move(board, mover, from, to),
        Role::Rook => delta.is_straight() && is_path_clear(board, from, to),
        Role::Knight => delta.is_knight_jump(),
        Role::Bishop => delta.is_diagonal() && is_path_clear(board, from, to),
        Role::Queen => {
            (delta.is_straight() || delta.is_diagonal()) && is_path_clear(board, from, to)
        }
        Role::King => delta.is_adjacent(),
    }
}

/// Every square the piece on `from` may legally move to, excluding `from`.
pub fn legal_destinations(board: &Board, mover: Color, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| to != from && is_valid_move(board, mover, from, to))
        .collect()
}

/// Signed row/column distance from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Delta {
    rows: i8,
    cols: i8,
}

impl Delta {
    fn between(from: Square, to: Square) -> Self {
        Self {
            rows: to.row() as i8 - from.row() as i8,
            cols: to.col() as i8 - from.col() as i8,
        }
    }

    /// Same row or same column. The zero move counts; the path check
    /// downstream accepts it, callers intercept it as a deselect.
    fn is_straight(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    fn is_diagonal(self) -> bool {
        self.rows != 0 && self.rows.abs() == self.cols.abs()
    }

    fn is_knight_jump(self) -> bool {
        matches!((self.rows.abs(), self.cols.abs()), (2, 1) | (1, 2))
    }

    fn is_adjacent(self) -> bool {
        self.rows.abs() <= 1 && self.cols.abs() <= 1
    }
}

/// Row of the pawn's home rank and its forward step.
fn pawn_geometry(color: Color) -> (u8, i8) {
    match color {
        Color::White => (6, -1),
        Color::Black => (1, 1),
    }
}

fn is_valid_pawn_move(board: &Board, mover: Color, from: Square, to: Square) -> bool {
    let (home_row, forward) = pawn_geometry(mover);
    let delta = Delta::between(from, to);
    let target_empty = board.is_empty_at(to);

    // Single advance
    if delta.cols == 0 && delta.rows == forward && target_empty {
        return true;
    }

    // Double advance from the home row, both squares empty
    if delta.cols == 0 && delta.rows == 2 * forward && from.row() == home_row && target_empty {
        return from
            .offset(forward, 0)
            .is_some_and(|between| board.is_empty_at(between));
    }

    // Diagonal capture; own pieces were already excluded
    delta.cols.abs() == 1 && delta.rows == forward && !target_empty
}

/// True when no square strictly between `from` and `to` is occupied.
///
/// Walks one unit step at a time along the line joining the two squares.
/// Adjacent squares have nothing in between and always pass.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let delta = Delta::between(from, to);
    let (step_row, step_col) = (delta.rows.signum(), delta.cols.signum());

    let mut current = from;
    loop {
        let Some(next) = current.offset(step_row, step_col) else {
            return true;
        };
        if next == to || next == from {
            return true;
        }
        if !board.is_empty_at(next) {
            return false;
        }
        current = next;
    }
}
