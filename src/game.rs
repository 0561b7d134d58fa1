use shakmaty::{Color, Piece};

use crate::board::{Board, Cell, FenError, Square, color_of};
use crate::rules;

/// Result of a single click on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An own piece was picked up and now awaits a destination.
    Selected(Square),
    /// Nothing selected and the click did not hit an own piece.
    Ignored,
    /// The selected square was clicked again.
    Deselected(Square),
    /// The selected piece moved; the turn passed to the other side.
    Moved {
        from: Square,
        to: Square,
        captured: Option<Piece>,
    },
    /// The proposed move broke the piece's rules; nothing changed.
    Rejected { from: Square, to: Square },
}

impl ClickOutcome {
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, ClickOutcome::Moved { .. })
    }
}

/// Position, side to move and pending selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    selected: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game in the standard starting position.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::starting(), Color::White)
    }

    pub fn from_board(board: Board, current_player: Color) -> Self {
        Self {
            board,
            current_player,
            selected: None,
        }
    }

    /// Creates a game from the placement and side to move of a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, turn) = Board::from_fen_with_turn(fen)?;
        Ok(Self::from_board(board, turn))
    }

    /// Back to the starting position, white to move, nothing selected.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Cell {
        self.board.piece_at(square)
    }

    /// Whether the side to move may move `from` to `to`.
    #[inline]
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        rules::is_valid_move(&self.board, self.current_player, from, to)
    }

    /// Legal destinations of the currently selected piece.
    pub fn selected_destinations(&self) -> Vec<Square> {
        self.selected
            .map(|from| rules::legal_destinations(&self.board, self.current_player, from))
            .unwrap_or_default()
    }

    /// Advance the selection state machine with a click on `square`.
    ///
    /// Without a selection, a click on an own piece selects it. With a
    /// selection, the click is either a deselect (same square) or a move
    /// attempt. The selection is cleared after every move attempt.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        let Some(from) = self.selected.take() else {
            return self.select(square);
        };

        if from == square {
            log::debug!("deselected {from}");
            return ClickOutcome::Deselected(from);
        }

        if !self.is_valid_move(from, square) {
            log::debug!("rejected {:?} move {from}{square}", self.current_player);
            return ClickOutcome::Rejected { from, to: square };
        }

        let captured = self.apply_move(from, square);
        log::info!(
            "{:?} moved {from}{square}{}",
            self.current_player.other(),
            if captured.is_some() { " (capture)" } else { "" }
        );
        ClickOutcome::Moved {
            from,
            to: square,
            captured,
        }
    }

    /// Drop any pending selection. Used for clicks the boundary rejects.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn select(&mut self, square: Square) -> ClickOutcome {
        if color_of(self.board.piece_at(square)) == Some(self.current_player) {
            log::debug!("selected {square}");
            self.selected = Some(square);
            ClickOutcome::Selected(square)
        } else {
            ClickOutcome::Ignored
        }
    }

    /// Relocate the piece and pass the turn. Returns the captured piece.
    fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.board.piece_at(to);
        self.board.set_piece_at(to, self.board.piece_at(from));
        self.board.set_piece_at(from, None);
        self.current_player = self.current_player.other();
        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Role;
    use test_case::test_case;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square is invalid")
    }

    fn play(state: &mut GameState, clicks: &[&str]) -> Vec<ClickOutcome> {
        clicks.iter().map(|name| state.click(sq(name))).collect()
    }

    #[test]
    fn test_new_game_is_white_to_move() {
        let state = GameState::new();
        assert_eq!(state.current_player(), Color::White);
        assert_eq!(state.selected(), None);
        assert_eq!(state.board(), &Board::starting());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new();
        play(&mut state, &["e2", "e4", "d7", "d5", "g1"]);

        state.reset();
        assert_eq!(state, GameState::new());
        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_reset_from_loaded_position() {
        let mut state = GameState::from_fen("8/8/8/3k4/8/8/8/4K3 b - - 0 1").unwrap();
        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_select_own_piece() {
        let mut state = GameState::new();
        assert_eq!(state.click(sq("e2")), ClickOutcome::Selected(sq("e2")));
        assert_eq!(state.selected(), Some(sq("e2")));
    }

    #[test_case("e7"; "opponent piece")]
    #[test_case("e4"; "empty square")]
    fn test_select_ignored(square: &str) {
        let mut state = GameState::new();
        assert_eq!(state.click(sq(square)), ClickOutcome::Ignored);
        assert_eq!(state.selected(), None);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_same_square_deselects() {
        let mut state = GameState::new();
        let outcomes = play(&mut state, &["e2", "e2"]);

        assert_eq!(outcomes[1], ClickOutcome::Deselected(sq("e2")));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_legal_move_applies_and_toggles_turn() {
        let mut state = GameState::new();
        let outcomes = play(&mut state, &["e2", "e4"]);

        assert_eq!(
            outcomes[1],
            ClickOutcome::Moved {
                from: sq("e2"),
                to: sq("e4"),
                captured: None
            }
        );
        assert_eq!(state.piece_at(sq("e4")), Some(Role::Pawn.of(Color::White)));
        assert_eq!(state.piece_at(sq("e2")), None);
        assert_eq!(state.current_player(), Color::Black);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_illegal_move_leaves_board() {
        let mut state = GameState::new();
        let outcomes = play(&mut state, &["e2", "e5"]);

        assert_eq!(
            outcomes[1],
            ClickOutcome::Rejected {
                from: sq("e2"),
                to: sq("e5")
            }
        );
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_click_on_own_piece_while_selected_is_rejected_not_reselected() {
        let mut state = GameState::new();
        let outcomes = play(&mut state, &["e2", "d2"]);

        assert_eq!(
            outcomes[1],
            ClickOutcome::Rejected {
                from: sq("e2"),
                to: sq("d2")
            }
        );
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_capture_reports_captured_piece() {
        let mut state =
            GameState::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        let outcomes = play(&mut state, &["e4", "d5"]);

        assert_eq!(
            outcomes[1],
            ClickOutcome::Moved {
                from: sq("e4"),
                to: sq("d5"),
                captured: Some(Role::Pawn.of(Color::Black)),
            }
        );
        assert_eq!(state.piece_at(sq("d5")), Some(Role::Pawn.of(Color::White)));
    }

    #[test]
    fn test_turn_toggles_once_per_move_only() {
        let mut state = GameState::new();
        let clicks = [
            "e2", "e4", // move
            "e7", "e5", // move
            "g1", "g1", // deselect
            "g1", "g4", // rejected
            "g1", "f3", // move
        ];
        let outcomes = play(&mut state, &clicks);

        let moves = outcomes.iter().filter(|o| o.is_move()).count();
        assert_eq!(moves, 3);
        assert_eq!(state.current_player(), Color::Black);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_selection_always_cleared_after_attempt() {
        for second in ["e3", "e4", "e5", "e2", "d1", "h8"] {
            let mut state = GameState::new();
            play(&mut state, &["e2", second]);
            assert_eq!(state.selected(), None, "after e2 then {second}");
        }
    }

    #[test]
    fn test_selected_destinations() {
        let mut state = GameState::new();
        assert!(state.selected_destinations().is_empty());

        state.click(sq("g1"));
        let mut destinations = state.selected_destinations();
        destinations.sort();
        let mut expected = vec![sq("f3"), sq("h3")];
        expected.sort();
        assert_eq!(destinations, expected);
    }
}
