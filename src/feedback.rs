use crate::board::Square;
use crate::game::GameState;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece may move here
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
}

/// Squares to highlight and how.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by any
/// presentation layer (terminal, HTML) to show where the selected piece may
/// go. It is the only thing the renderer needs beyond the board itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Compute highlights for the current selection.
///
/// Nothing selected gives no feedback. Otherwise the selected square is the
/// origin and each legal destination is marked as a plain destination or a
/// capture.
pub fn compute_feedback(state: &GameState) -> BoardFeedback {
    let Some(from) = state.selected() else {
        return BoardFeedback::default();
    };

    std::iter::once((from, SquareFeedback::Origin))
        .chain(
            state
                .selected_destinations()
                .into_iter()
                .map(|to| classify_destination(state, to)),
        )
        .collect::<Vec<_>>()
        .into()
}

/// Classify a destination as either a capture or regular destination
fn classify_destination(state: &GameState, to: Square) -> (Square, SquareFeedback) {
    if state.piece_at(to).is_some() {
        (to, SquareFeedback::Capture)
    } else {
        (to, SquareFeedback::Destination)
    }
}
