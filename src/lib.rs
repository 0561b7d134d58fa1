pub mod board;
pub mod feedback;
pub mod game;
pub mod request;
pub mod rules;
pub mod session;
pub mod terminal;

pub use board::{Board, Square};
pub use game::{ClickOutcome, GameState};
pub use session::Session;

/// Trait for presenting a game snapshot to the players.
///
/// Abstracts over terminal rendering and any markup-producing front end.
/// The game never depends on an implementation; it only hands out
/// [`GameState`] snapshots and [`feedback::BoardFeedback`].
pub trait BoardView {
    /// Error type for render failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given state, highlighting squares per `feedback`.
    fn render(
        &mut self,
        state: &GameState,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
