use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::{FenError, Square};
use crate::game::{ClickOutcome, GameState};
use crate::request::Request;

/// Shared handle to the single live game.
///
/// Cloning is cheap and every clone refers to the same game. Each operation
/// takes the lock once and holds it for one complete state transition, so
/// concurrent callers observe selects, moves and resets as atomic steps.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<Mutex<GameState>>,
}

impl Session {
    /// Starts a session in the standard starting position.
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        GameState::from_fen(fen).map(Self::from_state)
    }

    /// Select or move, returning what happened and the resulting state.
    pub fn click(&self, square: Square) -> (ClickOutcome, GameState) {
        let mut state = self.lock();
        let outcome = state.click(square);
        (outcome, state.clone())
    }

    /// Back to the starting position.
    pub fn reset(&self) -> GameState {
        let mut state = self.lock();
        state.reset();
        log::info!("game reset");
        state.clone()
    }

    /// Current state without mutation.
    pub fn snapshot(&self) -> GameState {
        self.lock().clone()
    }

    /// Replace the game with another position, e.g. one loaded from FEN.
    pub fn load(&self, new_state: GameState) -> GameState {
        let mut state = self.lock();
        *state = new_state;
        state.clone()
    }

    /// Apply one parsed request and return the state to render.
    ///
    /// Out-of-range clicks count as a rejected move attempt: the selection
    /// is dropped and the board is left alone.
    pub fn handle(&self, request: Request) -> GameState {
        match request {
            Request::Click(square) => self.click(square).1,
            Request::ClickOutOfRange { row, col } => {
                let mut state = self.lock();
                log::warn!("click outside the board at ({row}, {col})");
                state.clear_selection();
                state.clone()
            }
            Request::Reset => self.reset(),
            Request::Read => self.snapshot(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        // Transitions never leave a half-applied move behind.
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!("recovering game state from poisoned lock");
            poisoned.into_inner()
        })
    }
}
