use std::collections::VecDeque;

use thiserror::Error;

use crate::board::Square;
use crate::game::ClickOutcome;
use crate::session::Session;

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ScriptError(String);

/// A queue of scripted clicks.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ClickScript {
    pending: VecDeque<Square>,
}

impl ClickScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional clicks.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1")
    /// - Whitespace and periods separate squares and are otherwise ignored
    ///
    /// Examples:
    /// - `"e2e4"` - Click e2, then e4
    /// - `"e2 e4. d7 d5."` - Two moves
    ///
    /// On error nothing is queued.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let clicks = parse_script(script)?;
        self.pending.extend(clicks);
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Next pending click, if any.
    pub fn next_click(&mut self) -> Option<Square> {
        self.pending.pop_front()
    }

    /// Play every pending click against the session, in order.
    pub fn drain_into(&mut self, session: &Session) -> Vec<ClickOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some(square) = self.next_click() {
            outcomes.push(session.click(square).0);
        }
        outcomes
    }
}

/// Parse a script string into clicks.
fn parse_script(script: &str) -> Result<Vec<Square>, ScriptError> {
    let mut clicks = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            c if c == '.' || c.is_whitespace() => {
                flush_token(&mut current_token, &mut clicks)?;
            }
            _ => {
                current_token.push(ch);

                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut clicks)?;
                }
            }
        }
    }

    flush_token(&mut current_token, &mut clicks)?;
    Ok(clicks)
}

/// Add current token to the clicks and clear it.
fn flush_token(token: &mut String, clicks: &mut Vec<Square>) -> Result<(), ScriptError> {
    if !token.is_empty() {
        let square: Square = token.parse().map_err(|_| ScriptError(token.clone()))?;
        clicks.push(square);
        token.clear();
    }
    Ok(())
}
