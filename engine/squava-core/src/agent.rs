//! The polymorphic agent contract shared by all Squava players.
//!
//! Driver programs hold a boxed [`Agent`] and pick the concrete
//! implementation once at construction time. The search-backed player lives
//! in its own crate; an alpha-beta player can be supplied from outside
//! against the same trait.

use thiserror::Error;

use crate::board::{MoveError, Side};

/// Errors surfaced through the agent contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error(transparent)]
    Move(#[from] MoveError),

    /// `choose_move` was invoked on a position the oracle already decided.
    #[error("position is already decided")]
    PositionDecided,

    /// `choose_move` was invoked with no empty cell left to play.
    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// A move chosen by an agent, as reported to drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenMove {
    pub row: usize,
    pub col: usize,
    /// Confidence as `round(score * 1000)`, keeping driver output integral.
    pub scaled_score: i32,
    /// Search iterations performed to pick the move.
    pub iterations: u32,
}

/// Something that keeps its own view of a Squava game and can pick moves.
pub trait Agent {
    /// Short identifier for driver output.
    fn name(&self) -> &str;

    /// Record a move made outside this agent: the opponent's reply, or a
    /// driver setting up a position. Does not run any search.
    fn apply_opponent_move(&mut self, row: usize, col: usize, side: Side)
        -> Result<(), MoveError>;

    /// Search the current position, apply the chosen move to the owned
    /// board, and report it.
    fn choose_move(&mut self) -> Result<ChosenMove, AgentError>;

    /// Oracle verdict on the owned board.
    fn find_winner(&self) -> Option<Side>;

    /// Human-readable board, one line per row.
    fn render(&self) -> String;
}
