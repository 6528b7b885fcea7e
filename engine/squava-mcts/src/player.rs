//! Search-backed player.
//!
//! Wraps the engine behind the shared [`Agent`] contract so drivers can play
//! it against humans or other agent implementations without knowing how the
//! move gets picked.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use squava_core::{rules, Agent, AgentError, Board, ChosenMove, MoveError, Side};

use crate::config::SearchConfig;
use crate::search::{self, SearchError};

/// Monte Carlo tree search player. Owns its view of the game board and the
/// RNG feeding the search.
pub struct MctsPlayer {
    board: Board,
    side: Side,
    config: SearchConfig,
    rng: ChaCha20Rng,
}

impl MctsPlayer {
    /// Player for `side` with an entropy-seeded RNG.
    pub fn new(side: Side, config: SearchConfig) -> Self {
        Self {
            board: Board::new(),
            side,
            config,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Player with a fixed RNG seed, for reproducible games.
    pub fn with_seed(side: Side, config: SearchConfig, seed: u64) -> Self {
        Self {
            board: Board::new(),
            side,
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Agent for MctsPlayer {
    fn name(&self) -> &str {
        "mcts"
    }

    fn apply_opponent_move(
        &mut self,
        row: usize,
        col: usize,
        side: Side,
    ) -> Result<(), MoveError> {
        self.board.try_place(row, col, side)
    }

    fn choose_move(&mut self) -> Result<ChosenMove, AgentError> {
        let outcome =
            search::choose_move(self.board, self.side, self.config.clone(), &mut self.rng)
                .map_err(|err| match err {
                    SearchError::PositionDecided { .. } => AgentError::PositionDecided,
                    SearchError::NoLegalMoves => AgentError::NoLegalMoves,
                    SearchError::ZeroBudget => AgentError::InvalidConfig(err.to_string()),
                })?;

        self.board.place(outcome.cell, self.side);
        let (row, col) = Board::coords(outcome.cell);
        Ok(ChosenMove {
            row,
            col,
            scaled_score: (outcome.score * 1000.0).round() as i32,
            iterations: outcome.iterations,
        })
    }

    fn find_winner(&self) -> Option<Side> {
        rules::winner(&self.board)
    }

    fn render(&self) -> String {
        self.board.to_string()
    }
}
