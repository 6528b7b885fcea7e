//! Monte Carlo Tree Search for Squava.
//!
//! This crate chooses Squava moves with a plain MCTS: no position evaluator,
//! just policy-biased random playouts scored by the terminal oracle from
//! `squava-core`.
//!
//! # Overview
//!
//! Each search builds a fresh tree rooted at the current position and repeats
//! four phases for a fixed iteration budget:
//!
//! 1. **Selection**: descend from the root along highest-score children
//!    while the current node has no untried moves left
//! 2. **Expansion**: materialize one untried move, chosen uniformly at
//!    random, and cache the oracle's verdict on the new position
//! 3. **Simulation**: play the position out with the rollout policy until it
//!    is decided or the board fills up
//! 4. **Backpropagation**: credit every node on the path with a visit, and
//!    with a win when the searching side won the playout
//!
//! Statistics are uniformly from the searching side's perspective across the
//! whole tree, and the final move is the root child with the highest win
//! rate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use squava_core::{Board, Side};
//! use squava_mcts::{choose_move, SearchConfig};
//!
//! let board = Board::new();
//! let config = SearchConfig::default().with_iterations(10_000);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let outcome = choose_move(board, Side::First, config, &mut rng)?;
//! println!("play cell {} (win rate {:.3})", outcome.cell, outcome.score);
//! ```
//!
//! # Architecture
//!
//! ```text
//! +---------------------------------------------------------+
//! |                         Search                          |
//! +---------------------------------------------------------+
//! |  +--------------+  +--------------+  +---------------+  |
//! |  |  SearchTree  |  |    Board     |  | RolloutPolicy |  |
//! |  |   (arena)    |  | (work copy)  |  |  (playouts)   |  |
//! |  +------+-------+  +------+-------+  +-------+-------+  |
//! |         |                 |                  |          |
//! |         v                 v                  v          |
//! |  +---------------------------------------------------+  |
//! |  |   select -> expand -> simulate -> backpropagate   |  |
//! |  +---------------------------------------------------+  |
//! +---------------------------------------------------------+
//! ```

pub mod config;
pub mod node;
pub mod player;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use player::MctsPlayer;
pub use rollout::{categorize_moves, select_rollout_move, MoveCategories};
pub use search::{choose_move, Search, SearchError, SearchOutcome};
pub use tree::{SearchTree, TreeStats};
