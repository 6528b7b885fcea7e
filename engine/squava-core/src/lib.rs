//! Core Squava types: board storage, the terminal-state oracle, and the
//! polymorphic agent contract.
//!
//! Squava is played on a 5x5 grid. A color wins by placing four marks in a
//! straight line and loses by placing exactly three in a line without a
//! redeeming four. This crate holds the pieces every player implementation
//! needs:
//!
//! - [`Board`]: a flat 25-cell grid with checked and unchecked move
//!   application
//! - [`rules::winner`]: the win/loss oracle built on precomputed line tables
//! - [`Agent`]: the contract driver programs hold players through
//!
//! Search engines live elsewhere; this crate has no opinion on how a move
//! gets chosen.

pub mod agent;
pub mod board;
pub mod rules;

pub use agent::{Agent, AgentError, ChosenMove};
pub use board::{Board, MoveError, Side, CELL_COUNT, GRID_SIZE};
