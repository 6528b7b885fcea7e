//! Rollout move policy.
//!
//! Playouts are not uniformly random: a side that can win on the spot must
//! take the win, and a side with a safe alternative must not complete a bare
//! three-in-a-line. This bias is what keeps playout outcomes informative at
//! Squava's branching factor; pure-random playouts converge far too slowly.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use squava_core::{rules, Board, Side};

/// Candidate moves bucketed by the immediate oracle verdict they produce.
#[derive(Debug, Default)]
pub struct MoveCategories {
    /// Moves that win on the spot for the mover.
    pub wins: Vec<u8>,
    /// Moves that hand the opponent the game, a bare three-in-a-line.
    pub losses: Vec<u8>,
    /// Everything else.
    pub neutral: Vec<u8>,
}

/// Probe every candidate by placing and un-placing `mover`'s mark.
/// The board is returned to its input state.
pub fn categorize_moves(board: &mut Board, candidates: &[u8], mover: Side) -> MoveCategories {
    let mut categories = MoveCategories::default();
    for &cell in candidates {
        board.place(cell, mover);
        let verdict = rules::winner(board);
        board.clear(cell);
        match verdict {
            None => categories.neutral.push(cell),
            Some(side) if side == mover => categories.wins.push(cell),
            Some(_) => categories.losses.push(cell),
        }
    }
    categories
}

/// Pick `mover`'s playout move from `candidates`, which must be non-empty.
///
/// Returns the chosen cell plus the winner that playing it settles:
/// `Some(mover)` for an immediate win, `Some(opponent)` when every candidate
/// loses and the mover is forced, `None` for a neutral continuation. The
/// caller applies the move; the board comes back untouched.
pub fn select_rollout_move(
    board: &mut Board,
    candidates: &[u8],
    mover: Side,
    rng: &mut ChaCha20Rng,
) -> (u8, Option<Side>) {
    debug_assert!(!candidates.is_empty());
    let categories = categorize_moves(board, candidates, mover);

    if !categories.wins.is_empty() {
        let cell = categories.wins[rng.gen_range(0..categories.wins.len())];
        (cell, Some(mover))
    } else if !categories.neutral.is_empty() {
        let cell = categories.neutral[rng.gen_range(0..categories.neutral.len())];
        (cell, None)
    } else {
        let cell = categories.losses[rng.gen_range(0..categories.losses.len())];
        (cell, Some(mover.opponent()))
    }
}
