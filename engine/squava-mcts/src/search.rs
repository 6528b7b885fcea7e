//! The Monte Carlo tree search engine.
//!
//! Implements the four-phase MCTS loop over a fresh tree per search:
//! 1. Selection: descend along highest-score children while the current
//!    node has nothing left to expand
//! 2. Expansion: materialize one untried move, chosen uniformly at random,
//!    and cache the oracle's verdict on the new position
//! 3. Simulation: policy-biased playout to a decided position or a full
//!    board
//! 4. Backpropagation: update visit and win counts along the path
//!
//! Wins are counted for the searching side at every node, so the final
//! selection is simply the root child with the highest win rate, ties going
//! to the earliest-expanded child.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use squava_core::{rules, Board, Side};

use crate::config::SearchConfig;
use crate::rollout;
use crate::tree::SearchTree;

/// Errors raised before the search loop runs. Masking them would corrupt the
/// tree's untried-move bookkeeping, so they fail the call instead. The loop
/// itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The input position already has a winner.
    #[error("position is already decided in favor of {winner:?}")]
    PositionDecided { winner: Side },

    /// The input board has no empty cell left.
    #[error("no legal moves remain")]
    NoLegalMoves,

    /// The configured iteration budget is zero.
    #[error("iteration budget must be positive")]
    ZeroBudget,
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Recommended cell index.
    pub cell: u8,

    /// Win-rate estimate of the recommended move, in [0, 1].
    pub score: f64,

    /// Iterations actually performed.
    pub iterations: u32,
}

/// One search over one position. Owns the tree; the root board seeds the
/// working copy each iteration.
pub struct Search {
    tree: SearchTree,
    root_board: Board,
    searcher: Side,
    config: SearchConfig,
}

impl Search {
    /// Validate the position and set up the tree. The root carries the
    /// opponent as mover, so the root's children are the searcher's
    /// candidate moves.
    pub fn new(board: Board, searcher: Side, config: SearchConfig) -> Result<Self, SearchError> {
        if config.iterations == 0 {
            return Err(SearchError::ZeroBudget);
        }
        if let Some(winner) = rules::winner(&board) {
            return Err(SearchError::PositionDecided { winner });
        }
        let untried = board.legal_moves();
        if untried.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let tree = SearchTree::new(searcher.opponent(), untried);
        Ok(Self {
            tree,
            root_board: board,
            searcher,
            config,
        })
    }

    /// Run the full iteration budget and pick the best root child.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchOutcome, SearchError> {
        for _ in 0..self.config.iterations {
            self.simulate(rng);
        }

        let root_id = self.tree.root();
        let root = self.tree.get(root_id);
        debug!(
            wins = root.wins,
            visits = root.visits,
            score = root.score(),
            nodes = self.tree.len(),
            "search finished"
        );
        for &child_id in &root.children {
            let child = self.tree.get(child_id);
            trace!(
                cell = ?child.cell,
                wins = child.wins,
                visits = child.visits,
                score = child.score(),
                "root child"
            );
        }

        let best_id = self
            .tree
            .select_child(root_id)
            .ok_or(SearchError::NoLegalMoves)?;
        let best = self.tree.get(best_id);
        let Some(cell) = best.cell else {
            return Err(SearchError::NoLegalMoves);
        };

        Ok(SearchOutcome {
            cell,
            score: best.score(),
            iterations: self.config.iterations,
        })
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// One selection -> expansion -> simulation -> backpropagation cycle.
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        let mut board = self.root_board;
        let mut node_id = self.tree.root();

        // Selection: follow best children while the node is fully expanded.
        loop {
            let node = self.tree.get(node_id);
            if node.has_untried() || node.children.is_empty() {
                break;
            }
            let Some(child_id) = self.tree.select_child(node_id) else {
                break;
            };
            let child = self.tree.get(child_id);
            if let Some(cell) = child.cell {
                board.place(cell, child.mover);
            }
            node_id = child_id;
        }

        // A node's position never changes, so the verdict cached at its
        // creation is authoritative; the root was validated undecided.
        let mut winner = self.tree.get(node_id).winner;

        // Expansion: materialize one untried move at random and ask the
        // oracle about the new position right away.
        if winner.is_none() && self.tree.get(node_id).has_untried() {
            let node = self.tree.get(node_id);
            let cell = node.untried[rng.gen_range(0..node.untried.len())];
            let mover = node.mover.opponent();

            board.place(cell, mover);
            winner = rules::winner(&board);
            let untried = board.legal_moves();
            node_id = self.tree.add_child(node_id, cell, mover, untried, winner);
        }

        // Simulation: policy-biased playout until somebody wins or the
        // board fills up.
        if winner.is_none() {
            let mut moves = board.legal_moves();
            let mut mover = self.tree.get(node_id).mover;
            while !moves.is_empty() {
                let next = mover.opponent();
                let (cell, outcome) =
                    rollout::select_rollout_move(&mut board, &moves, next, rng);
                board.place(cell, next);
                if let Some(pos) = moves.iter().position(|&m| m == cell) {
                    moves.swap_remove(pos);
                }
                mover = next;
                if outcome.is_some() {
                    winner = outcome;
                    break;
                }
            }
        }

        // Backpropagation: credit the whole path with the searching side's
        // outcome.
        self.tree.backpropagate(node_id, winner == Some(self.searcher));
    }
}

/// Run a single search for `searcher` on `board`.
pub fn choose_move(
    board: Board,
    searcher: Side,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchOutcome, SearchError> {
    let mut search = Search::new(board, searcher, config)?;
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use rand::SeedableRng;
    use squava_core::CELL_COUNT;

    /// Position with First to move where cell 2 completes the quad 0..=3 and
    /// both other empty cells (11, 13) complete a bare First triplet. All
    /// three root children are terminal at expansion, so the search outcome
    /// is independent of the RNG.
    fn forced_win_board() -> Board {
        let mut board = Board::new();
        for cell in [0, 1, 3, 7, 10, 12, 14, 16, 18, 21, 23] {
            board.place(cell, Side::First);
        }
        for cell in [4, 5, 6, 8, 9, 15, 17, 19, 20, 22, 24] {
            board.place(cell, Side::Second);
        }
        board
    }

    #[test]
    fn forced_win_board_is_live() {
        let board = forced_win_board();
        assert_eq!(rules::winner(&board), None);
        assert_eq!(board.legal_moves(), vec![2, 11, 13]);
    }

    #[test]
    fn search_returns_a_legal_move_with_sane_score() {
        let config = SearchConfig::for_testing();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let outcome = choose_move(Board::new(), Side::First, config, &mut rng).unwrap();

        assert!((outcome.cell as usize) < CELL_COUNT);
        assert!(Board::new().is_empty_cell(outcome.cell));
        assert!(outcome.score >= 0.0 && outcome.score <= 1.0);
        assert_eq!(outcome.iterations, 200);
    }

    #[test]
    fn search_respects_iteration_budget() {
        let config = SearchConfig::for_testing().with_iterations(137);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let mut search = Search::new(Board::new(), Side::First, config).unwrap();
        let outcome = search.run(&mut rng).unwrap();

        assert_eq!(outcome.iterations, 137);
        // Every iteration backpropagates through the root exactly once.
        let root = search.tree().get(search.tree().root());
        assert_eq!(root.visits, 137.0);
    }

    #[test]
    fn search_takes_the_winning_move() {
        // All three children are terminal: the winning one holds score 1.0
        // forever, the two self-loss moves hold 0.0.
        let config = SearchConfig::for_testing().with_iterations(50);
        for seed in 0..8 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let outcome = choose_move(forced_win_board(), Side::First, config.clone(), &mut rng)
                .unwrap();
            assert_eq!(outcome.cell, 2, "seed {}", seed);
            assert!((outcome.score - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn expansion_caches_terminal_verdicts() {
        let config = SearchConfig::for_testing().with_iterations(50);
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let mut search = Search::new(forced_win_board(), Side::First, config).unwrap();
        search.run(&mut rng).unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 3);
        assert!(!root.has_untried());
        for &child_id in &root.children {
            let child = tree.get(child_id);
            match child.cell {
                Some(2) => assert_eq!(child.winner, Some(Side::First)),
                Some(11) | Some(13) => assert_eq!(child.winner, Some(Side::Second)),
                other => panic!("unexpected child cell {:?}", other),
            }
        }
    }

    #[test]
    fn search_rejects_decided_position() {
        let mut board = Board::new();
        for cell in [0, 1, 2, 3] {
            board.place(cell, Side::First);
        }

        let result = Search::new(board, Side::Second, SearchConfig::for_testing());
        assert_eq!(
            result.err(),
            Some(SearchError::PositionDecided {
                winner: Side::First
            })
        );
    }

    #[test]
    fn search_rejects_zero_budget() {
        let config = SearchConfig::for_testing().with_iterations(0);
        let result = Search::new(Board::new(), Side::First, config);
        assert_eq!(result.err(), Some(SearchError::ZeroBudget));
    }

    #[test]
    fn search_is_deterministic_under_a_fixed_seed() {
        let mut board = Board::new();
        board.place(12, Side::First);
        board.place(6, Side::Second);

        let config = SearchConfig::for_testing().with_iterations(400);
        let mut first_rng = ChaCha20Rng::seed_from_u64(99);
        let mut second_rng = ChaCha20Rng::seed_from_u64(99);

        let a = choose_move(board, Side::First, config.clone(), &mut first_rng).unwrap();
        let b = choose_move(board, Side::First, config, &mut second_rng).unwrap();

        assert_eq!(a.cell, b.cell);
        assert_eq!(a.score, b.score);
    }

    /// Replay the board at every node and check that its legal moves are
    /// exactly the node's untried list plus its children's moves, with no
    /// duplicates.
    fn check_move_conservation(tree: &SearchTree, id: NodeId, board: &mut Board) {
        let node = tree.get(id);

        let mut discovered: Vec<u8> = node.untried.clone();
        for &child_id in &node.children {
            if let Some(cell) = tree.get(child_id).cell {
                discovered.push(cell);
            }
        }
        discovered.sort_unstable();
        let mut deduped = discovered.clone();
        deduped.dedup();
        assert_eq!(discovered, deduped, "duplicated move at node {:?}", id);
        assert_eq!(discovered, board.legal_moves(), "lost move at node {:?}", id);

        for &child_id in &node.children {
            let child = tree.get(child_id);
            if let Some(cell) = child.cell {
                board.place(cell, child.mover);
                check_move_conservation(tree, child_id, board);
                board.clear(cell);
            }
        }
    }

    #[test]
    fn moves_are_conserved_across_the_tree() {
        let mut board = Board::new();
        board.place(12, Side::First);
        board.place(6, Side::Second);
        board.place(8, Side::First);
        board.place(18, Side::Second);

        let config = SearchConfig::for_testing().with_iterations(500);
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut search = Search::new(board, Side::First, config).unwrap();
        search.run(&mut rng).unwrap();

        let mut replay = board;
        check_move_conservation(search.tree(), search.tree().root(), &mut replay);
    }

    fn check_statistics(tree: &SearchTree, id: NodeId) {
        let node = tree.get(id);
        assert!(node.wins >= 0.0);
        assert!(node.wins <= node.visits);
        if node.visits > 0.0 {
            assert!((node.score() - node.wins / node.visits).abs() < 1e-12);
        } else {
            assert_eq!(node.score(), 0.0);
        }

        let child_visits: f64 = node
            .children
            .iter()
            .map(|&child_id| tree.get(child_id).visits)
            .sum();
        assert!(
            node.visits >= child_visits,
            "node {:?} visits {} < children {}",
            id,
            node.visits,
            child_visits
        );

        for &child_id in &node.children {
            check_statistics(tree, child_id);
        }
    }

    #[test]
    fn statistics_stay_consistent_after_backpropagation() {
        let config = SearchConfig::for_testing().with_iterations(300);
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut search = Search::new(Board::new(), Side::First, config).unwrap();
        search.run(&mut rng).unwrap();

        check_statistics(search.tree(), search.tree().root());
        // Tree depth is bounded by the number of cells.
        assert!(search.tree().stats().max_depth <= CELL_COUNT as u32);
    }
}
