//! Terminal-state oracle: decides whether a position is won.
//!
//! Squava is decided by straight lines. Four-in-a-line wins for the color
//! that formed it; a bare three-in-a-line loses, which the oracle reports as
//! a win for the opposite color. Every straight segment of length 3 or 4 on
//! the 5x5 grid passes through one of 9 pivot cells, so the oracle only
//! inspects lines registered against occupied pivots instead of scanning the
//! whole board.

use once_cell::sync::Lazy;

use crate::board::{Board, Side, CELL_COUNT, GRID_SIZE};

/// The 9 cells that together cover every straight segment of length 3 or 4.
const PIVOT_CELLS: [u8; 9] = [2, 7, 10, 11, 12, 13, 14, 17, 22];

/// Line directions: horizontal, vertical, both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Win and loss line groups, bucketed by the pivot cell they are checked
/// from. Built once from board geometry and never mutated.
struct LineTables {
    quads: [Vec<[u8; 4]>; CELL_COUNT],
    triplets: [Vec<[u8; 3]>; CELL_COUNT],
}

static TABLES: Lazy<LineTables> = Lazy::new(build_tables);

fn build_tables() -> LineTables {
    let mut tables = LineTables {
        quads: std::array::from_fn(|_| Vec::new()),
        triplets: std::array::from_fn(|_| Vec::new()),
    };
    for segment in segments(4) {
        let pivot = covering_pivot(&segment);
        tables.quads[pivot as usize].push([segment[0], segment[1], segment[2], segment[3]]);
    }
    for segment in segments(3) {
        let pivot = covering_pivot(&segment);
        tables.triplets[pivot as usize].push([segment[0], segment[1], segment[2]]);
    }
    tables
}

/// Every in-bounds straight segment of `len` cells, one entry per segment.
fn segments(len: usize) -> Vec<Vec<u8>> {
    let span = len as isize - 1;
    let grid = GRID_SIZE as isize;
    let mut out = Vec::new();
    for (dr, dc) in DIRECTIONS {
        for row in 0..grid {
            for col in 0..grid {
                let end_row = row + dr * span;
                let end_col = col + dc * span;
                if !(0..grid).contains(&end_row) || !(0..grid).contains(&end_col) {
                    continue;
                }
                let cells = (0..len as isize)
                    .map(|step| ((row + dr * step) * grid + (col + dc * step)) as u8)
                    .collect();
                out.push(cells);
            }
        }
    }
    out
}

fn covering_pivot(cells: &[u8]) -> u8 {
    cells
        .iter()
        .copied()
        .find(|cell| PIVOT_CELLS.contains(cell))
        .expect("every straight segment of length 3 or 4 crosses a pivot cell")
}

/// Decide the position on `board`.
///
/// Returns the winning side, or `None` while nobody has won. The win scan
/// over all pivots completes before any loss scan begins, so a move that
/// finishes a four and a three at once counts as a win. A full board with
/// `None` is a cat game; that observation is left to the caller.
pub fn winner(board: &Board) -> Option<Side> {
    let tables = &*TABLES;

    for &pivot in &PIVOT_CELLS {
        if board.is_empty_cell(pivot) {
            continue;
        }
        for quad in &tables.quads[pivot as usize] {
            let sum: i8 = quad.iter().map(|&cell| board.mark_at(cell)).sum();
            match sum {
                4 => return Some(Side::First),
                -4 => return Some(Side::Second),
                _ => {}
            }
        }
    }

    for &pivot in &PIVOT_CELLS {
        if board.is_empty_cell(pivot) {
            continue;
        }
        for triplet in &tables.triplets[pivot as usize] {
            let sum: i8 = triplet.iter().map(|&cell| board.mark_at(cell)).sum();
            match sum {
                3 => return Some(Side::Second),
                -3 => return Some(Side::First),
                _ => {}
            }
        }
    }

    None
}
