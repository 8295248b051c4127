use std::cmp::Ordering;
use std::collections::HashSet;

use crate::common::Position;
use crate::maze::Maze;

/// Candidate order for every expansion: up, right, left, down.
pub(super) const OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, 1), (0, -1), (1, 0)];

/// Single-direction neighbor expansion: in-bounds, passable cells not
/// yet in the visited set, in the fixed candidate order.
pub(super) fn neighbors(maze: &Maze, cell: Position, visited: &HashSet<Position>) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(4);
    for (row_offset, col_offset) in OFFSETS {
        let row = cell.0 as isize + row_offset;
        let col = cell.1 as isize + col_offset;
        if row < 0 || col < 0 {
            continue;
        }
        let neighbor = (row as usize, col as usize);
        if visited.contains(&neighbor) || !maze.is_passable(neighbor) {
            continue;
        }
        candidates.push(neighbor);
    }
    candidates
}

/// Frontier entry: a candidate cell with its ordering score. The
/// sequence number is assigned at push time and breaks score ties in
/// insertion order, so equal float scores never depend on heap
/// internals (and never fail to compare).
#[derive(Debug, Clone)]
pub(super) struct FrontierEntry {
    pub(super) score: f64,
    pub(super) seq: u64,
    pub(super) position: Position,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted for min-heap behavior: lowest score pops first,
        // then earliest insertion.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Straight-line distance between two cells.
pub(super) fn euclidean(a: Position, b: Position) -> f64 {
    let dr = a.0 as f64 - b.0 as f64;
    let dc = a.1 as f64 - b.1 as f64;
    (dr * dr + dc * dc).sqrt()
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn test_frontier_pops_lowest_score_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            score: 3.5,
            seq: 0,
            position: (0, 0),
        });
        heap.push(FrontierEntry {
            score: 1.5,
            seq: 1,
            position: (1, 1),
        });
        heap.push(FrontierEntry {
            score: 2.5,
            seq: 2,
            position: (2, 2),
        });
        assert_eq!(heap.pop().unwrap().position, (1, 1));
        assert_eq!(heap.pop().unwrap().position, (2, 2));
        assert_eq!(heap.pop().unwrap().position, (0, 0));
    }

    #[test]
    fn test_frontier_ties_break_by_insertion_order() {
        let mut heap = BinaryHeap::new();
        for (seq, position) in [(0, (5, 0)), (1, (5, 1)), (2, (5, 2))] {
            heap.push(FrontierEntry {
                score: 2.0,
                seq,
                position,
            });
        }
        assert_eq!(heap.pop().unwrap().position, (5, 0));
        assert_eq!(heap.pop().unwrap().position, (5, 1));
        assert_eq!(heap.pop().unwrap().position, (5, 2));
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean((0, 0), (3, 4)), 5.0);
        assert_eq!(euclidean((2, 2), (2, 2)), 0.0);
    }

    #[test]
    fn test_neighbors_order_and_filtering() {
        let maze = Maze::from_lines(&["---", "-#-", "---"]).unwrap();
        let mut visited = HashSet::new();

        // Center is a wall, left side is the grid edge.
        assert_eq!(neighbors(&maze, (1, 0), &visited), vec![(0, 0), (2, 0)]);

        visited.insert((0, 0));
        assert_eq!(neighbors(&maze, (0, 1), &visited), vec![(0, 2)]);
    }

    #[test]
    fn test_neighbors_at_corner() {
        let maze = Maze::from_lines(&["---", "---", "---"]).unwrap();
        let visited = HashSet::new();
        assert_eq!(neighbors(&maze, (0, 0), &visited), vec![(0, 1), (1, 0)]);
        assert_eq!(neighbors(&maze, (2, 2), &visited), vec![(1, 2), (2, 1)]);
    }
}
