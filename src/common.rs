use std::collections::HashSet;

use crate::maze::Maze;

/// (row, column) cell coordinate. Identity key for visited sets,
/// parent maps and frontier entries.
pub type Position = (usize, usize);

/// Which root a frontier grows from: `Forward` from the start cell,
/// `Backward` from the end cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A successful search result: the ordered path from start to end
/// (inclusive) plus the exploration footprint.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Vec<Position>,
    pub visited: HashSet<Position>,
}

impl Solution {
    /// Checks that the path starts and ends where it should, visits only
    /// passable cells, moves only between orthogonally adjacent cells and
    /// never repeats a cell.
    pub fn verify(&self, maze: &Maze, start: Position, end: Position) -> bool {
        if self.path.first() != Some(&start) || self.path.last() != Some(&end) {
            return false;
        }
        let mut seen = HashSet::new();
        for &pos in &self.path {
            if !seen.insert(pos) {
                return false;
            }
        }
        for window in self.path.windows(2) {
            let (r0, c0) = window[0];
            let (r1, c1) = window[1];
            if r0.abs_diff(r1) + c0.abs_diff(c1) != 1 {
                return false;
            }
        }
        self.path.iter().all(|&pos| maze.is_passable(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_maze() -> Maze {
        Maze::from_lines(&["---", "---", "---"]).unwrap()
    }

    #[test]
    fn test_verify_accepts_valid_path() {
        let solution = Solution {
            path: vec![(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)],
            visited: HashSet::new(),
        };
        assert!(solution.verify(&open_maze(), (0, 0), (2, 2)));
    }

    #[test]
    fn test_verify_rejects_diagonal_step() {
        let solution = Solution {
            path: vec![(0, 0), (1, 1), (2, 2)],
            visited: HashSet::new(),
        };
        assert!(!solution.verify(&open_maze(), (0, 0), (2, 2)));
    }

    #[test]
    fn test_verify_rejects_repeated_cell() {
        let solution = Solution {
            path: vec![(0, 0), (0, 1), (0, 0), (1, 0), (1, 1), (2, 1), (2, 2)],
            visited: HashSet::new(),
        };
        assert!(!solution.verify(&open_maze(), (0, 0), (2, 2)));
    }

    #[test]
    fn test_verify_single_cell_path() {
        let solution = Solution {
            path: vec![(1, 1)],
            visited: HashSet::new(),
        };
        assert!(solution.verify(&open_maze(), (1, 1), (1, 1)));
    }
}
