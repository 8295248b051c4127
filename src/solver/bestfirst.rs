use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use anyhow::Result;
use tracing::instrument;

use super::common::{euclidean, neighbors, FrontierEntry};
use super::{validate_endpoints, Solver};
use crate::common::{Position, Solution};
use crate::maze::Maze;
use crate::stat::Stats;

/// Single-direction best-first baseline: one frontier ordered by
/// step-count plus straight-line distance to the goal, terminating when
/// the goal is popped.
pub struct BestFirst {
    start: Position,
    end: Position,
    stats: Stats,
}

impl BestFirst {
    pub fn new(start: Position, end: Position) -> Self {
        BestFirst {
            start,
            end,
            stats: Stats::default(),
        }
    }
}

impl Solver for BestFirst {
    #[instrument(skip_all, name = "best_first", fields(start = ?self.start, end = ?self.end), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Result<Option<Solution>> {
        let begin = Instant::now();
        validate_endpoints(maze, self.start, self.end)?;

        let mut open = BinaryHeap::new();
        let mut visited = HashSet::from([self.start]);
        let mut parents: HashMap<Position, Option<Position>> =
            HashMap::from([(self.start, None)]);
        let mut steps = 0usize;
        let mut next_seq = 0u64;

        open.push(FrontierEntry {
            score: euclidean(self.start, self.end),
            seq: next_seq,
            position: self.start,
        });

        while let Some(entry) = open.pop() {
            let current = entry.position;
            if current == self.end {
                let path = construct_path(&parents, current);
                self.stats
                    .record(steps, visited.len(), path.len(), begin.elapsed());
                return Ok(Some(Solution { path, visited }));
            }

            steps += 1;
            for neighbor in neighbors(maze, current, &visited) {
                next_seq += 1;
                open.push(FrontierEntry {
                    score: steps as f64 + euclidean(neighbor, self.end),
                    seq: next_seq,
                    position: neighbor,
                });
                visited.insert(neighbor);
                parents.entry(neighbor).or_insert(Some(current));
            }
        }

        self.stats.record(steps, visited.len(), 0, begin.elapsed());
        Ok(None)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "bestfirst"
    }
}

/// Walks the parent chain back to the root and reverses it.
pub(super) fn construct_path(
    parents: &HashMap<Position, Option<Position>>,
    mut current: Position,
) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(Some(parent)) = parents.get(&current) {
        path.push(*parent);
        current = *parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_first_open_grid() {
        let maze = Maze::from_lines(&["---", "---", "---"]).unwrap();
        let solution = BestFirst::new((0, 0), (2, 2))
            .solve(&maze)
            .unwrap()
            .unwrap();
        assert!(solution.verify(&maze, (0, 0), (2, 2)));
        assert_eq!(solution.path.len(), 5);
    }

    #[test]
    fn test_best_first_no_path() {
        let maze = Maze::from_lines(&["-#-", "##-", "---"]).unwrap();
        assert!(BestFirst::new((0, 0), (2, 2)).solve(&maze).unwrap().is_none());
    }

    #[test]
    fn test_best_first_start_equals_end() {
        let maze = Maze::from_lines(&["--", "--"]).unwrap();
        let solution = BestFirst::new((1, 0), (1, 0)).solve(&maze).unwrap().unwrap();
        assert_eq!(solution.path, vec![(1, 0)]);
    }

    #[test]
    fn test_best_first_fixture_maze() {
        let maze = Maze::from_file("mazes/maze-medium.txt").unwrap();
        let (start, end) = maze.find_endpoints().unwrap();
        let solution = BestFirst::new(start, end).solve(&maze).unwrap().unwrap();
        assert!(solution.verify(&maze, start, end));
    }
}
