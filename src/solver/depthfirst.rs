use std::collections::{HashMap, HashSet};
use std::time::Instant;

use anyhow::Result;
use tracing::instrument;

use super::bestfirst::construct_path;
use super::common::neighbors;
use super::{validate_endpoints, Solver};
use crate::common::{Position, Solution};
use crate::maze::Maze;
use crate::stat::Stats;

/// Exhaustive depth-first baseline: stack-based, last-discovered
/// neighbor expanded first. Terminates on finite mazes but gives no
/// shortest-path guarantee.
pub struct DepthFirst {
    start: Position,
    end: Position,
    stats: Stats,
}

impl DepthFirst {
    pub fn new(start: Position, end: Position) -> Self {
        DepthFirst {
            start,
            end,
            stats: Stats::default(),
        }
    }
}

impl Solver for DepthFirst {
    #[instrument(skip_all, name = "depth_first", fields(start = ?self.start, end = ?self.end), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Result<Option<Solution>> {
        let begin = Instant::now();
        validate_endpoints(maze, self.start, self.end)?;

        let mut stack: Vec<(Position, Option<Position>)> = vec![(self.start, None)];
        let mut visited = HashSet::new();
        let mut parents = HashMap::new();
        let mut steps = 0usize;

        while let Some((current, parent)) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            parents.insert(current, parent);

            if current == self.end {
                let path = construct_path(&parents, current);
                self.stats
                    .record(steps, visited.len(), path.len(), begin.elapsed());
                return Ok(Some(Solution { path, visited }));
            }

            steps += 1;
            for neighbor in neighbors(maze, current, &visited) {
                stack.push((neighbor, Some(current)));
            }
        }

        self.stats.record(steps, visited.len(), 0, begin.elapsed());
        Ok(None)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "dfs"
    }
}
