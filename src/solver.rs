mod bestfirst;
mod bistar;
mod common;
mod depthfirst;

pub use bestfirst::BestFirst;
pub use bistar::BiAStar;
pub use depthfirst::DepthFirst;

use anyhow::{bail, Result};

use crate::common::{Position, Solution};
use crate::maze::Maze;
use crate::stat::Stats;

pub trait Solver {
    /// Runs the search. `Ok(None)` means the maze has no path between
    /// the endpoints; `Err` means the invocation itself was invalid
    /// (bad endpoints, deadline exceeded).
    fn solve(&mut self, maze: &Maze) -> Result<Option<Solution>>;

    /// Statistics of the most recent `solve` call.
    fn stats(&self) -> &Stats;

    fn name(&self) -> &'static str;
}

pub(crate) fn validate_endpoints(maze: &Maze, start: Position, end: Position) -> Result<()> {
    if !maze.is_passable(start) {
        bail!("start {start:?} is out of bounds or on a blocked cell");
    }
    if !maze.is_passable(end) {
        bail!("end {end:?} is out of bounds or on a blocked cell");
    }
    Ok(())
}
