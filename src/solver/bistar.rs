use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use anyhow::{bail, Result};
use tracing::{debug, instrument, trace};

use super::common::{euclidean, FrontierEntry, OFFSETS};
use super::{validate_endpoints, Solver};
use crate::common::{Direction, Position, Solution};
use crate::maze::Maze;
use crate::stat::Stats;

/// Outcome of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Found(Position),
    Exhausted,
}

/// Result of expanding one cell's neighborhood.
enum Expansion {
    /// A generated neighbor belongs to both directions' visited sets;
    /// search stops and the cell becomes the meeting point.
    Intersection(Position),
    /// Valid, unvisited candidates in the fixed priority order.
    Candidates(Vec<Position>),
}

/// One direction's half of the search: frontier, visited set, parent
/// map, the cell it most recently expanded, and the opposing cell it is
/// currently steering toward.
struct Half {
    open: BinaryHeap<FrontierEntry>,
    visited: HashSet<Position>,
    parents: HashMap<Position, Option<Position>>,
    root: Position,
    current: Position,
    target: Position,
    steps: usize,
    next_seq: u64,
}

impl Half {
    fn new(root: Position, target: Position, direction: Direction) -> Self {
        let mut half = Half {
            open: BinaryHeap::new(),
            visited: HashSet::from([root]),
            parents: HashMap::from([(root, None)]),
            root,
            current: root,
            target,
            steps: 0,
            next_seq: 0,
        };
        let score = heuristic(root, target, root, direction);
        half.push(score, root);
        half
    }

    fn push(&mut self, score: f64, position: Position) {
        self.open.push(FrontierEntry {
            score,
            seq: self.next_seq,
            position,
        });
        self.next_seq += 1;
    }
}

/// Both halves of a bidirectional search. Created once per invocation,
/// mutated only by the controller, discarded afterwards.
struct SearchState {
    fwd: Half,
    bwd: Half,
}

impl SearchState {
    fn new(start: Position, end: Position) -> Self {
        SearchState {
            fwd: Half::new(start, end, Direction::Forward),
            bwd: Half::new(end, start, Direction::Backward),
        }
    }

    /// Pops the best candidate of one direction, re-targets it at the
    /// opposing direction's current cell and expands its neighborhood.
    /// Returns the meeting cell when the frontiers intersect.
    fn explore(&mut self, maze: &Maze, direction: Direction) -> Option<Position> {
        let (own, other) = match direction {
            Direction::Forward => (&mut self.fwd, &mut self.bwd),
            Direction::Backward => (&mut self.bwd, &mut self.fwd),
        };
        let entry = own.open.pop()?;
        let current = entry.position;
        own.target = other.current;
        trace!(?direction, ?current, score = entry.score, "expand");

        match expand_neighbors(maze, current, &own.visited, &other.visited) {
            Expansion::Intersection(cell) => {
                debug!(?direction, meeting = ?cell, "frontiers intersect");
                Some(cell)
            }
            Expansion::Candidates(candidates) => {
                own.steps += 1;
                // One score per expansion, shared by all its candidates;
                // insertion order keeps the up/right/left/down priority.
                let score =
                    heuristic(own.root, own.target, current, direction) + own.steps as f64;
                for neighbor in candidates {
                    own.push(score, neighbor);
                    own.visited.insert(neighbor);
                    // First discoverer wins; later discoveries are dropped.
                    own.parents.entry(neighbor).or_insert(Some(current));
                }
                own.current = current;
                None
            }
        }
    }

    /// Stitches the two parent chains at the meeting cell:
    /// `[start .. meeting .. end]`, meeting cell exactly once.
    fn reconcile(&self, meeting: Position) -> Solution {
        let mut path = vec![meeting];
        let mut cursor = meeting;
        while let Some(Some(parent)) = self.fwd.parents.get(&cursor) {
            path.push(*parent);
            cursor = *parent;
        }
        path.reverse();

        let mut cursor = meeting;
        while let Some(Some(parent)) = self.bwd.parents.get(&cursor) {
            path.push(*parent);
            cursor = *parent;
        }

        let visited = self.fwd.visited.union(&self.bwd.visited).copied().collect();
        Solution { path, visited }
    }
}

/// The "average function" heuristic: half the difference between the
/// outward distance (current cell to this direction's moving target)
/// and the inward distance (this direction's fixed root to the current
/// cell). The sign flip keeps the two frontiers' orderings compatible.
fn heuristic(root: Position, target: Position, current: Position, direction: Direction) -> f64 {
    let outward = euclidean(current, target);
    let inward = euclidean(root, current);
    let value = (outward - inward) / 2.0;
    match direction {
        Direction::Forward => value.abs(),
        Direction::Backward => -value.abs(),
    }
}

/// Bidirectional neighbor expansion. The intersection check has
/// priority: the first generated neighbor already visited by both
/// directions aborts expansion, even if earlier candidates would
/// otherwise have been kept.
fn expand_neighbors(
    maze: &Maze,
    cell: Position,
    own_visited: &HashSet<Position>,
    other_visited: &HashSet<Position>,
) -> Expansion {
    let mut candidates = Vec::with_capacity(4);
    for (row_offset, col_offset) in OFFSETS {
        let row = cell.0 as isize + row_offset;
        let col = cell.1 as isize + col_offset;
        if row < 0 || col < 0 {
            // Out-of-bounds cells can never be in a visited set.
            continue;
        }
        let neighbor = (row as usize, col as usize);
        if own_visited.contains(&neighbor) && other_visited.contains(&neighbor) {
            return Expansion::Intersection(neighbor);
        }
        if own_visited.contains(&neighbor) || !maze.is_passable(neighbor) {
            continue;
        }
        candidates.push(neighbor);
    }
    Expansion::Candidates(candidates)
}

/// Bidirectional best-first search: one frontier grows from the start,
/// one from the end, and the path is reconciled at the cell where they
/// meet.
pub struct BiAStar {
    start: Position,
    end: Position,
    deadline: Option<Instant>,
    stats: Stats,
}

impl BiAStar {
    pub fn new(start: Position, end: Position) -> Self {
        BiAStar {
            start,
            end,
            deadline: None,
            stats: Stats::default(),
        }
    }

    /// Aborts the search with an error once the deadline passes,
    /// checked once per tick.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// One tick: expand Forward's best candidate, then Backward's.
    /// Forward is always evaluated first, so its discovery is
    /// authoritative when both halves would meet in the same tick.
    fn tick(&self, maze: &Maze, state: &mut SearchState) -> Result<Status> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                bail!(
                    "bidirectional search deadline exceeded after {} expansions",
                    state.fwd.steps + state.bwd.steps
                );
            }
        }
        if state.fwd.open.is_empty() || state.bwd.open.is_empty() {
            return Ok(Status::Exhausted);
        }
        if let Some(cell) = state.explore(maze, Direction::Forward) {
            return Ok(Status::Found(cell));
        }
        if let Some(cell) = state.explore(maze, Direction::Backward) {
            return Ok(Status::Found(cell));
        }
        Ok(Status::Running)
    }
}

impl Solver for BiAStar {
    #[instrument(skip_all, name = "bi_a_star", fields(start = ?self.start, end = ?self.end), level = "debug")]
    fn solve(&mut self, maze: &Maze) -> Result<Option<Solution>> {
        let begin = Instant::now();
        validate_endpoints(maze, self.start, self.end)?;

        if self.start == self.end {
            let solution = Solution {
                path: vec![self.start],
                visited: HashSet::from([self.start]),
            };
            self.stats.record(0, 1, 1, begin.elapsed());
            return Ok(Some(solution));
        }

        let mut state = SearchState::new(self.start, self.end);
        let meeting = loop {
            match self.tick(maze, &mut state)? {
                Status::Running => continue,
                Status::Found(cell) => break Some(cell),
                Status::Exhausted => break None,
            }
        };

        let expanded = state.fwd.steps + state.bwd.steps;
        match meeting {
            Some(cell) => {
                let solution = state.reconcile(cell);
                self.stats.record(
                    expanded,
                    solution.visited.len(),
                    solution.path.len(),
                    begin.elapsed(),
                );
                Ok(Some(solution))
            }
            None => {
                debug!("a frontier emptied before the searches met");
                let visited = state.fwd.visited.len() + state.bwd.visited.len();
                self.stats.record(expanded, visited, 0, begin.elapsed());
                Ok(None)
            }
        }
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "bistar"
    }
}
