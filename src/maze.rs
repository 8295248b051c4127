use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::Rng;

use crate::common::Position;

#[derive(Debug, Clone)]
pub struct Tile {
    passable: bool,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

/// Immutable rectangular grid of open/blocked cells. Built once by the
/// loader and only read during a search.
#[derive(Debug, Clone)]
pub struct Maze {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl Maze {
    /// Reads a maze text file: `#` is a wall, `-` is an open cell, any
    /// other character is ignored and blank lines are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening maze file {path:?}"))?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let row: String = line
                .chars()
                .filter(|&ch| ch == '#' || ch == '-')
                .collect();
            if !row.is_empty() {
                rows.push(row);
            }
        }
        let refs: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
        Self::from_lines(&refs).with_context(|| format!("parsing maze file {path:?}"))
    }

    /// Builds a maze from pre-split rows of `#`/`-` characters.
    pub fn from_lines(lines: &[&str]) -> Result<Self> {
        if lines.is_empty() {
            bail!("maze has no rows");
        }
        let width = lines[0].chars().count();
        if width == 0 {
            bail!("maze has empty rows");
        }
        let mut grid = Vec::with_capacity(lines.len());
        for (row_index, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                bail!(
                    "maze row {} has {} cells, expected {}",
                    row_index,
                    line.chars().count(),
                    width
                );
            }
            let tiles_row: Vec<Tile> = line
                .chars()
                .map(|ch| Tile {
                    passable: ch != '#',
                })
                .collect();
            grid.push(tiles_row);
        }
        Ok(Maze {
            height: grid.len(),
            width,
            grid,
        })
    }

    /// Generates a maze with the given wall density. The top-left and
    /// bottom-right corners are forced open so `find_endpoints` always
    /// succeeds; a path between them is not guaranteed.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        wall_density: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if height == 0 || width == 0 {
            bail!("maze dimensions must be non-zero");
        }
        if !(0.0..=1.0).contains(&wall_density) {
            bail!("wall density must lie in [0, 1], got {wall_density}");
        }
        let mut grid = Vec::with_capacity(height);
        for _ in 0..height {
            let tiles_row: Vec<Tile> = (0..width)
                .map(|_| Tile {
                    passable: rng.gen::<f64>() >= wall_density,
                })
                .collect();
            grid.push(tiles_row);
        }
        grid[0][0].passable = true;
        grid[height - 1][width - 1].passable = true;
        Ok(Maze {
            height,
            width,
            grid,
        })
    }

    /// False when `pos` is out of bounds or a wall.
    pub fn is_passable(&self, pos: Position) -> bool {
        let (row, col) = pos;
        row < self.height && col < self.width && self.grid[row][col].is_passable()
    }

    /// Derives the conventional endpoints of a maze file: the first open
    /// cell of the top row and the last open cell of the bottom row.
    pub fn find_endpoints(&self) -> Result<(Position, Position)> {
        let start_col = self.grid[0]
            .iter()
            .position(|tile| tile.is_passable())
            .context("no open cell in the top row")?;
        let end_col = self.grid[self.height - 1]
            .iter()
            .rposition(|tile| tile.is_passable())
            .context("no open cell in the bottom row")?;
        Ok(((0, start_col), (self.height - 1, end_col)))
    }
}
