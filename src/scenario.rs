use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::common::Position;

/// YAML run description: which maze file to solve and, optionally,
/// explicit endpoints overriding the ones derived from the maze's top
/// and bottom rows.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub maze: String,
    pub start: Option<[usize; 2]>,
    pub end: Option<[usize; 2]>,
}

impl Scenario {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("opening scenario file {path:?}"))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("parsing scenario file {path:?}"))
    }

    pub fn start_position(&self) -> Option<Position> {
        self.start.map(|[row, col]| (row, col))
    }

    pub fn end_position(&self) -> Option<Position> {
        self.end.map(|[row, col]| (row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_with_endpoints() {
        let scenario: Scenario = serde_yaml::from_str(
            "maze: mazes/maze-small.txt\nstart: [0, 1]\nend: [4, 3]\n",
        )
        .unwrap();
        assert_eq!(scenario.maze, "mazes/maze-small.txt");
        assert_eq!(scenario.start_position(), Some((0, 1)));
        assert_eq!(scenario.end_position(), Some((4, 3)));
    }

    #[test]
    fn test_scenario_endpoints_optional() {
        let scenario: Scenario = serde_yaml::from_str("maze: mazes/maze-medium.txt\n").unwrap();
        assert_eq!(scenario.start_position(), None);
        assert_eq!(scenario.end_position(), None);
    }
}
