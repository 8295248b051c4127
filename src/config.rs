use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "Rust Maze",
    about = "Bidirectional best-first maze search implemented in Rust.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Path to the maze text file ('#' wall, '-' open)",
        default_value = "mazes/maze-medium.txt"
    )]
    pub maze_path: String,

    #[arg(
        long,
        help = "Path to a YAML scenario file; overrides the maze path and endpoints"
    )]
    pub scenario_path: Option<String>,

    #[arg(long, help = "Path to write a JSON report of the run")]
    pub output_path: Option<String>,

    #[arg(long, help = "Solver to use: bistar, bestfirst, dfs or all", default_value = "bistar")]
    pub solver: String,

    #[arg(
        long,
        help = "Wall-clock budget for the bidirectional solver in milliseconds"
    )]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub maze_path: String,
    pub scenario_path: Option<String>,
    pub output_path: Option<String>,
    pub solver: String,
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            maze_path: cli.maze_path.clone(),
            scenario_path: cli.scenario_path.clone(),
            output_path: cli.output_path.clone(),
            solver: cli.solver.clone(),
            timeout_ms: cli.timeout_ms,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.solver.as_str() {
            "bistar" | "bestfirst" | "dfs" | "all" => {}
            other => {
                return Err(anyhow!(
                    "Unknown solver {other:?}, expected bistar, bestfirst, dfs or all"
                ))
            }
        }

        if let Some(timeout_ms) = self.timeout_ms {
            if timeout_ms == 0 {
                return Err(anyhow!("Timeout must be greater than zero milliseconds"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(solver: &str, timeout_ms: Option<u64>) -> Config {
        Config {
            maze_path: "mazes/maze-small.txt".to_string(),
            scenario_path: None,
            output_path: None,
            solver: solver.to_string(),
            timeout_ms,
        }
    }

    #[test]
    fn test_validate_known_solvers() {
        for solver in ["bistar", "bestfirst", "dfs", "all"] {
            assert!(config_with(solver, None).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_unknown_solver() {
        assert!(config_with("dijkstra", None).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        assert!(config_with("bistar", Some(0)).validate().is_err());
    }
}
