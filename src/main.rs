use maze_rust::common::Position;
use maze_rust::config::{Cli, Config};
use maze_rust::maze::Maze;
use maze_rust::scenario::Scenario;
use maze_rust::solver::{BestFirst, BiAStar, DepthFirst, Solver};
use maze_rust::stat::{write_reports, Report};

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

fn load_input(config: &Config) -> Result<(Maze, Position, Position)> {
    if let Some(scenario_path) = &config.scenario_path {
        let scenario = Scenario::load_from_file(scenario_path)?;
        let maze = Maze::from_file(&scenario.maze)?;
        let (start, end) = match (scenario.start_position(), scenario.end_position()) {
            (Some(start), Some(end)) => (start, end),
            (explicit_start, explicit_end) => {
                let (derived_start, derived_end) = maze.find_endpoints()?;
                (
                    explicit_start.unwrap_or(derived_start),
                    explicit_end.unwrap_or(derived_end),
                )
            }
        };
        Ok((maze, start, end))
    } else {
        let maze = Maze::from_file(&config.maze_path)?;
        let (start, end) = maze.find_endpoints()?;
        Ok((maze, start, end))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    let cli = Cli::parse();

    let config = Config::new(&cli);
    config.validate()?;

    let (maze, start, end) = load_input(&config)?;
    info!(
        "maze {}x{}, start {:?}, end {:?}",
        maze.height, maze.width, start, end
    );

    let mut bistar = BiAStar::new(start, end);
    if let Some(timeout_ms) = config.timeout_ms {
        bistar = bistar.with_deadline(Instant::now() + Duration::from_millis(timeout_ms));
    }

    let mut solvers: Vec<Box<dyn Solver>> = match config.solver.as_str() {
        "bistar" => vec![Box::new(bistar)],
        "bestfirst" => vec![Box::new(BestFirst::new(start, end))],
        "dfs" => vec![Box::new(DepthFirst::new(start, end))],
        "all" => vec![
            Box::new(bistar),
            Box::new(BestFirst::new(start, end)),
            Box::new(DepthFirst::new(start, end)),
        ],
        _ => unreachable!("validated above"),
    };

    let mut reports = Vec::new();
    for solver in solvers.iter_mut() {
        let found = match solver.solve(&maze)? {
            Some(solution) => {
                assert!(solution.verify(&maze, start, end));
                solver.stats().print(solver.name());
                true
            }
            None => {
                warn!(
                    "{}: no path between {:?} and {:?}",
                    solver.name(),
                    start,
                    end
                );
                false
            }
        };
        reports.push(Report {
            solver: solver.name().to_string(),
            found,
            stats: solver.stats().clone(),
        });
    }

    if let Some(output_path) = &config.output_path {
        write_reports(output_path, &reports)?;
        info!("report written to {output_path}");
    }

    Ok(())
}
