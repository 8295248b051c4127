use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub expanded_nodes: usize,
    pub visited_nodes: usize,
    pub path_length: usize,
    pub time_us: u64,
}

impl Stats {
    pub(crate) fn record(
        &mut self,
        expanded_nodes: usize,
        visited_nodes: usize,
        path_length: usize,
        elapsed: Duration,
    ) {
        self.expanded_nodes = expanded_nodes;
        self.visited_nodes = visited_nodes;
        self.path_length = path_length;
        self.time_us = elapsed.as_micros() as u64;
    }

    pub fn print(&self, solver: &str) {
        info!(
            "{solver}: nodes explored {:?} expansions {:?} time(microseconds) {:?} path length {:?}",
            self.visited_nodes, self.expanded_nodes, self.time_us, self.path_length
        );
    }
}

/// One solver run in a machine-readable report.
#[derive(Debug, Serialize)]
pub struct Report {
    pub solver: String,
    pub found: bool,
    #[serde(flatten)]
    pub stats: Stats,
}

pub fn write_reports<P: AsRef<Path>>(path: P, reports: &[Report]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating report file {path:?}"))?;
    serde_json::to_writer_pretty(file, reports)
        .with_context(|| format!("writing report file {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_flat() {
        let mut stats = Stats::default();
        stats.record(7, 12, 5, Duration::from_micros(42));
        let report = Report {
            solver: "bistar".to_string(),
            found: true,
            stats,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["solver"], "bistar");
        assert_eq!(json["found"], true);
        assert_eq!(json["expanded_nodes"], 7);
        assert_eq!(json["path_length"], 5);
        assert_eq!(json["time_us"], 42);
    }

    #[test]
    fn test_write_reports_round_trip() {
        let path = std::env::temp_dir().join("maze_rust_report_test.json");
        let mut stats = Stats::default();
        stats.record(3, 9, 4, Duration::from_micros(17));
        let reports = vec![Report {
            solver: "dfs".to_string(),
            found: false,
            stats,
        }];
        write_reports(&path, &reports).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["solver"], "dfs");
        assert_eq!(json[0]["found"], false);
        assert_eq!(json[0]["visited_nodes"], 9);
        assert_eq!(json[0]["time_us"], 17);
    }

    #[test]
    fn test_write_reports_unwritable_path() {
        let err = write_reports("/no-such-dir/report.json", &[]).unwrap_err();
        assert!(err.to_string().contains("creating report file"));
    }
}
