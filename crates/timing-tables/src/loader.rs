//! Loading a benchmark run from disk.
//!
//! A run directory holds the three logs and the query script that produced
//! them. Loading reads all four files, scans the logs into dataset blocks
//! and cuts the blocks into tables.

use crate::error::{Result, TableError};
use crate::logs::{self, BOTH_LOG, MONGO_LOG, PSQL_LOG};
use crate::script;
use crate::types::{DatasetBlock, TableSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Query script fed to the REPL for every run
pub const QUERY_SCRIPT: &str = "test.in";

/// Read a file into lines, without line terminators
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TableError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => TableError::IoError(e),
    })?;

    let lines = BufReader::new(file).lines().collect::<io::Result<Vec<_>>>()?;
    Ok(lines)
}

/// Timing blocks and tables of one benchmark run
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRun {
    datasets: Vec<DatasetBlock>,
    tables: TableSet,
}

impl BenchmarkRun {
    /// Load a run from a directory holding `result_psql.out`,
    /// `result_mongo.out`, `result_psql_mongo.out` and `test.in`
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        info!("Loading benchmark run from {:?}", dir);

        let psql = read_lines(&dir.join(PSQL_LOG))?;
        let mongo = read_lines(&dir.join(MONGO_LOG))?;
        let both = read_lines(&dir.join(BOTH_LOG))?;
        let queries = read_lines(&dir.join(QUERY_SCRIPT))?;

        let run = Self::from_lines(&psql, &mongo, &both, &queries)?;

        let (datasets, rows, tables) = run.counts();
        info!("Loaded {} datasets, {} timing rows, {} tables", datasets, rows, tables);
        Ok(run)
    }

    /// Build a run from lines already in memory
    pub fn from_lines(
        psql: &[String],
        mongo: &[String],
        both: &[String],
        queries: &[String],
    ) -> Result<Self> {
        let datasets = logs::scan_logs(psql, mongo, both)?;
        let tables = script::scan_queries(queries, &datasets)?;
        Ok(Self { datasets, tables })
    }

    /// Timing blocks in log order
    pub fn datasets(&self) -> &[DatasetBlock] {
        &self.datasets
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Counts of datasets, timing rows and tables, for logging
    pub fn counts(&self) -> (usize, usize, usize) {
        let rows = self.datasets.iter().map(|b| b.len()).sum();
        (self.datasets.len(), rows, self.tables.len())
    }
}
