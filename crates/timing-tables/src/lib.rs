//! # Timing Tables Crate
//!
//! This crate turns the transcripts of a recommender benchmark into timing
//! tables. The same query script is run three times (PostgreSQL, MongoDB,
//! both backends); the three logs are scanned in lockstep and every timed
//! statement becomes a row of three timings.
//!
//! ## Main Components
//!
//! - **types**: Core types (Timing, TimingRow, Table, TableSet)
//! - **logs**: Scan the three aligned logs into per-dataset blocks
//! - **script**: Count statements in the query script and slice blocks into tables
//! - **printer**: Render tables as comma-separated rows
//! - **loader**: Read a run directory from disk
//! - **error**: Error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use timing_tables::{BenchmarkRun, write_tables};
//! use std::path::Path;
//!
//! let run = BenchmarkRun::load_from_dir(Path::new("tests"))?;
//! write_tables(&mut std::io::stdout().lock(), run.tables())?;
//! ```

pub mod error;
pub mod types;
pub mod logs;
pub mod script;
pub mod printer;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{TableError, Result};
pub use loader::{BenchmarkRun, read_lines};
pub use printer::{format_float, write_tables};
pub use types::{
    DatasetBlock,
    QueryBlock,
    QueryCategory,
    Table,
    TableSet,
    Timing,
    TimingRow,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_set() {
        let tables = TableSet::new();
        assert!(tables.is_empty());
        for category in QueryCategory::ALL {
            assert!(tables.group(category).is_empty());
        }
    }

    #[test]
    fn test_query_block_counts() {
        let mut block = QueryBlock::default();
        block.increment(QueryCategory::Knn);
        block.increment(QueryCategory::Knn);
        block.increment(QueryCategory::Item);

        assert_eq!(block.count(QueryCategory::Knn), 2);
        assert_eq!(block.count(QueryCategory::User), 0);
        assert_eq!(block.total(), 3);
    }

    #[test]
    fn test_category_suffixes() {
        let suffixes: Vec<String> = QueryCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(suffixes, ["KNN", "USER", "ITEM"]);
    }
}
