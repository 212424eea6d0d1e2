//! Scanner for the query script fed to the benchmark REPL.
//!
//! The script connects to each dataset in turn, issues a series of timed
//! statements and disconnects:
//!
//! ```text
//! connect(movie-lens)
//! user_knn(4, id(1), cosine)
//! user_based_predict(4, id(1), id(2), cosine)
//! item_based_predict(id(1), id(2), adj_cosine, 100)
//! disconnect
//! ```
//!
//! Counting the statements of each block tells us how to cut the matching
//! dataset block of the logs into KNN, USER and ITEM tables.

use crate::error::{Result, TableError};
use crate::types::{DatasetBlock, QueryBlock, QueryCategory, Table, TableSet, TimingRow};
use tracing::{debug, warn};

/// Character offset of the dataset name in a connect line (`connect(`)
const NAME_OFFSET: usize = 8;

/// What a query-script line means to the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine {
    Disconnect,
    Connect,
    Query(QueryCategory),
    Other,
}

/// Classify a line. Checks run in a fixed order and the first match wins,
/// so a `disconnect` line is never taken for a `connect`.
pub fn classify_line(line: &str) -> ScriptLine {
    if line.contains("disconnect") {
        ScriptLine::Disconnect
    } else if line.contains("connect") {
        ScriptLine::Connect
    } else if line.contains("user_knn(") {
        ScriptLine::Query(QueryCategory::Knn)
    } else if line.contains("user_based") {
        ScriptLine::Query(QueryCategory::User)
    } else if line.contains("item_based") {
        ScriptLine::Query(QueryCategory::Item)
    } else {
        ScriptLine::Other
    }
}

/// Dataset name of a connect line.
///
/// Takes the characters after `connect(` up to the closing parenthesis and
/// strips quotes around them.
///
/// Example: "connect(movie-lens)" -> "movie-lens"
///          "connect('Foo')"      -> "Foo"
pub fn dataset_name(line: &str) -> String {
    let line = line.trim_end_matches(['\r', '\n']);
    let chars: Vec<char> = line.chars().collect();

    let end = chars.len().saturating_sub(1);
    let start = NAME_OFFSET.min(end);
    let raw: String = chars[start..end].iter().collect();

    raw.trim_matches(|c| c == '\'' || c == '"').to_string()
}

/// `len` rows starting at `start`, clamped to what the block holds
fn slice_rows(rows: &[TimingRow], start: usize, len: usize) -> Vec<TimingRow> {
    let start = start.min(rows.len());
    let end = start.saturating_add(len).min(rows.len());
    rows[start..end].to_vec()
}

/// Cut one dataset block into its KNN, USER and ITEM tables
fn push_tables(tables: &mut TableSet, query: &QueryBlock, rows: &[TimingRow]) {
    if query.total() > rows.len() {
        warn!(
            dataset = %query.name,
            queries = query.total(),
            rows = rows.len(),
            "query script has more statements than timing rows, tables truncated"
        );
    } else if query.total() < rows.len() {
        warn!(
            dataset = %query.name,
            unused = rows.len() - query.total(),
            "timing rows left over after slicing"
        );
    }

    let mut start = 0;
    for category in QueryCategory::ALL {
        let count = query.count(category);
        tables.push(
            category,
            Table {
                name: format!("{} {}", query.name, category.suffix()),
                rows: slice_rows(rows, start, count),
            },
        );
        start += count;
    }
}

/// Walk the query script and build the tables from the dataset blocks.
///
/// The n-th connect of the script refers to the n-th dataset block.
pub fn scan_queries(lines: &[String], datasets: &[DatasetBlock]) -> Result<TableSet> {
    let mut tables = TableSet::new();
    let mut current = QueryBlock::default();
    let mut dataset_index: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;

        match classify_line(line) {
            ScriptLine::Disconnect => {
                let index = dataset_index
                    .ok_or(TableError::DisconnectWithoutConnect { line: line_no })?;
                let rows = datasets.get(index).ok_or_else(|| TableError::MissingDataset {
                    index,
                    name: current.name.clone(),
                    line: line_no,
                })?;

                debug!(
                    dataset = %current.name,
                    knn = current.knn,
                    user = current.user,
                    item = current.item,
                    "closing query block"
                );
                push_tables(&mut tables, &current, rows);
                current = QueryBlock::default();
            }
            ScriptLine::Connect => {
                current.name = dataset_name(line);
                dataset_index = Some(dataset_index.map_or(0, |i| i + 1));
            }
            ScriptLine::Query(category) => current.increment(category),
            ScriptLine::Other => {}
        }
    }

    let connects = dataset_index.map_or(0, |i| i + 1);
    if connects < datasets.len() {
        warn!(
            connects,
            blocks = datasets.len(),
            "logs hold more dataset blocks than the query script connects to"
        );
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timing;

    fn timing(text: &str) -> Timing {
        Timing {
            text: text.to_string(),
            seconds: text.parse().unwrap(),
        }
    }

    fn row(psql: &str, mongo: &str, both: &str) -> TimingRow {
        TimingRow {
            psql: timing(psql),
            mongo: timing(mongo),
            both: timing(both),
        }
    }

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|s| s.to_string()).collect()
    }

    fn sample_block() -> DatasetBlock {
        vec![
            row("1.0", "2.0", "3.0"),
            row("4", "5", "6"),
            row("7", "8", "9"),
            row("10", "11", "12"),
        ]
    }

    #[test]
    fn test_classify_line_order() {
        assert_eq!(classify_line("disconnect"), ScriptLine::Disconnect);
        assert_eq!(classify_line("connect(books)"), ScriptLine::Connect);
        assert_eq!(
            classify_line("user_knn(4, id(1), cosine)"),
            ScriptLine::Query(QueryCategory::Knn)
        );
        assert_eq!(
            classify_line("user_based_predict(4, id(1), id(2), cosine)"),
            ScriptLine::Query(QueryCategory::User)
        );
        assert_eq!(
            classify_line("item_based_predict(id(1), id(2), slope_one, 10)"),
            ScriptLine::Query(QueryCategory::Item)
        );
        assert_eq!(classify_line("user_distance(id(1), id(2), cosine)"), ScriptLine::Other);
        assert_eq!(classify_line("user_knn"), ScriptLine::Other);
    }

    #[test]
    fn test_dataset_name() {
        assert_eq!(dataset_name("connect('Foo')\n"), "Foo");
        assert_eq!(dataset_name("connect(movie-lens)"), "movie-lens");
        assert_eq!(dataset_name("connect(\"books\")\r\n"), "books");
        assert_eq!(dataset_name("connect"), "");
        assert_eq!(dataset_name(""), "");
    }

    #[test]
    fn test_slices_block_by_category() {
        let script = lines(
            "connect('DB1')\n\
             user_knn(2, id(1), cosine)\n\
             user_knn(4, id(1), cosine)\n\
             user_based_predict(2, id(1), id(3), cosine)\n\
             item_based_predict(id(1), id(3), adj_cosine, 100)\n\
             disconnect\n",
        );
        let blocks = vec![sample_block()];

        let tables = scan_queries(&script, &blocks).unwrap();

        assert_eq!(tables.knn.len(), 1);
        assert_eq!(tables.knn[0].name, "DB1 KNN");
        assert_eq!(tables.knn[0].rows, blocks[0][0..2].to_vec());
        assert_eq!(tables.user[0].name, "DB1 USER");
        assert_eq!(tables.user[0].rows, blocks[0][2..3].to_vec());
        assert_eq!(tables.item[0].name, "DB1 ITEM");
        assert_eq!(tables.item[0].rows, blocks[0][3..4].to_vec());
    }

    #[test]
    fn test_zero_count_gives_empty_table() {
        let script = lines("connect(books)\nitem_based_predict(a)\ndisconnect\n");
        let blocks = vec![vec![row("1", "2", "3")]];

        let tables = scan_queries(&script, &blocks).unwrap();
        assert_eq!(tables.knn[0].name, "books KNN");
        assert!(tables.knn[0].rows.is_empty());
        assert!(tables.user[0].rows.is_empty());
        assert_eq!(tables.item[0].rows.len(), 1);
    }

    #[test]
    fn test_multiple_datasets_in_order() {
        let script = lines(
            "connect(books)\nuser_knn(1)\ndisconnect\n\
             connect(shelves)\nuser_based_predict(1)\nuser_based_predict(2)\ndisconnect\n",
        );
        let blocks = vec![
            vec![row("1", "1", "1")],
            vec![row("2", "2", "2"), row("3", "3", "3")],
        ];

        let tables = scan_queries(&script, &blocks).unwrap();
        assert_eq!(tables.len(), 6);
        assert_eq!(tables.knn[1].name, "shelves KNN");
        assert!(tables.knn[1].rows.is_empty());
        assert_eq!(tables.user[1].rows, blocks[1]);
    }

    #[test]
    fn test_excess_counts_truncate() {
        let script = lines("connect(books)\nuser_knn(1)\nuser_knn(2)\nitem_based(3)\ndisconnect\n");
        let blocks = vec![vec![row("1", "1", "1")]];

        let tables = scan_queries(&script, &blocks).unwrap();
        assert_eq!(tables.knn[0].rows.len(), 1);
        assert!(tables.item[0].rows.is_empty());
    }

    #[test]
    fn test_disconnect_without_connect() {
        let script = lines("user_knn(1)\ndisconnect\n");
        let err = scan_queries(&script, &[sample_block()]).unwrap_err();
        assert!(matches!(err, TableError::DisconnectWithoutConnect { line: 2 }));
    }

    #[test]
    fn test_missing_dataset_block() {
        let script = lines("connect(a)\ndisconnect\nconnect(b)\ndisconnect\n");
        let err = scan_queries(&script, &[sample_block()]).unwrap_err();
        match err {
            TableError::MissingDataset { index, name, line } => {
                assert_eq!(index, 1);
                assert_eq!(name, "b");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
