//! Core types for benchmark timing tables.
//!
//! A run of the benchmark produces three line-aligned logs (PostgreSQL,
//! MongoDB, both backends). Each timed statement becomes one [`TimingRow`],
//! rows are grouped per database connection into a [`DatasetBlock`], and
//! blocks are sliced per query category into [`Table`]s.

use std::fmt;

// =============================================================================
// Timings
// =============================================================================

/// One measurement extracted from a log line.
///
/// `text` is exactly what matched in the log; `seconds` is its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub text: String,
    pub seconds: f64,
}

/// Timings of the same statement against each backend
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub psql: Timing,
    pub mongo: Timing,
    pub both: Timing,
}

impl TimingRow {
    /// Values in print order: psql, mongo, both
    pub fn values(&self) -> [f64; 3] {
        [self.psql.seconds, self.mongo.seconds, self.both.seconds]
    }
}

/// All rows recorded between one connect and the next disconnect
pub type DatasetBlock = Vec<TimingRow>;

// =============================================================================
// Query categories
// =============================================================================

/// Kind of timed statement in the query script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryCategory {
    /// `user_knn(...)`
    Knn,
    /// `user_based_predict(...)`
    User,
    /// `item_based_predict(...)`
    Item,
}

impl QueryCategory {
    /// Fixed slicing and printing order
    pub const ALL: [QueryCategory; 3] = [Self::Knn, Self::User, Self::Item];

    /// Suffix appended to the dataset name in table headers
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Knn => "KNN",
            Self::User => "USER",
            Self::Item => "ITEM",
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Query counts for one connect/disconnect block of the script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBlock {
    pub name: String,
    pub knn: usize,
    pub user: usize,
    pub item: usize,
}

impl QueryBlock {
    pub fn count(&self, category: QueryCategory) -> usize {
        match category {
            QueryCategory::Knn => self.knn,
            QueryCategory::User => self.user,
            QueryCategory::Item => self.item,
        }
    }

    pub fn increment(&mut self, category: QueryCategory) {
        match category {
            QueryCategory::Knn => self.knn += 1,
            QueryCategory::User => self.user += 1,
            QueryCategory::Item => self.item += 1,
        }
    }

    /// Total number of timed statements in the block
    pub fn total(&self) -> usize {
        self.knn + self.user + self.item
    }
}

// =============================================================================
// Tables
// =============================================================================

/// A named matrix of timing rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub rows: Vec<TimingRow>,
}

/// The three table groups, one table per dataset in each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub knn: Vec<Table>,
    pub user: Vec<Table>,
    pub item: Vec<Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables of one category, in dataset order
    pub fn group(&self, category: QueryCategory) -> &[Table] {
        match category {
            QueryCategory::Knn => &self.knn,
            QueryCategory::User => &self.user,
            QueryCategory::Item => &self.item,
        }
    }

    pub fn push(&mut self, category: QueryCategory, table: Table) {
        match category {
            QueryCategory::Knn => self.knn.push(table),
            QueryCategory::User => self.user.push(table),
            QueryCategory::Item => self.item.push(table),
        }
    }

    /// Total number of tables over all groups
    pub fn len(&self) -> usize {
        self.knn.len() + self.user.len() + self.item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
