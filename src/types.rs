//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing commits read from a repository and the yearly series derived
//! from them.

use serde::Serialize;

/// A single commit as seen by the aggregation.
///
/// Only the author identity and the calendar year of the authorship
/// timestamp are kept. Identities are taken verbatim from the repository;
/// two spellings of the same person count as two contributors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Commit {
    /// The author name recorded on the commit
    pub author: String,
    /// The calendar year the commit was authored in
    pub year: i32,
}

impl Commit {
    pub fn new(author: impl Into<String>, year: i32) -> Self {
        Self {
            author: author.into(),
            year,
        }
    }
}

/// Commit and contributor counts per observed year.
///
/// The three vectors are parallel: `total_commits[i]` and
/// `total_contributors[i]` belong to `years[i]`. Years are ascending and
/// only years with at least one commit are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct YearlyActivity {
    /// Distinct years with at least one commit, ascending
    pub years: Vec<i32>,
    /// Number of commits authored in each year
    pub total_commits: Vec<usize>,
    /// Number of distinct authors active in each year
    pub total_contributors: Vec<usize>,
}

impl YearlyActivity {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// First and last observed year, if any commit was seen.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }
}

/// Yearly commit counts for one ranked contributor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContributorSeries {
    /// The contributor identity
    pub author: String,
    /// Total commits across all years
    pub total: usize,
    /// Commits per year, aligned with [`Report::contributor_years`].
    /// Years without commits are 0.
    pub counts: Vec<usize>,
}

/// Contributor retention for a single year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RetentionPoint {
    pub year: i32,
    /// Contributors seen for the first time in this year
    pub additions: usize,
    /// Contributors active in the previous year but not in this one
    pub dropoffs: usize,
}

/// Everything derived from one pass over a repository's history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Total number of commits analyzed
    pub commit_count: usize,
    /// Number of distinct contributors across the whole history
    pub contributor_count: usize,
    /// Commits and contributors per year
    pub activity: YearlyActivity,
    /// Top contributors by commit count, descending
    pub top_contributors: Vec<(String, usize)>,
    /// Year axis shared by every entry of `contributor_series`
    pub contributor_years: Vec<i32>,
    /// Per-year activity of each top contributor, in ranking order
    pub contributor_series: Vec<ContributorSeries>,
    /// Additions and dropoffs for every year between the first and last
    /// observed year, inclusive
    pub retention: Vec<RetentionPoint>,
}
