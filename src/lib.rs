//! # Git Contribution Statistics
//!
//! `gitalyzer` reads the complete commit history of a Git repository and
//! derives yearly statistics from it:
//!
//! - commits per year
//! - distinct contributors per year
//! - the yearly activity of the top contributors, optionally excluding
//!   contributors that match a regular expression
//! - contributor retention: how many contributors appear for the first time
//!   each year, and how many active last year are gone this year
//!
//! Each series can be rendered as a PNG chart.
//!
//! ## Example
//!
//! ```
//! use gitalyzer::analysis::{analyze_commits, DEFAULT_TOP_N};
//! use gitalyzer::types::Commit;
//!
//! let commits = vec![
//!     Commit::new("A", 2020),
//!     Commit::new("B", 2020),
//!     Commit::new("A", 2021),
//! ];
//! let report = analyze_commits(commits, None, DEFAULT_TOP_N);
//!
//! assert_eq!(report.activity.years, vec![2020, 2021]);
//! assert_eq!(report.activity.total_commits, vec![2, 1]);
//! assert_eq!(report.retention[1].dropoffs, 1);
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{GitalyzerError, Result};
pub use types::{Commit, Report};
