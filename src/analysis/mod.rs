pub mod aggregate;
pub mod git;
pub mod ranking;
pub mod retention;


pub use aggregate::{ContributionStats, ContributorTotals};
pub use git::{analyze_commits, analyze_repo_async, collect_commits, open_repository};
pub use ranking::{contributor_series, contributor_years, top_contributors, DEFAULT_TOP_N};
pub use retention::retention;
