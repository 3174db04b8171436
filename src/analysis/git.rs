use chrono::{DateTime, Datelike, FixedOffset, Utc};
use git2::{Repository, Sort};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task::spawn_blocking;

use super::aggregate::ContributionStats;
use super::ranking::{contributor_series, top_contributors};
use super::retention::retention;
use crate::error::{GitalyzerError, Result};
use crate::types::{Commit, Report};

/// Open the repository at `path`, reporting the path on failure.
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::open(path).map_err(|source| GitalyzerError::OpenRepository {
        path: path.to_path_buf(),
        source,
    })
}

/// Calendar year of a commit signature, in the signer's own UTC offset.
pub(crate) fn authored_year(time: git2::Time) -> Result<i32> {
    let utc = DateTime::<Utc>::from_timestamp(time.seconds(), 0).ok_or_else(|| {
        GitalyzerError::InvalidTimestamp {
            seconds: time.seconds(),
        }
    })?;
    Ok(match FixedOffset::east_opt(time.offset_minutes() * 60) {
        Some(offset) => utc.with_timezone(&offset).year(),
        None => utc.year(),
    })
}

/// Read every commit reachable from any reference in the repository.
///
/// An empty repository (unborn `HEAD`, no refs) yields no commits.
pub fn collect_commits(repo: &Repository) -> Result<Vec<Commit>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push_glob("*")?;
    if repo.head().is_ok() {
        // Detached HEAD is not covered by refs/*
        revwalk.push_head()?;
    }

    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        let author = commit.author();
        commits.push(Commit {
            author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            year: authored_year(author.when())?,
        });
    }

    tracing::debug!(commits = commits.len(), "walked repository history");
    Ok(commits)
}

/// Derive the full report from a commit enumeration.
pub fn analyze_commits<I>(commits: I, exclude: Option<&Regex>, top_n: usize) -> Report
where
    I: IntoIterator<Item = Commit>,
{
    let stats = ContributionStats::from_commits(commits);
    let ranked = top_contributors(&stats, exclude, top_n);
    let (contributor_years, contributor_series) = contributor_series(&stats, &ranked);

    Report {
        commit_count: stats.commit_count(),
        contributor_count: stats.contributors().len(),
        activity: stats.yearly_activity(),
        top_contributors: ranked,
        contributor_years,
        contributor_series,
        retention: retention(&stats),
    }
}

/// Analyze a Git repository asynchronously
pub async fn analyze_repo_async(
    path: PathBuf,
    exclude: Option<Regex>,
    top_n: usize,
) -> Result<Report> {
    let start_time = Instant::now();

    // git2 is blocking; walk the history off the async executor
    let commits = spawn_blocking(move || {
        let repo = open_repository(&path)?;
        tracing::debug!(path = %path.display(), "opened repository");
        collect_commits(&repo)
    })
    .await??;

    let report = analyze_commits(commits, exclude.as_ref(), top_n);

    tracing::info!(
        commits = report.commit_count,
        contributors = report.contributor_count,
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "analysis complete"
    );
    Ok(report)
}
