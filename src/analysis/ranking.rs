use std::collections::BTreeSet;

use regex::Regex;

use super::aggregate::ContributionStats;
use crate::types::ContributorSeries;

/// Number of contributors charted when no limit is given.
pub const DEFAULT_TOP_N: usize = 10;

/// Rank contributors by total commits, descending.
///
/// Contributors whose identity matches `exclude` are removed before the cut,
/// so they never take up one of the `limit` slots. Equal totals keep the
/// order in which the contributors first appeared in the commit log.
pub fn top_contributors(
    stats: &ContributionStats,
    exclude: Option<&Regex>,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = stats
        .contributors()
        .iter()
        .filter(|c| !exclude.is_some_and(|pattern| pattern.is_match(&c.author)))
        .map(|c| (c.author.clone(), c.total))
        .collect();

    // sort_by is stable, which is what keeps ties in first-appearance order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Every year in which any contributor has a commit, ascending.
pub fn contributor_years(stats: &ContributionStats) -> Vec<i32> {
    stats
        .contributors()
        .iter()
        .flat_map(|c| c.yearly.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the year axis and a zero-filled yearly series for each ranked
/// contributor.
pub fn contributor_series(
    stats: &ContributionStats,
    ranked: &[(String, usize)],
) -> (Vec<i32>, Vec<ContributorSeries>) {
    let years = contributor_years(stats);

    let series = ranked
        .iter()
        .map(|(author, total)| {
            let yearly = stats.contributor(author).map(|c| &c.yearly);
            let counts = years
                .iter()
                .map(|year| {
                    yearly
                        .and_then(|yearly| yearly.get(year))
                        .copied()
                        .unwrap_or(0)
                })
                .collect();
            ContributorSeries {
                author: author.clone(),
                total: *total,
                counts,
            }
        })
        .collect();

    (years, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Commit;
    use pretty_assertions::assert_eq;

    fn commits_for(author: &str, year: i32, n: usize) -> Vec<Commit> {
        (0..n).map(|_| Commit::new(author, year)).collect()
    }

    fn stats_with_counts(counts: &[(&str, usize)]) -> ContributionStats {
        counts
            .iter()
            .flat_map(|(author, n)| commits_for(author, 2020, *n))
            .collect()
    }

    #[test]
    fn test_ranking_is_descending_and_capped() {
        let counts: Vec<(String, usize)> = (1..=15).map(|i| (format!("dev{i}"), i)).collect();
        let borrowed: Vec<(&str, usize)> = counts.iter().map(|(a, n)| (a.as_str(), *n)).collect();
        let stats = stats_with_counts(&borrowed);

        let ranked = top_contributors(&stats, None, DEFAULT_TOP_N);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0], ("dev15".to_string(), 15));
        assert_eq!(ranked[9], ("dev6".to_string(), 6));
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let stats = stats_with_counts(&[("carol", 2), ("alice", 3), ("bob", 2), ("dave", 2)]);

        let ranked = top_contributors(&stats, None, 3);

        assert_eq!(
            ranked,
            vec![
                ("alice".to_string(), 3),
                ("carol".to_string(), 2),
                ("bob".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_exclusion_applies_before_cut() {
        let stats = stats_with_counts(&[
            ("build-bot", 50),
            ("alice", 10),
            ("bob", 5),
            ("carol", 1),
        ]);
        let pattern = Regex::new("bot").unwrap();

        let ranked = top_contributors(&stats, Some(&pattern), 2);

        assert_eq!(
            ranked,
            vec![("alice".to_string(), 10), ("bob".to_string(), 5)]
        );
    }

    #[test]
    fn test_exclusion_leaving_one_contributor() {
        let stats = stats_with_counts(&[("bot-a", 4), ("human", 1), ("bot-b", 9)]);
        let pattern = Regex::new("^bot-").unwrap();

        let ranked = top_contributors(&stats, Some(&pattern), DEFAULT_TOP_N);

        assert_eq!(ranked, vec![("human".to_string(), 1)]);
    }

    #[test]
    fn test_empty_stats() {
        let stats = ContributionStats::new();
        assert!(top_contributors(&stats, None, DEFAULT_TOP_N).is_empty());

        let (years, series) = contributor_series(&stats, &[]);
        assert!(years.is_empty());
        assert!(series.is_empty());
    }

    #[test]
    fn test_series_fill_missing_years_with_zero() {
        let mut commits = commits_for("alice", 2018, 2);
        commits.extend(commits_for("bob", 2020, 1));
        commits.extend(commits_for("alice", 2021, 3));
        commits.extend(commits_for("carol", 2019, 1));
        let stats = ContributionStats::from_commits(commits);
        let ranked = top_contributors(&stats, None, 2);

        let (years, series) = contributor_series(&stats, &ranked);

        assert_eq!(years, vec![2018, 2019, 2020, 2021]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].author, "alice");
        assert_eq!(series[0].total, 5);
        assert_eq!(series[0].counts, vec![2, 0, 0, 3]);
        assert_eq!(series[1].author, "bob");
        assert_eq!(series[1].counts, vec![0, 0, 1, 0]);
    }
}
