use std::collections::{BTreeSet, HashSet};

use super::aggregate::ContributionStats;
use crate::types::RetentionPoint;

/// Contributor additions and dropoffs for every year from the first to the
/// last observed year, inclusive.
///
/// A year without commits has an empty contributor set: it adds nobody and
/// drops everyone who was active the year before. Returns an empty vector
/// when no commits were recorded.
pub fn retention(stats: &ContributionStats) -> Vec<RetentionPoint> {
    let yearly = stats.yearly_contributors();
    let (first, last) = match (yearly.keys().next(), yearly.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    let empty = BTreeSet::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut previous: Option<&BTreeSet<String>> = None;
    let mut points = Vec::with_capacity((last - first + 1) as usize);

    for year in first..=last {
        let current = yearly.get(&year).unwrap_or(&empty);

        let additions = current
            .iter()
            .filter(|author| !seen.contains(author.as_str()))
            .count();
        let dropoffs = previous.map_or(0, |prev| prev.difference(current).count());

        seen.extend(current.iter().map(String::as_str));
        previous = Some(current);

        points.push(RetentionPoint {
            year,
            additions,
            dropoffs,
        });
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Commit;
    use pretty_assertions::assert_eq;

    fn point(year: i32, additions: usize, dropoffs: usize) -> RetentionPoint {
        RetentionPoint {
            year,
            additions,
            dropoffs,
        }
    }

    #[test]
    fn test_three_year_history() {
        let stats = ContributionStats::from_commits(vec![
            Commit::new("A", 2020),
            Commit::new("B", 2020),
            Commit::new("A", 2021),
            Commit::new("A", 2022),
            Commit::new("C", 2022),
        ]);

        assert_eq!(
            retention(&stats),
            vec![point(2020, 2, 0), point(2021, 0, 1), point(2022, 1, 0)]
        );
    }

    #[test]
    fn test_empty_history() {
        assert!(retention(&ContributionStats::new()).is_empty());
    }

    #[test]
    fn test_identical_consecutive_years() {
        let stats = ContributionStats::from_commits(vec![
            Commit::new("A", 2015),
            Commit::new("B", 2015),
            Commit::new("B", 2016),
            Commit::new("A", 2016),
            Commit::new("A", 2016),
        ]);

        let points = retention(&stats);
        assert_eq!(points[0], point(2015, 2, 0));
        assert_eq!(points[1], point(2016, 0, 0));
    }

    #[test]
    fn test_gap_years_are_filled() {
        let stats = ContributionStats::from_commits(vec![
            Commit::new("A", 2010),
            Commit::new("B", 2010),
            Commit::new("B", 2013),
            Commit::new("C", 2013),
        ]);

        assert_eq!(
            retention(&stats),
            vec![
                point(2010, 2, 0),
                point(2011, 0, 2),
                point(2012, 0, 0),
                point(2013, 1, 0),
            ]
        );
    }

    #[test]
    fn test_returning_contributor_is_not_an_addition() {
        let stats = ContributionStats::from_commits(vec![
            Commit::new("A", 2000),
            Commit::new("B", 2001),
            Commit::new("A", 2002),
        ]);

        assert_eq!(
            retention(&stats),
            vec![point(2000, 1, 0), point(2001, 1, 1), point(2002, 0, 1)]
        );
    }
}
