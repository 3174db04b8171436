use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::types::{Commit, YearlyActivity};

/// Commit totals for a single contributor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributorTotals {
    pub author: String,
    /// Commits across all years
    pub total: usize,
    /// Commits per year; only years with at least one commit are present
    pub yearly: BTreeMap<i32, usize>,
}

/// The four derived structures built from one pass over a commit log.
///
/// Contributors are kept in order of first appearance so that ranking can
/// break ties deterministically.
#[derive(Clone, Debug, Default)]
pub struct ContributionStats {
    commit_count: usize,
    yearly_commits: BTreeMap<i32, usize>,
    yearly_contributors: BTreeMap<i32, BTreeSet<String>>,
    contributors: Vec<ContributorTotals>,
    index: HashMap<String, usize>,
}

impl ContributionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a commit enumeration in a single pass.
    pub fn from_commits<I>(commits: I) -> Self
    where
        I: IntoIterator<Item = Commit>,
    {
        let mut stats = Self::new();
        for commit in commits {
            stats.record(commit);
        }
        stats
    }

    /// Fold one commit into every structure.
    pub fn record(&mut self, commit: Commit) {
        let Commit { author, year } = commit;

        self.commit_count += 1;
        *self.yearly_commits.entry(year).or_insert(0) += 1;
        self.yearly_contributors
            .entry(year)
            .or_default()
            .insert(author.clone());

        let slot = match self.index.get(&author) {
            Some(&slot) => slot,
            None => {
                let slot = self.contributors.len();
                self.index.insert(author.clone(), slot);
                self.contributors.push(ContributorTotals {
                    author,
                    total: 0,
                    yearly: BTreeMap::new(),
                });
                slot
            }
        };
        let totals = &mut self.contributors[slot];
        totals.total += 1;
        *totals.yearly.entry(year).or_insert(0) += 1;
    }

    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    pub fn is_empty(&self) -> bool {
        self.commit_count == 0
    }

    pub fn yearly_commits(&self) -> &BTreeMap<i32, usize> {
        &self.yearly_commits
    }

    pub fn yearly_contributors(&self) -> &BTreeMap<i32, BTreeSet<String>> {
        &self.yearly_contributors
    }

    /// Per-contributor totals in order of first appearance.
    pub fn contributors(&self) -> &[ContributorTotals] {
        &self.contributors
    }

    pub fn contributor(&self, author: &str) -> Option<&ContributorTotals> {
        self.index.get(author).map(|&slot| &self.contributors[slot])
    }

    /// Sorted years, with commit and contributor counts for each.
    pub fn yearly_activity(&self) -> YearlyActivity {
        let mut activity = YearlyActivity::default();
        for (&year, &count) in &self.yearly_commits {
            activity.years.push(year);
            activity.total_commits.push(count);
            activity.total_contributors.push(
                self.yearly_contributors
                    .get(&year)
                    .map_or(0, BTreeSet::len),
            );
        }
        activity
    }
}

impl FromIterator<Commit> for ContributionStats {
    fn from_iter<I: IntoIterator<Item = Commit>>(iter: I) -> Self {
        Self::from_commits(iter)
    }
}
