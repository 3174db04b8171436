use clap::{CommandFactory, Parser};
use regex::Regex;
use std::path::PathBuf;

use crate::analysis::DEFAULT_TOP_N;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "gitalyzer")]
#[command(about = "Yearly commit, contributor and retention charts for a Git repository")]
#[command(version)]
#[command(override_usage = "gitalyzer [OPTIONS] <REPOSITORY_PATH> [EXCLUSION_PATTERN]")]
pub struct Cli {
    // A missing path prints usage and exits 1, handled in main
    #[arg(value_name = "REPOSITORY_PATH", help = "Path to the git repository")]
    pub repository_path: Option<PathBuf>,

    #[arg(help = "Regular expression; matching contributors are left out of the ranking")]
    pub exclusion_pattern: Option<String>,

    #[arg(long, help = "Number of top contributors to chart", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    #[arg(
        long,
        help = "Directory under which the chart directory is created",
        default_value = "."
    )]
    pub out_dir: PathBuf,

    #[arg(long, help = "Print the full report as JSON instead of a summary")]
    pub json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }

    /// Compile the exclusion pattern, if one was given.
    pub fn exclusion(&self) -> Result<Option<Regex>> {
        self.exclusion_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["gitalyzer", "/repos/tool", "bot$"]).unwrap();

        assert_eq!(cli.repository_path, Some(PathBuf::from("/repos/tool")));
        assert_eq!(cli.exclusion_pattern.as_deref(), Some("bot$"));
        assert_eq!(cli.top, DEFAULT_TOP_N);
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_repository_parses() {
        let cli = Cli::try_parse_from(["gitalyzer"]).unwrap();
        assert!(cli.repository_path.is_none());
    }

    #[test]
    fn test_exclusion_compiles() {
        let cli = Cli::try_parse_from(["gitalyzer", ".", "^dependabot"]).unwrap();
        let pattern = cli.exclusion().unwrap().unwrap();
        assert!(pattern.is_match("dependabot[bot]"));

        let cli = Cli::try_parse_from(["gitalyzer", "."]).unwrap();
        assert!(cli.exclusion().unwrap().is_none());
    }

    #[test]
    fn test_invalid_exclusion() {
        let cli = Cli::try_parse_from(["gitalyzer", ".", "(unclosed"]).unwrap();
        assert!(cli.exclusion().is_err());
    }

    #[test]
    fn test_usage_mentions_arguments() {
        let usage = Cli::usage();
        assert!(usage.contains("<REPOSITORY_PATH>"));
        assert!(!usage.contains("[REPOSITORY_PATH]"));
        assert!(usage.contains("[EXCLUSION_PATTERN]"));
    }
}
