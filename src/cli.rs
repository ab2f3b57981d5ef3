//! Command-line interface definitions for wiki_chain.
//!
//! All options except the start page can also be given through environment
//! variables.

use crate::fetcher::FetcherConfig;
use crate::search::SearchConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Бумага -> Философия on ru.wikipedia.org
/// wiki_chain
///
/// # Different endpoints and wiki, capped at 5000 page fetches
/// wiki_chain Paper --target Philosophy \
///     --base-url https://en.wikipedia.org/wiki/ --max-fetches 5000
///
/// # Fetch eight pages at a time and keep a JSON report
/// wiki_chain Paper -t Philosophy --concurrency 8 --json-output report.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Title of the page to start from
    #[arg(default_value = "Бумага")]
    pub start: String,

    /// Title of the page to reach (matched case-insensitively)
    #[arg(short, long, env = "WIKI_CHAIN_TARGET", default_value = "Философия")]
    pub target: String,

    /// URL prefix that page titles are appended to
    #[arg(long, env = "WIKI_CHAIN_BASE_URL", default_value = "https://ru.wikipedia.org/wiki/")]
    pub base_url: String,

    /// Stop after this many page fetches
    #[arg(long, env = "WIKI_CHAIN_MAX_FETCHES")]
    pub max_fetches: Option<usize>,

    /// Stop after this many seconds
    #[arg(long, env = "WIKI_CHAIN_MAX_SECONDS")]
    pub max_seconds: Option<u64>,

    /// Number of frontier pages fetched at once
    #[arg(long, env = "WIKI_CHAIN_CONCURRENCY", default_value_t = 1,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, env = "WIKI_CHAIN_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the search report (outcome and statistics) as JSON to this path
    #[arg(short, long, env = "WIKI_CHAIN_JSON_OUTPUT")]
    pub json_output: Option<PathBuf>,
}

impl Cli {
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..FetcherConfig::default()
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_fetches: self.max_fetches,
            max_duration: self.max_seconds.map(Duration::from_secs),
            concurrency: usize::from(self.concurrency),
            ..SearchConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["wiki_chain"]);

        assert_eq!(cli.start, "Бумага");
        assert_eq!(cli.target, "Философия");
        assert_eq!(cli.base_url, "https://ru.wikipedia.org/wiki/");
        assert_eq!(cli.concurrency, 1);
        assert!(cli.json_output.is_none());

        let search = cli.search_config();
        assert_eq!(search.max_fetches, None);
        assert_eq!(search.max_duration, None);
        assert_eq!(search.concurrency, 1);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "wiki_chain",
            "Paper",
            "--target",
            "Philosophy",
            "--base-url",
            "https://en.wikipedia.org/wiki/",
            "--max-fetches",
            "500",
            "--max-seconds",
            "60",
            "--concurrency",
            "4",
            "--timeout-secs",
            "10",
            "--json-output",
            "/tmp/report.json",
        ]);

        assert_eq!(cli.start, "Paper");
        assert_eq!(cli.target, "Philosophy");

        let fetcher = cli.fetcher_config();
        assert_eq!(fetcher.base_url, "https://en.wikipedia.org/wiki/");
        assert_eq!(fetcher.timeout, Duration::from_secs(10));

        let search = cli.search_config();
        assert_eq!(search.max_fetches, Some(500));
        assert_eq!(search.max_duration, Some(Duration::from_secs(60)));
        assert_eq!(search.concurrency, 4);
        assert_eq!(cli.json_output, Some(PathBuf::from("/tmp/report.json")));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["wiki_chain", "Paper", "-t", "Ink", "-j", "out.json"]);

        assert_eq!(cli.target, "Ink");
        assert_eq!(cli.json_output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_cli_rejects_zero_concurrency() {
        assert!(Cli::try_parse_from(["wiki_chain", "--concurrency", "0"]).is_err());
    }
}
