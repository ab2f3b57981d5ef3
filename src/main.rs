//! # wiki_chain
//!
//! Finds a chain of hyperlinks leading from one encyclopedia article to
//! another by crawling the wiki breadth-first, one page at a time.
//!
//! ## Usage
//!
//! ```sh
//! wiki_chain Бумага --target Философия
//! ```
//!
//! The chain is printed to stdout one title per line, start first. Logs go to
//! stderr; set `RUST_LOG=debug` to watch each page being expanded.
//!
//! ## Architecture
//!
//! 1. **Fetching** ([`fetcher`]): download a page's markup, or treat it as a
//!    dead end if that fails
//! 2. **Windowing** ([`content`]): cut the article body out of the page
//! 3. **Extraction** ([`links`]): collect the article links in the body
//! 4. **Search** ([`search`]): FIFO frontier plus parent map, stop at the
//!    target, rebuild the chain
//! 5. **Output** ([`outputs`]): print the chain, optionally write a JSON report
//!
//! Exits with status 1 when no chain was found or the exploration budget ran
//! out.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod content;
mod fetcher;
mod links;
mod models;
mod outputs;
mod search;
mod utils;

use cli::Cli;
use fetcher::HttpFetcher;
use models::SearchOutcome;
use outputs::{json, text};
use search::ChainFinder;

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    info!(start = %args.start, target = %args.target, base_url = %args.base_url, "wiki_chain starting up");

    let fetcher = match HttpFetcher::new(&args.fetcher_config()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(base_url = %args.base_url, error = %e, "Failed to build page fetcher");
            return Err(e);
        }
    };
    let finder = ChainFinder::new(fetcher, args.search_config());

    let report = finder.find_chain(&args.start, &args.target).await;

    text::write_chain(&report, &mut std::io::stdout().lock())?;

    if let Some(path) = &args.json_output {
        if let Err(e) = json::write_report(&report, path).await {
            error!(path = %path.display(), error = %e, "Failed to write JSON report");
            return Err(e);
        }
    }

    let code = match &report.outcome {
        SearchOutcome::Found(_) => ExitCode::SUCCESS,
        SearchOutcome::NotFound | SearchOutcome::BudgetExhausted => ExitCode::FAILURE,
    };
    info!(
        outcome = report.outcome.status(),
        elapsed_ms = report.stats.elapsed_ms,
        "Execution complete"
    );
    Ok(code)
}
