//! Breadth-first search over the implicit link graph.
//!
//! The graph is never built up front. A node's neighbours are computed on
//! demand as fetch, locate the article body, extract article links. The
//! search keeps two pieces of state, both local to one [`ChainFinder::find_chain`]
//! call:
//!
//! - the **frontier**, a FIFO queue of titles waiting to be expanded
//! - the **visited map**, child title to the title it was discovered from
//!   (`None` for the start page), which doubles as the seen-set and as the
//!   parent pointers used to rebuild the chain
//!
//! Because the frontier is strictly FIFO, pages are expanded level by level
//! and the first time the target shows up among a page's links the chain
//! through that page is a shortest one. Among equally short chains, the one
//! returned is determined by frontier order and by link order within each
//! page (first occurrence in the markup).
//!
//! # Prefetching
//!
//! With [`SearchConfig::concurrency`] above one, several frontier heads are
//! fetched at once. Results are committed in frontier order, so the visited
//! map, the frontier and the returned chain are the same as for a sequential
//! run; the only difference is that a few extra pages may be downloaded after
//! the target has already been seen.

use crate::content::ContentMarkers;
use crate::fetcher::PageSource;
use crate::links::extract;
use crate::models::{Chain, SearchOutcome, SearchReport, SearchStats};
use crate::utils::same_title;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Log a progress line every this many fetches.
const PROGRESS_INTERVAL: usize = 100;

/// Child title to the title it was discovered from; `None` marks the start.
type VisitedMap = HashMap<String, Option<String>>;

/// Limits and tuning for one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Stop with [`SearchOutcome::BudgetExhausted`] instead of issuing more
    /// than this many fetches.
    pub max_fetches: Option<usize>,
    /// Stop with [`SearchOutcome::BudgetExhausted`] once this much time has
    /// passed. Checked between fetch batches.
    pub max_duration: Option<Duration>,
    /// Number of frontier pages fetched at once. `1` is fully sequential.
    pub concurrency: usize,
    /// Markers delimiting the article body.
    pub markers: ContentMarkers,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_fetches: None,
            max_duration: None,
            concurrency: 1,
            markers: ContentMarkers::default(),
        }
    }
}

/// Finds link chains between pages served by a [`PageSource`].
///
/// The finder holds no per-search state, so one instance can serve any
/// number of searches, including concurrent ones.
#[derive(Debug)]
pub struct ChainFinder<S> {
    source: S,
    config: SearchConfig,
}

impl<S> ChainFinder<S>
where
    S: PageSource,
{
    pub fn new(source: S, config: SearchConfig) -> Self {
        Self { source, config }
    }

    /// Search for a chain of links from `start` to `target`.
    ///
    /// Target matching ignores case; if `start` already matches `target`
    /// the chain is `[start]` and nothing is fetched. Unavailable pages are
    /// skipped as dead ends. The search never fails: it ends as
    /// [`SearchOutcome::Found`], [`SearchOutcome::NotFound`] when every
    /// reachable page has been expanded, or [`SearchOutcome::BudgetExhausted`].
    #[instrument(level = "info", skip(self))]
    pub async fn find_chain(&self, start: &str, target: &str) -> SearchReport {
        let t0 = Instant::now();
        let mut stats = SearchStats::default();
        let outcome = self.run(start, target, t0, &mut stats).await;
        stats.elapsed_ms = t0.elapsed().as_millis() as u64;

        match &outcome {
            SearchOutcome::Found(chain) => info!(
                length = chain.len(),
                fetched = stats.pages_fetched,
                unavailable = stats.pages_unavailable,
                discovered = stats.links_discovered,
                elapsed_ms = stats.elapsed_ms,
                "Chain found"
            ),
            SearchOutcome::NotFound => info!(
                fetched = stats.pages_fetched,
                unavailable = stats.pages_unavailable,
                discovered = stats.links_discovered,
                elapsed_ms = stats.elapsed_ms,
                "Frontier exhausted; no chain exists from start"
            ),
            SearchOutcome::BudgetExhausted => warn!(
                fetched = stats.pages_fetched,
                discovered = stats.links_discovered,
                elapsed_ms = stats.elapsed_ms,
                max_fetches = ?self.config.max_fetches,
                max_duration = ?self.config.max_duration,
                "Exploration budget exhausted before the search finished"
            ),
        }

        SearchReport {
            start: start.to_string(),
            target: target.to_string(),
            outcome,
            stats,
        }
    }

    async fn run(
        &self,
        start: &str,
        target: &str,
        t0: Instant,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        if same_title(start, target) {
            stats.links_discovered = 1;
            return SearchOutcome::Found(Chain(vec![start.to_string()]));
        }

        let width = self.config.concurrency.max(1);
        let mut frontier = VecDeque::from([start.to_string()]);
        let mut visited = VisitedMap::from([(start.to_string(), None)]);
        stats.links_discovered = visited.len();

        while !frontier.is_empty() {
            let Some(batch_size) = self.next_batch_size(frontier.len(), width, t0, stats) else {
                return SearchOutcome::BudgetExhausted;
            };
            let batch: Vec<String> = frontier.drain(..batch_size).collect();
            let before = stats.pages_fetched;
            stats.pages_fetched += batch.len();
            if stats.pages_fetched / PROGRESS_INTERVAL > before / PROGRESS_INTERVAL {
                info!(
                    fetched = stats.pages_fetched,
                    frontier = frontier.len(),
                    discovered = visited.len(),
                    "Search progress"
                );
            }

            // `buffered` yields in submission order, which keeps the commit
            // order below identical to a sequential walk of the frontier.
            let pages: Vec<(String, Option<String>)> = stream::iter(batch)
                .map(|title| async move {
                    let page = self.source.fetch(&title).await;
                    (title, page)
                })
                .buffered(width)
                .collect()
                .await;

            for (current, page) in pages {
                let Some(page) = page else {
                    stats.pages_unavailable += 1;
                    continue;
                };

                let window = self.config.markers.locate(&page);
                let links = extract(&page, window);
                debug!(page = %current, links = links.len(), "Expanding page");

                for link in links {
                    if same_title(&link, target) {
                        visited
                            .entry(link.clone())
                            .or_insert_with(|| Some(current.clone()));
                        stats.links_discovered = visited.len();
                        return SearchOutcome::Found(make_chain(&link, &visited));
                    }
                    if !visited.contains_key(&link) {
                        visited.insert(link.clone(), Some(current.clone()));
                        frontier.push_back(link);
                    }
                }
            }
            stats.links_discovered = visited.len();
        }

        SearchOutcome::NotFound
    }

    /// How many frontier heads to fetch next, or `None` if the budget is spent.
    fn next_batch_size(
        &self,
        queued: usize,
        width: usize,
        t0: Instant,
        stats: &SearchStats,
    ) -> Option<usize> {
        if let Some(limit) = self.config.max_duration {
            if t0.elapsed() >= limit {
                return None;
            }
        }
        let mut size = width.min(queued);
        if let Some(max) = self.config.max_fetches {
            let remaining = max.saturating_sub(stats.pages_fetched);
            if remaining == 0 {
                return None;
            }
            size = size.min(remaining);
        }
        Some(size)
    }
}

/// Walk parent pointers from `target` back to the root and reverse.
fn make_chain(target: &str, visited: &VisitedMap) -> Chain {
    let mut pages = vec![target.to_string()];
    let mut cursor = visited.get(target).and_then(|parent| parent.as_deref());
    while let Some(parent) = cursor {
        pages.push(parent.to_string());
        cursor = visited.get(parent).and_then(|p| p.as_deref());
    }
    pages.reverse();
    Chain(pages)
}
