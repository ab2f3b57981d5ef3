//! Data models for search results.
//!
//! - [`Chain`]: the reconstructed path from start to target
//! - [`SearchOutcome`]: how a search terminated
//! - [`SearchStats`]: counters collected while searching
//! - [`SearchReport`]: outcome plus statistics, serialised for `--json-output`

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of page titles, start first and target last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain(pub Vec<String>);

impl Chain {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders one title per line, start first.
impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.0 {
            writeln!(f, "{page}")?;
        }
        Ok(())
    }
}

/// Terminal state of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "chain", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The target was reached.
    Found(Chain),
    /// The frontier emptied without reaching the target.
    NotFound,
    /// The fetch or time budget ran out before the search finished.
    BudgetExhausted,
}

impl SearchOutcome {
    /// Short machine-readable name, as used in the JSON report.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }

    pub fn chain(&self) -> Option<&Chain> {
        match self {
            Self::Found(chain) => Some(chain),
            _ => None,
        }
    }
}

/// Counters for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Fetches issued, successful or not.
    pub pages_fetched: usize,
    /// Fetches that came back unavailable.
    pub pages_unavailable: usize,
    /// Distinct titles recorded in the visited map, start included.
    pub links_discovered: usize,
    /// Wall-clock duration of the search in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of one search: endpoints, outcome and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub start: String,
    pub target: String,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_display_one_per_line() {
        let chain = Chain(vec!["Бумага".into(), "Наука".into(), "Философия".into()]);
        assert_eq!(chain.to_string(), "Бумага\nНаука\nФилософия\n");
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_outcome_serialization() {
        let found = SearchOutcome::Found(Chain(vec!["A".into(), "B".into()]));
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["chain"][1], "B");

        let json = serde_json::to_value(SearchOutcome::BudgetExhausted).unwrap();
        assert_eq!(json["status"], "budget_exhausted");
        assert_eq!(SearchOutcome::BudgetExhausted.status(), "budget_exhausted");
        assert_eq!(SearchOutcome::NotFound.status(), "not_found");
    }

    #[test]
    fn test_report_roundtrip() {
        let report = SearchReport {
            start: "A".into(),
            target: "B".into(),
            outcome: SearchOutcome::NotFound,
            stats: SearchStats {
                pages_fetched: 3,
                pages_unavailable: 1,
                links_discovered: 4,
                elapsed_ms: 12,
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert!(back.outcome.chain().is_none());
    }
}
