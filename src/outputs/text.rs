//! Plain-text chain rendering.

use crate::models::SearchReport;
use std::io::{self, Write};

/// Write the chain of `report` to `out`, one title per line.
///
/// Nothing is written unless the search found a chain.
pub fn write_chain<W: Write>(report: &SearchReport, out: &mut W) -> io::Result<()> {
    if let Some(chain) = report.outcome.chain().filter(|c| !c.is_empty()) {
        write!(out, "{chain}")?;
        out.flush()?;
    }
    Ok(())
}
