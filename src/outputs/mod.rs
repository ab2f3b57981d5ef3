//! Output of search results.
//!
//! # Submodules
//!
//! - [`text`]: Prints a found chain one title per line, start first
//! - [`json`]: Writes the full [`SearchReport`](crate::models::SearchReport)
//!   (outcome and statistics) to a JSON file
//!
//! Only the chain goes to stdout; everything else is logged to stderr so the
//! output can be piped.

pub mod json;
pub mod text;
