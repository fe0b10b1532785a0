//! Output module for presenting search results
//!
//! This module handles:
//! - Rendering the ranked results as an aligned text table
//! - Reporting the sources that failed during a search
//! - Summarising a search in which every source failed

mod table;

pub use table::{render_failures, render_results};

use crate::search::{AggregateResult, SourceFailure};
use crate::RippleError;

/// Message shown when every source answered but none had a match
pub const NO_RESULT_MESSAGE: &str = "No result found...";

/// Prints a search aggregate to stdout
///
/// Failed sources are listed after the table so partial results are never
/// mistaken for complete ones.
///
/// # Arguments
///
/// * `aggregate` - A successful, ranked aggregate
pub fn print_aggregate(aggregate: &AggregateResult) {
    if aggregate.merged.is_empty() {
        println!("{}", NO_RESULT_MESSAGE);
    } else {
        print!("{}", render_results(&aggregate.merged));
    }

    if !aggregate.failures.is_empty() {
        println!();
        println!(
            "Some sources could not be searched ({}):",
            aggregate.failures.len()
        );
        print!("{}", render_failures(&aggregate.failures));
    }
}

/// Renders the report for a search in which every source failed
///
/// One headline followed by one line per failed source.
pub fn render_all_failed(failures: &[SourceFailure]) -> String {
    format!("{}:\n{}", all_failed_headline(failures), render_failures(failures))
}

fn all_failed_headline(failures: &[SourceFailure]) -> String {
    format!("All {} searches returned an error", failures.len())
}
