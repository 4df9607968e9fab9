//! Line reconstruction: joins wrapped PDF text back into one line per transaction.
//!
//! Extracted statement text arrives page by page, each page closed by a fixed
//! footer. A transaction starts on a line beginning with `DD-MM-YY HH:MM`;
//! when its description is too long for the column, the rest lands on the
//! following physical lines without a timestamp.

use regex::Regex;
use slipline_core::{Result, StatementProfile};
use tracing::{debug, trace};

use crate::types::LogicalLine;

/// Start-of-record timestamp, shared with the tokenizer
pub const ANCHOR_PATTERN: &str = r"^\d{2}-\d{2}-\d{2}\s+\d{2}:\d{2}";

#[derive(Debug, Clone)]
pub struct Reconstructor {
    anchor: Regex,
    page_footer: String,
    opening_marker: String,
}

impl Reconstructor {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        Ok(Self {
            anchor: Regex::new(ANCHOR_PATTERN)?,
            page_footer: profile.page_footer.clone(),
            opening_marker: profile.opening_marker.clone(),
        })
    }

    /// Split on the page footer, keep sections carrying the opening-balance
    /// marker, and rebuild the logical lines of each one in order.
    pub fn reconstruct(&self, text: &str) -> Vec<LogicalLine> {
        text.split(self.page_footer.as_str())
            .enumerate()
            .filter(|(index, section)| {
                let keep = section.contains(self.opening_marker.as_str());
                if !keep {
                    debug!(section = index, "skipping section without opening balance marker");
                }
                keep
            })
            .flat_map(|(_, section)| self.reconstruct_section(section))
            .collect()
    }

    /// Rebuild logical lines of a single section. A section without anchors
    /// yields nothing.
    pub fn reconstruct_section(&self, section: &str) -> Vec<LogicalLine> {
        section
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .fold(Accumulator::default(), |acc, line| {
                acc.push(line, self.is_anchor(line))
            })
            .finish()
    }

    pub fn is_anchor(&self, line: &str) -> bool {
        self.anchor.is_match(line)
    }
}

/// Fold state: finished lines plus the line still collecting continuations
#[derive(Debug, Default)]
struct Accumulator {
    lines: Vec<LogicalLine>,
    current: Option<String>,
}

impl Accumulator {
    fn push(mut self, line: &str, is_anchor: bool) -> Self {
        if is_anchor {
            if let Some(done) = self.current.replace(line.to_string()) {
                self.lines.push(LogicalLine::new(done));
            }
        } else if let Some(current) = self.current.as_mut() {
            current.push(' ');
            current.push_str(line);
        } else {
            // header rows before the first transaction of the page
            trace!(line, "dropping fragment before first anchor");
        }
        self
    }

    fn finish(mut self) -> Vec<LogicalLine> {
        if let Some(done) = self.current.take() {
            self.lines.push(LogicalLine::new(done));
        }
        self.lines
    }
}
