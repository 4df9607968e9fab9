//! Values passed between the parser stages, plus per-line rejection diagnostics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use slipline_core::Transaction;
use thiserror::Error;

/// One candidate transaction: an anchor line plus its wrapped continuations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
}

impl LogicalLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Tokenized line before classification. Amount is still unsigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    pub timestamp: NaiveDateTime,
    pub channel: String,
    pub details: String,
    pub balance: f64,
    pub amount: f64,
}

/// Why a logical line did not become a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RejectReason {
    #[error("line does not start with a DD-MM-YY HH:MM timestamp")]
    MissingTimestamp,

    #[error("timestamp '{0}' is not a valid date")]
    InvalidTimestamp(String),

    #[error("expected two trailing numbers, found {found}")]
    MissingNumbers { found: usize },

    #[error("numeric token '{token}' could not be converted")]
    InvalidNumber { token: String },

    #[error("no channel token before the amounts")]
    MissingChannel,
}

/// A dropped line and the reason it was dropped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub line: String,
    pub reason: RejectReason,
}

/// Accepted records and rejection diagnostics, both in statement order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    pub rejections: Vec<Rejection>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.rejections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_serializes_reason() {
        let r = Rejection {
            line: "01-06-23 11:00 K PLUS ABC 10.00".to_string(),
            reason: RejectReason::MissingNumbers { found: 1 },
        };
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["reason"]["MissingNumbers"]["found"], 1);
        assert_eq!(
            r.reason.to_string(),
            "expected two trailing numbers, found 1"
        );
    }
}
