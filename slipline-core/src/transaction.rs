//! Transaction record types produced by statement parsing

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Money flow of a transaction, derived from keyword presence in its details
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Credit into the account. Also used when no keyword matched.
    #[default]
    #[serde(rename = "inbound")]
    Inbound,
    /// Debit out of the account
    #[serde(rename = "outbound")]
    Outbound,
}

impl Direction {
    pub fn is_outbound(&self) -> bool {
        matches!(self, Direction::Outbound)
    }

    /// Apply the statement sign convention: outbound amounts are negative.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Direction::Outbound => -amount.abs(),
            Direction::Inbound => amount,
        }
    }
}

/// One parsed statement transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date and time as printed on the statement (no timezone)
    pub date: NaiveDateTime,
    /// Origination channel, e.g. "K PLUS", "EDC/K SHOP"
    pub channel: String,
    /// Free-text description after channel normalization
    pub details: String,
    /// Matched type keyword, empty when nothing matched
    pub transaction_type: String,
    pub direction: Direction,
    /// Counterparty or reference code, empty when not found
    pub recipient: String,
    /// Negative = outbound
    pub amount: f64,
    /// Running balance, as extracted
    pub balance: f64,
    /// The reconstructed statement line this record came from
    pub full_text: String,
}

impl Transaction {
    /// Statement date column, `DD-MM-YY`
    pub fn date_label(&self) -> String {
        self.date.format("%d-%m-%y").to_string()
    }

    /// Statement time column, `HH:MM`
    pub fn time_label(&self) -> String {
        self.date.format("%H:%M").to_string()
    }

    pub fn is_outbound(&self) -> bool {
        self.direction.is_outbound()
    }

    pub fn is_inbound(&self) -> bool {
        !self.direction.is_outbound()
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}
