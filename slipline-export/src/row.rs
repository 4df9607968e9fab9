//! The tabular row every writer emits.
//!
//! Column order and number formatting are a contract with downstream
//! tooling: Date (DD-MM-YY), Time (HH:MM), Channel, Details,
//! Transaction Type, Recipient, Amount and Balance as 2-decimal strings.

use serde::Serialize;
use slipline_core::Transaction;

pub const COLUMNS: [&str; 8] = [
    "Date",
    "Time",
    "Channel",
    "Details",
    "Transaction Type",
    "Recipient",
    "Amount",
    "Balance",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    #[serde(rename = "Details")]
    pub details: String,
    #[serde(rename = "Transaction Type")]
    pub transaction_type: String,
    #[serde(rename = "Recipient")]
    pub recipient: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Balance")]
    pub balance: String,
}

impl From<&Transaction> for StatementRow {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date_label(),
            time: t.time_label(),
            channel: t.channel.clone(),
            details: t.details.clone(),
            transaction_type: t.transaction_type.clone(),
            recipient: t.recipient.clone(),
            amount: format_money(t.amount),
            balance: format_money(t.balance),
        }
    }
}

impl StatementRow {
    /// Cell values in column order
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.date,
            &self.time,
            &self.channel,
            &self.details,
            &self.transaction_type,
            &self.recipient,
            &self.amount,
            &self.balance,
        ]
    }
}

/// Fixed two decimals, no thousands separator
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}
