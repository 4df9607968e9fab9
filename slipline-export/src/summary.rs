//! Statement summary: counts and money totals over parsed transactions,
//! grouped by transaction type in first-seen order.

use chrono::NaiveDateTime;
use serde::Serialize;
use slipline_core::Transaction;
use std::collections::HashMap;

/// Totals for one transaction-type label ("" for untyped lines)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTotal {
    pub transaction_type: String,
    pub count: usize,
    /// Signed sum of amounts
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct StatementSummary {
    pub count: usize,
    /// By direction; untyped lines count as inbound
    pub inbound_count: usize,
    pub outbound_count: usize,
    /// Sum of positive amounts
    pub total_inbound: f64,
    /// Absolute sum of negative amounts
    pub total_outbound: f64,
    pub net: f64,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Balance on the last transaction line
    pub closing_balance: Option<f64>,
    pub by_type: Vec<TypeTotal>,
}

pub fn summarize(txns: &[Transaction]) -> StatementSummary {
    let mut summary = StatementSummary {
        count: txns.len(),
        first: txns.first().map(|t| t.date),
        last: txns.last().map(|t| t.date),
        closing_balance: txns.last().map(|t| t.balance),
        ..Default::default()
    };

    let mut slots: HashMap<&str, usize> = HashMap::new();

    for t in txns {
        if t.is_outbound() {
            summary.outbound_count += 1;
        } else {
            summary.inbound_count += 1;
        }
        if t.amount > 0.0 {
            summary.total_inbound += t.amount;
        } else if t.amount < 0.0 {
            summary.total_outbound += t.amount.abs();
        }

        let slot = *slots.entry(t.transaction_type.as_str()).or_insert_with(|| {
            summary.by_type.push(TypeTotal {
                transaction_type: t.transaction_type.clone(),
                count: 0,
                total: 0.0,
            });
            summary.by_type.len() - 1
        });
        summary.by_type[slot].count += 1;
        summary.by_type[slot].total += t.amount;
    }

    summary.net = summary.total_inbound - summary.total_outbound;
    summary
}
