use slipline_core::Transaction;

use crate::row::StatementRow;

/// Case-insensitive substring search over every exported column.
/// An empty (or blank) query keeps everything.
pub fn search<'a>(txns: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return txns.iter().collect();
    }

    txns.iter()
        .filter(|t| {
            StatementRow::from(*t)
                .cells()
                .iter()
                .any(|cell| cell.to_lowercase().contains(&needle))
        })
        .collect()
}
