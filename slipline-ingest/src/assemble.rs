//! Record assembly: tokenized fields + classification -> Transaction

use slipline_core::Transaction;

use crate::classify::Classification;
use crate::types::{LogicalLine, ParsedFields};

/// Build the final record. Outbound amounts become negative; the balance is
/// kept exactly as extracted.
pub fn assemble(line: &LogicalLine, fields: ParsedFields, class: Classification) -> Transaction {
    Transaction {
        date: fields.timestamp,
        channel: class.channel,
        details: class.details,
        transaction_type: class.transaction_type,
        direction: class.direction,
        recipient: class.recipient,
        amount: class.direction.signed(fields.amount),
        balance: fields.balance,
        full_text: line.as_str().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use slipline_core::Direction;

    fn fields(amount: f64) -> ParsedFields {
        ParsedFields {
            timestamp: NaiveDate::from_ymd_opt(2023, 6, 1)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            channel: "K".to_string(),
            details: "PLUS x".to_string(),
            balance: 5000.0,
            amount,
        }
    }

    fn class(direction: Direction) -> Classification {
        Classification {
            channel: "K PLUS".to_string(),
            details: "x".to_string(),
            transaction_type: String::new(),
            direction,
            recipient: String::new(),
        }
    }

    #[test]
    fn test_outbound_is_negative() {
        let line = LogicalLine::new(" 01-06-23 10:15 K PLUS x 5,000.00 1,000.00 ");
        let txn = assemble(&line, fields(1000.0), class(Direction::Outbound));
        assert_eq!(txn.amount, -1000.0);
        assert_eq!(txn.balance, 5000.0);
        assert_eq!(txn.full_text, "01-06-23 10:15 K PLUS x 5,000.00 1,000.00");
        assert_eq!(txn.channel, "K PLUS");
    }

    #[test]
    fn test_inbound_keeps_parsed_value() {
        let line = LogicalLine::new("01-06-23 10:15 K PLUS x 5,000.00 1,000.00");
        let txn = assemble(&line, fields(1000.0), class(Direction::Inbound));
        assert_eq!(txn.amount, 1000.0);
        assert_eq!(txn.direction, Direction::Inbound);
    }
}
