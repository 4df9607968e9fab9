//! Field tokenizer: timestamp, channel, details and the trailing money pair.
//!
//! Expected logical line after reconstruction:
//!   01-06-23 10:15 K PLUS โอนเงิน จาก ร้านค้า++ 1,000.00 5,000.00
//!   ^timestamp     ^channel ^details ...         ^number  ^number

use chrono::NaiveDateTime;
use regex::Regex;
use slipline_core::{Result, StatementProfile, TrailingOrder};

use crate::types::{LogicalLine, ParsedFields, RejectReason};

const TIMESTAMP_PATTERN: &str = r"^(\d{2}-\d{2}-\d{2})\s+(\d{2}:\d{2})";
const MONEY_PATTERN: &str = r"^\d+(?:,\d{3})*(?:\.\d{2})?$";

#[derive(Debug, Clone)]
pub struct Tokenizer {
    timestamp: Regex,
    money: Regex,
    order: TrailingOrder,
}

impl Tokenizer {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        Ok(Self {
            timestamp: Regex::new(TIMESTAMP_PATTERN)?,
            money: Regex::new(MONEY_PATTERN)?,
            order: profile.trailing_order,
        })
    }

    pub fn tokenize(&self, line: &LogicalLine) -> std::result::Result<ParsedFields, RejectReason> {
        let text = line.as_str().trim();
        let caps = self
            .timestamp
            .captures(text)
            .ok_or(RejectReason::MissingTimestamp)?;

        let stamp = format!("{} {}", &caps[1], &caps[2]);
        let timestamp = NaiveDateTime::parse_from_str(&stamp, "%d-%m-%y %H:%M")
            .map_err(|_| RejectReason::InvalidTimestamp(caps[0].to_string()))?;

        let end = caps.get(0).map_or(0, |m| m.end());
        let rest = text[end..].trim();
        let (numbers, content) = self.split_trailing_numbers(rest);
        if numbers.len() < 2 {
            return Err(RejectReason::MissingNumbers { found: numbers.len() });
        }

        let first = to_number(numbers[0])?;
        let second = to_number(numbers[1])?;
        let (balance, amount) = match self.order {
            TrailingOrder::BalanceThenAmount => (first, second),
            TrailingOrder::AmountThenBalance => (second, first),
        };

        if content.is_empty() {
            return Err(RejectReason::MissingChannel);
        }
        let (channel, details) = content.split_once(' ').unwrap_or((content.as_str(), ""));

        Ok(ParsedFields {
            timestamp,
            channel: channel.to_string(),
            details: details.to_string(),
            balance,
            amount,
        })
    }

    /// Walk tokens from the end, taking the first two money-shaped ones.
    /// Every other token stays in the content, in its original order.
    fn split_trailing_numbers<'a>(&self, rest: &'a str) -> (Vec<&'a str>, String) {
        let mut numbers = Vec::with_capacity(2);
        let mut content = Vec::new();

        for token in rest.split_whitespace().rev() {
            if numbers.len() < 2 && self.money.is_match(token) {
                numbers.push(token);
            } else {
                content.push(token);
            }
        }

        numbers.reverse();
        content.reverse();
        (numbers, content.join(" "))
    }
}

/// Zero code points of the decimal digit blocks `\d` accepts in statements
const DIGIT_ZEROS: [u32; 7] = [
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0E50, // Thai
    0x0ED0, // Lao
    0xFF10, // Fullwidth
];

/// Map a non-ASCII decimal digit to its ASCII form; anything else is unchanged.
fn ascii_digit(c: char) -> char {
    let u = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&u))
        .and_then(|&zero| char::from_digit(u - zero, 10))
        .unwrap_or(c)
}

fn to_number(token: &str) -> std::result::Result<f64, RejectReason> {
    token
        .chars()
        .filter(|&c| c != ',')
        .map(ascii_digit)
        .collect::<String>()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RejectReason::InvalidNumber {
            token: token.to_string(),
        })
}
