//! Statement profiles: the markers and vocabulary tables for one statement template.
//!
//! Everything language- or bank-specific lives here as data so the parser's
//! control flow never changes when a new vocabulary is added. The default
//! profile describes the KBank (Kasikornbank) Thai statement layout.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which trailing number on a statement line is the running balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrailingOrder {
    /// `... <balance> <amount>` (the KBank text extraction order)
    #[default]
    BalanceThenAmount,
    /// `... <amount> <balance>`
    AmountThenBalance,
}

/// Multi-word channel name that the tokenizer split at the first space
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelAlias {
    /// First token as captured, e.g. "K"
    pub channel: String,
    /// Required start of the details, e.g. "PLUS"
    pub details_prefix: String,
    /// Channel name to report, e.g. "K PLUS"
    pub canonical: String,
    /// Characters removed from the front of the details on match
    pub strip_chars: usize,
}

/// Anchor keyword plus the capture pattern that pulls the counterparty out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipientRule {
    pub anchor: String,
    /// Regex; capture group 1 is the recipient
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatementProfile {
    pub name: String,
    /// Page footer printed on every page; text is split into sections on it
    pub page_footer: String,
    /// Sections without this text carry no transactions and are skipped
    pub opening_marker: String,
    pub trailing_order: TrailingOrder,
    /// Checked before every outbound keyword
    pub inbound_keywords: Vec<String>,
    pub outbound_keywords: Vec<String>,
    pub channel_aliases: Vec<ChannelAlias>,
    pub recipient_rules: Vec<RecipientRule>,
}

impl Default for StatementProfile {
    fn default() -> Self {
        Self::kbank()
    }
}

impl StatementProfile {
    /// KBank Thai-language savings account statement
    pub fn kbank() -> Self {
        Self {
            name: "kbank-th".to_string(),
            page_footer: "KBPDF (FM001-V.6) 01/1A2-0 (05-19)".to_string(),
            opening_marker: "ยอดยกมา".to_string(),
            trailing_order: TrailingOrder::BalanceThenAmount,
            inbound_keywords: strings(&["รับโอนเงิน", "รับโอนเงินผ่าน QR"]),
            outbound_keywords: strings(&["โอนเงิน", "ชำระเงิน", "ค่าธรรมเนียม", "หักบัญชี"]),
            channel_aliases: vec![
                alias("K", "PLUS", "K PLUS", 5),
                alias("EDC/K", "SHOP", "EDC/K SHOP", 5),
                alias("MAKE", "by", "MAKE by KBank", 8),
            ],
            recipient_rules: vec![
                rule("จาก", r"จาก\s+([^\s].*?)(?:\+\+|$)"),
                rule("โอนไป", r"โอนไป\s+([^\s].*?)(?:\+\+|$)"),
                rule("รหัสอ้างอิง", r"รหัสอ้างอิง\s+([^\s]+)"),
                rule("เพื่อชำระ", r"เพื่อชำระ\s+([^\s].*?)(?:\+\+|$)"),
            ],
        }
    }

    /// Reject profiles the parser cannot run with.
    ///
    /// Empty markers would turn `contains`/`split` into always-true
    /// operations, and an empty keyword matches every line.
    pub fn validate(&self) -> Result<()> {
        if self.page_footer.is_empty() {
            return Err(Error::Profile("page_footer must not be empty".into()));
        }
        if self.opening_marker.is_empty() {
            return Err(Error::Profile("opening_marker must not be empty".into()));
        }
        if let Some(a) = self
            .channel_aliases
            .iter()
            .find(|a| a.channel.is_empty() || a.canonical.is_empty())
        {
            return Err(Error::Profile(format!(
                "channel alias for '{}' needs both channel and canonical name",
                a.details_prefix
            )));
        }
        if self
            .inbound_keywords
            .iter()
            .chain(&self.outbound_keywords)
            .any(|k| k.is_empty())
        {
            return Err(Error::Profile("keywords must not be empty".into()));
        }
        for r in &self.recipient_rules {
            if r.anchor.is_empty() {
                return Err(Error::Profile("recipient anchor must not be empty".into()));
            }
            let re = Regex::new(&r.pattern)?;
            if re.captures_len() < 2 {
                return Err(Error::Profile(format!(
                    "recipient pattern for '{}' has no capture group",
                    r.anchor
                )));
            }
        }
        Ok(())
    }
}

fn alias(channel: &str, details_prefix: &str, canonical: &str, strip_chars: usize) -> ChannelAlias {
    ChannelAlias {
        channel: channel.to_string(),
        details_prefix: details_prefix.to_string(),
        canonical: canonical.to_string(),
        strip_chars,
    }
}

fn rule(anchor: &str, pattern: &str) -> RecipientRule {
    RecipientRule {
        anchor: anchor.to_string(),
        pattern: pattern.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
