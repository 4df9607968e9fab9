//! Deterministic classification of a tokenized line.
//!
//! Three ordered rule tables, all built from the statement profile:
//! channel aliases, type keywords (every inbound keyword ahead of every
//! outbound one) and recipient anchors. First match wins in each table.

use regex::Regex;
use slipline_core::{ChannelAlias, Direction, Result, StatementProfile};
use tracing::debug;

/// Result of classifying one line
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub channel: String,
    pub details: String,
    pub transaction_type: String,
    pub direction: Direction,
    pub recipient: String,
}

#[derive(Debug, Clone)]
struct KeywordRule {
    keyword: String,
    direction: Direction,
}

#[derive(Debug, Clone)]
struct RecipientMatcher {
    anchor: String,
    pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    aliases: Vec<ChannelAlias>,
    keyword_rules: Vec<KeywordRule>,
    recipient_rules: Vec<RecipientMatcher>,
}

impl Classifier {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        let inbound = profile.inbound_keywords.iter().map(|k| KeywordRule {
            keyword: k.clone(),
            direction: Direction::Inbound,
        });
        let outbound = profile.outbound_keywords.iter().map(|k| KeywordRule {
            keyword: k.clone(),
            direction: Direction::Outbound,
        });

        let recipient_rules = profile
            .recipient_rules
            .iter()
            .map(|r| -> Result<RecipientMatcher> {
                Ok(RecipientMatcher {
                    anchor: r.anchor.clone(),
                    pattern: Regex::new(&r.pattern)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            aliases: profile.channel_aliases.clone(),
            keyword_rules: inbound.chain(outbound).collect(),
            recipient_rules,
        })
    }

    pub fn classify(&self, channel: &str, details: &str) -> Classification {
        let (channel, details) = self.normalize_channel(channel, details);
        let (transaction_type, direction) = self.transaction_type(&details);
        let recipient = self.extract_recipient(&details);

        Classification {
            channel,
            details,
            transaction_type,
            direction,
            recipient,
        }
    }

    /// Re-join channel names the tokenizer split at their first space,
    /// e.g. `K` + `PLUS ...` becomes `K PLUS`.
    pub fn normalize_channel(&self, channel: &str, details: &str) -> (String, String) {
        match self
            .aliases
            .iter()
            .find(|a| a.channel == channel && details.starts_with(a.details_prefix.as_str()))
        {
            Some(alias) => {
                let rest: String = details.chars().skip(alias.strip_chars).collect();
                (alias.canonical.clone(), rest.trim().to_string())
            }
            None => (channel.to_string(), details.to_string()),
        }
    }

    /// First keyword contained in the details, with its direction.
    /// No match is an untyped inbound line.
    pub fn transaction_type(&self, details: &str) -> (String, Direction) {
        self.keyword_rules
            .iter()
            .find(|rule| details.contains(rule.keyword.as_str()))
            .map(|rule| (rule.keyword.clone(), rule.direction))
            .unwrap_or_default()
    }

    /// Only the first rule whose anchor occurs is tried; if its pattern
    /// does not match the recipient is empty.
    pub fn extract_recipient(&self, details: &str) -> String {
        let Some(rule) = self
            .recipient_rules
            .iter()
            .find(|r| details.contains(r.anchor.as_str()))
        else {
            return String::new();
        };

        match rule.pattern.captures(details).and_then(|c| c.get(1)) {
            Some(m) => m.as_str().to_string(),
            None => {
                debug!(anchor = %rule.anchor, details, "recipient anchor present but pattern did not match");
                String::new()
            }
        }
    }
}
