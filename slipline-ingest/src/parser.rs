//! Statement parser: the entry point over reconstruct/tokenize/classify/assemble.

use slipline_core::{Result, StatementProfile, Transaction};
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::classify::Classifier;
use crate::reconstruct::Reconstructor;
use crate::tokenize::Tokenizer;
use crate::types::{LogicalLine, ParseReport, RejectReason, Rejection};

/// Compiled parser for one statement profile. Build once, reuse for any
/// number of statements.
#[derive(Debug, Clone)]
pub struct StatementParser {
    reconstructor: Reconstructor,
    tokenizer: Tokenizer,
    classifier: Classifier,
}

impl StatementParser {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            reconstructor: Reconstructor::new(profile)?,
            tokenizer: Tokenizer::new(profile)?,
            classifier: Classifier::new(profile)?,
        })
    }

    /// Parser for the built-in KBank profile
    pub fn kbank() -> Result<Self> {
        Self::new(&StatementProfile::kbank())
    }

    /// Parse extracted statement text. Lines that are not transactions are
    /// dropped; use [`StatementParser::parse_report`] to see them.
    pub fn parse(&self, text: &str) -> Vec<Transaction> {
        self.parse_report(text).transactions
    }

    /// Parse and keep a diagnostic for every rejected line.
    pub fn parse_report(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for line in self.reconstructor.reconstruct(text) {
            match self.parse_logical_line(&line) {
                Ok(txn) => report.transactions.push(txn),
                Err(reason) => {
                    debug!(line = %line.text, %reason, "rejected statement line");
                    report.rejections.push(Rejection {
                        line: line.text,
                        reason,
                    });
                }
            }
        }

        info!(
            transactions = report.transactions.len(),
            rejected = report.rejections.len(),
            "parsed statement text"
        );
        report
    }

    /// Parse raw bytes. Anything that is not UTF-8 fails as a whole.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseReport> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.parse_report(text))
    }

    /// Parse one already-reconstructed line.
    pub fn parse_line(&self, line: &str) -> std::result::Result<Transaction, RejectReason> {
        self.parse_logical_line(&LogicalLine::new(line))
    }

    fn parse_logical_line(&self, line: &LogicalLine) -> std::result::Result<Transaction, RejectReason> {
        let fields = self.tokenizer.tokenize(line)?;
        let class = self.classifier.classify(&fields.channel, &fields.details);
        Ok(assemble(line, fields, class))
    }
}

/// Parse KBank statement text with the default profile.
pub fn parse_kbank_statement_text(text: &str) -> Result<Vec<Transaction>> {
    Ok(StatementParser::kbank()?.parse(text))
}
