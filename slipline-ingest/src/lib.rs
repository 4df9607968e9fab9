//! slipline-ingest: turns extracted statement text into transaction records.
//!
//! The pipeline is reconstruct -> tokenize -> classify -> assemble, driven by
//! [`StatementParser`].

pub mod assemble;
pub mod classify;
pub mod parser;
pub mod reconstruct;
pub mod tokenize;
pub mod types;

pub use classify::{Classification, Classifier};
pub use parser::{StatementParser, parse_kbank_statement_text};
pub use reconstruct::Reconstructor;
pub use tokenize::Tokenizer;
pub use types::{LogicalLine, ParseReport, ParsedFields, RejectReason, Rejection};
