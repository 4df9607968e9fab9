//! CSV writer for parsed statements.
//!
//! Output starts with a UTF-8 byte order mark by default so spreadsheet
//! apps detect the Thai text correctly.

use csv::WriterBuilder;
use slipline_core::Transaction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::row::{COLUMNS, StatementRow};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub utf8_bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { utf8_bom: true }
    }
}

/// Write the header and one row per transaction. The header is written
/// even when there are no transactions.
pub fn write_csv<W: Write>(mut w: W, txns: &[Transaction], opts: &CsvOptions) -> Result<()> {
    if opts.utf8_bom {
        w.write_all(UTF8_BOM)?;
    }

    let mut wrt = WriterBuilder::new().has_headers(false).from_writer(w);
    wrt.write_record(COLUMNS)?;
    for t in txns {
        wrt.serialize(StatementRow::from(t))?;
    }
    wrt.flush()?;
    Ok(())
}

pub fn write_csv_file(path: impl AsRef<Path>, txns: &[Transaction], opts: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), txns, opts)?;
    info!(rows = txns.len(), path = %path.display(), "wrote CSV");
    Ok(())
}
