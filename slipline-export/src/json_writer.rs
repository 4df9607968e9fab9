use slipline_core::Transaction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::row::StatementRow;

/// Pretty JSON array of rows, keyed by the CSV column names.
pub fn write_json<W: Write>(mut w: W, txns: &[Transaction]) -> Result<()> {
    let rows: Vec<StatementRow> = txns.iter().map(StatementRow::from).collect();
    serde_json::to_writer_pretty(&mut w, &rows)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

pub fn write_json_file(path: impl AsRef<Path>, txns: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    write_json(BufWriter::new(File::create(path)?), txns)?;
    info!(rows = txns.len(), path = %path.display(), "wrote JSON");
    Ok(())
}
