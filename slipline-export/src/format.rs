use serde::{Deserialize, Serialize};
use slipline_core::Transaction;
use std::path::Path;

use crate::csv_writer::{CsvOptions, write_csv_file};
use crate::error::Result;
use crate::json_writer::write_json_file;
use crate::xlsx_writer::write_xlsx_file;

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        }
    }

    /// Guess the format from an output path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "xlsx" => Some(OutputFormat::Xlsx),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Write transactions to `path` in the given format.
pub fn export_file(
    path: impl AsRef<Path>,
    format: OutputFormat,
    txns: &[Transaction],
    csv_opts: &CsvOptions,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv_file(path, txns, csv_opts),
        OutputFormat::Xlsx => write_xlsx_file(path, txns),
        OutputFormat::Json => write_json_file(path, txns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.CSV")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("out.xlsx")), Some(OutputFormat::Xlsx));
        assert_eq!(OutputFormat::from_path(Path::new("out.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_extension_round_trip() {
        for f in [OutputFormat::Csv, OutputFormat::Xlsx, OutputFormat::Json] {
            let p = format!("statement.{}", f.extension());
            assert_eq!(OutputFormat::from_path(Path::new(&p)), Some(f));
        }
    }
}
