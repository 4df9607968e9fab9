//! slipline-export: writers for parsed statements (CSV, XLSX, JSON), summary and search

pub mod csv_writer;
pub mod error;
pub mod format;
pub mod json_writer;
pub mod row;
pub mod search;
pub mod summary;
pub mod xlsx_writer;

pub use csv_writer::{CsvOptions, write_csv, write_csv_file};
pub use error::{ExportError, Result};
pub use format::{OutputFormat, export_file};
pub use json_writer::{write_json, write_json_file};
pub use row::{COLUMNS, StatementRow};
pub use search::search;
pub use summary::{StatementSummary, TypeTotal, summarize};
pub use xlsx_writer::write_xlsx_file;
