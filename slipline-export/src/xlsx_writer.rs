//! Excel export: one "Transactions" sheet with the CSV columns.
//!
//! Amount and Balance are written as numbers with a `#,##0.00` format so
//! the sheet can be summed directly; all other columns are text.

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};
use slipline_core::Transaction;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::row::{COLUMNS, StatementRow};

const SHEET_NAME: &str = "Transactions";
const AMOUNT_WIDTH: f64 = 14.0;
const AMOUNT_COLUMNS: [u16; 2] = [6, 7];

pub fn write_xlsx_file(path: impl AsRef<Path>, txns: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_sheet(worksheet, txns)?;
    workbook.save(path)?;
    info!(rows = txns.len(), path = %path.display(), "wrote Excel workbook");
    Ok(())
}

fn fill_sheet(worksheet: &mut Worksheet, txns: &[Transaction]) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x00A950))
        .set_font_color(Color::RGB(0xFFFFFF));
    let text_format = Format::new();
    let money_format = Format::new()
        .set_num_format("#,##0.00")
        .set_align(FormatAlign::Right);

    let rows: Vec<StatementRow> = txns.iter().map(StatementRow::from).collect();

    for (col, width) in column_widths(&rows).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }
    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, (row, txn)) in rows.iter().zip(txns).enumerate() {
        let r = (idx + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate().take(6) {
            worksheet.write_string_with_format(r, col as u16, sanitize_cell(cell), &text_format)?;
        }
        worksheet.write_number_with_format(r, AMOUNT_COLUMNS[0], txn.amount, &money_format)?;
        worksheet.write_number_with_format(r, AMOUNT_COLUMNS[1], txn.balance, &money_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Drop control characters that make Excel report unreadable content.
fn sanitize_cell(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            let u = c as u32;
            c == '\t' || !(u < 0x20 || u == 0x7F || u == 0xFFFE || u == 0xFFFF)
        })
        .collect()
}

/// Width per column: longest cell in characters x 1.2, clamped to 10..50.
/// Money columns use a fixed width.
fn column_widths(rows: &[StatementRow]) -> Vec<f64> {
    COLUMNS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            if AMOUNT_COLUMNS.contains(&(col as u16)) {
                return AMOUNT_WIDTH;
            }
            let longest = rows
                .iter()
                .map(|r| r.cells()[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            (longest as f64 * 1.2).clamp(10.0, 50.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use slipline_core::Direction;

    fn row(details: &str) -> StatementRow {
        let t = Transaction {
            date: NaiveDate::from_ymd_opt(2023, 6, 1)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            channel: "K PLUS".into(),
            details: details.into(),
            transaction_type: String::new(),
            direction: Direction::Inbound,
            recipient: String::new(),
            amount: 1.0,
            balance: 2.0,
            full_text: String::new(),
        };
        StatementRow::from(&t)
    }

    #[test]
    fn test_sanitize_drops_control_chars() {
        assert_eq!(sanitize_cell("ร้าน\u{0007}ค้า\tA"), "ร้านค้า\tA");
    }

    #[test]
    fn test_column_widths() {
        let widths = column_widths(&[row(&"x".repeat(100)), row("short")]);
        assert_eq!(widths.len(), COLUMNS.len());
        assert_eq!(widths[0], 10.0);
        assert_eq!(widths[3], 50.0);
        assert_eq!(widths[6], AMOUNT_WIDTH);
        assert_eq!(widths[7], AMOUNT_WIDTH);
    }

    #[test]
    fn test_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.xlsx");
        let t = Transaction {
            date: NaiveDate::from_ymd_opt(2023, 6, 1)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            channel: "K PLUS".into(),
            details: "โอนเงิน".into(),
            transaction_type: "โอนเงิน".into(),
            direction: Direction::Outbound,
            recipient: String::new(),
            amount: -1000.0,
            balance: 5000.0,
            full_text: String::new(),
        };
        write_xlsx_file(&path, &[t]).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip archive
        assert!(bytes.starts_with(b"PK"));
    }
}
