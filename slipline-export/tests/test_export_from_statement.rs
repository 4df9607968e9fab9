use slipline_core::Transaction;
use slipline_export::{COLUMNS, CsvOptions, OutputFormat, export_file, search, summarize};
use slipline_ingest::StatementParser;
use std::path::PathBuf;

fn fixture_transactions() -> Vec<Transaction> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("kbank_statement.txt");
    let text = std::fs::read_to_string(path).unwrap();
    StatementParser::kbank().unwrap().parse(&text)
}

/// Real-data regression: the fixture statement exports to the fixed CSV layout.
#[test]
fn test_csv_export_of_fixture() {
    let txns = fixture_transactions();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");

    export_file(&path, OutputFormat::Csv, &txns, &CsvOptions { utf8_bom: false }).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, COLUMNS);

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), txns.len());
    assert_eq!(
        rows[1].iter().collect::<Vec<_>>(),
        vec![
            "01-06-23",
            "12:40",
            "EDC/K SHOP",
            "ชำระเงิน เพื่อชำระ ร้านกาแฟ สาขาสยาม++ 0012",
            "ชำระเงิน",
            "ร้านกาแฟ สาขาสยาม",
            "-120.00",
            "13380.00",
        ]
    );
}

/// Real-data regression: exported money strings parse back to the source values.
#[test]
fn test_exported_amounts_round_trip() {
    let txns = fixture_transactions();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");
    export_file(&path, OutputFormat::Csv, &txns, &CsvOptions { utf8_bom: false }).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    for (record, txn) in rdr.records().zip(&txns) {
        let record = record.unwrap();
        let amount: f64 = record[6].parse().unwrap();
        let balance: f64 = record[7].parse().unwrap();
        assert_eq!(amount, txn.amount);
        assert_eq!(balance, txn.balance);
    }
}

#[test]
fn test_summary_of_fixture() {
    let s = summarize(&fixture_transactions());
    assert_eq!(s.count, 8);
    assert_eq!(s.inbound_count, 3);
    assert_eq!(s.outbound_count, 5);
    assert!((s.total_inbound - 1502.35).abs() < 1e-9);
    assert!((s.total_outbound - 4430.0).abs() < 1e-9);
    assert!((s.net + 2927.65).abs() < 1e-9);
    assert_eq!(s.closing_balance, Some(8572.35));

    let first_type = &s.by_type[0];
    assert_eq!(first_type.transaction_type, "รับโอนเงิน");
    assert_eq!(first_type.count, 2);
    assert_eq!(first_type.total, 1500.0);
}

#[test]
fn test_search_fixture() {
    let txns = fixture_transactions();
    let hits = search(&txns, "สาขาสยาม");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].channel, "EDC/K SHOP");
    assert_eq!(search(&txns, "make by").len(), 1);
}

#[test]
fn test_xlsx_and_json_export_of_fixture() {
    let txns = fixture_transactions();
    let dir = tempfile::tempdir().unwrap();

    let xlsx = dir.path().join("statement.xlsx");
    export_file(&xlsx, OutputFormat::Xlsx, &txns, &CsvOptions::default()).unwrap();
    assert!(std::fs::metadata(&xlsx).unwrap().len() > 0);

    let json = dir.path().join("statement.json");
    export_file(&json, OutputFormat::Json, &txns, &CsvOptions::default()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 8);
    assert_eq!(value[3]["Recipient"], "REF20230602");
}
