use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use slipline_core::{StatementProfile, Transaction};
use slipline_export::{CsvOptions, OutputFormat, StatementSummary, export_file, search, summarize};
use slipline_ingest::{ParseReport, StatementParser};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod pdf_text;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "slipline",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SLIPLINE_BUILD_SHA"), ")"),
    about = "Convert KBank statements into CSV, Excel or JSON"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement (.pdf or extracted .txt) and write the transactions.
    /// A directory input converts every PDF in it.
    Convert {
        input: PathBuf,

        /// Output path (defaults to the input path with the format's extension).
        /// For a directory input, the output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<Fmt>,

        /// Statement profile TOML (overrides config)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Also save the text extracted from a PDF next to the input
        #[arg(long)]
        keep_text: bool,

        /// Only export rows containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Write CSV without the UTF-8 byte order mark
        #[arg(long)]
        no_bom: bool,
    },

    /// Print counts and totals for a statement
    Summary {
        input: PathBuf,

        #[arg(long)]
        profile: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.slipline/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Statement profile helpers
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print the built-in KBank profile as TOML (a starting point for custom profiles)
    Dump,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Fmt {
    Csv,
    Xlsx,
    Json,
}

impl From<Fmt> for OutputFormat {
    fn from(f: Fmt) -> Self {
        match f {
            Fmt::Csv => OutputFormat::Csv,
            Fmt::Xlsx => OutputFormat::Xlsx,
            Fmt::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Convert {
            input,
            output,
            format,
            profile,
            keep_text,
            search: query,
            no_bom,
        } => {
            let cfg = config::load_config()?;
            let opts = ConvertOptions {
                profile: resolve_profile(profile.as_deref(), &cfg)?,
                keep_text,
                query,
                csv: CsvOptions {
                    utf8_bom: cfg.output.utf8_bom && !no_bom,
                },
            };

            if input.is_dir() {
                let format = format.map(Into::into).unwrap_or(cfg.output.format);
                convert_directory(&input, output.as_deref(), format, &opts)?;
            } else {
                let format =
                    resolve_format(format.map(Into::into), output.as_deref(), cfg.output.format);
                let out = output.unwrap_or_else(|| input.with_extension(format.extension()));
                let written = convert_statement(&input, &out, format, &opts)?;
                println!("Wrote {} transactions to {}", written, out.display());
            }
        }

        Command::Summary {
            input,
            profile,
            json,
        } => {
            let cfg = config::load_config()?;
            let profile = resolve_profile(profile.as_deref(), &cfg)?;
            let report = read_statement(&input, &profile, false)?;
            report_rejections(&report);

            let summary = summarize(&report.transactions);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, report.rejections.len());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },

        Command::Profile { command } => match command {
            ProfileCommand::Dump => {
                print!("{}", config::profile_to_toml(&StatementProfile::kbank())?);
            }
        },
    }

    Ok(())
}

// Priority: RUST_LOG > --verbose > info
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn resolve_profile(flag: Option<&Path>, cfg: &config::Config) -> Result<StatementProfile> {
    match flag.or(cfg.parser.profile.as_deref()) {
        Some(path) => {
            info!(profile = %path.display(), "using statement profile");
            config::load_profile(path)
        }
        None => Ok(StatementProfile::kbank()),
    }
}

/// --format wins, then the output extension, then the configured default.
fn resolve_format(flag: Option<OutputFormat>, output: Option<&Path>, configured: OutputFormat) -> OutputFormat {
    flag.or_else(|| output.and_then(OutputFormat::from_path))
        .unwrap_or(configured)
}

struct ConvertOptions {
    profile: StatementProfile,
    keep_text: bool,
    query: Option<String>,
    csv: CsvOptions,
}

/// Parse one statement and export it to `out`. Returns the number of rows written.
fn convert_statement(
    input: &Path,
    out: &Path,
    format: OutputFormat,
    opts: &ConvertOptions,
) -> Result<usize> {
    let report = read_statement(input, &opts.profile, opts.keep_text)?;
    report_rejections(&report);

    let txns: Vec<Transaction> = match opts.query.as_deref() {
        Some(q) => search(&report.transactions, q).into_iter().cloned().collect(),
        None => report.transactions,
    };

    export_file(out, format, &txns, &opts.csv)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(txns.len())
}

/// Convert every PDF in `dir`. A failing statement is logged and skipped.
fn convert_directory(
    dir: &Path,
    out_dir: Option<&Path>,
    format: OutputFormat,
    opts: &ConvertOptions,
) -> Result<()> {
    let out_dir = out_dir.unwrap_or(dir);
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let inputs = statement_pdfs(dir)?;
    if inputs.is_empty() {
        bail!("no PDF files in {}", dir.display());
    }

    let mut converted = 0;
    for input in &inputs {
        let out = batch_output_path(input, out_dir, format);
        match convert_statement(input, &out, format, opts) {
            Ok(rows) => {
                converted += 1;
                println!("{} -> {} ({} transactions)", input.display(), out.display(), rows);
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(input = %input.display(), %error, "conversion failed");
            }
        }
    }

    println!("Converted {converted} of {} statements", inputs.len());
    Ok(())
}

/// PDF files directly inside `dir`, sorted by path
fn statement_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && pdf_text::is_pdf(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

fn batch_output_path(input: &Path, out_dir: &Path, format: OutputFormat) -> PathBuf {
    let name = input.file_name().map(PathBuf::from).unwrap_or_default();
    out_dir.join(name.with_extension(format.extension()))
}

fn read_statement(input: &Path, profile: &StatementProfile, keep_text: bool) -> Result<ParseReport> {
    if !input.exists() {
        bail!("input not found: {}", input.display());
    }

    let bytes = if pdf_text::is_pdf(input) {
        let text = pdf_text::extract_text(input)?;
        if keep_text {
            let txt = input.with_extension("txt");
            std::fs::write(&txt, &text).with_context(|| format!("write {}", txt.display()))?;
            info!(path = %txt.display(), "saved extracted text");
        }
        text
    } else {
        std::fs::read(input).with_context(|| format!("read {}", input.display()))?
    };

    let parser = StatementParser::new(profile).context("invalid statement profile")?;
    parser
        .parse_bytes(&bytes)
        .with_context(|| format!("parsing {}", input.display()))
}

fn report_rejections(report: &ParseReport) {
    if report.rejections.is_empty() {
        return;
    }
    warn!(
        count = report.rejections.len(),
        "some statement lines were skipped (use -v to list them)"
    );
}

fn print_summary(s: &StatementSummary, skipped: usize) {
    println!("Transactions: {}", s.count);
    if let (Some(first), Some(last)) = (s.first, s.last) {
        println!(
            "Period:       {} .. {}",
            first.format("%d-%m-%y"),
            last.format("%d-%m-%y")
        );
    }
    println!("Inbound:      {:>14} ({})", money(s.total_inbound), s.inbound_count);
    println!("Outbound:     {:>14} ({})", money(s.total_outbound), s.outbound_count);
    println!("Net:          {:>14}", money(s.net));
    if let Some(balance) = s.closing_balance {
        println!("Balance:      {:>14}", money(balance));
    }
    if skipped > 0 {
        println!("Skipped lines: {skipped}");
    }

    if !s.by_type.is_empty() {
        println!();
        for t in &s.by_type {
            let label = if t.transaction_type.is_empty() {
                "(untyped)"
            } else {
                t.transaction_type.as_str()
            };
            println!("  {:<24} {:>4} {:>14}", label, t.count, money(t.total));
        }
    }
}

/// Two decimals with thousands separators, e.g. `-12,345.60`
fn money(v: f64) -> String {
    let s = format!("{:.2}", v.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if v < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.5), "999.50");
        assert_eq!(money(1000.0), "1,000.00");
        assert_eq!(money(-12345.6), "-12,345.60");
        assert_eq!(money(1234567.891), "1,234,567.89");
        assert_eq!(money(-0.001), "0.00");
    }

    #[test]
    fn test_format_precedence() {
        let out = Path::new("statement.xlsx");
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), Some(out), OutputFormat::Csv),
            OutputFormat::Json
        );
        assert_eq!(
            resolve_format(None, Some(out), OutputFormat::Csv),
            OutputFormat::Xlsx
        );
        assert_eq!(
            resolve_format(None, Some(Path::new("statement.out")), OutputFormat::Json),
            OutputFormat::Json
        );
        assert_eq!(resolve_format(None, None, OutputFormat::Csv), OutputFormat::Csv);
    }

    #[test]
    fn test_statement_pdfs_lists_only_pdfs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.csv"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<String> = statement_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_batch_output_path() {
        assert_eq!(
            batch_output_path(Path::new("/in/june.pdf"), Path::new("/out"), OutputFormat::Xlsx),
            PathBuf::from("/out/june.xlsx")
        );
        assert_eq!(
            batch_output_path(Path::new("/in/statement.2023.pdf"), Path::new("/out"), OutputFormat::Csv),
            PathBuf::from("/out/statement.2023.csv")
        );
    }

    #[test]
    fn test_convert_text_statement() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.txt");
        std::fs::write(
            &input,
            "ยอดยกมา 10,000.00\n\
             01-06-23 10:15 K PLUS โอนเงิน จาก ร้านค้า++ 9,000.00 1,000.00\n\
             01-06-23 11:00 K PLUS รับโอนเงิน 9,500.00 500.00\n",
        )
        .unwrap();
        let out = dir.path().join("statement.json");
        let opts = ConvertOptions {
            profile: StatementProfile::kbank(),
            keep_text: false,
            query: Some("ร้านค้า".to_string()),
            csv: CsvOptions::default(),
        };

        let rows = convert_statement(&input, &out, OutputFormat::Json, &opts).unwrap();
        assert_eq!(rows, 1);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value[0]["Recipient"], "ร้านค้า");
        assert_eq!(value[0]["Amount"], "-1000.00");
    }

    #[test]
    fn test_fmt_maps_to_output_format() {
        assert_eq!(OutputFormat::from(Fmt::Xlsx), OutputFormat::Xlsx);
        assert_eq!(OutputFormat::from(Fmt::Csv).extension(), "csv");
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "slipline",
            "-v",
            "convert",
            "statement.pdf",
            "--format",
            "xlsx",
            "--no-bom",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Convert {
                input,
                format,
                no_bom,
                output,
                ..
            } => {
                assert_eq!(input, PathBuf::from("statement.pdf"));
                assert!(matches!(format, Some(Fmt::Xlsx)));
                assert!(no_bom);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
