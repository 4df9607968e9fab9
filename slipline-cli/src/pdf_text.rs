//! PDF text extraction through the external `pdftotext` tool (poppler-utils).

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Run `pdftotext -enc UTF-8 <pdf> -` and return its stdout.
pub fn extract_text(pdf: &Path) -> Result<Vec<u8>> {
    let tool = which::which("pdftotext")
        .context("pdftotext not found on PATH (install poppler-utils, or pass an extracted .txt file)")?;
    debug!(tool = %tool.display(), pdf = %pdf.display(), "extracting PDF text");

    let output = Command::new(&tool)
        .args(["-enc", "UTF-8"])
        .arg(pdf)
        .arg("-")
        .output()
        .with_context(|| format!("running {}", tool.display()))?;

    if !output.status.success() {
        bail!(
            "pdftotext failed with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("statement.pdf")));
        assert!(is_pdf(Path::new("/tmp/STATEMENT.PDF")));
        assert!(!is_pdf(Path::new("statement.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }
}
