//! Directory loader for candidate résumés.
//!
//! Reads every `.txt` and `.pdf` file in the configured directory once at
//! startup. Per-file failures never abort the load and are never silently
//! dropped: they come back in the report so the caller decides what to do
//! with a partially loaded pool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::Cv;

/// A file that could not be turned into a [`Cv`].
#[derive(Debug)]
pub struct CvLoadFailure {
    pub filename: String,
    pub reason: String,
}

/// Outcome of one load pass. `cvs` holds the successes in a deterministic
/// order: text files first, then PDFs, each group sorted by filename.
#[derive(Debug, Default)]
pub struct CvLoadReport {
    pub cvs: Vec<Cv>,
    pub failures: Vec<CvLoadFailure>,
}

/// Loads all résumés from `dir`. An unreadable directory is a hard error;
/// unreadable or unparseable individual files land in `failures`.
pub fn load_cv_dir(dir: &Path) -> Result<CvLoadReport> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read CV directory {}", dir.display()))?;

    let mut txt_paths: Vec<PathBuf> = Vec::new();
    let mut pdf_paths: Vec<PathBuf> = Vec::new();

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list CV directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => txt_paths.push(path),
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => pdf_paths.push(path),
            _ => {} // not a résumé format we understand
        }
    }

    txt_paths.sort();
    pdf_paths.sort();

    let mut report = CvLoadReport::default();

    for path in txt_paths {
        match std::fs::read_to_string(&path) {
            Ok(content) => report.cvs.push(make_cv(&path, content)),
            Err(e) => report.failures.push(make_failure(&path, e.to_string())),
        }
    }

    for path in pdf_paths {
        match pdf_extract::extract_text(&path) {
            Ok(content) => report.cvs.push(make_cv(&path, content)),
            Err(e) => report.failures.push(make_failure(&path, e.to_string())),
        }
    }

    debug!(
        "Loaded {} CVs ({} failures) from {}",
        report.cvs.len(),
        report.failures.len(),
        dir.display()
    );

    Ok(report)
}

fn make_cv(path: &Path, content: String) -> Cv {
    Cv {
        name: file_stem(path),
        filename: file_name(path),
        content,
    }
}

fn make_failure(path: &Path, reason: String) -> CvLoadFailure {
    CvLoadFailure {
        filename: file_name(path),
        reason,
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Minimal valid PDF containing `phrase` as its page text.
    /// Builds body then xref with correct byte offsets so pdf-extract can parse it.
    fn minimal_pdf_with_phrase(phrase: &str) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n");
        let o1 = out.len();
        out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
        let o2 = out.len();
        out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
        let o3 = out.len();
        out.extend_from_slice(b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >> endobj\n");
        let o4 = out.len();
        let stream = format!("BT /F1 12 Tf 100 700 Td ({phrase}) Tj ET\n");
        out.extend_from_slice(format!("4 0 obj << /Length {} >> stream\n", stream.len()).as_bytes());
        out.extend_from_slice(stream.as_bytes());
        out.extend_from_slice(b"endstream endobj\n");
        let o5 = out.len();
        out.extend_from_slice(
            b"5 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
        );
        let xref_start = out.len();
        out.extend_from_slice(b"xref\n0 6\n");
        out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
        out.extend_from_slice(format!("{:010} 00000 n \n", o1).as_bytes());
        out.extend_from_slice(format!("{:010} 00000 n \n", o2).as_bytes());
        out.extend_from_slice(format!("{:010} 00000 n \n", o3).as_bytes());
        out.extend_from_slice(format!("{:010} 00000 n \n", o4).as_bytes());
        out.extend_from_slice(format!("{:010} 00000 n \n", o5).as_bytes());
        out.extend_from_slice(b"trailer << /Size 6 /Root 1 0 R >>\nstartxref\n");
        out.extend_from_slice(format!("{xref_start}\n").as_bytes());
        out.extend_from_slice(b"%%EOF\n");
        out
    }

    #[test]
    fn test_loads_txt_files_with_stem_as_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("jane_doe.txt"), "Rust engineer, 5 years").unwrap();

        let report = load_cv_dir(dir.path()).unwrap();
        assert_eq!(report.cvs.len(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(report.cvs[0].name, "jane_doe");
        assert_eq!(report.cvs[0].filename, "jane_doe.txt");
        assert_eq!(report.cvs[0].content, "Rust engineer, 5 years");
    }

    #[test]
    fn test_loads_pdf_text() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("candidate.pdf"),
            minimal_pdf_with_phrase("kubernetes platform engineer"),
        )
        .unwrap();

        let report = load_cv_dir(dir.path()).unwrap();
        assert_eq!(report.cvs.len(), 1, "failures: {:?}", report.failures);
        assert_eq!(report.cvs[0].name, "candidate");
        assert!(report.cvs[0].content.contains("kubernetes platform engineer"));
    }

    #[test]
    fn test_txt_files_come_before_pdfs_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zz.txt"), "zz").unwrap();
        fs::write(dir.path().join("aa.txt"), "aa").unwrap();
        fs::write(
            dir.path().join("ab.pdf"),
            minimal_pdf_with_phrase("pdf candidate"),
        )
        .unwrap();

        let report = load_cv_dir(dir.path()).unwrap();
        let names: Vec<&str> = report.cvs.iter().map(|cv| cv.name.as_str()).collect();
        assert_eq!(names, vec!["aa", "zz", "ab"]);
    }

    #[test]
    fn test_corrupt_pdf_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.txt"), "fine").unwrap();
        fs::write(dir.path().join("broken.pdf"), b"not a pdf at all").unwrap();

        let report = load_cv_dir(dir.path()).unwrap();
        assert_eq!(report.cvs.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].filename, "broken.pdf");
        assert!(!report.failures[0].reason.is_empty());
    }

    #[test]
    fn test_other_extensions_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.md"), "not a cv").unwrap();
        fs::write(dir.path().join("real.txt"), "a cv").unwrap();

        let report = load_cv_dir(dir.path()).unwrap();
        assert_eq!(report.cvs.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_missing_directory_is_hard_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(load_cv_dir(&missing).is_err());
    }
}
