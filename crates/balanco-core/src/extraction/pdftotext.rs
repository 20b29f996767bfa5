use crate::error::BalancoError;
use crate::extraction::table::detect_tables;
use crate::extraction::{PageContent, PdfExtractor};
use std::ffi::OsString;
use std::fs::File;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Default upper bound on a single pdftotext run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables, then
/// rebuilds table grids from the aligned text. A run that exceeds the
/// timeout is killed and reported as `ExtractionTimeout`.
pub struct PdftotextExtractor {
    program: OsString,
    timeout: Duration,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        PdftotextExtractor {
            program: OsString::from("pdftotext"),
            timeout,
        }
    }

    /// Whether the pdftotext binary can be started. `pdftotext -v` prints
    /// its version to stderr and, on older poppler releases, exits non-zero.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, BalancoError> {
        let dir = tempfile::tempdir().map_err(|e| BalancoError::Extraction(e.to_string()))?;
        let pdf_path = dir.path().join("input.pdf");
        let txt_path = dir.path().join("output.txt");
        std::fs::write(&pdf_path, pdf_bytes)
            .map_err(|e| BalancoError::Extraction(e.to_string()))?;

        // Text and diagnostics both go to files; nothing reads a pipe while
        // we poll for the deadline.
        let stderr_path = dir.path().join("stderr.txt");
        let stderr_file = File::create(&stderr_path)?;

        let mut child = Command::new(&self.program)
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(&pdf_path)
            .arg(&txt_path)
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_file))
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BalancoError::PdftotextNotFound
                } else {
                    BalancoError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            let stderr = std::fs::read(&stderr_path)
                .map(|b| String::from_utf8_lossy(&b).trim().to_string())
                .unwrap_or_default();
            return Err(BalancoError::PdftotextFailed { code, stderr });
        }

        let raw = std::fs::read(&txt_path)?;
        let text = String::from_utf8_lossy(&raw);

        // Split into pages (pdftotext uses form feed \x0c as page separator)
        let pages: Vec<PageContent> = text
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| page_from_layout(i + 1, page_text))
            .filter(|p| !p.text.trim().is_empty() || p.page_number == 1)
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Build a page from `pdftotext -layout` text, detecting its tables.
pub fn page_from_layout(page_number: usize, layout_text: &str) -> PageContent {
    let lines: Vec<&str> = layout_text.lines().collect();
    PageContent {
        page_number,
        tables: detect_tables(&lines),
        text: lines.join("\n"),
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, BalancoError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            tracing::warn!(secs = timeout.as_secs(), "pdftotext timed out, process killed");
            return Err(BalancoError::ExtractionTimeout {
                secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
