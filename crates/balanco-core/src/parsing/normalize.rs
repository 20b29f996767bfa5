use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for label comparison.
///
/// Lowercases, decomposes accented characters (NFD) and drops the combining
/// marks, so "SALÁRIOS" and "salarios" compare equal. Idempotent; empty input
/// yields an empty string.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Normalize and collapse every whitespace run into a single space.
///
/// pdftotext `-layout` pads words with runs of spaces, which would otherwise
/// split multi-word phrases like "balanco patrimonial".
pub fn normalize_phrase(text: &str) -> String {
    normalize_text(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
