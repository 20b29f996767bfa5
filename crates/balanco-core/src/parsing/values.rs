use crate::error::BalancoError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a Brazilian-formatted currency string into a signed amount.
///
/// Handles formats like:
/// - "1.234.567,89" -> 1234567.89
/// - "150,00" -> 150.00
/// - "(500,00)" -> -500.00 (accounting negative)
/// - "-500,00" -> -500.00
///
/// Unbalanced parentheses, a minus sign inside parentheses, a second
/// decimal separator and empty input are rejected with `UnparseableAmount`.
pub fn parse_currency(s: &str) -> Result<Decimal, BalancoError> {
    let trimmed = s.trim();

    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    // "(-500,00)" has no defined sign
    if negative && body.starts_with('-') {
        return Err(unparseable(s));
    }

    // Thousands separators go, the decimal comma becomes a dot
    let clean = body.replace('.', "").replace(',', ".");

    if !is_plain_number(&clean) {
        return Err(unparseable(s));
    }

    let value = Decimal::from_str(&clean).map_err(|_| unparseable(s))?;
    Ok(if negative { -value } else { value })
}

/// Digits with at most one decimal point and an optional leading minus.
fn is_plain_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut has_digit = false;
    let mut points = 0;
    for c in digits.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '.' => points += 1,
            _ => return false,
        }
    }
    has_digit && points <= 1
}

fn unparseable(raw: &str) -> BalancoError {
    BalancoError::UnparseableAmount {
        raw: raw.to_string(),
    }
}
