//! National-ID checksum validation

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Why a candidate ID was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdDefect {
    /// Not exactly 10 ASCII digits
    NotTenDigits,
    /// All ten digits identical; every such sequence satisfies the raw
    /// checksum, so they are rejected outright
    RepeatedDigits,
    /// Check digit disagrees with the weighted mod-11 sum
    WrongCheckDigit,
}

impl fmt::Display for IdDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IdDefect::NotTenDigits => "not exactly 10 digits",
            IdDefect::RepeatedDigits => "all digits identical",
            IdDefect::WrongCheckDigit => "check digit mismatch",
        };
        write!(f, "{}", text)
    }
}

fn ten_digits() -> &'static Regex {
    static TEN_DIGITS: OnceLock<Regex> = OnceLock::new();
    TEN_DIGITS.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
}

/// Classify a candidate national ID, reporting the first check it fails.
///
/// The input is taken as-is: surrounding whitespace makes the pattern
/// check fail, trimming is the caller's job.
pub fn check_national_id(value: &str) -> Result<(), IdDefect> {
    if !ten_digits().is_match(value) {
        return Err(IdDefect::NotTenDigits);
    }

    // Pattern guarantees exactly 10 ASCII digits
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(IdDefect::RepeatedDigits);
    }

    // digit[0]*10 + digit[1]*9 + ... + digit[8]*2
    let sum: u32 = digits[..9]
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (10 - i as u32))
        .sum();
    let remainder = sum % 11;
    let check = digits[9];

    let valid = if remainder < 2 {
        check == remainder
    } else {
        check == 11 - remainder
    };

    if valid { Ok(()) } else { Err(IdDefect::WrongCheckDigit) }
}

/// Validate a national ID by pattern and checksum.
///
/// Malformed input is an ordinary `false`, never an error.
pub fn is_valid_national_id(value: &str) -> bool {
    check_national_id(value).is_ok()
}
