//! Leading-ordinal extraction from file and directory names.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::config::NO_ORDINAL;

/// Leading digit run, optionally preceded by whitespace. Whatever separator follows
/// (`-`, `.`, space, `、`, nothing) is not part of the ordinal.
static LEADING_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("valid leading ordinal pattern"));

/// Dotted ordinal such as `2.1.3`; needs at least one dot followed by digits.
static DOTTED_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)+)").expect("valid dotted ordinal pattern"));

/// A single Unicode decimal digit (`Nd`): ASCII, fullwidth `１`, Arabic-Indic `٣`, ...
static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Nd}$").expect("valid decimal digit pattern"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit in any script.
///
/// `Nd` characters come in contiguous runs of whole zero-to-nine blocks, so the value is the
/// distance from the start of the run, modulo ten.
fn digit_value(c: char) -> Option<u64> {
    if let Some(d) = c.to_digit(10) {
        return Some(u64::from(d));
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some(u64::from((c as u32 - start) % 10))
}

fn parse_ordinal(digits: &str) -> u64 {
    // Digit runs too long for u64 are treated as unnumbered.
    digits
        .chars()
        .try_fold(0u64, |acc, c| {
            acc.checked_mul(10)?.checked_add(digit_value(c)?)
        })
        .unwrap_or(NO_ORDINAL)
}

/// Leading ordinal of `name`, or [`NO_ORDINAL`] when the name does not start with a digit.
///
/// `"007 - Intro"` → 7, `"12、概述"` → 12, `"Intro"` → `NO_ORDINAL`.
pub fn extract_number(name: &str) -> u64 {
    LEADING_ORDINAL
        .captures(name)
        .and_then(|c| c.get(1))
        .map_or(NO_ORDINAL, |m| parse_ordinal(m.as_str()))
}

/// All dot-separated leading ordinals of `name`; falls back to a single-element
/// [`extract_number`] result.
///
/// `"2.1.3 Types"` → `[2, 1, 3]`, `"04 - Loops"` → `[4]`, `"Intro"` → `[NO_ORDINAL]`.
pub fn extract_number_tuple(name: &str) -> Vec<u64> {
    if let Some(m) = DOTTED_ORDINAL.captures(name).and_then(|c| c.get(1)) {
        return m.as_str().split('.').map(parse_ordinal).collect();
    }
    vec![extract_number(name)]
}
