//! Locale-style ordering of object names
//!
//! Approximates the default collation of a browser `localeCompare`:
//! whitespace sorts before punctuation, punctuation before digits, digits
//! before letters, and letters compare case-insensitively first. Names that
//! differ only by case put the lowercase form first. A final code-point
//! comparison keeps the order total, so sorting is deterministic.

use std::cmp::Ordering;

/// Compare two names the way the console lists them
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let left = a.chars().map(|c| (char_class(c), fold(c)));
    let right = b.chars().map(|c| (char_class(c), fold(c)));
    left.cmp(right)
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) if y.is_uppercase() => return Ordering::Less,
            (false, true) if x.is_uppercase() => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
