//! Parsing of `"<free text> | <token>"` display names.
//!
//! Members who verified before usually carry a nickname such as `Jane Doe | 123456` or
//! `Jane Doe | XM-SOC 123456`. The helpers here pull the VID candidate and the name
//! pair back out of it for identity lookups.

const DELIMITER: char = '|';
const MIN_VID_LEN: usize = 4;

/// Extracts a VID candidate from a display name.
///
/// The display name must contain exactly one `|`. The first whitespace-separated token
/// after it made only of ASCII digits and at least 4 characters long is returned as-is,
/// leading zeros included.
///
/// # Returns
/// - `Some(String)` - VID candidate
/// - `None` - No delimiter, more than one delimiter, or no qualifying token
pub fn parse_vid(display_name: &str) -> Option<String> {
    let mut parts = display_name.split(DELIMITER);
    let _name = parts.next()?;
    let tail = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    tail.split_whitespace()
        .find(|token| token.len() >= MIN_VID_LEN && token.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
}

/// Splits the free-text part of a display name into first and last name.
///
/// Everything before the first `|` (or the whole string without one) is split on
/// whitespace; the first word is the first name and the remaining words joined by a
/// single space form the last name.
///
/// # Returns
/// - `Some((first, last))` - At least two words were present
/// - `None` - Fewer than two words
pub fn parse_name_pair(display_name: &str) -> Option<(String, String)> {
    let head = display_name.split(DELIMITER).next()?;
    let mut words = head.split_whitespace();
    let first = words.next()?;
    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        return None;
    }

    Some((first.to_string(), rest.join(" ")))
}
