//! Registration form rules: register-number construction, year/section
//! coupling, input masking.
//!
//! Pure functions; the service layer applies them to user input.

use crate::domain::entities::Year;

/// Number of free digits the student picks at the end of a register number.
pub const SUFFIX_LEN: usize = 3;

/// Hex digits in a MAC address (before colon grouping).
pub const MAC_HEX_LEN: usize = 12;

/// Fixed register-number prefix for a year of study.
pub fn register_prefix(year: Year) -> &'static str {
    match year {
        Year::First => "RA2511026050",
        Year::Second => "RA2411026050",
        Year::Third => "RA2311026050",
    }
}

/// Valid section letters for a year. Years 1 and 2 run five sections,
/// year 3 runs four.
pub fn sections_for_year(year: Year) -> &'static [char] {
    match year {
        Year::First | Year::Second => &['A', 'B', 'C', 'D', 'E'],
        Year::Third => &['A', 'B', 'C', 'D'],
    }
}

pub fn is_valid_section(year: Year, section: char) -> bool {
    sections_for_year(year).contains(&section.to_ascii_uppercase())
}

/// Mask free-typed suffix input: digits only, capped at [`SUFFIX_LEN`].
pub fn normalize_last_digits(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(SUFFIX_LEN)
        .collect()
}

/// The availability check is gated on this: it fires only once the suffix
/// is complete, never for shorter (or masked-down longer) input.
pub fn is_complete_suffix(suffix: &str) -> bool {
    suffix.len() == SUFFIX_LEN && suffix.chars().all(|c| c.is_ascii_digit())
}

pub fn full_register_number(year: Year, suffix: &str) -> String {
    format!("{}{}", register_prefix(year), suffix)
}

/// Mask free-typed MAC input into `XX:XX:XX:XX:XX:XX`.
///
/// Non-hex characters are stripped, letters uppercased, and anything beyond
/// 12 hex digits truncated before grouping.
pub fn format_mac(input: &str) -> String {
    let hex: Vec<char> = input
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .take(MAC_HEX_LEN)
        .collect();

    let mut out = String::with_capacity(MAC_HEX_LEN + 5);
    for (i, c) in hex.iter().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(':');
        }
        out.push(*c);
    }
    out
}

/// True when a formatted MAC carries all 12 hex digits.
pub fn is_complete_mac(formatted: &str) -> bool {
    formatted.len() == MAC_HEX_LEN + 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_match_year_of_study() {
        assert_eq!(register_prefix(Year::First), "RA2511026050");
        assert_eq!(register_prefix(Year::Second), "RA2411026050");
        assert_eq!(register_prefix(Year::Third), "RA2311026050");
    }

    #[test]
    fn sections_per_year() {
        assert_eq!(sections_for_year(Year::First), &['A', 'B', 'C', 'D', 'E']);
        assert_eq!(sections_for_year(Year::Second), &['A', 'B', 'C', 'D', 'E']);
        assert_eq!(sections_for_year(Year::Third), &['A', 'B', 'C', 'D']);
        assert!(is_valid_section(Year::First, 'e'));
        assert!(!is_valid_section(Year::Third, 'E'));
    }

    #[test]
    fn suffix_masking_strips_and_truncates() {
        assert_eq!(normalize_last_digits("12a34"), "123");
        assert_eq!(normalize_last_digits("9"), "9");
        assert_eq!(normalize_last_digits("abc"), "");
        assert!(!is_complete_suffix("12"));
        assert!(is_complete_suffix("123"));
        assert!(!is_complete_suffix("1234"));
    }

    #[test]
    fn register_number_concatenates_prefix_and_suffix() {
        assert_eq!(
            full_register_number(Year::Second, "007"),
            "RA2411026050007"
        );
    }

    #[test]
    fn mac_formatting_groups_and_uppercases() {
        assert_eq!(format_mac("001122AABBCC"), "00:11:22:AA:BB:CC");
        assert_eq!(format_mac("001122aabbcc"), "00:11:22:AA:BB:CC");
    }

    #[test]
    fn mac_formatting_strips_non_hex_and_truncates() {
        assert_eq!(format_mac("00-11-22-aa-bb-cc-ff"), "00:11:22:AA:BB:CC");
        assert_eq!(format_mac("zz00x11"), "00:11");
        assert!(is_complete_mac("00:11:22:AA:BB:CC"));
        assert!(!is_complete_mac("00:11"));
    }
}
