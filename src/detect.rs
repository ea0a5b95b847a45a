//! Chinese text detection.

use std::ops::RangeInclusive;

/// Code point ranges treated as Chinese text.
const CHINESE_RANGES: [RangeInclusive<char>; 3] = [
    // CJK Unified Ideographs
    '\u{4E00}'..='\u{9FFF}',
    // CJK Unified Ideographs Extension A
    '\u{3400}'..='\u{4DBF}',
    // CJK Compatibility Ideographs
    '\u{F900}'..='\u{FAFF}',
];

#[must_use]
pub fn is_chinese_char(c: char) -> bool {
    CHINESE_RANGES.iter().any(|range| range.contains(&c))
}

/// Returns true if `text` contains at least one Chinese ideograph.
#[must_use]
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(is_chinese_char)
}

/// Removes every Chinese ideograph from `text`, keeping everything else.
#[must_use]
pub fn strip_chinese(text: &str) -> String {
    text.chars().filter(|c| !is_chinese_char(*c)).collect()
}
