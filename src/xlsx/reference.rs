//! A1-style cell reference helpers.
//!
//! Columns use bijective base-26: `A`..`Z` are 1..26 and there is no zero
//! digit, so `Z` is followed by `AA`. Indices here are zero-based.

/// Last column index a worksheet can hold (`XFD`).
pub const MAX_COLUMN_INDEX: usize = 16_383;

/// Column index (zero-based) from a cell reference such as `"AA12"`.
///
/// Letters before the first digit are read case-insensitively; any other
/// character is skipped. Returns `None` when the reference has no leading
/// letters or the column would overflow `usize`.
///
/// ```
/// use sheetcodec::xlsx::column_index_from_reference;
///
/// assert_eq!(column_index_from_reference("A1"), Some(0));
/// assert_eq!(column_index_from_reference("c5"), Some(2));
/// assert_eq!(column_index_from_reference("AA12"), Some(26));
/// assert_eq!(column_index_from_reference("12"), None);
/// ```
pub fn column_index_from_reference(reference: &str) -> Option<usize> {
    let mut index: usize = 0;
    let mut seen_letter = false;

    for ch in reference.chars() {
        if ch.is_ascii_digit() {
            break;
        }
        if ch.is_ascii_alphabetic() {
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            index = index.checked_mul(26)?.checked_add(digit)?;
            seen_letter = true;
        }
    }

    if seen_letter {
        Some(index - 1)
    } else {
        None
    }
}

/// Column letters for a zero-based column index (0 → `A`, 26 → `AA`).
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1-style reference for a zero-based column and a one-based row.
pub fn cell_reference(column: usize, row: usize) -> String {
    format!("{}{}", column_letters(column), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_columns() {
        assert_eq!(column_index_from_reference("A1"), Some(0));
        assert_eq!(column_index_from_reference("Z1"), Some(25));
        assert_eq!(column_index_from_reference("AA1"), Some(26));
        assert_eq!(column_index_from_reference("ZZ1"), Some(701));
        assert_eq!(column_index_from_reference("AAA1"), Some(702));
        assert_eq!(column_index_from_reference("XFD1048576"), Some(16383));
    }

    #[test]
    fn test_lenient_references() {
        assert_eq!(column_index_from_reference("aa3"), Some(26));
        assert_eq!(column_index_from_reference("$B$2"), Some(1));
        assert_eq!(column_index_from_reference("C"), Some(2));
        // Letters after the first digit do not count
        assert_eq!(column_index_from_reference("B2C"), Some(1));
        assert_eq!(column_index_from_reference(""), None);
        assert_eq!(column_index_from_reference("42"), None);
        assert_eq!(column_index_from_reference("$1"), None);
    }

    #[test]
    fn test_overflow_is_none() {
        let reference = format!("{}1", "Z".repeat(40));
        assert_eq!(column_index_from_reference(&reference), None);
    }

    #[test]
    fn test_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
        assert_eq!(cell_reference(2, 5), "C5");
    }

    #[test]
    fn test_round_trip_through_three_letters() {
        for index in 0..18278 {
            let reference = format!("{}1", column_letters(index));
            assert_eq!(column_index_from_reference(&reference), Some(index), "{}", reference);
        }
    }
}
