//! Column letter arithmetic
//!
//! Columns are base-26 numerals over `A`–`Z` with no zero digit:
//! `A` = 1, `Z` = 26, `AA` = 27, `ZZ` = 702, `AAA` = 703.

/// Next column after `letters`, carrying from the rightmost letter.
///
/// Examples:
/// - `A` → `B`
/// - `Z` → `AA`
/// - `CZZ` → `DAA`
pub fn increment_column(letters: &str) -> String {
    let mut chars: Vec<char> = letters.chars().collect();
    let mut carry = true;

    for c in chars.iter_mut().rev() {
        if *c == 'Z' {
            *c = 'A';
        } else {
            *c = char::from_u32(*c as u32 + 1).unwrap_or(*c);
            carry = false;
            break;
        }
    }

    if carry {
        chars.insert(0, 'A');
    }

    chars.into_iter().collect()
}

/// Column letters to their 1-based number. `None` for empty, non `A`–`Z`, or overflowing input.
pub fn column_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = c as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// 1-based column number to letters. `0` yields an empty string.
pub fn column_letters(number: u32) -> String {
    let mut result = String::new();
    let mut n = number;

    while n > 0 {
        let remainder = (n - 1) % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    result
}
