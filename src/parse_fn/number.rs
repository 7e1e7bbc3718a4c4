//! Lenient numeric parsing for tag values.
//!
//! `identify` prints numbers with trailing units or annotations
//! (`72 PixelsPerInch`, `5.6 `), so these parsers read the longest numeric
//! prefix and ignore whatever follows it.

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses the leading base-10 integer of `value`, skipping leading whitespace.
///
/// `"1600"` and `"1600 px"` both give `1600`, `"3.9"` gives `3`.
pub fn leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parses the leading decimal float of `value`, skipping leading whitespace.
///
/// Accepts an optional sign, a fraction and an exponent. Returns `None` when
/// no digit is found before the first non-numeric character.
pub fn leading_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits == 0 {
            return None;
        }
        end += 1 + frac_digits;
    } else if int_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}
