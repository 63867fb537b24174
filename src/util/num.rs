/// Truncates a number toward zero into an `i64`.
///
/// Out-of-range values saturate and `NaN` becomes `0`, so integer-only
/// operators never fail on IEEE special values.
///
/// # Example
/// ```
/// use wingcalc::util::num::truncate;
///
/// assert_eq!(truncate(-2.9), -2);
/// assert_eq!(truncate(f64::NAN), 0);
/// assert_eq!(truncate(f64::INFINITY), i64::MAX);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn truncate(value: f64) -> i64 {
    value as i64
}

/// Widens an integer back into a number.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn from_i64(value: i64) -> f64 {
    value as f64
}

/// Widens a count (a length, an index, an iteration number) into a number.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn from_count(value: usize) -> f64 {
    value as f64
}

/// Encodes a truth value the way every comparison does: `1` or `0`.
#[must_use]
pub const fn from_bool(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Reads a number as a truth value: everything except zero is true.
#[must_use]
pub fn is_truthy(value: f64) -> bool {
    value != 0.0
}

/// Turns a numeric address into the key of its cell.
///
/// Cells of the global store and of a frame's local cells are keyed by the
/// shortest text that round-trips the address, so `$(100)` and `$(1e2)` name
/// the same cell. Negative zero shares the cell of zero.
///
/// # Example
/// ```
/// use wingcalc::util::num::address_key;
///
/// assert_eq!(address_key(100.0), "100");
/// assert_eq!(address_key(1e2), "100");
/// assert_eq!(address_key(-0.0), "0");
/// assert_eq!(address_key(2.5), "2.5");
/// ```
#[must_use]
pub fn address_key(address: f64) -> String {
    if address == 0.0 {
        return "0".to_string();
    }
    format!("{address}")
}

/// Converts a count to a `usize`, treating negative, fractional and
/// non-finite values as the truncated non-negative part.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_count(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 { 0 } else { value as usize }
}

/// Reads a Roman numeral.
///
/// Accepts `I V X L C D M` in either case with subtractive notation. A
/// combining overline (`U+0305`) after a numeral multiplies it by one
/// thousand. Returns `None` for anything else, including an overline with no
/// numeral before it.
///
/// # Example
/// ```
/// use wingcalc::util::num::roman_value;
///
/// assert_eq!(roman_value("XIV"), Some(14.0));
/// assert_eq!(roman_value("mcmxc"), Some(1990.0));
/// assert_eq!(roman_value("V\u{305}"), Some(5000.0));
/// assert_eq!(roman_value("Q"), None);
/// ```
#[must_use]
pub fn roman_value(numeral: &str) -> Option<f64> {
    let mut digits: Vec<f64> = Vec::new();

    for c in numeral.chars() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1.0,
            'V' => 5.0,
            'X' => 10.0,
            'L' => 50.0,
            'C' => 100.0,
            'D' => 500.0,
            'M' => 1000.0,
            '\u{305}' => {
                let last = digits.last_mut()?;
                *last *= 1000.0;
                continue;
            },
            _ => return None,
        };
        digits.push(value);
    }

    let mut total = 0.0;
    for (i, &digit) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(&next) if digit < next => total -= digit,
            _ => total += digit,
        }
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_clamp_at_zero() {
        assert_eq!(to_count(-3.0), 0);
        assert_eq!(to_count(f64::NAN), 0);
        assert_eq!(to_count(3.9), 3);
    }

    #[test]
    fn roman_subtractive_pairs() {
        assert_eq!(roman_value("IV"), Some(4.0));
        assert_eq!(roman_value("IX"), Some(9.0));
        assert_eq!(roman_value("XL"), Some(40.0));
        assert_eq!(roman_value("CM"), Some(900.0));
        assert_eq!(roman_value(""), Some(0.0));
        assert_eq!(roman_value("\u{305}"), None);
    }

    #[test]
    fn address_keys_are_stable() {
        assert_eq!(address_key(101.0), address_key(100.0 + 1.0));
        assert_ne!(address_key(1.0), address_key(1.5));
    }
}
