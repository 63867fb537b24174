/// Numeric conversion helpers.
///
/// The language only has one value type, `f64`. This module collects the
/// conversions between it and the integers that bitwise operators, counts,
/// indices and store addresses need, plus Roman numeral reading.
pub mod num;
/// Text helpers.
///
/// Quote unescaping and the conversion between text and the one-code-point-
/// per-cell representation strings take in the store.
pub mod text;
