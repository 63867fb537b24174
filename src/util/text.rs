use crate::util::num::truncate;

/// Resolves backslash escapes in quoted text.
///
/// Supports `\n \t \r \0 \a \b \f \v \\ \" \' \``, `\xHH`, `\uHHHH` and
/// `\u{H…}`. Returns `None` when an escape is malformed or names no
/// character.
///
/// # Example
/// ```
/// use wingcalc::util::text::unescape;
///
/// assert_eq!(unescape(r"a\tb").as_deref(), Some("a\tb"));
/// assert_eq!(unescape(r#"say \"hi\""#).as_deref(), Some("say \"hi\""));
/// assert_eq!(unescape(r"A\u{1F600}").as_deref(), Some("A\u{1F600}"));
/// assert_eq!(unescape(r"\q"), None);
/// ```
#[must_use]
pub fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            c @ ('\\' | '"' | '\'' | '`') => c,
            'x' => hex_char(&mut chars, 2)?,
            'u' => {
                let rest = chars.as_str();
                if let Some(braced) = rest.strip_prefix('{') {
                    let close = braced.find('}')?;
                    let code = u32::from_str_radix(&braced[..close], 16).ok()?;
                    chars = braced[close + 1..].chars();
                    char::from_u32(code)?
                } else {
                    hex_char(&mut chars, 4)?
                }
            },
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, width: usize) -> Option<char> {
    let digits: String = chars.by_ref().take(width).collect();
    if digits.len() != width {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}

/// Converts text into the cell values that store it: one code point per cell.
#[must_use]
pub fn to_cells(text: &str) -> Vec<f64> {
    text.chars().map(|c| f64::from(u32::from(c))).collect()
}

/// Converts cell values back into text. Cells that hold no valid code point
/// become `U+FFFD`.
///
/// # Example
/// ```
/// use wingcalc::util::text::{from_cells, to_cells};
///
/// assert_eq!(from_cells(&to_cells("hey")), "hey");
/// assert_eq!(from_cells(&[-1.0]), "\u{FFFD}");
/// ```
#[must_use]
pub fn from_cells(cells: &[f64]) -> String {
    cells.iter()
         .map(|&cell| {
             u32::try_from(truncate(cell)).ok()
                                          .and_then(char::from_u32)
                                          .unwrap_or(char::REPLACEMENT_CHARACTER)
         })
         .collect()
}

/// Formats a list the way `print` shows it: `{ 1, 2, 3 }`.
#[must_use]
pub fn list_string(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("{{ {} }}", items.join(", "))
}
