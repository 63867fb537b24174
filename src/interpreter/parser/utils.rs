use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        operators::{ASSIGNMENT_TIER, precedence_of},
        parser::core::ParseResult,
    },
    util::{
        num::{from_i64, roman_value},
        text::unescape,
    },
};

/// Finds the bracket that closes the one at `start`.
///
/// Bracket kinds are interchangeable while counting depth, but the pair that
/// closes the group must match.
///
/// # Errors
/// - `MismatchedBracket` when the group is closed by the wrong kind.
/// - `UnclosedBracket` when the tokens run out first.
pub(in crate::interpreter::parser) fn find_closing(tokens: &[Token], start: usize) -> ParseResult<usize> {
    let open = bracket_char(&tokens[start]);
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth -= 1;
                if depth == 0 {
                    let close = bracket_char(token);
                    if closing_for(open) != close {
                        return Err(ParseError::MismatchedBracket { open, close });
                    }
                    return Ok(i);
                }
            },
            _ => {},
        }
    }

    Err(ParseError::UnclosedBracket { open })
}

/// Splits the interior of a call's brackets at its top-level commas.
///
/// A trailing comma adds no parameter, so `f(1,)` has a single argument. An
/// empty span anywhere else is kept and left for the caller to reject or fill
/// in.
pub(in crate::interpreter::parser) fn split_parameters(tokens: &[Token]) -> Vec<&[Token]> {
    let mut spans = Vec::new();
    if tokens.is_empty() {
        return spans;
    }

    let mut depth = 0usize;
    let mut start = Some(0);

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                if let Some(from) = start {
                    spans.push(&tokens[from..i]);
                }
                start = (i + 1 < tokens.len()).then_some(i + 1);
            },
            _ => {},
        }
    }

    if let Some(from) = start {
        spans.push(&tokens[from..]);
    }
    spans
}

/// Returns the index one past the end of a macro body that starts at `start`.
///
/// The body runs until the first operator at bracket depth zero that binds
/// more loosely than assignment, so `@f = x + 1; @f` ends the body at `;`.
pub(in crate::interpreter::parser) fn macro_body_end(tokens: &[Token], start: usize) -> usize {
    let mut depth = 0i32;

    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth -= 1,
            TokenKind::Operator if depth == 0 => {
                if precedence_of(&token.text).is_some_and(|tier| tier > ASSIGNMENT_TIER) {
                    return i;
                }
            },
            _ => {},
        }
    }

    tokens.len()
}

/// Reads a decimal literal.
///
/// # Errors
/// `InvalidNumber` when the text is not a number, such as `1.2.3` or `1e`.
pub(in crate::interpreter::parser) fn parse_decimal(text: &str) -> ParseResult<f64> {
    text.parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber { text: text.to_string() })
}

/// Reads a prefixed integer literal.
///
/// The digits are read as a signed 64-bit integer and widened to a number.
///
/// # Errors
/// - `EmptyLiteral` when the prefix has no digits after it.
/// - `InvalidLiteral` when the digits overflow.
pub(in crate::interpreter::parser) fn parse_radix(kind: TokenKind, text: &str) -> ParseResult<f64> {
    let (name, radix) = match kind {
        TokenKind::Hex => ("Hex", 16),
        TokenKind::Binary => ("Binary", 2),
        TokenKind::Octal => ("Octal", 8),
        _ => unreachable!(),
    };

    if text.is_empty() {
        return Err(ParseError::EmptyLiteral { kind: name });
    }

    i64::from_str_radix(text, radix).map(from_i64)
                                    .map_err(|_| ParseError::InvalidLiteral { kind: name,
                                                                              text: text.to_string(), })
}

/// Reads a `0r` Roman numeral literal.
///
/// # Errors
/// - `EmptyLiteral` for a bare `0r`.
/// - `InvalidLiteral` for an overline with nothing before it.
pub(in crate::interpreter::parser) fn parse_roman(text: &str) -> ParseResult<f64> {
    if text.is_empty() {
        return Err(ParseError::EmptyLiteral { kind: "Roman numeral" });
    }
    roman_value(text).ok_or_else(|| ParseError::InvalidLiteral { kind: "Roman numeral",
                                                                 text: text.to_string(), })
}

/// Resolves the escapes of a quote literal.
///
/// # Errors
/// `InvalidEscape` for a malformed escape.
pub(in crate::interpreter::parser) fn parse_quote(raw: &str) -> ParseResult<String> {
    unescape(raw).ok_or_else(|| ParseError::InvalidEscape { text: raw.to_string() })
}

/// Reads a character literal as its code point.
///
/// # Errors
/// - `InvalidEscape` for a malformed escape.
/// - `CharLength` unless exactly one character remains after unescaping.
pub(in crate::interpreter::parser) fn parse_char(raw: &str) -> ParseResult<f64> {
    let text = parse_quote(raw)?;
    let mut chars = text.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(f64::from(u32::from(c))),
        _ => Err(ParseError::CharLength { text: raw.to_string() }),
    }
}

/// The matching closer for an opening bracket.
pub(in crate::interpreter::parser) const fn closing_for(open: char) -> char {
    match open {
        '[' => ']',
        '{' => '}',
        _ => ')',
    }
}

/// The bracket character of a bracket token.
pub(in crate::interpreter::parser) fn bracket_char(token: &Token) -> char {
    token.text.chars().next().unwrap_or('(')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn closing_bracket_skips_nested_groups() {
        let tokens = tokenize("(a [b] (c)) d").unwrap();
        assert_eq!(find_closing(&tokens, 0), Ok(8));
        assert_eq!(find_closing(&tokens, 2), Ok(4));
    }

    #[test]
    fn closing_bracket_errors() {
        let tokens = tokenize("(1 + 2]").unwrap();
        assert_eq!(find_closing(&tokens, 0),
                   Err(ParseError::MismatchedBracket { open: '(', close: ']' }));

        let tokens = tokenize("{1 + (2)").unwrap();
        assert_eq!(find_closing(&tokens, 0), Err(ParseError::UnclosedBracket { open: '{' }));
    }

    #[test]
    fn parameters_split_at_top_level_commas() {
        let tokens = tokenize("a, f(b, c), d,").unwrap();
        let spans = split_parameters(&tokens);
        let lengths: Vec<usize> = spans.iter().map(|span| span.len()).collect();
        assert_eq!(lengths, [1, 6, 1]);

        let tokens = tokenize(", a").unwrap();
        assert_eq!(split_parameters(&tokens)[0].len(), 0);
    }

    #[test]
    fn macro_body_stops_at_sequence() {
        let tokens = tokenize("x + (1; 2); y").unwrap();
        assert_eq!(macro_body_end(&tokens, 0), 7);

        let tokens = tokenize("x = y = 2").unwrap();
        assert_eq!(macro_body_end(&tokens, 0), tokens.len());
    }

    #[test]
    fn literal_readers() {
        assert_eq!(parse_decimal("2.5e2"), Ok(250.0));
        assert!(parse_decimal("1.2.3").is_err());
        assert_eq!(parse_radix(TokenKind::Hex, "ff"), Ok(255.0));
        assert_eq!(parse_radix(TokenKind::Binary, "101"), Ok(5.0));
        assert_eq!(parse_radix(TokenKind::Octal, ""), Err(ParseError::EmptyLiteral { kind: "Octal" }));
        assert_eq!(parse_roman("XIV"), Ok(14.0));
        assert_eq!(parse_char("a"), Ok(97.0));
        assert_eq!(parse_char(r"\n"), Ok(10.0));
        assert!(matches!(parse_char("ab"), Err(ParseError::CharLength { .. })));
        assert!(matches!(parse_quote(r"\q"), Err(ParseError::InvalidEscape { .. })));
    }
}
