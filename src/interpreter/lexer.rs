use logos::Logos;

use crate::error::TokenError;

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Decimal literal such as `3.14`, `.5` or `2.1e-10`.
    Number,
    /// A run of operator characters such as `+`, `**` or `<<=`.
    Operator,
    /// An identifier, possibly led by one of the sigils `$`, `#` or `@`.
    Name,
    /// A `0x` literal. The token text holds only the digits.
    Hex,
    /// A `0b` literal. The token text holds only the digits.
    Binary,
    /// A `0o` literal. The token text holds only the digits.
    Octal,
    /// A `0r` Roman numeral literal. The token text holds only the numerals.
    Roman,
    /// One of `(`, `[` or `{`.
    OpenParen,
    /// One of `)`, `]` or `}`.
    CloseParen,
    /// `,`
    Comma,
    /// A double-quoted string. The token text holds the raw interior, escapes
    /// included.
    Quote,
    /// A single-quoted character. The token text holds the raw interior.
    Char,
}

/// A typed piece of source text.
///
/// Tokens are the unit the tree builder and the name classifier operate on.
/// Digit-grouping underscores and literal prefixes are already stripped from
/// [`Token::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The token's text.
    pub text: String,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind,
               text: text.into() }
    }

    /// Returns `true` when this is an operator token with exactly the given
    /// symbol.
    #[must_use]
    pub fn is_operator(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == symbol
    }

    fn is_sign(&self) -> bool {
        self.is_operator("+") || self.is_operator("-")
    }
}

/// The raw lexemes recognised by the scanner.
///
/// Each variant maps onto a [`TokenKind`]; underscores are kept inside the
/// matched slices and stripped when the [`Token`] is built.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum Lexeme {
    /// `` `comments` ``, terminated by the next unescaped backtick or by the
    /// end of input.
    #[regex(r"`([^`\\]|\\.)*`?", logos::skip, allow_greedy = true)]
    Comment,
    /// `_` on its own is a no-op separator.
    #[token("_", logos::skip)]
    Underscore,
    #[regex(r#""([^"`\\]|\\.)*""#)]
    Quote,
    #[regex(r"'([^'`\\]|\\.)*'")]
    Char,
    #[regex(r"0[xX][0-9a-fA-F_]*")]
    Hex,
    #[regex(r"0[bB][01_]*")]
    Binary,
    #[regex(r"0[oO][0-7_]*")]
    Octal,
    #[regex(r"0[rR][IVXLCDMivxlcdm_\x{305}]*")]
    Roman,
    #[regex(r"[0-9.]([0-9._]|[eE][+-]?)*")]
    Number,
    #[regex(r"[\p{L}#@][\p{L}0-9_]*")]
    #[regex(r"\$(_*\p{L}[\p{L}0-9_]*)?")]
    Name,
    /// The unary-capable characters `+`, `-`, `!` and `~` only ever start a run.
    #[regex(r"[~!%^&*\-+=|<>/;:?][%^&*=|<>/;:?_]*")]
    Operator,
    #[regex(r"[(\[{]")]
    OpenParen,
    #[regex(r"[)\]}]")]
    CloseParen,
    #[token(",")]
    Comma,
}

/// Splits source text into tokens.
///
/// Besides recognising the token kinds, this applies the validation and
/// fix-up passes that run over the whole stream:
/// - a decimal literal `0` directly followed by a letter other than the four
///   literal prefixes is rejected,
/// - runs of `+`/`-` are checked (see [`check_sign_runs`]),
/// - a `-` directly after `**` is wrapped in parentheses so that `2**-3`
///   groups as `2**(-3)`.
///
/// # Errors
/// Returns a [`TokenError`] for unterminated quotes and character literals,
/// unknown numeric prefixes, characters that start no token, and illegal sign
/// runs.
///
/// # Example
/// ```
/// use wingcalc::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("1_000 + 0xff").unwrap();
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["1000", "+", "ff"]);
/// assert_eq!(tokens[2].kind, TokenKind::Hex);
///
/// assert!(tokenize("1 + \"open").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenError> {
    let mut lexer = Lexeme::lexer(source);
    let mut tokens = Vec::new();
    let mut pending_zero_end = None;

    while let Some(lexeme) = lexer.next() {
        let slice = lexer.slice();
        let span = lexer.span();

        let Ok(lexeme) = lexeme else {
            return Err(unmatched(source, span.start));
        };

        if let Some(end) = pending_zero_end.take()
           && lexeme == Lexeme::Name
           && source[end..span.start].chars().all(|c| c == '_')
           && let Some(letter) = slice.chars().next().filter(|c| c.is_alphabetic())
        {
            return Err(TokenError::UnknownPrefix { prefix: letter });
        }

        let token = match lexeme {
            Lexeme::Comment | Lexeme::Underscore => continue,
            Lexeme::Quote => Token::new(TokenKind::Quote, &slice[1..slice.len() - 1]),
            Lexeme::Char => Token::new(TokenKind::Char, &slice[1..slice.len() - 1]),
            Lexeme::Hex => Token::new(TokenKind::Hex, strip_underscores(&slice[2..])),
            Lexeme::Binary => Token::new(TokenKind::Binary, strip_underscores(&slice[2..])),
            Lexeme::Octal => Token::new(TokenKind::Octal, strip_underscores(&slice[2..])),
            Lexeme::Roman => Token::new(TokenKind::Roman, strip_underscores(&slice[2..])),
            Lexeme::Number => {
                let text = strip_underscores(slice);
                let mut chars = text.chars();
                if chars.next() == Some('0')
                   && let Some(letter) = chars.next().filter(|c| c.is_alphabetic())
                {
                    return Err(TokenError::UnknownPrefix { prefix: letter });
                }
                if text == "0" {
                    pending_zero_end = Some(span.end);
                }
                Token::new(TokenKind::Number, text)
            },
            Lexeme::Name => Token::new(TokenKind::Name, strip_underscores(slice)),
            Lexeme::Operator => Token::new(TokenKind::Operator, strip_underscores(slice)),
            Lexeme::OpenParen => Token::new(TokenKind::OpenParen, slice),
            Lexeme::CloseParen => Token::new(TokenKind::CloseParen, slice),
            Lexeme::Comma => Token::new(TokenKind::Comma, slice),
        };

        tokens.push(token);
    }

    check_sign_runs(&tokens)?;
    group_negative_exponents(&mut tokens);

    Ok(tokens)
}

/// Validates runs of `+` and `-` operator tokens.
///
/// Three or more in a row are always illegal. A pair at the very start or the
/// very end of the stream is illegal when both signs are the same symbol;
/// `+-5` and `-+5` are accepted and fold through the unary pass.
///
/// # Errors
/// Returns [`TokenError::SignRun`] or [`TokenError::DoubledSign`].
pub fn check_sign_runs(tokens: &[Token]) -> Result<(), TokenError> {
    let mut run = 0;

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_sign() {
            run = 0;
            continue;
        }

        run += 1;
        if run > 2 {
            return Err(TokenError::SignRun { sign: token.text.clone() });
        }

        let doubled = run == 2 && tokens[i - 1].text == token.text;
        if doubled && i == 1 {
            return Err(TokenError::DoubledSign { sign:     token.text.clone(),
                                                 position: "start", });
        }
        if doubled && i == tokens.len() - 1 {
            return Err(TokenError::DoubledSign { sign:     token.text.clone(),
                                                 position: "end", });
        }
    }

    Ok(())
}

/// Wraps `- x` in parentheses whenever it directly follows `**`.
fn group_negative_exponents(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 2 < tokens.len() {
        if tokens[i].is_operator("**")
           && tokens[i + 1].is_operator("-")
           && tokens[i + 2].kind != TokenKind::OpenParen
        {
            tokens.insert(i + 1, Token::new(TokenKind::OpenParen, "("));
            tokens.insert(i + 4, Token::new(TokenKind::CloseParen, ")"));
        }
        i += 1;
    }
}

fn strip_underscores(slice: &str) -> String {
    slice.chars().filter(|&c| c != '_').collect()
}

/// Explains why the scanner could not match anything at `start`.
fn unmatched(source: &str, start: usize) -> TokenError {
    let rest = &source[start..];
    let mut chars = rest.chars();

    match chars.next() {
        Some('"') => TokenError::UnterminatedQuote { text: chars.as_str().to_string() },
        Some('\'') => TokenError::UnterminatedChar { text: chars.as_str().to_string() },
        Some(character) => TokenError::UnexpectedCharacter { character },
        None => TokenError::UnexpectedCharacter { character: ' ' },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|t| (t.kind, t.text))
                        .collect()
    }

    #[test]
    fn unary_characters_never_fuse_after_an_operator() {
        let texts: Vec<_> = kinds("2*-3").into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, ["2", "*", "-", "3"]);

        let texts: Vec<_> = kinds("a!=b").into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, ["a", "!=", "b"]);
    }

    #[test]
    fn sigils_split_the_way_names_do() {
        assert_eq!(kinds("$5"),
                   [(TokenKind::Name, "$".to_string()), (TokenKind::Number, "5".to_string())]);
        assert_eq!(kinds("#5"), [(TokenKind::Name, "#5".to_string())]);
        assert_eq!(kinds("$abc"), [(TokenKind::Name, "$abc".to_string())]);
    }

    #[test]
    fn comments_and_underscores_vanish() {
        let texts: Vec<_> = kinds("1_0 `ignored` + a_b `open comment")
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(texts, ["10", "+", "ab"]);
    }

    #[test]
    fn prefixed_literals_keep_only_their_digits() {
        assert_eq!(kinds("0b101 0o17 0rXIV"),
                   [(TokenKind::Binary, "101".to_string()),
                    (TokenKind::Octal, "17".to_string()),
                    (TokenKind::Roman, "XIV".to_string())]);
    }

    #[test]
    fn unknown_prefixes_are_rejected() {
        assert_eq!(tokenize("0z1"), Err(TokenError::UnknownPrefix { prefix: 'z' }));
        assert_eq!(tokenize("0e5"), Err(TokenError::UnknownPrefix { prefix: 'e' }));
        assert!(tokenize("0.5e3").is_ok());
        assert!(tokenize("0 z").is_ok());
    }

    #[test]
    fn sign_runs() {
        assert!(tokenize("1 + + + 2").is_err());
        assert!(tokenize("--5").is_err());
        assert!(tokenize("++5").is_err());
        assert!(tokenize("5--").is_err());
        assert!(tokenize("+-5").is_ok());
        assert!(tokenize("1 - -5").is_ok());
    }

    #[test]
    fn negative_exponent_is_grouped() {
        let texts: Vec<_> = kinds("2**-3").into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, ["2", "**", "(", "-", "3", ")"]);
    }

    #[test]
    fn unterminated_literals() {
        assert!(matches!(tokenize("\"abc"), Err(TokenError::UnterminatedQuote { .. })));
        assert!(matches!(tokenize("'a"), Err(TokenError::UnterminatedChar { .. })));
    }
}
