use pretty_assertions::assert_eq;
use wingcalc::{
    Engine,
    error::{Error, TokenError},
    interpreter::lexer::{TokenKind, tokenize},
};

fn texts(source: &str) -> Vec<String> {
    tokenize(source).unwrap().into_iter().map(|t| t.text).collect()
}

fn solve(source: &str) -> f64 {
    Engine::new().solve(source)
                 .unwrap_or_else(|e| panic!("{source} failed: {e}"))
}

#[test]
fn operators_split_at_unary_characters() {
    assert_eq!(texts("a<=-b"), ["a", "<=", "-", "b"]);
    assert_eq!(texts("x**=2"), ["x", "**=", "2"]);
    assert_eq!(texts("f(1,2)"), ["f", "(", "1", ",", "2", ")"]);
}

#[test]
fn literals_keep_their_kind() {
    let kinds: Vec<TokenKind> = tokenize("0xFF 'a' \"hi\" 1.5e3")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds,
               [TokenKind::Hex, TokenKind::Char, TokenKind::Quote, TokenKind::Number]);
}

#[test]
fn literal_values() {
    assert_eq!(solve("0xff"), 255.0);
    assert_eq!(solve("0b101"), 5.0);
    assert_eq!(solve("0o17"), 15.0);
    assert_eq!(solve("0rXIV"), 14.0);
    assert_eq!(solve("0rmcmxc"), 1990.0);
    assert_eq!(solve("'a'"), 97.0);
    assert_eq!(solve("1_000_000"), 1_000_000.0);
    assert_eq!(solve("2.5e2"), 250.0);
}

#[test]
fn quotes_count_their_characters() {
    assert_eq!(solve("\"hello\""), 5.0);
    assert_eq!(solve("\"\""), 0.0);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(solve("1 + `two` 2"), 3.0);
    assert_eq!(solve("4 `trailing comment"), 4.0);
}

#[test]
fn unterminated_literals() {
    assert_eq!(tokenize("\"abc"),
               Err(TokenError::UnterminatedQuote { text: "abc".to_string() }));
    assert_eq!(tokenize("'a"),
               Err(TokenError::UnterminatedChar { text: "a".to_string() }));
}

#[test]
fn sign_runs_follow_the_doubling_rule() {
    assert_eq!(solve("-5"), -5.0);
    assert_eq!(solve("+-5"), -5.0);
    assert_eq!(solve("-+5"), -5.0);
    assert_eq!(solve("3 - -2"), 5.0);

    assert_eq!(tokenize("--5"),
               Err(TokenError::DoubledSign { sign:     "-".to_string(),
                                             position: "start", }));
    assert_eq!(tokenize("5 + +"),
               Err(TokenError::DoubledSign { sign:     "+".to_string(),
                                             position: "end", }));
    assert_eq!(tokenize("1 - - - 2"), Err(TokenError::SignRun { sign: "-".to_string() }));
}

#[test]
fn token_errors_surface_through_the_engine() {
    let engine = Engine::new();
    assert!(matches!(engine.solve("++5"), Err(Error::Token(_))));
    assert!(matches!(engine.solve("0q1"), Err(Error::Token(TokenError::UnknownPrefix { prefix: 'q' }))));
}
