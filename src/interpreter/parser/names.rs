use crate::interpreter::{
    lexer::{Token, TokenKind},
    operators::{ASSIGNMENT_TIER, precedence_of},
};

/// What a name in the source denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A global variable.
    Variable,
    /// A lexically scoped local.
    Local,
    /// A named macro.
    Macro,
    /// A registered builtin.
    Function,
}

/// How a name was declared inside an open name frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTag {
    /// Declared as a local: an assignment target, a parameter alias or any
    /// name already classified as local.
    Local,
    /// Declared as a macro by a definition.
    Macro,
}

/// What the classifier needs to know about the engine it parses for.
pub trait NameEnvironment {
    /// Whether `name` is a registered builtin.
    fn is_function(&self, name: &str) -> bool;
    /// Whether a macro called `name` is currently defined.
    fn is_macro(&self, name: &str) -> bool;
}

/// The names declared in each open frame of the source: the top level, each
/// macro body and each lambda.
///
/// # Example
/// ```
/// use wingcalc::interpreter::parser::names::{NameStack, NameTag};
///
/// let mut names = NameStack::new();
/// names.declare("x", NameTag::Local);
/// names.push_frame();
/// assert!(names.has("X", NameTag::Local));
/// names.pop_frame();
/// assert!(!names.has("x", NameTag::Macro));
/// ```
#[derive(Debug, Clone)]
pub struct NameStack {
    frames: Vec<Vec<(String, NameTag)>>,
}

impl Default for NameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NameStack {
    /// A stack with a single, empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Vec::new()] }
    }

    /// Opens a frame.
    pub fn push_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Closes the innermost frame. The outermost frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declares a name in the innermost frame.
    pub fn declare(&mut self, name: &str, tag: NameTag) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push((name.to_lowercase(), tag));
        }
    }

    /// Whether any open frame declares `name` with `tag`.
    #[must_use]
    pub fn has(&self, name: &str, tag: NameTag) -> bool {
        let name = name.to_lowercase();
        self.frames
            .iter()
            .flatten()
            .any(|(declared, t)| *t == tag && *declared == name)
    }
}

/// Classifies the name token at `index`.
///
/// Sigils decide on their own: `$` is a variable, `#` a local and `@` a
/// macro. A bare name followed by `(` is a builtin if one is registered under
/// that name, and a macro if one is defined, declared in an open frame, or
/// about to be defined by this very expression. Otherwise a bare name at the
/// top level is always a variable; below the top level it is a local when it
/// is being assigned to or has been declared local, and a variable otherwise.
#[must_use]
pub fn classify(tokens: &[Token],
                index: usize,
                top_level: bool,
                names: &NameStack,
                env: &dyn NameEnvironment)
                -> NameKind {
    let text = tokens[index].text.as_str();

    match text.chars().next() {
        Some('@') => return NameKind::Macro,
        Some('$') => return NameKind::Variable,
        Some('#') => return NameKind::Local,
        _ => {},
    }

    let next_paren = tokens.get(index + 1)
                           .is_some_and(|token| token.kind == TokenKind::OpenParen);
    if next_paren {
        if env.is_function(text) {
            return NameKind::Function;
        }
        if env.is_macro(text) || names.has(text, NameTag::Macro) || is_assignment_target(tokens, index) {
            return NameKind::Macro;
        }
    }

    if top_level {
        NameKind::Variable
    } else if is_assignment_target(tokens, index) || names.has(text, NameTag::Local) {
        NameKind::Local
    } else {
        NameKind::Variable
    }
}

/// Scans forward from the token after `index` and reports whether an
/// assignment-tier operator is reached at bracket depth zero before any
/// operator of a looser tier.
#[must_use]
pub fn is_assignment_target(tokens: &[Token], index: usize) -> bool {
    let mut depth = 0i32;

    for token in tokens.iter().skip(index + 1) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => depth -= 1,
            TokenKind::Operator if depth == 0 => match precedence_of(&token.text) {
                Some(ASSIGNMENT_TIER) => return true,
                Some(tier) if tier > ASSIGNMENT_TIER => return false,
                _ => {},
            },
            _ => {},
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    struct Registry;

    impl NameEnvironment for Registry {
        fn is_function(&self, name: &str) -> bool {
            name == "sqrt"
        }

        fn is_macro(&self, name: &str) -> bool {
            name == "twice"
        }
    }

    fn kind_of(source: &str, index: usize, top_level: bool, names: &NameStack) -> NameKind {
        let tokens = tokenize(source).unwrap();
        classify(&tokens, index, top_level, names, &Registry)
    }

    #[test]
    fn sigils_fix_the_kind() {
        let names = NameStack::new();
        assert_eq!(kind_of("$x", 0, false, &names), NameKind::Variable);
        assert_eq!(kind_of("#x", 0, true, &names), NameKind::Local);
        assert_eq!(kind_of("@x", 0, true, &names), NameKind::Macro);
    }

    #[test]
    fn calls_resolve_to_builtins_before_macros() {
        let names = NameStack::new();
        assert_eq!(kind_of("sqrt(4)", 0, true, &names), NameKind::Function);
        assert_eq!(kind_of("twice(4)", 0, true, &names), NameKind::Macro);
        assert_eq!(kind_of("f(x) = x", 0, true, &names), NameKind::Macro);
    }

    #[test]
    fn bare_names_at_top_level_are_variables() {
        let mut names = NameStack::new();
        names.declare("x", NameTag::Local);
        assert_eq!(kind_of("x = 1", 0, true, &names), NameKind::Variable);
        assert_eq!(kind_of("x", 0, false, &names), NameKind::Local);
    }

    #[test]
    fn assignment_targets_below_top_level_are_locals() {
        let names = NameStack::new();
        assert_eq!(kind_of("y += 1", 0, false, &names), NameKind::Local);
        assert_eq!(kind_of("y + 1", 0, false, &names), NameKind::Variable);
        assert_eq!(kind_of("y; z = 1", 0, false, &names), NameKind::Variable);
    }

    #[test]
    fn assignment_scan_ignores_nested_brackets() {
        let tokens = tokenize("a + (b = 1)").unwrap();
        assert!(!is_assignment_target(&tokens, 0));
        assert!(is_assignment_target(&tokens, 3));
    }
}
