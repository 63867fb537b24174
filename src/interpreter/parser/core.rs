use crate::{
    ast::{Node, NodeRef},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        operators::{
            ASSIGNMENT_TIER, Associativity, COEFFICIENT, UnaryOp, associativity_of, build, is_unary,
            lookup,
        },
        parser::{
            names::{NameEnvironment, NameKind, NameStack, NameTag, classify},
            utils::{
                bracket_char, closing_for, find_closing, macro_body_end, parse_char, parse_decimal,
                parse_quote, parse_radix, parse_roman, split_parameters,
            },
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The outcome of building a tree from a full input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTree {
    /// The root node, or `None` when the input held nothing to evaluate.
    pub root:           Option<NodeRef>,
    /// Whether the input started with a binary operator and was continued
    /// from `ANS`.
    pub implied_answer: bool,
}

/// Builds the expression tree for a whole input.
///
/// This is the entry point of the parser. The tokens are folded into a flat
/// list of nodes and operator placeholders, prefix operators are collapsed
/// right to left, and binary operators are then collapsed tier by tier,
/// tightest first, until a single node remains.
///
/// When `imply_answer` is set and the input starts with a binary operator of
/// two or more characters, the input is continued from `ANS`, so `** 2`
/// reads as `ANS ** 2`.
///
/// # Errors
/// Any [`ParseError`]: bracket problems, missing operands, invalid literals,
/// misplaced tokens or leftover nodes.
///
/// # Example
/// ```
/// use wingcalc::{
///     Engine,
///     interpreter::{lexer::tokenize, parser::core::build_tree},
/// };
///
/// let engine = Engine::new();
/// let tokens = tokenize("1 + 2 * 3").unwrap();
/// let tree = build_tree(&tokens, &engine, true).unwrap();
/// assert_eq!(tree.root.unwrap().to_string(), "(1 + (2 * 3))");
/// assert!(!tree.implied_answer);
/// ```
pub fn build_tree(tokens: &[Token], env: &dyn NameEnvironment, imply_answer: bool) -> ParseResult<ParsedTree> {
    let mut builder = TreeBuilder { env,
                                    names: NameStack::new() };

    let mut elements = builder.linearize(tokens, true)?;

    let implied_answer = imply_answer
                         && matches!(elements.first(),
                                     Some(Element::Operator(symbol)) if symbol.chars().count() >= 2);
    if implied_answer {
        elements.insert(0, Element::Node(Node::Variable("ANS".to_string()).into_ref()));
    }

    let root = collapse(elements)?;
    tracing::trace!(implied_answer, built = root.is_some(), "expression tree built");

    Ok(ParsedTree { root, implied_answer })
}

/// One entry of the flat list a span is folded into before collapsing.
#[derive(Debug, Clone)]
enum Element {
    Node(NodeRef),
    Operator(String),
}

impl Element {
    const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    fn into_node(self) -> Option<NodeRef> {
        match self {
            Self::Node(node) => Some(node),
            Self::Operator(_) => None,
        }
    }
}

struct TreeBuilder<'a> {
    env:   &'a dyn NameEnvironment,
    names: NameStack,
}

impl TreeBuilder<'_> {
    /// Builds the tree for a span. `None` means the span held nothing.
    fn build(&mut self, tokens: &[Token], top_level: bool) -> ParseResult<Option<NodeRef>> {
        let elements = self.linearize(tokens, top_level)?;
        collapse(elements)
    }

    /// Folds a span into nodes and operator placeholders.
    ///
    /// Brackets, calls, lambdas and macro bodies are built recursively here,
    /// so the result holds no bracket tokens. A coefficient placeholder is
    /// inserted between a value and a following name or bracket group.
    fn linearize(&mut self, tokens: &[Token], top_level: bool) -> ParseResult<Vec<Element>> {
        let mut elements: Vec<Element> = Vec::new();
        let mut coefficient = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            match token.kind {
                TokenKind::Number => {
                    elements.push(constant(parse_decimal(&token.text)?));
                    coefficient = true;
                },
                TokenKind::Hex | TokenKind::Binary | TokenKind::Octal => {
                    elements.push(constant(parse_radix(token.kind, &token.text)?));
                    coefficient = true;
                },
                TokenKind::Roman => {
                    elements.push(constant(parse_roman(&token.text)?));
                    coefficient = true;
                },
                TokenKind::Char => {
                    elements.push(constant(parse_char(&token.text)?));
                    coefficient = true;
                },
                TokenKind::Quote => {
                    let text = parse_quote(&token.text)?;
                    elements.push(Element::Node(Node::Quote(text).into_ref()));
                    coefficient = true;
                },
                TokenKind::Operator => {
                    coefficient = false;

                    let definition = match elements.last() {
                        Some(Element::Node(target))
                            if matches!(target.as_ref(), Node::Macro { assignable: true, .. })
                               && lookup(&token.text).is_some_and(|op| op.tier == ASSIGNMENT_TIER) =>
                        {
                            Some(target.clone())
                        },
                        _ => None,
                    };
                    elements.push(Element::Operator(token.text.clone()));

                    if let Some(target) = definition {
                        let end = macro_body_end(tokens, i + 1);
                        let body = self.macro_body(&target, &token.text, &tokens[i + 1..end])?;
                        elements.push(Element::Node(body));
                        coefficient = true;
                        i = end;
                        continue;
                    }
                },
                TokenKind::Name => {
                    i = self.name(tokens, i, top_level, &mut elements, &mut coefficient)?;
                },
                TokenKind::OpenParen => {
                    if coefficient {
                        elements.push(Element::Operator(COEFFICIENT.to_string()));
                    }
                    let end = find_closing(tokens, i)?;
                    let inner = self.build(&tokens[i + 1..end], top_level)?
                                    .ok_or_else(|| ParseError::EmptyBrackets { open:  bracket_char(token),
                                                                               close: bracket_char(&tokens[end]), })?;
                    elements.push(Element::Node(inner));
                    coefficient = true;
                    i = end;
                },
                TokenKind::CloseParen | TokenKind::Comma => {
                    return Err(ParseError::UnexpectedToken { token: token.text.clone() });
                },
            }

            i += 1;
        }

        if matches!(elements.last(), Some(Element::Operator(symbol)) if symbol == ";") {
            elements.pop();
        }

        Ok(elements)
    }

    /// Handles a name token and returns the index of the last token consumed.
    fn name(&mut self,
            tokens: &[Token],
            i: usize,
            top_level: bool,
            elements: &mut Vec<Element>,
            coefficient: &mut bool)
            -> ParseResult<usize> {
        let text = tokens[i].text.as_str();
        let kind = classify(tokens, i, top_level, &self.names, self.env);

        if *coefficient {
            if kind == NameKind::Function
               && let Some(previous) = i.checked_sub(1).map(|p| tokens[p].kind)
               && matches!(previous, TokenKind::Hex | TokenKind::Roman)
            {
                let kind = if previous == TokenKind::Hex { "Hex" } else { "Roman numeral" };
                return Err(ParseError::LiteralCoefficient { kind });
            }
            elements.push(Element::Operator(COEFFICIENT.to_string()));
        }
        *coefficient = true;

        let bare = text.strip_prefix(['$', '#', '@']).unwrap_or(text);
        let has_call = tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::OpenParen);

        match kind {
            NameKind::Function => {
                if !has_call {
                    return Err(ParseError::MissingCallBracket { name: text.to_string() });
                }
                let end = find_closing(tokens, i + 1)?;
                let args = self.parameters(&tokens[i + 2..end], false)?;
                elements.push(Element::Node(Node::FunctionCall { name: text.to_string(),
                                                                 args }.into_ref()));
                Ok(end)
            },
            NameKind::Variable if bare.is_empty() => {
                elements.push(Element::Operator("$".to_string()));
                *coefficient = false;
                Ok(i)
            },
            NameKind::Variable => {
                elements.push(Element::Node(Node::Variable(bare.to_string()).into_ref()));
                Ok(i)
            },
            NameKind::Local if bare.is_empty() => {
                elements.push(Element::Operator("#".to_string()));
                *coefficient = false;
                Ok(i)
            },
            NameKind::Local => {
                self.names.declare(bare, NameTag::Local);
                elements.push(Element::Node(Node::Local(bare.to_string()).into_ref()));
                Ok(i)
            },
            NameKind::Macro if bare.is_empty() => {
                if !has_call {
                    return Err(ParseError::BareLambdaSigil);
                }
                let end = find_closing(tokens, i + 1)?;
                elements.push(Element::Node(self.lambda(&tokens[i + 1..=end])?));
                Ok(end)
            },
            NameKind::Macro if has_call => {
                let end = find_closing(tokens, i + 1)?;
                let args = self.parameters(&tokens[i + 2..end], false)?;
                let assignable = args.iter().all(|arg| arg.alias_name().is_some());
                elements.push(Element::Node(Node::Macro { name: bare.to_string(),
                                                          args,
                                                          assignable }.into_ref()));
                Ok(end)
            },
            NameKind::Macro => {
                elements.push(Element::Node(Node::Macro { name:       bare.to_string(),
                                                          args:       Vec::new(),
                                                          assignable: true, }.into_ref()));
                Ok(i)
            },
        }
    }

    /// Builds `@(a, b, body)` from its bracketed tokens.
    ///
    /// Every parameter but the last names an alias; the last is the body.
    /// Parameters are declared local as they are read, so the body sees them
    /// as locals even though it is not at the top level.
    fn lambda(&mut self, group: &[Token]) -> ParseResult<NodeRef> {
        self.names.push_frame();
        let params = self.parameters(&group[1..group.len() - 1], true);
        self.names.pop_frame();
        let mut params = params?;

        let Some(body) = params.pop() else {
            let open = bracket_char(&group[0]);
            return Err(ParseError::EmptyBrackets { open,
                                                   close: closing_for(open) });
        };

        let aliases = params.iter()
                            .map(|param| alias_of(param))
                            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Node::Lambda { body,
                          aliases }.into_ref())
    }

    /// Builds the body of a macro definition.
    ///
    /// The macro's own name is declared before the body is read so that a
    /// body may call its macro recursively by bare name. The parameters are
    /// declared local for the duration of the body.
    fn macro_body(&mut self, target: &Node, op: &str, body: &[Token]) -> ParseResult<NodeRef> {
        let Node::Macro { name, args, .. } = target else {
            unreachable!()
        };

        self.names.declare(name, NameTag::Macro);
        self.names.push_frame();
        for alias in args.iter().filter_map(|arg| arg.alias_name()) {
            self.names.declare(alias, NameTag::Local);
        }
        let built = self.build(body, false);
        self.names.pop_frame();

        built?.ok_or_else(|| ParseError::MissingRightOperand { op: op.to_string() })
    }

    /// Builds the comma-separated parameters of a call or lambda.
    ///
    /// Empty parameters are rejected, except in a lambda where they stand for
    /// an unused alias `_`. Lambda aliases are declared local as they are
    /// read.
    fn parameters(&mut self, tokens: &[Token], lambda: bool) -> ParseResult<Vec<NodeRef>> {
        let spans = split_parameters(tokens);
        let last = spans.len().saturating_sub(1);
        let mut nodes = Vec::with_capacity(spans.len());

        for (index, span) in spans.into_iter().enumerate() {
            let node = match self.build(span, false)? {
                Some(node) => node,
                None if lambda => Node::Local("_".to_string()).into_ref(),
                None => return Err(ParseError::EmptyParameter),
            };

            if lambda && index < last {
                self.names.declare(&alias_of(&node)?, NameTag::Local);
            }
            nodes.push(node);
        }

        Ok(nodes)
    }
}

/// Collapses a folded span into a single node.
fn collapse(mut elements: Vec<Element>) -> ParseResult<Option<NodeRef>> {
    if elements.is_empty() {
        return Ok(None);
    }

    collapse_unary(&mut elements)?;
    collapse_binary(&mut elements)?;

    if elements.len() > 1 {
        return Err(ParseError::TrailingExpression);
    }
    Ok(elements.pop().and_then(Element::into_node))
}

/// Collapses prefix operators, right to left.
///
/// An operator is in prefix position when it directly precedes a node and is
/// itself at the start of the span or preceded by another operator.
fn collapse_unary(elements: &mut Vec<Element>) -> ParseResult<()> {
    let mut i = elements.len().saturating_sub(1);

    while i >= 1 {
        let prefix = !elements[i].is_operator()
                     && elements[i - 1].is_operator()
                     && (i == 1 || elements[i - 2].is_operator());

        if prefix {
            let Element::Operator(symbol) = elements[i - 1].clone() else {
                unreachable!()
            };
            if !is_unary(&symbol) {
                return Err(ParseError::NotUnary { op: symbol });
            }
            let Some(operand) = elements.remove(i).into_node() else {
                unreachable!()
            };

            let node = match symbol.as_str() {
                "+" => operand,
                "-" => {
                    elements.splice(i - 1..i,
                                    [constant(-1.0),
                                     Element::Operator(COEFFICIENT.to_string()),
                                     Element::Node(operand)]);
                    i -= 1;
                    continue;
                },
                "$" => Node::Pointer(operand).into_ref(),
                "#" => Node::LocalPointer(operand).into_ref(),
                "!" => Node::Unary { op: UnaryOp::Not,
                                     operand }.into_ref(),
                "~" => Node::Unary { op: UnaryOp::Complement,
                                     operand }.into_ref(),
                _ => unreachable!(),
            };
            elements[i - 1] = Element::Node(node);
        }

        i -= 1;
    }

    Ok(())
}

/// Collapses binary operators one tier at a time, tightest first.
///
/// Right-associative tiers are swept from the right so that `a = b = c`
/// assigns `c` to `b` first.
fn collapse_binary(elements: &mut Vec<Element>) -> ParseResult<()> {
    loop {
        let mut tightest: Option<u8> = None;
        for element in elements.iter() {
            if let Element::Operator(symbol) = element {
                let tier = lookup(symbol).map(|op| op.tier)
                                         .ok_or_else(|| ParseError::UnknownOperator { op: symbol.clone() })?;
                tightest = Some(tightest.map_or(tier, |t| t.min(tier)));
            }
        }
        let Some(tier) = tightest else {
            return Ok(());
        };

        match associativity_of(tier) {
            Associativity::Left => {
                let mut i = 0;
                while i < elements.len() {
                    if tier_at(elements, i) == Some(tier) {
                        collapse_at(elements, i)?;
                    } else {
                        i += 1;
                    }
                }
            },
            Associativity::Right => {
                let mut i = elements.len();
                while i > 0 {
                    i -= 1;
                    if tier_at(elements, i) == Some(tier) {
                        collapse_at(elements, i)?;
                        i -= 1;
                    }
                }
            },
        }
    }
}

fn tier_at(elements: &[Element], i: usize) -> Option<u8> {
    match &elements[i] {
        Element::Operator(symbol) => lookup(symbol).map(|op| op.tier),
        Element::Node(_) => None,
    }
}

/// Replaces the operator at `i` and its two operands with the node it builds.
fn collapse_at(elements: &mut Vec<Element>, i: usize) -> ParseResult<()> {
    let Element::Operator(symbol) = &elements[i] else {
        unreachable!()
    };
    let symbol = symbol.clone();
    let Some(info) = lookup(&symbol) else {
        return Err(ParseError::UnknownOperator { op: symbol });
    };

    if i == 0 || elements[i - 1].is_operator() {
        return Err(ParseError::MissingLeftOperand { op: symbol });
    }
    if i + 1 >= elements.len() || elements[i + 1].is_operator() {
        return Err(ParseError::MissingRightOperand { op: symbol });
    }

    let mut operands = elements.drain(i - 1..=i + 1).filter_map(Element::into_node);
    let (Some(left), Some(right)) = (operands.next(), operands.next()) else {
        unreachable!()
    };
    drop(operands);

    elements.insert(i - 1, Element::Node(build(left, info, right).into_ref()));
    Ok(())
}

fn constant(value: f64) -> Element {
    Element::Node(Node::Constant(value).into_ref())
}

fn alias_of(node: &NodeRef) -> ParseResult<String> {
    node.alias_name()
        .map(str::to_string)
        .ok_or_else(|| ParseError::InvalidAlias { found: node.describe() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    struct Builtins;

    impl NameEnvironment for Builtins {
        fn is_function(&self, name: &str) -> bool {
            matches!(name, "sqrt" | "if")
        }

        fn is_macro(&self, _name: &str) -> bool {
            false
        }
    }

    fn tree(source: &str) -> ParseResult<String> {
        let tokens = tokenize(source).unwrap();
        let tree = build_tree(&tokens, &Builtins, true)?;
        Ok(tree.root.map(|root| root.to_string()).unwrap_or_default())
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(tree("1 + 2 * 3").unwrap(), "(1 + (2 * 3))");
        assert_eq!(tree("8 - 2 - 1").unwrap(), "((8 - 2) - 1)");
        assert_eq!(tree("2 ** 3 ** 2").unwrap(), "(2 ** (3 ** 2))");
        assert_eq!(tree("a = b = 1").unwrap(), "($a = ($b = 1))");
    }

    #[test]
    fn coefficients_bind_tighter_than_products() {
        assert_eq!(tree("2x").unwrap(), "(2 * $x)");
        assert_eq!(tree("6 / 2(3)").unwrap(), "(6 / (2 * 3))");
    }

    #[test]
    fn negation_becomes_a_coefficient() {
        assert_eq!(tree("-3 ** 2").unwrap(), "(-1 * (3 ** 2))");
        assert_eq!(tree("2 * -x").unwrap(), "(2 * (-1 * $x))");
    }

    #[test]
    fn prefix_pointers_and_logic() {
        assert_eq!(tree("$0").unwrap(), "$(0)");
        assert_eq!(tree("#(1 + 1)").unwrap(), "#((1 + 1))");
        assert_eq!(tree("!~x").unwrap(), "!~$x");
    }

    #[test]
    fn implied_answer_for_long_operators() {
        let tokens = tokenize("** 2").unwrap();
        let parsed = build_tree(&tokens, &Builtins, true).unwrap();
        assert!(parsed.implied_answer);
        assert_eq!(parsed.root.unwrap().to_string(), "($ANS ** 2)");

        let parsed = build_tree(&tokens, &Builtins, false);
        assert!(matches!(parsed, Err(ParseError::NotUnary { .. })));
    }

    #[test]
    fn names_inside_calls_can_be_locals() {
        assert_eq!(tree("if(1, y = 2, y)").unwrap(), "if(1, (#y = 2), #y)");
        assert_eq!(tree("y = 2").unwrap(), "($y = 2)");
    }

    #[test]
    fn macro_definitions_capture_their_body() {
        assert_eq!(tree("@f(n) = n * 2; @f(3)").unwrap(), "((@f($n) = (#n * 2)) ; @f(3))");
        assert_eq!(tree("fact(n) = n; fact(2)").unwrap(), "((@fact($n) = #n) ; @fact(2))");
    }

    #[test]
    fn lambdas_take_aliases_then_a_body() {
        assert_eq!(tree("@(a, b, a + b)").unwrap(), "@(a, b, (#a + #b))");
        assert_eq!(tree("@(, 1)").unwrap(), "@(_, 1)");
        assert!(matches!(tree("@(1, 2)"), Err(ParseError::InvalidAlias { .. })));
    }

    #[test]
    fn structural_errors() {
        assert_eq!(tree("()"), Err(ParseError::EmptyBrackets { open: '(', close: ')' }));
        assert_eq!(tree("1 +"), Err(ParseError::MissingRightOperand { op: "+".into() }));
        assert_eq!(tree("1 2"), Err(ParseError::TrailingExpression));
        assert_eq!(tree("sqrt(1,,2)"), Err(ParseError::EmptyParameter));
        assert_eq!(tree("1)"), Err(ParseError::UnexpectedToken { token: ")".into() }));
        assert_eq!(tree("@"), Err(ParseError::BareLambdaSigil));
        assert!(matches!(tree("0xff sqrt(4)"), Err(ParseError::LiteralCoefficient { .. })));
    }

    #[test]
    fn trailing_sequence_is_dropped() {
        assert_eq!(tree("1 + 1;").unwrap(), "(1 + 1)");
        assert_eq!(tree("").unwrap(), "");
    }
}
