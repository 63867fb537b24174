use std::fmt;

use crate::ast::{Node, NodeRef};

/// The placeholder symbol for implicit multiplication, as in `3x` or `(a)(b)`.
pub const COEFFICIENT: &str = "coeff";

/// The tier shared by `=` and every compound assignment.
///
/// The tree builder and the name classifier both pivot on it: an identifier
/// followed (at bracket depth zero) by an operator of this tier is an
/// assignment target, and a macro body extends up to the first operator of a
/// higher tier.
pub const ASSIGNMENT_TIER: u8 = 13;

/// Symbols that may appear in prefix position.
pub const UNARY_SYMBOLS: &[&str] = &["+", "-", "$", "!", "~", "#"];

/// How operators of equal tier group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ** b ** c` is `a ** (b ** c)`.
    Right,
}

/// Binary operators that build a [`Node::Binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `**`
    Power,
    /// `*` and the implicit coefficient.
    Multiply,
    /// `/`
    Divide,
    /// `%`, truncated remainder.
    Remainder,
    /// `//`, floor division.
    FloorDivide,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `&&`
    And,
    /// `^^`
    Xor,
    /// `||`
    Or,
    /// `;`
    Sequence,
}

/// Unary operators that build a [`Node::Unary`].
///
/// The remaining prefix symbols rewrite the tree instead: `-` becomes a
/// multiplication by `-1`, `$` and `#` wrap their operand in a pointer node
/// and `+` disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!x` is `1` when `x` is zero and `0` otherwise.
    Not,
    /// `~x` is the bitwise complement of `x` truncated to an integer.
    Complement,
}

/// What collapsing an operator placeholder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// An ordinary binary node.
    Binary(BinaryOp),
    /// An assignment; compound forms carry the operator they apply first.
    Assign(Option<BinaryOp>),
}

/// Static metadata for one operator symbol.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    /// The symbol as it appears in source.
    pub symbol: &'static str,
    /// Precedence tier; lower binds tighter.
    pub tier:   u8,
    /// What the operator builds.
    pub kind:   OperatorKind,
}

macro_rules! operator_table {
    ($($symbol:literal => $tier:literal, $kind:expr;)*) => {
        static OPERATORS: &[OperatorInfo] = &[
            $(OperatorInfo { symbol: $symbol, tier: $tier, kind: $kind },)*
        ];
    };
}

operator_table! {
    "**"    => 0,  OperatorKind::Binary(BinaryOp::Power);
    "coeff" => 1,  OperatorKind::Binary(BinaryOp::Multiply);
    "*"     => 2,  OperatorKind::Binary(BinaryOp::Multiply);
    "/"     => 2,  OperatorKind::Binary(BinaryOp::Divide);
    "%"     => 2,  OperatorKind::Binary(BinaryOp::Remainder);
    "//"    => 2,  OperatorKind::Binary(BinaryOp::FloorDivide);
    "+"     => 3,  OperatorKind::Binary(BinaryOp::Add);
    "-"     => 3,  OperatorKind::Binary(BinaryOp::Subtract);
    "<<"    => 4,  OperatorKind::Binary(BinaryOp::ShiftLeft);
    ">>"    => 4,  OperatorKind::Binary(BinaryOp::ShiftRight);
    "<"     => 5,  OperatorKind::Binary(BinaryOp::Less);
    "<="    => 5,  OperatorKind::Binary(BinaryOp::LessEqual);
    ">"     => 5,  OperatorKind::Binary(BinaryOp::Greater);
    ">="    => 5,  OperatorKind::Binary(BinaryOp::GreaterEqual);
    "=="    => 6,  OperatorKind::Binary(BinaryOp::Equal);
    "!="    => 6,  OperatorKind::Binary(BinaryOp::NotEqual);
    "&"     => 7,  OperatorKind::Binary(BinaryOp::BitAnd);
    "^"     => 8,  OperatorKind::Binary(BinaryOp::BitXor);
    "|"     => 9,  OperatorKind::Binary(BinaryOp::BitOr);
    "&&"    => 10, OperatorKind::Binary(BinaryOp::And);
    "^^"    => 11, OperatorKind::Binary(BinaryOp::Xor);
    "||"    => 12, OperatorKind::Binary(BinaryOp::Or);
    "="     => 13, OperatorKind::Assign(None);
    "+="    => 13, OperatorKind::Assign(Some(BinaryOp::Add));
    "-="    => 13, OperatorKind::Assign(Some(BinaryOp::Subtract));
    "*="    => 13, OperatorKind::Assign(Some(BinaryOp::Multiply));
    "/="    => 13, OperatorKind::Assign(Some(BinaryOp::Divide));
    "%="    => 13, OperatorKind::Assign(Some(BinaryOp::Remainder));
    "//="   => 13, OperatorKind::Assign(Some(BinaryOp::FloorDivide));
    "**="   => 13, OperatorKind::Assign(Some(BinaryOp::Power));
    "&="    => 13, OperatorKind::Assign(Some(BinaryOp::BitAnd));
    "|="    => 13, OperatorKind::Assign(Some(BinaryOp::BitOr));
    "^="    => 13, OperatorKind::Assign(Some(BinaryOp::BitXor));
    "<<="   => 13, OperatorKind::Assign(Some(BinaryOp::ShiftLeft));
    ">>="   => 13, OperatorKind::Assign(Some(BinaryOp::ShiftRight));
    ";"     => 14, OperatorKind::Binary(BinaryOp::Sequence);
}

/// Looks up the metadata of a binary operator symbol.
///
/// # Example
/// ```
/// use wingcalc::interpreter::operators::{ASSIGNMENT_TIER, lookup};
///
/// assert_eq!(lookup("+=").map(|op| op.tier), Some(ASSIGNMENT_TIER));
/// assert!(lookup("!").is_none());
/// ```
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static OperatorInfo> {
    OPERATORS.iter().find(|op| op.symbol == symbol)
}

/// Returns `true` when the symbol can join two operands.
#[must_use]
pub fn is_binary(symbol: &str) -> bool {
    lookup(symbol).is_some()
}

/// Returns the tier of a binary operator symbol.
#[must_use]
pub fn precedence_of(symbol: &str) -> Option<u8> {
    lookup(symbol).map(|op| op.tier)
}

/// Returns how operators of the given tier group.
///
/// Powers and assignments group to the right; every other tier groups to the
/// left.
#[must_use]
pub const fn associativity_of(tier: u8) -> Associativity {
    match tier {
        0 | ASSIGNMENT_TIER => Associativity::Right,
        _ => Associativity::Left,
    }
}

/// Returns `true` when the symbol may start a unary run.
#[must_use]
pub fn is_unary(symbol: &str) -> bool {
    UNARY_SYMBOLS.contains(&symbol)
}

/// Builds the node an operator produces from its two operands.
///
/// Compound assignments desugar here: `a += b` becomes `a = a + b`, with the
/// target subtree shared between both positions.
#[must_use]
pub fn build(left: NodeRef, info: &OperatorInfo, right: NodeRef) -> Node {
    match info.kind {
        OperatorKind::Binary(op) => Node::Binary { op, left, right },
        OperatorKind::Assign(None) => Node::Assignment { target: left,
                                                         value:  right, },
        OperatorKind::Assign(Some(op)) => {
            let value = Node::Binary { op,
                                       left: left.clone(),
                                       right }.into_ref();
            Node::Assignment { target: left,
                               value }
        },
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Power => "**",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::FloorDivide => "//",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Xor => "^^",
            Self::Or => "||",
            Self::Sequence => ";",
        };
        write!(f, "{symbol}")
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not => write!(f, "!"),
            Self::Complement => write!(f, "~"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_conventional_binding_strength() {
        let tier = |s| precedence_of(s).unwrap();
        assert!(tier("**") < tier(COEFFICIENT));
        assert!(tier(COEFFICIENT) < tier("*"));
        assert!(tier("*") < tier("+"));
        assert!(tier("+") < tier("<<"));
        assert!(tier("<") < tier("=="));
        assert!(tier("&&") < tier("||"));
        assert!(tier("||") < tier("="));
        assert!(tier("=") < tier(";"));
    }

    #[test]
    fn right_associative_tiers() {
        assert_eq!(associativity_of(0), Associativity::Right);
        assert_eq!(associativity_of(ASSIGNMENT_TIER), Associativity::Right);
        assert_eq!(associativity_of(3), Associativity::Left);
    }

    #[test]
    fn compound_assignment_shares_its_target() {
        let target = Node::Variable("x".into()).into_ref();
        let info = lookup("*=").unwrap();
        let node = build(target.clone(), info, Node::Constant(2.0).into_ref());

        let Node::Assignment { target: t, value } = node else {
            panic!("expected an assignment");
        };
        assert!(std::rc::Rc::ptr_eq(&t, &target));
        assert!(matches!(value.as_ref(), Node::Binary { op: BinaryOp::Multiply, .. }));
    }

    #[test]
    fn every_unary_symbol_is_recognised() {
        for symbol in ["+", "-", "$", "!", "~", "#"] {
            assert!(is_unary(symbol));
        }
        assert!(!is_unary("*"));
    }

    #[test]
    fn only_table_symbols_are_binary() {
        assert!(is_binary("**="));
        assert!(is_binary(";"));
        assert!(!is_binary("$"));
        assert!(!is_binary("=>"));
    }
}
