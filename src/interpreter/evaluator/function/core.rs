use std::{collections::HashMap, fmt};

use crate::{
    Engine,
    ast::NodeRef,
    error::RuntimeError,
    interpreter::evaluator::{
        core::EvalResult,
        function::{builtin, control, memory, min_max, print, program},
        scope::Scope,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its argument nodes unevaluated together with the scope
/// of the call, and decides itself which arguments to evaluate, in which
/// order and how often.
pub type BuiltinFn = fn(&[NodeRef], Scope<'_>) -> EvalResult<f64>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin takes `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any of these counts.
    OneOf(&'static [usize]),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use wingcalc::interpreter::evaluator::function::core::Arity;
    ///
    /// assert!(Arity::OneOf(&[1, 2]).check(2));
    /// assert!(!Arity::Exact(3).check(2));
    /// assert!(Arity::AtLeast(1).check(5));
    /// ```
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };

        match self {
            Self::Exact(n) => write!(f, "{n} {}", plural(*n)),
            Self::AtLeast(n) => write!(f, "at least {n} {}", plural(*n)),
            Self::OneOf(counts) => {
                let last = counts.last().copied().unwrap_or(0);
                let counts: Vec<String> = counts.iter().map(ToString::to_string).collect();
                write!(f, "{} {}", counts.join(" or "), plural(last))
            },
        }
    }
}

/// A registered builtin: its arity and handler.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The argument counts the registry accepts before dispatch.
    pub arity: Arity,
    /// The handler.
    pub func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table the engine's registry is seeded from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin the engine registers by default.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    // control flow
    "if"        => { arity: Arity::OneOf(&[2, 3]), func: control::if_fn },
    "else"      => { arity: Arity::Exact(2), func: control::else_fn },
    "switch"    => { arity: Arity::AtLeast(1), func: control::switch },
    "for"       => { arity: Arity::Exact(4), func: control::for_fn },
    "while"     => { arity: Arity::Exact(2), func: control::while_fn },
    "dowhile"   => { arity: Arity::Exact(2), func: control::do_while },
    "repeat"    => { arity: Arity::Exact(2), func: control::repeat },
    "msum"      => { arity: Arity::Exact(3), func: |args, scope| control::accumulate("msum", args, scope) },
    "mproduct"  => { arity: Arity::Exact(3), func: |args, scope| control::accumulate("mproduct", args, scope) },

    // memory
    "alloc"     => { arity: Arity::AtLeast(1), func: memory::alloc },
    "calloc"    => { arity: Arity::Exact(2), func: memory::calloc },
    "malloc"    => { arity: Arity::Exact(2), func: memory::malloc },
    "range"     => { arity: Arity::OneOf(&[2, 3]), func: memory::range },
    "len"       => { arity: Arity::Exact(1), func: memory::len },
    "get"       => { arity: Arity::Exact(2), func: memory::get },
    "set"       => { arity: Arity::Exact(3), func: memory::set },
    "add"       => { arity: Arity::Exact(2), func: memory::add },
    "insert"    => { arity: Arity::Exact(3), func: memory::insert },
    "remove"    => { arity: Arity::Exact(2), func: memory::remove },
    "indexof"   => { arity: Arity::Exact(2), func: memory::index_of },
    "contains"  => { arity: Arity::Exact(2), func: memory::contains },
    "clear"     => { arity: Arity::Exact(1), func: memory::clear },
    "concat"    => { arity: Arity::OneOf(&[2, 3]), func: memory::concat },
    "copy"      => { arity: Arity::Exact(2), func: memory::copy },
    "setify"    => { arity: Arity::Exact(1), func: memory::setify },
    "sort"      => { arity: Arity::Exact(1), func: memory::sort },
    "iter"      => { arity: Arity::Exact(2), func: memory::iter },
    "mut"       => { arity: Arity::Exact(2), func: memory::mutate },
    "filter"    => { arity: Arity::Exact(2), func: memory::filter },
    "any"       => { arity: Arity::Exact(2), func: memory::any },
    "count"     => { arity: Arity::Exact(2), func: memory::count },
    "memprint"  => { arity: Arity::Exact(1), func: memory::memprint },

    // programming
    "eval"      => { arity: Arity::Exact(1), func: program::eval },
    "call"      => { arity: Arity::AtLeast(1), func: program::call },
    "val"       => { arity: Arity::Exact(2), func: program::val },
    "ignore"    => { arity: Arity::AtLeast(0), func: |_, _| Ok(0.0) },
    "deepset"   => { arity: Arity::Exact(2), func: program::deep_set },
    "deepval"   => { arity: Arity::Exact(2), func: program::deep_val },
    "enum"      => { arity: Arity::AtLeast(1), func: program::enumerate },
    "exec"      => { arity: Arity::Exact(1), func: program::exec },
    "catch"     => { arity: Arity::Exact(2), func: |args, scope| program::catch("catch", args, scope) },
    "catchlang" => { arity: Arity::Exact(2), func: |args, scope| program::catch("catchlang", args, scope) },
    "catchhost" => { arity: Arity::Exact(2), func: |args, scope| program::catch("catchhost", args, scope) },
    "throw"     => { arity: Arity::Exact(1), func: program::throw },

    // input and output
    "write"     => { arity: Arity::Exact(1), func: |args, scope| print::write("write", args, scope) },
    "writeline" => { arity: Arity::Exact(1), func: |args, scope| print::write("writeline", args, scope) },
    "print"     => { arity: Arity::AtLeast(1), func: print::print },
    "read"      => { arity: Arity::Exact(1), func: print::read },
    "clearout"  => { arity: Arity::Exact(0), func: print::clear_out },
    "flush"     => { arity: Arity::Exact(0), func: print::flush },

    // math
    "pow"       => { arity: Arity::Exact(2), func: builtin::pow },
    "exp"       => { arity: Arity::Exact(1), func: builtin::exp },
    "sqrt"      => { arity: Arity::Exact(1), func: builtin::sqrt },
    "cbrt"      => { arity: Arity::Exact(1), func: builtin::cbrt },
    "log"       => { arity: Arity::OneOf(&[1, 2]), func: builtin::log },
    "ln"        => { arity: Arity::Exact(1), func: builtin::ln },
    "ceil"      => { arity: Arity::Exact(1), func: builtin::ceil },
    "floor"     => { arity: Arity::Exact(1), func: builtin::floor },
    "round"     => { arity: Arity::OneOf(&[1, 2]), func: builtin::round },
    "trunc"     => { arity: Arity::Exact(1), func: builtin::trunc },
    "sin"       => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"       => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"       => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"      => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"      => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"      => { arity: Arity::OneOf(&[1, 2]), func: builtin::atan },
    "sinh"      => { arity: Arity::Exact(1), func: builtin::sinh },
    "cosh"      => { arity: Arity::Exact(1), func: builtin::cosh },
    "tanh"      => { arity: Arity::Exact(1), func: builtin::tanh },
    "rad"       => { arity: Arity::Exact(1), func: builtin::rad },
    "deg"       => { arity: Arity::Exact(1), func: builtin::deg },
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "sign"      => { arity: Arity::Exact(1), func: builtin::sign },
    "clamp"     => { arity: Arity::Exact(3), func: builtin::clamp },
    "nan"       => { arity: Arity::Exact(1), func: builtin::nan },
    "equals"    => { arity: Arity::OneOf(&[2, 3]), func: builtin::equals },
    "factorial" => { arity: Arity::Exact(1), func: builtin::factorial },
    "perm"      => { arity: Arity::Exact(2), func: builtin::perm },
    "comb"      => { arity: Arity::Exact(2), func: builtin::comb },

    // list reducers
    "max"       => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("max", args, scope) },
    "min"       => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("min", args, scope) },
    "sum"       => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("sum", args, scope) },
    "product"   => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("product", args, scope) },
    "mean"      => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("mean", args, scope) },
    "median"    => { arity: Arity::AtLeast(1), func: |args, scope| min_max::reduce("median", args, scope) },
}

/// Builds the default registry, keyed by lowercase name.
pub(crate) fn default_registry() -> HashMap<String, Builtin> {
    BUILTIN_TABLE.iter()
                 .map(|def| {
                     (def.name.to_string(),
                      Builtin { arity: def.arity,
                                func:  def.func, })
                 })
                 .collect()
}

impl Engine {
    /// Evaluates a function call.
    ///
    /// The name is looked up case-insensitively in the registry. The
    /// argument count is checked against the builtin's arity before the
    /// handler runs.
    ///
    /// # Errors
    /// - Unknown function name.
    /// - Wrong number of arguments.
    /// - Anything the handler raises.
    pub(crate) fn call_builtin(&self,
                               name: &str,
                               args: &[NodeRef],
                               scope: Scope<'_>)
                               -> EvalResult<f64> {
        let builtin = self.builtin(name)
                          .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;

        if !builtin.arity.check(args.len()) {
            return Err(RuntimeError::evaluation(name,
                                                format!("expects {} but received {}",
                                                        builtin.arity,
                                                        args.len())));
        }

        tracing::trace!(function = name, argc = args.len(), "dispatching builtin");
        (builtin.func)(args, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for name in BUILTIN_FUNCTIONS {
            assert_eq!(*name, name.to_lowercase());
            assert!(seen.insert(*name), "{name} registered twice");
        }
    }

    #[test]
    fn arity_messages_read_naturally() {
        assert_eq!(Arity::Exact(1).to_string(), "1 argument");
        assert_eq!(Arity::Exact(0).to_string(), "0 arguments");
        assert_eq!(Arity::OneOf(&[2, 3]).to_string(), "2 or 3 arguments");
        assert_eq!(Arity::AtLeast(1).to_string(), "at least 1 argument");
    }
}
