use crate::{
    ast::NodeRef,
    interpreter::evaluator::{
        array,
        core::EvalResult,
        function::memory::print_array,
        scope::Scope,
        utils::{list_values, pointer_arg, text_arg},
    },
    util::{num::from_count, text::to_cells},
};

/// `write(text)` and `writeline(text)`: writes a quote, or the character
/// array at a pointer, and returns the number of characters written.
///
/// # Example
/// ```
/// use wingcalc::{Engine, interpreter::io::BufferIo};
///
/// let io = BufferIo::new();
/// let engine = Engine::new().with_io(Box::new(io.clone()));
///
/// assert_eq!(engine.solve("write(\"ab\"); writeline(\"cd\")").unwrap(), 2.0);
/// assert_eq!(io.output(), "abcd\n");
/// ```
pub fn write(name: &str, args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let text = text_arg(name, args, 0, scope)?;

    let io = scope.engine().io();
    if name == "writeline" {
        io.write_line(&text);
    } else {
        io.write(&text);
    }

    Ok(from_count(text.chars().count()))
}

/// `print(p)` or `print(a, b, ...)`: writes the list as `{ a, b }` and
/// returns its length.
///
/// # Example
/// ```
/// use wingcalc::{Engine, interpreter::io::BufferIo};
///
/// let io = BufferIo::new();
/// let engine = Engine::new().with_io(Box::new(io.clone()));
///
/// assert_eq!(engine.solve("print(1, 2.5, 3)").unwrap(), 3.0);
/// assert_eq!(io.output(), "{ 1, 2.5, 3 }\n");
/// ```
pub fn print(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let values = list_values(args, scope)?;
    Ok(print_array(&values, scope))
}

/// `read(p)`: reads one line of input into a character array at the pointer
/// and returns its length, or `-1` when the input is exhausted.
pub fn read(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("read", args, 0)?;

    let Some(line) = scope.engine().io().read_line() else {
        return Ok(-1.0);
    };

    let cells = to_cells(&line);
    array::allocate(pointer, &cells, scope)?;
    Ok(from_count(cells.len()))
}

/// `clearout()`.
pub fn clear_out(_args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    scope.engine().io().clear();
    Ok(1.0)
}

/// `flush()`.
pub fn flush(_args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    scope.engine().io().flush();
    Ok(1.0)
}
