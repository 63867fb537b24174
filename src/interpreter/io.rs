use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{BufRead, Write},
    rc::Rc,
};

/// The text channels builtins talk to.
///
/// The tokenizer, the tree builder and the evaluator never touch these; only
/// the I/O builtins (`write`, `writeline`, `print`, `read`, `clearout`,
/// `flush`, `memprint`) do. Hosts inject their own implementation through
/// [`Engine::with_io`](crate::Engine::with_io).
pub trait Io {
    /// Writes a line of output.
    fn write_line(&self, text: &str);
    /// Writes a line to the error channel.
    fn write_error(&self, text: &str);
    /// Writes text without a line break.
    fn write(&self, text: &str);
    /// Reads one line of input, without its line break. `None` at end of
    /// input.
    fn read_line(&self) -> Option<String>;
    /// Clears the output.
    fn clear(&self);
    /// Flushes buffered output.
    fn flush(&self);
}

/// Binds the channels to the process's standard streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleIo;

impl Io for ConsoleIo {
    fn write_line(&self, text: &str) {
        println!("{text}");
    }

    fn write_error(&self, text: &str) {
        eprintln!("{text}");
    }

    fn write(&self, text: &str) {
        print!("{text}");
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn clear(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

#[derive(Debug, Default)]
struct Buffers {
    output: String,
    errors: String,
    input:  VecDeque<String>,
}

/// An in-memory implementation of [`Io`].
///
/// Clones share the same buffers, so a host can keep one handle and give the
/// other to the engine.
///
/// # Example
/// ```
/// use wingcalc::{Engine, interpreter::io::BufferIo};
///
/// let io = BufferIo::with_input(["abc"]);
/// let engine = Engine::new().with_io(Box::new(io.clone()));
///
/// engine.solve("writeline(\"hello\")").unwrap();
/// assert_eq!(engine.solve("read($(10))").unwrap(), 3.0);
/// assert_eq!(io.output(), "hello\n");
/// assert_eq!(engine.get_string(10.0), "abc");
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferIo {
    buffers: Rc<RefCell<Buffers>>,
}

impl BufferIo {
    /// Creates an empty buffer with no pending input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer whose input channel yields the given lines in order.
    #[must_use]
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let io = Self::default();
        io.buffers
          .borrow_mut()
          .input
          .extend(lines.into_iter().map(Into::into));
        io
    }

    /// Everything written to the output channel so far.
    #[must_use]
    pub fn output(&self) -> String {
        self.buffers.borrow().output.clone()
    }

    /// Everything written to the error channel so far.
    #[must_use]
    pub fn errors(&self) -> String {
        self.buffers.borrow().errors.clone()
    }

    /// Queues another line of input.
    pub fn push_input(&self, line: impl Into<String>) {
        self.buffers.borrow_mut().input.push_back(line.into());
    }
}

impl Io for BufferIo {
    fn write_line(&self, text: &str) {
        let mut buffers = self.buffers.borrow_mut();
        buffers.output.push_str(text);
        buffers.output.push('\n');
    }

    fn write_error(&self, text: &str) {
        let mut buffers = self.buffers.borrow_mut();
        buffers.errors.push_str(text);
        buffers.errors.push('\n');
    }

    fn write(&self, text: &str) {
        self.buffers.borrow_mut().output.push_str(text);
    }

    fn read_line(&self) -> Option<String> {
        self.buffers.borrow_mut().input.pop_front()
    }

    fn clear(&self) {
        self.buffers.borrow_mut().output.clear();
    }

    fn flush(&self) {}
}
