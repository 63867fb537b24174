/// Configuration for an [`Engine`](crate::Engine).
///
/// # Example
/// ```
/// use wingcalc::{Engine, EngineOptions};
///
/// let engine = Engine::with_options(EngineOptions { record_answer: false,
///                                                   ..EngineOptions::default() });
/// engine.solve("6 * 7").unwrap();
/// assert_eq!(engine.get_variable("ANS"), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Pre-populate the global table with the named constants (`PI`, `E`,
    /// integer limits, ...). `ANS` is always seeded.
    pub seed_constants: bool,
    /// Store each successful result in `ANS`.
    pub record_answer:  bool,
    /// Let an input that starts with a binary operator continue from the last
    /// answer, so that `** 2` means `ANS ** 2`.
    pub imply_answer:   bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { seed_constants: true,
               record_answer:  true,
               imply_answer:   true, }
    }
}
