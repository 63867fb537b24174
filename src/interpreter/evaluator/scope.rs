use std::collections::HashMap;

use crate::{
    Engine,
    ast::NodeRef,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Index of a frame in the engine's frame stack.
pub type FrameId = usize;

/// What a local name is bound to.
///
/// A value binding is a snapshot. A reference binding keeps a node together
/// with the frame it must be evaluated in, so reading the local re-evaluates
/// the node there; this is what lets a parameter alias the caller's variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A fixed number.
    Value(f64),
    /// A node evaluated in the given frame on every read.
    Reference {
        /// The bound node.
        node:  NodeRef,
        /// The frame the node is evaluated in.
        frame: FrameId,
    },
}

/// One evaluation frame: the locals of a macro or lambda call, or of a
/// top-level solve.
#[derive(Debug)]
pub(crate) struct Frame {
    locals:   HashMap<String, Binding>,
    parent:   Option<FrameId>,
    name:     String,
    captures: bool,
}

impl Frame {
    pub(crate) fn root() -> Self {
        Self { locals:   HashMap::new(),
               parent:   None,
               name:     "Main".to_string(),
               captures: false, }
    }
}

/// Pops every frame pushed after it was created.
///
/// Frames are strictly nested, so truncating on drop releases a call's frame
/// (and anything a failed evaluation left behind) on both the success and the
/// error path.
pub(crate) struct FrameGuard<'e> {
    engine: &'e Engine,
    base:   FrameId,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.engine.frames.borrow_mut().truncate(self.base);
    }
}

/// A handle on one frame of an engine.
///
/// Scopes are cheap to copy and hold no borrow of the engine's tables, so
/// builtins may evaluate nodes, call back into [`Engine::solve`] and create
/// further frames while holding one.
#[derive(Clone, Copy)]
pub struct Scope<'e> {
    engine: &'e Engine,
    frame:  FrameId,
}

impl<'e> Scope<'e> {
    pub(crate) const fn new(engine: &'e Engine, frame: FrameId) -> Self {
        Self { engine, frame }
    }

    /// Pushes a fresh `Main` frame for one top-level evaluation.
    pub(crate) fn root(engine: &'e Engine) -> (Self, FrameGuard<'e>) {
        let mut frames = engine.frames.borrow_mut();
        let id = frames.len();
        frames.push(Frame::root());

        (Self::new(engine, id),
         FrameGuard { engine,
                      base: id })
    }

    /// The engine this scope belongs to.
    #[must_use]
    pub const fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// The frame this scope reads and writes locals in.
    #[must_use]
    pub const fn frame(&self) -> FrameId {
        self.frame
    }

    /// Returns a scope on another frame of the same engine.
    #[must_use]
    pub(crate) const fn at(&self, frame: FrameId) -> Self {
        Self::new(self.engine, frame)
    }

    /// The diagnostic name of the frame: `Main`, `Lambda` or a macro name.
    #[must_use]
    pub fn name(&self) -> String {
        self.engine
            .frames
            .borrow()
            .get(self.frame)
            .map_or_else(String::new, |frame| frame.name.clone())
    }

    /// Pushes a new frame and returns a scope on it together with the guard
    /// that pops it.
    ///
    /// `captures` lets name lookups that miss in the new frame continue in
    /// `parent`, which is how lambdas see the locals of the frame they were
    /// written in.
    pub(crate) fn enter(&self,
                        name: &str,
                        parent: Option<FrameId>,
                        captures: bool)
                        -> (Self, FrameGuard<'e>) {
        let mut frames = self.engine.frames.borrow_mut();
        let id = frames.len();
        frames.push(Frame { locals: HashMap::new(),
                            parent,
                            name: name.to_string(),
                            captures });

        (self.at(id),
         FrameGuard { engine: self.engine,
                      base:   id, })
    }

    /// Finds the binding of a local name.
    ///
    /// The current frame is searched first; capturing frames continue with
    /// their parent chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        let key = name.to_lowercase();
        let frames = self.engine.frames.borrow();
        let mut id = self.frame;

        loop {
            let frame = frames.get(id)?;
            if let Some(binding) = frame.locals.get(&key) {
                return Some(binding.clone());
            }
            if !frame.captures {
                return None;
            }
            id = frame.parent?;
        }
    }

    /// Like [`Scope::lookup`], but a missing name is an error.
    ///
    /// # Errors
    /// [`RuntimeError::UnknownLocal`] when no frame in reach binds the name.
    pub fn require(&self, name: &str) -> EvalResult<Binding> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UnknownLocal { name:  name.to_string(),
                                                        frame: self.name(), })
    }

    /// Binds a name in the current frame, replacing any previous binding.
    pub(crate) fn bind(&self, name: &str, binding: Binding) {
        if let Some(frame) = self.engine.frames.borrow_mut().get_mut(self.frame) {
            frame.locals.insert(name.to_lowercase(), binding);
        }
    }

    /// Evaluates a binding to its number.
    ///
    /// # Errors
    /// Whatever evaluating a referenced node raises.
    pub fn resolve(&self, binding: &Binding) -> EvalResult<f64> {
        match binding {
            Binding::Value(value) => Ok(*value),
            Binding::Reference { node, frame } => node.solve(self.at(*frame)),
        }
    }

    /// Prepares a binding for storage in this scope's frame.
    ///
    /// A reference into a frame newer than this one would outlive that frame,
    /// so it is evaluated and stored as a value instead.
    ///
    /// # Errors
    /// Whatever evaluating the referenced node raises.
    pub(crate) fn settle(&self, binding: Binding) -> EvalResult<Binding> {
        match binding {
            Binding::Reference { ref node, frame } if frame > self.frame => {
                Ok(Binding::Value(node.solve(self.at(frame))?))
            },
            other => Ok(other),
        }
    }
}
