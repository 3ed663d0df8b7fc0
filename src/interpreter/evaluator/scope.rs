use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::runtime_error::Frame,
    interpreter::value::core::Value,
    span::Position,
};

/// One lexical scope: a map of variable bindings with an optional link to
/// the enclosing scope.
///
/// Lookup walks the parent chain outward, so a name shadowed in an inner
/// table is invisible to lookups that start above it. Insertion always
/// writes into the table it is called on — never an enclosing one — which
/// is how reassignment inside a loop or function body stays local when a
/// parameter reuses an outer name.
///
/// Parent pointers always point toward the program root; tables are created
/// once per call frame and dropped with it (except where a closure keeps
/// its defining table alive).
#[derive(Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, Value>,
    parent:  Option<Rc<RefCell<SymbolTable>>>,
}

impl SymbolTable {
    /// Creates a table with no enclosing scope.
    #[must_use]
    pub fn root() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { symbols: HashMap::new(),
                                    parent:  None, }))
    }

    /// Creates a table enclosed by `parent`.
    ///
    /// For a function call, `parent` is the *defining* scope's table, which
    /// is what gives closures their capture semantics.
    #[must_use]
    pub fn child(parent: Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { symbols: HashMap::new(),
                                    parent:  Some(parent), }))
    }

    /// Retrieves the value bound to `name`, searching outward through the
    /// parent chain. Returns `None` when no enclosing scope binds the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.borrow().get(name))
    }

    /// Binds `name` in this table, replacing any local binding.
    ///
    /// Never searches upward: assigning a name that exists in an enclosing
    /// scope shadows it here instead of mutating it there.
    pub fn set(&mut self, name: &str, value: Value) {
        self.symbols.insert(name.to_string(), value);
    }

    /// Deletes a local binding only, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.remove(name)
    }
}

/// One activation record: the top-level program or one function call.
///
/// Contexts form a singly linked chain from the currently executing frame
/// back to the program root. The chain exists purely to render tracebacks;
/// variable lookup goes through [`SymbolTable`] parents instead, and the
/// two chains intentionally diverge for function calls (table parent =
/// definition site, context parent = call site).
#[derive(Debug)]
pub struct Context {
    /// Display name of the frame: `<program>` or the function's name.
    pub name:      String,
    /// The calling frame, absent for the program root.
    pub parent:    Option<Rc<Context>>,
    /// Where in the caller this frame was entered, absent for the root.
    pub entry_pos: Option<Position>,
    /// The scope this frame's code resolves and binds variables in.
    pub table:     Rc<RefCell<SymbolTable>>,
}

impl Context {
    /// Creates the root frame of a program run.
    #[must_use]
    pub fn program(table: Rc<RefCell<SymbolTable>>) -> Rc<Self> {
        Rc::new(Self { name: "<program>".to_string(),
                       parent: None,
                       entry_pos: None,
                       table })
    }

    /// Creates the frame for one function call.
    ///
    /// `parent` is the *calling* context and `entry_pos` the call site;
    /// `table` is the fresh scope already parented to the callee's defining
    /// scope.
    #[must_use]
    pub fn frame(name: &str,
                 parent: &Rc<Self>,
                 entry_pos: Position,
                 table: Rc<RefCell<SymbolTable>>)
                 -> Rc<Self> {
        Rc::new(Self { name: name.to_string(),
                       parent: Some(Rc::clone(parent)),
                       entry_pos: Some(entry_pos),
                       table })
    }

    /// Materializes the traceback frames for an error raised at
    /// `error_pos` while this frame was executing.
    ///
    /// The innermost frame reports the error position itself; each
    /// enclosing frame reports the position its callee was entered from.
    /// Frames are returned innermost first.
    #[must_use]
    pub fn traceback(&self, error_pos: Position) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut pos = error_pos;
        let mut current = Some(self);

        while let Some(context) = current {
            frames.push(Frame { name: context.name.clone(),
                                pos });
            if let Some(entry) = context.entry_pos {
                pos = entry;
            }
            current = context.parent.as_deref();
        }

        frames
    }
}
