use std::rc::Rc;

use crate::{
    ast::Node,
    error::runtime_error::{OpError, RuntimeErrorKind},
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::{print, prompt},
            scope::{Context, SymbolTable},
        },
        host::HostIo,
        value::core::{FnValue, Value, ValueKind},
    },
    span::Span,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the host I/O capabilities, the evaluated argument
/// values (arity already checked) and the call span for diagnostics.
type BuiltinFn = fn(&mut dyn HostIo, &[Value], Span) -> Result<Value, OpError>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides a string name, the exact argument count, and a
/// function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
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
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names pre-bound in every root scope.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"  => { arity: 1, func: print::print },
    "prompt" => { arity: 1, func: prompt::prompt },
}

impl Evaluator {
    /// Evaluates a function definition.
    ///
    /// The resulting function value closes over the *defining* context's
    /// symbol table. A named definition additionally binds itself under its
    /// own name in the current scope before yielding itself, which is what
    /// makes plain recursion work.
    pub(crate) fn eval_fn_def(&mut self,
                              name: Option<&str>,
                              params: &[String],
                              body: &Rc<Node>,
                              span: Span,
                              context: &Rc<Context>)
                              -> EvalResult<Value> {
        let function = FnValue { name:    name.map(str::to_string),
                                 params:  params.to_vec(),
                                 body:    Rc::clone(body),
                                 closure: Rc::clone(&context.table), };
        let value = Value::function(function).with_span(span).with_context(context);

        if let Some(name) = name {
            context.table.borrow_mut().set(name, value.clone());
        }

        Ok(value)
    }

    /// Evaluates a call.
    ///
    /// The callee expression is evaluated first and its value copied and
    /// re-stamped with the call's span, so provenance points at this call
    /// site rather than wherever the value came from. Arguments are then
    /// evaluated left to right — the first failure anywhere aborts the
    /// call — and the target is invoked.
    ///
    /// # Errors
    /// A not-callable diagnostic for any non-function target, or whatever
    /// the invocation itself raises.
    pub(crate) fn eval_call(&mut self,
                            callee: &Node,
                            args: &[Node],
                            span: Span,
                            context: &Rc<Context>)
                            -> EvalResult<Value> {
        let target = self.eval(callee, context)?
                         .copy()
                         .with_span(span)
                         .with_context(context);

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg, context)?);
        }

        match &target.kind {
            ValueKind::Function(function) => self.call_function(function, values, span, context),
            ValueKind::Builtin(name) => self.call_builtin(name, &values, span, context),
            other => {
                Err(self.error(RuntimeErrorKind::NotCallable { found: other.type_name() },
                               callee.span(),
                               context))
            },
        }
    }

    /// Invokes a user-defined function.
    ///
    /// The new frame's symbol table is parented to the function's *closure*
    /// (its defining scope) while the frame itself is parented to the
    /// *calling* context — the two chains serve variable lookup and
    /// tracebacks respectively, and they intentionally diverge here.
    ///
    /// Arity is checked before anything is bound; on a match each argument
    /// is bound by position under its parameter name, re-stamped with the
    /// new frame. The body's value (or failure) is the call's result.
    fn call_function(&mut self,
                     function: &Rc<FnValue>,
                     args: Vec<Value>,
                     span: Span,
                     context: &Rc<Context>)
                     -> EvalResult<Value> {
        if args.len() != function.params.len() {
            let kind = RuntimeErrorKind::ArgumentCountMismatch { name:     function.display_name()
                                                                               .to_string(),
                                                                 expected: function.params.len(),
                                                                 found:    args.len(), };
            return Err(self.error(kind, span, context));
        }

        let table = SymbolTable::child(Rc::clone(&function.closure));
        let frame = Context::frame(function.display_name(), context, span.start, Rc::clone(&table));

        {
            let mut scope = table.borrow_mut();
            for (param, arg) in function.params.iter().zip(args) {
                scope.set(param, arg.with_context(&frame));
            }
        }

        self.eval(&function.body, &frame)
    }

    /// Invokes a built-in function by name.
    ///
    /// The name is looked up in the builtin table; an unknown name is an
    /// internal error, since the root scope only ever binds known names.
    fn call_builtin(&mut self,
                    name: &str,
                    args: &[Value],
                    span: Span,
                    context: &Rc<Context>)
                    -> EvalResult<Value> {
        let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) else {
            return Err(self.error(RuntimeErrorKind::UnknownBuiltin { name: name.to_string() },
                                  span,
                                  context));
        };

        if args.len() != builtin.arity {
            let kind = RuntimeErrorKind::ArgumentCountMismatch { name:     name.to_string(),
                                                                 expected: builtin.arity,
                                                                 found:    args.len(), };
            return Err(self.error(kind, span, context));
        }

        let result = {
            let mut io = self.io.borrow_mut();
            (builtin.func)(&mut *io, args, span)
        };
        result.map(|value| value.with_span(span).with_context(context))
              .map_err(|e| self.promote(e, context))
    }
}
