use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Node,
    error::{
        Error, RuntimeError,
        runtime_error::{OpError, RuntimeErrorKind},
    },
    interpreter::{
        evaluator::{
            binary::core::eval_binary,
            scope::{Context, SymbolTable},
            unary::eval_unary,
        },
        host::{HostIo, StdIo},
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
    span::{Source, Span},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure, traceback included.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A ready-to-run interpreter instance.
///
/// Holds the injected host I/O capabilities and the root scope, which is
/// pre-populated with `pi` and the built-in functions `print` and `prompt`
/// before any program runs. Nothing is process-wide: two instances are
/// fully independent.
///
/// Running several sources on one instance keeps the root scope, so
/// top-level bindings persist between runs — the contract a REPL needs.
pub struct Interpreter {
    io:      Rc<RefCell<dyn HostIo>>,
    globals: Rc<RefCell<SymbolTable>>,
}

impl Interpreter {
    /// Creates an interpreter around the given host capabilities.
    #[must_use]
    pub fn new(io: Rc<RefCell<dyn HostIo>>) -> Self {
        let globals = SymbolTable::root();
        {
            let mut table = globals.borrow_mut();
            table.set("pi", Value::from(std::f64::consts::PI));
            table.set("print", Value::builtin("print"));
            table.set("prompt", Value::builtin("prompt"));
        }
        Self { io, globals }
    }

    /// Creates an interpreter wired to the process's stdin and stdout.
    #[must_use]
    pub fn with_std_io() -> Self {
        Self::new(Rc::new(RefCell::new(StdIo)))
    }

    /// Runs a source text through the whole pipeline.
    ///
    /// Lexes, parses and evaluates `text` against this instance's root
    /// scope. Exactly one of value or error is produced; no error is ever
    /// caught or retried internally.
    ///
    /// # Parameters
    /// - `file_name`: Display name used in diagnostics.
    /// - `text`: The source text.
    ///
    /// # Returns
    /// The value of the program's last statement (`none` for an empty
    /// program).
    ///
    /// # Errors
    /// The first lex, syntax or runtime error encountered.
    pub fn run(&mut self, file_name: &str, text: &str) -> Result<Value, Error> {
        let source = Source::new(file_name, text);
        let tokens = tokenize(&source)?;
        let program = parse(&source, &tokens)?;

        let context = Context::program(Rc::clone(&self.globals));
        let mut evaluator = Evaluator { source: Rc::clone(&source),
                                        io:     Rc::clone(&self.io), };
        evaluator.eval(&program, &context).map_err(Error::from)
    }
}

/// The tree walker for one program run.
///
/// Carries the source (for stamping diagnostics) and the host I/O handle
/// (for the built-ins). All state a program observes lives in the context
/// chain it is evaluated against, not here.
pub struct Evaluator {
    pub(crate) source: Rc<Source>,
    pub(crate) io:     Rc<RefCell<dyn HostIo>>,
}

impl Evaluator {
    /// Evaluates one node against a context.
    ///
    /// This is the single dispatch point of the interpreter: a match on the
    /// node variant, never virtual dispatch through the node itself. Child
    /// evaluation order is fixed — left before right, arguments left to
    /// right, statements in sequence — and the first failure propagates
    /// without evaluating further siblings.
    ///
    /// # Parameters
    /// - `node`: The node to evaluate.
    /// - `context`: The frame to resolve and bind variables in.
    ///
    /// # Returns
    /// The node's value, stamped with the node's span and the context.
    ///
    /// # Errors
    /// Any runtime failure raised by this node or a child.
    pub fn eval(&mut self, node: &Node, context: &Rc<Context>) -> EvalResult<Value> {
        match node {
            Node::Literal { value, span } => {
                Ok(Value::from_literal(value).with_span(*span).with_context(context))
            },
            Node::VarAccess { name, span } => {
                let value = context.table.borrow().get(name);
                match value {
                    Some(value) => Ok(value.copy().with_span(*span).with_context(context)),
                    None => {
                        let kind = RuntimeErrorKind::UnknownVariable { name: name.clone() };
                        Err(self.error(kind, *span, context))
                    },
                }
            },
            Node::VarAssign { name, value, .. } => {
                let value = self.eval(value, context)?;
                context.table.borrow_mut().set(name, value.clone());
                Ok(value)
            },
            Node::UnaryOp { op, operand, span } => {
                let value = self.eval(operand, context)?;
                eval_unary(*op, &value, *span).map(|v| v.with_span(*span).with_context(context))
                                              .map_err(|e| self.promote(e, context))
            },
            Node::BinaryOp { left,
                             op,
                             right,
                             span, } => {
                let lhs = self.eval(left, context)?;
                let rhs = self.eval(right, context)?;
                eval_binary(*op, &lhs, &rhs, *span).map(|v| {
                                                       v.with_span(*span).with_context(context)
                                                   })
                                                   .map_err(|e| self.promote(e, context))
            },
            Node::If { condition,
                       then_branch,
                       else_branch,
                       span, } => {
                self.eval_if(condition, then_branch, else_branch.as_deref(), *span, context)
            },
            Node::For { var,
                        start,
                        end,
                        step,
                        body,
                        span, } => {
                self.eval_for(var, start, end, step.as_deref(), body, *span, context)
            },
            Node::While { condition, body, span } => {
                self.eval_while(condition, body, *span, context)
            },
            Node::FnDef { name,
                          params,
                          body,
                          span, } => self.eval_fn_def(name.as_deref(), params, body, *span, context),
            Node::Call { callee, args, span } => self.eval_call(callee, args, *span, context),
            Node::Statements { statements, span } => {
                let mut last = None;
                for statement in statements {
                    last = Some(self.eval(statement, context)?);
                }
                Ok(last.unwrap_or_else(|| Value::none().with_span(*span).with_context(context)))
            },
        }
    }

    /// Evaluates a conditional.
    ///
    /// The condition must produce a boolean. The conditional's value is the
    /// value of the branch that ran, or `none` when the condition is false
    /// and no `else` branch exists.
    fn eval_if(&mut self,
               condition: &Node,
               then_branch: &Node,
               else_branch: Option<&Node>,
               span: Span,
               context: &Rc<Context>)
               -> EvalResult<Value> {
        let flag = self.eval(condition, context)?
                       .as_bool(condition.span())
                       .map_err(|e| self.promote(e, context))?;

        if flag {
            self.eval(then_branch, context)
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch, context)
        } else {
            Ok(Value::none().with_span(span).with_context(context))
        }
    }

    /// Evaluates a conditional loop.
    ///
    /// The condition is re-evaluated before each iteration and must produce
    /// a boolean every time. The loop's own value is `none`; body values
    /// are not threaded outward.
    fn eval_while(&mut self,
                  condition: &Node,
                  body: &Node,
                  span: Span,
                  context: &Rc<Context>)
                  -> EvalResult<Value> {
        loop {
            let flag = self.eval(condition, context)?
                           .as_bool(condition.span())
                           .map_err(|e| self.promote(e, context))?;
            if !flag {
                break;
            }
            self.eval(body, context)?;
        }

        Ok(Value::none().with_span(span).with_context(context))
    }

    /// Builds a full runtime diagnostic, capturing the traceback of
    /// `context` at the moment of failure.
    pub(crate) fn error(&self,
                        kind: RuntimeErrorKind,
                        span: Span,
                        context: &Rc<Context>)
                        -> RuntimeError {
        RuntimeError { kind,
                       span,
                       frames: context.traceback(span.start),
                       source: Rc::clone(&self.source) }
    }

    /// Promotes an operator-level failure to a full diagnostic.
    pub(crate) fn promote(&self, error: OpError, context: &Rc<Context>) -> RuntimeError {
        self.error(error.kind, error.span, context)
    }
}
