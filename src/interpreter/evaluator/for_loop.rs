use std::rc::Rc;

use crate::{
    ast::Node,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            scope::Context,
        },
        value::core::Value,
    },
    span::Span,
};

impl Evaluator {
    /// Evaluates a `for` expression.
    ///
    /// The header expressions are evaluated once, in order: start, end,
    /// then step (implicitly `1` when absent). All three must be numbers.
    /// The loop runs while `i <= end` for a positive step and while
    /// `i >= end` otherwise, so both bounds are inclusive and a step in
    /// the wrong direction runs zero iterations.
    ///
    /// Each iteration (re)binds the loop variable in the *current* symbol
    /// table — there is no per-iteration scope. A closure created in the
    /// body therefore captures the one shared binding, and after the loop
    /// the variable holds its final iteration value. This is observable,
    /// relied-upon behavior.
    ///
    /// The loop's own value is `none`; body values are not threaded
    /// outward.
    ///
    /// # Parameters
    /// - `var`: The loop variable name.
    /// - `start`/`end`/`step`: The header expressions.
    /// - `body`: The loop body block.
    /// - `span`: Source region of the whole loop.
    /// - `context`: The frame the loop runs in.
    ///
    /// # Errors
    /// Propagates header or body failures; non-numeric header values raise
    /// an expected-number diagnostic at the offending expression.
    pub(crate) fn eval_for(&mut self,
                           var: &str,
                           start: &Node,
                           end: &Node,
                           step: Option<&Node>,
                           body: &Node,
                           span: Span,
                           context: &Rc<Context>)
                           -> EvalResult<Value> {
        let start_value = self.eval(start, context)?
                              .as_number(start.span())
                              .map_err(|e| self.promote(e, context))?;
        let end_value = self.eval(end, context)?
                            .as_number(end.span())
                            .map_err(|e| self.promote(e, context))?;
        let step_value = match step {
            Some(node) => self.eval(node, context)?
                              .as_number(node.span())
                              .map_err(|e| self.promote(e, context))?,
            None => 1.0,
        };

        let mut i = start_value;
        while if step_value > 0.0 { i <= end_value } else { i >= end_value } {
            context.table
                   .borrow_mut()
                   .set(var, Value::from(i).with_span(span).with_context(context));
            i += step_value;
            self.eval(body, context)?;
        }

        Ok(Value::none().with_span(span).with_context(context))
    }
}
