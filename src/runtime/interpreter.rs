use crate::language::ast::Expr;
use crate::runtime::{
    builtins::is_builtin_name,
    environment::Environment,
    error::{RuntimeError, RuntimeResult},
    options::EvalOptions,
    value::Value,
};

pub struct Interpreter {
    env: Environment,
    options: EvalOptions,
    depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Self {
            env: Environment::new(),
            options,
            depth: 0,
        }
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Evaluates `exprs` in order and returns the last value, or `Nil` when
    /// there is nothing to evaluate. Stops at the first error; bindings made
    /// before it stay in place.
    pub fn interpret(&mut self, exprs: &[Expr]) -> RuntimeResult<Value> {
        let mut last = Value::Nil;
        for (index, expr) in exprs.iter().enumerate() {
            tracing::debug!(index, %expr, "evaluating top-level expression");
            last = self.eval(expr).map_err(|err| {
                tracing::debug!(index, error = %err, "top-level evaluation failed");
                err
            })?;
        }
        Ok(last)
    }

    pub fn eval(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        if self.depth >= self.options.max_depth {
            return Err(RuntimeError::RecursionLimit {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = self.eval_node(expr);
        self.depth -= 1;
        result
    }

    #[tracing::instrument(level = "trace", skip_all, fields(kind = expr.kind()))]
    fn eval_node(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::Atom(value) => Ok(value.clone()),
            Expr::Symbol(name) => self.env.lookup(name),
            Expr::Sequence { head, args } => self.eval_sequence(head, args),
            Expr::Definition { name, value } => self.eval_definition(name, value),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => self.eval_conditional(condition, then_branch, else_branch),
        }
    }

    fn eval_sequence(&mut self, head: &Expr, args: &[Expr]) -> RuntimeResult<Value> {
        let callee = self.eval(head)?;
        let builtin = *callee.as_builtin()?;
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_operand(arg, "argument")?);
        }
        builtin.call(&values)
    }

    fn eval_definition(&mut self, name: &str, value: &Expr) -> RuntimeResult<Value> {
        match self.eval(value) {
            Ok(value) => {
                if is_builtin_name(name) {
                    tracing::debug!(name, "definition shadows a builtin");
                }
                tracing::debug!(name, %value, "define");
                Ok(self.env.define(name, value))
            }
            Err(err) => {
                if self.options.error_policy.swallows_errors() {
                    tracing::warn!(name, error = %err, "binding nil after failed definition");
                    self.env.define(name, Value::Nil);
                }
                Err(err)
            }
        }
    }

    fn eval_conditional(
        &mut self,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> RuntimeResult<Value> {
        let branch = if self.eval_operand(condition, "condition")?.is_truthy() {
            then_branch
        } else {
            else_branch
        };
        self.eval(branch)
    }

    /// Arguments and conditions are the two places where a lenient policy
    /// trades an error for `Nil`. Hitting the depth limit always propagates.
    fn eval_operand(&mut self, expr: &Expr, role: &'static str) -> RuntimeResult<Value> {
        match self.eval(expr) {
            Err(err)
                if self.options.error_policy.swallows_errors()
                    && !matches!(err, RuntimeError::RecursionLimit { .. }) =>
            {
                tracing::warn!(role, error = %err, "substituting nil for failed {role}");
                Ok(Value::Nil)
            }
            result => result,
        }
    }
}
