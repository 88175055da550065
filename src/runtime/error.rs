use miette::Diagnostic;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Unbound symbol `{name}`")]
    #[diagnostic(
        code(runtime::unbound_symbol),
        help("bind it first with `(def name value)`")
    )]
    UnboundSymbol { name: String },
    #[error("Value of kind `{found}` is not callable")]
    #[diagnostic(
        code(runtime::not_callable),
        help("the first element of a list must evaluate to a built-in")
    )]
    NotCallable { found: &'static str },
    #[error("Type mismatch in `{op}`: expected {expected}, found {found}")]
    #[diagnostic(code(runtime::type_mismatch))]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Function `{name}` expected {expected} arguments but received {received}")]
    #[diagnostic(code(runtime::arity_mismatch))]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        received: usize,
    },
    #[error("Integer division by zero in `{op}`")]
    #[diagnostic(code(runtime::division_by_zero))]
    DivisionByZero { op: &'static str },
    #[error("Negative shift count {count} in `{op}`")]
    #[diagnostic(code(runtime::invalid_shift))]
    InvalidShift { op: &'static str, count: i64 },
    #[error("Evaluation exceeded the maximum depth of {limit}")]
    #[diagnostic(
        code(runtime::recursion_limit),
        help("raise LISP_EVAL_MAX_DEPTH or flatten the expression")
    )]
    RecursionLimit { limit: usize },
}
