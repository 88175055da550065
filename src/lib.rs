pub mod diagnostics;
pub mod language;
pub mod runtime;

pub use language::{ast::Expr, reader::read};
pub use runtime::{ErrorPolicy, EvalOptions, Interpreter, RuntimeError, Value};
