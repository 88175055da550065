pub mod builtins;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod options;
pub mod value;

pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::Interpreter;
pub use options::{ErrorPolicy, EvalOptions};
pub use value::Value;
