pub mod ast;
pub mod errors;
pub mod reader;
