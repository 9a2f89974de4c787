pub(crate) mod ast;
pub(crate) mod builtins;
pub(crate) mod compile;
pub(crate) mod error;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod program;

pub use compile::compile;
pub use error::{ExprError, ExprStage};
pub use program::{CompiledExpr, VectorExpr};

#[cfg(test)]
#[path = "../../tests/unit/expression/compile.rs"]
mod tests;
