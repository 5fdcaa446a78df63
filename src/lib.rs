//! Crate root: wires together the compilation pipeline.
//!
//! The stages are small and composable so they can be evolved independently:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns the source AST.
//! - `walker` drives depth-first visits over the source AST.
//! - `transformer` rebuilds the source AST as a C-shaped target AST.
//! - `codegen` renders the target AST as call statements.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod transformer;
pub mod walker;

mod codegen;

pub use codegen::{Options, Separator};
pub use error::{CompileError, CompileResult};

/// Compile s-expression source into C-like call statements.
pub fn compile(source: &str) -> CompileResult<String> {
  compile_with(source, &Options::default())
}

/// Compile with explicit output options.
pub fn compile_with(source: &str, options: &Options) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(source)?;
  let program = parser::parse(tokens, source)?;
  let target = transformer::transform(&program);
  codegen::generate(&target, options)
}

/// Render an already-built target tree.
pub fn generate(target: &transformer::Node, options: &Options) -> CompileResult<String> {
  codegen::generate(target, options)
}
