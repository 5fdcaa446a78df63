//! Shared error utilities used across the compilation pipeline.
//!
//! Lexical and syntactic diagnostics point at the offending byte with a caret
//! under the quoted source, in the style of chibicc.

use std::fmt;

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

/// Quoted source line plus a caret marker under the failing offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  expr_line: String,
  marker: String,
}

impl Diagnostic {
  fn at(expr: &str, loc: usize) -> Self {
    let expr_line = format!("'{expr}'");
    let safe_loc = loc.min(expr.len());
    let char_offset = expr[..safe_loc].chars().count() + 1; // account for opening quote
    let marker = format!("{}^", " ".repeat(char_offset));
    Self { expr_line, marker }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n{}", self.expr_line, self.marker)
  }
}

#[derive(Debug, Snafu)]
pub enum CompileError {
  /// The tokenizer met a character it has no rule for.
  #[snafu(display("{diagnostic} {message}"))]
  Lex {
    diagnostic: Diagnostic,
    character: char,
    loc: usize,
    message: String,
  },

  /// The parser met a token (or the end of input) it did not expect.
  #[snafu(display("{diagnostic} {message}"))]
  Parse {
    diagnostic: Diagnostic,
    found: String,
    loc: usize,
    message: String,
  },

  /// The target tree reaching the generator is malformed.
  #[snafu(display("code generation failed: {message}"))]
  CodeGen { message: String },

  /// A pipeline stage could not be dumped as JSON.
  #[snafu(visibility(pub), display("failed to emit {stage} as JSON: {source}"))]
  Emit {
    stage: String,
    source: serde_json::Error,
  },
}

impl CompileError {
  /// Lexical error anchored at a specific byte offset in the source.
  pub fn lex(expr: &str, loc: usize, character: char, message: impl Into<String>) -> Self {
    Self::Lex {
      diagnostic: Diagnostic::at(expr, loc),
      character,
      loc,
      message: message.into(),
    }
  }

  /// Syntax error anchored at a specific byte offset in the source.
  pub fn parse(
    expr: &str,
    loc: usize,
    found: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Parse {
      diagnostic: Diagnostic::at(expr, loc),
      found: found.into(),
      loc,
      message: message.into(),
    }
  }

  pub fn codegen(message: impl Into<String>) -> Self {
    Self::CodeGen {
      message: message.into(),
    }
  }

  /// Byte offset the error points at, if it has one.
  pub fn loc(&self) -> Option<usize> {
    match self {
      Self::Lex { loc, .. } | Self::Parse { loc, .. } => Some(*loc),
      Self::CodeGen { .. } | Self::Emit { .. } => None,
    }
  }
}
