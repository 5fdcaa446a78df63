//! Recursive-descent parser producing the source-shaped AST.
//!
//! Every form is either a literal or a parenthesised call `(name param...)`.
//! A single cursor walks the token vector forwards; nothing is ever re-read.

use serde::Serialize;

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind, describe_token};

/// Deepest call nesting accepted. Every later stage recurses once per level,
/// so this also bounds their stack use.
pub const MAX_NESTING: usize = 256;

/// Root of the source tree: a sequence of top-level calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
  pub body: Vec<CallExpression>,
}

/// One s-expression call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
  pub name: String,
  pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct NumberLiteral {
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub struct StringLiteral {
  pub value: String,
}

/// Anything that may appear as a call parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
  Number(NumberLiteral),
  String(StringLiteral),
  Call(CallExpression),
}

impl CallExpression {
  pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
    Self {
      name: name.into(),
      params,
    }
  }
}

impl Param {
  pub fn number(value: impl Into<String>) -> Self {
    Self::Number(NumberLiteral {
      value: value.into(),
    })
  }

  pub fn string(value: impl Into<String>) -> Self {
    Self::String(StringLiteral {
      value: value.into(),
    })
  }

  pub fn call(name: impl Into<String>, params: Vec<Param>) -> Self {
    Self::Call(CallExpression::new(name, params))
  }
}

/// Parse every top-level call in the token stream.
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<Program> {
  let mut stream = TokenStream::new(tokens, source);
  let mut program = Program::default();

  while let Some(token) = stream.peek() {
    if token.kind != TokenKind::OpenParen {
      return Err(stream.error_here("expected \"(\" to start a call"));
    }
    if let Param::Call(call) = parse_node(&mut stream)? {
      program.body.push(call);
    }
  }

  tracing::debug!(calls = program.body.len(), "parsed program");
  Ok(program)
}

fn parse_node(stream: &mut TokenStream) -> CompileResult<Param> {
  let Some(token) = stream.peek() else {
    return Err(stream.error_here("expected an expression"));
  };

  match token.kind {
    TokenKind::Number => {
      let value = token.text.clone();
      stream.advance();
      Ok(Param::number(value))
    }
    TokenKind::String => {
      let value = token.text.clone();
      stream.advance();
      Ok(Param::string(value))
    }
    TokenKind::OpenParen => {
      if stream.depth == MAX_NESTING {
        return Err(CompileError::parse(
          stream.source,
          token.loc,
          "(",
          format!("calls nested deeper than {MAX_NESTING} levels"),
        ));
      }
      stream.advance();
      stream.depth += 1;
      let call = parse_call(stream);
      stream.depth -= 1;
      call.map(Param::Call)
    }
    TokenKind::Name | TokenKind::CloseParen => {
      let got = describe_token(Some(token));
      Err(CompileError::parse(
        stream.source,
        token.loc,
        &got,
        format!("unexpected token \"{got}\""),
      ))
    }
  }
}

/// Parse the remainder of a call after its opening parenthesis.
fn parse_call(stream: &mut TokenStream) -> CompileResult<CallExpression> {
  let name = stream.get_name()?;
  let mut params = Vec::new();

  while !stream.equal(TokenKind::CloseParen) {
    if stream.is_eof() {
      return Err(stream.error_here("expected \")\""));
    }
    params.push(parse_node(stream)?);
  }

  Ok(CallExpression { name, params })
}

/// Lightweight cursor over the token vector.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
  /// Number of calls currently open.
  depth: usize,
}

impl<'a> TokenStream<'a> {
  /// Take ownership of the token stream; the parser will advance `pos` as it consumes input.
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
      depth: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  fn advance(&mut self) {
    self.pos += 1;
  }

  /// Byte offset of the current token, or the end of the source.
  fn loc(&self) -> usize {
    self.peek().map_or(self.source.len(), |token| token.loc)
  }

  /// Consume the current token if it has the provided kind.
  fn equal(&mut self, kind: TokenKind) -> bool {
    if let Some(token) = self.peek()
      && token.kind == kind
    {
      self.advance();
      return true;
    }
    false
  }

  /// Consume the current token as a call name.
  fn get_name(&mut self) -> CompileResult<String> {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Name
    {
      let name = token.text.clone();
      self.advance();
      return Ok(name);
    }

    Err(self.error_here("expected call name"))
  }

  fn error_here(&self, expected: &str) -> CompileError {
    let got = describe_token(self.peek());
    CompileError::parse(
      self.source,
      self.loc(),
      &got,
      format!("{expected}, but got \"{got}\""),
    )
  }

  fn is_eof(&self) -> bool {
    self.pos >= self.tokens.len()
  }
}
