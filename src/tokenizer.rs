//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer knows nothing about call structure – it only recognises
//! parentheses, names, digit runs and double-quoted strings. Numbers are kept
//! as their literal text and never evaluated.

use serde::Serialize;

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
  OpenParen,
  CloseParen,
  Name,
  Number,
  String,
}

/// Thin wrapper for lexical information needed by later stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
  pub kind: TokenKind,
  /// Token text; for strings this excludes the surrounding quotes.
  pub text: String,
  /// Byte offset of the token's first character in the source.
  pub loc: usize,
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>, loc: usize) -> Self {
    Self {
      kind,
      text: text.into(),
      loc,
    }
  }
}

/// Lex the input into a flat vector of tokens.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let mut chars = input.char_indices().peekable();

  while let Some((i, c)) = chars.next() {
    match c {
      '(' => tokens.push(Token::new(TokenKind::OpenParen, "(", i)),
      ')' => tokens.push(Token::new(TokenKind::CloseParen, ")", i)),
      '"' => {
        let start = i + c.len_utf8();
        let Some((end, _)) = chars.by_ref().find(|&(_, c)| c == '"') else {
          return Err(CompileError::lex(
            input,
            i,
            c,
            "unterminated string literal",
          ));
        };
        tokens.push(Token::new(TokenKind::String, &input[start..end], i));
      }
      c if c.is_whitespace() => {}
      c if c.is_ascii_digit() => {
        let end = take_run(&mut chars, i + 1, |c| c.is_ascii_digit());
        tokens.push(Token::new(TokenKind::Number, &input[i..end], i));
      }
      c if c.is_ascii_alphabetic() => {
        let end = take_run(&mut chars, i + 1, |c| c.is_ascii_alphabetic());
        tokens.push(Token::new(TokenKind::Name, &input[i..end], i));
      }
      other => {
        return Err(CompileError::lex(
          input,
          i,
          other,
          format!("invalid token: '{other}'"),
        ));
      }
    }
  }

  tracing::debug!(count = tokens.len(), "tokenized source");
  for token in &tokens {
    tracing::trace!(kind = ?token.kind, text = %token.text, loc = token.loc, "token");
  }
  Ok(tokens)
}

/// Advance past a maximal run of ASCII characters matching `pred`, returning
/// the byte offset one past the run.
fn take_run(
  chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
  mut end: usize,
  pred: impl Fn(char) -> bool,
) -> usize {
  while let Some(&(i, c)) = chars.peek() {
    if !pred(c) {
      break;
    }
    end = i + c.len_utf8();
    chars.next();
  }
  end
}

/// Human-friendly description used in diagnostics. Callers quote it.
pub fn describe_token(token: Option<&Token>) -> String {
  match token {
    Some(t) => t.text.clone(),
    None => "EOF".to_string(),
  }
}
