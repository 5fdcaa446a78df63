//! Lowering from the source AST to the C-shaped target AST.
//!
//! Top-level calls become `ExpressionStatement`s, call names become
//! `Identifier` callees, and literals are copied across unchanged. The
//! destination for each newly built node is tracked on an explicit context
//! stack owned by a single `transform` call; the source tree is never touched.

use serde::Serialize;

use crate::parser::{CallExpression, NumberLiteral, Program, StringLiteral};
use crate::walker::{Parent, Visitor, traverse};

/// Target tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
  Program { body: Vec<Node> },
  ExpressionStatement { expression: Box<Node> },
  CallExpression { callee: Box<Node>, arguments: Vec<Node> },
  Identifier { name: String },
  NumberLiteral { value: String },
  StringLiteral { value: String },
}

impl Node {
  pub fn statement(expression: Node) -> Self {
    Self::ExpressionStatement {
      expression: Box::new(expression),
    }
  }

  pub fn call(name: impl Into<String>, arguments: Vec<Node>) -> Self {
    Self::CallExpression {
      callee: Box::new(Self::identifier(name)),
      arguments,
    }
  }

  pub fn identifier(name: impl Into<String>) -> Self {
    Self::Identifier { name: name.into() }
  }

  pub fn number(value: impl Into<String>) -> Self {
    Self::NumberLiteral {
      value: value.into(),
    }
  }

  pub fn string(value: impl Into<String>) -> Self {
    Self::StringLiteral {
      value: value.into(),
    }
  }

  /// Node kind name as used in diagnostics and JSON dumps.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Self::Program { .. } => "Program",
      Self::ExpressionStatement { .. } => "ExpressionStatement",
      Self::CallExpression { .. } => "CallExpression",
      Self::Identifier { .. } => "Identifier",
      Self::NumberLiteral { .. } => "NumberLiteral",
      Self::StringLiteral { .. } => "StringLiteral",
    }
  }
}

/// Build the target tree for `program`.
pub fn transform(program: &Program) -> Node {
  let mut builder = Builder::default();
  traverse(program, &mut builder);
  debug_assert!(builder.open_calls.is_empty());
  tracing::debug!(statements = builder.body.len(), "transformed program");
  Node::Program { body: builder.body }
}

/// A target call whose arguments are still being collected.
struct OpenCall {
  callee: String,
  arguments: Vec<Node>,
}

/// Visitor that assembles the target tree.
///
/// The context of the program root is `body`; the context of a call is the
/// `arguments` of the innermost entry in `open_calls`.
#[derive(Default)]
struct Builder {
  body: Vec<Node>,
  open_calls: Vec<OpenCall>,
}

impl Builder {
  /// Destination for nodes whose source parent is `parent`.
  fn context(&mut self, parent: Parent<'_>) -> &mut Vec<Node> {
    match parent {
      Parent::Program(_) => &mut self.body,
      Parent::CallExpression(call) => match self.open_calls.last_mut() {
        Some(open) => &mut open.arguments,
        None => panic!("no context established for children of `{}`", call.name),
      },
    }
  }
}

impl<'ast> Visitor<'ast> for Builder {
  fn enter_call_expression(&mut self, call: &'ast CallExpression, _: Parent<'ast>) {
    self.open_calls.push(OpenCall {
      callee: call.name.clone(),
      arguments: Vec::new(),
    });
  }

  fn exit_call_expression(&mut self, call: &'ast CallExpression, parent: Parent<'ast>) {
    let Some(open) = self.open_calls.pop() else {
      panic!("call `{}` exited without being entered", call.name);
    };
    let expression = Node::call(open.callee, open.arguments);
    let node = match parent {
      Parent::Program(_) => Node::statement(expression),
      Parent::CallExpression(_) => expression,
    };
    self.context(parent).push(node);
  }

  fn enter_number_literal(&mut self, literal: &'ast NumberLiteral, parent: Parent<'ast>) {
    self.context(parent).push(Node::number(literal.value.clone()));
  }

  fn enter_string_literal(&mut self, literal: &'ast StringLiteral, parent: Parent<'ast>) {
    self.context(parent).push(Node::string(literal.value.clone()));
  }
}
