//! Depth-first traversal over the source AST.
//!
//! The walker only decides visiting order; what happens at each node is up to
//! the [`Visitor`]. `enter_*` fires before a node's children are visited and
//! `exit_*` after all of them. Every callback defaults to a no-op, so a visitor
//! only implements the node kinds it cares about.

use crate::parser::{CallExpression, NumberLiteral, Param, Program, StringLiteral};

/// The node a visited node hangs off.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'ast> {
  Program(&'ast Program),
  CallExpression(&'ast CallExpression),
}

#[allow(unused_variables)]
pub trait Visitor<'ast> {
  fn enter_program(&mut self, program: &'ast Program) {}
  fn exit_program(&mut self, program: &'ast Program) {}

  fn enter_call_expression(&mut self, call: &'ast CallExpression, parent: Parent<'ast>) {}
  fn exit_call_expression(&mut self, call: &'ast CallExpression, parent: Parent<'ast>) {}

  fn enter_number_literal(&mut self, literal: &'ast NumberLiteral, parent: Parent<'ast>) {}
  fn exit_number_literal(&mut self, literal: &'ast NumberLiteral, parent: Parent<'ast>) {}

  fn enter_string_literal(&mut self, literal: &'ast StringLiteral, parent: Parent<'ast>) {}
  fn exit_string_literal(&mut self, literal: &'ast StringLiteral, parent: Parent<'ast>) {}
}

/// Walk `program` depth-first, dispatching to `visitor` per node kind.
pub fn traverse<'ast, V: Visitor<'ast> + ?Sized>(program: &'ast Program, visitor: &mut V) {
  visitor.enter_program(program);
  for call in &program.body {
    walk_call(call, Parent::Program(program), visitor);
  }
  visitor.exit_program(program);
}

fn walk_call<'ast, V: Visitor<'ast> + ?Sized>(
  call: &'ast CallExpression,
  parent: Parent<'ast>,
  visitor: &mut V,
) {
  visitor.enter_call_expression(call, parent);
  for param in &call.params {
    walk_param(param, Parent::CallExpression(call), visitor);
  }
  visitor.exit_call_expression(call, parent);
}

fn walk_param<'ast, V: Visitor<'ast> + ?Sized>(
  param: &'ast Param,
  parent: Parent<'ast>,
  visitor: &mut V,
) {
  match param {
    Param::Number(literal) => {
      visitor.enter_number_literal(literal, parent);
      visitor.exit_number_literal(literal, parent);
    }
    Param::String(literal) => {
      visitor.enter_string_literal(literal, parent);
      visitor.exit_string_literal(literal, parent);
    }
    Param::Call(call) => walk_call(call, parent, visitor),
  }
}
