//! Code generation: render the target AST as C-like call statements.
//!
//! Each target node kind is only legal in certain positions (a `Program` at the
//! root, statements directly under it, calls and literals as arguments). The
//! transformer never builds anything else, so position errors here indicate a
//! malformed tree handed in from outside the pipeline.

use crate::error::{CompileError, CompileResult};
use crate::transformer::Node;

/// Text placed between consecutive top-level statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Separator {
  #[default]
  Newline,
  Empty,
}

impl Separator {
  fn as_str(self) -> &'static str {
    match self {
      Self::Newline => "\n",
      Self::Empty => "",
    }
  }
}

/// Knobs that affect rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
  pub separator: Separator,
}

/// Emit source text for a target `Program`.
pub fn generate(program: &Node, options: &Options) -> CompileResult<String> {
  let Node::Program { body } = program else {
    return Err(misplaced(program, "the root"));
  };

  let mut out = String::new();
  for (i, stmt) in body.iter().enumerate() {
    if i > 0 {
      out.push_str(options.separator.as_str());
    }
    emit_stmt(stmt, &mut out)?;
  }

  tracing::debug!(statements = body.len(), bytes = out.len(), "generated code");
  Ok(out)
}

fn emit_stmt(node: &Node, out: &mut String) -> CompileResult<()> {
  let Node::ExpressionStatement { expression } = node else {
    return Err(misplaced(node, "statement position"));
  };
  if !matches!(**expression, Node::CallExpression { .. }) {
    return Err(misplaced(expression, "an expression statement"));
  }
  emit_expr(expression, out)?;
  out.push(';');
  Ok(())
}

/// Emit a call or literal used as an expression.
fn emit_expr(node: &Node, out: &mut String) -> CompileResult<()> {
  match node {
    Node::CallExpression { callee, arguments } => {
      let Node::Identifier { name } = &**callee else {
        return Err(misplaced(callee, "callee position"));
      };
      out.push_str(name);
      out.push('(');
      for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        emit_expr(arg, out)?;
      }
      out.push(')');
    }
    Node::NumberLiteral { value } => out.push_str(value),
    Node::StringLiteral { value } => {
      out.push('"');
      out.push_str(value);
      out.push('"');
    }
    Node::Program { .. } | Node::ExpressionStatement { .. } | Node::Identifier { .. } => {
      return Err(misplaced(node, "argument position"));
    }
  }
  Ok(())
}

fn misplaced(node: &Node, position: &str) -> CompileError {
  CompileError::codegen(format!(
    "unexpected {} in {position}",
    node.kind_name()
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn program(body: Vec<Node>) -> Node {
    Node::Program { body }
  }

  fn render(node: &Node) -> CompileResult<String> {
    generate(node, &Options::default())
  }

  fn codegen_message(result: CompileResult<String>) -> String {
    match result.unwrap_err() {
      CompileError::CodeGen { message } => message,
      other => panic!("expected a codegen error, got {other:?}"),
    }
  }

  #[test]
  fn renders_nested_calls() {
    let tree = program(vec![Node::statement(Node::call(
      "add",
      vec![
        Node::number("2"),
        Node::call("subtract", vec![Node::number("4"), Node::number("2")]),
      ],
    ))]);
    assert_eq!(render(&tree).unwrap(), "add(2, subtract(4, 2));");
  }

  #[test]
  fn renders_empty_argument_list() {
    let tree = program(vec![Node::statement(Node::call("foo", vec![]))]);
    assert_eq!(render(&tree).unwrap(), "foo();");
  }

  #[test]
  fn requotes_strings_without_escaping() {
    let tree = program(vec![Node::statement(Node::call(
      "say",
      vec![Node::string("a\\b")],
    ))]);
    assert_eq!(render(&tree).unwrap(), "say(\"a\\b\");");
  }

  #[test]
  fn separates_statements() {
    let tree = program(vec![
      Node::statement(Node::call("a", vec![])),
      Node::statement(Node::call("b", vec![])),
    ]);
    assert_eq!(render(&tree).unwrap(), "a();\nb();");
    let concatenated = Options {
      separator: Separator::Empty,
    };
    assert_eq!(generate(&tree, &concatenated).unwrap(), "a();b();");
  }

  #[test]
  fn empty_program_renders_nothing() {
    assert_eq!(render(&program(vec![])).unwrap(), "");
  }

  #[test]
  fn rejects_non_program_root() {
    let message = codegen_message(render(&Node::number("1")));
    assert_eq!(message, "unexpected NumberLiteral in the root");
  }

  #[test]
  fn rejects_bare_call_in_statement_position() {
    let tree = program(vec![Node::call("a", vec![])]);
    let message = codegen_message(render(&tree));
    assert_eq!(message, "unexpected CallExpression in statement position");
  }

  #[test]
  fn rejects_literal_statement() {
    let tree = program(vec![Node::statement(Node::number("1"))]);
    let message = codegen_message(render(&tree));
    assert_eq!(message, "unexpected NumberLiteral in an expression statement");
  }

  #[test]
  fn rejects_statement_as_argument() {
    let tree = program(vec![Node::statement(Node::call(
      "a",
      vec![Node::statement(Node::call("b", vec![]))],
    ))]);
    let message = codegen_message(render(&tree));
    assert_eq!(message, "unexpected ExpressionStatement in argument position");
  }

  #[test]
  fn rejects_non_identifier_callee() {
    let tree = program(vec![Node::statement(Node::CallExpression {
      callee: Box::new(Node::number("1")),
      arguments: vec![],
    })]);
    let message = codegen_message(render(&tree));
    assert_eq!(message, "unexpected NumberLiteral in callee position");
  }
}
