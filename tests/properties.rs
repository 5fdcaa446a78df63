use minic::parser::{CallExpression, NumberLiteral, Param, Program, StringLiteral, parse};
use minic::tokenizer::tokenize;
use minic::transformer::{Node, transform};
use minic::compile;
use minic::walker::{Parent, Visitor, traverse};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
  "[a-zA-Z]{1,8}"
}

fn param() -> impl Strategy<Value = Param> {
  let leaf = prop_oneof![
    "[0-9]{1,24}".prop_map(Param::number),
    "[a-z0-9 (),@#]{0,8}".prop_map(Param::string),
  ];
  leaf.prop_recursive(4, 32, 5, |inner| {
    (name(), prop::collection::vec(inner, 0..5))
      .prop_map(|(name, params)| Param::call(name, params))
  })
}

fn call() -> impl Strategy<Value = CallExpression> {
  (name(), prop::collection::vec(param(), 0..5))
    .prop_map(|(name, params)| CallExpression::new(name, params))
}

fn program() -> impl Strategy<Value = Program> {
  prop::collection::vec(call(), 0..4).prop_map(|body| Program { body })
}

fn source_call(call: &CallExpression, out: &mut String) {
  out.push('(');
  out.push_str(&call.name);
  for param in &call.params {
    out.push(' ');
    match param {
      Param::Number(n) => out.push_str(&n.value),
      Param::String(s) => {
        out.push('"');
        out.push_str(&s.value);
        out.push('"');
      }
      Param::Call(c) => source_call(c, out),
    }
  }
  out.push(')');
}

fn source_text(program: &Program) -> String {
  let mut out = String::new();
  for call in &program.body {
    source_call(call, &mut out);
    out.push('\n');
  }
  out
}

fn expected_call(call: &CallExpression) -> String {
  let args: Vec<String> = call
    .params
    .iter()
    .map(|param| match param {
      Param::Number(n) => n.value.clone(),
      Param::String(s) => format!("\"{}\"", s.value),
      Param::Call(c) => expected_call(c),
    })
    .collect();
  format!("{}({})", call.name, args.join(", "))
}

/// Literal values in source order, collected with the walker.
#[derive(Default)]
struct SourceLiterals(Vec<String>);

impl<'ast> Visitor<'ast> for SourceLiterals {
  fn enter_number_literal(&mut self, literal: &'ast NumberLiteral, _: Parent<'ast>) {
    self.0.push(literal.value.clone());
  }

  fn enter_string_literal(&mut self, literal: &'ast StringLiteral, _: Parent<'ast>) {
    self.0.push(literal.value.clone());
  }
}

fn target_literals(node: &Node, out: &mut Vec<String>) {
  match node {
    Node::Program { body } => body.iter().for_each(|n| target_literals(n, out)),
    Node::ExpressionStatement { expression } => target_literals(expression, out),
    Node::CallExpression { arguments, .. } => {
      arguments.iter().for_each(|n| target_literals(n, out))
    }
    Node::NumberLiteral { value } | Node::StringLiteral { value } => out.push(value.clone()),
    Node::Identifier { .. } => {}
  }
}

/// True when an `ExpressionStatement` appears anywhere under a call.
fn has_nested_statement(node: &Node, inside_call: bool) -> bool {
  match node {
    Node::Program { body } => body.iter().any(|n| has_nested_statement(n, inside_call)),
    Node::ExpressionStatement { expression } => {
      inside_call || has_nested_statement(expression, inside_call)
    }
    Node::CallExpression { arguments, .. } => {
      arguments.iter().any(|n| has_nested_statement(n, true))
    }
    _ => false,
  }
}

proptest! {
  /// Well-formed programs compile to the expected call statements.
  #[test]
  fn compiles_well_formed_programs(program in program()) {
    let expected: Vec<String> = program
      .body
      .iter()
      .map(|call| format!("{};", expected_call(call)))
      .collect();
    prop_assert_eq!(compile(&source_text(&program)).unwrap(), expected.join("\n"));
  }

  /// Parsing the rendered source recovers the same tree.
  #[test]
  fn parser_recovers_tree(program in program()) {
    let source = source_text(&program);
    prop_assert_eq!(parse(tokenize(&source).unwrap(), &source).unwrap(), program);
  }

  /// Statement count, nesting and literal values survive the transform.
  #[test]
  fn transform_preserves_shape(program in program()) {
    let target = transform(&program);
    let Node::Program { body } = &target else {
      panic!("root must be a Program");
    };
    prop_assert_eq!(body.len(), program.body.len());
    prop_assert!(!has_nested_statement(&target, false));

    let mut source = SourceLiterals::default();
    traverse(&program, &mut source);
    let mut literals = Vec::new();
    target_literals(&target, &mut literals);
    prop_assert_eq!(literals, source.0);
  }

  /// Arbitrary input either compiles or fails cleanly.
  #[test]
  fn never_panics_on_arbitrary_input(source in "[()a-z0-9 \"@]{0,40}") {
    let _ = compile(&source);
  }
}
