//! `minic` command-line driver.
//!
//! Compiles the expression given as the first argument, or standard input when
//! no argument is given, and prints the requested pipeline stage.

use std::io::{self, Read};
use std::process;

use clap::{Parser, ValueEnum};
use minic::error::EmitSnafu;
use minic::{CompileResult, Options, Separator, parser, tokenizer, transformer};
use serde::Serialize;
use snafu::ResultExt;

#[derive(Debug, Parser)]
#[command(name = "minic")]
#[command(about = "Compile s-expression calls into C-like call statements", long_about = None)]
struct Cli {
  /// Source expression; read from standard input when omitted
  expr: Option<String>,

  /// Pipeline stage to print
  #[arg(long, value_enum, default_value_t = Emit::Code)]
  emit: Emit,

  /// Text placed between top-level statements
  #[arg(long, value_enum, default_value_t = SeparatorArg::Newline)]
  separator: SeparatorArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
  /// Token stream as JSON
  Tokens,
  /// Source AST as JSON
  Ast,
  /// Target AST as JSON
  Target,
  /// Generated code
  Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeparatorArg {
  Newline,
  None,
}

impl From<SeparatorArg> for Separator {
  fn from(arg: SeparatorArg) -> Self {
    match arg {
      SeparatorArg::Newline => Separator::Newline,
      SeparatorArg::None => Separator::Empty,
    }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into()),
    )
    .init();

  let cli = Cli::parse();

  let source = match read_source(cli.expr, io::stdin()) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("failed to read standard input: {err}");
      process::exit(1);
    }
  };

  let options = Options {
    separator: cli.separator.into(),
  };

  match run(&source, cli.emit, &options) {
    Ok(output) => println!("{output}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}

/// Use the argument when given, otherwise drain `input`.
fn read_source(expr: Option<String>, input: impl Read) -> io::Result<String> {
  match expr {
    Some(expr) => Ok(expr),
    None => io::read_to_string(input),
  }
}

/// Run the pipeline up to `emit` and render that stage.
fn run(source: &str, emit: Emit, options: &Options) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(source)?;
  if emit == Emit::Tokens {
    return to_json(&tokens, "tokens");
  }

  let program = parser::parse(tokens, source)?;
  if emit == Emit::Ast {
    return to_json(&program, "source AST");
  }

  let target = transformer::transform(&program);
  if emit == Emit::Target {
    return to_json(&target, "target AST");
  }

  minic::generate(&target, options)
}

fn to_json(value: &impl Serialize, stage: &str) -> CompileResult<String> {
  serde_json::to_string_pretty(value).context(EmitSnafu { stage })
}
