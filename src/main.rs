use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use gb::{Config, Dialect, Error, Halt, Machine, Program};

/// Runs a program on the single-accumulator machine.
#[derive(Parser, Debug)]
#[command(name = "gb", version, about)]
struct Args {
  /// Program to execute, one instruction per line.
  #[arg(default_value = "demos/fibonacci.gb")]
  program: PathBuf,

  /// Instruction set: `basic`, or `extended` which adds cmp, je, and exit.
  #[arg(short, long, env = "GB_DIALECT", default_value_t = Dialect::Extended)]
  dialect: Dialect,

  /// Print the registers and memory before every step.
  #[arg(short, long, env = "GB_TRACE")]
  trace: bool,
}

fn run(args: &Args) -> Result<Halt, Error> {
  let program = Program::from_path(&args.program, args.dialect)?;
  let config  = Config::new(args.dialect, args.trace);

  let stdin       = io::stdin();
  let stdout      = io::stdout();
  let mut machine = Machine::new(config, stdin.lock(), stdout.lock());
  Ok(machine.run(&program)?)
}

fn main() {
  env_logger::init();
  let args = Args::parse();

  if let Err(e) = run(&args) {
    eprintln!("error: {}", e);
    process::exit(1);
  }
}
