//! The execution engine: machine state and the fetch-decode-execute loop.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

use log::{debug, info, warn};
use prettytable::{format as TableFormat, Cell, Row, Table};

use crate::address::{Destination, Operand, Value};
use crate::bytecode::{decode, is_comment, Instruction};
use crate::config::Config;
use crate::errors::{BoundsError, ExecError, InputError};
use crate::memory::Memory;
use crate::program::Program;

/// How a run ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Halt {
  /// An `exit` instruction executed.
  Exit,
  /// The program counter moved past the last line.
  EndOfProgram,
}

/// The outcome of a single step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
  Continue,
  Halt(Halt),
}

/// Registers and memory. A fresh `State` is all zeros.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct State {
  pub accumulator : Value,
  pub index       : Value,
  pub pc          : usize,
  pub memory      : Memory,
}

impl State {

  /// Resolves an operand to the value it denotes. `i` reads `MEM[IDX]`.
  pub fn resolve(&self, operand: &Operand) -> Result<Value, BoundsError> {
    match operand {
      Operand::Immediate(n) => Ok(*n),
      Operand::Memory(a)    => self.memory.read(*a),
      Operand::Indexed      => self.memory.read(self.index)
    }
  }

  pub fn store(&mut self, destination: &Destination) -> Result<(), BoundsError> {
    let address = match destination {
      Destination::Memory(a) => *a,
      Destination::Indexed   => self.index
    };
    self.memory.write(address, self.accumulator)
  }

  // region Display methods

  fn make_register_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);
    table.add_row(row![r->"ACC =", self.accumulator]);
    table.add_row(row![r->"IDX =", self.index]);
    table.add_row(row![r->"PC =",  self.pc]);
    table
  }

  /// Memory as a grid of `MEMORY_COLUMNS` cells per row. The cell `MEM[IDX]` is starred.
  fn make_memory_table(&self) -> Table {
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);

    let mut titles = vec![Cell::new("Address").style_spec("ubr")];
    titles.extend((0..MEMORY_COLUMNS).map(|c| Cell::new(&format!("+{}", c)).style_spec("ubr")));
    table.set_titles(Row::new(titles));

    for (r, chunk) in self.memory.cells().chunks(MEMORY_COLUMNS).enumerate() {
      let start     = r * MEMORY_COLUMNS;
      let mut cells = vec![Cell::new(&format!("M[{}] =", start)).style_spec("r")];

      for (c, value) in chunk.iter().enumerate() {
        let text =
          match (start + c) as Value == self.index {
            true  => format!("*{}", value),
            false => format!("{}", value)
          };
        cells.push(Cell::new(&text).style_spec("r"));
      }
      table.add_row(Row::new(cells));
    }
    table
  }

  // endregion

}

const MEMORY_COLUMNS: usize = 8;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let register_table = self.make_register_table();
    let memory_table   = self.make_memory_table();

    let mut combined_table = table!([register_table, memory_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "{}", combined_table)
  }
}

/**
  The execution engine. A `Machine` exclusively owns its `State` and talks to the outside world
  only through `input`, read by the `read` instruction, and `output`, which receives the values
  of `write` and, when tracing, a dump of the state before every step.
*/
#[derive(Debug)]
pub struct Machine<R, W> {
  config : Config,
  state  : State,
  input  : R,
  output : W,
  steps  : u64,
}

impl<R: BufRead, W: Write> Machine<R, W> {

  pub fn new(config: Config, input: R, output: W) -> Machine<R, W> {
    Machine {
      config,
      state : State::default(),
      input,
      output,
      steps : 0
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn output(&self) -> &W {
    &self.output
  }

  pub fn into_output(self) -> W {
    self.output
  }

  /// The number of steps taken since the last reset, comment lines included.
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn reset(&mut self) {
    self.state = State::default();
    self.steps = 0;
  }

  /// Runs `program` from a fresh state until it halts or fails.
  pub fn run(&mut self, program: &Program) -> Result<Halt, ExecError> {
    self.reset();

    let halt = loop {
      if let Step::Halt(halt) = self.step(program)? {
        break halt;
      }
    };

    self.output.flush()?;
    info!("halted ({:?}) after {} steps", halt, self.steps);
    Ok(halt)
  }

  /**
    Executes the line at the program counter. A program counter at or past the end of the
    program halts the machine; the bounds check on jump targets admits exactly `program.len()`
    as a target, and landing there is how a program without `exit` finishes.
  */
  pub fn step(&mut self, program: &Program) -> Result<Step, ExecError> {
    let pc   = self.state.pc;
    let line = match program.line(pc) {
      Some(line) => line,
      None       => {
        if self.config.dialect.requires_terminator() {
          warn!("program ran past its last line at {} without reaching exit", pc);
        }
        return Ok(Step::Halt(Halt::EndOfProgram));
      }
    };

    if self.config.trace {
      writeln!(self.output, "{}", self.state)?;
    }
    self.steps += 1;

    // Comment lines still advance the program counter.
    if is_comment(line) {
      self.state.pc += 1;
      return Ok(Step::Continue);
    }

    let instruction = decode(line, self.config.dialect).map_err(|source| ExecError::Decode {
      line : pc,
      text : line.to_string(),
      source
    })?;
    debug!("{:>4}: {}", pc, instruction);

    self.execute(&instruction, program.len()).map_err(|e| e.at(pc, line))
  }

  fn execute(&mut self, instruction: &Instruction, length: usize) -> Result<Step, Fault> {
    let state = &mut self.state;

    match instruction {
      Instruction::Inc => state.index = state.index.wrapping_add(1),
      Instruction::Dec => state.index = state.index.wrapping_sub(1),

      Instruction::Load(operand) => state.accumulator = state.resolve(operand)?,
      Instruction::Add(operand)  => {
        state.accumulator = state.accumulator.wrapping_add(state.resolve(operand)?)
      }
      Instruction::Store(destination) => state.store(destination)?,

      Instruction::Cmp(a, b) => {
        let a = state.resolve(a)?;
        let b = state.resolve(b)?;
        state.accumulator =
          match a.cmp(&b) {
            Ordering::Equal   => 0,
            Ordering::Greater => 1,
            Ordering::Less    => -1
          };
      }

      Instruction::Jump(target) => {
        state.pc = jump_target(*target, length)?;
        return Ok(Step::Continue);
      }
      Instruction::Je(target) => {
        if state.accumulator == 0 {
          state.pc = jump_target(*target, length)?;
          return Ok(Step::Continue);
        }
      }

      Instruction::Read  => state.accumulator = read_value(&mut self.input)?,
      Instruction::Write => writeln!(self.output, "{}", state.accumulator)?,

      Instruction::Exit  => return Ok(Step::Halt(Halt::Exit)),
    }

    state.pc += 1;
    Ok(Step::Continue)
  }

}

/// An error raised by an instruction, before it is tied to the line that raised it.
enum Fault {
  Bounds(BoundsError),
  Input(InputError),
  Output(std::io::Error),
}

impl Fault {
  fn at(self, line: usize, text: &str) -> ExecError {
    let text = text.to_string();
    match self {
      Fault::Bounds(source) => ExecError::Bounds { line, text, source },
      Fault::Input(source)  => ExecError::Input  { line, text, source },
      Fault::Output(e)      => ExecError::Output(e)
    }
  }
}

impl From<BoundsError> for Fault {
  fn from(e: BoundsError) -> Self {
    Fault::Bounds(e)
  }
}

impl From<InputError> for Fault {
  fn from(e: InputError) -> Self {
    Fault::Input(e)
  }
}

impl From<std::io::Error> for Fault {
  fn from(e: std::io::Error) -> Self {
    Fault::Output(e)
  }
}

/// Targets may be any line of the program or one past the last line.
fn jump_target(target: Value, length: usize) -> Result<usize, BoundsError> {
  match target >= 0 && target as u64 <= length as u64 {
    true  => Ok(target as usize),
    false => Err(BoundsError::JumpTarget { target, length })
  }
}

fn read_value<R: BufRead>(input: &mut R) -> Result<Value, InputError> {
  let mut buffer = String::new();
  if input.read_line(&mut buffer)? == 0 {
    return Err(InputError::EndOfInput);
  }
  let text = buffer.trim();
  text.parse::<Value>().map_err(|_e| InputError::InvalidInput(text.to_string()))
}
