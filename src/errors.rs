//! Errors raised while loading, decoding, and executing programs. None of them are recoverable
//! from inside the machine: each one ends the run, and the caller decides how to report it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::address::Value;
use crate::bytecode::Operation;

/// Failures of the program loader.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("could not read program {path}: {source}")]
  Unreadable {
    path   : PathBuf,
    source : io::Error
  },
  #[error("program is empty")]
  Empty,
  #[error("program must have an exit command")]
  MissingExit,
}

/// A line that does not decode to an instruction.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DecodeError {
  #[error("unknown command: {0}")]
  UnknownOperation(String),
  #[error("{operation} requires {expected} operand(s) but was given {given}")]
  WrongArity {
    operation : Operation,
    expected  : usize,
    given     : usize
  },
  #[error("invalid number: {0:?}")]
  InvalidNumber(String),
  #[error("unknown addressing mode: {0}")]
  UnknownMode(String),
  #[error("{operation} does not accept operand {operand}")]
  UnsupportedMode {
    operation : Operation,
    operand   : String
  },
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum BoundsError {
  #[error("jump point out of bounds: {target} (program has {length} lines)")]
  JumpTarget {
    target : Value,
    length : usize
  },
  #[error("memory address out of bounds: {0}")]
  Memory(Value),
}

/// Failures of the `read` instruction.
#[derive(Debug, Error)]
pub enum InputError {
  #[error("end of input")]
  EndOfInput,
  #[error("invalid input: {0:?}")]
  InvalidInput(String),
  #[error("error reading input: {0}")]
  Io(#[from] io::Error),
}

/**
  An error raised while executing a program. Every variant but `Output` carries the program
  counter and text of the line being executed, so the message names the offending instruction.
*/
#[derive(Debug, Error)]
pub enum ExecError {
  #[error("line {} `{text}`: {source}", .line + 1)]
  Decode {
    line   : usize,
    text   : String,
    source : DecodeError
  },
  #[error("line {} `{text}`: {source}", .line + 1)]
  Bounds {
    line   : usize,
    text   : String,
    source : BoundsError
  },
  #[error("line {} `{text}`: {source}", .line + 1)]
  Input {
    line   : usize,
    text   : String,
    source : InputError
  },
  #[error("error writing output: {0}")]
  Output(#[from] io::Error),
}

impl ExecError {
  /// The 0-based program counter of the failing line, if the error is tied to one.
  pub fn line(&self) -> Option<usize> {
    match self {
      | ExecError::Decode { line, .. }
      | ExecError::Bounds { line, .. }
      | ExecError::Input  { line, .. } => Some(*line),
      ExecError::Output(_)             => None
    }
  }
}

/// Anything that can end a run of the `gb` binary.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Load(#[from] LoadError),
  #[error(transparent)]
  Exec(#[from] ExecError),
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_offending_line(){
    let error = ExecError::Bounds {
      line   : 4,
      text   : "load @99".to_string(),
      source : BoundsError::Memory(99)
    };
    assert_eq!(error.line(), Some(4));
    assert_eq!(
      error.to_string(),
      "line 5 `load @99`: memory address out of bounds: 99"
    );
  }

  #[test]
  fn arity_message(){
    let error = DecodeError::WrongArity { operation: Operation::Cmp, expected: 2, given: 1 };
    assert_eq!(error.to_string(), "cmp requires 2 operand(s) but was given 1");
  }

  #[test]
  fn load_errors_convert(){
    let error: Error = LoadError::MissingExit.into();
    assert_eq!(error.to_string(), "program must have an exit command");
  }

}
