//! The program loader. A `Program` is the source text split into lines, kept verbatim. Nothing
//! about a line is checked here except, for dialects with a terminator, that some line starts
//! with `exit`; every other problem surfaces when the line is decoded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::bytecode::Operation;
use crate::config::Dialect;
use crate::errors::LoadError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Program {
  lines: Vec<String>,
}

impl Program {

  pub fn from_path<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let unreadable = |source| LoadError::Unreadable { path: path.to_path_buf(), source };

    let file    = File::open(path).map_err(unreadable)?;
    let program = Program::read_lines(BufReader::new(file)).map_err(unreadable)?;
    info!("reading program from {}", path.display());
    program.validate(dialect)
  }

  pub fn from_reader<R: BufRead>(reader: R, dialect: Dialect) -> Result<Program, LoadError> {
    let program = Program::read_lines(reader).map_err(|source| LoadError::Unreadable {
      path: "<reader>".into(),
      source
    })?;
    program.validate(dialect)
  }

  pub fn parse(text: &str, dialect: Dialect) -> Result<Program, LoadError> {
    let lines =
      text.lines()
          .map(String::from)
          .collect();
    Program { lines }.validate(dialect)
  }

  fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Program> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    Ok(Program { lines })
  }

  fn validate(self, dialect: Dialect) -> Result<Program, LoadError> {
    if self.lines.is_empty() {
      return Err(LoadError::Empty);
    }

    let terminator: &'static str = Operation::Exit.into();
    if dialect.requires_terminator() && !self.lines.iter().any(|l| l.starts_with(terminator)) {
      return Err(LoadError::MissingExit);
    }

    info!("loaded {} lines", self.len());
    Ok(self)
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn line(&self, index: usize) -> Option<&str> {
    self.lines.get(index).map(String::as_str)
  }

  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.lines.iter().map(String::as_str)
  }

}
