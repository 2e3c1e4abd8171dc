//! Run-time configuration of the machine.

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::bytecode::Operation;

/**
  The instruction set a program is written against. `Basic` is the minimal machine: it has no
  terminator, so a program ends when control runs past its last line. `Extended` adds
  comparison, conditional branching, and `exit`, and a program must contain an `exit` line.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
  Basic,
  Extended,
}

impl Default for Dialect {
  fn default() -> Self {
    Dialect::Extended
  }
}

impl Dialect {
  /// Whether a program must contain a line beginning with `exit` to be loaded.
  pub fn requires_terminator(&self) -> bool {
    match self {
      Dialect::Basic    => false,
      Dialect::Extended => true
    }
  }

  pub fn supports(&self, operation: Operation) -> bool {
    match self {
      Dialect::Basic    => !operation.is_extended(),
      Dialect::Extended => true
    }
  }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config {
  pub dialect : Dialect,
  /// Dump the machine state to the output before every step.
  pub trace   : bool,
}

impl Config {
  pub fn new(dialect: Dialect, trace: bool) -> Config {
    Config { dialect, trace }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn dialect_from_text(){
    assert_eq!(Dialect::from_str("basic"), Ok(Dialect::Basic));
    assert_eq!(Dialect::from_str("extended"), Ok(Dialect::Extended));
    assert!(Dialect::from_str("turbo").is_err());
    assert_eq!(Dialect::default().to_string(), "extended");
  }

  #[test]
  fn basic_excludes_branching(){
    assert!(Dialect::Basic.supports(Operation::Jump));
    assert!(!Dialect::Basic.supports(Operation::Je));
    assert!(!Dialect::Basic.supports(Operation::Cmp));
    assert!(!Dialect::Basic.supports(Operation::Exit));
    assert!(Dialect::Extended.supports(Operation::Exit));
  }

}
