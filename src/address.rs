//! Addressing modes of instruction operands. An operand either names a value to read
//! (`Operand`) or a memory cell to write (`Destination`).

use std::fmt::{Display, Formatter};

/// The machine word. Registers, memory cells, literals, and jump targets are all `Value`s.
pub type Value = i64;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
  /// `#N`, the literal integer `N`.
  Immediate(Value),
  /// `@N`, the contents of `MEM[N]`.
  Memory(Value),
  /// `i`, the contents of `MEM[IDX]`. Note that this is the memory cell the index register
  /// points to, not the index register itself.
  Indexed,
}

/// The cell written by `store`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Destination {
  /// `@N`, the cell `MEM[N]`.
  Memory(Value),
  /// `i`, the cell `MEM[IDX]`.
  Indexed,
}

impl Operand {
  /// Converts the operand to a destination. Immediates cannot be written to.
  pub fn destination(&self) -> Option<Destination> {
    match self {
      Operand::Immediate(_) => None,
      Operand::Memory(a)    => Some(Destination::Memory(*a)),
      Operand::Indexed      => Some(Destination::Indexed)
    }
  }
}

impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Immediate(n) => write!(f, "#{}", n),
      Operand::Memory(a)    => write!(f, "@{}", a),
      Operand::Indexed      => write!(f, "i")
    }
  }
}

impl Display for Destination {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Destination::Memory(a) => write!(f, "@{}", a),
      Destination::Indexed   => write!(f, "i")
    }
  }
}
