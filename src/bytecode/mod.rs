/*!

  Instructions of the machine. A program is stored as text, one instruction per line, and a line
  is decoded into an `Instruction` only when the program counter reaches it. The textual form is
  an opcode followed by whitespace-separated operands:

    inc                 IDX += 1
    dec                 IDX -= 1
    load  @N | #N | i   ACC  = operand
    store @N | i        cell = ACC
    add   @N | #N | i   ACC += operand
    jump  N             PC   = N
    je    N             PC   = N if ACC == 0
    cmp   A B           ACC  = sign(A - B)
    read                ACC  = next line of input
    write               print ACC
    exit                halt

  Operands use the addressing modes of `crate::address`. `cmp`, `je`, and `exit` belong to the
  extended dialect only.

*/

mod assembly;

pub use assembly::{decode, is_comment, parse_number, parse_operand};

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

use crate::address::{Destination, Operand, Value};

/// Opcodes of the virtual machine, spelled in source the way `Display` prints them.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq, PartialEq,  Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
  // Nullary //
  Inc,
  Dec,
  Read,
  Write,
  Exit,

  // Unary //
  Load,
  Store,
  Add,
  Jump,
  Je,

  // Binary //
  Cmp,
}

impl Operation {
  /// The number of operand tokens the opcode takes.
  pub fn arity(&self) -> usize {
    match self {
      | Operation::Inc
      | Operation::Dec
      | Operation::Read
      | Operation::Write
      | Operation::Exit  => 0,

      | Operation::Load
      | Operation::Store
      | Operation::Add
      | Operation::Jump
      | Operation::Je    => 1,

      Operation::Cmp     => 2
    }
  }

  /// Opcodes only available in `Dialect::Extended`.
  pub fn is_extended(&self) -> bool {
    matches!(self, Operation::Cmp | Operation::Je | Operation::Exit)
  }
}

/// A decoded line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  Inc,
  Dec,
  Load(Operand),
  Store(Destination),
  Add(Operand),
  Jump(Value),
  Je(Value),
  Cmp(Operand, Operand),
  Read,
  Write,
  Exit,
}

impl Instruction {
  pub fn operation(&self) -> Operation {
    match self {
      Instruction::Inc       => Operation::Inc,
      Instruction::Dec       => Operation::Dec,
      Instruction::Load(_)   => Operation::Load,
      Instruction::Store(_)  => Operation::Store,
      Instruction::Add(_)    => Operation::Add,
      Instruction::Jump(_)   => Operation::Jump,
      Instruction::Je(_)     => Operation::Je,
      Instruction::Cmp(_, _) => Operation::Cmp,
      Instruction::Read      => Operation::Read,
      Instruction::Write     => Operation::Write,
      Instruction::Exit      => Operation::Exit,
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let opcode = self.operation();
    match self {
      | Instruction::Load(operand)
      | Instruction::Add(operand)      => write!(f, "{} {}", opcode, operand),
      Instruction::Store(destination) => write!(f, "{} {}", opcode, destination),
      | Instruction::Jump(target)
      | Instruction::Je(target)        => write!(f, "{} {}", opcode, target),
      Instruction::Cmp(a, b)          => write!(f, "{} {} {}", opcode, a, b),
      _                               => write!(f, "{}", opcode)
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn opcode_text_round_trip(){
    for operation in Operation::iter() {
      let text: &'static str = operation.into();
      assert_eq!(Operation::from_str(text), Ok(operation));
    }
    assert_eq!(Operation::Je.to_string(), "je");
    assert!(Operation::from_str("Load").is_err());
  }

  #[test]
  fn arity_agrees_with_display(){
    let instructions = [
      Instruction::Inc,
      Instruction::Load(Operand::Immediate(5)),
      Instruction::Store(Destination::Indexed),
      Instruction::Je(3),
      Instruction::Cmp(Operand::Memory(1), Operand::Indexed),
    ];
    for instruction in instructions.iter() {
      let text   = instruction.to_string();
      let tokens = text.split_whitespace().count();
      assert_eq!(tokens - 1, instruction.operation().arity(), "{}", text);
    }
  }

}
