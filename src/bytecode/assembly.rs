/*!
  Decoding of the textual form of instructions. A line is split on whitespace; the first token
  names the operation via the `strum` derives of `Operation`, and the remaining tokens are
  parsed with `nom` into operands of the matching addressing mode.
*/

use std::str::FromStr;

use nom::{
  branch::alt,
  character::complete::{char as one_char, digit1, one_of},
  combinator::{all_consuming, map_res, opt, recognize, value},
  sequence::pair,
  IResult
};

use crate::address::{Operand, Value};
use crate::bytecode::{Instruction, Operation};
use crate::config::Dialect;
use crate::errors::DecodeError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mode {
  Memory,
  Immediate,
  Indexed
}

// The sigil of an operand token. `i` must be the whole token.
fn mode_p(token: &str) -> IResult<&str, Mode> {
  alt((
    value(Mode::Memory,    one_char('@')),
    value(Mode::Immediate, one_char('#')),
    value(Mode::Indexed,   all_consuming(one_char('i'))),
  ))(token)
}

// A base 10 integer with an optional sign, and nothing after it.
fn number_p(text: &str) -> IResult<&str, Value> {
  all_consuming(
    map_res(
      recognize(pair(opt(one_of("+-")), digit1)),
      str::parse::<Value>
    )
  )(text)
}

/// A line whose first character is `#` is a comment for its entire length.
pub fn is_comment(line: &str) -> bool {
  line.starts_with('#')
}

/// Parses a signed integer such as a jump target. Fails on overflow as well as on junk.
pub fn parse_number(text: &str) -> Result<Value, DecodeError> {
  match number_p(text) {
    Ok((_rest, number)) => Ok(number),
    Err(_e)             => Err(DecodeError::InvalidNumber(text.to_string()))
  }
}

/// Parses an operand token: `@N`, `#N`, or `i`.
pub fn parse_operand(token: &str) -> Result<Operand, DecodeError> {
  let (rest, mode) =
    mode_p(token).map_err(|_e| DecodeError::UnknownMode(token.to_string()))?;

  match mode {
    Mode::Memory    => Ok(Operand::Memory(parse_number(rest)?)),
    Mode::Immediate => Ok(Operand::Immediate(parse_number(rest)?)),
    Mode::Indexed   => Ok(Operand::Indexed)
  }
}

/**
  Decodes a single line of source into an instruction. Opcodes outside of `dialect` are reported
  as unknown, as is the empty opcode of a blank line. Comment lines are not instructions; callers
  filter them out first.
*/
pub fn decode(line: &str, dialect: Dialect) -> Result<Instruction, DecodeError> {
  let mut tokens = line.split_whitespace();
  let name       = tokens.next().unwrap_or_default();
  let operands   = tokens.collect::<Vec<&str>>();

  let operation =
    match Operation::from_str(name) {
      Ok(operation) if dialect.supports(operation) => operation,
      _ => return Err(DecodeError::UnknownOperation(name.to_string()))
    };

  if operands.len() != operation.arity() {
    return Err(DecodeError::WrongArity {
      operation,
      expected : operation.arity(),
      given    : operands.len()
    });
  }

  let instruction =
    match operation {
      Operation::Inc   => Instruction::Inc,
      Operation::Dec   => Instruction::Dec,
      Operation::Read  => Instruction::Read,
      Operation::Write => Instruction::Write,
      Operation::Exit  => Instruction::Exit,

      Operation::Load  => Instruction::Load(parse_operand(operands[0])?),
      Operation::Add   => Instruction::Add(parse_operand(operands[0])?),
      Operation::Store => {
        let destination = parse_operand(operands[0])?.destination();
        match destination {
          Some(destination) => Instruction::Store(destination),
          None => return Err(DecodeError::UnsupportedMode {
            operation,
            operand: operands[0].to_string()
          })
        }
      }
      Operation::Jump  => Instruction::Jump(parse_number(operands[0])?),
      Operation::Je    => Instruction::Je(parse_number(operands[0])?),

      Operation::Cmp   => Instruction::Cmp(
        parse_operand(operands[0])?,
        parse_operand(operands[1])?
      ),
    };

  Ok(instruction)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::address::Destination;

  fn extended(line: &str) -> Result<Instruction, DecodeError> {
    decode(line, Dialect::Extended)
  }

  #[test]
  fn operands(){
    assert_eq!(parse_operand("@12"), Ok(Operand::Memory(12)));
    assert_eq!(parse_operand("#-3"), Ok(Operand::Immediate(-3)));
    assert_eq!(parse_operand("#+3"), Ok(Operand::Immediate(3)));
    assert_eq!(parse_operand("i"), Ok(Operand::Indexed));
  }

  #[test]
  fn malformed_operands(){
    assert_eq!(parse_operand("%4"), Err(DecodeError::UnknownMode("%4".to_string())));
    assert_eq!(parse_operand("ix"), Err(DecodeError::UnknownMode("ix".to_string())));
    assert_eq!(parse_operand("5"), Err(DecodeError::UnknownMode("5".to_string())));
    assert_eq!(parse_operand("@x1"), Err(DecodeError::InvalidNumber("x1".to_string())));
    assert_eq!(parse_operand("#"), Err(DecodeError::InvalidNumber("".to_string())));
    assert_eq!(parse_operand("#4a"), Err(DecodeError::InvalidNumber("4a".to_string())));
  }

  #[test]
  fn numbers(){
    assert_eq!(parse_number("17"), Ok(17));
    assert_eq!(parse_number("-1"), Ok(-1));
    assert!(parse_number("99999999999999999999").is_err());
    assert!(parse_number("").is_err());
    assert!(parse_number("1.5").is_err());
  }

  #[test]
  fn decode_every_operation(){
    assert_eq!(extended("inc"), Ok(Instruction::Inc));
    assert_eq!(extended("dec"), Ok(Instruction::Dec));
    assert_eq!(extended("load #5"), Ok(Instruction::Load(Operand::Immediate(5))));
    assert_eq!(extended("store @3"), Ok(Instruction::Store(Destination::Memory(3))));
    assert_eq!(extended("store i"), Ok(Instruction::Store(Destination::Indexed)));
    assert_eq!(extended("add i"), Ok(Instruction::Add(Operand::Indexed)));
    assert_eq!(extended("jump 0"), Ok(Instruction::Jump(0)));
    assert_eq!(extended("je 4"), Ok(Instruction::Je(4)));
    assert_eq!(
      extended("cmp @1 #2"),
      Ok(Instruction::Cmp(Operand::Memory(1), Operand::Immediate(2)))
    );
    assert_eq!(extended("read"), Ok(Instruction::Read));
    assert_eq!(extended("write"), Ok(Instruction::Write));
    assert_eq!(extended("exit"), Ok(Instruction::Exit));
  }

  #[test]
  fn extra_whitespace_is_ignored(){
    assert_eq!(extended("  load\t  @7  "), Ok(Instruction::Load(Operand::Memory(7))));
  }

  #[test]
  fn wrong_arity(){
    assert_eq!(
      extended("load"),
      Err(DecodeError::WrongArity { operation: Operation::Load, expected: 1, given: 0 })
    );
    assert_eq!(
      extended("cmp #1"),
      Err(DecodeError::WrongArity { operation: Operation::Cmp, expected: 2, given: 1 })
    );
    assert_eq!(
      extended("write #1"),
      Err(DecodeError::WrongArity { operation: Operation::Write, expected: 0, given: 1 })
    );
  }

  #[test]
  fn store_rejects_immediates(){
    assert_eq!(
      extended("store #5"),
      Err(DecodeError::UnsupportedMode { operation: Operation::Store, operand: "#5".to_string() })
    );
  }

  #[test]
  fn jump_targets_are_bare_integers(){
    assert_eq!(extended("jump @3"), Err(DecodeError::InvalidNumber("@3".to_string())));
    assert_eq!(extended("je -2"), Ok(Instruction::Je(-2)));
  }

  #[test]
  fn unknown_operations(){
    assert_eq!(extended("mul #2"), Err(DecodeError::UnknownOperation("mul".to_string())));
    assert_eq!(extended("LOAD #2"), Err(DecodeError::UnknownOperation("LOAD".to_string())));
    assert_eq!(
      decode("cmp #1 #2", Dialect::Basic),
      Err(DecodeError::UnknownOperation("cmp".to_string()))
    );
    assert_eq!(decode("exit", Dialect::Basic), Err(DecodeError::UnknownOperation("exit".to_string())));
  }

  #[test]
  fn comments(){
    assert!(is_comment("# a comment"));
    assert!(is_comment("#5"));
    assert!(!is_comment(" # indented"));
    assert!(!is_comment(""));
  }

  #[test]
  fn blank_lines_are_unknown_commands(){
    assert_eq!(extended(""), Err(DecodeError::UnknownOperation("".to_string())));
    assert_eq!(extended(" \t"), Err(DecodeError::UnknownOperation("".to_string())));
  }

}
