//! The machine's memory bank: a fixed number of cells, all initially zero. Addresses are checked
//! on every access; an address outside the bank is a `BoundsError`, never a wrap or a resize.

use std::fmt::{Display, Formatter};

use crate::address::Value;
use crate::errors::BoundsError;

pub const MEMORY_SIZE: usize = 64;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Memory {
  cells: [Value; MEMORY_SIZE],
}

impl Default for Memory {
  fn default() -> Self {
    Memory { cells: [0; MEMORY_SIZE] }
  }
}

impl Memory {

  fn index(address: Value) -> Result<usize, BoundsError> {
    match address >= 0 && (address as u64) < MEMORY_SIZE as u64 {
      true  => Ok(address as usize),
      false => Err(BoundsError::Memory(address))
    }
  }

  pub fn read(&self, address: Value) -> Result<Value, BoundsError> {
    Ok(self.cells[Memory::index(address)?])
  }

  pub fn write(&mut self, address: Value, value: Value) -> Result<(), BoundsError> {
    self.cells[Memory::index(address)?] = value;
    Ok(())
  }

  pub fn cells(&self) -> &[Value] {
    &self.cells
  }

}

impl Display for Memory {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "[{}]",
      self.cells
          .iter()
          .map(Value::to_string)
          .collect::<Vec<String>>()
          .join(" ")
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_zeroed(){
    let memory = Memory::default();
    assert_eq!(memory.cells().len(), MEMORY_SIZE);
    assert!(memory.cells().iter().all(|c| *c == 0));
  }

  #[test]
  fn read_back_write(){
    let mut memory = Memory::default();
    memory.write(0, 7).unwrap();
    memory.write(63, -2).unwrap();
    assert_eq!(memory.read(0), Ok(7));
    assert_eq!(memory.read(63), Ok(-2));
    assert_eq!(memory.read(1), Ok(0));
  }

  #[test]
  fn out_of_range(){
    let mut memory = Memory::default();
    assert_eq!(memory.read(64), Err(BoundsError::Memory(64)));
    assert_eq!(memory.read(-1), Err(BoundsError::Memory(-1)));
    assert_eq!(memory.write(100, 1), Err(BoundsError::Memory(100)));
    assert_eq!(memory, Memory::default());
  }

}
