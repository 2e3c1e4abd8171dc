/*!

  A minimal single-accumulator virtual machine. Programs are plain text, one instruction per
  line, and are executed against an accumulator, an index register, a program counter, and a
  bank of 64 memory cells. See `bytecode` for the instruction set.

  ```
  use std::io;
  use gb::{Config, Dialect, Halt, Machine, Program};

  let program = Program::parse("load #5\nwrite\nexit", Dialect::Extended).unwrap();
  let mut machine = Machine::new(Config::default(), io::empty(), Vec::<u8>::new());

  assert_eq!(machine.run(&program).unwrap(), Halt::Exit);
  assert_eq!(machine.into_output(), b"5\n");
  ```

*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod config;
pub mod errors;
pub mod machine;
pub mod memory;
pub mod program;

pub use address::{Destination, Operand, Value};
pub use bytecode::{Instruction, Operation};
pub use config::{Config, Dialect};
pub use errors::{BoundsError, DecodeError, Error, ExecError, InputError, LoadError};
pub use machine::{Halt, Machine, State, Step};
pub use memory::{Memory, MEMORY_SIZE};
pub use program::Program;
