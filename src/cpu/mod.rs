pub mod alu;
mod cpu;
pub mod decode;
mod int;
pub mod reg;

pub use self::cpu::Step;
pub use self::decode::{decode, Cond, Instruction, Operand, Pair, Reg};
pub use self::int::InterruptLine;

pub struct CPU {
  pub regs: Registers,

  /// Interrupt enable flip-flop.
  pub inte: bool,
  pub halt: bool,

  /// Single-slot interrupt mailbox shared with the host.
  int_line: InterruptLine,
}


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Registers {
  /// Accumulator and general-purpose registers.
  pub a: u8,
  pub b: u8,
  pub c: u8,
  pub d: u8,
  pub e: u8,
  pub f: u8, // Flag register.
  pub h: u8,
  pub l: u8,

  /// Program counter.
  pub pc: u16,

  /// Stack pointer.
  pub sp: u16,
}
