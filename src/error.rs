use std::error::Error;
use std::fmt;

/// Faults surfaced by the execution engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CpuError {
  /// The byte at `addr` is not a documented opcode. Nothing was executed.
  Decode { opcode: u8, addr: u16 },
  /// Interrupt vectors run from 0 to 7.
  InvalidVector(u8),
}

impl fmt::Display for CpuError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      CpuError::Decode { opcode, addr } => write!(
        f,
        "unrecognized opcode 0x{:02x} at 0x{:04x}",
        opcode, addr
      ),
      CpuError::InvalidVector(v) => {
        write!(f, "interrupt vector {} out of range (0-7)", v)
      }
    }
  }
}

impl Error for CpuError {}
