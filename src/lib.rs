#[macro_use]
extern crate log;

pub mod cpu;
pub mod error;
pub mod machine;
pub mod mem;
pub mod port;

pub use crate::cpu::{Instruction, InterruptLine, Registers, Step, CPU};
pub use crate::error::CpuError;
pub use crate::machine::{Machine, Stop};
pub use crate::mem::Memory;
pub use crate::port::{NullPorts, Ports};
