use std::fmt;

use crate::cpu::{InterruptLine, Step, CPU};
use crate::error::CpuError;
use crate::mem::Memory;
use crate::port::{NullPorts, Ports};

/// Why [`Machine::run`] returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stop {
  /// HLT with interrupts disabled. Nothing can wake the CPU.
  Halted,
  /// HLT with interrupts enabled and no request pending.
  WaitingForInterrupt,
  /// The step limit was reached.
  StepLimit,
}

impl fmt::Display for Stop {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match *self {
      Stop::Halted => "halted",
      Stop::WaitingForInterrupt => "halted, waiting for interrupt",
      Stop::StepLimit => "step limit reached",
    };
    f.write_str(s)
  }
}

/// A CPU wired to 64K of memory and a port bus.
pub struct Machine<P: Ports = NullPorts> {
  pub cpu: CPU,
  pub mem: Memory,
  pub ports: P,
  steps: u64,
}

impl Machine<NullPorts> {
  /// Load `image` at `base` and point PC at it. No devices are attached.
  pub fn new(image: &[u8], base: u16) -> Machine<NullPorts> {
    Machine::with_ports(image, base, NullPorts)
  }
}

impl<P: Ports> Machine<P> {
  pub fn with_ports(image: &[u8], base: u16, ports: P) -> Machine<P> {
    let mut mem = Memory::new();
    mem.load_image(image, base);
    let mut cpu = CPU::new();
    cpu.regs.pc = base;
    Machine {
      cpu,
      mem,
      ports,
      steps: 0,
    }
  }

  /// Number of instructions executed so far. Accepted interrupts are not
  /// counted.
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn interrupt_line(&self) -> InterruptLine {
    self.cpu.interrupt_line()
  }

  pub fn step(&mut self) -> Result<Step, CpuError> {
    let step = self.cpu.step(&mut self.mem, &mut self.ports)?;
    if let Step::Executed(_) = step {
      self.steps += 1;
    }
    Ok(step)
  }

  /// Step until the CPU halts for good, sleeps waiting for an interrupt, or
  /// `limit` instructions have run in total.
  pub fn run(&mut self, limit: Option<u64>) -> Result<Stop, CpuError> {
    loop {
      if let Some(limit) = limit {
        if self.steps >= limit {
          info!("stopping after {} steps", self.steps);
          return Ok(Stop::StepLimit);
        }
      }
      if self.cpu.halt {
        if !self.cpu.inte {
          info!("halted at 0x{:04x}", self.cpu.regs.pc);
          return Ok(Stop::Halted);
        }
        if self.cpu.pending_interrupt().is_none() {
          info!("waiting for interrupt at 0x{:04x}", self.cpu.regs.pc);
          return Ok(Stop::WaitingForInterrupt);
        }
      }

      self.step()?;
    }
  }
}
