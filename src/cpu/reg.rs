use std::fmt;

use crate::cpu::Registers;

pub const S: u8 = 0x80;
pub const Z: u8 = 0x40;
pub const AC: u8 = 0x10;
pub const P: u8 = 0x04;
pub const CY: u8 = 0x01;

/// Bit 1 of the flag byte always reads back as 1.
pub const FIXED: u8 = 0x02;
/// Bits 3 and 5 always read back as 0.
pub const DEFINED: u8 = S | Z | AC | P | CY;

impl Registers {
  pub fn new() -> Registers {
    Registers {
      a: 0,
      f: FIXED,
      b: 0,
      c: 0,
      d: 0,
      e: 0,
      h: 0,
      l: 0,

      sp: 0,
      pc: 0,
    }
  }

  /// Accumulator and flags as pushed by `PUSH PSW`.
  pub fn psw(&self) -> u16 {
    (u16::from(self.a) << 8) | u16::from(self.f)
  }
  pub fn bc(&self) -> u16 {
    (u16::from(self.b) << 8) | u16::from(self.c)
  }
  pub fn de(&self) -> u16 {
    (u16::from(self.d) << 8) | u16::from(self.e)
  }
  pub fn hl(&self) -> u16 {
    (u16::from(self.h) << 8) | u16::from(self.l)
  }

  pub fn set_psw(&mut self, value: u16) {
    self.a = (value >> 8) as u8;
    self.set_flags((value & 0xff) as u8);
  }
  pub fn set_bc(&mut self, value: u16) {
    self.b = (value >> 8) as u8;
    self.c = (value & 0xff) as u8;
  }
  pub fn set_de(&mut self, value: u16) {
    self.d = (value >> 8) as u8;
    self.e = (value & 0xff) as u8;
  }
  pub fn set_hl(&mut self, value: u16) {
    self.h = (value >> 8) as u8;
    self.l = (value & 0xff) as u8;
  }

  /// Store a flag byte, forcing the undefined bits to their fixed values.
  pub fn set_flags(&mut self, f: u8) {
    self.f = (f & DEFINED) | FIXED;
  }

  /// Replace the flags in `mask` with the ones from `f`, keeping the rest.
  pub fn update_flags(&mut self, mask: u8, f: u8) {
    self.set_flags((self.f & !mask) | (f & mask));
  }

  pub fn s(&self) -> bool {
    //! Sign flag
    self.f & S != 0
  }
  pub fn z(&self) -> bool {
    //! Zero flag
    self.f & Z != 0
  }
  pub fn ac(&self) -> bool {
    //! Auxiliary carry flag
    self.f & AC != 0
  }
  pub fn p(&self) -> bool {
    //! Parity flag
    self.f & P != 0
  }
  pub fn cy(&self) -> bool {
    //! Carry flag
    self.f & CY != 0
  }
}

impl Default for Registers {
  fn default() -> Registers {
    Registers::new()
  }
}

impl fmt::Display for Registers {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let flag = |set: bool, c: char| if set { c } else { '-' };
    write!(
      f,
      "A={:02x} BC={:04x} DE={:04x} HL={:04x} SP={:04x} PC={:04x} F={}{}{}{}{}",
      self.a,
      self.bc(),
      self.de(),
      self.hl(),
      self.sp,
      self.pc,
      flag(self.s(), 'S'),
      flag(self.z(), 'Z'),
      flag(self.ac(), 'A'),
      flag(self.p(), 'P'),
      flag(self.cy(), 'C'),
    )
  }
}
