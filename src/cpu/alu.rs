//! Arithmetic and logic for the 8080.
//!
//! Every function here is pure: it takes operand values (and whatever
//! incoming flags it depends on) and returns the result together with the
//! flag bits it computed. The caller decides which flag bits to commit via
//! [`Registers::update_flags`](crate::cpu::Registers::update_flags).
//!
//! Carry after subtraction is a borrow: it is set when the minuend is
//! smaller than the subtrahend. The auxiliary carry follows the same
//! convention on the low nibble.

use std::fmt;

use crate::cpu::reg::{AC, CY, P, S, Z};

/// Flags written by the accumulator ALU group.
pub const ALL: u8 = S | Z | AC | P | CY;
/// Flags written by INR/DCR, which leave the carry alone.
pub const NO_CARRY: u8 = S | Z | AC | P;

/// The eight register/immediate accumulator operations, in opcode order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AluOp {
  Add,
  Adc,
  Sub,
  Sbb,
  Ana,
  Xra,
  Ora,
  Cmp,
}

impl AluOp {
  /// Decode bits 5..3 of an ALU opcode.
  pub fn from_bits(bits: u8) -> AluOp {
    match bits & 0x7 {
      0 => AluOp::Add,
      1 => AluOp::Adc,
      2 => AluOp::Sub,
      3 => AluOp::Sbb,
      4 => AluOp::Ana,
      5 => AluOp::Xra,
      6 => AluOp::Ora,
      _ => AluOp::Cmp,
    }
  }

  /// Register form mnemonic (`ADD r`).
  pub fn mnemonic(self) -> &'static str {
    match self {
      AluOp::Add => "ADD",
      AluOp::Adc => "ADC",
      AluOp::Sub => "SUB",
      AluOp::Sbb => "SBB",
      AluOp::Ana => "ANA",
      AluOp::Xra => "XRA",
      AluOp::Ora => "ORA",
      AluOp::Cmp => "CMP",
    }
  }

  /// Immediate form mnemonic (`ADI d8`).
  pub fn immediate_mnemonic(self) -> &'static str {
    match self {
      AluOp::Add => "ADI",
      AluOp::Adc => "ACI",
      AluOp::Sub => "SUI",
      AluOp::Sbb => "SBI",
      AluOp::Ana => "ANI",
      AluOp::Xra => "XRI",
      AluOp::Ora => "ORI",
      AluOp::Cmp => "CPI",
    }
  }

  /// Run the operation. Returns the new accumulator value, which the caller
  /// must discard for `Cmp`, and the flags.
  pub fn apply(self, a: u8, n: u8, carry: bool) -> (u8, u8) {
    match self {
      AluOp::Add => add(a, n, false),
      AluOp::Adc => add(a, n, carry),
      AluOp::Sub | AluOp::Cmp => sub(a, n, false),
      AluOp::Sbb => sub(a, n, carry),
      AluOp::Ana => and(a, n),
      AluOp::Xra => xor(a, n),
      AluOp::Ora => or(a, n),
    }
  }

  /// Whether the result is written back to the accumulator.
  pub fn stores(self) -> bool {
    self != AluOp::Cmp
  }
}

/// Sign, zero and parity for an 8-bit result.
pub fn szp(value: u8) -> u8 {
  let mut f = 0;
  f |= if value & 0x80 != 0 { S } else { 0 };
  f |= if value == 0 { Z } else { 0 };
  f |= if value.count_ones() % 2 == 0 { P } else { 0 };
  f
}

pub fn add(a: u8, n: u8, carry: bool) -> (u8, u8) {
  let c = u16::from(carry);
  let wide = u16::from(a) + u16::from(n) + c;
  let result = (wide & 0xff) as u8;
  let mut f = szp(result);
  f |= if wide > 0xff { CY } else { 0 };
  f |= if u16::from(a & 0xf) + u16::from(n & 0xf) + c > 0xf { AC } else { 0 };
  (result, f)
}

pub fn sub(a: u8, n: u8, borrow: bool) -> (u8, u8) {
  let b = u16::from(borrow);
  let subtrahend = u16::from(n) + b;
  let result = (u16::from(a).wrapping_sub(subtrahend) & 0xff) as u8;
  let mut f = szp(result);
  f |= if u16::from(a) < subtrahend { CY } else { 0 };
  f |= if u16::from(a & 0xf) < u16::from(n & 0xf) + b { AC } else { 0 };
  (result, f)
}

/// AND clears the carry; the auxiliary carry comes out as bit 3 of the
/// OR of both operands, as on the real part.
pub fn and(a: u8, n: u8) -> (u8, u8) {
  let result = a & n;
  let ac = if (a | n) & 0x08 != 0 { AC } else { 0 };
  (result, szp(result) | ac)
}

pub fn or(a: u8, n: u8) -> (u8, u8) {
  let result = a | n;
  (result, szp(result))
}

pub fn xor(a: u8, n: u8) -> (u8, u8) {
  let result = a ^ n;
  (result, szp(result))
}

/// Increment. Only meaningful with [`NO_CARRY`] as the commit mask.
pub fn inr(n: u8) -> (u8, u8) {
  let result = n.wrapping_add(1);
  let ac = if n & 0xf == 0xf { AC } else { 0 };
  (result, szp(result) | ac)
}

/// Decrement. Only meaningful with [`NO_CARRY`] as the commit mask.
pub fn dcr(n: u8) -> (u8, u8) {
  let result = n.wrapping_sub(1);
  let ac = if n & 0xf == 0 { AC } else { 0 };
  (result, szp(result) | ac)
}

/// Decimal adjust after addition. `f` is the current flag byte.
pub fn daa(a: u8, f: u8) -> (u8, u8) {
  let mut wide = u16::from(a);
  let mut ac = 0;
  let mut cy = f & CY;

  if wide & 0xf > 9 || f & AC != 0 {
    if (wide & 0xf) + 6 > 0xf {
      ac = AC;
    }
    wide += 0x06;
  }
  if (wide >> 4) > 9 || cy != 0 {
    wide += 0x60;
  }
  if wide > 0xff {
    cy = CY;
  }

  let result = (wide & 0xff) as u8;
  (result, szp(result) | ac | cy)
}

/// 16-bit add for DAD. Only the carry is produced.
pub fn dad(hl: u16, n: u16) -> (u16, u8) {
  let wide = u32::from(hl) + u32::from(n);
  let cy = if wide > 0xffff { CY } else { 0 };
  ((wide & 0xffff) as u16, cy)
}

/// The four accumulator rotates, in opcode order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rotate {
  Rlc,
  Rrc,
  Ral,
  Rar,
}

impl Rotate {
  /// Rotate `a` by one bit. Only the carry is produced.
  pub fn apply(self, a: u8, carry: bool) -> (u8, u8) {
    let (result, out) = match self {
      Rotate::Rlc => (a.rotate_left(1), a >> 7),
      Rotate::Rrc => (a.rotate_right(1), a & 1),
      Rotate::Ral => ((a << 1) | u8::from(carry), a >> 7),
      Rotate::Rar => ((a >> 1) | (u8::from(carry) << 7), a & 1),
    };
    (result, if out == 1 { CY } else { 0 })
  }
}

impl fmt::Display for Rotate {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      Rotate::Rlc => "RLC",
      Rotate::Rrc => "RRC",
      Rotate::Ral => "RAL",
      Rotate::Rar => "RAR",
    };
    f.write_str(name)
  }
}
