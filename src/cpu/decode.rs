use std::fmt;

use crate::cpu::alu::{AluOp, Rotate};
use crate::cpu::Registers;

/// An 8-bit register other than the flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reg {
  A,
  B,
  C,
  D,
  E,
  H,
  L,
}

/// Where a byte operand lives: a register, or memory at (HL).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operand {
  Reg(Reg),
  Mem,
}

impl Operand {
  /// Decode a 3-bit register field: B C D E H L M A.
  pub fn from_bits(bits: u8) -> Operand {
    match bits & 0x7 {
      0 => Operand::Reg(Reg::B),
      1 => Operand::Reg(Reg::C),
      2 => Operand::Reg(Reg::D),
      3 => Operand::Reg(Reg::E),
      4 => Operand::Reg(Reg::H),
      5 => Operand::Reg(Reg::L),
      6 => Operand::Mem,
      _ => Operand::Reg(Reg::A),
    }
  }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Pair {
  BC,
  DE,
  HL,
  SP,
  /// Accumulator and flags, only valid for PUSH/POP.
  PSW,
}

impl Pair {
  /// Pair field of LXI, INX, DCX and DAD.
  fn from_bits_sp(bits: u8) -> Pair {
    match bits & 0x3 {
      0 => Pair::BC,
      1 => Pair::DE,
      2 => Pair::HL,
      _ => Pair::SP,
    }
  }

  /// Pair field of PUSH and POP.
  fn from_bits_psw(bits: u8) -> Pair {
    match bits & 0x3 {
      0 => Pair::BC,
      1 => Pair::DE,
      2 => Pair::HL,
      _ => Pair::PSW,
    }
  }
}

/// Branch condition, bits 5..3 of Jcc/Ccc/Rcc.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cond {
  NZ,
  Z,
  NC,
  C,
  PO,
  PE,
  P,
  M,
}

impl Cond {
  fn from_bits(bits: u8) -> Cond {
    match bits & 0x7 {
      0 => Cond::NZ,
      1 => Cond::Z,
      2 => Cond::NC,
      3 => Cond::C,
      4 => Cond::PO,
      5 => Cond::PE,
      6 => Cond::P,
      _ => Cond::M,
    }
  }

  pub fn test(self, regs: &Registers) -> bool {
    match self {
      Cond::NZ => !regs.z(),
      Cond::Z => regs.z(),
      Cond::NC => !regs.cy(),
      Cond::C => regs.cy(),
      Cond::PO => !regs.p(),
      Cond::PE => regs.p(),
      Cond::P => !regs.s(),
      Cond::M => regs.s(),
    }
  }
}

/// One decoded 8080 instruction with its immediate operands resolved.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Instruction {
  Nop,
  Hlt,
  Ei,
  Di,

  /// `MOV dst,src`
  Mov(Operand, Operand),
  Mvi(Operand, u8),
  Lxi(Pair, u16),
  Lda(u16),
  Sta(u16),
  Lhld(u16),
  Shld(u16),
  Ldax(Pair),
  Stax(Pair),
  Xchg,

  Alu(AluOp, Operand),
  AluImm(AluOp, u8),
  Inr(Operand),
  Dcr(Operand),
  Inx(Pair),
  Dcx(Pair),
  Dad(Pair),
  Daa,
  Cma,
  Stc,
  Cmc,
  Rotate(Rotate),

  Jmp(u16),
  Jcc(Cond, u16),
  Call(u16),
  Ccc(Cond, u16),
  Ret,
  Rcc(Cond),
  /// Restart to vector `n`, address `8 * n`.
  Rst(u8),
  Pchl,

  Push(Pair),
  Pop(Pair),
  Xthl,
  Sphl,

  In(u8),
  Out(u8),
}

/// Decode `opcode`. `operand` is the little-endian word that follows it in
/// memory; instructions with a one-byte immediate use its low byte and
/// instructions without one ignore it.
///
/// Returns `None` for the twelve undocumented opcodes.
pub fn decode(opcode: u8, operand: u16) -> Option<Instruction> {
  use self::Instruction::*;

  let d8 = (operand & 0xff) as u8;
  let d16 = operand;
  // Fields: xx yyy zzz, with yyy split as pp q.
  let x = opcode >> 6;
  let y = (opcode >> 3) & 0x7;
  let z = opcode & 0x7;
  let p = y >> 1;
  let q = y & 1;

  let instr = match x {
    0 => match z {
      0 => match y {
        0 => Nop,
        _ => return None,
      },
      1 => {
        if q == 0 {
          Lxi(Pair::from_bits_sp(p), d16)
        } else {
          Dad(Pair::from_bits_sp(p))
        }
      }
      2 => match (p, q) {
        (0, 0) => Stax(Pair::BC),
        (1, 0) => Stax(Pair::DE),
        (2, 0) => Shld(d16),
        (3, 0) => Sta(d16),
        (0, _) => Ldax(Pair::BC),
        (1, _) => Ldax(Pair::DE),
        (2, _) => Lhld(d16),
        _ => Lda(d16),
      },
      3 => {
        if q == 0 {
          Inx(Pair::from_bits_sp(p))
        } else {
          Dcx(Pair::from_bits_sp(p))
        }
      }
      4 => Inr(Operand::from_bits(y)),
      5 => Dcr(Operand::from_bits(y)),
      6 => Mvi(Operand::from_bits(y), d8),
      _ => match y {
        0 => Rotate(self::Rotate::Rlc),
        1 => Rotate(self::Rotate::Rrc),
        2 => Rotate(self::Rotate::Ral),
        3 => Rotate(self::Rotate::Rar),
        4 => Daa,
        5 => Cma,
        6 => Stc,
        _ => Cmc,
      },
    },
    1 => {
      if opcode == 0x76 {
        Hlt
      } else {
        Mov(Operand::from_bits(y), Operand::from_bits(z))
      }
    }
    2 => Alu(AluOp::from_bits(y), Operand::from_bits(z)),
    _ => match z {
      0 => Rcc(Cond::from_bits(y)),
      1 => match (q, p) {
        (0, _) => Pop(Pair::from_bits_psw(p)),
        (_, 0) => Ret,
        (_, 2) => Pchl,
        (_, 3) => Sphl,
        _ => return None,
      },
      2 => Jcc(Cond::from_bits(y), d16),
      3 => match y {
        0 => Jmp(d16),
        2 => Out(d8),
        3 => In(d8),
        4 => Xthl,
        5 => Xchg,
        6 => Di,
        7 => Ei,
        _ => return None,
      },
      4 => Ccc(Cond::from_bits(y), d16),
      5 => match (q, p) {
        (0, _) => Push(Pair::from_bits_psw(p)),
        (_, 0) => Call(d16),
        _ => return None,
      },
      6 => AluImm(AluOp::from_bits(y), d8),
      _ => Rst(y),
    },
  };
  Some(instr)
}

impl Instruction {
  /// Encoded length in bytes, opcode included.
  pub fn len(&self) -> u16 {
    use self::Instruction::*;
    match *self {
      Mvi(..) | AluImm(..) | In(_) | Out(_) => 2,
      Lxi(..) | Lda(_) | Sta(_) | Lhld(_) | Shld(_) | Jmp(_) | Jcc(..)
      | Call(_) | Ccc(..) => 3,
      _ => 1,
    }
  }
}

impl fmt::Display for Reg {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      Reg::A => "A",
      Reg::B => "B",
      Reg::C => "C",
      Reg::D => "D",
      Reg::E => "E",
      Reg::H => "H",
      Reg::L => "L",
    };
    f.write_str(name)
  }
}

impl fmt::Display for Operand {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Operand::Reg(r) => r.fmt(f),
      Operand::Mem => f.write_str("M"),
    }
  }
}

impl fmt::Display for Pair {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    // Intel syntax names a pair by its high register.
    let name = match self {
      Pair::BC => "B",
      Pair::DE => "D",
      Pair::HL => "H",
      Pair::SP => "SP",
      Pair::PSW => "PSW",
    };
    f.write_str(name)
  }
}

impl fmt::Display for Cond {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let name = match self {
      Cond::NZ => "NZ",
      Cond::Z => "Z",
      Cond::NC => "NC",
      Cond::C => "C",
      Cond::PO => "PO",
      Cond::PE => "PE",
      Cond::P => "P",
      Cond::M => "M",
    };
    f.write_str(name)
  }
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use self::Instruction::*;
    match *self {
      Nop => write!(f, "NOP"),
      Hlt => write!(f, "HLT"),
      Ei => write!(f, "EI"),
      Di => write!(f, "DI"),
      Mov(dst, src) => write!(f, "MOV {},{}", dst, src),
      Mvi(dst, n) => write!(f, "MVI {},{:02x}h", dst, n),
      Lxi(rp, nn) => write!(f, "LXI {},{:04x}h", rp, nn),
      Lda(nn) => write!(f, "LDA {:04x}h", nn),
      Sta(nn) => write!(f, "STA {:04x}h", nn),
      Lhld(nn) => write!(f, "LHLD {:04x}h", nn),
      Shld(nn) => write!(f, "SHLD {:04x}h", nn),
      Ldax(rp) => write!(f, "LDAX {}", rp),
      Stax(rp) => write!(f, "STAX {}", rp),
      Xchg => write!(f, "XCHG"),
      Alu(op, src) => write!(f, "{} {}", op.mnemonic(), src),
      AluImm(op, n) => write!(f, "{} {:02x}h", op.immediate_mnemonic(), n),
      Inr(r) => write!(f, "INR {}", r),
      Dcr(r) => write!(f, "DCR {}", r),
      Inx(rp) => write!(f, "INX {}", rp),
      Dcx(rp) => write!(f, "DCX {}", rp),
      Dad(rp) => write!(f, "DAD {}", rp),
      Daa => write!(f, "DAA"),
      Cma => write!(f, "CMA"),
      Stc => write!(f, "STC"),
      Cmc => write!(f, "CMC"),
      Rotate(r) => write!(f, "{}", r),
      Jmp(nn) => write!(f, "JMP {:04x}h", nn),
      Jcc(cc, nn) => write!(f, "J{} {:04x}h", cc, nn),
      Call(nn) => write!(f, "CALL {:04x}h", nn),
      Ccc(cc, nn) => write!(f, "C{} {:04x}h", cc, nn),
      Ret => write!(f, "RET"),
      Rcc(cc) => write!(f, "R{}", cc),
      Rst(n) => write!(f, "RST {}", n),
      Pchl => write!(f, "PCHL"),
      Push(rp) => write!(f, "PUSH {}", rp),
      Pop(rp) => write!(f, "POP {}", rp),
      Xthl => write!(f, "XTHL"),
      Sphl => write!(f, "SPHL"),
      In(port) => write!(f, "IN {:02x}h", port),
      Out(port) => write!(f, "OUT {:02x}h", port),
    }
  }
}
