use crate::cpu::alu;
use crate::cpu::decode::{decode, Instruction, Operand, Pair, Reg};
use crate::cpu::reg;
use crate::cpu::InterruptLine;
use crate::cpu::Registers;
use crate::cpu::CPU;
use crate::error::CpuError;
use crate::mem::Memory;
use crate::port::Ports;

/// What one call to [`CPU::step`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Step {
  /// An instruction was fetched and executed.
  Executed(Instruction),
  /// An interrupt was accepted instead of fetching. PC now points at the
  /// vector.
  Interrupted(u8),
  /// The CPU is halted and nothing happened.
  Halted,
}

impl CPU {
  pub fn new() -> CPU {
    CPU {
      regs: Registers::new(),
      inte: false,
      halt: false,
      int_line: InterruptLine::new(),
    }
  }

  /// Power-on state. Memory is not touched and a pending interrupt is
  /// dropped.
  pub fn reset(&mut self) {
    self.regs = Registers::new();
    self.inte = false;
    self.halt = false;
    self.int_line.clear();
  }

  /// A handle on the interrupt mailbox that can be moved to another thread.
  pub fn interrupt_line(&self) -> InterruptLine {
    self.int_line.clone()
  }

  pub fn request_interrupt(&self, vector: u8) -> Result<(), CpuError> {
    self.int_line.request(vector)
  }

  pub fn pending_interrupt(&self) -> Option<u8> {
    self.int_line.pending()
  }

  /// Run one instruction cycle.
  ///
  /// A pending interrupt is accepted first if interrupts are enabled, and
  /// that takes the whole cycle. Otherwise a halted CPU does nothing and a
  /// running one fetches, decodes and executes the instruction at PC.
  ///
  /// An undocumented opcode is reported before anything is changed.
  pub fn step(
    &mut self,
    mem: &mut Memory,
    ports: &mut dyn Ports,
  ) -> Result<Step, CpuError> {
    if self.inte {
      if let Some(vector) = self.int_line.take() {
        self.handle_interrupt(mem, vector);
        return Ok(Step::Interrupted(vector));
      }
    }
    if self.halt {
      return Ok(Step::Halted);
    }

    let pc = self.regs.pc;
    let opcode = mem.rb(pc);
    let instr = match decode(opcode, mem.rw(pc.wrapping_add(1))) {
      Some(instr) => instr,
      None => return Err(CpuError::Decode { opcode, addr: pc }),
    };
    trace!(
      "{:04x}  {:02x}  {:<14} {}",
      pc,
      opcode,
      instr.to_string(),
      self.regs
    );

    self.regs.pc = pc.wrapping_add(instr.len());
    self.exec(mem, ports, instr);
    Ok(Step::Executed(instr))
  }

  /// Acknowledge interrupt `vector`: disable interrupts, push PC and jump
  /// to `8 * vector`. Also wakes the CPU from HLT.
  pub fn handle_interrupt(&mut self, mem: &mut Memory, vector: u8) {
    info!(
      "interrupt {} accepted at 0x{:04x}{}",
      vector,
      self.regs.pc,
      if self.halt { " (waking from HLT)" } else { "" }
    );
    self.inte = false;
    self.halt = false;
    let pc = self.regs.pc;
    self.push(mem, pc);
    self.regs.pc = u16::from(vector & 0x7) * 8;
  }

  /// Execute a decoded instruction. PC has already been moved past it.
  fn exec(&mut self, mem: &mut Memory, ports: &mut dyn Ports, instr: Instruction) {
    use crate::cpu::decode::Instruction::*;

    match instr {
      Nop => (),
      Hlt => {
        debug!("HLT at 0x{:04x}", self.regs.pc.wrapping_sub(1));
        self.halt = true;
      }
      Ei => self.inte = true,
      Di => self.inte = false,

      Mov(dst, src) => {
        let n = self.read(mem, src);
        self.write(mem, dst, n);
      }
      Mvi(dst, n) => self.write(mem, dst, n),
      Lxi(rp, nn) => self.set_pair(rp, nn),
      Lda(nn) => self.regs.a = mem.rb(nn),
      Sta(nn) => mem.wb(nn, self.regs.a),
      Lhld(nn) => {
        let n = mem.rw(nn);
        self.regs.set_hl(n);
      }
      Shld(nn) => mem.ww(nn, self.regs.hl()),
      Ldax(rp) => self.regs.a = mem.rb(self.pair(rp)),
      Stax(rp) => mem.wb(self.pair(rp), self.regs.a),
      Xchg => {
        let de = self.regs.de();
        let hl = self.regs.hl();
        self.regs.set_de(hl);
        self.regs.set_hl(de);
      }

      Alu(op, src) => {
        let n = self.read(mem, src);
        self.alu(op, n);
      }
      AluImm(op, n) => self.alu(op, n),
      Inr(dst) => {
        let (result, f) = alu::inr(self.read(mem, dst));
        self.write(mem, dst, result);
        self.regs.update_flags(alu::NO_CARRY, f);
      }
      Dcr(dst) => {
        let (result, f) = alu::dcr(self.read(mem, dst));
        self.write(mem, dst, result);
        self.regs.update_flags(alu::NO_CARRY, f);
      }
      Inx(rp) => {
        let n = self.pair(rp).wrapping_add(1);
        self.set_pair(rp, n);
      }
      Dcx(rp) => {
        let n = self.pair(rp).wrapping_sub(1);
        self.set_pair(rp, n);
      }
      Dad(rp) => {
        let (result, f) = alu::dad(self.regs.hl(), self.pair(rp));
        self.regs.set_hl(result);
        self.regs.update_flags(reg::CY, f);
      }
      Daa => {
        let (result, f) = alu::daa(self.regs.a, self.regs.f);
        self.regs.a = result;
        self.regs.update_flags(alu::ALL, f);
      }
      // Flags unaffected.
      Cma => self.regs.a = !self.regs.a,
      Stc => self.regs.update_flags(reg::CY, reg::CY),
      Cmc => {
        let f = self.regs.f ^ reg::CY;
        self.regs.set_flags(f);
      }
      Rotate(r) => {
        let (result, f) = r.apply(self.regs.a, self.regs.cy());
        self.regs.a = result;
        self.regs.update_flags(reg::CY, f);
      }

      Jmp(nn) => self.regs.pc = nn,
      Jcc(cc, nn) => {
        if cc.test(&self.regs) {
          self.regs.pc = nn;
        }
      }
      Call(nn) => self.call(mem, nn),
      Ccc(cc, nn) => {
        if cc.test(&self.regs) {
          self.call(mem, nn);
        }
      }
      Ret => self.regs.pc = self.pop(mem),
      Rcc(cc) => {
        if cc.test(&self.regs) {
          self.regs.pc = self.pop(mem);
        }
      }
      Rst(n) => self.call(mem, u16::from(n) * 8),
      Pchl => self.regs.pc = self.regs.hl(),

      Push(rp) => {
        let n = self.pair(rp);
        self.push(mem, n);
      }
      Pop(rp) => {
        let n = self.pop(mem);
        self.set_pair(rp, n);
      }
      Xthl => {
        let sp = self.regs.sp;
        let top = mem.rw(sp);
        mem.ww(sp, self.regs.hl());
        self.regs.set_hl(top);
      }
      Sphl => self.regs.sp = self.regs.hl(),

      In(port) => self.regs.a = ports.input(port),
      Out(port) => ports.output(port, self.regs.a),
    }
  }

  fn alu(&mut self, op: alu::AluOp, n: u8) {
    let (result, f) = op.apply(self.regs.a, n, self.regs.cy());
    if op.stores() {
      self.regs.a = result;
    }
    self.regs.update_flags(alu::ALL, f);
  }

  fn reg(&self, r: Reg) -> u8 {
    match r {
      Reg::A => self.regs.a,
      Reg::B => self.regs.b,
      Reg::C => self.regs.c,
      Reg::D => self.regs.d,
      Reg::E => self.regs.e,
      Reg::H => self.regs.h,
      Reg::L => self.regs.l,
    }
  }

  fn reg_mut(&mut self, r: Reg) -> &mut u8 {
    match r {
      Reg::A => &mut self.regs.a,
      Reg::B => &mut self.regs.b,
      Reg::C => &mut self.regs.c,
      Reg::D => &mut self.regs.d,
      Reg::E => &mut self.regs.e,
      Reg::H => &mut self.regs.h,
      Reg::L => &mut self.regs.l,
    }
  }

  fn read(&self, mem: &Memory, src: Operand) -> u8 {
    match src {
      Operand::Reg(r) => self.reg(r),
      Operand::Mem => mem.rb(self.regs.hl()),
    }
  }

  fn write(&mut self, mem: &mut Memory, dst: Operand, n: u8) {
    match dst {
      Operand::Reg(r) => *self.reg_mut(r) = n,
      Operand::Mem => mem.wb(self.regs.hl(), n),
    }
  }

  fn pair(&self, rp: Pair) -> u16 {
    match rp {
      Pair::BC => self.regs.bc(),
      Pair::DE => self.regs.de(),
      Pair::HL => self.regs.hl(),
      Pair::SP => self.regs.sp,
      Pair::PSW => self.regs.psw(),
    }
  }

  fn set_pair(&mut self, rp: Pair, n: u16) {
    match rp {
      Pair::BC => self.regs.set_bc(n),
      Pair::DE => self.regs.set_de(n),
      Pair::HL => self.regs.set_hl(n),
      Pair::SP => self.regs.sp = n,
      Pair::PSW => self.regs.set_psw(n),
    }
  }

  /// High byte goes to the higher address.
  fn push(&mut self, mem: &mut Memory, n: u16) {
    self.regs.sp = self.regs.sp.wrapping_sub(1);
    mem.wb(self.regs.sp, (n >> 8) as u8);
    self.regs.sp = self.regs.sp.wrapping_sub(1);
    mem.wb(self.regs.sp, (n & 0xff) as u8);
  }

  fn pop(&mut self, mem: &Memory) -> u16 {
    let lo = mem.rb(self.regs.sp);
    self.regs.sp = self.regs.sp.wrapping_add(1);
    let hi = mem.rb(self.regs.sp);
    self.regs.sp = self.regs.sp.wrapping_add(1);
    (u16::from(hi) << 8) | u16::from(lo)
  }

  /// Push the return address (the already-advanced PC) and jump.
  fn call(&mut self, mem: &mut Memory, target: u16) {
    let retaddr = self.regs.pc;
    self.push(mem, retaddr);
    self.regs.pc = target;
  }
}

impl Default for CPU {
  fn default() -> CPU {
    CPU::new()
  }
}
