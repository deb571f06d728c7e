pub const MEM_SIZE: usize = 0x10000;

/// Flat 64K address space. Every address is valid; nothing is mapped.
pub struct Memory {
  ram: Vec<u8>,
}

impl Memory {
  pub fn new() -> Memory {
    Memory {
      ram: vec![0; MEM_SIZE],
    }
  }

  /// Read a byte at address `addr`.
  pub fn rb(&self, addr: u16) -> u8 {
    self.ram[addr as usize]
  }

  /// Read a 2-byte little-endian word from `addr`.
  pub fn rw(&self, addr: u16) -> u16 {
    let a = u16::from(self.rb(addr));
    let b = u16::from(self.rb(addr.wrapping_add(1)));
    (b << 8) | a
  }

  /// Write `value` at address `addr`.
  pub fn wb(&mut self, addr: u16, value: u8) {
    self.ram[addr as usize] = value;
  }

  /// Write a 2-byte little-endian word to `addr`.
  pub fn ww(&mut self, addr: u16, value: u16) {
    self.wb(addr, (value & 0xff) as u8);
    self.wb(addr.wrapping_add(1), ((value >> 8) & 0xff) as u8);
  }

  /// Write an arbitrary number of bytes to memory, wrapping at the top of
  /// the address space.
  pub fn write(&mut self, addr: u16, values: &[u8]) {
    let mut cur = addr;
    for v in values {
      self.wb(cur, *v);
      cur = cur.wrapping_add(1);
    }
  }

  /// Copy a program image to `base`.
  /// Anything that would run past 0xffff is dropped so the image never
  /// wraps around into the low vectors. Returns the number of bytes copied.
  pub fn load_image(&mut self, image: &[u8], base: u16) -> usize {
    let room = MEM_SIZE - base as usize;
    let len = if image.len() > room {
      warn!(
        "image is {} bytes but only {} fit above 0x{:04x}, truncating",
        image.len(),
        room,
        base
      );
      room
    } else {
      image.len()
    };
    self.ram[base as usize..base as usize + len].copy_from_slice(&image[..len]);
    debug!("loaded {} bytes at 0x{:04x}", len, base);
    len
  }
}

impl Default for Memory {
  fn default() -> Memory {
    Memory::new()
  }
}
