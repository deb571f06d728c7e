use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::error::CpuError;

const NONE: u8 = 0xff;

/// Single-slot interrupt mailbox.
///
/// Clones share the same slot, so a handle can be given to another thread
/// while the CPU keeps stepping. A new request overwrites one that has not
/// been taken yet.
#[derive(Debug, Clone)]
pub struct InterruptLine {
  pending: Arc<AtomicU8>,
}

impl InterruptLine {
  pub fn new() -> InterruptLine {
    InterruptLine {
      pending: Arc::new(AtomicU8::new(NONE)),
    }
  }

  /// Request vectored interrupt `vector` (0-7).
  pub fn request(&self, vector: u8) -> Result<(), CpuError> {
    if vector > 7 {
      return Err(CpuError::InvalidVector(vector));
    }
    self.pending.store(vector, Ordering::SeqCst);
    Ok(())
  }

  pub fn pending(&self) -> Option<u8> {
    match self.pending.load(Ordering::SeqCst) {
      NONE => None,
      v => Some(v),
    }
  }

  /// Take the pending vector, leaving the slot empty.
  pub fn take(&self) -> Option<u8> {
    match self.pending.swap(NONE, Ordering::SeqCst) {
      NONE => None,
      v => Some(v),
    }
  }

  pub fn clear(&self) {
    self.pending.store(NONE, Ordering::SeqCst);
  }
}

impl Default for InterruptLine {
  fn default() -> InterruptLine {
    InterruptLine::new()
  }
}
