/// Devices behind the `IN` and `OUT` instructions.
///
/// Port accesses never touch the CPU flags; the CPU only moves the
/// accumulator to or from the device.
pub trait Ports {
  /// Read a byte from `port` for `IN`.
  fn input(&mut self, port: u8) -> u8;

  /// Write `value` to `port` for `OUT`.
  fn output(&mut self, port: u8, value: u8);
}

/// No devices attached. Reads return 0, writes are dropped.
#[derive(Debug, Default)]
pub struct NullPorts;

impl Ports for NullPorts {
  fn input(&mut self, port: u8) -> u8 {
    debug!("IN {:02x}h -> 00 (no device)", port);
    0
  }

  fn output(&mut self, port: u8, value: u8) {
    debug!("OUT {:02x}h <- {:02x} (no device)", port, value);
  }
}
