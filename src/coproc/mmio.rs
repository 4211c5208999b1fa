//! Memory-mapped device interface.
//!
//! The hosting virtual machine talks to the coprocessor through exactly
//! three entry points: register reads, register writes, and a periodic
//! tick that advances the execution pipeline. Anything that can provide
//! those three - the real VM shim, the CLI harness, a test - can drive
//! the device; there is no callback table and no global instance.

/// A register-mapped device advanced by an external clock.
///
/// The caller serializes all access: the device is never entered
/// re-entrantly or from two threads at once. No method blocks; every
/// call returns after O(operand-size) work.
pub trait MmioDevice {
    /// Read `width` bytes from the register at byte offset `addr`.
    ///
    /// Invalid reads return 0 and record an error flag in the device's
    /// status register; they never fail outward.
    fn read(&mut self, addr: u32, width: usize) -> u32;

    /// Write `width` bytes to the register at byte offset `addr`.
    ///
    /// Writes are dropped wholesale while an operation is in flight;
    /// invalid writes record an error flag. Neither case fails outward.
    fn write(&mut self, addr: u32, value: u32, width: usize);

    /// Advance the execution pipeline by exactly one state.
    fn tick(&mut self);
}
