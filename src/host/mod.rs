//! Host-side harness for the coprocessor.
//!
//! Everything a host needs to drive the device over its register
//! interface: a [`HostDriver`] that speaks the operand/command/poll
//! protocol, and [`script`] files for scripted register sessions.

pub mod driver;
pub mod script;

pub use driver::{DriverError, HostDriver};
pub use script::{Script, ScriptError, ScriptOp};
