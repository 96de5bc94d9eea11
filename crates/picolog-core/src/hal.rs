//! Collaborator traits for the peripherals the core does not own.
//!
//! The hardware layer implements these against the real RP2040
//! peripherals (ADC, GPIO, USB-CDC); the simulator implements them with
//! synthetic data and stdio. The core only ever talks to these traits,
//! which is what lets every other module compile and test on a desktop
//! host.

use crate::error::{SensorError, TransportError};

/// Byte-oriented serial link. Requests are not newline-delimited; a
/// "block" is whatever arrived since the last drain (see
/// [`crate::framer::LineFramer`]).
pub trait Transport {
    /// Pull one byte, waiting at most `timeout_us` for it to arrive.
    /// `Ok(None)` means the link was idle for the whole timeout.
    fn read_byte(&mut self, timeout_us: u64) -> Result<Option<u8>, TransportError>;

    /// Write raw bytes to the link.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Write `bytes` followed by a newline terminator.
    fn write_line(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.write(bytes)?;
        self.write(b"\n")
    }
}

/// The potentiometer, button, and LED attached to the device.
pub trait SensorPanel {
    /// Current raw ADC reading of the potentiometer.
    fn read_potentiometer(&mut self) -> Result<u16, SensorError>;

    /// Whether the button is currently held.
    fn read_button(&mut self) -> Result<bool, SensorError>;

    /// Drive the sampling LED.
    fn set_led(&mut self, on: bool);
}

/// Monotonic microsecond clock.
pub trait Clock {
    fn now_micros(&self) -> u64;
}
