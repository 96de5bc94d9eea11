//! Desktop simulator for the picolog sensor logger.
//!
//! Runs the picolog-core control loop against synthetic sensor data and
//! a stdin/stdout transport, so the command set can be exercised without
//! hardware. Type a request (`HELO`, `TIME`, `DUMP`, or a `SELECT`
//! query) and press enter; replies and the input echo appear on stdout.
//!
//! The potentiometer follows a slow sinusoidal sweep as if a hand were
//! turning the knob, and the button is "held" for ten seconds out of
//! every twenty.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use picolog_core::config::DeviceConfig;
use picolog_core::device::Device;
use picolog_core::error::{SensorError, TransportError};
use picolog_core::hal::{Clock, SensorPanel, Transport};
use picolog_core::storage::DEFAULT_CAPACITY;

// ---------------------------------------------------------------------------
// Transport: stdin feeder thread + stdout replies
// ---------------------------------------------------------------------------

/// Bridges the byte-stream transport to the terminal. A feeder thread
/// reads stdin lines and queues their bytes (without the newline, which
/// the real serial link never carries either); `read_byte` drains the
/// queue with the device's idle timeout.
struct StdioTransport {
    rx: Receiver<u8>,
}

impl StdioTransport {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for byte in line.into_bytes() {
                    if tx.send(byte).is_err() {
                        return;
                    }
                }
            }
        });
        Self { rx }
    }
}

impl Transport for StdioTransport {
    fn read_byte(&mut self, timeout_us: u64) -> Result<Option<u8>, TransportError> {
        match self.rx.recv_timeout(Duration::from_micros(timeout_us)) {
            Ok(byte) => Ok(Some(byte)),
            // A closed stdin behaves like a silent client: the loop keeps
            // sampling on empty blocks forever.
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Ok(None),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(|_| TransportError::Write {
                details: "stdout closed",
            })
    }
}

// ---------------------------------------------------------------------------
// Synthetic sensors
// ---------------------------------------------------------------------------

/// Generates potentiometer/button readings that vary over time.
struct MockSensorPanel {
    start: Instant,
}

impl MockSensorPanel {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl SensorPanel for MockSensorPanel {
    fn read_potentiometer(&mut self) -> Result<u16, SensorError> {
        let t = self.start.elapsed().as_secs_f64();

        // 12-bit ADC range, mid-scale with a slow sweep and some wobble
        let value = 2048.0 + 1500.0 * (t / 30.0).sin() + 200.0 * (t / 7.0).cos();
        Ok(value.clamp(0.0, 4095.0) as u16)
    }

    fn read_button(&mut self) -> Result<bool, SensorError> {
        Ok((self.start.elapsed().as_secs() / 10) % 2 == 1)
    }

    fn set_led(&mut self, on: bool) {
        log::trace!("sampling LED {}", if on { "on" } else { "off" });
    }
}

/// Monotonic microsecond clock over `std::time::Instant`.
struct HostClock {
    start: Instant,
}

impl HostClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for HostClock {
    fn now_micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let config = DeviceConfig::load(None);
    info!("Starting picolog simulator");
    info!(
        "Device 0x{:08X}, {} record slots, {} ms cycle",
        config.device_id, DEFAULT_CAPACITY, config.cycle_delay_ms
    );
    info!("Commands: HELO  TIME  DUMP  SELECT <cols> [WHERE <col><op><n>] [ORDER BY <cols>]");

    let cycle_delay = Duration::from_millis(config.cycle_delay_ms);
    let mut device: Device<_, _, _, DEFAULT_CAPACITY> = Device::new(
        StdioTransport::spawn(),
        MockSensorPanel::new(),
        HostClock::new(),
        config,
    );

    loop {
        let cycle_start = Instant::now();
        device.run_cycle();

        // Fixed end-of-cycle idle delay, netted against the cycle cost.
        let elapsed = cycle_start.elapsed();
        if elapsed < cycle_delay {
            thread::sleep(cycle_delay - elapsed);
        }
    }
}
