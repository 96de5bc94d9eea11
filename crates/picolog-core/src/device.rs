//! The per-cycle command dispatcher and the device context that owns the
//! control loop's state.
//!
//! One cycle is: drain a block from the transport, dispatch at most one
//! command from it, then unconditionally acquire a fresh sample and
//! insert it into the store. The loop is single-threaded and
//! cooperative, so store reads (DUMP, queries) and the single store
//! write per cycle can never interleave; consistency holds by
//! construction, not by locking. The end-of-cycle idle delay belongs to
//! the top-level driver (firmware task or simulator main), which also
//! owns the one [`Device`] instance — nothing in here is a global.

use alloc::string::String;
use core::fmt::Write as _;

use log::{debug, error, info};

use crate::config::DeviceConfig;
use crate::framer::LineFramer;
use crate::hal::{Clock, SensorPanel, Transport};
use crate::metrics::LoopMetrics;
use crate::query::{compile, execute, is_select};
use crate::storage::{SampleStore, SensorRecord};

/// The explicit mutable context for the control loop: sample store, line
/// framer, metrics, config, and the collaborator handles.
pub struct Device<T, S, C, const CAPACITY: usize>
where
    T: Transport,
    S: SensorPanel,
    C: Clock,
{
    transport: T,
    sensors: S,
    clock: C,
    config: DeviceConfig,
    store: SampleStore<CAPACITY>,
    framer: LineFramer,
    metrics: LoopMetrics,
    /// Clock reading at construction; record timestamps and the HELO
    /// elapsed-time line are relative to this.
    boot_us: u64,
}

impl<T, S, C, const CAPACITY: usize> Device<T, S, C, CAPACITY>
where
    T: Transport,
    S: SensorPanel,
    C: Clock,
{
    pub fn new(transport: T, sensors: S, clock: C, config: DeviceConfig) -> Self {
        let boot_us = clock.now_micros();
        info!(
            "device 0x{:08X} up, {} record slots",
            config.device_id, CAPACITY
        );
        Self {
            transport,
            sensors,
            clock,
            framer: LineFramer::new(config.read_timeout_us),
            config,
            store: SampleStore::new(),
            metrics: LoopMetrics::default(),
            boot_us,
        }
    }

    /// Run one control-loop cycle: drain, dispatch, sample, insert.
    /// Always terminates; the only waits are the bounded per-byte drain
    /// timeout. The caller adds the fixed idle delay between cycles.
    pub fn run_cycle(&mut self) {
        let cycle_start = self.clock.now_micros();

        let block = self.framer.read_block(&mut self.transport);
        self.dispatch(&block);
        let dispatch_end = self.clock.now_micros();

        self.acquire_sample();
        let cycle_end = self.clock.now_micros();

        self.metrics.record_cycle(
            cycle_end.saturating_sub(cycle_start),
            dispatch_end.saturating_sub(cycle_start),
            cycle_end.saturating_sub(dispatch_end),
        );
    }

    /// Recognize at most one command in the drained block. Fixed commands
    /// must match as exact 4-byte blocks; a SELECT needs its 6-byte
    /// keyword plus a payload. Everything else is consumed silently.
    fn dispatch(&mut self, block: &[u8]) {
        match block {
            b"" => {}
            b"HELO" => self.reply_helo(),
            b"TIME" => self.reply_time(),
            b"DUMP" => self.reply_dump(),
            _ if is_select(block) => self.reply_select(block),
            _ => debug!("unrecognized block ({} bytes), no reply", block.len()),
        }
    }

    fn reply_helo(&mut self) {
        info!("HELO from client");
        let mut reply = String::new();
        let _ = writeln!(reply, "Pico ID: 0x{:08X}", self.config.device_id);
        let _ = writeln!(reply, "Time: {}", self.elapsed_us());
        let _ = writeln!(reply, "EHLO");
        self.send(&reply);
    }

    fn reply_time(&mut self) {
        let metrics = self.metrics;
        debug!("{metrics}");
        let mut reply = String::new();
        let _ = writeln!(reply, "Cycles: {}", metrics.cycles);
        let _ = writeln!(reply, "Cycle: {} us", metrics.last_cycle_us);
        let _ = writeln!(reply, "Dispatch: {} us", metrics.last_dispatch_us);
        let _ = writeln!(reply, "Sample: {} us", metrics.last_sample_us);
        self.send(&reply);
    }

    fn reply_dump(&mut self) {
        let mut reply = String::new();
        for (index, record) in self.store.snapshot().iter().enumerate() {
            let _ = writeln!(
                reply,
                "{index},{},{},{},{}",
                record.timestamp,
                record.potentiometer,
                record.button as u8,
                record.led as u8
            );
        }
        info!("DUMP of {} records", self.store.len());
        self.send(&reply);
    }

    fn reply_select(&mut self, block: &[u8]) {
        let descriptor = compile(block);
        debug!("compiled query: {descriptor:?}");
        let reply = execute(&descriptor, self.store.snapshot());
        self.send(&reply);
    }

    /// Write a multi-line reply, one transport line per text line. A
    /// write failure abandons the rest of the reply; the cycle goes on.
    fn send(&mut self, reply: &str) {
        for line in reply.lines() {
            if let Err(e) = self.transport.write_line(line.as_bytes()) {
                error!("reply write failed: {e}");
                return;
            }
        }
    }

    /// Acquire one sensor record and insert it. The sampling LED is lit
    /// for the duration of the acquisition, and every record produced
    /// here carries `led: true`. A sensor failure is logged and the
    /// cycle's insertion is skipped; sampling resumes next cycle.
    fn acquire_sample(&mut self) {
        self.sensors.set_led(true);
        let reading = self
            .sensors
            .read_potentiometer()
            .and_then(|potentiometer| Ok((potentiometer, self.sensors.read_button()?)));
        self.sensors.set_led(false);

        match reading {
            Ok((potentiometer, button)) => {
                let record = SensorRecord::new(self.elapsed_us(), potentiometer, button, true);
                debug!("{record}");
                self.store.insert(record);
            }
            Err(e) => error!("sample acquisition failed: {e}"),
        }
    }

    /// Microseconds since the device context was constructed.
    fn elapsed_us(&self) -> u64 {
        self.clock.now_micros().saturating_sub(self.boot_us)
    }

    pub fn store(&self) -> &SampleStore<CAPACITY> {
        &self.store
    }

    pub fn metrics(&self) -> &LoopMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }
}
