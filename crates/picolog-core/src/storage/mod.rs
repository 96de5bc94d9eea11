pub mod record;
pub mod store;

pub use record::SensorRecord;
pub use store::SampleStore;

/// Number of record slots on the device build.
///
/// 500 slots at ~30 bytes per record keeps the table comfortably inside
/// RP2040 SRAM alongside the rest of the firmware.
pub const DEFAULT_CAPACITY: usize = 500;
