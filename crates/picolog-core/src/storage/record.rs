use core::fmt::Display;

/// One timestamped tuple of potentiometer reading, button state, and LED
/// state — the unit of storage in the sample table.
///
/// Records are immutable once written into a slot; the only way one
/// changes is by being fully overwritten when the retention policy
/// reuses its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorRecord {
    /// Microseconds since store start. Monotonically non-decreasing
    /// across records produced by the sampling path.
    pub timestamp: u64,
    /// Raw ADC reading of the potentiometer.
    pub potentiometer: u16,
    /// Whether the button was held during acquisition.
    pub button: bool,
    /// Whether the sampling LED was lit. Always true for records produced
    /// by the sampling path; stored as an explicit field rather than
    /// implied, so the column stays queryable if the policy ever changes.
    pub led: bool,
}

impl SensorRecord {
    pub fn new(timestamp: u64, potentiometer: u16, button: bool, led: bool) -> Self {
        Self {
            timestamp,
            potentiometer,
            button,
            led,
        }
    }
}

impl Display for SensorRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[SensorRecord] timestamp: {} us, potentiometer: {}, button: {}, led: {}",
            self.timestamp, self.potentiometer, self.button as u8, self.led as u8
        )
    }
}
