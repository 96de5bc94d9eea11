use heapless::Vec;
use log::debug;

use super::SensorRecord;

/// Fixed-capacity table of sensor records with mean-distance retention.
///
/// While the table has free slots, insertion is a plain append. Once all
/// `CAPACITY` slots hold data, each insertion overwrites the slot whose
/// potentiometer value sits closest to the current mean of the
/// potentiometer column. That preferentially evicts the most redundant
/// (closest-to-average) reading instead of the oldest one, so outliers
/// survive in the window.
///
/// Single-owner by design: the control loop both writes samples and
/// serves read-only queries within one cycle, so no synchronization is
/// needed (or provided).
pub struct SampleStore<const CAPACITY: usize> {
    slots: Vec<SensorRecord, CAPACITY>,
    /// Total samples ever accepted. Monotonic; may exceed `CAPACITY`.
    sample_count: u64,
}

impl<const CAPACITY: usize> SampleStore<CAPACITY> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            sample_count: 0,
        }
    }

    /// Insert a record. Never fails: below capacity this appends, at
    /// capacity it overwrites the eviction target. Mutates exactly one
    /// slot and the sample counter.
    pub fn insert(&mut self, record: SensorRecord) {
        if self.slots.len() < CAPACITY {
            // Cannot overflow: length checked against capacity above.
            let _ = self.slots.push(record);
        } else {
            let target = self.eviction_target();
            debug!(
                "store full, overwriting slot {} ({})",
                target, self.slots[target]
            );
            self.slots[target] = record;
        }
        self.sample_count += 1;
    }

    /// Slot whose potentiometer value has minimum absolute distance from
    /// the floating-point mean of the potentiometer column. First minimum
    /// wins, so a table of identical values evicts slot 0. Only the
    /// potentiometer column influences eviction.
    fn eviction_target(&self) -> usize {
        let mean = self
            .slots
            .iter()
            .map(|r| r.potentiometer as f32)
            .sum::<f32>()
            / self.slots.len() as f32;

        let mut target = 0;
        let mut best_distance = f32::INFINITY;
        for (i, record) in self.slots.iter().enumerate() {
            let distance = record.potentiometer as f32 - mean;
            let distance = if distance < 0.0 { -distance } else { distance };
            if distance < best_distance {
                best_distance = distance;
                target = i;
            }
        }
        target
    }

    /// Read-only view of the valid slots, in slot order. The control loop
    /// never inserts while a snapshot is being consumed, so the view is
    /// always consistent.
    pub fn snapshot(&self) -> &[SensorRecord] {
        &self.slots
    }

    /// Number of slots currently holding valid data
    /// (`min(sample_count, CAPACITY)`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == CAPACITY
    }

    /// Total samples ever accepted, including overwritten ones.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }
}

impl<const CAPACITY: usize> Default for SampleStore<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: u64, potentiometer: u16) -> SensorRecord {
        SensorRecord::new(timestamp, potentiometer, false, true)
    }

    #[test]
    fn test_append_preserves_insertion_order_below_capacity() {
        let mut store: SampleStore<5> = SampleStore::new();
        for i in 0..3 {
            store.insert(record(i, i as u16 * 10));
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.sample_count(), 3);
        assert!(!store.is_full());
        let potentiometers: alloc::vec::Vec<u16> =
            store.snapshot().iter().map(|r| r.potentiometer).collect();
        assert_eq!(potentiometers, [0, 10, 20]);
    }

    #[test]
    fn test_eviction_overwrites_closest_to_mean() {
        // Mean of {10, 20, 30} is 20, so the slot holding 20 goes.
        let mut store: SampleStore<3> = SampleStore::new();
        store.insert(record(0, 10));
        store.insert(record(1, 20));
        store.insert(record(2, 30));

        store.insert(record(3, 21));

        assert_eq!(store.len(), 3);
        assert_eq!(store.sample_count(), 4);
        let potentiometers: alloc::vec::Vec<u16> =
            store.snapshot().iter().map(|r| r.potentiometer).collect();
        assert_eq!(potentiometers, [10, 21, 30]);
    }

    #[test]
    fn test_eviction_tie_takes_lowest_index() {
        // Mean of {10, 30, 10, 30} is 20; all slots are equidistant, so
        // the first minimum encountered (slot 0) is overwritten.
        let mut store: SampleStore<4> = SampleStore::new();
        for (i, v) in [10u16, 30, 10, 30].into_iter().enumerate() {
            store.insert(record(i as u64, v));
        }

        store.insert(record(4, 99));

        let potentiometers: alloc::vec::Vec<u16> =
            store.snapshot().iter().map(|r| r.potentiometer).collect();
        assert_eq!(potentiometers, [99, 30, 10, 30]);
    }

    #[test]
    fn test_eviction_identical_values_picks_slot_zero() {
        let mut store: SampleStore<3> = SampleStore::new();
        for i in 0..3 {
            store.insert(record(i, 42));
        }

        store.insert(record(3, 7));

        let potentiometers: alloc::vec::Vec<u16> =
            store.snapshot().iter().map(|r| r.potentiometer).collect();
        assert_eq!(potentiometers, [7, 42, 42]);
    }

    #[test]
    fn test_eviction_target_recomputed_every_insert() {
        let mut store: SampleStore<3> = SampleStore::new();
        store.insert(record(0, 10));
        store.insert(record(1, 20));
        store.insert(record(2, 30));

        // Mean 20 -> slot 1 (holding 20) replaced by 100.
        store.insert(record(3, 100));
        // Now {10, 100, 30}, mean ~46.67 -> slot 2 (holding 30) replaced.
        store.insert(record(4, 5));

        let potentiometers: alloc::vec::Vec<u16> =
            store.snapshot().iter().map(|r| r.potentiometer).collect();
        assert_eq!(potentiometers, [10, 100, 5]);
        assert_eq!(store.sample_count(), 5);
        assert_eq!(store.len(), 3);
    }
}
