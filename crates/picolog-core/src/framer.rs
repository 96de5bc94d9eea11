//! Idle-timeout block framing for the serial link.
//!
//! The transport has no framing delimiter: a request is whatever arrived
//! since the last drain. [`LineFramer::read_block`] pulls bytes with a
//! short per-byte timeout and returns once the link goes idle or the
//! bounded buffer fills. It also echoes changed input back to the client
//! so a terminal session shows what the device acted on.

use log::error;

use crate::hal::Transport;

/// Upper bound on one drained block.
pub const BLOCK_CAPACITY: usize = 128;

/// One drained block, returned by value so the caller can keep it while
/// replying over the same transport.
pub type Block = heapless::Vec<u8, BLOCK_CAPACITY>;

pub struct LineFramer {
    /// Previous cycle's block, zero-filled past its length. Kept for echo
    /// suppression; the comparison runs over the whole buffer so a
    /// shorter block never compares equal to a longer predecessor with
    /// the same prefix.
    last: [u8; BLOCK_CAPACITY],
    /// Per-byte idle timeout while draining, in microseconds.
    read_timeout_us: u64,
}

impl LineFramer {
    pub const fn new(read_timeout_us: u64) -> Self {
        Self {
            last: [0; BLOCK_CAPACITY],
            read_timeout_us,
        }
    }

    /// Drain whatever is currently queued on the transport.
    ///
    /// Returns an empty block when nothing is pending, which is the
    /// normal steady state between client messages. A block that differs
    /// from the previous one is echoed verbatim back over the transport;
    /// an identical repeat is not. Echo is purely a display optimization:
    /// the caller always dispatches on the freshly read block.
    pub fn read_block<T: Transport>(&mut self, transport: &mut T) -> Block {
        // Zero-fill up front so stale bytes from a previous, longer block
        // can never leak into the comparison or the echo.
        let mut buf = [0u8; BLOCK_CAPACITY];
        let mut len = 0;

        while len < BLOCK_CAPACITY {
            match transport.read_byte(self.read_timeout_us) {
                Ok(Some(byte)) => {
                    buf[len] = byte;
                    len += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    error!("drain aborted: {e}");
                    break;
                }
            }
        }

        if len > 0 && buf != self.last {
            if let Err(e) = transport.write(&buf[..len]) {
                error!("echo failed: {e}");
            }
        }
        self.last = buf;

        let mut block = Block::new();
        // Cannot overflow: len is bounded by the block capacity.
        let _ = block.extend_from_slice(&buf[..len]);
        block
    }
}
