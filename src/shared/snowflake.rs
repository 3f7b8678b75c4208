//! Snowflake ID Generator
//!
//! Twitter-style distributed unique ID generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Messenger epoch (2020-01-01T00:00:00.000Z)
const MESSENGER_EPOCH: u64 = 1577836800000;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    node_id: u64,
    sequence: AtomicU64,
    last_timestamp: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, node_id: u64) -> Self {
        Self {
            machine_id: machine_id & 0x1F,  // 5 bits
            node_id: node_id & 0x1F,         // 5 bits
            sequence: AtomicU64::new(0),
            last_timestamp: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let timestamp = self.current_timestamp();
        let last = self.last_timestamp.load(Ordering::SeqCst);

        let sequence = if timestamp == last {
            self.sequence.fetch_add(1, Ordering::SeqCst) & 0xFFF
        } else {
            self.last_timestamp.store(timestamp, Ordering::SeqCst);
            self.sequence.store(0, Ordering::SeqCst);
            0
        };

        let id = ((timestamp - MESSENGER_EPOCH) << 22)
            | (self.machine_id << 17)
            | (self.node_id << 12)
            | sequence;

        id as i64
    }

    /// Get current timestamp in milliseconds
    fn current_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// Extract timestamp from snowflake ID
pub fn extract_timestamp(snowflake: i64) -> u64 {
    ((snowflake as u64) >> 22) + MESSENGER_EPOCH
}

/// Parse snowflake from a path or body string
pub fn from_string(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
}
