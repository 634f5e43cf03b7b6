//! Result records
//!
//! Plain, immutable shapes built from the measured durations. Which backend
//! won and by how much is left to whoever renders them.

use std::time::Duration;
use serde::{Serialize, Deserialize};

/// Convert a duration to milliseconds, rounded to the microsecond
pub fn millis(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 1_000_000.0).round() / 1_000.0
}

/// Write timing of one backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WriteTiming {
    #[serde(rename = "writeTime")]
    write_time_ms: f64,
}

impl WriteTiming {
    pub fn write_time_ms(&self) -> f64 {
        self.write_time_ms
    }
}

/// Read timing of one backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadTiming {
    #[serde(rename = "readTime")]
    read_time_ms: f64,
}

impl ReadTiming {
    pub fn read_time_ms(&self) -> f64 {
        self.read_time_ms
    }
}

/// Outcome of one write test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteTestResults {
    data_count: u64,
    fast: WriteTiming,
    persistent: WriteTiming,
}

impl WriteTestResults {
    pub fn new(data_count: u64, fast: Duration, persistent: Duration) -> Self {
        WriteTestResults {
            data_count,
            fast: WriteTiming { write_time_ms: millis(fast) },
            persistent: WriteTiming { write_time_ms: millis(persistent) },
        }
    }

    pub fn data_count(&self) -> u64 {
        self.data_count
    }

    pub fn fast(&self) -> WriteTiming {
        self.fast
    }

    pub fn persistent(&self) -> WriteTiming {
        self.persistent
    }
}

/// Outcome of one read test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadTestResults {
    data_count: u64,
    fast: ReadTiming,
    persistent: ReadTiming,
}

impl ReadTestResults {
    pub fn new(data_count: u64, fast: Duration, persistent: Duration) -> Self {
        ReadTestResults {
            data_count,
            fast: ReadTiming { read_time_ms: millis(fast) },
            persistent: ReadTiming { read_time_ms: millis(persistent) },
        }
    }

    pub fn data_count(&self) -> u64 {
        self.data_count
    }

    pub fn fast(&self) -> ReadTiming {
        self.fast
    }

    pub fn persistent(&self) -> ReadTiming {
        self.persistent
    }
}
