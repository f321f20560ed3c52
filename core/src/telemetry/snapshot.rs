//! telemetry/snapshot.rs
//!
//! Immutable view over the counters and timers of one finished decode.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::DecodeCounters;
use crate::telemetry::timers::{TelemetryTimer, StageTimes, Stage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub records: u64,
    pub reads: u64,
    pub bytes_read: u64,
    pub bytes_payload: u64,
    pub bytes_overhead: u64,
    pub carry_overs: u64,
    /// `bytes_overhead / bytes_read`, 0 for an empty stream.
    pub overhead_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecodeCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let overhead_ratio = if counters.bytes_read > 0 {
            counters.bytes_overhead as f64 / counters.bytes_read as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_read as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            records: counters.records,
            reads: counters.reads,
            bytes_read: counters.bytes_read,
            bytes_payload: counters.bytes_payload,
            bytes_overhead: counters.bytes_overhead,
            carry_overs: counters.carry_overs,
            overhead_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal consistency:
    /// - payload and overhead never exceed what was read
    /// - stage times fit inside the elapsed wall time
    pub fn sanity_check(&self) -> bool {
        self.bytes_payload + self.bytes_overhead <= self.bytes_read &&
        self.overhead_ratio <= 1.0 &&
        self.total_stage_time() <= self.elapsed
    }
}
