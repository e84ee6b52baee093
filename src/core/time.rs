//! Layer 0: Time primitives
//!
//! Timestamp for record fields (RFC 3339 in the durable format).
//! Clock for generating strictly increasing timestamps per store.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Point in time at millisecond precision.
///
/// Truncated to whole milliseconds so that a serialize/deserialize round
/// trip through RFC 3339 reproduces an equal value, not just an equal
/// string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Current wall time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_unix_ms(Self::wall_ms())
    }

    /// Build from milliseconds since the Unix epoch.
    pub fn from_unix_ms(ms: i64) -> Self {
        let nanos = i128::from(ms) * 1_000_000;
        // In range for any wall clock this side of year 9999.
        let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);
        Self(dt)
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_ms(&self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    fn wall_ms() -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.unix_ms()),
        }
    }
}

/// Monotonic timestamp source.
///
/// Wall clock with a bump rule: if the wall clock has not advanced past the
/// last issued timestamp (same millisecond, or a backward jump), the next
/// timestamp is last + 1ms. Consecutive mutations therefore always observe
/// strictly increasing `updated_at`.
#[derive(Debug)]
pub struct Clock {
    last_ms: i64,
}

impl Clock {
    pub fn new() -> Self {
        Self { last_ms: 0 }
    }

    /// Issue the next timestamp, strictly greater than all previous ones
    /// from this clock.
    pub fn tick(&mut self) -> Timestamp {
        let now = Timestamp::now().unix_ms();
        self.last_ms = if now > self.last_ms {
            now
        } else {
            self.last_ms + 1
        };
        Timestamp::from_unix_ms(self.last_ms)
    }

    /// Fold an observed timestamp into the clock so the next tick lands
    /// after it. Called when rehydrating persisted entities.
    pub fn observe(&mut self, ts: Timestamp) {
        if ts.unix_ms() > self.last_ms {
            self.last_ms = ts.unix_ms();
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_through_json() {
        let ts = Timestamp::from_unix_ms(1_714_000_123_456);
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn timestamp_serializes_as_rfc3339_string() {
        let ts = Timestamp::from_unix_ms(0);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00Z\"");
    }

    #[test]
    fn clock_is_strictly_monotonic() {
        let mut clock = Clock::new();
        let mut prev = clock.tick();
        for _ in 0..1000 {
            let next = clock.tick();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn clock_observe_advances_past_persisted_times() {
        let mut clock = Clock::new();
        let future = Timestamp::from_unix_ms(Timestamp::now().unix_ms() + 60_000);
        clock.observe(future);
        assert!(clock.tick() > future);
    }
}
