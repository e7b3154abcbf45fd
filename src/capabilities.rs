//! Injected capabilities: identifier generation and wall-clock time.
//!
//! Finalizing a game needs a fresh id and a completion timestamp. Both are
//! passed in so the state machine stays deterministic under test.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt::Write;
use tracing::instrument;

/// Source of unique identifiers for finished games.
pub trait IdGenerator {
    /// Returns an identifier not handed out before.
    fn next_id(&mut self) -> String;
}

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Random RFC 4122 version 4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    #[instrument(skip(self))]
    fn next_id(&mut self) -> String {
        let mut bytes: [u8; 16] = rand::rng().random();
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let mut id = String::with_capacity(36);
        for (idx, byte) in bytes.iter().enumerate() {
            if matches!(idx, 4 | 6 | 8 | 10) {
                id.push('-');
            }
            // Writing into a String cannot fail.
            let _ = write!(id, "{:02x}", byte);
        }
        id
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Predictable identifiers: `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    issued: u64,
}

impl SequentialIds {
    /// Creates a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issued: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{}", self.prefix, self.issued)
    }
}
