use dashmap::DashMap;
use std::fmt;
use std::time::Duration;

use crate::clock::Clock;
use crate::config::LimiterConfig;

// Key a record is stored under - "action:identifier"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttemptKey(String);

impl AttemptKey {
    pub fn new(action: &str, identifier: &str) -> Self {
        Self(format!("{}:{}", action, identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttemptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Attempt record - tracks attempts per key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptRecord {
    pub count: u32,
    pub last_attempt_at: Option<Duration>, // None until the first allowed attempt
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Less than the minimum interval since the last allowed attempt.
    TooFast,
    /// Max attempts reached and the lockout has not run out yet.
    LockedOut,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::TooFast => "too_fast",
            Decision::LockedOut => "locked_out",
        }
    }
}

/// Per-key attempt limiter with a minimum interval between attempts and a
/// lockout once `max_attempts` is reached.
///
/// A key's whole check runs under its map shard lock, so callers on
/// different threads get the same decisions as a single caller would.
pub struct AttemptLimiter<C> {
    records: DashMap<AttemptKey, AttemptRecord>,
    config: LimiterConfig,
    clock: C,
}

impl<C: Clock> AttemptLimiter<C> {
    pub fn new(config: LimiterConfig, clock: C) -> Self {
        Self {
            records: DashMap::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    pub fn is_allowed(&self, action: &str, identifier: &str) -> bool {
        self.check(action, identifier).is_allowed()
    }

    pub fn check(&self, action: &str, identifier: &str) -> Decision {
        let now = self.clock.now();

        let mut record = self
            .records
            .entry(AttemptKey::new(action, identifier))
            .or_default();

        // locked out..? stay locked while less than the lockout has passed
        if record.count >= self.config.max_attempts {
            let since_last = elapsed(now, record.last_attempt_at);
            if since_last < self.config.lockout {
                return Decision::LockedOut;
            }
            record.count = 0;
        }

        if let Some(last) = record.last_attempt_at {
            if now.saturating_sub(last) < self.config.min_interval {
                return Decision::TooFast;
            }
        }

        record.count += 1;
        record.last_attempt_at = Some(now);
        Decision::Allowed
    }

    // Forget a key entirely - next check starts fresh
    pub fn reset(&self, action: &str, identifier: &str) {
        self.records.remove(&AttemptKey::new(action, identifier));
    }

    pub fn record(&self, action: &str, identifier: &str) -> Option<AttemptRecord> {
        self.records
            .get(&AttemptKey::new(action, identifier))
            .map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// Time since the last attempt; a clock that went backwards counts as zero
fn elapsed(now: Duration, last: Option<Duration>) -> Duration {
    match last {
        Some(last) => now.saturating_sub(last),
        None => Duration::MAX,
    }
}
