//! Injectable time and assertion-id sources
//!
//! The assertion builder never reads ambient global state; it takes these as
//! explicit dependencies so tests can pin the validity window and `jti`.

use uuid::Uuid;

/// Source of the current time for the assertion validity window
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current Unix timestamp in seconds
    fn now_unix(&self) -> i64;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Source of unique assertion identifiers (the `jti` claim)
pub trait JtiSource: Send + Sync + std::fmt::Debug {
    /// A fresh identifier, unique per call
    fn next_jti(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidJtiSource;

impl JtiSource for UuidJtiSource {
    fn next_jti(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_current() {
        let now = SystemClock.now_unix();
        assert!(now > 1_700_000_000); // After Nov 2023
    }

    #[test]
    fn jti_source_yields_distinct_uuids() {
        let source = UuidJtiSource;
        let a = source.next_jti();
        let b = source.next_jti();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
