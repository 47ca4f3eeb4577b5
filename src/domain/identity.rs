// Injectable sources of workout ids and creation timestamps
use chrono::{DateTime, SubsecRound, Utc};

/// Produces the id assigned to a newly created workout.
pub trait IdGenerator: Send {
    fn next_id(&mut self, created_at: DateTime<Utc>) -> String;
}

/// Last ten digits of the creation time in epoch milliseconds.
///
/// Two workouts created within the same millisecond receive the same id.
/// Form submissions are user-paced, so this is accepted rather than guarded.
#[derive(Debug, Default, Clone)]
pub struct TimestampIds;

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, created_at: DateTime<Utc>) -> String {
        let millis = created_at.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(10);
        millis[start..].to_string()
    }
}

pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock truncated to milliseconds so stored dates survive a round trip
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_ids_keep_last_ten_digits() {
        let at = Utc.timestamp_millis_opt(1_721_000_123_456).unwrap();
        assert_eq!(TimestampIds.next_id(at), "1000123456");
    }

    #[test]
    fn test_timestamp_ids_collide_within_same_millisecond() {
        let at = Utc.timestamp_millis_opt(1_721_000_123_456).unwrap();
        let mut ids = TimestampIds;
        assert_eq!(ids.next_id(at), ids.next_id(at));
    }

    #[test]
    fn test_system_clock_has_millisecond_precision() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
