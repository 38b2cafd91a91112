//! Daily activity streak tracking.
//!
//! The streak counts consecutive calendar days with at least one qualifying
//! activity (a completed journal or meditation session). Day boundaries are
//! compared on calendar dates only -- never elapsed milliseconds -- so the
//! count is immune to timezone and DST drift.
//!
//! State lives under two store keys: the streak count and the last activity
//! date. Invariant: the count is zero exactly when the date is absent.

use chrono::NaiveDate;

use crate::error::Result;
use crate::storage::KeyValueStore;

const STREAK_COUNT_KEY: &str = "streak_count";
const LAST_ACTIVITY_KEY: &str = "streak_last_activity";

/// Tracks the consecutive-day activity streak.
///
/// Constructed with an explicit store handle; every mutating operation
/// persists before returning, and persistence failures propagate to the
/// caller unretried.
pub struct StreakTracker<S> {
    store: S,
}

impl<S: KeyValueStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current streak, 0 when no activity has ever been recorded.
    pub fn streak(&self) -> Result<u32> {
        match self.store.get(STREAK_COUNT_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(0),
        }
    }

    /// Calendar date of the last qualifying activity.
    pub fn last_activity(&self) -> Result<Option<NaiveDate>> {
        match self.store.get(LAST_ACTIVITY_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Record a qualifying activity for `today` and return the new streak.
    ///
    /// At most one increment per calendar day: a repeat call on the same
    /// date is a no-op. A gap of two or more days resets the streak to 1.
    pub fn record_activity(&self, today: NaiveDate) -> Result<u32> {
        let streak = self.streak()?;
        let next = match self.last_activity()? {
            Some(last) if last == today => return Ok(streak),
            Some(last) if today.signed_duration_since(last).num_days() == 1 => streak + 1,
            _ => 1,
        };
        self.store
            .set(STREAK_COUNT_KEY, &serde_json::to_string(&next)?)?;
        self.store
            .set(LAST_ACTIVITY_KEY, &serde_json::to_string(&today)?)?;
        Ok(next)
    }

    /// Zero the streak and clear the last activity date.
    pub fn reset(&self) -> Result<()> {
        self.store.remove(STREAK_COUNT_KEY)?;
        self.store.remove(LAST_ACTIVITY_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_first_activity_starts_at_one() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        assert_eq!(tracker.streak().unwrap(), 0);
        assert_eq!(tracker.last_activity().unwrap(), None);

        assert_eq!(tracker.record_activity(date("2024-06-01")).unwrap(), 1);
        assert_eq!(tracker.streak().unwrap(), 1);
        assert_eq!(
            tracker.last_activity().unwrap(),
            Some(date("2024-06-01"))
        );
    }

    #[test]
    fn test_daily_cadence_is_monotonic() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        let start = date("2024-06-01");
        for n in 0..30u32 {
            let day = start + chrono::Duration::days(n as i64);
            assert_eq!(tracker.record_activity(day).unwrap(), n + 1);
        }
        assert_eq!(tracker.streak().unwrap(), 30);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-06-01")).unwrap();
        tracker.record_activity(date("2024-06-02")).unwrap();
        assert_eq!(tracker.record_activity(date("2024-06-02")).unwrap(), 2);
        assert_eq!(tracker.record_activity(date("2024-06-02")).unwrap(), 2);
        assert_eq!(tracker.streak().unwrap(), 2);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-06-01")).unwrap();
        tracker.record_activity(date("2024-06-02")).unwrap();
        assert_eq!(tracker.record_activity(date("2024-06-05")).unwrap(), 1);
        assert_eq!(tracker.streak().unwrap(), 1);
    }

    #[test]
    fn test_two_day_gap_resets() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-06-01")).unwrap();
        assert_eq!(tracker.record_activity(date("2024-06-03")).unwrap(), 1);
    }

    #[test]
    fn test_backwards_date_resets() {
        // A clock set into the past is treated as a gap, not a panic.
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-06-10")).unwrap();
        assert_eq!(tracker.record_activity(date("2024-06-08")).unwrap(), 1);
    }

    #[test]
    fn test_reset_clears_both_keys() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-06-01")).unwrap();
        tracker.reset().unwrap();
        assert_eq!(tracker.streak().unwrap(), 0);
        assert_eq!(tracker.last_activity().unwrap(), None);

        // The next activity starts a fresh streak.
        assert_eq!(tracker.record_activity(date("2024-06-02")).unwrap(), 1);
    }

    #[test]
    fn test_month_boundary() {
        let store = MemoryStore::new();
        let tracker = StreakTracker::new(&store);
        tracker.record_activity(date("2024-01-31")).unwrap();
        assert_eq!(tracker.record_activity(date("2024-02-01")).unwrap(), 2);
    }
}
