//! Date-scoped one-shot gates.
//!
//! A gate answers "has this already happened today?" exactly once per
//! `(purpose, user, calendar date)` tuple. The first check on a given day
//! wins and marks the flag; every later check that day loses. Gates guard
//! one-time-per-day UI moments (the first-note celebration, the garden
//! popup), so the failure policy is fail-closed: if the store cannot be
//! read or written, the check reports "already shown" rather than risk
//! firing a celebration twice.

use chrono::NaiveDate;

use crate::error::Result;
use crate::storage::KeyValueStore;

/// The one-time-per-day events this core gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePurpose {
    FirstNoteOfDay,
    GardenPopupShown,
}

impl GatePurpose {
    pub const ALL: [GatePurpose; 2] = [GatePurpose::FirstNoteOfDay, GatePurpose::GardenPopupShown];

    pub fn as_str(self) -> &'static str {
        match self {
            GatePurpose::FirstNoteOfDay => "first_note_of_day",
            GatePurpose::GardenPopupShown => "garden_popup_shown",
        }
    }
}

impl std::str::FromStr for GatePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_note_of_day" => Ok(GatePurpose::FirstNoteOfDay),
            "garden_popup_shown" => Ok(GatePurpose::GardenPopupShown),
            other => Err(format!(
                "unknown gate purpose: {other} (expected first_note_of_day or garden_popup_shown)"
            )),
        }
    }
}

/// Idempotent per-day flags, keyed `{purpose}_{user}_{YYYY-MM-DD}`.
///
/// Old keys expire naturally by date-scoping; [`DailyGateKeeper::sweep_stale`]
/// garbage-collects them.
pub struct DailyGateKeeper<S> {
    store: S,
}

fn gate_key(purpose: GatePurpose, user_id: &str, date: NaiveDate) -> String {
    format!("{}_{}_{}", purpose.as_str(), user_id, date.format("%Y-%m-%d"))
}

impl<S: KeyValueStore> DailyGateKeeper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns `true` exactly once per `(purpose, user, date)`; marks the
    /// flag on the winning call.
    ///
    /// Fail-closed: storage failures report `false` ("already shown"). The
    /// deliberate bias is under-triggering celebratory interruptions over
    /// repeating them.
    pub fn check_and_mark(&self, purpose: GatePurpose, user_id: &str, today: NaiveDate) -> bool {
        let key = gate_key(purpose, user_id, today);
        match self.store.get(&key) {
            Ok(Some(_)) => false,
            Ok(None) => match self.store.set(&key, "true") {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("Warning: gate write failed for {key}: {e}");
                    false
                }
            },
            Err(e) => {
                eprintln!("Warning: gate read failed for {key}: {e}");
                false
            }
        }
    }

    /// Remove the flag for one `(purpose, user, date)` tuple.
    pub fn clear(&self, purpose: GatePurpose, user_id: &str, today: NaiveDate) -> Result<()> {
        self.store.remove(&gate_key(purpose, user_id, today))?;
        Ok(())
    }

    /// Remove gate flags older than `keep_days` before `today`, for every
    /// purpose. Returns the number of keys removed.
    pub fn sweep_stale(&self, user_id: &str, today: NaiveDate, keep_days: u32) -> Result<usize> {
        let cutoff = today - chrono::Duration::days(keep_days as i64);
        let mut removed = 0;
        for purpose in GatePurpose::ALL {
            let prefix = format!("{}_{}_", purpose.as_str(), user_id);
            for key in self.store.keys_with_prefix(&prefix)? {
                // The trailing segment is the date; dates contain no '_'.
                let stale = key
                    .rsplit('_')
                    .next()
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                    .is_some_and(|d| d < cutoff);
                if stale {
                    self.store.remove(&key)?;
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fires_once_per_day() {
        let store = MemoryStore::new();
        let gates = DailyGateKeeper::new(&store);
        let d = date("2024-01-01");

        assert!(gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", d));
        assert!(!gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", d));
        assert!(!gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", d));

        // A new calendar date opens the gate again.
        assert!(gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-01-02")));
    }

    #[test]
    fn test_purposes_and_users_are_independent() {
        let store = MemoryStore::new();
        let gates = DailyGateKeeper::new(&store);
        let d = date("2024-01-01");

        assert!(gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", d));
        assert!(gates.check_and_mark(GatePurpose::GardenPopupShown, "u1", d));
        assert!(gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u2", d));
    }

    #[test]
    fn test_clear_reopens_gate() {
        let store = MemoryStore::new();
        let gates = DailyGateKeeper::new(&store);
        let d = date("2024-01-01");

        assert!(gates.check_and_mark(GatePurpose::GardenPopupShown, "u1", d));
        gates.clear(GatePurpose::GardenPopupShown, "u1", d).unwrap();
        assert!(gates.check_and_mark(GatePurpose::GardenPopupShown, "u1", d));
    }

    #[test]
    fn test_sweep_removes_only_stale_keys() {
        let store = MemoryStore::new();
        let gates = DailyGateKeeper::new(&store);

        gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-01-01"));
        gates.check_and_mark(GatePurpose::GardenPopupShown, "u1", date("2024-02-10"));
        gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-03-01"));

        let removed = gates.sweep_stale("u1", date("2024-03-01"), 14).unwrap();
        assert_eq!(removed, 2);

        // The recent flag is still closed; the swept ones reopen.
        assert!(!gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-03-01")));
        assert!(gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-01-01")));
    }

    /// Store that fails every operation, for exercising the fail-closed
    /// policy.
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::QueryFailed("injected".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("injected".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("injected".into()))
        }
        fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
            Err(StorageError::QueryFailed("injected".into()))
        }
    }

    /// Deliberate policy, not an accident: a failing store reports "already
    /// shown" so a one-time celebration can never fire twice from retries.
    #[test]
    fn test_storage_failure_fails_closed() {
        let gates = DailyGateKeeper::new(FailingStore);
        assert!(!gates.check_and_mark(GatePurpose::FirstNoteOfDay, "u1", date("2024-01-01")));
    }
}
