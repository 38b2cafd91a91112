//! Villain progress engine.
//!
//! Maintains the single active adversary and its depleting health pool.
//! Each completed session deals a fixed amount of damage (a caller-side
//! policy); reaching zero health makes the villain *defeatable*, and the
//! caller then invokes [`VillainProgressEngine::defeat_current_villain`]
//! explicitly. Defeats append to an ordered, duplicate-allowing history.
//!
//! ## State transitions
//!
//! ```text
//! [no villain] --select(key)--> [active, health=126]
//! [active, health=H] --apply_damage(d)--> [active, health=max(0, H-d)]
//! [active] --defeat()--> [no villain] (+ append to history, health=126)
//! [active, health=H>0] --select(key2)--> [active, health=126]  (progress lost)
//! ```

use serde::{Deserialize, Serialize};

use super::roster::VillainKey;
use crate::error::{Result, ValidationError};
use crate::storage::KeyValueStore;

/// Full health for a freshly selected villain.
pub const MAX_HEALTH: u32 = 126;

/// Default per-session damage. Enforced by callers, not the engine; the
/// engine accepts any positive amount.
pub const DEFAULT_DAMAGE: u32 = 9;

const VILLAIN_STATE_KEY: &str = "villain_state";

/// Persisted villain progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillainState {
    pub current_villain: Option<VillainKey>,
    pub villain_health: u32,
    /// Defeat history in defeat order. Duplicates allowed: a villain can be
    /// chosen and defeated more than once.
    pub defeated_villains: Vec<VillainKey>,
}

impl Default for VillainState {
    fn default() -> Self {
        Self {
            current_villain: None,
            villain_health: MAX_HEALTH,
            defeated_villains: Vec::new(),
        }
    }
}

/// State machine over the persisted [`VillainState`].
///
/// Constructed with an explicit store handle. Every transition re-reads the
/// persisted state, applies a pure transformation, and writes back before
/// returning.
pub struct VillainProgressEngine<S> {
    store: S,
}

impl<S: KeyValueStore> VillainProgressEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current persisted state, or the default when none exists.
    pub fn state(&self) -> Result<VillainState> {
        match self.store.get(VILLAIN_STATE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(VillainState::default()),
        }
    }

    fn save(&self, state: &VillainState) -> Result<()> {
        self.store
            .set(VILLAIN_STATE_KEY, &serde_json::to_string(state)?)?;
        Ok(())
    }

    /// Make `key` the active villain with full health.
    ///
    /// Switching away from an undefeated villain is permitted; its partial
    /// damage is discarded. The defeat history is never touched here.
    pub fn select_villain(&self, key: VillainKey) -> Result<()> {
        let mut state = self.state()?;
        state.current_villain = Some(key);
        state.villain_health = MAX_HEALTH;
        self.save(&state)
    }

    /// Deplete the active villain's health by `amount`, flooring at zero.
    /// Returns the new health.
    ///
    /// Requires an active villain and a positive amount; violations are
    /// invalid-state errors, never silent no-ops.
    pub fn apply_damage(&self, amount: u32) -> Result<u32> {
        if amount == 0 {
            return Err(ValidationError::InvalidAmount(amount).into());
        }
        let mut state = self.state()?;
        if state.current_villain.is_none() {
            return Err(ValidationError::NoActiveVillain.into());
        }
        state.villain_health = state.villain_health.saturating_sub(amount);
        self.save(&state)?;
        Ok(state.villain_health)
    }

    /// Archive the active villain into the defeat history, clear the active
    /// slot, and reset health to full. Returns the archived key.
    ///
    /// The active-villain precondition is checked against a fresh read of
    /// the persisted state immediately before the write, so a second racing
    /// call observes the cleared slot and fails instead of appending the
    /// same defeat twice.
    pub fn defeat_current_villain(&self) -> Result<VillainKey> {
        let mut state = self.state()?;
        let key = state
            .current_villain
            .take()
            .ok_or(ValidationError::NoActiveVillain)?;
        state.defeated_villains.push(key);
        state.villain_health = MAX_HEALTH;
        self.save(&state)?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn test_default_state() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        let state = engine.state().unwrap();
        assert_eq!(state.current_villain, None);
        assert_eq!(state.villain_health, MAX_HEALTH);
        assert!(state.defeated_villains.is_empty());
    }

    #[test]
    fn test_select_resets_health() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Doubt).unwrap();
        engine.apply_damage(40).unwrap();

        engine.select_villain(VillainKey::Pressure).unwrap();
        let state = engine.state().unwrap();
        assert_eq!(state.current_villain, Some(VillainKey::Pressure));
        assert_eq!(state.villain_health, MAX_HEALTH);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Doubt).unwrap();
        assert_eq!(engine.apply_damage(120).unwrap(), 6);
        assert_eq!(engine.apply_damage(120).unwrap(), 0);
        assert_eq!(engine.state().unwrap().villain_health, 0);
    }

    #[test]
    fn test_damage_without_villain_is_invalid_state() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        let err = engine.apply_damage(9).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NoActiveVillain)
        ));
    }

    #[test]
    fn test_zero_damage_is_invalid() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Doubt).unwrap();
        assert!(matches!(
            engine.apply_damage(0).unwrap_err(),
            CoreError::Validation(ValidationError::InvalidAmount(0))
        ));
    }

    #[test]
    fn test_fourteen_sessions_defeat_cycle() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Doubt).unwrap();

        // 126 / 9 = 14 sessions exactly.
        for n in 1..=14u32 {
            let health = engine.apply_damage(DEFAULT_DAMAGE).unwrap();
            assert_eq!(health, MAX_HEALTH - n * DEFAULT_DAMAGE);
        }
        assert_eq!(engine.state().unwrap().villain_health, 0);

        let defeated = engine.defeat_current_villain().unwrap();
        assert_eq!(defeated, VillainKey::Doubt);

        let state = engine.state().unwrap();
        assert_eq!(state.defeated_villains, vec![VillainKey::Doubt]);
        assert_eq!(state.current_villain, None);
        assert_eq!(state.villain_health, MAX_HEALTH);
    }

    #[test]
    fn test_defeat_is_recorded_exactly_once() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Negativity).unwrap();
        engine.apply_damage(MAX_HEALTH).unwrap();

        engine.defeat_current_villain().unwrap();
        // The second (racing) invocation sees the cleared slot and fails
        // the precondition instead of double-appending.
        assert!(engine.defeat_current_villain().is_err());
        assert_eq!(
            engine.state().unwrap().defeated_villains,
            vec![VillainKey::Negativity]
        );
    }

    #[test]
    fn test_history_allows_repeat_defeats() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        for _ in 0..2 {
            engine.select_villain(VillainKey::Doubt).unwrap();
            engine.apply_damage(MAX_HEALTH).unwrap();
            engine.defeat_current_villain().unwrap();
        }
        assert_eq!(
            engine.state().unwrap().defeated_villains,
            vec![VillainKey::Doubt, VillainKey::Doubt]
        );
    }

    #[test]
    fn test_switch_discards_progress() {
        let store = MemoryStore::new();
        let engine = VillainProgressEngine::new(&store);
        engine.select_villain(VillainKey::Pressure).unwrap();
        assert_eq!(engine.apply_damage(9).unwrap(), 117);

        engine.select_villain(VillainKey::Comparison).unwrap();
        let state = engine.state().unwrap();
        assert_eq!(state.current_villain, Some(VillainKey::Comparison));
        assert_eq!(state.villain_health, MAX_HEALTH);
        assert!(state.defeated_villains.is_empty());
    }

    proptest! {
        /// Health stays within [0, MAX_HEALTH] for any damage sequence.
        #[test]
        fn prop_health_bounds(amounts in proptest::collection::vec(1u32..=200, 0..40)) {
            let store = MemoryStore::new();
            let engine = VillainProgressEngine::new(&store);
            engine.select_villain(VillainKey::Impatience).unwrap();
            for amount in amounts {
                let health = engine.apply_damage(amount).unwrap();
                prop_assert!(health <= MAX_HEALTH);
            }
        }
    }
}
