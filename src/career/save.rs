//! Snapshot validation and save/load through a caller-provided store.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current save format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format that still loads. Only bump on
//!   breaking changes (a field changes meaning or is removed); additive
//!   changes are covered by `#[serde(default)]` on the new fields.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::{find_job_type, find_location};
use super::error::{SaveError, SnapshotError};
use super::state::GameState;

pub const SAVE_VERSION: u32 = 2;

pub const MIN_COMPATIBLE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub game: GameState,
}

/// Where serialized saves go. Storage backends live outside this crate;
/// `MemoryStore` is the in-process implementation.
pub trait SaveStore {
    fn write(&mut self, json: &str) -> Result<(), SaveError>;
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn delete(&mut self) -> Result<(), SaveError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn write(&mut self, json: &str) -> Result<(), SaveError> {
        self.slot = Some(json.to_string());
        Ok(())
    }

    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.slot.clone())
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        self.slot = None;
        Ok(())
    }
}

/// Check that a snapshot describes a game the engine could have produced.
pub fn validate(state: &GameState) -> Result<(), SnapshotError> {
    if !state.calendar().is_valid() {
        return Err(if state.year == 0 {
            SnapshotError::InvalidYear
        } else {
            SnapshotError::InvalidMonth(state.month)
        });
    }

    if let Some(name) = state.player.location.as_deref() {
        if find_location(name).is_none() {
            return Err(SnapshotError::UnknownLocation(name.to_string()));
        }
    }

    let expenses = &state.player.expenses;
    if expenses.iter().any(|(_, amount)| amount < 0) || expenses.checked_total().is_none() {
        return Err(SnapshotError::InvalidExpenses);
    }

    let salary = state.player.finance.salary;
    match &state.player.job {
        Some(job) => {
            if find_job_type(&job.title).is_none() {
                return Err(SnapshotError::UnknownJob(job.title.clone()));
            }
            if job.salary != salary {
                return Err(SnapshotError::SalaryMismatch {
                    salary,
                    expected: job.salary,
                });
            }
        }
        None if salary != 0 => {
            return Err(SnapshotError::SalaryMismatch {
                salary,
                expected: 0,
            });
        }
        None => {}
    }

    Ok(())
}

pub fn to_json(state: &GameState) -> Result<String, SaveError> {
    let save = SaveData {
        version: SAVE_VERSION,
        game: state.clone(),
    };
    Ok(serde_json::to_string(&save)?)
}

/// Write the current game to `store`.
pub fn save_game(state: &GameState, store: &mut dyn SaveStore) -> Result<(), SaveError> {
    let json = to_json(state)?;
    store.write(&json)?;
    info!(target: "career.save", bytes = json.len(), "game saved");
    Ok(())
}

/// Read a save from `store`. Returns `Ok(None)` when there is nothing usable;
/// unreadable or too-old saves are deleted from the store.
pub fn read_game(store: &mut dyn SaveStore) -> Result<Option<GameState>, SaveError> {
    let Some(json) = store.read()? else {
        return Ok(None);
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            warn!(target: "career.save", error = %e, "discarding unreadable save");
            store.delete()?;
            return Ok(None);
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        warn!(
            target: "career.save",
            saved = save_data.version,
            min_compatible = MIN_COMPATIBLE_VERSION,
            "save too old, starting fresh"
        );
        store.delete()?;
        return Ok(None);
    }

    if save_data.version < SAVE_VERSION {
        info!(
            target: "career.save",
            saved = save_data.version,
            current = SAVE_VERSION,
            "migrating older save"
        );
    }

    validate(&save_data.game)?;
    Ok(Some(save_data.game))
}
