//! Best score persistence
//!
//! A single integer under [`STORAGE_KEY`]. Storage faults never stop a
//! run: loads fall back to 0 and failed saves are only logged.

use crate::persistence::KeyValueStore;

/// Key the best score is stored under
pub const STORAGE_KEY: &str = "score";

/// Read the stored best score, 0 if absent or unreadable
pub fn load_best(store: &impl KeyValueStore) -> u64 {
    match store.get(STORAGE_KEY) {
        Ok(Some(value)) if value >= 0 => {
            log::info!("Loaded best score {value}");
            value as u64
        }
        Ok(Some(value)) => {
            log::warn!("Ignoring negative stored best score {value}");
            0
        }
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(err) => {
            log::warn!("Best score unavailable ({err}), using 0");
            0
        }
    }
}

/// Store a new best score. Returns whether the write succeeded.
pub fn save_best(store: &mut impl KeyValueStore, score: u64) -> bool {
    let value = i64::try_from(score).unwrap_or(i64::MAX);
    match store.set(STORAGE_KEY, value) {
        Ok(()) => {
            log::info!("Best score saved ({score})");
            true
        }
        Err(err) => {
            log::warn!("Failed to save best score {score}: {err}");
            false
        }
    }
}

/// Format a score the way the scoreboard shows it
pub fn format_score(score: u64) -> String {
    format!("{score} km")
}
