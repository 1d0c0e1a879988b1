//! Persistence port over browser local storage.
//!
//! One fixed key per concern. Loads never fail outward: a missing or
//! corrupt value falls back to the caller's default and the parse error
//! goes to the console. Saves are best-effort for the same reason; the
//! history and config are conveniences, not data of record.

use gloo_storage::{LocalStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};
use shared::models::{HistoryEntry, ImportConfig, Session};

const SESSION_KEY: &str = "sheetdrop.session";
const HISTORY_KEY: &str = "sheetdrop.history";
const CONFIG_KEY: &str = "sheetdrop.config";

fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    match LocalStorage::get(key) {
        Ok(value) => Some(value),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            web_sys::console::warn_1(&format!("Discarding stored {key}: {err}").into());
            None
        }
    }
}

fn save<T: Serialize>(key: &str, value: &T) {
    if let Err(err) = LocalStorage::set(key, value) {
        web_sys::console::warn_1(&format!("Failed to persist {key}: {err}").into());
    }
}

/// The persisted session, if one survives from a previous visit.
pub fn load_session() -> Option<Session> {
    load(SESSION_KEY)
}

/// Persist token and user as one unit.
pub fn save_session(session: &Session) {
    save(SESSION_KEY, session);
}

/// Remove the persisted session entirely.
pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}

/// Past uploads, newest first.
pub fn load_history() -> Vec<HistoryEntry> {
    load(HISTORY_KEY).unwrap_or_default()
}

pub fn save_history(history: &[HistoryEntry]) {
    save(HISTORY_KEY, &history);
}

/// Import configuration, falling back to defaults on first visit.
pub fn load_config() -> ImportConfig {
    load(CONFIG_KEY).unwrap_or_default()
}

pub fn save_config(config: &ImportConfig) {
    save(CONFIG_KEY, config);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::models::{AuthUser, ImportResult, UserRole};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_session() -> Session {
        Session {
            token: "tok".to_string(),
            user: AuthUser {
                id: "1".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                role: UserRole::Admin,
                created_at: None,
            },
        }
    }

    #[wasm_bindgen_test]
    fn test_session_round_trip() {
        save_session(&sample_session());
        assert_eq!(load_session(), Some(sample_session()));
        clear_session();
        assert_eq!(load_session(), None);
    }

    #[wasm_bindgen_test]
    fn test_history_round_trip_keeps_order() {
        let result = ImportResult {
            success: true,
            total_rows: 5,
            imported_rows: 5,
            errors: vec![],
        };
        let history = vec![
            HistoryEntry::from_result("b.xlsx", 2, &result),
            HistoryEntry::from_failure("a.xlsx", 1),
        ];
        save_history(&history);

        let restored = load_history();
        assert_eq!(restored, history);
        // Dates must come back as structured timestamps, not strings.
        assert_eq!(restored[0].date, history[0].date);
    }

    #[wasm_bindgen_test]
    fn test_corrupt_value_falls_back() {
        LocalStorage::raw()
            .set_item(HISTORY_KEY, "{not json")
            .unwrap();
        assert!(load_history().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_missing_config_yields_defaults() {
        gloo_storage::LocalStorage::delete(CONFIG_KEY);
        assert_eq!(load_config(), ImportConfig::default());
    }
}
