use crate::error::{TallyError, TallyResult};
use crate::matrix::{Mode, TallyMatrix, TallyStore};
use crate::slots::Shift;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

// ============================================================================
// KEYS (string-valued key-value store)
// ============================================================================

pub const KEY_COUNTER_DATA: &str = "counterData";
pub const KEY_CURRENT_MODE: &str = "currentMode";
pub const KEY_CURRENT_SHIFT: &str = "currentShift";

const UPSERT_SQL: &str = "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP";

/// Wire shape of `counterData`: both matrices, null when never touched
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct CounterData {
    pub arrival: Option<Vec<Vec<u8>>>,
    pub departure: Option<Vec<Vec<u8>>>,
}

impl CounterData {
    pub fn from_store(store: &TallyStore) -> Self {
        Self {
            arrival: store.peek(Mode::Arrival).map(|m| m.rows().to_vec()),
            departure: store.peek(Mode::Departure).map(|m| m.rows().to_vec()),
        }
    }

    /// Convert back into a store. A matrix that does not fit its mode
    /// is treated as absent; the other one is kept.
    pub fn into_store(self) -> TallyStore {
        let arrival = restore_matrix(Mode::Arrival, self.arrival);
        let departure = restore_matrix(Mode::Departure, self.departure);
        TallyStore::with_matrices(arrival, departure)
    }
}

fn restore_matrix(mode: Mode, rows: Option<Vec<Vec<u8>>>) -> Option<TallyMatrix> {
    let rows = rows?;
    match TallyMatrix::from_rows(mode, rows) {
        Ok(matrix) => Some(matrix),
        Err(e) => {
            warn!(mode = mode.as_str(), error = %e, "Discarding persisted matrix");
            None
        }
    }
}

/// Everything persisted between sessions
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub store: TallyStore,
    pub mode: Mode,
    pub shift: Shift,
}

// ============================================================================
// DATABASE
// ============================================================================

/// SQLite-backed key-value store holding the session snapshot
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> TallyResult<Self> {
        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> TallyResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> TallyResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write the whole snapshot in one transaction
    pub fn save_snapshot(&mut self, store: &TallyStore, mode: Mode, shift: Shift) -> TallyResult<()> {
        let counter_data = serde_json::to_string(&CounterData::from_store(store))?;

        let tx = self.conn.transaction()?;
        for (key, value) in [
            (KEY_COUNTER_DATA, counter_data.as_str()),
            (KEY_CURRENT_MODE, mode.as_str()),
            (KEY_CURRENT_SHIFT, shift.as_str()),
        ] {
            upsert(&tx, key, value)?;
        }
        tx.commit()?;

        debug!(mode = mode.as_str(), shift = shift.as_str(), "Snapshot saved");
        Ok(())
    }

    /// Read the snapshot back. Each key falls back to its default on its own:
    /// a broken `counterData` does not lose the saved mode or shift.
    pub fn load_snapshot(&self) -> Snapshot {
        let store = match self.load_counter_data() {
            Ok(Some(data)) => data.into_store(),
            Ok(None) => TallyStore::new(),
            Err(e) => {
                warn!(error = %e, "Could not load counter data, starting empty");
                TallyStore::new()
            }
        };

        let mode = self
            .load_enum(KEY_CURRENT_MODE, Mode::parse)
            .unwrap_or_default();
        let shift = self
            .load_enum(KEY_CURRENT_SHIFT, Shift::parse)
            .unwrap_or_default();

        Snapshot { store, mode, shift }
    }

    fn load_counter_data(&self) -> TallyResult<Option<CounterData>> {
        match self.get(KEY_COUNTER_DATA)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn load_enum<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        let raw = match self.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "Could not read persisted value");
                return None;
            }
        };

        let parsed = parse(&raw);
        if parsed.is_none() {
            let err = TallyError::malformed(format!("unknown value {:?}", raw));
            warn!(key, error = %err, "Ignoring persisted value");
        }
        parsed
    }
}

fn upsert(conn: &Connection, key: &str, value: &str) -> TallyResult<()> {
    conn.execute(UPSERT_SQL, params![key, value])?;
    Ok(())
}

pub fn setup_database(conn: &Connection) -> TallyResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SLOT_COUNT;

    #[test]
    fn test_kv_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("missing").unwrap(), None);

        upsert(&db.conn, KEY_CURRENT_MODE, "departure").unwrap();
        upsert(&db.conn, KEY_CURRENT_MODE, "arrival").unwrap();
        assert_eq!(db.get(KEY_CURRENT_MODE).unwrap().as_deref(), Some("arrival"));
    }

    #[test]
    fn test_empty_database_loads_defaults() {
        let db = Database::open_in_memory().unwrap();
        let mut snapshot = db.load_snapshot();

        assert_eq!(snapshot.mode, Mode::Arrival);
        assert_eq!(snapshot.shift, Shift::Morning);
        assert!(snapshot.store.peek(Mode::Arrival).is_none());
        assert!(snapshot.store.get(Mode::Departure).is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut db = Database::open_in_memory().unwrap();
        let mut store = TallyStore::new();
        store.toggle(Mode::Arrival, 0, 0);
        store.toggle(Mode::Arrival, 40, 23);
        store.toggle(Mode::Departure, 17, 12);

        db.save_snapshot(&store, Mode::Departure, Shift::Evening).unwrap();
        let mut loaded = db.load_snapshot();

        assert_eq!(loaded.mode, Mode::Departure);
        assert_eq!(loaded.shift, Shift::Evening);
        for mode in Mode::ALL {
            assert_eq!(loaded.store.get(mode), store.get(mode));
        }
    }

    #[test]
    fn test_untouched_mode_persists_as_null() {
        let mut db = Database::open_in_memory().unwrap();
        let mut store = TallyStore::new();
        store.toggle(Mode::Arrival, 1, 1);

        db.save_snapshot(&store, Mode::Arrival, Shift::Morning).unwrap();
        let raw = db.get(KEY_COUNTER_DATA).unwrap().unwrap();
        let data: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(data["departure"].is_null());
        assert_eq!(data["arrival"].as_array().unwrap().len(), 41);
        assert_eq!(data["arrival"][1][1], 1);
    }

    #[test]
    fn test_malformed_matrix_is_dropped() {
        let db = Database::open_in_memory().unwrap();
        let mut bad = vec![vec![0u8; SLOT_COUNT]; 41];
        bad[0][0] = 2;
        let good = {
            let mut rows = vec![vec![0u8; SLOT_COUNT]; 37];
            rows[3][3] = 1;
            rows
        };
        let data = CounterData {
            arrival: Some(bad),
            departure: Some(good),
        };
        upsert(&db.conn, KEY_COUNTER_DATA, &serde_json::to_string(&data).unwrap()).unwrap();

        let mut snapshot = db.load_snapshot();
        assert!(snapshot.store.peek(Mode::Arrival).is_none());
        assert_eq!(snapshot.store.get(Mode::Departure).get(3, 3), 1);
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let db = Database::open_in_memory().unwrap();
        upsert(&db.conn, KEY_COUNTER_DATA, "{not json").unwrap();
        upsert(&db.conn, KEY_CURRENT_MODE, "sideways").unwrap();
        upsert(&db.conn, KEY_CURRENT_SHIFT, "evening").unwrap();

        let snapshot = db.load_snapshot();
        assert!(snapshot.store.peek(Mode::Arrival).is_none());
        assert_eq!(snapshot.mode, Mode::Arrival);
        assert_eq!(snapshot.shift, Shift::Evening);
    }
}
