//! In-memory record store for demo mode and tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use crate::model::{Record, RecordPatch};

use super::{RecordStore, StoreError};

/// Per-operation call counters, shared with tests via `Arc` so assertions
/// can be made while the worker thread owns the store.
#[derive(Debug, Default)]
pub struct CallLog {
    pub selects: AtomicUsize,
    pub inserts: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CallLog {
    pub fn writes(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

/// In-memory store. Owner scoping and ambient-identity defaulting mirror
/// the remote store: inserts take the owner from the store session, not
/// from the caller.
pub struct MemoryStore {
    session_owner: String,
    records: Vec<Record>,
    next_id: u64,
    /// When set, the next operation fails with this error once.
    fail_next: Option<StoreError>,
    calls: Arc<CallLog>,
}

impl MemoryStore {
    pub fn new(session_owner: &str) -> Self {
        Self {
            session_owner: session_owner.to_string(),
            records: Vec::new(),
            next_id: 1,
            fail_next: None,
            calls: Arc::new(CallLog::default()),
        }
    }

    /// Pre-populated store backing `--demo` mode.
    pub fn demo(session_owner: &str) -> Self {
        let mut store = Self::new(session_owner);
        let now = Utc::now().timestamp();
        let seed: [(&str, &str, &str, Option<f64>, Option<i64>, Option<&str>); 6] = [
            ("Pale Ale", "Crooked Mast", "IPA", Some(6.0), Some(45), None),
            ("Stout Night", "Blackwater", "Stout", None, Some(38), Some("Roasty, low carbonation")),
            ("Hazy Day", "Crooked Mast", "IPA", Some(6.8), Some(30), Some("Juicy, drink fresh")),
            ("Pilsner Urquell", "Plzeňský Prazdroj", "Pilsner", Some(4.4), Some(40), None),
            ("Quadrupel 10", "Sint Arnoldus", "Quadrupel", Some(10.2), None, Some("Cellar until 2028")),
            ("Gose Tide", "Saltworks", "Gose", Some(4.2), Some(8), None),
        ];
        for (i, (name, brewery, category, abv, ibu, notes)) in seed.into_iter().enumerate() {
            let id = store.next_id;
            store.next_id += 1;
            store.records.push(Record {
                id: id.to_string(),
                owner: store.session_owner.clone(),
                name: name.to_string(),
                brewery: Some(brewery.to_string()),
                category: Some(category.to_string()),
                abv,
                ibu,
                notes: notes.map(|n| n.to_string()),
                created_at: now - (i as i64) * 86_400,
            });
        }
        store
    }

    /// Store seeded with explicit records (tests).
    pub fn with_records(session_owner: &str, records: Vec<Record>) -> Self {
        let next_id = records.len() as u64 + 1;
        Self {
            session_owner: session_owner.to_string(),
            records,
            next_id,
            fail_next: None,
            calls: Arc::new(CallLog::default()),
        }
    }

    /// Makes the next operation fail once with the given error.
    pub fn fail_next(&mut self, error: StoreError) {
        self.fail_next = Some(error);
    }

    /// Shared handle to the call counters.
    pub fn call_log(&self) -> Arc<CallLog> {
        Arc::clone(&self.calls)
    }

    /// Direct view of the stored records (tests).
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn take_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl RecordStore for MemoryStore {
    fn select_all(&mut self, owner: &str) -> Result<Vec<Record>, StoreError> {
        self.calls.selects.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let mut records: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        // Stable sort: ties keep insertion order, like the remote store.
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(records)
    }

    fn insert(&mut self, patch: &RecordPatch) -> Result<Record, StoreError> {
        self.calls.inserts.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let id = self.next_id;
        self.next_id += 1;
        let record = Record {
            id: id.to_string(),
            owner: self.session_owner.clone(),
            name: patch.name.clone(),
            brewery: patch.brewery.clone(),
            category: patch.category.clone(),
            abv: patch.abv,
            ibu: patch.ibu,
            notes: patch.notes.clone(),
            created_at: Utc::now().timestamp(),
        };
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: &RecordPatch) -> Result<(), StoreError> {
        self.calls.updates.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::Query(format!("no record with id {}", id)))?;
        record.name = patch.name.clone();
        record.brewery = patch.brewery.clone();
        record.category = patch.category.clone();
        record.abv = patch.abv;
        record.ibu = patch.ibu;
        record.notes = patch.notes.clone();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(StoreError::Query(format!("no record with id {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(name: &str) -> RecordPatch {
        RecordPatch {
            name: name.to_string(),
            brewery: None,
            category: None,
            abv: None,
            ibu: None,
            notes: None,
        }
    }

    #[test]
    fn test_insert_assigns_id_and_ambient_owner() {
        let mut store = MemoryStore::new("alice");
        let record = store.insert(&patch("Pale Ale")).unwrap();
        assert_eq!(record.owner, "alice");
        assert!(!record.id.is_empty());
        assert!(record.created_at > 0);
    }

    #[test]
    fn test_select_scopes_by_owner_and_sorts_descending() {
        let mut store = MemoryStore::new("alice");
        let mk = |id: &str, owner: &str, created_at: i64| Record {
            id: id.to_string(),
            owner: owner.to_string(),
            name: id.to_string(),
            brewery: None,
            category: None,
            abv: None,
            ibu: None,
            notes: None,
            created_at,
        };
        store.records = vec![
            mk("old", "alice", 100),
            mk("other", "bob", 300),
            mk("new", "alice", 200),
        ];
        let records = store.select_all("alice").unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut store = MemoryStore::new("alice");
        let record = store.insert(&patch("Pale Ale")).unwrap();

        let mut edit = patch("Pale Ale 2024");
        edit.abv = Some(6.2);
        store.update(&record.id, &edit).unwrap();
        let after_once = store.records()[0].clone();

        // Saving an unchanged buffer twice yields the same stored record.
        store.update(&record.id, &edit).unwrap();
        assert_eq!(store.records()[0], after_once);
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut store = MemoryStore::new("alice");
        assert!(store.delete("missing").is_err());
    }

    #[test]
    fn test_fail_next_fails_exactly_once() {
        let mut store = MemoryStore::new("alice");
        store.fail_next(StoreError::Connection("down".to_string()));
        assert!(store.select_all("alice").is_err());
        assert!(store.select_all("alice").is_ok());
    }

    #[test]
    fn test_call_log_counts_operations() {
        let mut store = MemoryStore::new("alice");
        let log = store.call_log();
        let record = store.insert(&patch("a")).unwrap();
        store.select_all("alice").unwrap();
        store.delete(&record.id).unwrap();
        assert_eq!(log.selects.load(Ordering::SeqCst), 1);
        assert_eq!(log.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(log.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(log.writes(), 2);
    }
}
