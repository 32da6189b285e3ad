//! Record list state: the authoritative in-memory snapshot of the current
//! user's records.
//!
//! The snapshot is fully discarded and rebuilt on every fetch — no
//! incremental patching. Change notification is explicit: every mutation
//! bumps `revision`, and consumers (the derived-view cache) recompute only
//! when the revision they last saw differs.

use crate::model::Record;
use crate::store::StoreError;

#[derive(Debug, Default)]
pub struct Inventory {
    records: Vec<Record>,
    /// True while a fetch round trip is in flight.
    pub loading: bool,
    /// Human-readable message of the last failed fetch, cleared on success.
    pub error: Option<String>,
    revision: u64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks a fetch as dispatched. The previous set stays visible while
    /// the request is in flight.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.revision += 1;
    }

    /// Applies a fetch reply. On success the entire set is replaced and any
    /// error cleared; on failure the previous set (or empty, if none was
    /// ever loaded) is preserved and the message recorded. When replies
    /// from overlapping fetches arrive, the last one applied wins.
    pub fn apply_fetch(&mut self, result: Result<Vec<Record>, StoreError>) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        self.revision += 1;
    }

    /// Discards the snapshot entirely (sign-out).
    pub fn clear(&mut self) {
        self.records.clear();
        self.loading = false;
        self.error = None;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Record {
        Record {
            id: id.to_string(),
            owner: "alice".to_string(),
            name: format!("beer {}", id),
            brewery: None,
            category: None,
            abv: None,
            ibu: None,
            notes: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_fetch_success_replaces_entire_set() {
        let mut inv = Inventory::new();
        inv.begin_fetch();
        assert!(inv.loading);
        inv.apply_fetch(Ok(vec![record("1"), record("2")]));
        assert!(!inv.loading);
        assert_eq!(inv.records().len(), 2);

        inv.begin_fetch();
        inv.apply_fetch(Ok(vec![record("3")]));
        assert_eq!(inv.records().len(), 1);
        assert_eq!(inv.records()[0].id, "3");
    }

    #[test]
    fn test_fetch_failure_preserves_previous_set() {
        let mut inv = Inventory::new();
        inv.begin_fetch();
        inv.apply_fetch(Ok(vec![record("1")]));

        inv.begin_fetch();
        inv.apply_fetch(Err(StoreError::Query("boom".to_string())));
        assert_eq!(inv.records().len(), 1);
        assert!(inv.error.as_deref().unwrap().contains("boom"));
        assert!(!inv.loading);
    }

    #[test]
    fn test_fetch_success_clears_error() {
        let mut inv = Inventory::new();
        inv.apply_fetch(Err(StoreError::Connection("down".to_string())));
        assert!(inv.error.is_some());
        inv.apply_fetch(Ok(vec![record("1")]));
        assert!(inv.error.is_none());
    }

    #[test]
    fn test_revision_bumps_on_every_change() {
        let mut inv = Inventory::new();
        let r0 = inv.revision();
        inv.begin_fetch();
        let r1 = inv.revision();
        assert!(r1 > r0);
        inv.apply_fetch(Ok(vec![]));
        let r2 = inv.revision();
        assert!(r2 > r1);
        inv.clear();
        assert!(inv.revision() > r2);
    }
}
