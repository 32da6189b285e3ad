//! Store worker thread.
//!
//! Owns the store client and the identity provider, and serializes all
//! remote operations: requests are processed strictly in the order they
//! were sent, one network round trip at a time, so a refetch enqueued
//! after an action's success reply strictly follows that action. The UI
//! thread never blocks on the store.
//!
//! Replies are delivered through a caller-supplied callback (the TUI
//! passes a clone of its event channel sender).

use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::auth::{Identity, IdentityProvider};
use crate::model::{Record, RecordPatch};

use super::{RecordStore, StoreError};

/// Operations the UI can request.
#[derive(Debug)]
pub enum StoreRequest {
    /// Resolve the current session identity.
    ResolveIdentity,
    /// Fetch all records owned by the identity.
    Fetch { owner: String },
    Insert { patch: RecordPatch },
    Update { id: String, patch: RecordPatch },
    Delete { id: String },
    SignOut,
    /// Stop the worker thread.
    Shutdown,
}

/// Replies delivered back to the UI, one per request (except `Shutdown`).
#[derive(Debug)]
pub enum StoreReply {
    Identity(Option<Identity>),
    Fetched(Result<Vec<Record>, StoreError>),
    Inserted(Result<Record, StoreError>),
    Updated {
        id: String,
        result: Result<(), StoreError>,
    },
    Deleted {
        id: String,
        result: Result<(), StoreError>,
    },
    SignedOut,
}

/// Handle to the worker thread. Dropping it shuts the worker down.
pub struct StoreWorker {
    tx: Sender<StoreRequest>,
    handle: Option<JoinHandle<()>>,
}

impl StoreWorker {
    /// Spawns the worker. `on_reply` is invoked on the worker thread for
    /// every reply; it must hand the reply over to the UI event loop.
    pub fn spawn<F>(
        mut store: Box<dyn RecordStore>,
        mut identity: Box<dyn IdentityProvider>,
        mut on_reply: F,
    ) -> Self
    where
        F: FnMut(StoreReply) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<StoreRequest>();

        let handle = thread::spawn(move || {
            info!("store worker started");
            while let Ok(request) = rx.recv() {
                let reply = match request {
                    StoreRequest::ResolveIdentity => {
                        let resolved = identity.resolve();
                        debug!(signed_in = resolved.is_some(), "identity resolved");
                        StoreReply::Identity(resolved)
                    }
                    StoreRequest::Fetch { owner } => {
                        let result = store.select_all(&owner);
                        if let Err(e) = &result {
                            warn!("fetch failed: {}", e);
                        }
                        StoreReply::Fetched(result)
                    }
                    StoreRequest::Insert { patch } => {
                        let result = store.insert(&patch);
                        if let Err(e) = &result {
                            warn!("insert failed: {}", e);
                        }
                        StoreReply::Inserted(result)
                    }
                    StoreRequest::Update { id, patch } => {
                        let result = store.update(&id, &patch);
                        if let Err(e) = &result {
                            warn!("update failed: {}", e);
                        }
                        StoreReply::Updated { id, result }
                    }
                    StoreRequest::Delete { id } => {
                        let result = store.delete(&id);
                        if let Err(e) = &result {
                            warn!("delete failed: {}", e);
                        }
                        StoreReply::Deleted { id, result }
                    }
                    StoreRequest::SignOut => {
                        identity.sign_out();
                        info!("signed out");
                        StoreReply::SignedOut
                    }
                    StoreRequest::Shutdown => break,
                };
                on_reply(reply);
            }
            info!("store worker stopped");
        });

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Enqueues a request. Silently dropped if the worker is gone; the
    /// UI will simply never see a reply, which it already tolerates.
    pub fn send(&self, request: StoreRequest) {
        if self.tx.send(request).is_err() {
            warn!("store worker is not running; request dropped");
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(StoreRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::auth::StaticIdentity;
    use crate::store::MemoryStore;

    fn spawn_with(
        store: MemoryStore,
    ) -> (StoreWorker, mpsc::Receiver<StoreReply>) {
        let (reply_tx, reply_rx) = mpsc::channel();
        let worker = StoreWorker::spawn(
            Box::new(store),
            Box::new(StaticIdentity::new("alice", "alice@example.com")),
            move |reply| {
                let _ = reply_tx.send(reply);
            },
        );
        (worker, reply_rx)
    }

    fn recv(rx: &mpsc::Receiver<StoreReply>) -> StoreReply {
        rx.recv_timeout(Duration::from_secs(5)).expect("worker reply")
    }

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
    fn test_replies_arrive_in_request_order() {
        let (worker, rx) = spawn_with(MemoryStore::new("alice"));

        worker.send(StoreRequest::ResolveIdentity);
        worker.send(StoreRequest::Insert {
            patch: patch("Pale Ale"),
        });
        // The fetch is enqueued after the insert, so its reply must
        // reflect the inserted record.
        worker.send(StoreRequest::Fetch {
            owner: "alice".to_string(),
        });

        match recv(&rx) {
            StoreReply::Identity(Some(identity)) => assert_eq!(identity.id, "alice"),
            other => panic!("unexpected reply: {:?}", other),
        }
        match recv(&rx) {
            StoreReply::Inserted(Ok(record)) => assert_eq!(record.name, "Pale Ale"),
            other => panic!("unexpected reply: {:?}", other),
        }
        match recv(&rx) {
            StoreReply::Fetched(Ok(records)) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].name, "Pale Ale");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_failed_operation_reports_error() {
        let mut store = MemoryStore::new("alice");
        store.fail_next(StoreError::Connection("down".to_string()));
        let (worker, rx) = spawn_with(store);

        worker.send(StoreRequest::Fetch {
            owner: "alice".to_string(),
        });
        match recv(&rx) {
            StoreReply::Fetched(Err(StoreError::Connection(msg))) => {
                assert_eq!(msg, "down");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_sign_out_then_resolve_returns_none() {
        let (worker, rx) = spawn_with(MemoryStore::new("alice"));

        worker.send(StoreRequest::SignOut);
        worker.send(StoreRequest::ResolveIdentity);

        assert!(matches!(recv(&rx), StoreReply::SignedOut));
        match recv(&rx) {
            StoreReply::Identity(None) => {}
            other => panic!("unexpected reply: {:?}", other),
        }
    }
}
