//! In-memory document store with per-collection change feeds.
//!
//! Each [`Collection`] holds documents in insertion order behind an async
//! read/write lock and publishes every change on a broadcast channel.
//! State-changing operations perform their read-check-write under a single
//! write guard, which is what gives the engine its at-most-once transition
//! guarantee: the first writer wins and a concurrent second attempt sees
//! the already-updated status and fails its precondition.
//!
//! Subscribers receive [`ChangeEvent`]s for one collection only; no
//! ordering is guaranteed across collections. Dropping a [`Subscription`]
//! unregisters it.

pub mod retry;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRequest, DeductionRule, Department, Employee, LeaveRequest, Payslip,
};

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    /// Returns the document's unique id.
    fn id(&self) -> Uuid;
}

impl Document for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Department {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for DeductionRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for Payslip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for AttendanceRequest {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Document for LeaveRequest {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// The kind of change carried by a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A document was inserted.
    Created,
    /// A document was mutated in place.
    Updated,
    /// A document was removed.
    Deleted,
}

/// A change notification for one document in one collection.
#[derive(Debug, Clone)]
pub struct ChangeEvent<T> {
    /// What happened.
    pub kind: ChangeKind,
    /// The document after the change (before, for deletions).
    pub doc: T,
}

/// A live change feed for one collection.
///
/// Wraps a broadcast receiver; dropping the subscription unregisters it.
pub struct Subscription<T> {
    rx: broadcast::Receiver<ChangeEvent<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next change event.
    ///
    /// Returns `None` once the collection is gone. A slow subscriber that
    /// misses events resumes at the oldest retained one.
    pub async fn recv(&mut self) -> Option<ChangeEvent<T>> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// An insertion-ordered collection of documents.
///
/// Iteration order (via [`Collection::list`]) is insertion order, which is
/// the deterministic order the payroll calculator sums deductions in.
pub struct Collection<T> {
    name: &'static str,
    docs: RwLock<Vec<T>>,
    events: broadcast::Sender<ChangeEvent<T>>,
}

impl<T: Document> Collection<T> {
    /// Creates an empty collection. The name is used in error messages.
    pub fn new(name: &'static str) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            name,
            docs: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Inserts a document and publishes a `Created` event.
    pub async fn insert(&self, doc: T) -> T {
        let mut docs = self.docs.write().await;
        docs.push(doc.clone());
        self.publish(ChangeKind::Created, doc.clone());
        doc
    }

    /// Inserts a document unless an existing document matches `conflict`.
    ///
    /// The conflict check and the insert happen under one write guard, so
    /// two rapid submissions cannot both pass the check.
    pub async fn insert_unique<F>(&self, doc: T, conflict: F, message: &str) -> EngineResult<T>
    where
        F: Fn(&T) -> bool,
    {
        let mut docs = self.docs.write().await;
        if docs.iter().any(conflict) {
            return Err(EngineError::conflict(message));
        }
        docs.push(doc.clone());
        self.publish(ChangeKind::Created, doc.clone());
        Ok(doc)
    }

    /// Returns the document with the given id, if present.
    pub async fn get(&self, id: Uuid) -> Option<T> {
        let docs = self.docs.read().await;
        docs.iter().find(|d| d.id() == id).cloned()
    }

    /// Returns all documents in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let docs = self.docs.read().await;
        docs.clone()
    }

    /// Returns all documents matching the predicate, in insertion order.
    pub async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let docs = self.docs.read().await;
        docs.iter().filter(|d| predicate(d)).cloned().collect()
    }

    /// Mutates the document with the given id under the write guard.
    ///
    /// The closure checks its precondition against the current state and
    /// applies the change; if it errors, the document is left untouched.
    /// Publishes an `Updated` event on success.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> EngineResult<T>
    where
        F: FnOnce(&mut T) -> EngineResult<()>,
    {
        let mut docs = self.docs.write().await;
        let doc = docs
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| EngineError::NotFound {
                entity: self.name.to_string(),
                id: id.to_string(),
            })?;

        let mut candidate = doc.clone();
        apply(&mut candidate)?;
        *doc = candidate.clone();
        self.publish(ChangeKind::Updated, candidate.clone());
        Ok(candidate)
    }

    /// Removes the document with the given id and publishes a `Deleted`
    /// event.
    pub async fn remove(&self, id: Uuid) -> EngineResult<T> {
        let mut docs = self.docs.write().await;
        let position = docs
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| EngineError::NotFound {
                entity: self.name.to_string(),
                id: id.to_string(),
            })?;

        let doc = docs.remove(position);
        self.publish(ChangeKind::Deleted, doc.clone());
        Ok(doc)
    }

    /// Opens a change feed for this collection.
    pub async fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.events.subscribe(),
        }
    }

    /// Returns the number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn publish(&self, kind: ChangeKind, doc: T) {
        // Nobody listening is fine.
        let _ = self.events.send(ChangeEvent { kind, doc });
    }
}

/// The engine's document store: one collection per record type.
pub struct Store {
    /// Canonical employee records.
    pub employees: Collection<Employee>,
    /// Department records.
    pub departments: Collection<Department>,
    /// The deduction rule catalog.
    pub deductions: Collection<DeductionRule>,
    /// Generated payslips.
    pub payslips: Collection<Payslip>,
    /// Attendance claims.
    pub attendance_requests: Collection<AttendanceRequest>,
    /// Leave applications.
    pub leave_requests: Collection<LeaveRequest>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            employees: Collection::new("employee"),
            departments: Collection::new("department"),
            deductions: Collection::new("deduction rule"),
            payslips: Collection::new("payslip"),
            attendance_requests: Collection::new("attendance request"),
            leave_requests: Collection::new("leave request"),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
