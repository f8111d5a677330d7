//! # Listener registry.
//!
//! The registry is the single source of truth for which listeners exist. Every
//! access goes through one mutex: registration, removal, eviction and the
//! fan-out snapshot.
//!
//! ## Architecture
//! ```text
//! Registry (HashMap<String, Slot> behind Mutex)
//!   ├─► insert_with(id)      → duplicate check + spawn worker + insert (one critical section)
//!   ├─► fan_out(line)        → send into every slot queue (same critical section)
//!   ├─► remove(id)           → hand the slot to the caller (deregister)
//!   ├─► evict(id, serial)    → remove only if the slot is still the same registration
//!   └─► drain()              → hand every slot to the caller (shutdown)
//! ```
//!
//! ## Rules
//! - Ids are unique among registered slots; a removed id can be reused at once.
//! - Fan-out enqueues under the lock, so the order entries are admitted is the
//!   order each listener's queue sees them.
//! - Queues are unbounded. Fan-out never waits and never drops; the only bound on a
//!   listener's backlog is its worker's delivery timeout.
//! - Each registration gets a fresh serial; a stale worker can never evict a newer
//!   registration that reused its id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::LogError;

/// One registration: the queue feeding its delivery worker.
pub(crate) struct Slot {
    /// Registration identity (unique per process).
    pub(crate) serial: u64,
    /// Sender side of the per-listener delivery queue.
    pub(crate) queue: mpsc::UnboundedSender<Arc<str>>,
    /// Delivery worker draining `queue` into the endpoint.
    pub(crate) worker: JoinHandle<()>,
    /// Task consuming the endpoint, for listeners driven by [`Listen`](crate::Listen).
    pub(crate) consumer: Option<JoinHandle<()>>,
}

/// Synchronized map of listener id to [`Slot`].
pub(crate) struct Registry {
    slots: Mutex<HashMap<String, Slot>>,
    serials: AtomicU64,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            serials: AtomicU64::new(1),
        }
    }

    /// Locks the map; a panic elsewhere never leaves it half-written, so poison is ignored.
    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `id`, building its slot with a fresh serial.
    ///
    /// `build` runs inside the critical section and only if `id` is free.
    pub(crate) fn insert_with<F>(&self, id: String, build: F) -> Result<u64, LogError>
    where
        F: FnOnce(u64) -> Slot,
    {
        let mut slots = self.slots();
        if slots.contains_key(&id) {
            return Err(LogError::DuplicateListener { id });
        }
        let serial = self.serials.fetch_add(1, Ordering::Relaxed);
        let slot = build(serial);
        slots.insert(id, slot);
        Ok(serial)
    }

    /// Queues `line` for every registered listener and returns how many took it.
    ///
    /// A closed queue means the worker already stopped and eviction is in flight;
    /// it is skipped.
    pub(crate) fn fan_out(&self, line: &Arc<str>) -> usize {
        self.slots()
            .values()
            .filter(|slot| slot.queue.send(Arc::clone(line)).is_ok())
            .count()
    }

    /// Removes and returns the slot for `id`.
    pub(crate) fn remove(&self, id: &str) -> Option<Slot> {
        self.slots().remove(id)
    }

    /// Removes `id` only if it still belongs to registration `serial`.
    pub(crate) fn evict(&self, id: &str, serial: u64) -> Option<Slot> {
        let mut slots = self.slots();
        match slots.get(id) {
            Some(slot) if slot.serial == serial => slots.remove(id),
            _ => None,
        }
    }

    /// Empties the registry, returning every slot.
    pub(crate) fn drain(&self) -> Vec<(String, Slot)> {
        self.slots().drain().collect()
    }

    /// Sorted list of registered ids.
    pub(crate) fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.slots().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.slots().contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parked_slot(serial: u64) -> (Slot, mpsc::UnboundedReceiver<Arc<str>>) {
        let (queue, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(async {});
        (
            Slot {
                serial,
                queue,
                worker,
                consumer: None,
            },
            rx,
        )
    }

    #[tokio::test]
    async fn test_duplicate_keeps_first() {
        let reg = Registry::new();
        let mut first_rx = None;
        let serial = reg
            .insert_with("x".into(), |s| {
                let (slot, rx) = parked_slot(s);
                first_rx = Some(rx);
                slot
            })
            .unwrap();

        let err = reg
            .insert_with("x".into(), |_| unreachable!("build must not run for duplicates"))
            .unwrap_err();
        assert_eq!(err, LogError::DuplicateListener { id: "x".into() });

        assert_eq!(reg.len(), 1);
        assert!(reg.evict("x", serial).is_some());
        assert!(first_rx.is_some());
    }

    #[tokio::test]
    async fn test_evict_ignores_stale_serial() {
        let reg = Registry::new();
        let old = reg
            .insert_with("x".into(), |s| parked_slot(s).0)
            .unwrap();
        assert!(reg.remove("x").is_some());

        let new = reg
            .insert_with("x".into(), |s| parked_slot(s).0)
            .unwrap();
        assert_ne!(old, new);

        assert!(reg.evict("x", old).is_none());
        assert!(reg.contains("x"));
        assert!(reg.evict("x", new).is_some());
        assert!(!reg.contains("x"));
    }

    #[tokio::test]
    async fn test_fan_out_skips_closed_queues() {
        let reg = Registry::new();
        let mut receivers = Vec::new();
        for id in ["a", "b"] {
            reg.insert_with(id.into(), |s| {
                let (slot, rx) = parked_slot(s);
                receivers.push(rx);
                slot
            })
            .unwrap();
        }

        assert_eq!(reg.fan_out(&Arc::from("one")), 2);

        drop(receivers.pop());
        assert_eq!(reg.fan_out(&Arc::from("two")), 1);

        let a = &mut receivers[0];
        assert_eq!(a.recv().await.as_deref(), Some("one"));
        assert_eq!(a.recv().await.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_fan_out_never_drops_a_backlog() {
        let reg = Registry::new();
        let mut rx = None;
        reg.insert_with("slow".into(), |s| {
            let (slot, r) = parked_slot(s);
            rx = Some(r);
            slot
        })
        .unwrap();
        let mut rx = rx.unwrap();

        for i in 0..5_000 {
            assert_eq!(reg.fan_out(&Arc::from(format!("{i}"))), 1);
        }
        for i in 0..5_000 {
            assert_eq!(rx.recv().await.as_deref(), Some(format!("{i}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_drain_and_ids() {
        let reg = Registry::new();
        for id in ["c", "a", "b"] {
            reg.insert_with(id.into(), |s| parked_slot(s).0).unwrap();
        }
        assert_eq!(reg.ids(), vec!["a", "b", "c"]);

        let drained = reg.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(reg.len(), 0);
        assert!(reg.drain().is_empty());
    }
}
