// SPDX-License-Identifier: MPL-2.0
//! The switch-notification registry.
//!
//! Callbacks registered here run synchronously, in registration order, after
//! every successful language switch. Ids come from a process-wide atomic
//! counter: monotonic, never reused, safe to allocate from any thread even
//! though dispatch itself stays on the switching thread. There is no
//! unsubscribe; entries live as long as the engine.

use super::I18n;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CALLBACK_ID: AtomicU32 = AtomicU32::new(1);

/// Allocates a fresh process-wide callback id.
pub fn next_callback_id() -> u32 {
    NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed)
}

/// One switch subscriber: an id and the closure to re-run after a switch.
/// The closure receives the engine so it can re-resolve its text against the
/// newly active catalog.
pub struct Callback {
    id: u32,
    invoke: Box<dyn FnMut(&I18n)>,
}

impl Callback {
    /// Wraps `invoke` with a freshly allocated id.
    pub fn new(invoke: impl FnMut(&I18n) + 'static) -> Self {
        Self {
            id: next_callback_id(),
            invoke: Box::new(invoke),
        }
    }

    /// Wraps `invoke` with an id the caller drew from [`next_callback_id`]
    /// earlier, for callers that track their subscriptions themselves.
    pub fn with_id(id: u32, invoke: impl FnMut(&I18n) + 'static) -> Self {
        Self {
            id,
            invoke: Box::new(invoke),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn run(&mut self, engine: &I18n) {
        (self.invoke)(engine)
    }
}

#[derive(Default)]
pub(crate) struct CallbackRegistry {
    entries: Vec<Callback>,
}

impl CallbackRegistry {
    /// Inserts at the end, preserving registration order. Returns `false`
    /// without inserting when the id is already registered.
    pub(crate) fn insert(&mut self, callback: Callback) -> bool {
        if self.contains(callback.id) {
            return false;
        }
        self.entries.push(callback);
        true
    }

    pub(crate) fn contains(&self, id: u32) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Moves the entries out for dispatch, so callbacks can borrow the
    /// engine immutably while they run.
    pub(crate) fn take(&mut self) -> Vec<Callback> {
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn restore(&mut self, entries: Vec<Callback>) {
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let first = next_callback_id();
        let second = next_callback_id();
        assert!(second > first);
    }

    #[test]
    fn ids_stay_unique_under_parallel_allocation() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| (0..100).map(|_| next_callback_id()).collect::<Vec<u32>>())
            })
            .collect();

        let mut all: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("allocation thread panicked"))
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut registry = CallbackRegistry::default();
        let id = next_callback_id();

        assert!(registry.insert(Callback::with_id(id, |_| {})));
        assert!(!registry.insert(Callback::with_id(id, |_| {})));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn insert_preserves_registration_order() {
        let mut registry = CallbackRegistry::default();
        let first = Callback::new(|_| {});
        let second = Callback::new(|_| {});
        let (first_id, second_id) = (first.id(), second.id());

        registry.insert(first);
        registry.insert(second);

        let order: Vec<u32> = registry.take().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![first_id, second_id]);
    }
}
