//! # View State
//!
//! Guards a pending result against the view that asked for it going away.
//!
//! ```text
//!  open() ──► Ticket(g) ──► request in flight ──► apply(Ticket(g), value)
//!                                                     │
//!        close() / open() again bumps generation ─────┤
//!                                                     ▼
//!                         generation == g && open ? store : discard
//! ```
//!
//! Shared through `Arc<Mutex<_>>` like the other state types; the request
//! task and the caller each hold a clone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Proof that a result belongs to a particular opening of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    open: bool,
    value: Option<T>,
}

#[derive(Debug)]
pub struct ViewState<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        ViewState {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewState<T> {
    /// A closed view with no value.
    pub fn new() -> Self {
        ViewState {
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                open: false,
                value: None,
            })),
        }
    }

    // A panic elsewhere leaves the slot consistent; keep using it.
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the view. Earlier tickets become stale.
    pub fn open(&self) -> Ticket {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.open = true;
        slot.value = None;
        Ticket(slot.generation)
    }

    /// Dismisses the view. Outstanding tickets become stale.
    pub fn close(&self) {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.open = false;
        slot.value = None;
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    /// Stores `value` if `ticket` is still current. Returns whether it did.
    pub fn apply(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.lock();
        if slot.open && slot.generation == ticket.0 {
            slot.value = Some(value);
            true
        } else {
            tracing::debug!(
                ticket = ticket.0,
                current = slot.generation,
                "Discarding result for a dismissed view"
            );
            false
        }
    }

    /// Removes the stored value, if any.
    pub fn take(&self) -> Option<T> {
        self.lock().value.take()
    }
}
