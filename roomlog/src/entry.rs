//! Canonical entry store.
//!
//! The store is an index-addressed arena: every entry is written once into
//! the next free slot and never moves. The canonical order is kept separately
//! as a vector of [`EntryHandle`]s, so inserting in the middle of the order
//! only shifts handles. Room views hold the same handles, which stay valid
//! across every insertion.
//!
//! # Layout
//!
//! ```text
//! slots:  [e0, e1, e2, e3]          <- arrival order, never reordered
//! order:  [h2, h0, h3, h1]          <- ordering-rule order
//! room A: [h2, h0]                  <- subset of order, same relative order
//! room B: [h3, h1]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reading::Reading;
use crate::room::RoomId;

/// Stable handle to an entry in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryHandle {
    slot: u32,
}

impl EntryHandle {
    /// Arena slot of the entry (its arrival index).
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl fmt::Display for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry#{}", self.slot)
    }
}

/// An immutable reading owned by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    reading: Reading,
    timestamp: i64,
    room: RoomId,
}

impl Entry {
    pub(crate) fn new(reading: Reading, timestamp: i64, room: RoomId) -> Self {
        Self {
            reading,
            timestamp,
            room,
        }
    }

    /// The reading payload.
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// The reading timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The owning room.
    pub fn room(&self) -> RoomId {
        self.room
    }
}

/// Fixed-capacity arena of entries plus their canonical order.
#[derive(Debug, Clone)]
pub struct EntryStore {
    slots: Vec<Entry>,
    order: Vec<EntryHandle>,
    max_entries: usize,
}

impl EntryStore {
    /// Creates an empty store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_entries),
            order: Vec::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Resolves a handle.
    pub fn get(&self, handle: EntryHandle) -> Option<&Entry> {
        self.slots.get(handle.slot as usize)
    }

    /// Handles in canonical order.
    pub fn canonical(&self) -> &[EntryHandle] {
        &self.order
    }

    /// Iterates entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryHandle, &Entry)> {
        self.order
            .iter()
            .map(|&handle| (handle, &self.slots[handle.slot as usize]))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Whether another entry would exceed the capacity.
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.max_entries
    }

    /// Writes `entry` into the next free slot and places its handle at
    /// `index` in the canonical order.
    ///
    /// Callers check [`is_full`](Self::is_full) first.
    #[allow(clippy::cast_possible_truncation)] // slot < max_entries <= MAX_CAPACITY
    pub(crate) fn insert_at(&mut self, index: usize, entry: Entry) -> EntryHandle {
        debug_assert!(!self.is_full());
        let handle = EntryHandle {
            slot: self.slots.len() as u32,
        };
        self.slots.push(entry);
        self.order.insert(index, handle);
        handle
    }

    #[cfg(test)]
    pub(crate) fn order_mut(&mut self) -> &mut Vec<EntryHandle> {
        &mut self.order
    }
}
