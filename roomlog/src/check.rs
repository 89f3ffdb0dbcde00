//! Read-only consistency checks over a [`Logbook`].
//!
//! The checks never fail with an error; they report `true` (PASS) or `false`
//! (FAIL). They are meant for reporters and tests, not for the write path.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::entry::EntryHandle;
use crate::logbook::Logbook;

/// Outcome of running every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Canonical order is non-decreasing.
    pub order: bool,
    /// Store entries and room-view references correspond one to one.
    pub bijection: bool,
    /// Every room view is sorted and follows the canonical order.
    pub room_order: bool,
}

impl CheckReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.order && self.bijection && self.room_order
    }
}

/// Runs all checks.
pub fn verify(logbook: &Logbook) -> CheckReport {
    CheckReport {
        order: check_order(logbook),
        bijection: check_bijection(logbook),
        room_order: check_room_order(logbook),
    }
}

/// PASS iff every adjacent pair in the canonical order is non-decreasing.
pub fn check_order(logbook: &Logbook) -> bool {
    logbook
        .canonical()
        .windows(2)
        .all(|pair| logbook.compare(pair[0], pair[1]) != Ordering::Greater)
}

/// PASS iff every stored entry is referenced by exactly one room-view slot and
/// every room-view slot resolves to a stored entry owned by that room.
pub fn check_bijection(logbook: &Logbook) -> bool {
    let mut references: HashMap<EntryHandle, usize> = HashMap::new();
    let mut total = 0usize;

    for (room_id, room) in logbook.rooms() {
        for &handle in room.entries() {
            match logbook.entry(handle) {
                Some(view) if view.entry.room() == room_id => {}
                _ => return false,
            }
            *references.entry(handle).or_insert(0) += 1;
            total += 1;
        }
    }

    let all_once = logbook
        .canonical()
        .iter()
        .all(|handle| references.get(handle) == Some(&1));

    all_once && total == logbook.len()
}

/// PASS iff each room view is sorted and lists its entries in the same
/// relative order as the canonical store.
pub fn check_room_order(logbook: &Logbook) -> bool {
    let positions: HashMap<EntryHandle, usize> = logbook
        .canonical()
        .iter()
        .enumerate()
        .map(|(position, &handle)| (handle, position))
        .collect();

    logbook.rooms().all(|(_, room)| {
        let sorted = room
            .entries()
            .windows(2)
            .all(|pair| logbook.compare(pair[0], pair[1]) != Ordering::Greater);

        let follows_store = room
            .entries()
            .iter()
            .map(|handle| positions.get(handle))
            .collect::<Option<Vec<_>>>()
            .is_some_and(|p| p.windows(2).all(|w| w[0] < w[1]));

        sorted && follows_store
    })
}
