//! Logbook: the top-level handle tying the registry and the store together.
//!
//! A [`Logbook`] owns the capacity configuration, the [`RoomRegistry`] and
//! the [`EntryStore`]. It is the only place that inserts entries, so it is the
//! only place that has to keep the canonical order and the room views in
//! step.
//!
//! # Insertion
//!
//! [`Logbook::create`] validates everything before touching either
//! structure:
//!
//! 1. the room id must resolve
//! 2. the reading must be valid
//! 3. the store and the room view must both have free capacity
//!
//! It then computes both insertion points (first position strictly greater
//! than the new entry, so equivalent entries keep arrival order), writes the
//! entry into the arena, and inserts its handle into the canonical order and
//! the room view. A failed call leaves the logbook unchanged.
//!
//! # Example
//!
//! ```rust
//! use roomlog::{Logbook, Motion, Reading};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut logbook = Logbook::default();
//! let kitchen = logbook.add_room("Kitchen")?;
//!
//! logbook.create(kitchen, Reading::Temperature(24.0), 100)?;
//! logbook.create(kitchen, Reading::Motion(Motion::new(1, 0, 1)?), 100)?;
//! logbook.create(kitchen, Reading::SoundLevel(45), 50)?;
//!
//! let timestamps: Vec<i64> = logbook.entries().map(|e| e.entry.timestamp()).collect();
//! assert_eq!(timestamps, vec![100, 50, 100]);
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;

use crate::config::LogbookConfig;
use crate::entry::{Entry, EntryHandle, EntryStore};
use crate::error::{EntryError, Result, RoomError};
use crate::order::{self, OrderKey};
use crate::reading::Reading;
use crate::room::{Room, RoomId, RoomRegistry};

/// Borrowed view of one entry together with its owning room's name.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    /// Handle of the entry.
    pub handle: EntryHandle,
    /// The entry data.
    pub entry: &'a Entry,
    /// Owning room name, or `None` if the room does not resolve.
    pub room_name: Option<&'a str>,
}

/// Room registry and canonical entry store with synchronized room views.
///
/// # Thread Safety
///
/// All mutation goes through `&mut self`. Share a logbook across threads only
/// behind a single-writer lock.
#[derive(Debug, Clone)]
pub struct Logbook {
    config: LogbookConfig,
    rooms: RoomRegistry,
    entries: EntryStore,
}

impl Default for Logbook {
    fn default() -> Self {
        Self::with_valid_config(LogbookConfig::default())
    }
}

impl Logbook {
    /// Creates an empty logbook with the given capacities.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` fails [`LogbookConfig::validate`].
    pub fn new(config: LogbookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: LogbookConfig) -> Self {
        Self {
            rooms: RoomRegistry::new(&config),
            entries: EntryStore::new(config.max_entries),
            config,
        }
    }

    /// The capacity configuration.
    pub fn config(&self) -> &LogbookConfig {
        &self.config
    }

    /// Registers a room. See [`RoomRegistry::add`].
    ///
    /// # Errors
    ///
    /// `Full`, `DuplicateName` or `InvalidInput` (empty name).
    pub fn add_room(&mut self, name: &str) -> Result<RoomId> {
        self.rooms.add(name)
    }

    /// Looks up a room by name.
    pub fn find_room(&self, name: &str) -> Option<RoomId> {
        self.rooms.find(name)
    }

    /// Resolves a room id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Iterates rooms in registration order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter()
    }

    /// Number of registered rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Records a reading for `room` at `timestamp`.
    ///
    /// The entry is placed after every existing entry it is order-equivalent
    /// to, both in the canonical order and in the room view.
    ///
    /// # Errors
    ///
    /// - [`EntryError::UnresolvedRoom`] if `room` does not resolve
    /// - [`EntryError::InvalidReading`] if the reading payload is rejected
    /// - [`EntryError::StoreFull`] or [`EntryError::RoomFull`] if a capacity
    ///   is exhausted
    ///
    /// Nothing is modified when an error is returned.
    pub fn create(&mut self, room: RoomId, reading: Reading, timestamp: i64) -> Result<EntryHandle> {
        let (store_index, room_index) = {
            let target = self.rooms.get(room).ok_or_else(|| EntryError::UnresolvedRoom {
                room: room.to_string(),
            })?;

            reading.validate()?;

            if self.entries.is_full() {
                return Err(EntryError::StoreFull {
                    max_entries: self.entries.capacity(),
                }
                .into());
            }
            if target.len() >= self.rooms.room_capacity() {
                return Err(EntryError::RoomFull {
                    room: target.name().to_string(),
                    max_room_entries: self.rooms.room_capacity(),
                }
                .into());
            }

            let candidate = OrderKey {
                room: target.name(),
                kind: reading.kind(),
                timestamp,
            };
            let key_of = |handle: EntryHandle| self.order_key(handle);
            (
                order::insertion_index(self.entries.canonical(), candidate, key_of),
                order::insertion_index(target.entries(), candidate, key_of),
            )
        };

        // Both sides are resolved before the store is written.
        let target = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| EntryError::UnresolvedRoom {
                room: room.to_string(),
            })?;
        let handle = self
            .entries
            .insert_at(store_index, Entry::new(reading, timestamp, room));
        target.insert_at(room_index, handle);
        Ok(handle)
    }

    /// Records a reading for the room called `room_name`.
    ///
    /// # Errors
    ///
    /// [`RoomError::NotFound`] if no such room exists, otherwise as
    /// [`create`](Self::create).
    pub fn create_in(
        &mut self,
        room_name: &str,
        reading: Reading,
        timestamp: i64,
    ) -> Result<EntryHandle> {
        let room = self
            .rooms
            .find(room_name)
            .ok_or_else(|| RoomError::NotFound {
                name: room_name.to_string(),
            })?;
        self.create(room, reading, timestamp)
    }

    /// Resolves an entry handle.
    pub fn entry(&self, handle: EntryHandle) -> Option<EntryView<'_>> {
        let entry = self.entries.get(handle)?;
        Some(EntryView {
            handle,
            entry,
            room_name: self.rooms.get(entry.room()).map(Room::name),
        })
    }

    /// Iterates all entries in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = EntryView<'_>> {
        self.entries.iter().map(|(handle, entry)| EntryView {
            handle,
            entry,
            room_name: self.rooms.get(entry.room()).map(Room::name),
        })
    }

    /// Iterates one room's entries in room-view order.
    ///
    /// Yields nothing if `room` does not resolve.
    pub fn room_entries(&self, room: RoomId) -> impl Iterator<Item = EntryView<'_>> {
        self.rooms
            .get(room)
            .map(Room::entries)
            .unwrap_or_default()
            .iter()
            .filter_map(|&handle| self.entry(handle))
    }

    /// Handles in canonical order.
    pub fn canonical(&self) -> &[EntryHandle] {
        self.entries.canonical()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort key of an entry, or `None` if the handle or its room does not resolve.
    pub fn order_key(&self, handle: EntryHandle) -> Option<OrderKey<'_>> {
        let entry = self.entries.get(handle)?;
        let room = self.rooms.get(entry.room())?;
        Some(OrderKey {
            room: room.name(),
            kind: entry.reading().kind(),
            timestamp: entry.timestamp(),
        })
    }

    /// Compares two entries under the ordering rule.
    pub fn compare(&self, a: EntryHandle, b: EntryHandle) -> Ordering {
        order::compare(self.order_key(a), self.order_key(b))
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut RoomRegistry, &mut EntryStore) {
        (&mut self.rooms, &mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoomlogError;
    use crate::reading::{Motion, ReadingKind};

    fn kinds(logbook: &Logbook) -> Vec<(String, ReadingKind, i64)> {
        logbook
            .entries()
            .map(|view| {
                (
                    view.room_name.unwrap().to_string(),
                    view.entry.reading().kind(),
                    view.entry.timestamp(),
                )
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = LogbookConfig {
            max_entries: 0,
            ..LogbookConfig::default()
        };
        assert!(matches!(Logbook::new(config), Err(RoomlogError::Config(_))));
    }

    #[test]
    fn test_kind_order_dominates_timestamp() {
        let mut logbook = Logbook::default();
        let kitchen = logbook.add_room("Kitchen").unwrap();

        logbook.create(kitchen, Reading::Temperature(24.0), 100).unwrap();
        logbook
            .create(kitchen, Reading::Motion(Motion::new(1, 0, 1).unwrap()), 100)
            .unwrap();
        logbook.create(kitchen, Reading::SoundLevel(45), 50).unwrap();

        assert_eq!(
            kinds(&logbook),
            vec![
                ("Kitchen".to_string(), ReadingKind::Temperature, 100),
                ("Kitchen".to_string(), ReadingKind::SoundLevel, 50),
                ("Kitchen".to_string(), ReadingKind::Motion, 100),
            ]
        );

        let room_view: Vec<EntryHandle> = logbook.room(kitchen).unwrap().entries().to_vec();
        assert_eq!(room_view, logbook.canonical());
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut logbook = Logbook::default();
        let lab = logbook.add_room("Lab").unwrap();

        let first = logbook.create(lab, Reading::SoundLevel(10), 7).unwrap();
        let second = logbook.create(lab, Reading::SoundLevel(20), 7).unwrap();
        let earlier = logbook.create(lab, Reading::SoundLevel(30), 1).unwrap();
        let third = logbook.create(lab, Reading::SoundLevel(40), 7).unwrap();

        assert_eq!(logbook.canonical(), &[earlier, first, second, third]);
        assert_eq!(logbook.room(lab).unwrap().entries(), &[earlier, first, second, third]);
    }

    #[test]
    fn test_handles_survive_insertions() {
        let mut logbook = Logbook::default();
        let room = logbook.add_room("Office").unwrap();

        let late = logbook.create(room, Reading::SoundLevel(55), 900).unwrap();
        for ts in (0..10).rev() {
            logbook.create(room, Reading::SoundLevel(ts as i32), ts).unwrap();
        }

        let view = logbook.entry(late).unwrap();
        assert_eq!(view.entry.timestamp(), 900);
        assert_eq!(view.entry.reading(), &Reading::SoundLevel(55));
        assert_eq!(*logbook.canonical().last().unwrap(), late);
    }

    #[test]
    fn test_unresolved_room_is_null_reference() {
        let mut other = Logbook::default();
        other.add_room("A").unwrap();
        let foreign = other.add_room("B").unwrap();

        let mut logbook = Logbook::default();
        logbook.add_room("Old").unwrap();

        let result = logbook.create(foreign, Reading::Temperature(20.0), 1);
        assert!(matches!(
            result,
            Err(RoomlogError::Entry(EntryError::UnresolvedRoom { .. }))
        ));
        assert!(logbook.is_empty());
    }

    #[test]
    fn test_invalid_reading_no_mutation() {
        let mut logbook = Logbook::default();
        let room = logbook.add_room("Lab").unwrap();

        let result = logbook.create(room, Reading::Temperature(f32::NAN), 1);
        assert!(matches!(
            result,
            Err(RoomlogError::Entry(EntryError::InvalidReading { .. }))
        ));
        assert!(logbook.is_empty());
        assert!(logbook.room(room).unwrap().is_empty());
    }

    #[test]
    fn test_room_capacity_checked_separately() {
        let config = LogbookConfig {
            max_entries: 4,
            max_room_entries: 2,
            ..LogbookConfig::default()
        };
        let mut logbook = Logbook::new(config).unwrap();
        let a = logbook.add_room("A").unwrap();
        let b = logbook.add_room("B").unwrap();

        logbook.create(a, Reading::SoundLevel(1), 1).unwrap();
        logbook.create(a, Reading::SoundLevel(2), 2).unwrap();

        let result = logbook.create(a, Reading::SoundLevel(3), 3);
        assert!(matches!(
            result,
            Err(RoomlogError::Entry(EntryError::RoomFull { max_room_entries: 2, .. }))
        ));
        assert_eq!(logbook.len(), 2);

        // Other rooms still accept entries.
        logbook.create(b, Reading::SoundLevel(4), 4).unwrap();
        assert_eq!(logbook.len(), 3);
    }

    #[test]
    fn test_create_in_unknown_room() {
        let mut logbook = Logbook::default();
        logbook.add_room("Lab").unwrap();

        let result = logbook.create_in("Ghost", Reading::SoundLevel(1), 1);
        assert!(matches!(
            result,
            Err(RoomlogError::Room(RoomError::NotFound { ref name })) if name == "Ghost"
        ));
        assert!(logbook.is_empty());
        assert_eq!(logbook.room_count(), 1);
    }

    #[test]
    fn test_room_entries_view() {
        let mut logbook = Logbook::default();
        let a = logbook.add_room("A").unwrap();
        let b = logbook.add_room("B").unwrap();

        logbook.create(b, Reading::SoundLevel(1), 5).unwrap();
        logbook.create(a, Reading::SoundLevel(2), 9).unwrap();
        logbook.create(b, Reading::SoundLevel(3), 1).unwrap();

        let b_times: Vec<i64> = logbook.room_entries(b).map(|v| v.entry.timestamp()).collect();
        assert_eq!(b_times, vec![1, 5]);

        let mut other = Logbook::default();
        other.add_room("A").unwrap();
        assert_eq!(other.room_entries(b).count(), 0);
    }

    #[test]
    fn test_compare_uses_room_names() {
        let mut logbook = Logbook::default();
        let zeta = logbook.add_room("Zeta").unwrap();
        let alpha = logbook.add_room("Alpha").unwrap();

        let z = logbook.create(zeta, Reading::Temperature(1.0), 0).unwrap();
        let a = logbook.create(alpha, Reading::Motion(Motion::from_bools(true, false, false)), 99).unwrap();

        assert_eq!(logbook.compare(a, z), Ordering::Less);
        assert_eq!(logbook.compare(z, z), Ordering::Equal);
    }
}
