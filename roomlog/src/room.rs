//! Room registry for the roomlog sensor log.
//!
//! Rooms are identified by name and hold an ordered view of the entries that
//! belong to them. The view stores [`EntryHandle`]s into the canonical store,
//! never copies of entry data.
//!
//! # Overview
//!
//! - [`RoomId`] - `Copy` reference to a registered room
//! - [`Room`] - Room name plus its ordered entry view
//! - [`RoomRegistry`] - Capacity-bounded set of rooms with unique names
//!
//! # Naming
//!
//! Names longer than the configured usable length are truncated (on a UTF-8
//! character boundary) before they are stored or looked up. Two names that
//! only differ past the limit therefore refer to the same room.
//!
//! # Example
//!
//! ```rust
//! use roomlog::config::LogbookConfig;
//! use roomlog::room::RoomRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = RoomRegistry::new(&LogbookConfig::default());
//!
//! let kitchen = registry.add("Kitchen")?;
//! assert_eq!(registry.find("Kitchen"), Some(kitchen));
//! assert!(registry.add("Kitchen").is_err());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LogbookConfig;
use crate::entry::EntryHandle;
use crate::error::{Result, RoomError};

/// Reference to a registered room.
///
/// Ids are positions in registration order. An id issued by a different
/// registry may not resolve here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId {
    index: u32,
}

impl RoomId {
    /// Position of the room in registration order.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.index)
    }
}

/// A room and its ordered entry view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    entries: Vec<EntryHandle>,
}

impl Room {
    fn new(name: String, capacity: usize) -> Self {
        Self {
            name,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// The room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of this room's entries, in ordering-rule order.
    pub fn entries(&self) -> &[EntryHandle] {
        &self.entries
    }

    /// Number of entries referenced by this room.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this room references no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Opens a slot at `index` and stores `handle` there.
    pub(crate) fn insert_at(&mut self, index: usize, handle: EntryHandle) {
        self.entries.insert(index, handle);
    }

    #[cfg(test)]
    pub(crate) fn entries_mut(&mut self) -> &mut Vec<EntryHandle> {
        &mut self.entries
    }
}

/// Capacity-bounded registry of uniquely named rooms.
///
/// Rooms are kept in registration order and are never removed.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    max_rooms: usize,
    max_room_entries: usize,
    usable_name_len: usize,
}

impl RoomRegistry {
    /// Creates an empty registry sized by `config`.
    pub fn new(config: &LogbookConfig) -> Self {
        Self {
            rooms: Vec::with_capacity(config.max_rooms),
            max_rooms: config.max_rooms,
            max_room_entries: config.max_room_entries,
            usable_name_len: config.usable_name_len(),
        }
    }

    /// Looks up a room by exact (truncated) name.
    pub fn find(&self, name: &str) -> Option<RoomId> {
        let name = truncate_name(name, self.usable_name_len);
        self.rooms
            .iter()
            .position(|room| room.name == name)
            .map(|index| self.id_at(index))
    }

    /// Registers a new room with an empty entry view.
    ///
    /// The name is truncated to the configured usable length first.
    ///
    /// # Errors
    ///
    /// - [`RoomError::EmptyName`] if `name` is empty once truncated
    /// - [`RoomError::RegistryFull`] if the registry is at capacity
    /// - [`RoomError::DuplicateName`] if a room with the same name exists
    pub fn add(&mut self, name: &str) -> Result<RoomId> {
        let name = truncate_name(name, self.usable_name_len);
        if name.is_empty() {
            return Err(RoomError::EmptyName.into());
        }

        if self.rooms.len() >= self.max_rooms {
            return Err(RoomError::RegistryFull {
                max_rooms: self.max_rooms,
            }
            .into());
        }

        if self.find(name).is_some() {
            return Err(RoomError::DuplicateName {
                name: name.to_string(),
            }
            .into());
        }

        self.rooms
            .push(Room::new(name.to_string(), self.max_room_entries));
        Ok(self.id_at(self.rooms.len() - 1))
    }

    /// Resolves a room id.
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index as usize)
    }

    pub(crate) fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index as usize)
    }

    /// Iterates rooms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(index, room)| (self.id_at(index), room))
    }

    /// Number of registered rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms are registered.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Maximum number of rooms.
    pub fn capacity(&self) -> usize {
        self.max_rooms
    }

    /// Maximum number of entries a single room may reference.
    pub fn room_capacity(&self) -> usize {
        self.max_room_entries
    }

    #[allow(clippy::cast_possible_truncation)] // index < max_rooms <= MAX_CAPACITY
    fn id_at(&self, index: usize) -> RoomId {
        RoomId {
            index: index as u32,
        }
    }
}

/// Truncates `name` to at most `max_len` bytes without splitting a character.
pub fn truncate_name(name: &str, max_len: usize) -> &str {
    if name.len() <= max_len {
        return name;
    }
    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoomlogError;

    fn small_config(max_rooms: usize) -> LogbookConfig {
        LogbookConfig {
            max_rooms,
            ..LogbookConfig::default()
        }
    }

    #[test]
    fn test_add_and_find() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        assert!(registry.find("Kitchen").is_none());

        let kitchen = registry.add("Kitchen").unwrap();
        let lab = registry.add("Lab").unwrap();

        assert_ne!(kitchen, lab);
        assert_eq!(registry.find("Kitchen"), Some(kitchen));
        assert_eq!(registry.find("Lab"), Some(lab));
        assert_eq!(registry.len(), 2);

        let room = registry.get(kitchen).unwrap();
        assert_eq!(room.name(), "Kitchen");
        assert!(room.is_empty());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        registry.add("Kitchen").unwrap();
        assert!(registry.find("kitchen").is_none());
        assert!(registry.add("kitchen").is_ok());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        registry.add("Lab").unwrap();

        let result = registry.add("Lab");
        assert!(matches!(
            result,
            Err(RoomlogError::Room(RoomError::DuplicateName { ref name })) if name == "Lab"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut registry = RoomRegistry::new(&small_config(2));
        registry.add("A").unwrap();
        registry.add("B").unwrap();

        let result = registry.add("C");
        assert!(matches!(
            result,
            Err(RoomlogError::Room(RoomError::RegistryFull { max_rooms: 2 }))
        ));
        assert_eq!(registry.len(), 2);
        assert!(registry.find("C").is_none());
    }

    #[test]
    fn test_full_reported_before_duplicate() {
        let mut registry = RoomRegistry::new(&small_config(1));
        registry.add("A").unwrap();
        assert!(matches!(
            registry.add("A"),
            Err(RoomlogError::Room(RoomError::RegistryFull { .. }))
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        assert!(matches!(
            registry.add(""),
            Err(RoomlogError::Room(RoomError::EmptyName))
        ));
    }

    #[test]
    fn test_long_names_truncated() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        let long = "A".repeat(40);

        let id = registry.add(&long).unwrap();
        assert_eq!(registry.get(id).unwrap().name().len(), 31);
        assert_eq!(registry.find(&long), Some(id));
        assert_eq!(registry.find(&"A".repeat(31)), Some(id));

        // Same 31-byte prefix collides.
        let other = format!("{}B", "A".repeat(35));
        assert!(matches!(
            registry.add(&other),
            Err(RoomlogError::Room(RoomError::DuplicateName { .. }))
        ));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // 'é' is two bytes; cutting at 3 would split the second one.
        assert_eq!(truncate_name("éé", 3), "é");
        assert_eq!(truncate_name("abc", 3), "abc");
        assert_eq!(truncate_name("abcd", 3), "abc");
    }

    #[test]
    fn test_name_truncated_to_nothing_rejected() {
        let config = LogbookConfig {
            max_name_len: 2,
            ..LogbookConfig::default()
        };
        let mut registry = RoomRegistry::new(&config);

        // 'é' is two bytes and the usable length is one.
        assert!(matches!(
            registry.add("é"),
            Err(RoomlogError::Room(RoomError::EmptyName))
        ));
        assert!(registry.is_empty());
        assert!(registry.add("a").is_ok());
    }

    #[test]
    fn test_foreign_id_does_not_resolve() {
        let mut other = RoomRegistry::new(&LogbookConfig::default());
        other.add("A").unwrap();
        let foreign = other.add("B").unwrap();

        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        registry.add("Office").unwrap();
        assert!(registry.get(foreign).is_none());
    }

    #[test]
    fn test_iter_registration_order() {
        let mut registry = RoomRegistry::new(&LogbookConfig::default());
        for name in ["Zeta", "Alpha", "Beta"] {
            registry.add(name).unwrap();
        }
        let names: Vec<&str> = registry.iter().map(|(_, room)| room.name()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Beta"]);
    }
}
