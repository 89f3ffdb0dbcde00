//! Error types for the roomlog sensor log.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all roomlog operations.
///
/// Each variant wraps the error enum of one concern. Use [`RoomlogError::status`]
/// to collapse any error onto the flat [`Status`] taxonomy.
#[derive(Error, Debug)]
pub enum RoomlogError {
    /// Error adding or looking up a room.
    #[error("room error: {0}")]
    Room(#[from] RoomError),

    /// Error creating an entry.
    #[error("entry error: {0}")]
    Entry(#[from] EntryError),

    /// Error loading or validating configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur in the room registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The registry already holds the maximum number of rooms.
    #[error("maximum room count ({max_rooms}) reached")]
    RegistryFull {
        /// The configured room capacity.
        max_rooms: usize,
    },

    /// A room with this name is already registered.
    #[error("room '{name}' already exists")]
    DuplicateName {
        /// The conflicting (truncated) name.
        name: String,
    },

    /// No room with this name is registered.
    #[error("room '{name}' not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Room names must contain at least one byte.
    #[error("room name cannot be empty")]
    EmptyName,
}

/// Errors that can occur when creating an entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    /// The room reference does not resolve to a live room.
    #[error("room reference {room} does not resolve")]
    UnresolvedRoom {
        /// Display form of the stale or foreign room id.
        room: String,
    },

    /// The canonical store is at capacity.
    #[error("entry store is full ({max_entries} entries)")]
    StoreFull {
        /// The configured store capacity.
        max_entries: usize,
    },

    /// The owning room's entry list is at capacity.
    #[error("room '{room}' is full ({max_room_entries} entries)")]
    RoomFull {
        /// The room name.
        room: String,
        /// The configured per-room capacity.
        max_room_entries: usize,
    },

    /// The reading kind code is not one of the known codes.
    #[error("unknown reading kind code {code} (expected 1=TEMP, 2=DB, 3=MOTION)")]
    UnknownKind {
        /// The rejected code.
        code: i32,
    },

    /// The reading payload is not acceptable.
    #[error("invalid reading: {reason}")]
    InvalidReading {
        /// Why the reading was rejected.
        reason: String,
    },
}

/// Errors that can occur when loading or validating a [`LogbookConfig`](crate::config::LogbookConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for a config.
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A capacity limit is zero.
    #[error("invalid {field}: must be > 0")]
    ZeroCapacity {
        /// The offending field.
        field: &'static str,
    },

    /// A capacity limit is above [`MAX_CAPACITY`](crate::config::MAX_CAPACITY).
    #[error("invalid {field} {value}: must be <= {max}")]
    CapacityTooLarge {
        /// The offending field.
        field: &'static str,
        /// The configured value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },

    /// A room list could hold more entries than the store.
    #[error("max_room_entries ({max_room_entries}) exceeds max_entries ({max_entries})")]
    RoomCapacityExceedsStore {
        /// Configured per-room capacity.
        max_room_entries: usize,
        /// Configured store capacity.
        max_entries: usize,
    },

    /// The name length leaves no room for a single usable byte.
    #[error("invalid max_name_len {max_name_len}: must be >= 2")]
    NameLengthTooSmall {
        /// The configured name length.
        max_name_len: usize,
    },
}

/// Flat status taxonomy reported to menu and report callers.
///
/// Every [`RoomlogError`] maps to exactly one status; a successful operation
/// is [`Status::Ok`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Ok,
    /// A reference did not resolve.
    NullReference,
    /// A capacity limit was reached.
    Full,
    /// A named item does not exist.
    NotFound,
    /// A name is already taken.
    DuplicateName,
    /// An input value was rejected.
    InvalidInput,
    /// Reserved; no current operation returns it.
    NotImplemented,
}

impl Status {
    /// Returns the status of an operation result.
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }

    /// Returns the numeric code of this status (`0` for success, negative otherwise).
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::NullReference => -1,
            Status::Full => -2,
            Status::NotFound => -3,
            Status::DuplicateName => -4,
            Status::InvalidInput => -5,
            Status::NotImplemented => -6,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "Ok",
            Status::NullReference => "NullReference",
            Status::Full => "Full",
            Status::NotFound => "NotFound",
            Status::DuplicateName => "DuplicateName",
            Status::InvalidInput => "InvalidInput",
            Status::NotImplemented => "NotImplemented",
        };
        f.write_str(name)
    }
}

impl RoomlogError {
    /// Maps this error onto the flat status taxonomy.
    pub fn status(&self) -> Status {
        match self {
            RoomlogError::Room(RoomError::RegistryFull { .. }) => Status::Full,
            RoomlogError::Room(RoomError::DuplicateName { .. }) => Status::DuplicateName,
            RoomlogError::Room(RoomError::NotFound { .. }) => Status::NotFound,
            RoomlogError::Room(RoomError::EmptyName) => Status::InvalidInput,
            RoomlogError::Entry(EntryError::UnresolvedRoom { .. }) => Status::NullReference,
            RoomlogError::Entry(EntryError::StoreFull { .. } | EntryError::RoomFull { .. }) => {
                Status::Full
            }
            RoomlogError::Entry(
                EntryError::UnknownKind { .. } | EntryError::InvalidReading { .. },
            ) => Status::InvalidInput,
            RoomlogError::Config(_) => Status::InvalidInput,
        }
    }
}

/// Type alias for `Result<T, RoomlogError>`.
pub type Result<T> = std::result::Result<T, RoomlogError>;
