//! Capacity configuration for a [`Logbook`](crate::logbook::Logbook).
//!
//! Capacities are fixed when the logbook is created. Exhausting any of them
//! makes the corresponding operation fail with a `Full` status rather than
//! growing the underlying storage.
//!
//! # Example
//!
//! ```rust
//! use roomlog::config::LogbookConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogbookConfig {
//!     max_entries: 64,
//!     max_room_entries: 32,
//!     ..LogbookConfig::default()
//! };
//! config.validate()?;
//! assert_eq!(config.max_rooms, 16);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default maximum number of rooms.
pub const DEFAULT_MAX_ROOMS: usize = 16;

/// Default maximum number of entries in the canonical store.
pub const DEFAULT_MAX_ENTRIES: usize = 16;

/// Default maximum number of entries referenced by a single room.
pub const DEFAULT_MAX_ROOM_ENTRIES: usize = 16;

/// Default name buffer length. One byte is reserved, so names keep at most
/// `DEFAULT_MAX_NAME_LEN - 1` bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 32;

/// Largest accepted capacity. Storage is preallocated up front and handles
/// address slots with `u32`.
pub const MAX_CAPACITY: usize = 1 << 20;

/// Capacity limits for a logbook.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name the limits it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    /// Maximum number of rooms in the registry.
    pub max_rooms: usize,
    /// Maximum number of entries in the canonical store.
    pub max_entries: usize,
    /// Maximum number of entries a single room may reference.
    pub max_room_entries: usize,
    /// Name buffer length; names are truncated to `max_name_len - 1` bytes.
    pub max_name_len: usize,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            max_rooms: DEFAULT_MAX_ROOMS,
            max_entries: DEFAULT_MAX_ENTRIES,
            max_room_entries: DEFAULT_MAX_ROOM_ENTRIES,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl LogbookConfig {
    /// Validates the capacity limits.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCapacity`] if any capacity is zero
    /// - [`ConfigError::CapacityTooLarge`] if any capacity exceeds [`MAX_CAPACITY`]
    /// - [`ConfigError::RoomCapacityExceedsStore`] if a room could reference
    ///   more entries than the store holds
    /// - [`ConfigError::NameLengthTooSmall`] if `max_name_len < 2`
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("max_rooms", self.max_rooms),
            ("max_entries", self.max_entries),
            ("max_room_entries", self.max_room_entries),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field }.into());
            }
            if value > MAX_CAPACITY {
                return Err(ConfigError::CapacityTooLarge {
                    field,
                    value,
                    max: MAX_CAPACITY,
                }
                .into());
            }
        }

        if self.max_room_entries > self.max_entries {
            return Err(ConfigError::RoomCapacityExceedsStore {
                max_room_entries: self.max_room_entries,
                max_entries: self.max_entries,
            }
            .into());
        }

        if self.max_name_len < 2 {
            return Err(ConfigError::NameLengthTooSmall {
                max_name_len: self.max_name_len,
            }
            .into());
        }

        Ok(())
    }

    /// Maximum number of bytes a stored room name keeps.
    pub fn usable_name_len(&self) -> usize {
        self.max_name_len.saturating_sub(1)
    }

    /// Loads and validates a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// cannot be loaded, or any [`validate`](Self::validate) error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }
}
