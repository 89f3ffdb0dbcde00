//! Sensor reading types.
//!
//! A [`Reading`] is one of three kinds, each with its own payload. The kinds
//! carry fixed numeric codes and sort in code order:
//!
//! | Code | Kind                        | Payload                         |
//! |------|-----------------------------|---------------------------------|
//! | 1    | [`ReadingKind::Temperature`] | `f32`, degrees Celsius          |
//! | 2    | [`ReadingKind::SoundLevel`]  | `i32`, decibels                 |
//! | 3    | [`ReadingKind::Motion`]      | [`Motion`], left/forward/right  |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EntryError, Result};

/// The kind of a reading.
///
/// Variant order is the sort order used by the ordering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ReadingKind {
    /// Temperature in degrees Celsius.
    Temperature = 1,
    /// Sound level in decibels.
    SoundLevel = 2,
    /// Motion flags.
    Motion = 3,
}

impl ReadingKind {
    /// All kinds in code order.
    pub const ALL: [ReadingKind; 3] = [
        ReadingKind::Temperature,
        ReadingKind::SoundLevel,
        ReadingKind::Motion,
    ];

    /// Returns the numeric kind code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the short label used in report tables.
    pub fn label(self) -> &'static str {
        match self {
            ReadingKind::Temperature => "TEMP",
            ReadingKind::SoundLevel => "DB",
            ReadingKind::Motion => "MOTION",
        }
    }
}

impl TryFrom<i32> for ReadingKind {
    type Error = EntryError;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(ReadingKind::Temperature),
            2 => Ok(ReadingKind::SoundLevel),
            3 => Ok(ReadingKind::Motion),
            _ => Err(EntryError::UnknownKind { code }),
        }
    }
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Motion flags for the left, forward and right sensors.
///
/// Each flag is stored as a single byte that is either `0` or `1`; the
/// constructor rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 3]", into = "[u8; 3]")]
pub struct Motion {
    flags: [u8; 3],
}

impl Motion {
    /// Creates motion flags from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidReading`] if any flag is not `0` or `1`.
    pub fn new(left: u8, forward: u8, right: u8) -> Result<Self> {
        Ok(Self::try_from([left, forward, right])?)
    }

    /// Creates motion flags from booleans.
    pub fn from_bools(left: bool, forward: bool, right: bool) -> Self {
        Self {
            flags: [u8::from(left), u8::from(forward), u8::from(right)],
        }
    }

    /// Returns the raw flags as `[left, forward, right]`.
    pub fn flags(&self) -> [u8; 3] {
        self.flags
    }

    /// Whether the left sensor fired.
    pub fn left(&self) -> bool {
        self.flags[0] == 1
    }

    /// Whether the forward sensor fired.
    pub fn forward(&self) -> bool {
        self.flags[1] == 1
    }

    /// Whether the right sensor fired.
    pub fn right(&self) -> bool {
        self.flags[2] == 1
    }
}

impl TryFrom<[u8; 3]> for Motion {
    type Error = EntryError;

    fn try_from(flags: [u8; 3]) -> std::result::Result<Self, Self::Error> {
        if let Some(bad) = flags.iter().find(|&&f| f > 1) {
            return Err(EntryError::InvalidReading {
                reason: format!("motion flag must be 0 or 1, got {bad}"),
            });
        }
        Ok(Self { flags })
    }
}

impl From<Motion> for [u8; 3] {
    fn from(motion: Motion) -> Self {
        motion.flags
    }
}

/// A single sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reading {
    /// Temperature in degrees Celsius.
    Temperature(f32),
    /// Sound level in decibels.
    SoundLevel(i32),
    /// Motion flags.
    Motion(Motion),
}

impl Reading {
    /// Returns the kind of this reading.
    pub fn kind(&self) -> ReadingKind {
        match self {
            Reading::Temperature(_) => ReadingKind::Temperature,
            Reading::SoundLevel(_) => ReadingKind::SoundLevel,
            Reading::Motion(_) => ReadingKind::Motion,
        }
    }

    /// Checks that the payload is acceptable for storage.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidReading`] for a NaN or infinite temperature.
    pub fn validate(&self) -> std::result::Result<(), EntryError> {
        match self {
            Reading::Temperature(celsius) if !celsius.is_finite() => {
                Err(EntryError::InvalidReading {
                    reason: format!("temperature must be finite, got {celsius}"),
                })
            }
            Reading::Temperature(_) | Reading::SoundLevel(_) | Reading::Motion(_) => Ok(()),
        }
    }
}
