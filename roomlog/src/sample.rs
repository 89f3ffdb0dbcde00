//! Bundled sample dataset.
//!
//! The loader only uses the public [`Logbook::add_room`] and
//! [`Logbook::create`] operations. Readings are deliberately listed out of
//! order, with one exact tie, so that a freshly loaded logbook exercises the
//! sorted insertion path.

use crate::error::Result;
use crate::logbook::Logbook;
use crate::reading::{Motion, Reading, ReadingKind};

/// Rooms created by [`load_sample`], in registration order.
pub const SAMPLE_ROOMS: [&str; 4] = ["Living Room", "Kitchen", "Bedroom", "Garage"];

/// Raw sample readings: `(room, timestamp, kind code, payload)`.
///
/// Payload meaning depends on the kind: temperature in hundredths of a
/// degree, decibels, or motion flags packed as `0bLFR`.
const SAMPLE_READINGS: [(&str, i64, u8, i32); 14] = [
    ("Kitchen", 1_000, 1, 2_350),
    ("Living Room", 1_000, 2, 42),
    ("Bedroom", 1_200, 3, 0b010),
    ("Kitchen", 900, 1, 2_280),
    ("Garage", 1_100, 2, 71),
    ("Living Room", 950, 1, 2_110),
    ("Kitchen", 1_000, 3, 0b101),
    ("Bedroom", 1_100, 1, 1_890),
    ("Garage", 1_050, 3, 0b001),
    ("Living Room", 1_000, 2, 44),
    ("Kitchen", 950, 2, 55),
    ("Bedroom", 1_200, 2, 30),
    ("Garage", 900, 1, 1_240),
    ("Living Room", 1_300, 3, 0b110),
];

/// Number of readings [`load_sample`] creates.
pub const SAMPLE_ENTRY_COUNT: usize = SAMPLE_READINGS.len();

/// Populates `logbook` with the sample rooms and readings.
///
/// Intended for an empty logbook; the first failing operation is returned
/// unchanged and stops the load.
///
/// # Errors
///
/// Any error from [`Logbook::add_room`] or [`Logbook::create`], e.g.
/// `DuplicateName` when a sample room already exists or `Full` when the
/// configured capacities are smaller than the sample.
pub fn load_sample(logbook: &mut Logbook) -> Result<()> {
    for name in SAMPLE_ROOMS {
        logbook.add_room(name)?;
    }

    for (room, timestamp, kind, payload) in SAMPLE_READINGS {
        let reading = sample_reading(kind, payload)?;
        logbook.create_in(room, reading, timestamp)?;
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)] // sample payloads are small
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // motion payloads are 3-bit
fn sample_reading(kind: u8, payload: i32) -> Result<Reading> {
    let reading = match ReadingKind::try_from(i32::from(kind))? {
        ReadingKind::Temperature => Reading::Temperature(payload as f32 / 100.0),
        ReadingKind::SoundLevel => Reading::SoundLevel(payload),
        ReadingKind::Motion => {
            let bits = payload as u8;
            Reading::Motion(Motion::new((bits >> 2) & 1, (bits >> 1) & 1, bits & 1)?)
        }
    };
    Ok(reading)
}
