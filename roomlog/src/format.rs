//! Presentation adapter: text rows and serializable summaries.
//!
//! Everything here is pure. Text rows use a fixed-width layout:
//!
//! ```text
//! ROOM             TIMESTAMP  TYPE        VALUE
//! --------------- ----------  ----------  ---------------
//! Kitchen                100  TEMP        24.00°C
//! Kitchen                 50  DB          45 dB
//! Kitchen                100  MOTION      [1,0,1]
//! ```

use std::fmt::Write as _;

use serde::Serialize;

use crate::entry::EntryHandle;
use crate::error::{EntryError, Result};
use crate::logbook::{EntryView, Logbook};
use crate::reading::{Reading, ReadingKind};
use crate::room::RoomId;

/// Separator row printed under [`table_header`].
pub const TABLE_RULE: &str = "--------------- ----------  ----------  ---------------";

/// Column header row for entry tables.
pub fn table_header() -> String {
    format!("{:<15} {:>10}  {:<10}  {}", "ROOM", "TIMESTAMP", "TYPE", "VALUE")
}

/// Renders a reading value with its unit.
pub fn format_value(reading: &Reading) -> String {
    match reading {
        Reading::Temperature(celsius) => format!("{celsius:.2}°C"),
        Reading::SoundLevel(db) => format!("{db} dB"),
        Reading::Motion(motion) => {
            let [left, forward, right] = motion.flags();
            format!("[{left},{forward},{right}]")
        }
    }
}

/// Renders one entry as a table row.
///
/// # Errors
///
/// Returns [`EntryError::UnresolvedRoom`] if the entry's room does not resolve.
pub fn format_entry(view: &EntryView<'_>) -> Result<String> {
    let room = owning_room(view)?;
    let reading = view.entry.reading();
    Ok(format!(
        "{:<15} {:>10}  {:<10}  {}",
        room,
        view.entry.timestamp(),
        reading.kind().label(),
        format_value(reading)
    ))
}

/// Renders a room header followed by its entries in room-view order.
///
/// # Errors
///
/// Returns [`EntryError::UnresolvedRoom`] if `room` does not resolve.
pub fn format_room(logbook: &Logbook, room: RoomId) -> Result<String> {
    let resolved = logbook.room(room).ok_or_else(|| EntryError::UnresolvedRoom {
        room: room.to_string(),
    })?;

    let mut out = format!("Room: {} (entries={})\n", resolved.name(), resolved.len());
    if resolved.is_empty() {
        out.push_str("  (No entries)\n");
        return Ok(out);
    }

    let _ = writeln!(out, "{}", table_header());
    let _ = writeln!(out, "{TABLE_RULE}");
    for view in logbook.room_entries(room) {
        let _ = writeln!(out, "{}", format_entry(&view)?);
    }
    Ok(out)
}

/// Renders every entry in canonical order as a table.
///
/// # Errors
///
/// Returns [`EntryError::UnresolvedRoom`] if any entry's room does not resolve.
pub fn format_entries(logbook: &Logbook) -> Result<String> {
    if logbook.is_empty() {
        return Ok("  (No entries)\n".to_string());
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", table_header());
    let _ = writeln!(out, "{TABLE_RULE}");
    for view in logbook.entries() {
        let _ = writeln!(out, "{}", format_entry(&view)?);
    }
    Ok(out)
}

/// Serializable form of one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    /// Entry handle.
    pub handle: EntryHandle,
    /// Owning room name.
    pub room: String,
    /// Reading timestamp.
    pub timestamp: i64,
    /// Reading kind label.
    pub kind: ReadingKind,
    /// Reading payload.
    pub reading: Reading,
    /// Rendered value with unit.
    pub display: String,
}

impl EntryRow {
    /// Builds a row from an entry view.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::UnresolvedRoom`] if the entry's room does not resolve.
    pub fn from_view(view: &EntryView<'_>) -> Result<Self> {
        let reading = *view.entry.reading();
        Ok(Self {
            handle: view.handle,
            room: owning_room(view)?.to_string(),
            timestamp: view.entry.timestamp(),
            kind: reading.kind(),
            reading,
            display: format_value(&reading),
        })
    }
}

/// Serializable form of one room and its entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    /// Room name.
    pub name: String,
    /// Number of entries in the room view.
    pub entry_count: usize,
    /// Entries in room-view order.
    pub entries: Vec<EntryRow>,
}

impl RoomSummary {
    /// Builds a summary for `room`.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::UnresolvedRoom`] if `room` does not resolve.
    pub fn build(logbook: &Logbook, room: RoomId) -> Result<Self> {
        let resolved = logbook.room(room).ok_or_else(|| EntryError::UnresolvedRoom {
            room: room.to_string(),
        })?;
        let entries = logbook
            .room_entries(room)
            .map(|view| EntryRow::from_view(&view))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: resolved.name().to_string(),
            entry_count: resolved.len(),
            entries,
        })
    }
}

fn owning_room<'a>(view: &EntryView<'a>) -> Result<&'a str> {
    view.room_name.ok_or_else(|| {
        EntryError::UnresolvedRoom {
            room: view.entry.room().to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Motion;

    fn kitchen() -> (Logbook, RoomId) {
        let mut logbook = Logbook::default();
        let room = logbook.add_room("Kitchen").unwrap();
        logbook.create(room, Reading::Temperature(24.0), 100).unwrap();
        logbook
            .create(room, Reading::Motion(Motion::new(1, 0, 1).unwrap()), 100)
            .unwrap();
        logbook.create(room, Reading::SoundLevel(45), 50).unwrap();
        (logbook, room)
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Reading::Temperature(24.0)), "24.00°C");
        assert_eq!(format_value(&Reading::Temperature(-3.456)), "-3.46°C");
        assert_eq!(format_value(&Reading::SoundLevel(45)), "45 dB");
        assert_eq!(
            format_value(&Reading::Motion(Motion::new(0, 1, 1).unwrap())),
            "[0,1,1]"
        );
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(
            table_header(),
            "ROOM             TIMESTAMP  TYPE        VALUE"
        );
    }

    #[test]
    fn test_format_entry_row() {
        let (logbook, _) = kitchen();
        let first = logbook.entries().next().unwrap();
        assert_eq!(
            format_entry(&first).unwrap(),
            "Kitchen                100  TEMP        24.00°C"
        );
    }

    #[test]
    fn test_format_room() {
        let (logbook, room) = kitchen();
        let text = format_room(&logbook, room).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Room: Kitchen (entries=3)");
        assert_eq!(lines[1], table_header());
        assert_eq!(lines[2], TABLE_RULE);
        assert!(lines[3].contains("TEMP"));
        assert!(lines[4].contains("45 dB"));
        assert!(lines[5].ends_with("[1,0,1]"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_format_empty_room() {
        let mut logbook = Logbook::default();
        let room = logbook.add_room("Attic").unwrap();
        assert_eq!(
            format_room(&logbook, room).unwrap(),
            "Room: Attic (entries=0)\n  (No entries)\n"
        );
    }

    #[test]
    fn test_format_entries_empty() {
        assert_eq!(format_entries(&Logbook::default()).unwrap(), "  (No entries)\n");
    }

    #[test]
    fn test_unresolved_room_fails() {
        let (_, room) = kitchen();
        let logbook = Logbook::default();
        assert!(format_room(&logbook, room).is_err());
        assert!(RoomSummary::build(&logbook, room).is_err());
    }

    #[test]
    fn test_unresolved_entry_row_fails() {
        let (logbook, _) = kitchen();
        let mut view = logbook.entries().next().unwrap();
        view.room_name = None;
        assert!(format_entry(&view).is_err());
        assert!(EntryRow::from_view(&view).is_err());
    }

    #[test]
    fn test_room_summary_json() {
        let (logbook, room) = kitchen();
        let summary = RoomSummary::build(&logbook, room).unwrap();
        assert_eq!(summary.entry_count, 3);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "Kitchen");
        assert_eq!(json["entries"][0]["kind"], "temperature");
        assert_eq!(json["entries"][1]["display"], "45 dB");
        assert_eq!(json["entries"][2]["reading"]["value"], serde_json::json!([1, 0, 1]));
    }
}
