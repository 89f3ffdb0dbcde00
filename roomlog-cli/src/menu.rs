//! Interactive menu over a [`Logbook`].
//!
//! The menu owns no state of its own; every action is a call into the
//! library followed by a message. Input and output are generic so the loop
//! can be driven from a script in tests.

use std::io::{self, BufRead, Write};

use roomlog::format::{format_entries, format_room};
use roomlog::sample::load_sample;
use roomlog::{Logbook, Motion, Reading, ReadingKind, RoomlogError, Status, check};

/// One menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Exit,
    LoadSample,
    PrintEntries,
    PrintRooms,
    AddRoom,
    AddEntry,
    TestOrder,
    TestRooms,
}

impl Action {
    fn from_choice(choice: i32) -> Option<Self> {
        let action = match choice {
            0 => Action::Exit,
            1 => Action::LoadSample,
            2 => Action::PrintEntries,
            3 => Action::PrintRooms,
            4 => Action::AddRoom,
            5 => Action::AddEntry,
            6 => Action::TestOrder,
            7 => Action::TestRooms,
            _ => return None,
        };
        Some(action)
    }
}

/// Runs the menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(logbook: &mut Logbook, input: &mut R, out: &mut W) -> io::Result<()> {
    loop {
        print_menu(out)?;
        let Some(action) = read_action(input, out)? else {
            tracing::debug!("input closed");
            return Ok(());
        };
        tracing::debug!(?action, "menu selection");

        match action {
            Action::Exit => {
                writeln!(out, "Exiting program.")?;
                return Ok(());
            }
            Action::LoadSample => handle_load_sample(logbook, out)?,
            Action::PrintEntries => handle_print_entries(logbook, out)?,
            Action::PrintRooms => handle_print_rooms(logbook, out)?,
            Action::AddRoom => handle_add_room(logbook, input, out)?,
            Action::AddEntry => handle_add_entry(logbook, input, out)?,
            Action::TestOrder => {
                let verdict = pass_fail(check::check_order(logbook));
                writeln!(out, "Order test {verdict}.")?;
            }
            Action::TestRooms => {
                let verdict = pass_fail(check::check_bijection(logbook));
                writeln!(out, "Room entries test {verdict}.")?;
            }
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "MAIN MENU")?;
    writeln!(out, "  (1) Load sample data")?;
    writeln!(out, "  (2) Print entries")?;
    writeln!(out, "  (3) Print rooms")?;
    writeln!(out, "  (4) Add room")?;
    writeln!(out, "  (5) Add entry")?;
    writeln!(out, "  (6) Test order")?;
    writeln!(out, "  (7) Test room entries")?;
    writeln!(out, "  (0) Exit")?;
    writeln!(out)
}

/// Prompts until a valid selection is entered. `None` on end of input.
fn read_action<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Action>> {
    loop {
        let Some(line) = prompt(input, out, "Please enter a valid selection: ")? else {
            return Ok(None);
        };
        if let Some(action) = line.parse().ok().and_then(Action::from_choice) {
            return Ok(Some(action));
        }
    }
}

/// Replaces the current logbook with one holding only the sample data.
fn handle_load_sample<W: Write>(logbook: &mut Logbook, out: &mut W) -> io::Result<()> {
    let mut fresh = match Logbook::new(logbook.config().clone()) {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::warn!(status = %e.status(), "sample load failed: {e}");
            return writeln!(out, "Error loading sample data.");
        }
    };
    let result = load_sample(&mut fresh);
    *logbook = fresh;
    match result {
        Ok(()) => writeln!(out, "Sample data loaded successfully."),
        Err(e) => {
            tracing::warn!(status = %e.status(), "sample load failed: {e}");
            writeln!(out, "Error loading sample data.")
        }
    }
}

fn handle_print_entries<W: Write>(logbook: &Logbook, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "All Entries (sorted):")?;
    match format_entries(logbook) {
        Ok(table) => write!(out, "{table}"),
        Err(e) => writeln!(out, "Error printing entries: {e}"),
    }
}

fn handle_print_rooms<W: Write>(logbook: &Logbook, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "All Rooms:")?;
    if logbook.room_count() == 0 {
        return writeln!(out, "  (No rooms)");
    }
    for (id, _) in logbook.rooms() {
        writeln!(out)?;
        match format_room(logbook, id) {
            Ok(text) => write!(out, "{text}")?,
            Err(e) => writeln!(out, "Error printing room: {e}")?,
        }
    }
    Ok(())
}

fn handle_add_room<R: BufRead, W: Write>(
    logbook: &mut Logbook,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(name) = prompt_line(input, out, "Enter room name: ")? else {
        return Ok(());
    };

    match logbook.add_room(&name) {
        Ok(_) => writeln!(out, "Room '{name}' added successfully."),
        Err(e) => {
            tracing::warn!(status = %e.status(), "add room rejected: {e}");
            match e.status() {
                Status::DuplicateName => writeln!(out, "Error: Room '{name}' already exists."),
                Status::Full => writeln!(
                    out,
                    "Error: Cannot add more rooms (maximum {} reached).",
                    logbook.config().max_rooms
                ),
                _ => writeln!(out, "Error adding room: {e}"),
            }
        }
    }
}

fn handle_add_entry<R: BufRead, W: Write>(
    logbook: &mut Logbook,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(name) = prompt_line(input, out, "Enter room name: ")? else {
        return Ok(());
    };
    let Some(room) = logbook.find_room(&name) else {
        tracing::warn!(status = %Status::NotFound, room = %name, "add entry rejected");
        return writeln!(out, "Error: Room '{name}' not found.");
    };

    let Some((timestamp, reading)) = read_entry_data(input, out)? else {
        return writeln!(out, "Error: Invalid entry data.");
    };

    match logbook.create(room, reading, timestamp) {
        Ok(handle) => {
            tracing::debug!(%handle, "entry created");
            writeln!(out, "Entry added successfully.")
        }
        Err(e) => {
            tracing::warn!(status = %e.status(), "add entry rejected: {e}");
            writeln!(out, "{}", entry_error_message(&e))
        }
    }
}

fn entry_error_message(error: &RoomlogError) -> String {
    match error.status() {
        Status::Full => "Error: Cannot add more entries (maximum reached).".to_string(),
        Status::InvalidInput => "Error: Invalid entry data.".to_string(),
        _ => format!("Error adding entry: {error}"),
    }
}

/// Reads timestamp, kind selector and kind-specific value.
///
/// Returns `Ok(None)` for anything that does not parse into a valid reading.
fn read_entry_data<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<(i64, Reading)>> {
    let Some(timestamp) = prompt(input, out, "Enter timestamp: ")?.and_then(|s| s.parse::<i64>().ok())
    else {
        return Ok(None);
    };

    let kind = prompt(input, out, "Enter type (1=TEMP, 2=DB, 3=MOTION): ")?
        .and_then(|s| s.parse::<i32>().ok())
        .and_then(|code| ReadingKind::try_from(code).ok());
    let Some(kind) = kind else {
        return Ok(None);
    };

    let reading = match kind {
        ReadingKind::Temperature => prompt(input, out, "Enter temperature (float): ")?
            .and_then(|s| s.parse::<f32>().ok())
            .map(Reading::Temperature),
        ReadingKind::SoundLevel => prompt(input, out, "Enter decibels (int): ")?
            .and_then(|s| s.parse::<i32>().ok())
            .map(Reading::SoundLevel),
        ReadingKind::Motion => prompt(input, out, "Enter motion values (3 integers 0 or 1): ")?
            .and_then(|s| parse_motion(&s))
            .map(Reading::Motion),
    };

    Ok(reading.map(|reading| (timestamp, reading)))
}

fn parse_motion(line: &str) -> Option<Motion> {
    let flags: Vec<u8> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match flags.as_slice() {
        [left, forward, right] => Motion::new(*left, *forward, *right).ok(),
        _ => None,
    }
}

/// Writes `message`, then reads one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    Ok(prompt_line(input, out, message)?.map(|line| line.trim().to_string()))
}

/// Like [`prompt`], but only strips the line terminator. Room names keep
/// surrounding spaces.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn pass_fail(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}
