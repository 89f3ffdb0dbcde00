//! # roomlog
//!
//! Fixed-capacity room sensor log with a canonical ordered store and
//! synchronized per-room views.
//!
//! roomlog records temperature, sound-level and motion readings tagged by
//! room. All readings live in one canonical sequence ordered by
//! (room name, reading kind, timestamp); every room keeps a view of its own
//! readings in the same order. The views hold stable handles into the store,
//! so inserting a reading anywhere in the sequence never invalidates them.
//!
//! ## Key Properties
//!
//! - Bounded storage: capacities are set once and exhaustion is an ordinary
//!   `Full` error
//! - Stable insertion: readings that sort equal keep their arrival order
//! - Validate-then-commit: a failed call leaves the logbook untouched
//! - No I/O on the write path and no logging from the library
//!
//! ## Quick Start
//!
//! ```rust
//! use roomlog::{Logbook, Reading, check};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut logbook = Logbook::default();
//!
//! let zeta = logbook.add_room("Zeta")?;
//! let alpha = logbook.add_room("Alpha")?;
//!
//! logbook.create(zeta, Reading::SoundLevel(40), 10)?;
//! logbook.create(alpha, Reading::Temperature(21.5), 20)?;
//!
//! let rooms: Vec<_> = logbook.entries().filter_map(|e| e.room_name).collect();
//! assert_eq!(rooms, vec!["Alpha", "Zeta"]);
//! assert!(check::verify(&logbook).passed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`logbook`] — Top-level handle; rooms, entries and insertion
//! - [`room`] — Room registry and room views
//! - [`entry`] — Entry arena and canonical order
//! - [`order`] — The ordering rule
//! - [`reading`] — Reading kinds and payloads
//! - [`check`] — Read-only consistency checks
//! - [`format`] — Text rows and serializable summaries
//! - [`sample`] — Bundled sample dataset
//! - [`config`] — Capacity configuration
//! - [`error`] — Error types and status codes

pub mod check;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod logbook;
pub mod order;
pub mod reading;
pub mod room;
pub mod sample;

// Re-export primary API types at crate root for convenience.
pub use check::CheckReport;
pub use config::LogbookConfig;
pub use entry::{Entry, EntryHandle};
pub use error::{Result, RoomlogError, Status};
pub use logbook::{EntryView, Logbook};
pub use reading::{Motion, Reading, ReadingKind};
pub use room::{Room, RoomId};
