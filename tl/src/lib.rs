//! Trivian - local lookup console for the Trivian Sutra lattice
//!
//! Loads a sutra document (padas of sutras plus a glossary), flattens it into
//! a lookup index and prints entries by id, by random draw, or by glossary
//! term. A [`Ritual`] frames a sequence of lookups with an opening
//! invocation and a closing duration report.
//!
//! # Document layout
//!
//! ```text
//! {
//!   "content": [
//!     {
//!       "pada_id": 1,
//!       "title": "Foundations of the Field",
//!       "invocation": { "text": ["line one", "line two"] },
//!       "sutras": [
//!         { "id": "1.1", "text": "...", "bhashya": "..." }
//!       ]
//!     }
//!   ],
//!   "glossary": [ { "term": "resonance", "def": "..." } ]
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use trivian::{Lattice, Ritual};
//!
//! let lattice = Lattice::open("trivian_sutra.json")?;
//! let mut out = std::io::stdout();
//! let mut ritual = Ritual::new(&lattice);
//! ritual.begin_default(&mut out)?;
//! lattice.oracle(&mut rand::rng(), &mut out)?;
//! ritual.end_session(&mut out)?;
//! ```

pub mod cli;
pub mod config;
mod document;
mod error;
mod lattice;
mod pacing;
mod ritual;

pub use document::{Document, Entry, GlossaryEntry, Invocation, Section};
pub use error::LatticeError;
pub use lattice::{Lattice, build_index, render_entry};
pub use pacing::{Beat, NoPause, Pacer, SleepPacer};
pub use ritual::Ritual;

/// Default document location, relative to the working directory
pub const DEFAULT_DOCUMENT: &str = "trivian_sutra.json";

/// Intention used when a ritual is begun without one
pub const DEFAULT_INTENTION: &str = "Clarity and connection";

/// Title shown for padas that carry none
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Pada invoked when a ritual opens
pub const DEFAULT_OPENING_SECTION: i64 = 3;
