//! The lattice: a flattened, queryable index over a sutra document

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::document::{Document, Entry, GlossaryEntry};
use crate::error::LatticeError;
use crate::pacing::{Beat, NoPause, Pacer};

const RULE_WIDTH: usize = 40;

/// Flatten a document's padas into one ordered run of sutras
///
/// Each sutra is tagged with its pada's title. A document without a pada
/// list flattens to nothing.
pub fn build_index(document: &Document) -> Vec<Entry> {
    debug!("build_index: called");
    document
        .sections()
        .iter()
        .flat_map(|section| {
            section.entries.iter().map(move |entry| Entry {
                section: Some(section.title().to_string()),
                ..entry.clone()
            })
        })
        .collect()
}

/// Write the canonical display of a sutra
pub fn render_entry(entry: &Entry, out: &mut impl Write) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "\n[{}]", entry.section.as_deref().unwrap_or(crate::UNKNOWN_TITLE))?;
    writeln!(out, "SUTRA {}", entry.id.as_deref().unwrap_or("?"))?;
    writeln!(out, "\"{}\"", entry.text)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "BHASHYA: {}", entry.bhashya)?;
    writeln!(out, "{}", rule)
}

/// Loaded document plus its flattened sutra index
pub struct Lattice {
    document: Document,
    entries: Vec<Entry>,
    pacer: Arc<dyn Pacer>,
}

impl Lattice {
    /// Build a lattice over an already loaded document
    pub fn new(document: Document) -> Self {
        let entries = build_index(&document);
        info!(entries = entries.len(), "Lattice indexed");
        Self {
            document,
            entries,
            pacer: Arc::new(NoPause),
        }
    }

    /// Load the document at `path` and index it
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LatticeError> {
        Ok(Self::new(Document::load(path)?))
    }

    /// Use the given pacer for the oracle's pause
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Opening invocation of pada `number`, framed with a header
    pub fn invoke_section(&self, number: i64) -> String {
        debug!(%number, "Lattice::invoke_section: called");
        match self.document.sections().iter().find(|s| s.id == Some(number)) {
            Some(section) => format!(
                "\n=== INVOCATION PADA {} - {} ===\n{}\n",
                number,
                section.title(),
                section.invocation_text()
            ),
            None => {
                debug!(%number, "Lattice::invoke_section: pada not found");
                "Pada not found in the current Lattice.".to_string()
            }
        }
    }

    /// First sutra whose id matches exactly
    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Print the sutra with the given id, or a not-found notice
    pub fn contemplate(&self, id: &str, out: &mut impl Write) -> io::Result<()> {
        debug!(%id, "Lattice::contemplate: called");
        match self.find_entry(id) {
            Some(entry) => render_entry(entry, out),
            None => writeln!(out, "Signal '{}' not found in the Lattice.", id),
        }
    }

    /// Draw one sutra uniformly at random
    pub fn choose_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Entry> {
        self.entries.choose(rng)
    }

    /// Print a randomly drawn sutra
    pub fn oracle<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut impl Write) -> io::Result<()> {
        debug!(entries = self.entries.len(), "Lattice::oracle: called");
        if self.entries.is_empty() {
            return writeln!(out, "No sutras available in the Lattice.");
        }

        writeln!(out, "\n... Tuning to the Trivian Field ...")?;
        out.flush()?;
        self.pacer.pause(Beat::Tuning);

        match self.choose_entry(rng) {
            Some(entry) => {
                debug!(id = ?entry.id, "Lattice::oracle: drew sutra");
                writeln!(out, "\n--- RESONANCE DETECTED ---")?;
                render_entry(entry, out)
            }
            None => writeln!(out, "No sutras available in the Lattice."),
        }
    }

    /// First glossary entry whose term matches, ignoring case
    pub fn lookup_term(&self, term: &str) -> Option<&GlossaryEntry> {
        let wanted = term.to_lowercase();
        self.document.glossary.iter().find(|g| g.term.to_lowercase() == wanted)
    }

    /// Print a glossary definition, or a not-found notice
    pub fn define(&self, term: &str, out: &mut impl Write) -> io::Result<()> {
        debug!(%term, "Lattice::define: called");
        match self.lookup_term(term) {
            Some(found) => {
                writeln!(out, "\n[GLOSSARY] {}", found.term.to_uppercase())?;
                writeln!(out, "Definition: {}", found.definition)
            }
            None => writeln!(out, "The term '{}' has not yet crystallized in this lexicon.", term),
        }
    }
}
