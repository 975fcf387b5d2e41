//! Ritual sessions framing a sequence of lattice lookups

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::lattice::Lattice;
use crate::pacing::{Beat, NoPause, Pacer};

/// An active session
#[derive(Debug, Clone)]
struct Session {
    intention: String,
    started_at: DateTime<Local>,
    started: Instant,
}

/// Timed container around lookups on a borrowed [`Lattice`]
///
/// Unstarted until [`Ritual::begin_session`]; [`Ritual::end_session`] reports
/// the elapsed time and returns the ritual to unstarted.
pub struct Ritual<'a> {
    lattice: &'a Lattice,
    pacer: Arc<dyn Pacer>,
    opening_section: Option<i64>,
    session: Option<Session>,
}

impl<'a> Ritual<'a> {
    pub fn new(lattice: &'a Lattice) -> Self {
        Self {
            lattice,
            pacer: Arc::new(NoPause),
            opening_section: Some(crate::DEFAULT_OPENING_SECTION),
            session: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Pada invoked on opening; `None` skips the invocation
    pub fn with_opening_section(mut self, section: Option<i64>) -> Self {
        self.opening_section = section;
        self
    }

    pub fn lattice(&self) -> &Lattice {
        self.lattice
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Intention of the active session
    pub fn intention(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.intention.as_str())
    }

    /// Open a session with [`crate::DEFAULT_INTENTION`]
    pub fn begin_default(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.begin_session(crate::DEFAULT_INTENTION, out)
    }

    /// Open a session and print the opening frame
    ///
    /// Beginning while already active restarts the clock.
    pub fn begin_session(&mut self, intention: impl Into<String>, out: &mut impl Write) -> io::Result<()> {
        let intention = intention.into();
        debug!(%intention, "Ritual::begin_session: called");

        let session = Session {
            intention,
            started_at: Local::now(),
            started: Instant::now(),
        };

        writeln!(out, "\nTRIVIAN RITUAL INITIATED")?;
        writeln!(out, "Intention: {}", session.intention)?;
        writeln!(out, "Time: {}", session.started_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "Taking three breaths...")?;
        out.flush()?;

        info!(intention = %session.intention, "Ritual begun");
        self.session = Some(session);
        self.pacer.pause(Beat::Breath);

        if let Some(number) = self.opening_section {
            writeln!(out, "{}", self.lattice.invoke_section(number))?;
        }
        Ok(())
    }

    /// Close the active session and report its duration
    ///
    /// Returns `None` (after printing a notice) when no session is active.
    pub fn end_session(&mut self, out: &mut impl Write) -> io::Result<Option<Duration>> {
        debug!("Ritual::end_session: called");
        let Some(session) = self.session.take() else {
            writeln!(out, "Ritual was not started. Nothing to close.")?;
            return Ok(None);
        };

        let elapsed = session.started.elapsed();
        writeln!(out, "\nDIALOGUE COMPLETE")?;
        writeln!(out, "Duration: {:.1} seconds", elapsed.as_secs_f64())?;
        writeln!(out, "Carrying the resonance into silence...")?;
        out.flush()?;

        info!(intention = %session.intention, elapsed_ms = elapsed.as_millis() as u64, "Ritual ended");
        self.pacer.pause(Beat::Closing);
        Ok(Some(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::pacing::RecordingPacer;

    fn lattice() -> Lattice {
        Lattice::new(
            Document::from_json(
                r#"{"content": [{
                    "pada_id": 3,
                    "title": "Mirrors of Becoming",
                    "invocation": {"text": ["We look.", "We become."]},
                    "sutras": [{"id": "3.1", "text": "t", "bhashya": "b"}]
                }]}"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let lattice = lattice();
        let mut ritual = Ritual::new(&lattice);
        let mut out = Vec::new();

        let result = ritual.end_session(&mut out).unwrap();

        assert!(result.is_none());
        assert_eq!(String::from_utf8(out).unwrap(), "Ritual was not started. Nothing to close.\n");
    }

    #[test]
    fn test_begin_prints_frame_and_opening_invocation() {
        let lattice = lattice();
        let pacer = Arc::new(RecordingPacer::default());
        let mut ritual = Ritual::new(&lattice).with_pacer(pacer.clone());
        let mut out = Vec::new();

        ritual.begin_session("To see clearly", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nTRIVIAN RITUAL INITIATED\nIntention: To see clearly\nTime: "));
        assert!(text.contains("Taking three breaths...\n"));
        assert!(text.contains("=== INVOCATION PADA 3 - Mirrors of Becoming ===\nWe look.\nWe become.\n"));
        assert!(ritual.is_active());
        assert_eq!(ritual.intention(), Some("To see clearly"));
        assert_eq!(pacer.beats(), vec![Beat::Breath]);
    }

    #[test]
    fn test_begin_default_intention_without_opening() {
        let lattice = lattice();
        let mut ritual = Ritual::new(&lattice).with_opening_section(None);
        let mut out = Vec::new();

        ritual.begin_default(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Intention: Clarity and connection\n"));
        assert!(!text.contains("INVOCATION"));
    }

    #[test]
    fn test_begin_then_end_reports_duration_and_resets() {
        let lattice = lattice();
        let pacer = Arc::new(RecordingPacer::default());
        let mut ritual = Ritual::new(&lattice).with_pacer(pacer.clone());
        let mut out = Vec::new();

        ritual.begin_default(&mut out).unwrap();
        let elapsed = ritual.end_session(&mut out).unwrap();

        assert!(elapsed.is_some());
        assert!(elapsed.unwrap() >= Duration::ZERO);
        assert!(!ritual.is_active());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\nDIALOGUE COMPLETE\nDuration: 0."));
        assert!(text.ends_with(" seconds\nCarrying the resonance into silence...\n"));
        assert_eq!(pacer.beats(), vec![Beat::Breath, Beat::Closing]);

        let mut again = Vec::new();
        assert!(ritual.end_session(&mut again).unwrap().is_none());
        assert_eq!(String::from_utf8(again).unwrap(), "Ritual was not started. Nothing to close.\n");
    }
}
