//! Lattice document model and loading
//!
//! The on-disk document is permissive JSON: every key is optional and falls
//! back to a documented default. Only a document that is not valid JSON (or
//! whose present keys have the wrong shape) fails to load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::LatticeError;

/// Root of a lattice document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Padas in document order; absent in the missing-file placeholder
    #[serde(default, rename = "content")]
    pub sections: Option<Vec<Section>>,

    /// Glossary terms
    #[serde(default)]
    pub glossary: Vec<GlossaryEntry>,

    /// Error marker carried by the placeholder document
    #[serde(default)]
    pub error: Option<String>,
}

/// A titled pada holding an ordered run of sutras
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default, rename = "pada_id")]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub invocation: Option<Invocation>,

    #[serde(default, rename = "sutras")]
    pub entries: Vec<Entry>,
}

/// A single sutra
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub bhashya: String,

    /// Title of the owning pada, injected when the index is built
    #[serde(skip)]
    pub section: Option<String>,
}

/// A glossary term and its definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlossaryEntry {
    #[serde(default)]
    pub term: String,

    #[serde(default, rename = "def")]
    pub definition: String,
}

/// Opening text of a pada
///
/// Stored either as a plain string or as an object whose `text` is a string
/// or a list of lines. The shape is settled once, at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum Invocation {
    Plain(String),
    Rich(Vec<String>),
}

impl Document {
    /// Load a document from disk
    ///
    /// A missing file yields [`Document::missing`] instead of an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LatticeError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Document::load: called");

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Document::load: file missing, using empty placeholder");
                return Ok(Self::missing(path));
            }
            Err(source) => {
                return Err(LatticeError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let document = Self::from_json(&content).map_err(|source| LatticeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            sections = document.sections().len(),
            glossary = document.glossary.len(),
            "Loaded lattice document"
        );
        Ok(document)
    }

    /// Parse a document from JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Placeholder for a document that could not be found
    pub fn missing(path: impl AsRef<Path>) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        Self {
            sections: None,
            glossary: Vec::new(),
            error: Some(format!("The Lattice file ({}) is missing.", path.display())),
        }
    }

    /// Sections in document order, empty when the document has none
    pub fn sections(&self) -> &[Section] {
        self.sections.as_deref().unwrap_or(&[])
    }

    /// Whether this is the missing-file placeholder
    pub fn is_missing(&self) -> bool {
        self.error.is_some()
    }
}

impl Section {
    /// Display title, falling back to [`crate::UNKNOWN_TITLE`]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(crate::UNKNOWN_TITLE)
    }

    /// Normalized invocation text, empty when the pada has none
    pub fn invocation_text(&self) -> String {
        self.invocation.as_ref().map(Invocation::text).unwrap_or_default()
    }
}

impl Invocation {
    /// Display text: plain as-is, rich lines joined with newlines
    pub fn text(&self) -> String {
        match self {
            Invocation::Plain(text) => text.clone(),
            Invocation::Rich(lines) => lines.join("\n"),
        }
    }
}

impl From<Value> for Invocation {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => match map.remove("text") {
                Some(Value::Array(items)) => Invocation::Rich(items.into_iter().map(stringify).collect()),
                Some(text) => Invocation::Plain(stringify(text)),
                None => Invocation::Plain(String::new()),
            },
            other => Invocation::Plain(stringify(other)),
        }
    }
}

/// Render a JSON value as display text; strings lose their quotes, null is empty
fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
