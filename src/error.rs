//! Error taxonomy for the export engine.
//!
//! Only these errors stop a run. Everything else the engine meets (missing
//! containers, unknown routine kinds, tags without usage hints) is logged and
//! rendered as a placeholder instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The input document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not an L5X project root.
    #[error("invalid L5X file: root element is '{found}', expected '{expected}'")]
    InvalidRoot {
        found: String,
        expected: &'static str,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A report could not be written.
    #[error("failed to write {section} report to {}: {source}", path.display())]
    Write {
        section: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
