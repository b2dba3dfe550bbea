//! Text input parsing and the [`InputSource`] capability.
//!
//! # Text encoding
//!
//! Matrices are entered one process per line with comma-separated values:
//!
//! ```text
//! 0,1,0
//! 2,0,0
//! 3,0,2
//! ```
//!
//! The Available vector is a single comma-separated line (`3,3,2`).
//!
//! Parsing is deliberately lenient.  Each value is read as the longest
//! leading integer of the trimmed token (`"7x"` reads as 7, `"0x1f"` as 31),
//! and anything that does not start with a number reads as 0.  Negative
//! values read as 0 as well, since resource counts cannot go below zero.
//! Shape problems such as ragged rows are left for validation to report.
//!
//! A field that is empty or only whitespace is treated as *absent*, which
//! validation reports as a missing input.

use std::path::{Path, PathBuf};

use banker_core::{Matrix, ResourceVector};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while obtaining input, before any parsing of values.
#[derive(Debug, Error)]
pub enum InputError {
    /// The snapshot file could not be read.
    #[error("I/O error reading input at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not valid TOML.
    #[error("failed to parse input file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Numeric input as produced by an [`InputSource`].
///
/// Each field is `None` when the corresponding input was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub allocation: Option<Matrix>,
    pub max: Option<Matrix>,
    pub available: Option<ResourceVector>,
}

/// Anything that can supply Allocation / Max / Available numbers.
///
/// The application layer depends only on this trait, never on where the
/// numbers came from (command-line flags, a file, a test fixture).
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Produces the parsed input.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when the underlying source cannot be read.
    fn read(&self) -> Result<RawInput, InputError>;
}

// ── Text parsing ──────────────────────────────────────────────────────────────

/// Parses a newline-separated, comma-separated matrix.
///
/// Returns `None` for blank text.
pub fn parse_matrix(text: &str) -> Option<Matrix> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.split('\n').map(parse_row).collect())
}

/// Parses a single comma-separated vector.
///
/// Returns `None` for blank text.
pub fn parse_vector(text: &str) -> Option<ResourceVector> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(parse_row(text))
}

fn parse_row(line: &str) -> Vec<u32> {
    line.split(',').map(parse_value).collect()
}

/// Reads the leading integer of `token`, coercing anything else to 0.
///
/// Accepts an optional sign and a `0x` prefix for hexadecimal.  Values beyond
/// `u32::MAX` saturate.
pub fn parse_value(token: &str) -> u32 {
    let token = token.trim();
    let (negative, unsigned) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, body) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let end = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    let digits = &body[..end];

    if digits.is_empty() {
        if !token.is_empty() {
            debug!(token, "non-numeric value read as 0");
        }
        return 0;
    }
    if negative {
        debug!(token, "negative value read as 0");
        return 0;
    }
    u32::from_str_radix(digits, radix).unwrap_or(u32::MAX)
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// Already-parsed input acts as its own source, so one read can feed several
/// use cases.
impl InputSource for RawInput {
    fn read(&self) -> Result<RawInput, InputError> {
        Ok(self.clone())
    }
}

/// Input supplied as three raw text fields, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub allocation: Option<String>,
    pub max: Option<String>,
    pub available: Option<String>,
}

impl InputSource for TextInput {
    fn read(&self) -> Result<RawInput, InputError> {
        Ok(RawInput {
            allocation: self.allocation.as_deref().and_then(parse_matrix),
            max: self.max.as_deref().and_then(parse_matrix),
            available: self.available.as_deref().and_then(parse_vector),
        })
    }
}

/// Input read from a TOML file holding the three fields in text encoding.
///
/// ```toml
/// allocation = """
/// 0,1,0
/// 2,0,0
/// """
/// max = """
/// 7,5,3
/// 3,2,2
/// """
/// available = "3,3,2"
/// ```
///
/// Any field may be omitted; it is then reported as missing by validation.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

/// On-disk schema of a [`SnapshotFile`].
#[derive(Debug, Default, Deserialize)]
struct SnapshotFileContents {
    #[serde(default)]
    allocation: Option<String>,
    #[serde(default)]
    max: Option<String>,
    #[serde(default)]
    available: Option<String>,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputSource for SnapshotFile {
    fn read(&self) -> Result<RawInput, InputError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| InputError::Io {
            path: self.path.clone(),
            source,
        })?;
        let contents: SnapshotFileContents =
            toml::from_str(&content).map_err(|source| InputError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "read snapshot file");

        TextInput {
            allocation: contents.allocation,
            max: contents.max,
            available: contents.available,
        }
        .read()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
