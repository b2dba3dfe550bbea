//! Infrastructure layer: everything that touches text, files or stdout.
//!
//! - [`input`] parses the comma / newline text encoding and provides the
//!   [`input::InputSource`] implementations.
//! - [`config`] loads the optional `banker.toml`.
//! - [`render`] turns reports into text or JSON.

pub mod config;
pub mod input;
pub mod render;
