//! Application layer use cases for the `banker` command.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the algorithms in `banker-core` and the
//! infrastructure that reads files, parses flags and prints output.  Use cases
//! here:
//!
//! - **Orchestrate** core functions to fulfil a user goal (e.g., "tell me
//!   whether this state is safe and remember it for the details view").
//! - **Depend on abstractions** such as [`InputSource`] rather than on
//!   concrete file or flag readers.
//! - **Contain no file system access and no printing.**
//!
//! # Sub-modules
//!
//! - **`analyze`**    – Safety and deadlock use cases plus the
//!   [`AnalysisContext`] that caches the last analysed state.
//!
//! - **`strategies`** – Prevention and recovery explanations for the loaded
//!   state.
//!
//! [`InputSource`]: crate::infrastructure::input::InputSource
//! [`AnalysisContext`]: analyze::AnalysisContext

pub mod analyze;
pub mod strategies;
