//! banker-cli library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! ```text
//! banker (main.rs)        clap arguments, logging setup, exit codes
//!   infrastructure/
//!     input               text parsing, InputSource implementations
//!     config              banker.toml loading
//!     render              text and JSON report output
//!   application/
//!     analyze             AnalysisContext, safety and deadlock use cases
//!     strategies          prevention / recovery explanations
//!   domain/
//!     report              serializable result DTOs
//!       ↓
//! banker-core             the algorithms
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
