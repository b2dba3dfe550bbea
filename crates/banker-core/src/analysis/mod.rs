//! Analysis algorithms over a resource snapshot.
//!
//! - **`validation`** – Shape and consistency screening.  Run it first; the
//!   checkers assume well-formed input.
//!
//! - **`safety`** – The Banker's safety search: is there an order in which
//!   every process can finish, given Allocation, Max and Available?
//!
//! - **`deadlock`** – Allocation-graph reduction: given only Allocation and
//!   Available, can every process eventually be resolved?
//!
//! `safety` and `deadlock` are independent of each other.  Both are pure
//! functions of their borrowed inputs; all working state (`Work`, `Finish`)
//! is local to a single call.

pub mod deadlock;
pub mod safety;
pub mod validation;
