//! Catalog of textbook deadlock prevention and recovery strategies.
//!
//! # The four deadlock conditions (for beginners)
//!
//! A deadlock can only arise when all four of these hold at once:
//!
//! - **Mutual exclusion** – some resources cannot be shared.
//! - **Hold and wait** – a process keeps what it has while asking for more.
//! - **No preemption** – resources cannot be taken away from a process.
//! - **Circular wait** – a cycle of processes each waits on the next.
//!
//! Each [`PreventionStrategy`] breaks one of those conditions.  A
//! [`RecoveryStrategy`] instead describes how to get out of a deadlock that
//! has already happened.
//!
//! Both enums parse from and serialize to kebab-case names
//! (`"hold-wait"`, `"process-termination"`, ...) so front-ends can take them
//! straight from user input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A strategy name that matched nothing in the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown strategy '{0}'")]
pub struct UnknownStrategy(pub String);

/// Ways to make one of the four deadlock conditions impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreventionStrategy {
    MutualExclusion,
    #[serde(rename = "hold-wait")]
    HoldAndWait,
    NoPreemption,
    CircularWait,
}

impl PreventionStrategy {
    /// Every prevention strategy, in the order the conditions are usually taught.
    pub const ALL: [PreventionStrategy; 4] = [
        PreventionStrategy::MutualExclusion,
        PreventionStrategy::HoldAndWait,
        PreventionStrategy::NoPreemption,
        PreventionStrategy::CircularWait,
    ];

    /// The kebab-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            PreventionStrategy::MutualExclusion => "mutual-exclusion",
            PreventionStrategy::HoldAndWait => "hold-wait",
            PreventionStrategy::NoPreemption => "no-preemption",
            PreventionStrategy::CircularWait => "circular-wait",
        }
    }

    /// Heading for display, e.g. `"MUTUAL EXCLUSION"`.
    pub fn title(self) -> String {
        self.name().replace('-', " ").to_uppercase()
    }

    /// What the strategy requires of the system.
    pub fn description(self) -> &'static str {
        match self {
            PreventionStrategy::MutualExclusion => {
                "Mutual Exclusion: only non-sharable resources are held exclusively, and only by one process at a time."
            }
            PreventionStrategy::HoldAndWait => {
                "Hold and Wait: a process must request everything it needs up front, or give back all it holds before asking for more."
            }
            PreventionStrategy::NoPreemption => {
                "No Preemption: a process whose request cannot be granted releases everything it holds and waits."
            }
            PreventionStrategy::CircularWait => {
                "Circular Wait: resource types are totally ordered and every process requests them in that order."
            }
        }
    }

    /// The common consequence shared by every prevention strategy.
    pub fn effect(self) -> &'static str {
        "Applying this removes one of the four necessary conditions for deadlock, so the system can no longer deadlock through it."
    }
}

impl fmt::Display for PreventionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreventionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s.trim())
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Ways to break a deadlock that has already formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryStrategy {
    ProcessTermination,
    ResourcePreemption,
}

impl RecoveryStrategy {
    pub const ALL: [RecoveryStrategy; 2] = [
        RecoveryStrategy::ProcessTermination,
        RecoveryStrategy::ResourcePreemption,
    ];

    /// The kebab-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            RecoveryStrategy::ProcessTermination => "process-termination",
            RecoveryStrategy::ResourcePreemption => "resource-preemption",
        }
    }

    /// Heading for display, e.g. `"PROCESS TERMINATION"`.
    pub fn title(self) -> String {
        self.name().replace('-', " ").to_uppercase()
    }

    pub fn description(self) -> &'static str {
        match self {
            RecoveryStrategy::ProcessTermination => {
                "Process Termination: abort deadlocked processes one at a time until the deadlock is resolved."
            }
            RecoveryStrategy::ResourcePreemption => {
                "Resource Preemption: take resources away from some processes and hand them to others until the cycle breaks."
            }
        }
    }

    /// The concrete action this strategy would take on the given deadlocked
    /// processes.
    ///
    /// An empty `deadlocked` slice means there is nothing to recover from.
    pub fn action(self, deadlocked: &[usize]) -> String {
        if deadlocked.is_empty() {
            return "No deadlocked processes: no recovery action is needed.".to_string();
        }
        let names = deadlocked
            .iter()
            .map(|p| format!("P{p}"))
            .collect::<Vec<_>>()
            .join(", ");
        match self {
            RecoveryStrategy::ProcessTermination => {
                format!("Would terminate deadlocked processes ({names}) to release their resources.")
            }
            RecoveryStrategy::ResourcePreemption => {
                format!("Would preempt resources held by deadlocked processes ({names}) to break the deadlock.")
            }
        }
    }
}

impl fmt::Display for RecoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecoveryStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s.trim())
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
