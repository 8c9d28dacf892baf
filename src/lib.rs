// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repohome library - a canonical home for every repository you clone
//!
//! Repository URLs map onto `<root>/<provider>/<user>/<repo>`. The crate
//! parses those URLs, clones through the system `git`, and finds the
//! working trees already on disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clone;
pub mod commands;
pub mod config;
pub mod layout;
pub mod scanner;
pub mod url;

/// Prelude for common imports
pub mod prelude {
    pub use crate::clone::{CloneError, CloneOutcome, CloneRequest};
    pub use crate::layout::{directory_for, expand_tilde};
    pub use crate::scanner::{RepoEntry, ScanConfig};
    pub use crate::url::{Provider, RepoUrl};
    pub use anyhow::{Context, Result};
}
