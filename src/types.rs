//! Shared types: run totals and the event log.
//!
//! The library never prints. Everything a user might want to see is sent as
//! a [`RenameEvent`] over an optional channel, and the front end decides how
//! to render it (see [`crate::output`]). Events serialize to JSON for
//! `--json` output.

use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Counts for one folder or a whole walk.
///
/// `renamed` is the headline figure: files actually renamed (or, in a dry
/// run, files that would be). Skipped and failed files are never included in
/// it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameResult {
    pub renamed: usize,
    /// Images already following the naming convention.
    pub skipped: usize,
    /// Renames that were planned but did not happen.
    pub failed: usize,
}

impl RenameResult {
    pub fn renamed(renamed: usize) -> Self {
        Self {
            renamed,
            ..Default::default()
        }
    }
}

impl Add for RenameResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            renamed: self.renamed + rhs.renamed,
            skipped: self.skipped + rhs.skipped,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for RenameResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for RenameResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Category of a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No artist could be resolved for a folder.
    DetectionFailure,
    /// A folder could not be listed.
    FolderAccess,
    /// A single file could not be renamed.
    RenameFailure,
    /// No free target name was found for a file.
    CollisionUnresolved,
}

/// One entry in the run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenameEvent {
    /// A folder was listed and planned.
    Folder {
        path: PathBuf,
        artist: String,
        project: String,
        images: usize,
    },
    /// An image already follows the convention.
    Skipped { folder: PathBuf, file: String },
    /// Dry run: this rename would happen.
    Planned {
        folder: PathBuf,
        from: String,
        to: String,
    },
    /// A rename succeeded.
    Renamed {
        folder: PathBuf,
        from: String,
        to: String,
    },
    /// Something went wrong; the walk carries on.
    Failed {
        kind: FailureKind,
        path: PathBuf,
        message: String,
    },
    /// A folder finished.
    FolderDone { path: PathBuf, result: RenameResult },
}
