//! Depth-bounded tree walk.
//!
//! The walk visits every non-hidden subdirectory below a root, renaming the
//! images directly inside each one:
//!
//! ```text
//! root/                  depth 0 lists this; root's own images are untouched
//! ├── Alice/             processed, then walked at depth 1
//! │   └── Sketches/      processed, then walked at depth 2
//! ├── .thumbs/           hidden, never entered
//! └── cover.jpg          not renamed
//! ```
//!
//! With `max_depth = Some(n)`, listing stops once the depth exceeds `n`, so
//! folders up to `n + 1` levels below the root are processed. `max_depth = 0`
//! processes only the root's immediate subfolders.
//!
//! Images sitting directly in the root are never renamed by the walk. Call
//! [`Renamer::process_folder`] on the root as well if they should be.

use crate::folder::{FolderError, Renamer};
use crate::plan::SuffixSource;
use crate::types::RenameResult;
use std::fs;
use std::path::{Path, PathBuf};

impl<S: SuffixSource> Renamer<S> {
    /// Walk `root` and process every subfolder, returning the totals.
    pub fn walk(&mut self, root: &Path) -> RenameResult {
        self.walk_at(root, 0)
    }

    fn walk_at(&mut self, dir: &Path, depth: usize) -> RenameResult {
        if self.config.max_depth.is_some_and(|max| depth > max) {
            return RenameResult::default();
        }

        let subdirs = match list_subdirectories(dir) {
            Ok(subdirs) => subdirs,
            Err(e) => {
                self.report(&e);
                return RenameResult::default();
            }
        };

        let mut total = RenameResult::default();
        for subdir in &subdirs {
            total += self.process_folder(subdir, None);
            total += self.walk_at(subdir, depth + 1);
        }
        total
    }
}

/// Non-hidden subdirectories of `dir`, sorted by name.
///
/// Symlinked directories are not followed.
fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>, FolderError> {
    let entries = fs::read_dir(dir).map_err(|e| FolderError::from_io(dir, e))?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FolderError::from_io(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();
    Ok(subdirs)
}
