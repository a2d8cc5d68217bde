//! Shared test utilities: build throwaway folder trees and read them back.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_tree(&["Alice/Sketches/b.png", "Alice/Sketches/a.jpg", ".cache/"]);
//! // ... run a renamer on tmp.path() ...
//! assert_eq!(
//!     file_names(&tmp.path().join("Alice/Sketches")),
//!     vec!["Alice_Sketches_01.jpg", "Alice_Sketches_02.png"],
//! );
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory containing `paths`.
///
/// Entries ending in `/` become empty directories; everything else becomes a
/// file whose content is its own relative path, so tests can check that a
/// renamed file kept its bytes.
pub fn setup_tree(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in paths {
        let full = tmp.path().join(rel);
        if rel.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, rel).unwrap();
        }
    }
    tmp
}

// =========================================================================
// Lookups
// =========================================================================

/// Names of all entries directly inside `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Every file under `root` as a `/`-separated relative path, sorted.
pub fn all_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    collect_files(root, root, &mut out);
    out.sort();
    out
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap();
            let parts: Vec<_> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(parts.join("/"));
        }
    }
}
