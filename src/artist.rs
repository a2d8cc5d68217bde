//! Artist detection from folder paths.
//!
//! Artists are recognised by folder name: any path segment that exactly
//! matches a known artist name marks everything below it as that artist's
//! work.
//!
//! ```text
//! /art/Alice/Sketchbook      → Alice
//! /art/Alice/Bob/Collab      → Alice   (first match from the root wins)
//! /art/misc/Sketchbook       → none    (caller falls back to the default)
//! ```

use std::collections::HashSet;
use std::path::{Component, Path};

/// The known artist folder names for a run.
///
/// Keeps insertion order for display and collapses duplicates. Membership is
/// exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct ArtistSet {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ArtistSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if !self.lookup.insert(name.clone()) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ArtistSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Find the artist for a folder: the first path segment, scanning from the
/// root toward the leaf, that is a member of `artists`.
///
/// Root, prefix, `.` and `..` components never match. Segments that are not
/// valid UTF-8 are ignored.
pub fn detect_artist<'a>(folder: &'a Path, artists: &ArtistSet) -> Option<&'a str> {
    folder
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .find(|segment| artists.contains(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artists(names: &[&str]) -> ArtistSet {
        names.iter().copied().collect()
    }

    #[test]
    fn detects_artist_segment() {
        let set = artists(&["ArtistName"]);
        let path = Path::new("/home/me/art/ArtistName/ProjectX");
        assert_eq!(detect_artist(path, &set), Some("ArtistName"));
    }

    #[test]
    fn first_match_from_root_wins() {
        let set = artists(&["Bob", "Alice"]);
        let path = Path::new("/art/Alice/Bob/Collab");
        assert_eq!(detect_artist(path, &set), Some("Alice"));
    }

    #[test]
    fn leaf_segment_can_match() {
        let set = artists(&["Alice"]);
        assert_eq!(detect_artist(Path::new("art/Alice"), &set), Some("Alice"));
    }

    #[test]
    fn no_match_returns_none() {
        let set = artists(&["Alice"]);
        assert_eq!(detect_artist(Path::new("/art/misc/Sketchbook"), &set), None);
    }

    #[test]
    fn match_is_case_sensitive() {
        let set = artists(&["Alice"]);
        assert_eq!(detect_artist(Path::new("/art/alice/Sketchbook"), &set), None);
    }

    #[test]
    fn partial_segment_does_not_match() {
        let set = artists(&["Ali"]);
        assert_eq!(detect_artist(Path::new("/art/Alice/Sketchbook"), &set), None);
    }

    #[test]
    fn empty_set_never_matches() {
        assert_eq!(detect_artist(Path::new("/a/b/c"), &ArtistSet::new()), None);
    }

    #[test]
    fn set_collapses_duplicates_and_keeps_order() {
        let set = artists(&["Bob", "Alice", "Bob"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Bob", "Alice"]);
    }
}
