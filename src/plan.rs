//! Rename planning for a single folder.
//!
//! [`plan_renames`] is a pure function: given the filenames in a folder and
//! the resolved artist/project, it decides which images get which new names.
//! Nothing touches the filesystem here, so every rule is unit-testable.
//!
//! ## Rules
//!
//! 1. Only image files are considered (see [`naming::is_image_name`]).
//! 2. Images are sorted by name; that order assigns indices starting at 1.
//! 3. Names already matching `<artist>_<project>_<digits>` are skipped and do
//!    not consume an index. Re-running on a renamed folder is a no-op.
//! 4. A target that is already taken, on disk or earlier in the plan, gets an
//!    8-character suffix from a [`SuffixSource`]. Suffixes are redrawn up to
//!    [`MAX_SUFFIX_ATTEMPTS`] times; a file that still collides is left alone
//!    and reported as unresolved.

use crate::naming::{self, ConformingPattern};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;
use uuid::Uuid;

/// Length of the collision suffix.
pub const SUFFIX_LEN: usize = 8;

/// Suffix draws per file before giving up on it.
pub const MAX_SUFFIX_ATTEMPTS: usize = 16;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Cannot build name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Source of collision suffixes.
pub trait SuffixSource {
    /// Produce the next suffix. Implementations should return
    /// [`SUFFIX_LEN`] filename-safe characters.
    fn next_suffix(&mut self) -> String;
}

impl<S: SuffixSource + ?Sized> SuffixSource for &mut S {
    fn next_suffix(&mut self) -> String {
        (**self).next_suffix()
    }
}

/// Production source: the first 8 hex digits of a random v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl SuffixSource for RandomSuffix {
    fn next_suffix(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(SUFFIX_LEN);
        id
    }
}

/// Deterministic source: replays the given suffixes in order, then counts
/// upward in zero-padded hex (`00000000`, `00000001`, ...).
#[derive(Debug, Default, Clone)]
pub struct FixedSuffixes {
    queue: VecDeque<String>,
    counter: u32,
}

impl FixedSuffixes {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: suffixes.into_iter().map(Into::into).collect(),
            counter: 0,
        }
    }
}

impl SuffixSource for FixedSuffixes {
    fn next_suffix(&mut self) -> String {
        self.queue.pop_front().unwrap_or_else(|| {
            let s = format!("{:08x}", self.counter);
            self.counter = self.counter.wrapping_add(1);
            s
        })
    }
}

/// One planned rename within a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub from: String,
    pub to: String,
}

/// The outcome of planning one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    /// Renames in index order.
    pub renames: Vec<PlannedRename>,
    /// Images already following the convention.
    pub skipped: Vec<String>,
    /// Images for which no free name was found.
    pub unresolved: Vec<String>,
    /// Number of image files considered.
    pub images: usize,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Compute the rename plan for one folder.
///
/// `files` are the regular files in the folder. `occupied` holds any other
/// names present (subdirectories and the like); every name in `files` is
/// treated as taken as well.
pub fn plan_renames<S: SuffixSource>(
    files: &[String],
    occupied: &HashSet<String>,
    artist: &str,
    project: &str,
    suffixes: &mut S,
) -> Result<RenamePlan, PlanError> {
    let conforming = ConformingPattern::new(artist, project)?;

    let mut images: Vec<&str> = files
        .iter()
        .map(String::as_str)
        .filter(|f| naming::is_image_name(f))
        .collect();
    images.sort_unstable();

    let mut taken: HashSet<&str> = occupied.iter().map(String::as_str).collect();
    taken.extend(files.iter().map(String::as_str));

    let mut plan = RenamePlan {
        images: images.len(),
        ..Default::default()
    };
    // Reserved targets are owned here; `taken` only borrows from the inputs.
    let mut reserved: HashSet<String> = HashSet::new();
    let mut index: u32 = 1;

    for name in images {
        if conforming.matches(name) {
            plan.skipped.push(name.to_string());
            continue;
        }

        let (_, extension) = naming::split_extension(name);
        let is_free = |candidate: &str| !taken.contains(candidate) && !reserved.contains(candidate);

        let mut target = naming::target_name(artist, project, index, None, extension);
        if !is_free(&target) {
            let found = (0..MAX_SUFFIX_ATTEMPTS).find_map(|_| {
                let suffix = suffixes.next_suffix();
                let candidate =
                    naming::target_name(artist, project, index, Some(&suffix), extension);
                is_free(&candidate).then_some(candidate)
            });
            match found {
                Some(candidate) => target = candidate,
                None => {
                    plan.unresolved.push(name.to_string());
                    continue;
                }
            }
        }

        reserved.insert(target.clone());
        plan.renames.push(PlannedRename {
            from: name.to_string(),
            to: target,
        });
        index += 1;
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn plan(files: &[&str]) -> RenamePlan {
        plan_renames(
            &names(files),
            &HashSet::new(),
            "X",
            "Y",
            &mut FixedSuffixes::default(),
        )
        .unwrap()
    }

    fn pairs(plan: &RenamePlan) -> Vec<(&str, &str)> {
        plan.renames
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str()))
            .collect()
    }

    #[test]
    fn sorted_and_extension_case_preserved() {
        let p = plan(&["b.png", "a.jpg", "c.PNG"]);
        assert_eq!(
            pairs(&p),
            vec![
                ("a.jpg", "X_Y_01.jpg"),
                ("b.png", "X_Y_02.png"),
                ("c.PNG", "X_Y_03.PNG"),
            ]
        );
        assert_eq!(p.images, 3);
    }

    #[test]
    fn non_images_never_planned() {
        let p = plan(&["notes.txt", "a.jpg", "thumbs.db"]);
        assert_eq!(pairs(&p), vec![("a.jpg", "X_Y_01.jpg")]);
        assert_eq!(p.images, 1);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let p = plan(&[]);
        assert!(p.is_empty());
        assert_eq!(p.images, 0);
        assert!(p.skipped.is_empty());
    }

    #[test]
    fn sort_is_bytewise() {
        let p = plan(&["a.jpg", "B.jpg", "_c.jpg"]);
        let from: Vec<&str> = p.renames.iter().map(|r| r.from.as_str()).collect();
        assert_eq!(from, vec!["B.jpg", "_c.jpg", "a.jpg"]);
    }

    #[test]
    fn conforming_files_skipped_without_consuming_index() {
        let p = plan(&["X_Y_05.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(p.skipped, vec!["X_Y_05.jpg"]);
        assert_eq!(
            pairs(&p),
            vec![("a.jpg", "X_Y_01.jpg"), ("b.jpg", "X_Y_02.jpg")]
        );
    }

    #[test]
    fn second_pass_is_noop() {
        let first = plan(&["b.png", "a.jpg", "c.PNG", "notes.txt"]);
        let mut after: Vec<String> = first.renames.iter().map(|r| r.to.clone()).collect();
        after.push("notes.txt".to_string());

        let second = plan_renames(
            &after,
            &HashSet::new(),
            "X",
            "Y",
            &mut FixedSuffixes::default(),
        )
        .unwrap();
        assert!(second.is_empty());
        assert_eq!(second.skipped.len(), 3);
    }

    #[test]
    fn collision_with_existing_file_gets_suffix() {
        // X_Y_01.jpg is skipped as conforming but still occupies its name.
        let files = names(&["X_Y_01.jpg", "a.jpg"]);
        let mut suffixes = FixedSuffixes::new(["deadbeef"]);
        let p = plan_renames(&files, &HashSet::new(), "X", "Y", &mut suffixes).unwrap();
        assert_eq!(pairs(&p), vec![("a.jpg", "X_Y_01_deadbeef.jpg")]);
    }

    #[test]
    fn collision_with_other_artist_file() {
        // Taken by an entry that is not in the file list.
        let files = names(&["a.jpg"]);
        let occupied: HashSet<String> = ["X_Y_01.jpg".to_string()].into();
        let mut suffixes = FixedSuffixes::new(["0badf00d"]);
        let p = plan_renames(&files, &occupied, "X", "Y", &mut suffixes).unwrap();
        let to = &p.renames[0].to;
        assert_ne!(to, "X_Y_01.jpg");
        assert!(to.ends_with(".jpg"));
        assert_eq!(to, "X_Y_01_0badf00d.jpg");
    }

    #[test]
    fn collision_with_directory_name() {
        let occupied: HashSet<String> = ["X_Y_01.png".to_string()].into();
        let mut suffixes = FixedSuffixes::new(["cafebabe"]);
        let p = plan_renames(&names(&["a.png"]), &occupied, "X", "Y", &mut suffixes).unwrap();
        assert_eq!(p.renames[0].to, "X_Y_01_cafebabe.png");
    }

    #[test]
    fn repeated_suffix_is_redrawn() {
        let occupied: HashSet<String> =
            ["X_Y_01.jpg".to_string(), "X_Y_01_aaaaaaaa.jpg".to_string()].into();
        let mut suffixes = FixedSuffixes::new(["aaaaaaaa", "bbbbbbbb"]);
        let p = plan_renames(&names(&["a.jpg"]), &occupied, "X", "Y", &mut suffixes).unwrap();
        assert_eq!(p.renames[0].to, "X_Y_01_bbbbbbbb.jpg");
    }

    #[test]
    fn targets_unique_when_every_index_collides() {
        let occupied: HashSet<String> = ["X_Y_01.jpg", "X_Y_02.jpg", "X_Y_03.jpg"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut suffixes = FixedSuffixes::new(["11111111"; 3]);
        let p = plan_renames(
            &names(&["a.jpg", "b.jpg", "c.jpg"]),
            &occupied,
            "X",
            "Y",
            &mut suffixes,
        )
        .unwrap();
        let targets: HashSet<&str> = p.renames.iter().map(|r| r.to.as_str()).collect();
        assert_eq!(targets.len(), 3);
        assert!(targets.contains("X_Y_03_11111111.jpg"));
        assert!(targets.is_disjoint(&occupied.iter().map(String::as_str).collect()));
    }

    #[test]
    fn exhausted_suffixes_leave_file_unresolved() {
        let mut occupied: HashSet<String> = ["X_Y_01.jpg".to_string()].into();
        occupied.insert("X_Y_01_ffffffff.jpg".to_string());
        let mut suffixes = FixedSuffixes::new(vec!["ffffffff"; MAX_SUFFIX_ATTEMPTS]);
        let p = plan_renames(&names(&["a.jpg", "b.jpg"]), &occupied, "X", "Y", &mut suffixes)
            .unwrap();
        assert_eq!(p.unresolved, vec!["a.jpg"]);
        // b.jpg takes the index a.jpg could not use, and collides the same way.
        assert_eq!(p.renames.len(), 1);
        assert_eq!(p.renames[0].from, "b.jpg");
        assert_eq!(p.renames[0].to, "X_Y_01_00000000.jpg");
    }

    #[test]
    fn metacharacters_in_names_are_literal() {
        let files = names(&["A.B_(x)_01.jpg", "AxB_(x)_01.jpg"]);
        let p = plan_renames(
            &files,
            &HashSet::new(),
            "A.B",
            "(x)",
            &mut FixedSuffixes::default(),
        )
        .unwrap();
        assert_eq!(p.skipped, vec!["A.B_(x)_01.jpg"]);
        assert_eq!(p.renames.len(), 1);
        assert_eq!(p.renames[0].from, "AxB_(x)_01.jpg");
        assert_eq!(p.renames[0].to, "A.B_(x)_01_00000000.jpg");
    }

    #[test]
    fn random_suffix_is_hex_of_fixed_length() {
        let s = RandomSuffix.next_suffix();
        assert_eq!(s.len(), SUFFIX_LEN);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fixed_suffixes_fall_back_to_counter() {
        let mut s = FixedSuffixes::new(["abc"]);
        assert_eq!(s.next_suffix(), "abc");
        assert_eq!(s.next_suffix(), "00000000");
        assert_eq!(s.next_suffix(), "00000001");
    }
}
