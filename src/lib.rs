//! # artist-rename
//!
//! Renames image files across a folder tree into a uniform
//! `<artist>_<project>_<NN>.<ext>` scheme. The artist comes from folder names,
//! the project from the folder holding the images.
//!
//! ```text
//! art/                                 art/
//! ├── Alice/                           ├── Alice/
//! │   └── Sketchbook/                  │   └── Sketchbook/
//! │       ├── scan-002.png      →      │       ├── Alice_Sketchbook_01.JPG
//! │       ├── IMG_0001.JPG             │       ├── Alice_Sketchbook_02.png
//! │       └── notes.txt                │       └── notes.txt
//! └── .thumbs/                         └── .thumbs/
//! ```
//!
//! # Architecture
//!
//! Each folder goes through the same steps:
//!
//! ```text
//! 1. Detect   folder path  →  artist     (first path segment that is a known artist)
//! 2. Plan     file names   →  RenamePlan (pure: sort, skip, number, de-collide)
//! 3. Execute  RenamePlan   →  RenameResult (one fs::rename per file)
//! ```
//!
//! Planning is a pure function over names, so every naming rule is tested
//! without touching disk. Execution and the tree walk never abort on a
//! per-folder or per-file problem: failures are reported as events and the
//! walk moves on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`artist`] | [`ArtistSet`](artist::ArtistSet) and path-based artist detection |
//! | [`naming`] | Filename rules: image extensions, extension splitting, target names |
//! | [`plan`] | Per-folder rename planning and collision suffixes |
//! | [`folder`] | [`Renamer`](folder::Renamer): resolve, plan and execute one folder |
//! | [`walk`] | Depth-bounded recursive walk over subfolders |
//! | [`config`] | `artist-rename.toml` loading, merging and validation |
//! | [`types`] | Run totals and the event log shared with the front end |
//! | [`output`] | Text and JSON rendering of events |
//!
//! # Design Decisions
//!
//! ## Idempotent Re-runs
//!
//! A file already named `<artist>_<project>_<digits>...` is skipped and does
//! not consume an index, so running the tool twice is a no-op and new images
//! dropped into a finished folder are numbered from 01 again, then suffixed
//! around the names already taken.
//!
//! ## Collisions Never Overwrite
//!
//! A taken target name gets an 8-character random suffix before the
//! extension. Suffixes are redrawn a bounded number of times; a file that
//! still collides is left alone and reported. Immediately before each rename
//! the target is checked again, so a file that appeared mid-run is never
//! replaced.
//!
//! ## Root Images Stay Put
//!
//! The walk renames images inside the root's subfolders, never in the root
//! itself. This is long-standing behaviour that existing trees rely on.

pub mod artist;
pub mod config;
pub mod folder;
pub mod naming;
pub mod output;
pub mod plan;
pub mod types;
pub mod walk;

pub use folder::Renamer;

#[cfg(test)]
pub(crate) mod test_helpers;
