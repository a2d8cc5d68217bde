//! Single-folder processing: detect, plan, execute.
//!
//! [`Renamer`] holds everything a run needs (config, suffix source, event
//! sink). [`Renamer::process_folder`] handles one directory and never fails:
//! every problem is reported as a [`RenameEvent::Failed`] and reflected in
//! the returned counts, so a walk over many folders always completes.

use crate::artist::{ArtistSet, detect_artist};
use crate::config::RenameConfig;
use crate::plan::{PlanError, RandomSuffix, RenamePlan, SuffixSource, plan_renames};
use crate::types::{FailureKind, RenameEvent, RenameResult};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Per-folder failures. None of these stop a walk.
#[derive(Error, Debug)]
pub enum FolderError {
    #[error("Could not detect artist for {0}, skipping")]
    NoArtist(PathBuf),
    #[error("Folder not found: {0}")]
    NotFound(PathBuf),
    #[error("Permission denied for folder: {0}")]
    PermissionDenied(PathBuf),
    #[error("Cannot read folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot plan {path}: {source}")]
    Plan {
        path: PathBuf,
        #[source]
        source: PlanError,
    },
}

impl FolderError {
    /// Classify a listing error for `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoArtist(_) => FailureKind::DetectionFailure,
            Self::NotFound(_) | Self::PermissionDenied(_) | Self::Io { .. } | Self::Plan { .. } => {
                FailureKind::FolderAccess
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NoArtist(p) | Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } | Self::Plan { path, .. } => path,
        }
    }
}

/// Failure renaming one file.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Target already exists: {0}")]
    TargetExists(PathBuf),
    #[error("Error renaming {from}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The resolved identity of one folder being processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderJob {
    pub folder: PathBuf,
    pub artist: String,
    pub project: String,
}

impl FolderJob {
    /// Resolve artist and project for `folder`.
    ///
    /// The artist comes from the path, falling back to `default_artist`. The
    /// project is `project_override` or the folder's own name.
    pub fn resolve(
        folder: &Path,
        artists: &ArtistSet,
        default_artist: Option<&str>,
        project_override: Option<&str>,
    ) -> Result<Self, FolderError> {
        let artist = detect_artist(folder, artists)
            .or(default_artist)
            .ok_or_else(|| FolderError::NoArtist(folder.to_path_buf()))?;
        let project = match project_override {
            Some(p) => p.to_string(),
            None => folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        Ok(Self {
            folder: folder.to_path_buf(),
            artist: artist.to_string(),
            project,
        })
    }
}

/// Drives folder processing and tree walks for one run.
pub struct Renamer<S = RandomSuffix> {
    pub(crate) config: RenameConfig,
    artists: ArtistSet,
    suffixes: S,
    dry_run: bool,
    events: Option<Sender<RenameEvent>>,
}

impl Renamer<RandomSuffix> {
    pub fn new(config: RenameConfig) -> Self {
        Self::with_suffixes(config, RandomSuffix)
    }
}

impl<S: SuffixSource> Renamer<S> {
    /// Build a renamer with a specific collision-suffix source.
    pub fn with_suffixes(config: RenameConfig, suffixes: S) -> Self {
        Self {
            artists: config.artist_set(),
            config,
            suffixes,
            dry_run: false,
            events: None,
        }
    }

    /// Plan and report only; leave the filesystem untouched.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Send run events to `tx`.
    pub fn with_events(mut self, tx: Sender<RenameEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    pub(crate) fn emit(&self, event: RenameEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }

    pub(crate) fn report(&self, err: &FolderError) {
        self.emit(RenameEvent::Failed {
            kind: err.kind(),
            path: err.path().to_path_buf(),
            message: err.to_string(),
        });
    }

    /// Rename the images directly inside `folder`.
    ///
    /// Returns how many files were renamed (in a dry run: would be renamed).
    /// Subfolders are not visited.
    pub fn process_folder(&mut self, folder: &Path, project_override: Option<&str>) -> RenameResult {
        let job = match FolderJob::resolve(
            folder,
            &self.artists,
            self.config.default_artist.as_deref(),
            project_override,
        ) {
            Ok(job) => job,
            Err(e) => {
                self.report(&e);
                return RenameResult::default();
            }
        };

        let plan = match self.plan_folder(&job) {
            Ok(plan) => plan,
            Err(e) => {
                self.report(&e);
                return RenameResult::default();
            }
        };

        self.emit(RenameEvent::Folder {
            path: job.folder.clone(),
            artist: job.artist.clone(),
            project: job.project.clone(),
            images: plan.images,
        });

        let result = self.execute(&job, &plan);
        self.emit(RenameEvent::FolderDone {
            path: job.folder,
            result,
        });
        result
    }

    /// List the folder and compute its plan.
    fn plan_folder(&mut self, job: &FolderJob) -> Result<RenamePlan, FolderError> {
        let (files, occupied) = list_folder(&job.folder)?;
        plan_renames(
            &files,
            &occupied,
            &job.artist,
            &job.project,
            &mut self.suffixes,
        )
        .map_err(|source| FolderError::Plan {
            path: job.folder.clone(),
            source,
        })
    }

    fn execute(&self, job: &FolderJob, plan: &RenamePlan) -> RenameResult {
        let mut result = RenameResult {
            skipped: plan.skipped.len(),
            failed: plan.unresolved.len(),
            ..Default::default()
        };

        for file in &plan.skipped {
            self.emit(RenameEvent::Skipped {
                folder: job.folder.clone(),
                file: file.clone(),
            });
        }
        for file in &plan.unresolved {
            self.emit(RenameEvent::Failed {
                kind: FailureKind::CollisionUnresolved,
                path: job.folder.join(file),
                message: format!("No free name found for {file}, leaving it unchanged"),
            });
        }

        for rename in &plan.renames {
            if self.dry_run {
                self.emit(RenameEvent::Planned {
                    folder: job.folder.clone(),
                    from: rename.from.clone(),
                    to: rename.to.clone(),
                });
                result.renamed += 1;
                continue;
            }

            match rename_file(&job.folder, &rename.from, &rename.to) {
                Ok(()) => {
                    self.emit(RenameEvent::Renamed {
                        folder: job.folder.clone(),
                        from: rename.from.clone(),
                        to: rename.to.clone(),
                    });
                    result.renamed += 1;
                }
                Err(e) => {
                    let path = match &e {
                        RenameError::TargetExists(p) => p.clone(),
                        RenameError::Io { from, .. } => from.clone(),
                    };
                    self.emit(RenameEvent::Failed {
                        kind: FailureKind::RenameFailure,
                        path,
                        message: e.to_string(),
                    });
                    result.failed += 1;
                }
            }
        }

        result
    }
}

/// List a folder: regular-file names, plus the set of every entry name.
///
/// Names that are not valid UTF-8 still occupy their slot but are never
/// renamed.
fn list_folder(folder: &Path) -> Result<(Vec<String>, HashSet<String>), FolderError> {
    let entries = fs::read_dir(folder).map_err(|e| FolderError::from_io(folder, e))?;

    let mut files = Vec::new();
    let mut occupied = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| FolderError::from_io(folder, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        // Follows symlinks, so a link to an image is renamed like the image.
        if entry.path().is_file() {
            files.push(name.clone());
        }
        occupied.insert(name);
    }
    Ok((files, occupied))
}

/// Rename `from` to `to` inside `folder`, refusing to overwrite.
fn rename_file(folder: &Path, from: &str, to: &str) -> Result<(), RenameError> {
    let source = folder.join(from);
    let target = folder.join(to);
    // symlink_metadata so a dangling link still counts as taken.
    if target.symlink_metadata().is_ok() {
        return Err(RenameError::TargetExists(target));
    }
    fs::rename(&source, &target).map_err(|e| RenameError::Io {
        from: source,
        to: target,
        source: e,
    })
}
