//! CLI output formatting for run events.
//!
//! # Output Format
//!
//! ```text
//! Processing folder: art/Alice/Sketches
//!     Artist: Alice
//!     Project: Sketches
//!     Found 3 image files
//!     Skipping already renamed file: Alice_Sketches_01.jpg
//!     Renaming: b.png -> Alice_Sketches_02.png
//!     Error renaming c.jpg: Permission denied (os error 13)
//!
//! Warning: Could not detect artist for art/misc, skipping
//!
//! Total files renamed: 1
//! ```
//!
//! Dry runs print `Would rename:` in place of `Renaming:` and end with
//! `Total files to rename`. With `--json` each event is one JSON object per
//! line instead.
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O, so they are
//! tested directly. `print_*` wrappers write to stdout.

use crate::types::{FailureKind, RenameEvent, RenameResult};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format one event as display lines. Some events produce no output.
pub fn format_event(event: &RenameEvent) -> Vec<String> {
    match event {
        RenameEvent::Folder {
            path,
            artist,
            project,
            images,
        } => vec![
            String::new(),
            format!("Processing folder: {}", path.display()),
            format!("{}Artist: {}", indent(1), artist),
            format!("{}Project: {}", indent(1), project),
            format!("{}Found {} image files", indent(1), images),
        ],
        RenameEvent::Skipped { file, .. } => {
            vec![format!("{}Skipping already renamed file: {}", indent(1), file)]
        }
        RenameEvent::Planned { from, to, .. } => {
            vec![format!("{}Would rename: {} -> {}", indent(1), from, to)]
        }
        RenameEvent::Renamed { from, to, .. } => {
            vec![format!("{}Renaming: {} -> {}", indent(1), from, to)]
        }
        RenameEvent::Failed { kind, message, .. } => match kind {
            // File-level problems belong to the folder block above them.
            FailureKind::RenameFailure | FailureKind::CollisionUnresolved => {
                vec![format!("{}{}", indent(1), message)]
            }
            FailureKind::DetectionFailure => {
                vec![String::new(), format!("Warning: {}", message)]
            }
            FailureKind::FolderAccess => vec![String::new(), format!("Error: {}", message)],
        },
        RenameEvent::FolderDone { .. } => Vec::new(),
    }
}

/// Format one event as a single JSON line.
pub fn format_event_json(event: &RenameEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}

/// Format the closing summary for a run.
pub fn format_summary(total: &RenameResult, dry_run: bool) -> Vec<String> {
    let headline = if dry_run {
        format!("Total files to rename: {}", total.renamed)
    } else {
        format!("Total files renamed: {}", total.renamed)
    };
    let mut lines = vec![String::new(), headline];
    if total.skipped > 0 {
        lines.push(format!("{}Already named: {}", indent(1), total.skipped));
    }
    if total.failed > 0 {
        lines.push(format!("{}Failed: {}", indent(1), total.failed));
    }
    lines
}

/// Print an event to stdout, as text or JSON.
pub fn print_event(event: &RenameEvent, json: bool) {
    if json {
        match format_event_json(event) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Cannot serialize event: {}", e),
        }
    } else {
        for line in format_event(event) {
            println!("{}", line);
        }
    }
}

/// Print the run summary to stdout.
pub fn print_summary(total: &RenameResult, dry_run: bool) {
    for line in format_summary(total, dry_run) {
        println!("{}", line);
    }
}
