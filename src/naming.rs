//! The `<artist>_<project>_<NN>` filename convention.
//!
//! Every renamed image follows the same shape:
//!
//! ```text
//! Alice_Sketchbook_01.jpg          plain target
//! Alice_Sketchbook_02.PNG          extension case is preserved
//! Alice_Sketchbook_03_9f1c2ab4.jpg collision suffix before the extension
//! ```
//!
//! This module owns the pure string rules: which files count as images, how
//! an extension is split off, how target names are built, and how a name that
//! already follows the convention is recognised.

use regex::Regex;

/// Image extensions, matched case-insensitively against the end of the name.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".psd"];

/// Whether a filename is one of the image types this tool renames.
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Split a filename into `(stem, extension)`, the extension keeping its dot.
///
/// The extension starts at the last dot that is not part of the name's
/// leading run of dots:
/// - `"a.jpg"` → `("a", ".jpg")`
/// - `"a.b.JPG"` → `("a.b", ".JPG")`
/// - `".jpg"` → `(".jpg", "")`
/// - `"README"` → `("README", "")`
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}

/// Build a target name: `<artist>_<project>_<NN>[_<suffix>]<extension>`.
///
/// The index is zero-padded to two digits; wider indices print in full.
pub fn target_name(
    artist: &str,
    project: &str,
    index: u32,
    suffix: Option<&str>,
    extension: &str,
) -> String {
    match suffix {
        Some(s) => format!("{artist}_{project}_{index:02}_{s}{extension}"),
        None => format!("{artist}_{project}_{index:02}{extension}"),
    }
}

/// Recognises names that already follow the convention for one
/// artist/project pair.
///
/// A name conforms when it starts with `<artist>_<project>_` followed by at
/// least one digit. Anything may follow the digits, so suffixed names
/// (`X_Y_01_ab12cd34.jpg`) conform too. Artist and project are matched
/// literally.
#[derive(Debug, Clone)]
pub struct ConformingPattern {
    regex: Regex,
}

impl ConformingPattern {
    pub fn new(artist: &str, project: &str) -> Result<Self, regex::Error> {
        let pattern = format!(r"^{}_{}_\d+", regex::escape(artist), regex::escape(project));
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}
