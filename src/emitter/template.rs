//! Project template installation
//!
//! The template is copied with directory-merge semantics: files already at
//! the destination survive unless the template has a file at the same path.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::{Result, ResultExt};

/// Built-in skeleton: (relative path, contents)
const BUILTIN_FILES: &[(&str, &str)] = &[
    (
        "dbt_project.yml",
        include_str!("../../template/dbt_project.yml"),
    ),
    ("profiles.yml", include_str!("../../template/profiles.yml")),
    ("models/.gitkeep", ""),
];

/// Where the static project skeleton comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Template {
    /// Minimal dbt project compiled into the binary
    #[default]
    Builtin,
    /// A directory copied verbatim
    Directory(PathBuf),
}

impl Template {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map(Self::Directory).unwrap_or_default()
    }

    /// Copy the template into `dest`, creating it if needed
    pub fn install(&self, dest: &Path) -> Result<()> {
        match self {
            Self::Builtin => {
                debug!("Writing built-in project template to {}", dest.display());
                for (relative, contents) in BUILTIN_FILES {
                    let path = dest.join(relative);
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent).at_path(parent)?;
                    }
                    fs::write(&path, contents).at_path(&path)?;
                }
                Ok(())
            }
            Self::Directory(src) => {
                debug!(
                    "Copying project template {} to {}",
                    src.display(),
                    dest.display()
                );
                copy_dir(src, dest)
            }
        }
    }
}

/// Recursively copy `src` into `dst`, overwriting files of the same name.
///
/// Symlinks and special files are skipped.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).at_path(dst)?;

    for entry in fs::read_dir(src).at_path(src)? {
        let entry = entry.at_path(src)?;
        let file_type = entry.file_type().at_path(&entry.path())?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir(&src_path, &dst_path)?;
        } else if file_type.is_file() {
            fs::copy(&src_path, &dst_path).at_path(&dst_path)?;
        }
    }

    Ok(())
}
