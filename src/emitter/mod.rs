//! Stub Emitter
//!
//! Lays out a documentation project on disk:
//!
//! ```text
//! <root>/<workbook stem>/
//!     dbt_project.yml, profiles.yml, ...   (template)
//!     models/<group>/<object>.sql          (one stub per object)
//! ```
//!
//! Each stub only carries what the documentation tool needs to draw the
//! lineage graph: one `ref` annotation per dependency and a `config` line
//! with the object's tags.

mod template;

pub use template::{Template, copy_dir};

use std::ffi::{OsStr, OsString};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::output;
use crate::graph::ObjectGraph;
use crate::types::{DepDocsError, ObjectNode, Result, ResultExt, is_single_dir_name};

/// Destination root: the caller's directory, or a fresh persistent temp dir.
///
/// A supplied directory is created when missing and never cleared.
pub fn prepare_root(target: Option<&Path>) -> Result<PathBuf> {
    match target {
        Some(dir) => {
            fs::create_dir_all(dir).at_path(dir)?;
            Ok(dir.to_path_buf())
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix(output::TEMP_DIR_PREFIX)
                .tempdir()?
                .keep();
            debug!("Created destination {}", dir.display());
            Ok(dir)
        }
    }
}

/// Project directory name: the workbook file stem, byte for byte
pub fn project_name(workbook: &Path) -> OsString {
    workbook
        .file_stem()
        .filter(|s| !s.is_empty())
        .unwrap_or(OsStr::new("project"))
        .to_os_string()
}

/// Install `template` into `<root>/<workbook stem>` and return that directory
pub fn prepare_project(root: &Path, workbook: &Path, template: &Template) -> Result<PathBuf> {
    let project_dir = root.join(project_name(workbook));
    info!("Preparing project in {}", project_dir.display());
    template.install(&project_dir)?;
    Ok(project_dir)
}

/// Stub file text for one object.
///
/// Dependencies first, one per line, then an optional tags line. An object
/// with neither produces an empty string.
pub fn stub_contents(node: &ObjectNode) -> String {
    let mut out = String::new();
    for dep in &node.depends_on {
        let _ = writeln!(out, "-- depends on {{{{ref({})}}}}", quote_literal(dep));
    }
    if !node.tags.is_empty() {
        let tags = node
            .tags
            .iter()
            .map(|t| quote_literal(t))
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{{{{config(tags=[{}])}}}}", tags);
    }
    out
}

/// Single-quoted Jinja string literal
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Summary of one emission pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub files: Vec<PathBuf>,
    pub empty_files: usize,
}

/// Writes one stub model per graph node
pub struct StubEmitter {
    default_group: String,
}

impl StubEmitter {
    pub fn new(default_group: impl Into<String>) -> Self {
        Self {
            default_group: default_group.into(),
        }
    }

    /// `models/<group>` directory of `node` inside `project_dir`
    pub fn model_dir(&self, project_dir: &Path, node: &ObjectNode) -> Result<PathBuf> {
        let group = node.group_dir(&self.default_group);
        if !is_single_dir_name(group) {
            return Err(DepDocsError::InvalidGroup {
                object: node.name.clone(),
                group: group.to_string(),
            });
        }
        Ok(project_dir.join(output::MODELS_DIR).join(group))
    }

    pub fn write_model(&self, project_dir: &Path, node: &ObjectNode) -> Result<PathBuf> {
        let dir = self.model_dir(project_dir, node)?;
        fs::create_dir_all(&dir).at_path(&dir)?;

        let path = dir.join(format!("{}.{}", node.name, output::STUB_EXTENSION));
        fs::write(&path, stub_contents(node)).at_path(&path)?;
        Ok(path)
    }

    pub fn write_models(&self, project_dir: &Path, graph: &ObjectGraph) -> Result<EmitReport> {
        let mut report = EmitReport::default();
        for node in graph.nodes() {
            info!("Writing model for {}", node.name);
            let path = self.write_model(project_dir, node)?;
            if node.depends_on.is_empty() && node.tags.is_empty() {
                report.empty_files += 1;
            }
            report.files.push(path);
        }
        Ok(report)
    }
}

impl Default for StubEmitter {
    fn default() -> Self {
        Self::new(output::DEFAULT_GROUP)
    }
}
