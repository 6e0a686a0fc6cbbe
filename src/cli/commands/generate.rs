//! Generate Command
//!
//! Workbook → object graph → project directory → documentation tool.
//! Every step runs to completion before the next one starts; the first
//! failure aborts the run without cleanup.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::emitter::{self, StubEmitter, Template};
use crate::graph::ObjectGraph;
use crate::tool::{self, DocsRunner};
use crate::types::{Result, ResultExt};

/// Command-line level options; `None`/`false` defers to the configuration
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub workbook: PathBuf,
    pub target_dir: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub tool: Option<String>,
    pub no_serve: bool,
    pub skip_docs: bool,
    pub dump_graph: Option<PathBuf>,
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub root: PathBuf,
    pub project_dir: PathBuf,
    pub objects: usize,
    pub edges: usize,
    pub files: Vec<PathBuf>,
    pub empty_files: usize,
    pub docs_invoked: bool,
}

pub fn run(
    options: &GenerateOptions,
    config: &Config,
    runner: &mut dyn DocsRunner,
) -> Result<GenerateReport> {
    let graph = ObjectGraph::from_workbook(&options.workbook)?;

    if let Some(path) = &options.dump_graph {
        write_graph_dump(path, &graph)?;
    }

    let root = emitter::prepare_root(options.target_dir.as_deref())?;
    let template = Template::from_dir(
        options
            .template_dir
            .clone()
            .or_else(|| config.output.template_dir.clone()),
    );
    let project_dir = emitter::prepare_project(&root, &options.workbook, &template)?;

    let emitted =
        StubEmitter::new(config.output.default_group.as_str()).write_models(&project_dir, &graph)?;
    info!(
        "Wrote {} models to {}",
        emitted.files.len(),
        project_dir.display()
    );

    let docs_invoked = !options.skip_docs;
    if docs_invoked {
        let program = options.tool.as_deref().unwrap_or(&config.tool.program);
        let serve = config.tool.serve && !options.no_serve;
        tool::generate_docs(runner, program, &project_dir, serve)?;
    } else {
        info!("Skipping documentation tool");
    }

    Ok(GenerateReport {
        root,
        project_dir,
        objects: graph.len(),
        edges: graph.edge_count(),
        files: emitted.files,
        empty_files: emitted.empty_files,
        docs_invoked,
    })
}

fn write_graph_dump(path: &Path, graph: &ObjectGraph) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    fs::write(path, graph.to_json()?).at_path(path)?;
    info!("Wrote object graph to {}", path.display());
    Ok(())
}
