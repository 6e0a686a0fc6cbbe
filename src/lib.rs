//! depdocs - Dependency Documentation Generator
//!
//! Turns a spreadsheet of object dependencies into a throwaway dbt project
//! made of stub models, then lets `dbt docs` render the lineage graph.
//!
//! ## Pipeline
//!
//! 1. [`workbook`]: read the "Dependencies" and "Objects" sheets as records
//! 2. [`graph`]: merge the records into an identifier → [`ObjectNode`] map
//! 3. [`emitter`]: copy the project template and write one stub per object
//! 4. [`tool`]: run `dbt docs generate` and `dbt docs serve`
//!
//! ## Quick Start
//!
//! ```ignore
//! use depdocs::{ObjectGraph, StubEmitter, Template, emitter};
//!
//! let graph = ObjectGraph::from_workbook("lineage.xlsx")?;
//! let root = emitter::prepare_root(None)?;
//! let project = emitter::prepare_project(&root, "lineage.xlsx".as_ref(), &Template::Builtin)?;
//! StubEmitter::default().write_models(&project, &graph)?;
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod graph;
pub mod logging;
pub mod tool;
pub mod types;
pub mod workbook;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::{DepDocsError, Result, ResultExt};

// Model
pub use graph::{BuildStats, ObjectGraph};
pub use types::{ObjectNode, normalize_identifier};
pub use workbook::{Record, Workbook};

// Output
pub use emitter::{StubEmitter, Template, stub_contents};
pub use logging::{LogContext, Verbosity};
pub use tool::{DocsRunner, ProcessRunner, ToolExit, ToolInvocation};
