//! Object Graph Builder
//!
//! Merges the "Dependencies" and "Objects" sheets into a map of
//! identifier → [`ObjectNode`]:
//!
//! 1. every dependency edge registers its source and target as nodes
//! 2. "Objects" metadata (group, description, tags) overwrites per node
//! 3. the collected edges become each node's `depends_on`
//!
//! Malformed rows are skipped with a warning so a messy sheet still builds.
//! No cycle detection is done; the documentation tool interprets references.

mod rows;

pub use rows::{DependencyRow, ObjectRow, RowIssue};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::sheet;
use crate::types::{ObjectNode, Result};
use crate::workbook::{Record, Workbook};

/// Counters collected while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub dependency_rows: usize,
    pub object_rows: usize,
    pub skipped_rows: usize,
}

/// Identifier → node map for one workbook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObjectGraph {
    nodes: BTreeMap<String, ObjectNode>,
}

impl ObjectGraph {
    /// Read both sheets of the workbook at `path` and build the graph
    pub fn from_workbook(path: impl AsRef<Path>) -> Result<Self> {
        let mut workbook = Workbook::open(path)?;
        let dependencies = workbook.records(sheet::DEPENDENCIES)?;
        let objects = workbook.records(sheet::OBJECTS)?;

        let (graph, stats) = Self::build(dependencies, objects);
        info!(
            "Built graph from {}: {} objects, {} edges ({} dependency rows, {} object rows, {} skipped)",
            workbook.path().display(),
            graph.len(),
            graph.edge_count(),
            stats.dependency_rows,
            stats.object_rows,
            stats.skipped_rows
        );
        Ok(graph)
    }

    /// Build from record sequences; an absent "Objects" sheet is just an
    /// empty `objects` sequence.
    pub fn build<D, O>(dependencies: D, objects: O) -> (Self, BuildStats)
    where
        D: IntoIterator<Item = Record>,
        O: IntoIterator<Item = Record>,
    {
        let mut graph = Self::default();
        let mut stats = BuildStats::default();
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for record in dependencies {
            stats.dependency_rows += 1;
            let row = match DependencyRow::try_from(&record) {
                Ok(row) => row,
                Err(issue) => {
                    warn!("Skipping {} row: {}", sheet::DEPENDENCIES, issue);
                    stats.skipped_rows += 1;
                    continue;
                }
            };
            let Some(dep) = row.depends_on else {
                debug!("{} has no dependency on row {}", row.object, record.row());
                continue;
            };

            // Deactivated objects may only appear as dependency targets
            graph.ensure(&row.object);
            graph.ensure(&dep);
            edges.entry(row.object).or_default().insert(dep);
        }

        for record in objects {
            stats.object_rows += 1;
            match ObjectRow::try_from(&record) {
                Ok(row) => graph.merge(row),
                Err(issue) => {
                    warn!("Skipping {} row: {}", sheet::OBJECTS, issue);
                    stats.skipped_rows += 1;
                }
            }
        }

        for (name, deps) in edges {
            debug!("{} depends on {:?}", name, deps);
            graph.ensure(&name).depends_on.extend(deps);
        }

        (graph, stats)
    }

    /// Node for `name`, inserting a placeholder if needed
    pub fn ensure(&mut self, name: &str) -> &mut ObjectNode {
        self.nodes
            .entry(name.to_string())
            .or_insert_with(|| ObjectNode::new(name))
    }

    /// Overwrite a node's metadata with the fields present in `row`
    pub fn merge(&mut self, row: ObjectRow) {
        let node = self.ensure(&row.object);
        if let Some(group) = row.group {
            node.group = group;
        }
        if let Some(description) = row.description {
            node.description = description;
        }
        if let Some(tags) = row.tags {
            node.tags = tags;
        }
    }

    pub fn insert(&mut self, node: ObjectNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    pub fn get(&self, name: &str) -> Option<&ObjectNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.depends_on.len()).sum()
    }

    /// Nodes in identifier order
    pub fn nodes(&self) -> impl Iterator<Item = &ObjectNode> {
        self.nodes.values()
    }

    /// Pretty JSON for `--dump-graph`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<ObjectNode> for ObjectGraph {
    fn from_iter<I: IntoIterator<Item = ObjectNode>>(iter: I) -> Self {
        let mut graph = Self::default();
        for node in iter {
            graph.insert(node);
        }
        graph
    }
}
