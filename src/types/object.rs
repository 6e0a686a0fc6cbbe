use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One object of the dependency graph, merged from both sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    pub name: String,
    pub group: Option<String>,
    pub description: Option<String>,
    pub tags: BTreeSet<String>,
    pub depends_on: BTreeSet<String>,
}

impl ObjectNode {
    /// Creates a placeholder node with no metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the group for this node
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the description for this node
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds tags to this node
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds dependencies to this node
    pub fn with_depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(deps.into_iter().map(Into::into));
        self
    }

    /// Directory name used under `models/`, falling back to `default_group`
    pub fn group_dir<'a>(&'a self, default_group: &'a str) -> &'a str {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(default_group)
    }
}
