//! Typed views over sheet records.
//!
//! Conversion validates the identifier fields before the builder uses them.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::constants::column;
use crate::types::{non_blank, normalize_identifier, split_tags};
use crate::workbook::Record;

/// Why a row was not used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssue {
    #[error("row {row}: missing {column}")]
    MissingField { row: usize, column: &'static str },

    #[error("row {row}: {column} {raw:?} has no identifier characters")]
    EmptyIdentifier {
        row: usize,
        column: &'static str,
        raw: String,
    },
}

/// One edge from the "Dependencies" sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRow {
    pub object: String,
    /// `None` when the row names an object without a dependency
    pub depends_on: Option<String>,
}

impl TryFrom<&Record> for DependencyRow {
    type Error = RowIssue;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let object = identifier(record, column::OBJECT)?;
        let depends_on = match non_blank(record.get(column::DEPENDS_ON)) {
            Some(_) => Some(identifier(record, column::DEPENDS_ON)?),
            None => None,
        };
        Ok(Self { object, depends_on })
    }
}

/// Metadata for one object from the "Objects" sheet.
///
/// A field is `None` when the sheet has no such column; `Some(None)` when the
/// column exists but the cell is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRow {
    pub object: String,
    pub group: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub tags: Option<BTreeSet<String>>,
}

impl TryFrom<&Record> for ObjectRow {
    type Error = RowIssue;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let object = identifier(record, column::OBJECT)?;

        let group = record
            .has_column(column::GROUP)
            .then(|| non_blank(record.get(column::GROUP)).map(String::from));
        let description = record
            .has_column(column::DESCRIPTION)
            .then(|| record.get(column::DESCRIPTION).map(String::from));

        let tags = if record.has_column(column::TAGS) || record.has_column(column::GROUP) {
            let mut tags = record.get(column::TAGS).map(split_tags).unwrap_or_default();
            if let Some(Some(group)) = &group {
                tags.insert(group.clone());
            }
            Some(tags)
        } else {
            None
        };

        Ok(Self {
            object,
            group,
            description,
            tags,
        })
    }
}

fn identifier(record: &Record, column: &'static str) -> Result<String, RowIssue> {
    let raw = non_blank(record.get(column)).ok_or(RowIssue::MissingField {
        row: record.row(),
        column,
    })?;
    let name = normalize_identifier(raw);
    if name.is_empty() {
        return Err(RowIssue::EmptyIdentifier {
            row: record.row(),
            column,
            raw: raw.to_string(),
        });
    }
    Ok(name)
}
