use std::sync::Arc;

/// One data row of a sheet, addressed by normalized column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Option<String>>,
    row: usize,
}

impl Record {
    /// Build a record; `values` is padded or truncated to the column count.
    ///
    /// `row` is the 1-based row number inside the sheet, used in log messages.
    pub fn new(columns: Arc<[String]>, mut values: Vec<Option<String>>, row: usize) -> Self {
        values.resize(columns.len(), None);
        Self {
            columns,
            values,
            row,
        }
    }

    /// Value of `column`; when several columns share the name the last one wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .and_then(|idx| self.values[idx].as_deref())
    }

    /// Whether the sheet this record came from has `column` at all
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// True when every cell is empty
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}
