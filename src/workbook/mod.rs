//! Spreadsheet Loader
//!
//! Reads workbook sheets into [`Record`] sequences. Sheet row 1 is always
//! the header row, whatever it holds; header cells are normalized into
//! column names and every later non-blank row becomes one record.
//!
//! A sheet that does not exist yields no records and a warning. Any format
//! calamine can auto-detect (xlsx, xlsm, xlsb, xls, ods) is accepted; the
//! file is opened read-only.

mod record;

pub use record::Record;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::{DepDocsError, Result, normalize_identifier};

/// An opened workbook
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("Opening workbook {}", path.display());
        let sheets = open_workbook_auto(&path).map_err(|e| DepDocsError::workbook(&path, e))?;
        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }

    /// Records of `sheet`, or an empty sequence if the sheet is missing
    pub fn records(&mut self, sheet: &str) -> Result<SheetRecords> {
        if !self.has_sheet(sheet) {
            warn!("Sheet {} not found in {}", sheet, self.path.display());
            return Ok(SheetRecords::empty());
        }

        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| DepDocsError::workbook(&self.path, format!("sheet {}: {}", sheet, e)))?;
        debug!(
            "Sheet {} has {} rows x {} columns",
            sheet,
            range.height(),
            range.width()
        );
        Ok(SheetRecords::from_range(range))
    }
}

/// Convenience: open `path` and collect the records of one sheet
pub fn read_sheet(path: impl AsRef<Path>, sheet: &str) -> Result<Vec<Record>> {
    let mut workbook = Workbook::open(path)?;
    Ok(workbook.records(sheet)?.collect())
}

/// Lazy iterator over the data rows of one sheet
pub struct SheetRecords {
    range: Range<Data>,
    columns: Arc<[String]>,
    /// Sheet row number of the range's first row, 1-based
    first_row: usize,
    next: usize,
}

impl SheetRecords {
    pub fn empty() -> Self {
        Self {
            range: Range::empty(),
            columns: Arc::from(Vec::new()),
            first_row: 1,
            next: 0,
        }
    }

    /// Wrap an already-decoded range.
    ///
    /// The header is sheet row 1 even when the used range starts lower; in
    /// that case every column name is empty and no field is addressable.
    pub fn from_range(range: Range<Data>) -> Self {
        let Some((top, _)) = range.start() else {
            return Self::empty();
        };
        let width = range.width();

        let (columns, next): (Arc<[String]>, usize) = if top == 0 {
            let columns: Arc<[String]> = (0..width)
                .map(|col| {
                    range
                        .get((0, col))
                        .and_then(cell_text)
                        .map(|h| normalize_identifier(&h))
                        .unwrap_or_default()
                })
                .collect();
            (columns, 1)
        } else {
            warn!("Header row is empty; no column can be addressed by name");
            (vec![String::new(); width].into(), 0)
        };
        warn_on_collisions(&columns);

        Self {
            range,
            columns,
            first_row: top as usize + 1,
            next,
        }
    }

    /// Normalized column names from the header row
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for SheetRecords {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        while self.next < self.range.height() {
            let idx = self.next;
            self.next += 1;

            let values = (0..self.columns.len())
                .map(|col| self.range.get((idx, col)).and_then(cell_text))
                .collect();
            let record = Record::new(Arc::clone(&self.columns), values, self.first_row + idx);
            if !record.is_blank() {
                return Some(record);
            }
        }
        None
    }
}

/// Text form of a cell. Empty cells and empty strings are absent; numbers,
/// booleans, dates and error values are rendered as text.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn warn_on_collisions(columns: &[String]) {
    let mut seen = HashSet::new();
    for name in columns.iter().filter(|c| !c.is_empty()) {
        if !seen.insert(name.as_str()) {
            warn!("Duplicate column {} after normalization; the last one wins", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use crate::logging::{LogContext, Verbosity};

    fn range(rows: &[&[&str]]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(value.to_string()));
                }
            }
        }
        range
    }

    #[test]
    fn test_headers_are_normalized() {
        let records = SheetRecords::from_range(range(&[
            &["Object", "Depends On", "Notes (internal)"],
            &["Orders", "Customers", ""],
        ]));
        assert_eq!(
            records.columns(),
            &["Object", "Depends_On", "Notes_internal"]
        );
        let rows: Vec<_> = records.collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Depends_On"), Some("Customers"));
        assert_eq!(rows[0].get("Notes_internal"), None);
        assert_eq!(rows[0].row(), 2);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows: Vec<_> = SheetRecords::from_range(range(&[
            &["Object", "Depends_On"],
            &["Orders", "Customers"],
            &["", ""],
            &["Invoices", ""],
        ]))
        .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Object"), Some("Invoices"));
        assert_eq!(rows[1].row(), 4);
    }

    #[test]
    fn test_first_row_is_always_header() {
        let rows: Vec<_> =
            SheetRecords::from_range(range(&[&["Orders", "Customers"], &["Invoices", "Orders"]]))
                .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Orders"), Some("Invoices"));
    }

    #[test]
    fn test_non_string_cells_become_text() {
        let mut r = range(&[&["Object", "Tags"], &["Orders", ""]]);
        r.set_value((1, 1), Data::Float(2024.0));
        let rows: Vec<_> = SheetRecords::from_range(r).collect();
        assert_eq!(rows[0].get("Tags"), Some("2024"));
    }

    #[test]
    fn test_read_sheet_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("deps.xlsx");
        let mut book = rust_xlsxwriter::Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name("Dependencies").unwrap();
        sheet.write_string(0, 0, "Object").unwrap();
        sheet.write_string(0, 1, "Depends On").unwrap();
        sheet.write_string(1, 0, "Orders").unwrap();
        sheet.write_string(1, 1, "Customers").unwrap();
        sheet.write_string(3, 0, "Invoices").unwrap();
        book.save(&path).unwrap();

        let mut workbook = Workbook::open(&path).unwrap();
        assert!(workbook.has_sheet("Dependencies"));
        assert!(!workbook.has_sheet("Objects"));
        assert_eq!(workbook.records("Objects").unwrap().count(), 0);

        let rows = read_sheet(&path, "Dependencies").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Depends_On"), Some("Customers"));
        assert_eq!(rows[1].get("Object"), Some("Invoices"));
        assert_eq!(rows[1].get("Depends_On"), None);
        assert_eq!(rows[1].row(), 4);
    }

    #[test]
    fn test_open_missing_workbook() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Workbook::open(temp.path().join("absent.xlsx")).err().unwrap();
        assert!(matches!(err, DepDocsError::Workbook { .. }));
    }

    #[test]
    fn test_header_is_always_first_sheet_row() {
        let mut r: Range<Data> = Range::new((1, 0), (2, 1));
        r.set_value((1, 0), Data::String("Object".to_string()));
        r.set_value((1, 1), Data::String("Depends On".to_string()));
        r.set_value((2, 0), Data::String("Orders".to_string()));
        r.set_value((2, 1), Data::String("Customers".to_string()));

        let records = SheetRecords::from_range(r);
        assert_eq!(records.columns(), &["", ""]);
        let rows: Vec<_> = records.collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row(), 2);
        assert_eq!(rows[0].get("Object"), None);
        assert_eq!(rows[1].row(), 3);
        assert_eq!(rows[1].get("Depends_On"), None);
    }

    #[test]
    fn test_blank_first_row_in_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("shifted.xlsx");
        let mut book = rust_xlsxwriter::Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name("Dependencies").unwrap();
        sheet.write_string(1, 0, "Object").unwrap();
        sheet.write_string(1, 1, "Depends On").unwrap();
        sheet.write_string(2, 0, "Orders").unwrap();
        sheet.write_string(2, 1, "Customers").unwrap();
        book.save(&path).unwrap();

        let rows = read_sheet(&path, "Dependencies").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("Object").is_none()));
        assert_eq!(rows[1].row(), 3);
    }

    #[test]
    fn test_missing_sheet_warning_reaches_error_log() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("deps.xlsx");
        let mut book = rust_xlsxwriter::Workbook::new();
        book.add_worksheet().set_name("Dependencies").unwrap();
        book.save(&path).unwrap();

        let config = LoggingConfig {
            dir: temp.path().join("logs"),
            run_name: "run".to_string(),
        };
        let logs = LogContext::new(&config, Verbosity::Quiet);
        tracing::subscriber::with_default(logs.subscriber().unwrap(), || {
            let mut workbook = Workbook::open(&path).unwrap();
            assert_eq!(workbook.records("Objects").unwrap().count(), 0);
        });

        let errors = std::fs::read_to_string(logs.error_log()).unwrap();
        assert!(errors.contains("WARN"));
        assert!(errors.contains("Sheet Objects not found"));
    }

    #[test]
    fn test_header_only_sheet_has_no_records() {
        let records = SheetRecords::from_range(range(&[&["Object", "Depends_On"]]));
        assert_eq!(records.count(), 0);
        assert_eq!(SheetRecords::empty().count(), 0);
    }
}
