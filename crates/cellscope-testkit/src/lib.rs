//! Fixtures shared by the cellscope test suites.

use cellscope_io::{CellData, IoError, SheetBounds, SpreadsheetReader};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

/// An xlsx file written into its own temp directory. The directory is
/// removed when the fixture is dropped.
pub struct XlsxFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl XlsxFixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is utf-8")
    }
}

/// Start from umya's default workbook (one empty `Sheet1`), let `f` fill it
/// in, and write it to disk.
pub fn build_workbook(f: impl FnOnce(&mut umya_spreadsheet::Spreadsheet)) -> XlsxFixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fixture.xlsx");
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write xlsx");
    XlsxFixture { _dir: dir, path }
}

#[derive(Default)]
struct MemorySheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellData>,
}

/// In-memory [`SpreadsheetReader`] for exercising extraction without files.
#[derive(Default)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
    fail_at: Option<(String, u32, u32)>,
    dropped: Arc<AtomicBool>,
}

pub struct SheetBuilder<'a> {
    sheet: &'a mut MemorySheet,
}

impl SheetBuilder<'_> {
    pub fn cell(&mut self, row: u32, col: u32, data: CellData) -> &mut Self {
        self.sheet.cells.insert((row, col), data);
        self
    }
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet; sheet order is preserved.
    pub fn sheet(mut self, name: &str, f: impl FnOnce(&mut SheetBuilder<'_>)) -> Self {
        self.sheets.push(MemorySheet {
            name: name.to_string(),
            cells: BTreeMap::new(),
        });
        let sheet = self.sheets.last_mut().expect("just pushed");
        f(&mut SheetBuilder { sheet });
        self
    }

    /// Make `read_cell` fail when it reaches this coordinate.
    pub fn fail_at(mut self, sheet: &str, row: u32, col: u32) -> Self {
        self.fail_at = Some((sheet.to_string(), row, col));
        self
    }

    /// Flag that flips to `true` once the workbook is dropped.
    pub fn drop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.dropped)
    }

    fn find(&self, sheet: &str) -> Result<&MemorySheet, IoError> {
        self.sheets
            .iter()
            .find(|s| s.name == sheet)
            .ok_or_else(|| IoError::SheetNotFound(sheet.to_string()))
    }
}

impl SpreadsheetReader for MemoryWorkbook {
    type Error = IoError;

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.sheets.iter().map(|s| s.name.clone()).collect())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Err(IoError::UnsupportedFormat(path.as_ref().to_path_buf()))
    }

    fn sheet_bounds(&mut self, sheet: &str) -> Result<Option<SheetBounds>, Self::Error> {
        Ok(SheetBounds::from_coords(self.find(sheet)?.cells.keys().copied()))
    }

    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error> {
        if let Some((s, r, c)) = &self.fail_at {
            if s == sheet && *r == row && *c == col {
                return Err(IoError::from_backend(
                    "memory",
                    std::io::Error::other(format!("injected failure at {sheet}!R{row}C{col}")),
                ));
            }
        }
        Ok(self.find(sheet)?.cells.get(&(row, col)).cloned())
    }
}

impl Drop for MemoryWorkbook {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}
