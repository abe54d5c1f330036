use crate::error::IoError;
use crate::traits::{CellData, SheetBounds, SpreadsheetReader};
use std::path::Path;

#[cfg(feature = "calamine")]
use crate::backends::CalamineAdapter;
#[cfg(feature = "umya")]
use crate::backends::UmyaAdapter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// OOXML spreadsheets with styles (xlsx, xlsm, xltx, xltm)
    Umya,
    /// xls, xlsb, ods: values and formulas only
    Calamine,
}

impl BackendKind {
    /// Pick a backend from the file extension (case-insensitive).
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xltx" | "xltm" => Some(BackendKind::Umya),
            "xls" | "xla" | "xlsb" | "ods" => Some(BackendKind::Calamine),
            _ => None,
        }
    }
}

/// Workbook opened through whichever backend suits its format.
pub enum AnyWorkbook {
    #[cfg(feature = "umya")]
    Umya(UmyaAdapter),
    #[cfg(feature = "calamine")]
    Calamine(CalamineAdapter),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            #[cfg(feature = "umya")]
            AnyWorkbook::Umya($inner) => $body.map_err(|e| IoError::from_backend("umya", e)),
            #[cfg(feature = "calamine")]
            AnyWorkbook::Calamine($inner) => {
                $body.map_err(|e| IoError::from_backend("calamine", e))
            }
        }
    };
}

impl SpreadsheetReader for AnyWorkbook {
    type Error = IoError;

    fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "umya")]
            AnyWorkbook::Umya(b) => b.backend_name(),
            #[cfg(feature = "calamine")]
            AnyWorkbook::Calamine(b) => b.backend_name(),
        }
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        dispatch!(self, b => b.sheet_names())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let book = match BackendKind::for_path(path) {
            #[cfg(feature = "umya")]
            Some(BackendKind::Umya) => AnyWorkbook::Umya(
                UmyaAdapter::open_path(path).map_err(|e| IoError::from_backend("umya", e))?,
            ),
            #[cfg(feature = "calamine")]
            Some(BackendKind::Calamine) => AnyWorkbook::Calamine(
                CalamineAdapter::open_path(path)
                    .map_err(|e| IoError::from_backend("calamine", e))?,
            ),
            #[allow(unreachable_patterns)]
            _ => return Err(IoError::UnsupportedFormat(path.to_path_buf())),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), backend = book.backend_name(), "opened workbook");
        Ok(book)
    }

    fn sheet_bounds(&mut self, sheet: &str) -> Result<Option<SheetBounds>, Self::Error> {
        dispatch!(self, b => b.sheet_bounds(sheet))
    }

    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error> {
        dispatch!(self, b => b.read_cell(sheet, row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_extension() {
        assert_eq!(
            BackendKind::for_path(Path::new("book.XLSX")),
            Some(BackendKind::Umya)
        );
        assert_eq!(
            BackendKind::for_path(Path::new("macro.xlsm")),
            Some(BackendKind::Umya)
        );
        assert_eq!(
            BackendKind::for_path(Path::new("legacy.xls")),
            Some(BackendKind::Calamine)
        );
        assert_eq!(
            BackendKind::for_path(Path::new("calc.ods")),
            Some(BackendKind::Calamine)
        );
        assert_eq!(BackendKind::for_path(Path::new("notes.txt")), None);
        assert_eq!(BackendKind::for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        match AnyWorkbook::open_path(&path) {
            Err(IoError::UnsupportedFormat(p)) => assert_eq!(p, path),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("csv should not open"),
        }
    }

    #[test]
    fn corrupt_xlsx_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();
        assert!(matches!(
            AnyWorkbook::open_path(&path),
            Err(IoError::Backend { backend: "umya", .. })
        ));
    }
}
