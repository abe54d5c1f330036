use std::fmt;
use std::path::Path;

/// Stored (non-formula) value of a cell as reported by a backend.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Int(i64),
    Boolean(bool),
    /// Error code as Excel shows it (`#DIV/0!`, `#N/A`, ...)
    Error(String),
    /// Date/time already rendered to text by the backend
    DateTime(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Boolean(true) => f.write_str("True"),
            CellValue::Boolean(false) => f.write_str("False"),
            CellValue::Error(e) => f.write_str(e),
            CellValue::DateTime(dt) => f.write_str(dt),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontStyle {
    pub bold: bool,
    pub name: String,
    pub size: Option<f64>,
    /// ARGB hex when the font carries a color element
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillStyle {
    /// ARGB hex of the pattern foreground color, if any
    pub fg_color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellStyle {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellData {
    pub value: Option<CellValue>,
    /// Formula text, always normalized to start with `=`
    pub formula: Option<String>,
    pub style: Option<CellStyle>,
}

impl CellData {
    pub fn from_value<V: IntoCellValue>(value: V) -> Self {
        Self {
            value: Some(value.into_cell_value()),
            formula: None,
            style: None,
        }
    }

    pub fn from_formula(formula: impl Into<String>) -> Self {
        Self {
            value: None,
            formula: Some(normalize_formula(formula.into())),
            style: None,
        }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Prefix `=` onto formula text when the backend stores it bare.
pub fn normalize_formula(formula: String) -> String {
    if formula.starts_with('=') {
        formula
    } else {
        format!("={formula}")
    }
}

/// Local conversion trait so tests and callers can pass primitives directly
pub trait IntoCellValue {
    fn into_cell_value(self) -> CellValue;
}

impl IntoCellValue for CellValue {
    fn into_cell_value(self) -> CellValue {
        self
    }
}

impl IntoCellValue for f64 {
    fn into_cell_value(self) -> CellValue {
        CellValue::Number(self)
    }
}

impl IntoCellValue for i64 {
    fn into_cell_value(self) -> CellValue {
        CellValue::Int(self)
    }
}

impl IntoCellValue for i32 {
    fn into_cell_value(self) -> CellValue {
        CellValue::Int(self as i64)
    }
}

impl IntoCellValue for bool {
    fn into_cell_value(self) -> CellValue {
        CellValue::Boolean(self)
    }
}

impl IntoCellValue for String {
    fn into_cell_value(self) -> CellValue {
        CellValue::Text(self)
    }
}

impl IntoCellValue for &str {
    fn into_cell_value(self) -> CellValue {
        CellValue::Text(self.to_string())
    }
}

/// Used range of a sheet, 1-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetBounds {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl SheetBounds {
    pub fn single(row: u32, col: u32) -> Self {
        Self {
            min_row: row,
            max_row: row,
            min_col: col,
            max_col: col,
        }
    }

    /// Grow the bounds to cover `(row, col)`.
    pub fn include(&mut self, row: u32, col: u32) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }

    /// Fold an iterator of coordinates into bounds; `None` when empty.
    pub fn from_coords(coords: impl IntoIterator<Item = (u32, u32)>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, (r, c)| match acc {
            None => Some(Self::single(r, c)),
            Some(mut b) => {
                b.include(r, c);
                Some(b)
            }
        })
    }
}

pub trait SpreadsheetReader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short backend name used in error and log context.
    fn backend_name(&self) -> &'static str;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Result<Vec<String>, Self::Error>;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Used range of `sheet`, or `None` when the sheet holds no cells.
    fn sheet_bounds(&mut self, sheet: &str) -> Result<Option<SheetBounds>, Self::Error>;

    /// Raw data at a 1-based coordinate; `None` when the cell does not exist.
    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_fold_covers_all_coords() {
        let b = SheetBounds::from_coords([(3, 2), (5, 1), (2, 4)]).unwrap();
        assert_eq!(
            b,
            SheetBounds {
                min_row: 2,
                max_row: 5,
                min_col: 1,
                max_col: 4
            }
        );
        assert!(SheetBounds::from_coords(std::iter::empty()).is_none());
    }

    #[test]
    fn formula_gets_leading_equals() {
        assert_eq!(CellData::from_formula("A1+1").formula.as_deref(), Some("=A1+1"));
        assert_eq!(CellData::from_formula("=A1").formula.as_deref(), Some("=A1"));
    }

    #[test]
    fn display_matches_sheet_rendering() {
        assert_eq!(CellValue::Number(30.0).to_string(), "30");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Int(-4).to_string(), "-4");
        assert_eq!(CellValue::Boolean(true).to_string(), "True");
        assert_eq!(CellValue::Error("#N/A".into()).to_string(), "#N/A");
    }
}
