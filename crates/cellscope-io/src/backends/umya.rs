#![cfg(feature = "umya")]

use super::package::WorkbookDefaults;
use crate::dates::{is_date_format, render_serial};
use crate::traits::{
    CellData, CellStyle, CellValue, FillStyle, FontStyle, SheetBounds, SpreadsheetReader,
    normalize_formula,
};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{
    reader::xlsx, Cell, CellRawValue, CellValue as UmyaCellValue, Color, Spreadsheet, Style,
};

/// xlsx/xlsm reader with full font and fill information.
pub struct UmyaAdapter {
    workbook: Spreadsheet,
    defaults: WorkbookDefaults,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    path: PathBuf,
}

impl UmyaAdapter {
    fn convert_cell_value(cv: &UmyaCellValue) -> Option<CellValue> {
        let raw = cv.get_raw_value();
        if raw.is_empty() {
            return None;
        }
        if raw.is_error() {
            return Some(CellValue::Error(cv.get_value().to_string()));
        }
        match raw {
            CellRawValue::Numeric(n) => Some(CellValue::Number(*n)),
            CellRawValue::Bool(b) => Some(CellValue::Boolean(*b)),
            CellRawValue::String(s) => Some(CellValue::Text(s.to_string())),
            CellRawValue::RichText(rt) => Some(CellValue::Text(rt.get_text().to_string())),
            CellRawValue::Lazy(s) => {
                let txt: &str = s.as_ref();
                if let Ok(n) = txt.parse::<f64>() {
                    Some(CellValue::Number(n))
                } else if txt.eq_ignore_ascii_case("TRUE") {
                    Some(CellValue::Boolean(true))
                } else if txt.eq_ignore_ascii_case("FALSE") {
                    Some(CellValue::Boolean(false))
                } else {
                    Some(CellValue::Text(txt.to_string()))
                }
            }
            CellRawValue::Error(_) | CellRawValue::Empty => None,
        }
    }

    fn color_argb(color: &Color) -> Option<String> {
        let argb = color.get_argb();
        if argb.is_empty() {
            None
        } else {
            Some(argb.to_string())
        }
    }

    /// Cells saved without a style index carry no font of their own; they
    /// render in the stylesheet's default font.
    fn convert_style(&self, style: &Style) -> CellStyle {
        let font = match style.get_font() {
            Some(f) => Some(FontStyle {
                bold: *f.get_bold(),
                name: f.get_name().to_string(),
                size: Some(*f.get_size()),
                color: Self::color_argb(f.get_color()),
            }),
            None => self.defaults.font.clone(),
        };
        let fill = style.get_fill().map(|fill| FillStyle {
            fg_color: fill
                .get_pattern_fill()
                .and_then(|p| p.get_foreground_color())
                .and_then(Self::color_argb),
        });
        CellStyle { font, fill }
    }

    /// Numbers under a date format become timestamps.
    fn apply_date_format(&self, value: Option<CellValue>, style: &Style) -> Option<CellValue> {
        let Some(CellValue::Number(serial)) = value else {
            return value;
        };
        let code = style
            .get_number_format()
            .map(|nf| nf.get_format_code())
            .filter(|code| is_date_format(code));
        match code.and_then(|code| render_serial(serial, code, self.defaults.date1904)) {
            Some(text) => Some(CellValue::DateTime(text)),
            None => Some(CellValue::Number(serial)),
        }
    }

    fn convert_cell(&self, cell: &Cell) -> CellData {
        let cv = cell.get_cell_value();
        let formula = if cv.is_formula() {
            let f = cv.get_formula();
            if f.is_empty() {
                None
            } else {
                Some(normalize_formula(f.to_string()))
            }
        } else {
            None
        };
        let style = cell.get_style();
        CellData {
            value: self.apply_date_format(Self::convert_cell_value(cv), style),
            formula,
            style: Some(self.convert_style(style)),
        }
    }
}

impl SpreadsheetReader for UmyaAdapter {
    type Error = umya_spreadsheet::XlsxError;

    fn backend_name(&self) -> &'static str {
        "umya"
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        let count = self.workbook.get_sheet_count();
        let mut names = Vec::with_capacity(count);
        for i in 0..count {
            if let Some(s) = self.workbook.get_sheet(&i) {
                names.push(s.get_name().to_string());
            }
        }
        Ok(names)
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        // Full (non-lazy) read so every sheet is deserialized up front
        let workbook = xlsx::read(path)?;
        let defaults = WorkbookDefaults::read(path).unwrap_or_else(|_e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(path = %path.display(), error = %_e, "could not read workbook defaults");
            WorkbookDefaults::default()
        });
        Ok(Self {
            workbook,
            defaults,
            path: path.to_path_buf(),
        })
    }

    fn sheet_bounds(&mut self, sheet: &str) -> Result<Option<SheetBounds>, Self::Error> {
        let ws = self
            .workbook
            .get_sheet_by_name(sheet)
            .ok_or_else(|| umya_spreadsheet::XlsxError::CellError("sheet not found".into()))?;
        Ok(SheetBounds::from_coords(ws.get_cell_collection().into_iter().map(
            |cell| {
                let coord = cell.get_coordinate();
                (*coord.get_row_num(), *coord.get_col_num())
            },
        )))
    }

    fn read_cell(
        &mut self,
        sheet: &str,
        row: u32,
        col: u32,
    ) -> Result<Option<CellData>, Self::Error> {
        let ws = self
            .workbook
            .get_sheet_by_name(sheet)
            .ok_or_else(|| umya_spreadsheet::XlsxError::CellError("sheet not found".into()))?;
        // umya addresses cells as (col, row)
        Ok(ws.get_cell((col, row)).map(|cell| self.convert_cell(cell)))
    }
}

impl Drop for UmyaAdapter {
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %self.path.display(), "closed umya workbook");
    }
}
