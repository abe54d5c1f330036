use cellscope_io::{CellData, CellValue};

/// One extracted cell with every attribute resolved to a concrete value.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedCell {
    pub row: u32,
    pub col: u32,
    pub value: String,
    pub is_formula: bool,
    pub bold: bool,
    pub font_name: String,
    pub font_size: Option<f64>,
    pub font_color: String,
    pub fill_color: String,
}

/// What the workbook holds at a coordinate before rendering: formula text
/// wins over the cached result.
#[derive(Clone, Copy, Debug)]
pub(crate) enum RawValue<'a> {
    Formula(&'a str),
    Stored(&'a CellValue),
}

pub(crate) fn raw_value(data: &CellData) -> Option<RawValue<'_>> {
    match (&data.formula, &data.value) {
        (Some(f), _) => Some(RawValue::Formula(f.as_str())),
        (None, Some(v)) => Some(RawValue::Stored(v)),
        (None, None) => None,
    }
}

impl RawValue<'_> {
    fn is_formula(&self) -> bool {
        match self {
            RawValue::Formula(f) => f.starts_with('='),
            RawValue::Stored(CellValue::Text(s)) => s.starts_with('='),
            RawValue::Stored(_) => false,
        }
    }

    fn render(&self) -> String {
        match self {
            RawValue::Formula(f) => f.to_string(),
            RawValue::Stored(v) => v.to_string(),
        }
    }
}

/// Absent values and whitespace-only text. Zero and `false` are not blank.
pub(crate) fn is_blank(raw: Option<RawValue<'_>>) -> bool {
    match raw {
        None => true,
        Some(RawValue::Formula(f)) => f.trim().is_empty(),
        Some(RawValue::Stored(CellValue::Text(s))) => s.trim().is_empty(),
        Some(RawValue::Stored(_)) => false,
    }
}

fn non_empty(color: Option<&str>) -> String {
    color.filter(|c| !c.is_empty()).unwrap_or_default().to_string()
}

impl NormalizedCell {
    /// Resolve `data` (or a missing cell) at `(row, col)`. Missing fonts,
    /// fills and colors fall back to `false`/empty/absent.
    pub fn from_data(row: u32, col: u32, data: Option<&CellData>) -> Self {
        let raw = data.and_then(raw_value);
        let style = data.and_then(|d| d.style.as_ref());
        let font = style.and_then(|s| s.font.as_ref());
        let fill = style.and_then(|s| s.fill.as_ref());

        Self {
            row,
            col,
            value: raw.map(|r| r.render()).unwrap_or_default(),
            is_formula: raw.is_some_and(|r| r.is_formula()),
            bold: font.is_some_and(|f| f.bold),
            font_name: font.map(|f| f.name.clone()).unwrap_or_default(),
            font_size: font.and_then(|f| f.size),
            font_color: non_empty(font.and_then(|f| f.color.as_deref())),
            fill_color: non_empty(fill.and_then(|f| f.fg_color.as_deref())),
        }
    }
}
