use crate::encode::OutputFormat;
use crate::fields::FieldSet;
use crate::range::RangeSpec;

/// Fields emitted when the caller gives none: value, bold, formula.
pub const DEFAULT_OUT: &str = "vbf";
/// Format used when the caller gives none: JSON.
pub const DEFAULT_FMT: &str = "j";

/// Requested sheets in caller order. Empty means every sheet in workbook
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetSelection {
    names: Vec<String>,
}

impl SheetSelection {
    pub fn all() -> Self {
        Self::default()
    }

    /// Comma-separated names; entries are trimmed, empty entries dropped and
    /// repeats collapse onto their first occurrence.
    pub fn parse(sheets: &str) -> Self {
        Self::from_names(sheets.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        Self { names: out }
    }

    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names to scan, in output order, given the workbook's sheet list.
    /// Unknown names are dropped silently.
    pub fn resolve(&self, available: &[String]) -> Vec<String> {
        if self.is_all() {
            return available.to_vec();
        }
        self.names
            .iter()
            .filter(|name| {
                let known = available.contains(*name);
                if !known {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(sheet = %name, "requested sheet not in workbook; skipping");
                }
                known
            })
            .cloned()
            .collect()
    }
}

/// Everything one extraction call needs besides the workbook itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub fields: FieldSet,
    pub format: OutputFormat,
    pub sheets: SheetSelection,
    pub range: RangeSpec,
    /// Skip blank cells.
    pub sparse: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::from_strings(DEFAULT_OUT, DEFAULT_FMT, "")
    }
}

impl ReadOptions {
    /// Parse the string-typed selectors once. Empty `out`/`fmt` fall back
    /// to [`DEFAULT_OUT`]/[`DEFAULT_FMT`].
    pub fn from_strings(out: &str, fmt: &str, sheets: &str) -> Self {
        let out = if out.is_empty() { DEFAULT_OUT } else { out };
        let fmt = if fmt.is_empty() { DEFAULT_FMT } else { fmt };
        Self {
            fields: FieldSet::parse(out),
            format: OutputFormat::parse(fmt),
            sheets: SheetSelection::parse(sheets),
            range: RangeSpec::default(),
            sparse: true,
        }
    }

    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = range;
        self
    }

    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    pub fn with_sheets(mut self, sheets: SheetSelection) -> Self {
        self.sheets = sheets;
        self
    }
}
