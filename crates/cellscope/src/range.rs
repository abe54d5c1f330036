use cellscope_io::SheetBounds;

/// Caller-requested scan window. `None` on a side means "use the sheet's
/// own bound there".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeSpec {
    pub row_start: Option<u32>,
    pub row_end: Option<u32>,
    pub col_start: Option<u32>,
    pub col_end: Option<u32>,
}

impl RangeSpec {
    /// Build from the external integer form where `0` (or anything
    /// non-positive) means unset.
    pub fn from_sentinels(row_start: i64, row_end: i64, col_start: i64, col_end: i64) -> Self {
        Self {
            row_start: explicit(row_start),
            row_end: explicit(row_end),
            col_start: explicit(col_start),
            col_end: explicit(col_end),
        }
    }

    /// Concrete inclusive bounds for a sheet. Sheets that report no used
    /// range behave as if their used range were `A1`.
    pub fn resolve(&self, natural: Option<SheetBounds>) -> ResolvedRange {
        let natural = natural.unwrap_or(SheetBounds::single(1, 1));
        ResolvedRange {
            r1: self.row_start.unwrap_or(natural.min_row),
            r2: self.row_end.unwrap_or(natural.max_row),
            c1: self.col_start.unwrap_or(natural.min_col),
            c2: self.col_end.unwrap_or(natural.max_col),
        }
    }
}

fn explicit(v: i64) -> Option<u32> {
    if v > 0 {
        Some(u32::try_from(v).unwrap_or(u32::MAX))
    } else {
        None
    }
}

/// Inclusive, 1-based `(r1..=r2, c1..=c2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRange {
    pub r1: u32,
    pub r2: u32,
    pub c1: u32,
    pub c2: u32,
}

impl ResolvedRange {
    /// Inverted on either axis.
    pub fn is_empty(&self) -> bool {
        self.r2 < self.r1 || self.c2 < self.c1
    }

    pub fn cell_count(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        (self.r2 - self.r1 + 1) as u64 * (self.c2 - self.c1 + 1) as u64
    }

    /// Coordinates in row-major order: rows outer, columns inner.
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (c1, c2) = (self.c1, self.c2);
        (self.r1..=self.r2).flat_map(move |r| (c1..=c2).map(move |c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(min_row: u32, max_row: u32, min_col: u32, max_col: u32) -> Option<SheetBounds> {
        Some(SheetBounds {
            min_row,
            max_row,
            min_col,
            max_col,
        })
    }

    #[test]
    fn unset_sides_take_used_range() {
        let spec = RangeSpec::from_sentinels(0, 0, 0, 0);
        assert_eq!(
            spec.resolve(used(2, 5, 1, 3)),
            ResolvedRange {
                r1: 2,
                r2: 5,
                c1: 1,
                c2: 3
            }
        );
    }

    #[test]
    fn explicit_sides_override_independently() {
        let spec = RangeSpec::from_sentinels(3, 0, 0, 7);
        assert_eq!(
            spec.resolve(used(2, 5, 1, 3)),
            ResolvedRange {
                r1: 3,
                r2: 5,
                c1: 1,
                c2: 7
            }
        );
    }

    #[test]
    fn negative_counts_as_unset() {
        assert_eq!(
            RangeSpec::from_sentinels(-1, -20, 0, -3),
            RangeSpec::default()
        );
    }

    #[test]
    fn empty_sheet_defaults_to_a1() {
        let r = RangeSpec::default().resolve(None);
        assert_eq!(r.cell_count(), 1);
        assert_eq!(r.coords().collect::<Vec<_>>(), vec![(1, 1)]);

        // An explicit start past the default end inverts the range
        let r = RangeSpec::from_sentinels(4, 0, 0, 0).resolve(None);
        assert!(r.is_empty());
        assert_eq!(r.cell_count(), 0);
        assert_eq!(r.coords().count(), 0);
    }

    #[test]
    fn coords_are_row_major() {
        let r = ResolvedRange {
            r1: 1,
            r2: 2,
            c1: 3,
            c2: 4,
        };
        assert_eq!(
            r.coords().collect::<Vec<_>>(),
            vec![(1, 3), (1, 4), (2, 3), (2, 4)]
        );
        assert_eq!(r.cell_count(), 4);
    }
}
