use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying one planning period within a tree's time grid.
///
/// Keys are compact strings (`"2026-01"`, `"2026-W05"`, `"2026-Q1"`) whose
/// lexicographic order equals chronological order within a single grid, so
/// a `BTreeMap<PeriodId, _>` iterates the timeline in sequence for free.
/// Grids never mix buckets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(String);

impl PeriodId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeriodId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Granularity of the planning time grid.
///
/// Weeks follow the retail 52-week calendar (4-5-4), not ISO weeks: every
/// planning year carries exactly 52 week slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Month,
    Week,
    Quarter,
}

impl TimeBucket {
    /// Number of periods in one planning year.
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            TimeBucket::Month => 12,
            TimeBucket::Week => 52,
            TimeBucket::Quarter => 4,
        }
    }

    /// Key for the `ordinal`-th period (1-based) of `year`.
    ///
    /// Ordinals are zero-padded so the keys sort chronologically.
    #[must_use]
    pub fn period_id(self, year: i32, ordinal: u32) -> PeriodId {
        debug_assert!(ordinal >= 1 && ordinal <= self.periods_per_year());
        match self {
            TimeBucket::Month => PeriodId::new(format!("{year}-{ordinal:02}")),
            TimeBucket::Week => PeriodId::new(format!("{year}-W{ordinal:02}")),
            TimeBucket::Quarter => PeriodId::new(format!("{year}-Q{ordinal}")),
        }
    }

    /// The full chronological grid for `horizon_years` starting at
    /// `start_year`.
    #[must_use]
    pub fn grid(self, start_year: i32, horizon_years: u8) -> Vec<PeriodId> {
        let per_year = self.periods_per_year();
        let mut periods = Vec::with_capacity(per_year as usize * horizon_years as usize);
        for offset in 0..horizon_years {
            let year = start_year + i32::from(offset);
            for ordinal in 1..=per_year {
                periods.push(self.period_id(year, ordinal));
            }
        }
        periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_chronologically_sorted() {
        for bucket in [TimeBucket::Month, TimeBucket::Week, TimeBucket::Quarter] {
            let grid = bucket.grid(2025, 2);
            assert_eq!(grid.len(), bucket.periods_per_year() as usize * 2);
            let mut sorted = grid.clone();
            sorted.sort();
            assert_eq!(grid, sorted, "{bucket:?} grid must sort chronologically");
        }
    }

    #[test]
    fn week_keys_zero_pad() {
        assert_eq!(TimeBucket::Week.period_id(2026, 5).as_str(), "2026-W05");
        assert!(TimeBucket::Week.period_id(2026, 9) < TimeBucket::Week.period_id(2026, 10));
    }

    #[test]
    fn period_id_serde_is_transparent() {
        let id = PeriodId::new("2026-03");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"2026-03\"");
        let back: PeriodId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
