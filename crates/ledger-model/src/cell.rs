use serde::{Deserialize, Serialize};

/// Planning scenario ("version") of a metric value.
///
/// The set is closed: every [`crate::VersionSet`] carries exactly one cell
/// per scenario, so scenario lookups can never miss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// The editable plan of record for the current session.
    WorkingPlan,
    /// The frozen plan the working plan is measured against.
    OriginalPlan,
    /// Comparable values from the prior year.
    LastYear,
    /// Posted actuals.
    Actual,
}

impl Scenario {
    /// All scenarios, in storage order.
    pub const ALL: [Scenario; 4] = [
        Scenario::WorkingPlan,
        Scenario::OriginalPlan,
        Scenario::LastYear,
        Scenario::Actual,
    ];

    /// Number of scenarios (array dimension for [`crate::VersionSet`]).
    pub const COUNT: usize = Self::ALL.len();
}

/// Per-period planning metric.
///
/// Two roles: *flow* metrics are summable across children in the hierarchy;
/// the remaining metrics are derived (average unit retail from the triangle
/// identity, ending inventory from the carry-forward walk).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Units sold in the period.
    SalesUnits,
    /// Retail sales value in the period (`sales_units × unit_value`).
    SalesAmount,
    /// Average unit retail (AUR) implied by the sales triangle.
    UnitValue,
    /// Units received into stock during the period.
    Receipts,
    /// End-of-period inventory balance (units).
    EndingInventory,
}

impl Metric {
    /// All metrics, in storage order.
    pub const ALL: [Metric; 5] = [
        Metric::SalesUnits,
        Metric::SalesAmount,
        Metric::UnitValue,
        Metric::Receipts,
        Metric::EndingInventory,
    ];

    /// Number of metrics (array dimension for [`crate::PeriodRecord`]).
    pub const COUNT: usize = Self::ALL.len();

    /// Flow metrics: the subset a parent node carries as the sum of its
    /// direct children.
    pub const FLOW: [Metric; 3] = [Metric::SalesUnits, Metric::SalesAmount, Metric::Receipts];

    /// Returns true if this metric is summable across children.
    #[must_use]
    pub fn is_flow(self) -> bool {
        matches!(
            self,
            Metric::SalesUnits | Metric::SalesAmount | Metric::Receipts
        )
    }

    /// Returns true if a change to this metric moves the inventory balance
    /// and therefore requires a carry-forward ripple over the timeline.
    #[must_use]
    pub fn is_ripple_trigger(self) -> bool {
        matches!(self, Metric::SalesUnits | Metric::Receipts)
    }
}

/// Atomic value holder: one number for one (node, period, metric, scenario).
///
/// `locked` pins the value against *automatic* overwrite (solver and rollup
/// derivations); a direct user write still goes through. `derived` marks
/// values the engine computed rather than a user or the load supplied.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The stored value. Always finite; the engine drops non-finite writes
    /// at the command boundary.
    pub value: f64,
    /// When set, automatic derivations leave this cell untouched.
    pub locked: bool,
    /// When set, the value was produced by the engine, not entered.
    pub derived: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: 0.0,
            locked: false,
            derived: false,
        }
    }
}

impl Cell {
    /// Create an unlocked, non-derived cell holding `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Direct (user/load) write. Ignores the lock: locking only suppresses
    /// automatic derivation, not explicit edits.
    pub fn set_manual(&mut self, value: f64) {
        self.value = value;
        self.derived = false;
    }

    /// Automatic (solver/rollup) write. Returns false when the lock held
    /// the write off.
    pub fn set_auto(&mut self, value: f64) -> bool {
        if self.locked {
            return false;
        }
        self.value = value;
        self.derived = true;
        true
    }
}
