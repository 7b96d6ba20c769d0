use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::{Cell, Metric, Scenario};

/// One metric across all planning scenarios: a fixed scenario→[`Cell`] map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionSet {
    cells: [Cell; Scenario::COUNT],
}

impl Index<Scenario> for VersionSet {
    type Output = Cell;

    fn index(&self, scenario: Scenario) -> &Cell {
        &self.cells[scenario as usize]
    }
}

impl IndexMut<Scenario> for VersionSet {
    fn index_mut(&mut self, scenario: Scenario) -> &mut Cell {
        &mut self.cells[scenario as usize]
    }
}

/// All metric values for one (node, period): a fixed metric→[`VersionSet`]
/// map. Both dimensions are closed enums, so lookups are total and the
/// solver's rule table is exhaustively checked at compile time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    metrics: [VersionSet; Metric::COUNT],
}

impl Index<Metric> for PeriodRecord {
    type Output = VersionSet;

    fn index(&self, metric: Metric) -> &VersionSet {
        &self.metrics[metric as usize]
    }
}

impl IndexMut<Metric> for PeriodRecord {
    fn index_mut(&mut self, metric: Metric) -> &mut VersionSet {
        &mut self.metrics[metric as usize]
    }
}

impl PeriodRecord {
    /// Stored value for `(metric, scenario)`.
    #[must_use]
    pub fn value(&self, metric: Metric, scenario: Scenario) -> f64 {
        self[metric][scenario].value
    }

    /// Borrow the cell for `(metric, scenario)`.
    #[must_use]
    pub fn cell(&self, metric: Metric, scenario: Scenario) -> &Cell {
        &self[metric][scenario]
    }

    /// Mutably borrow the cell for `(metric, scenario)`.
    pub fn cell_mut(&mut self, metric: Metric, scenario: Scenario) -> &mut Cell {
        &mut self[metric][scenario]
    }

    /// Re-derive average unit retail from the stored sales units and amount.
    ///
    /// Used after a rollup pass (summed units/amount imply a new AUR) and by
    /// loaders seeding a tree. Skipped when units are zero or the AUR cell
    /// is locked; AUR keeps full precision.
    pub fn reprice(&mut self, scenario: Scenario) {
        let units = self.value(Metric::SalesUnits, scenario);
        let amount = self.value(Metric::SalesAmount, scenario);
        if units != 0.0 {
            self.cell_mut(Metric::UnitValue, scenario).set_auto(amount / units);
        }
    }
}
