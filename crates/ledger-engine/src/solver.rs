//! Intra-period triangle solver.
//!
//! Keeps `sales_amount = sales_units × unit_value` true after exactly one
//! corner of the triangle changed, for one period record and scenario.
//! Rules are first-applicable-wins; a locked corner redirects the
//! derivation onto the remaining corner, and a zero divisor skips the
//! derivation entirely, leaving the dependent cell unchanged.

use ledger_model::{Metric, PeriodRecord, Scenario};

/// Resolve the triangle after `changed` was written for `scenario`.
///
/// Side effects are confined to the two non-changed triangle metrics of the
/// same record/scenario; `Receipts` and `EndingInventory` changes have no
/// triangle effect and fall through untouched.
pub fn solve(record: &mut PeriodRecord, scenario: Scenario, changed: Metric) {
    let units = record.value(Metric::SalesUnits, scenario);
    let amount = record.value(Metric::SalesAmount, scenario);
    let unit_value = record.value(Metric::UnitValue, scenario);
    let units_locked = record.cell(Metric::SalesUnits, scenario).locked;
    let amount_locked = record.cell(Metric::SalesAmount, scenario).locked;
    let aur_locked = record.cell(Metric::UnitValue, scenario).locked;

    match changed {
        Metric::SalesAmount => {
            if aur_locked && unit_value != 0.0 {
                record
                    .cell_mut(Metric::SalesUnits, scenario)
                    .set_auto((amount / unit_value).round());
            } else if units_locked && units != 0.0 {
                record
                    .cell_mut(Metric::UnitValue, scenario)
                    .set_auto(amount / units);
            } else if unit_value != 0.0 {
                // Default: hold price, move units.
                record
                    .cell_mut(Metric::SalesUnits, scenario)
                    .set_auto((amount / unit_value).round());
            } else if units != 0.0 {
                record
                    .cell_mut(Metric::UnitValue, scenario)
                    .set_auto(amount / units);
            }
        }
        Metric::SalesUnits => {
            if amount_locked {
                if units != 0.0 {
                    record
                        .cell_mut(Metric::UnitValue, scenario)
                        .set_auto(amount / units);
                }
            } else {
                record
                    .cell_mut(Metric::SalesAmount, scenario)
                    .set_auto((units * unit_value).round());
            }
        }
        Metric::UnitValue => {
            if amount_locked {
                if unit_value != 0.0 {
                    record
                        .cell_mut(Metric::SalesUnits, scenario)
                        .set_auto((amount / unit_value).round());
                }
            } else {
                record
                    .cell_mut(Metric::SalesAmount, scenario)
                    .set_auto((units * unit_value).round());
            }
        }
        Metric::Receipts | Metric::EndingInventory => {}
    }
}
