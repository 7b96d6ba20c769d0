//! Inter-period inventory carry-forward.
//!
//! Keeps `ending[t] = max(0, beginning[t] + receipts[t] - sales_units[t])`
//! with `beginning[t] = ending[t-1]` across a node's full timeline for one
//! scenario. Only the ending balance is stored; the opening balance of the
//! first period is recovered by solving the identity backward from that
//! period's stored ending, so the first stored balance acts as the anchor
//! of the chain.

use ledger_model::{Metric, Node, Scenario};

/// Rebuild the inventory chain for `scenario` across `node`'s timeline.
///
/// Every ending balance is clamped at zero: negative stock is not
/// representable, by business rule. Locked inventory cells keep their
/// stored value and the running balance continues from them.
pub fn ripple(node: &mut Node, scenario: Scenario) {
    let Some(first) = node.periods.values().next() else {
        return;
    };

    // beginning = ending + sales - receipts, backward from the first
    // period's stored ending balance.
    let mut balance = first.value(Metric::EndingInventory, scenario)
        + first.value(Metric::SalesUnits, scenario)
        - first.value(Metric::Receipts, scenario);

    for record in node.periods.values_mut() {
        let ending = (balance + record.value(Metric::Receipts, scenario)
            - record.value(Metric::SalesUnits, scenario))
        .max(0.0);
        record
            .cell_mut(Metric::EndingInventory, scenario)
            .set_auto(ending);
        // Re-read rather than trust `ending`: a locked cell held its value.
        balance = record.value(Metric::EndingInventory, scenario);
    }
}
