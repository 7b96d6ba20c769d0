//! Hierarchical rollup.
//!
//! Re-derives a parent's flow metrics as the sum of its direct children for
//! one period/scenario, then re-prices the parent so its average unit
//! retail stays consistent with the freshly summed units and amount.
//! Applied bottom-up along the ancestor chain: each level depends on the
//! level just summed beneath it.
//!
//! `UnitValue` is never summed, and non-leaf `EndingInventory` is left as
//! loaded: summing stock across assortments double-counts open orders, so
//! aggregate inventory is not a quantity this core fabricates.

use ledger_model::{Metric, NodeId, PeriodId, PlanTree, Scenario};

/// Re-sum `parent`'s flow metrics from its direct children for one
/// period/scenario. No-op for leaves and unknown targets; locked parent
/// cells keep their value.
pub fn roll_up(tree: &mut PlanTree, parent: &NodeId, period: &PeriodId, scenario: Scenario) {
    let Some(parent_node) = tree.node(parent) else {
        return;
    };
    if parent_node.is_leaf() {
        return;
    }

    let mut sums = [0.0; Metric::FLOW.len()];
    for child in parent_node.children.clone() {
        let Some(record) = tree.node(&child).and_then(|n| n.record(period)) else {
            continue;
        };
        for (slot, metric) in sums.iter_mut().zip(Metric::FLOW) {
            *slot += record.value(metric, scenario);
        }
    }

    let Some(record) = tree
        .node_mut(parent)
        .and_then(|n| n.record_mut(period)) else {
        return;
    };
    for (sum, metric) in sums.into_iter().zip(Metric::FLOW) {
        record.cell_mut(metric, scenario).set_auto(sum);
    }
    record.reprice(scenario);
}
