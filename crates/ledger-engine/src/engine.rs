//! Command orchestration.
//!
//! Both operations are pure functions of `(tree, command)`: the input
//! snapshot is never mutated, and identical calls from identical trees
//! yield identical results. Unknown targets return the input unchanged —
//! the grid above this core races against tree reloads, so a stale command
//! is normal traffic, not an error.

use ledger_model::{Metric, NodeId, PeriodId, PlanTree, Scenario};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{ripple, rollup, solver};

/// One edit against a planning tree snapshot. Serde-tagged so commands can
/// cross the IPC boundary as plain JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Write one cell and resolve everything that depends on it.
    UpdateCell {
        node: NodeId,
        period: PeriodId,
        scenario: Scenario,
        metric: Metric,
        value: f64,
    },
    /// Flip one cell's lock flag. No recomputation.
    ToggleLock {
        node: NodeId,
        period: PeriodId,
        scenario: Scenario,
        metric: Metric,
    },
}

/// Apply one command, returning the next snapshot.
pub fn apply(tree: &PlanTree, command: &Command) -> PlanTree {
    match command {
        Command::UpdateCell {
            node,
            period,
            scenario,
            metric,
            value,
        } => update_cell(tree, node, period, *scenario, *metric, *value),
        Command::ToggleLock {
            node,
            period,
            scenario,
            metric,
        } => toggle_lock(tree, node, period, *scenario, *metric),
    }
}

/// Write `value` into one cell, then restore the three identities: triangle
/// within the period, inventory carry-forward across the node's timeline
/// (when a flow that moves stock changed), and flow sums up the ancestor
/// chain.
///
/// The write itself ignores the cell's lock: locking suppresses automatic
/// derivation only, and rejecting explicit edits to locked cells is a UI
/// policy decision above this core. Non-finite values and unknown targets
/// are dropped, returning an unchanged snapshot.
pub fn update_cell(
    tree: &PlanTree,
    node_id: &NodeId,
    period: &PeriodId,
    scenario: Scenario,
    metric: Metric,
    value: f64,
) -> PlanTree {
    if !value.is_finite() {
        return tree.clone();
    }
    if tree
        .node(node_id)
        .and_then(|n| n.record(period))
        .is_none()
    {
        return tree.clone();
    }

    let mut next = tree.clone();
    if let Some(node) = next.node_mut(node_id) {
        let mut stock_moved = metric.is_ripple_trigger();
        if let Some(record) = node.record_mut(period) {
            let sales_before = record.value(Metric::SalesUnits, scenario);
            record.cell_mut(metric, scenario).set_manual(value);
            solver::solve(record, scenario, metric);
            // A derived sales change (e.g. hold-price after an amount edit)
            // moves stock just like a direct one.
            stock_moved |= record.value(Metric::SalesUnits, scenario) != sales_before;
        }
        if stock_moved {
            ripple::ripple(node, scenario);
        }
    }

    let path: SmallVec<[NodeId; 8]> = tree.ancestors(node_id).cloned().collect();
    for parent in &path {
        rollup::roll_up(&mut next, parent, period, scenario);
    }
    next
}

/// Flip one cell's lock flag. Values are untouched and nothing is
/// recomputed; unknown targets return an unchanged snapshot.
pub fn toggle_lock(
    tree: &PlanTree,
    node_id: &NodeId,
    period: &PeriodId,
    scenario: Scenario,
    metric: Metric,
) -> PlanTree {
    let mut next = tree.clone();
    if let Some(record) = next
        .node_mut(node_id)
        .and_then(|n| n.record_mut(period))
    {
        let cell = record.cell_mut(metric, scenario);
        cell.locked = !cell.locked;
    }
    next
}
