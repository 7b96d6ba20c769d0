use ledger_engine::{apply, toggle_lock, update_cell, Command};
use ledger_model::{
    Metric, NodeId, NodeSpec, Ontology, PeriodId, PlanTree, Scenario, TimeBucket, TreeBuilder,
    TreeKey,
};
use pretty_assertions::assert_eq;

const WP: Scenario = Scenario::WorkingPlan;

fn spec(id: &str, level: &str, parent: Option<&str>) -> NodeSpec {
    NodeSpec {
        id: id.into(),
        name: id.to_string(),
        level: level.into(),
        parent: parent.map(Into::into),
    }
}

/// Category → SubCategory → two SKUs over a 12-month 2026 grid.
fn build_tree() -> PlanTree {
    let key = TreeKey {
        aggregate_level: "Category".into(),
        anchor_level: "SKU".into(),
        start_year: 2026,
        horizon_years: 1,
        bucket: TimeBucket::Month,
    };
    TreeBuilder::new(key, Ontology::merchandise())
        .node(spec("tops", "Category", None))
        .node(spec("tees", "SubCategory", Some("tops")))
        .node(spec("sku-1", "SKU", Some("tees")))
        .node(spec("sku-2", "SKU", Some("tees")))
        .build()
        .expect("fixture specs are valid")
}

fn seed(tree: &mut PlanTree, id: &str, period: &str, metric: Metric, value: f64) {
    assert!(
        tree.seed_cell(&id.into(), &period.into(), WP, metric, value),
        "seed target {id}/{period} must exist"
    );
}

fn val(tree: &PlanTree, id: &str, period: &str, metric: Metric) -> f64 {
    tree.node(&id.into())
        .and_then(|n| n.record(&period.into()))
        .map(|r| r.value(metric, WP))
        .unwrap_or(f64::NAN)
}

/// Scenario A: amount edit with nothing locked holds price and moves units.
#[test]
fn amount_edit_holds_price() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::UnitValue, 10.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesAmount, 1000.0);

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesAmount,
        1200.0,
    );

    assert_eq!(val(&next, "sku-1", "2026-01", Metric::SalesUnits), 120.0);
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::UnitValue), 10.0);
}

/// Scenario B: with units locked, the same edit moves price instead.
#[test]
fn amount_edit_with_locked_units_moves_price() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::UnitValue, 10.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesAmount, 1000.0);

    let locked = toggle_lock(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
    );
    let next = update_cell(
        &locked,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesAmount,
        1200.0,
    );

    assert_eq!(val(&next, "sku-1", "2026-01", Metric::SalesUnits), 100.0);
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::UnitValue), 12.0);
}

/// Scenario C (carry-forward): a receipts edit ripples the chain. The first
/// period's stored ending is the anchor the opening balance is recovered
/// from, so the edit re-infers the opening rather than move that anchor;
/// downstream receipts edits shift every later balance.
#[test]
fn receipts_edit_ripples_the_timeline() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 20.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::EndingInventory, 50.0);

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::Receipts,
        30.0,
    );
    // Opening recovered as 50 + 20 - 30 = 40; Jan ending re-derives to the
    // anchor and every later period carries it forward.
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::EndingInventory), 50.0);
    assert_eq!(val(&next, "sku-1", "2026-02", Metric::EndingInventory), 50.0);
    assert_eq!(val(&next, "sku-1", "2026-12", Metric::EndingInventory), 50.0);

    let next = update_cell(
        &next,
        &"sku-1".into(),
        &"2026-02".into(),
        WP,
        Metric::Receipts,
        25.0,
    );
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::EndingInventory), 50.0);
    assert_eq!(val(&next, "sku-1", "2026-02", Metric::EndingInventory), 75.0);
    assert_eq!(val(&next, "sku-1", "2026-03", Metric::EndingInventory), 75.0);
}

/// Scenario D: a child edit re-sums the parent chain and re-prices it.
#[test]
fn child_edit_rolls_up_and_reprices_ancestors() {
    let mut tree = build_tree();
    for (id, units, amount) in [("sku-1", 40.0, 400.0), ("sku-2", 60.0, 900.0)] {
        seed(&mut tree, id, "2026-01", Metric::SalesUnits, units);
        seed(&mut tree, id, "2026-01", Metric::SalesAmount, amount);
        seed(&mut tree, id, "2026-01", Metric::UnitValue, amount / units);
    }
    // Load-consistent parents.
    for id in ["tees", "tops"] {
        seed(&mut tree, id, "2026-01", Metric::SalesUnits, 100.0);
        seed(&mut tree, id, "2026-01", Metric::SalesAmount, 1300.0);
        seed(&mut tree, id, "2026-01", Metric::UnitValue, 13.0);
    }

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
        70.0,
    );

    // sku-1 amount follows its price of 10: 70 × 10 = 700.
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::SalesAmount), 700.0);
    for id in ["tees", "tops"] {
        assert_eq!(val(&next, id, "2026-01", Metric::SalesUnits), 130.0);
        assert_eq!(val(&next, id, "2026-01", Metric::SalesAmount), 1600.0);
        assert_eq!(val(&next, id, "2026-01", Metric::UnitValue), 1600.0 / 130.0);
    }
}

/// Scenario E: selling more than is available clamps the balance at zero
/// and nothing negative or non-finite flows downstream.
#[test]
fn oversell_clamps_ending_inventory_at_zero() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::EndingInventory, 100.0);
    seed(&mut tree, "sku-1", "2026-02", Metric::Receipts, 10.0);

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &"2026-02".into(),
        WP,
        Metric::SalesUnits,
        500.0,
    );

    assert_eq!(val(&next, "sku-1", "2026-02", Metric::EndingInventory), 0.0);
    for month in ["2026-03", "2026-04", "2026-12"] {
        let ending = val(&next, "sku-1", month, Metric::EndingInventory);
        assert!(ending.is_finite() && ending >= 0.0);
        assert_eq!(ending, 0.0);
    }
}

#[test]
fn toggle_lock_twice_restores_the_snapshot() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);

    let cmd = Command::ToggleLock {
        node: "sku-1".into(),
        period: "2026-01".into(),
        scenario: WP,
        metric: Metric::SalesUnits,
    };
    let once = apply(&tree, &cmd);
    assert!(
        once.node(&"sku-1".into())
            .unwrap()
            .record(&"2026-01".into())
            .unwrap()
            .cell(Metric::SalesUnits, WP)
            .locked
    );

    let twice = apply(&once, &cmd);
    assert_eq!(twice, tree);
}

#[test]
fn unknown_targets_are_silent_no_ops() {
    let tree = build_tree();

    let next = update_cell(
        &tree,
        &NodeId::from("ghost"),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
        5.0,
    );
    assert_eq!(next, tree);

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &PeriodId::from("1999-01"),
        WP,
        Metric::SalesUnits,
        5.0,
    );
    assert_eq!(next, tree);

    let next = toggle_lock(&tree, &"ghost".into(), &"2026-01".into(), WP, Metric::Receipts);
    assert_eq!(next, tree);
}

#[test]
fn non_finite_writes_are_dropped() {
    let tree = build_tree();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let next = update_cell(
            &tree,
            &"sku-1".into(),
            &"2026-01".into(),
            WP,
            Metric::SalesAmount,
            bad,
        );
        assert_eq!(next, tree);
    }
}

#[test]
fn apply_is_deterministic_and_leaves_the_input_intact() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::UnitValue, 10.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesAmount, 1000.0);

    let cmd = Command::UpdateCell {
        node: "sku-1".into(),
        period: "2026-01".into(),
        scenario: WP,
        metric: Metric::SalesAmount,
        value: 1200.0,
    };
    let a = apply(&tree, &cmd);
    let b = apply(&tree, &cmd);
    assert_eq!(a, b);

    // The prior snapshot still reads the pre-edit values.
    assert_eq!(val(&tree, "sku-1", "2026-01", Metric::SalesAmount), 1000.0);
    assert_eq!(val(&tree, "sku-1", "2026-01", Metric::SalesUnits), 100.0);
}

#[test]
fn locked_cell_accepts_a_direct_write() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::UnitValue, 10.0);
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesAmount, 1000.0);

    let locked = toggle_lock(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
    );
    // Locking shields against derivation, not against the user.
    let next = update_cell(
        &locked,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
        250.0,
    );
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::SalesUnits), 250.0);
    assert_eq!(val(&next, "sku-1", "2026-01", Metric::SalesAmount), 2500.0);
}

/// Edits on one scenario never leak into another.
#[test]
fn scenarios_are_independent() {
    let mut tree = build_tree();
    seed(&mut tree, "sku-1", "2026-01", Metric::SalesUnits, 100.0);
    tree.seed_cell(
        &"sku-1".into(),
        &"2026-01".into(),
        Scenario::LastYear,
        Metric::SalesUnits,
        80.0,
    );

    let next = update_cell(
        &tree,
        &"sku-1".into(),
        &"2026-01".into(),
        WP,
        Metric::SalesUnits,
        120.0,
    );
    let record = next
        .node(&"sku-1".into())
        .unwrap()
        .record(&"2026-01".into())
        .unwrap();
    assert_eq!(record.value(Metric::SalesUnits, Scenario::LastYear), 80.0);
    assert_eq!(record.value(Metric::SalesUnits, WP), 120.0);
}
