//! `ledger-engine` is the calculation core behind the Planning Ledger grid.
//!
//! A [`ledger_model::PlanTree`] snapshot plus one [`Command`] go in; a new
//! snapshot comes out. Each edit resolves three identities without touching
//! anything outside the edited node's timeline and its ancestor chain:
//!
//! - the sales triangle, `amount = units × unit_value`, within one period
//!   ([`solver`])
//! - the inventory carry-forward, `ending[t] = max(0, ending[t-1] +
//!   receipts[t] - sales[t])`, across one node's timeline ([`ripple`])
//! - the hierarchy sum, `parent = Σ children`, for flow metrics up the
//!   ancestor chain ([`rollup`])
//!
//! The engine is total over well-typed input: unknown targets and would-be
//! divisions by zero are silent no-ops, never errors. User-asserted cell
//! locks suppress automatic derivation but not explicit writes.

mod engine;
pub mod ripple;
pub mod rollup;
pub mod solver;

pub use engine::{apply, toggle_lock, update_cell, Command};
