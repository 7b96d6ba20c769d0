//! `ledger-model` defines the core in-memory data structures for a
//! Planning Ledger tree: a hierarchy of merchandise nodes, each carrying
//! per-period metric values across several planning scenarios.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the calculation engine (triangle solver, inventory ripple, rollup)
//! - load/persistence adapters feeding trees in from external stores
//! - IPC and WASM boundaries via `serde` (JSON-safe schema)

mod cell;
mod node;
mod ontology;
mod period;
mod record;
mod tree;

pub use cell::{Cell, Metric, Scenario};
pub use node::{Node, NodeId};
pub use ontology::Ontology;
pub use period::{PeriodId, TimeBucket};
pub use record::{PeriodRecord, VersionSet};
pub use tree::{NodeSpec, PlanTree, TreeBuilder, TreeError, TreeKey};
