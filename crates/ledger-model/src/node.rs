use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PeriodId, PeriodRecord};

/// Identifier of a node within a planning tree. Caller-supplied; opaque to
/// the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One entity in the planning hierarchy.
///
/// `periods` is a sorted map so iterating it walks the timeline in
/// chronological order (period keys sort lexicographically by design).
/// Children are stored as ids into the owning tree's arena, not nested
/// nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Level tag; validated against the tree's ontology at build time.
    pub level: String,
    pub periods: BTreeMap<PeriodId, PeriodRecord>,
    /// Direct children, in load order.
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: level.into(),
            periods: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn record(&self, period: &PeriodId) -> Option<&PeriodRecord> {
        self.periods.get(period)
    }

    pub fn record_mut(&mut self, period: &PeriodId) -> Option<&mut PeriodRecord> {
        self.periods.get_mut(period)
    }
}
