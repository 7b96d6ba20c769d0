use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Metric, Node, NodeId, Ontology, PeriodId, PeriodRecord, Scenario, TimeBucket};

/// Session parameterization of one planning tree: which hierarchy slice is
/// shown and which time grid it carries. A config change discards the tree
/// and loads a fresh one; edits do not survive the swap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeKey {
    /// Root-most level present in the tree.
    pub aggregate_level: String,
    /// Level at which direct user edits are intended.
    pub anchor_level: String,
    pub start_year: i32,
    pub horizon_years: u8,
    pub bucket: TimeBucket,
}

impl TreeKey {
    /// The full chronological period grid this key describes.
    #[must_use]
    pub fn periods(&self) -> Vec<PeriodId> {
        self.bucket.grid(self.start_year, self.horizon_years)
    }
}

/// Errors raised while building a planning tree from flat node specs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node `{node}` carries level `{level}` which is not in the ontology")]
    UnknownLevel { node: NodeId, level: String },
    #[error("duplicate node id `{0}`")]
    DuplicateNode(NodeId),
    #[error("node `{node}` names unknown parent `{parent}`")]
    UnknownParent { node: NodeId, parent: NodeId },
    #[error("tree key names level `{0}` which is not in the ontology")]
    UnknownKeyLevel(String),
    #[error("node `{0}` never reaches a root; its parent chain is cyclic")]
    CyclicParent(NodeId),
}

/// Flat description of one node, as delivered by a loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub parent: Option<NodeId>,
}

/// A planning tree snapshot: an arena of nodes plus the indexes the engine
/// needs for O(1) lookup and O(depth) ancestor walks.
///
/// Snapshots are cheap to clone: nodes are `Arc`-shared, and mutation goes
/// through [`Arc::make_mut`], so only the nodes actually touched by an edit
/// are copied while the rest of the tree stays shared between snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanTree {
    pub key: TreeKey,
    pub ontology: Ontology,
    nodes: AHashMap<NodeId, Arc<Node>>,
    roots: Vec<NodeId>,
    parents: AHashMap<NodeId, NodeId>,
}

impl PlanTree {
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(Arc::as_ref)
    }

    /// Mutable access to a node, copying it out of any shared snapshot
    /// first (copy-on-write).
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).map(Arc::make_mut)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root nodes, in load order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn parent(&self, id: &NodeId) -> Option<&NodeId> {
        self.parents.get(id)
    }

    /// Ancestors of `id`, nearest first, ending at a root.
    pub fn ancestors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> {
        std::iter::successors(self.parents.get(id), |cur| self.parents.get(*cur))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids, in arbitrary order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Direct (load-time) write of one cell. Returns false when the target
    /// does not exist. Loads are trusted to deliver consistent sums; the
    /// tree does not re-validate them here.
    pub fn seed_cell(
        &mut self,
        id: &NodeId,
        period: &PeriodId,
        scenario: Scenario,
        metric: Metric,
        value: f64,
    ) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let Some(record) = node.record_mut(period) else {
            return false;
        };
        record.cell_mut(metric, scenario).set_manual(value);
        true
    }
}

/// Validated construction of a [`PlanTree`] from flat node specs.
///
/// Specs may arrive in any order; parents are wired in a second pass.
/// Rejected: unknown levels (on nodes and on the tree key), duplicate ids,
/// unknown parents, and parent cycles.
/// Every node receives the full period grid of the tree key, each record
/// zero-filled (the load seeds real values afterwards).
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    key: TreeKey,
    ontology: Ontology,
    specs: Vec<NodeSpec>,
}

impl TreeBuilder {
    pub fn new(key: TreeKey, ontology: Ontology) -> Self {
        Self {
            key,
            ontology,
            specs: Vec::new(),
        }
    }

    pub fn node(mut self, spec: NodeSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn build(self) -> Result<PlanTree, TreeError> {
        for level in [&self.key.aggregate_level, &self.key.anchor_level] {
            if !self.ontology.contains(level) {
                return Err(TreeError::UnknownKeyLevel(level.clone()));
            }
        }

        let grid = self.key.periods();
        let mut nodes: AHashMap<NodeId, Arc<Node>> = AHashMap::with_capacity(self.specs.len());
        let mut roots = Vec::new();
        let mut parents = AHashMap::new();

        for spec in &self.specs {
            if !self.ontology.contains(&spec.level) {
                return Err(TreeError::UnknownLevel {
                    node: spec.id.clone(),
                    level: spec.level.clone(),
                });
            }
            let mut node = Node::new(spec.id.clone(), spec.name.clone(), spec.level.clone());
            node.periods = grid
                .iter()
                .map(|p| (p.clone(), PeriodRecord::default()))
                .collect();
            if nodes.insert(spec.id.clone(), Arc::new(node)).is_some() {
                return Err(TreeError::DuplicateNode(spec.id.clone()));
            }
        }

        for spec in &self.specs {
            match &spec.parent {
                None => roots.push(spec.id.clone()),
                Some(parent) => {
                    let Some(parent_node) = nodes.get_mut(parent) else {
                        return Err(TreeError::UnknownParent {
                            node: spec.id.clone(),
                            parent: parent.clone(),
                        });
                    };
                    Arc::make_mut(parent_node).children.push(spec.id.clone());
                    parents.insert(spec.id.clone(), parent.clone());
                }
            }
        }

        // Every node must reach a root downward from `roots`; a parent
        // cycle strands its members and would turn the engine's ancestor
        // walk into an unbounded loop.
        let mut seen: AHashSet<&NodeId> = AHashSet::with_capacity(nodes.len());
        let mut stack: Vec<&NodeId> = roots.iter().collect();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = nodes.get(id) {
                stack.extend(node.children.iter());
            }
        }
        if seen.len() != nodes.len() {
            if let Some(stranded) = self.specs.iter().find(|s| !seen.contains(&s.id)) {
                return Err(TreeError::CyclicParent(stranded.id.clone()));
            }
        }

        Ok(PlanTree {
            key: self.key,
            ontology: self.ontology,
            nodes,
            roots,
            parents,
        })
    }
}
