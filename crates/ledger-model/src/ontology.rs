use serde::{Deserialize, Serialize};

/// Ordered hierarchy levels for one planning tree, root-most first
/// (e.g. Category → SubCategory → SKU).
///
/// Every node's level tag must name one of these levels; the tree builder
/// rejects anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    levels: Vec<String>,
}

impl Ontology {
    pub fn new(levels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard merchandise hierarchy.
    #[must_use]
    pub fn merchandise() -> Self {
        Self::new(["Category", "SubCategory", "SKU"])
    }

    /// The standard location hierarchy.
    #[must_use]
    pub fn location() -> Self {
        Self::new(["Region", "District", "Store"])
    }

    /// Level names, root-most first.
    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Depth of `level` in the hierarchy (0 = root-most), if known.
    #[must_use]
    pub fn depth_of(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    #[must_use]
    pub fn contains(&self, level: &str) -> bool {
        self.depth_of(level).is_some()
    }
}
