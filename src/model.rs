use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeatError;

/// One analyzed file, as produced by the collector and served by the store.
/// Metric fields default to zero on deserialization so older store files
/// never yield half-populated records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(default)]
    pub loc: u64,
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub authors: u64,
}

/// A node of the built repository tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Dir(DirNode),
    File(FileNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Dir(d) => &d.name,
            Node::File(f) => &f.name,
        }
    }
}

/// Directory node. Children keep first-seen order and carry unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirNode {
    pub name: String,
    pub children: Vec<Node>,
}

impl DirNode {
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub loc: u64,
    pub changes: u64,
    pub authors: u64,
}

impl FileNode {
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Changes => self.changes,
            Metric::Authors => self.authors,
        }
    }
}

/// Color axis of the heat view. Closed set: parsing is the only way in, so
/// an unmapped metric cannot reach the bucketing code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Changes,
    Authors,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Changes => "changes",
            Metric::Authors => "authors",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "changes" => Ok(Metric::Changes),
            "authors" => Ok(Metric::Authors),
            other => Err(HeatError::UnknownMetric(other.to_string())),
        }
    }
}

/// One rectangle of the heat view. Ephemeral: recomputed from the tree on
/// every render. `loc` drives the rectangle size, `fill` the color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub loc: u64,
    pub metric_value: u64,
    pub fill: &'static str,
    pub has_children: bool,
}

/// What the rendering surface draws: the drill path from the root plus one
/// tile per child of the focused directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub breadcrumb: Vec<String>,
    pub tiles: Vec<Tile>,
}
