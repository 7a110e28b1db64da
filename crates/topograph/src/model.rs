//! Graph data model.
//!
//! Raw types ([`RawNode`], [`RawEdge`], [`Topology`]) arrive from a data
//! provider and deserialize from the CMDB topology payload. Laid-out types
//! ([`PositionedNode`], [`ResolvedEdge`]) are produced by the layout engine
//! and never mutated afterwards.

use std::fmt;

use serde::Deserialize;

use topograph_core::geometry::Point;

use crate::error::TopographError;

/// Identifier of a configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct CiId(i64);

impl CiId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CiId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configuration item as returned by the topology endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawNode {
    id: CiId,
    name: String,
    #[serde(default, rename = "type_name")]
    type_label: Option<String>,
    #[serde(default, rename = "type")]
    type_code: Option<String>,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl RawNode {
    pub fn new(id: impl Into<CiId>, name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_label: Some(type_label.into()),
            type_code: None,
            identifier: None,
            icon: None,
            status: None,
        }
    }

    /// Sets the CI status (builder style).
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn id(&self) -> CiId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable CI type, empty when the CI has no type.
    pub fn type_label(&self) -> &str {
        self.type_label.as_deref().unwrap_or_default()
    }

    /// Machine code of the CI type (e.g. `server`), if any.
    pub fn type_code(&self) -> Option<&str> {
        self.type_code.as_deref()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// A directed, typed relationship between two CIs.
///
/// Either endpoint may name a CI that is missing from the accompanying node
/// list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    id: Option<i64>,
    #[serde(rename = "source")]
    source_id: CiId,
    #[serde(rename = "target")]
    target_id: CiId,
    #[serde(rename = "type")]
    relation_type: String,
}

impl RawEdge {
    pub fn new(
        source_id: impl Into<CiId>,
        target_id: impl Into<CiId>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation_type: relation_type.into(),
        }
    }

    /// Sets the relationship id (builder style).
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Relationship id assigned by the inventory, if any.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn source_id(&self) -> CiId {
        self.source_id
    }

    pub fn target_id(&self) -> CiId {
        self.target_id
    }

    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }

    /// Returns the endpoint opposite to `id`, or `None` if the edge does not touch `id`.
    ///
    /// A self-loop on `id` returns `id`.
    pub fn other_endpoint(&self, id: CiId) -> Option<CiId> {
        if self.source_id == id {
            Some(self.target_id)
        } else if self.target_id == id {
            Some(self.source_id)
        } else {
            None
        }
    }
}

/// Nodes and edges of a topology, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Topology {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

impl Topology {
    pub fn new(nodes: Vec<RawNode>, edges: Vec<RawEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Parses a topology document (`{"nodes": [...], "edges": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Decode`] with the source attached when the
    /// document is not valid JSON or does not match the topology shape.
    pub fn from_json(src: &str) -> Result<Self, TopographError> {
        serde_json::from_str(src).map_err(|err| TopographError::new_decode_error(err, src))
    }

    pub fn nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Ring a node is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// The focal node at the canvas center.
    Focal,
    /// Direct neighbors of the focal node.
    Neighbor,
    /// Every other returned node.
    Outer,
}

impl Level {
    /// Numeric ring index (0, 1 or 2).
    pub fn index(self) -> u8 {
        match self {
            Self::Focal => 0,
            Self::Neighbor => 1,
            Self::Outer => 2,
        }
    }
}

/// A node with its computed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    position: Point,
    level: Level,
    source: RawNode,
}

impl PositionedNode {
    pub(crate) fn new(source: RawNode, position: Point, level: Level) -> Self {
        Self {
            position,
            level,
            source,
        }
    }

    pub fn id(&self) -> CiId {
        self.source.id()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The raw node this position was computed for.
    pub fn source(&self) -> &RawNode {
        &self.source
    }
}

/// An edge whose endpoints were both placed.
///
/// Endpoints are indices into the node list of the layout that produced the
/// edge; see [`GraphLayout::endpoints`](crate::layout::GraphLayout::endpoints).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEdge {
    source_index: usize,
    target_index: usize,
    relation_type: String,
}

impl ResolvedEdge {
    pub(crate) fn new(source_index: usize, target_index: usize, relation_type: String) -> Self {
        Self {
            source_index,
            target_index,
            relation_type,
        }
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }
}
