//! Concentric ring layout.
//!
//! The focal CI sits at the canvas center, its direct neighbors on an inner
//! ring and every other returned CI on an outer ring. The layout is a pure
//! function of its inputs: node order and edge order fully determine the
//! result, ids never do.

use std::f32::consts::{PI, TAU};

use log::{debug, trace, warn};

use topograph_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    model::{CiId, Level, PositionedNode, RawEdge, RawNode, ResolvedEdge, Topology},
    ordered::OrderedIdSet,
};

/// How the focal node of a layout was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocalResolution {
    /// The requested focal CI was present and is at the center.
    Requested,
    /// No focal CI was requested; the first node is at the center.
    Unspecified,
    /// The requested CI was not in the node set; the first node is at the
    /// center instead.
    Missing { requested: CiId },
}

/// Result of a layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    nodes: Vec<PositionedNode>,
    edges: Vec<ResolvedEdge>,
    resolution: FocalResolution,
}

impl GraphLayout {
    fn empty(resolution: FocalResolution) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            resolution,
        }
    }

    /// Positioned nodes: focal first, then the inner ring, then the outer ring.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ResolvedEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at the center, if any node was placed.
    pub fn focal(&self) -> Option<&PositionedNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: CiId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Nodes placed on the given ring, in placement order.
    pub fn nodes_at(&self, level: Level) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.iter().filter(move |node| node.level() == level)
    }

    /// Resolves an edge of this layout to its endpoint nodes.
    ///
    /// Returns `None` when an index falls outside this layout, which only
    /// happens for an edge taken from a different layout.
    pub fn endpoints(&self, edge: &ResolvedEdge) -> Option<(&PositionedNode, &PositionedNode)> {
        let source = self.nodes.get(edge.source_index())?;
        let target = self.nodes.get(edge.target_index())?;
        Some((source, target))
    }

    pub fn resolution(&self) -> FocalResolution {
        self.resolution
    }

    /// True when a focal CI was requested but could not be centered.
    pub fn is_degraded(&self) -> bool {
        matches!(self.resolution, FocalResolution::Missing { .. })
    }
}

/// Ring layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    center: Point,
    inner_radius: f32,
    outer_radius: f32,
}

impl RingLayout {
    /// Creates an engine placing rings around `center`.
    pub fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
        }
    }

    /// Creates an engine centered on the configured canvas.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(
            config.canvas_size().center(),
            config.inner_radius(),
            config.outer_radius(),
        )
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// Lays out a provider topology.
    pub fn layout_topology(&self, topology: &Topology, focal_id: Option<CiId>) -> GraphLayout {
        self.layout(topology.nodes(), topology.edges(), focal_id)
    }

    /// Places `nodes` on concentric rings around the focal node and resolves
    /// `edges` against the placed nodes.
    ///
    /// Empty input, an absent focal id, duplicate node ids and edges to
    /// unknown ids are all handled without error:
    ///
    /// - the first node is used when `focal_id` is `None` or absent,
    /// - the first occurrence of a duplicated id wins,
    /// - edges with an unplaced endpoint are dropped.
    pub fn layout(
        &self,
        nodes: &[RawNode],
        edges: &[RawEdge],
        focal_id: Option<CiId>,
    ) -> GraphLayout {
        let mut known = OrderedIdSet::new();
        let distinct: Vec<&RawNode> = nodes
            .iter()
            .filter(|node| known.insert(node.id()))
            .collect();

        let resolution = match focal_id {
            Some(id) if known.contains(id) => FocalResolution::Requested,
            Some(requested) => FocalResolution::Missing { requested },
            None => FocalResolution::Unspecified,
        };

        let Some(first) = distinct.first() else {
            debug!("No nodes to lay out");
            return GraphLayout::empty(resolution);
        };

        let focal = match resolution {
            FocalResolution::Requested => focal_id.unwrap_or(first.id()),
            FocalResolution::Unspecified => first.id(),
            FocalResolution::Missing { requested } => {
                warn!(
                    requested = requested.get(),
                    fallback = first.id().get();
                    "Requested focal CI not in topology, centering on first node"
                );
                first.id()
            }
        };

        let mut placement = Placement::with_capacity(distinct.len());
        placement.place(&distinct[known.index_of(focal).unwrap_or(0)], self.center, Level::Focal);

        let mut neighbors = OrderedIdSet::new();
        for edge in edges {
            if let Some(other) = edge.other_endpoint(focal)
                && !placement.contains(other)
                && known.contains(other)
            {
                neighbors.insert(other);
            }
        }

        let inner_count = neighbors.len();
        for (i, id) in neighbors.iter().enumerate() {
            let angle = ring_angle(i, inner_count, 0.0);
            let position = Point::from_polar(self.center, self.inner_radius, angle);
            if let Some(index) = known.index_of(id) {
                placement.place(distinct[index], position, Level::Neighbor);
            }
        }

        let outer: Vec<&RawNode> = distinct
            .iter()
            .copied()
            .filter(|node| !placement.contains(node.id()))
            .collect();
        let outer_count = outer.len();
        let half_step = if outer_count > 0 {
            PI / outer_count as f32
        } else {
            0.0
        };
        for (j, node) in outer.into_iter().enumerate() {
            let angle = ring_angle(j, outer_count, half_step);
            let position = Point::from_polar(self.center, self.outer_radius, angle);
            placement.place(node, position, Level::Outer);
        }

        let resolved = placement.resolve_edges(edges);

        debug!(
            focal = focal.get(),
            inner = inner_count,
            outer = outer_count,
            edges = resolved.len(),
            dropped_edges = edges.len() - resolved.len();
            "Ring layout computed"
        );

        GraphLayout {
            nodes: placement.nodes,
            edges: resolved,
            resolution,
        }
    }
}

/// Angle of slot `index` among `count` evenly spaced slots, shifted by `offset`.
///
/// Callers only ask for slots of non-empty rings, so `count` is never zero.
fn ring_angle(index: usize, count: usize, offset: f32) -> f32 {
    (index as f32 / count as f32) * TAU + offset
}

/// Nodes placed so far, indexed in placement order.
struct Placement {
    placed: OrderedIdSet,
    nodes: Vec<PositionedNode>,
}

impl Placement {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            placed: OrderedIdSet::new(),
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn contains(&self, id: CiId) -> bool {
        self.placed.contains(id)
    }

    fn place(&mut self, node: &RawNode, position: Point, level: Level) {
        if self.placed.insert(node.id()) {
            self.nodes
                .push(PositionedNode::new(node.clone(), position, level));
        }
    }

    fn resolve_edges(&self, edges: &[RawEdge]) -> Vec<ResolvedEdge> {
        edges
            .iter()
            .filter_map(|edge| {
                match (
                    self.placed.index_of(edge.source_id()),
                    self.placed.index_of(edge.target_id()),
                ) {
                    (Some(source), Some(target)) => Some(ResolvedEdge::new(
                        source,
                        target,
                        edge.relation_type().to_string(),
                    )),
                    _ => {
                        trace!(
                            source = edge.source_id().get(),
                            target = edge.target_id().get();
                            "Dropping edge with unplaced endpoint"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}
