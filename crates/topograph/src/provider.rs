//! In-memory data provider.
//!
//! [`MemoryProvider`] answers topology requests from a whole inventory held
//! in memory, walking relationships the same way the CMDB topology endpoint
//! does. Hosts without a backend (the CLI, tests) use it as their
//! [`DataProvider`].

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::debug;

use crate::{
    config::{MAX_DEPTH, MIN_DEPTH},
    controller::DataProvider,
    error::{ProviderError, TopographError},
    model::{CiId, RawEdge, RawNode, Topology},
};

/// Number of CIs returned when no focal CI is requested.
pub const OVERVIEW_LIMIT: usize = 100;

/// A provider backed by a complete inventory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    inventory: Topology,
    /// First position of each CI id in the inventory's node list.
    node_index: HashMap<CiId, usize>,
}

impl MemoryProvider {
    pub fn new(inventory: Topology) -> Self {
        let mut node_index = HashMap::with_capacity(inventory.nodes().len());
        for (index, node) in inventory.nodes().iter().enumerate() {
            node_index.entry(node.id()).or_insert(index);
        }
        Self {
            inventory,
            node_index,
        }
    }

    /// Parses an inventory document and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TopographError::Decode`] if the document is malformed.
    pub fn from_json(src: &str) -> Result<Self, TopographError> {
        Topology::from_json(src).map(Self::new)
    }

    pub fn inventory(&self) -> &Topology {
        &self.inventory
    }

    fn node(&self, id: CiId) -> Option<&RawNode> {
        self.node_index
            .get(&id)
            .map(|&index| &self.inventory.nodes()[index])
    }

    /// Computes the topology a request would return, synchronously.
    ///
    /// With a focal CI this is a depth-first walk of at most `depth`
    /// relationship hops, following upstream relationships before downstream
    /// ones. Without one it is the overview: the first [`OVERVIEW_LIMIT`] CIs
    /// and the relationships among them.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidDepth`] if `depth` is outside `1..=5`.
    pub fn query(&self, focal_id: Option<CiId>, depth: u8) -> Result<Topology, ProviderError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(ProviderError::InvalidDepth(depth));
        }

        let topology = match focal_id {
            Some(focal) => {
                let mut walk = Walk::default();
                self.visit(focal, i32::from(depth), &mut walk);
                Topology::new(walk.nodes, walk.edges)
            }
            None => self.overview(),
        };

        debug!(
            focal_id:? = focal_id.map(CiId::get),
            depth,
            nodes = topology.nodes().len(),
            edges = topology.edges().len();
            "Inventory query answered"
        );

        Ok(topology)
    }

    fn visit(&self, id: CiId, depth: i32, walk: &mut Walk) {
        if depth < 0 || !walk.visited.insert(id) {
            return;
        }
        let Some(node) = self.node(id) else {
            return;
        };
        walk.nodes.push(node.clone());
        if depth == 0 {
            return;
        }

        let edges = self.inventory.edges();
        for (index, edge) in edges.iter().enumerate() {
            if edge.target_id() == id {
                walk.emit(index, edge);
                self.visit(edge.source_id(), depth - 1, walk);
            }
        }
        for (index, edge) in edges.iter().enumerate() {
            if edge.source_id() == id {
                walk.emit(index, edge);
                self.visit(edge.target_id(), depth - 1, walk);
            }
        }
    }

    fn overview(&self) -> Topology {
        let nodes: Vec<RawNode> = self
            .inventory
            .nodes()
            .iter()
            .take(OVERVIEW_LIMIT)
            .cloned()
            .collect();
        let included: HashSet<CiId> = nodes.iter().map(RawNode::id).collect();
        let edges = self
            .inventory
            .edges()
            .iter()
            .filter(|edge| {
                included.contains(&edge.source_id()) && included.contains(&edge.target_id())
            })
            .cloned()
            .collect();
        Topology::new(nodes, edges)
    }
}

#[async_trait(?Send)]
impl DataProvider for MemoryProvider {
    async fn fetch_topology(
        &self,
        focal_id: Option<CiId>,
        depth: u8,
    ) -> Result<Topology, ProviderError> {
        self.query(focal_id, depth)
    }
}

/// Accumulator for one traversal.
#[derive(Default)]
struct Walk {
    visited: HashSet<CiId>,
    emitted_edges: HashSet<usize>,
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl Walk {
    /// Records the inventory edge at `index` unless it was already emitted.
    fn emit(&mut self, index: usize, edge: &RawEdge) {
        if self.emitted_edges.insert(index) {
            self.edges.push(edge.clone());
        }
    }
}

/// Builds a topology of `Server` CIs named `ci-<id>` with `connects` edges.
#[cfg(test)]
pub(crate) fn topology(ids: &[i64], edges: &[(i64, i64)]) -> Topology {
    Topology::new(
        ids.iter()
            .map(|&id| RawNode::new(id, format!("ci-{id}"), "Server"))
            .collect(),
        edges
            .iter()
            .map(|&(source, target)| RawEdge::new(source, target, "connects"))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(topology: &Topology) -> Vec<i64> {
        topology.nodes().iter().map(|n| n.id().get()).collect()
    }

    fn edge_pairs(topology: &Topology) -> Vec<(i64, i64)> {
        topology
            .edges()
            .iter()
            .map(|e| (e.source_id().get(), e.target_id().get()))
            .collect()
    }

    /// 1 → 2 → 3 → 4 chain plus 5 → 1 feeding the head.
    fn chain() -> MemoryProvider {
        MemoryProvider::new(topology(&[1, 2, 3, 4, 5], &[(1, 2), (2, 3), (3, 4), (5, 1)]))
    }

    #[test]
    fn test_depth_one_returns_direct_neighbors() {
        let result = chain().query(Some(1.into()), 1).unwrap();

        // Upstream (5 → 1) is followed before downstream (1 → 2).
        assert_eq!(ids(&result), vec![1, 5, 2]);
        assert_eq!(edge_pairs(&result), vec![(5, 1), (1, 2)]);
    }

    #[test]
    fn test_depth_two_follows_two_hops() {
        let result = chain().query(Some(1.into()), 2).unwrap();

        assert_eq!(ids(&result), vec![1, 5, 2, 3]);
        // 1 → 2 is reached again from 2 but emitted once. 3 sits at the depth
        // limit, so 3 → 4 is never reached.
        assert_eq!(edge_pairs(&result), vec![(5, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_boundary_edges_are_emitted() {
        // Edges toward CIs missing from the inventory are still returned.
        let provider = MemoryProvider::new(topology(&[1, 2], &[(1, 2), (1, 9)]));
        let result = provider.query(Some(1.into()), 1).unwrap();

        assert_eq!(ids(&result), vec![1, 2]);
        assert_eq!(edge_pairs(&result), vec![(1, 2), (1, 9)]);
    }

    #[test]
    fn test_unknown_focal_returns_empty() {
        let result = chain().query(Some(42.into()), 2).unwrap();
        assert!(result.is_empty());
        assert!(result.edges().is_empty());
    }

    #[test]
    fn test_invalid_depth() {
        assert_eq!(
            chain().query(Some(1.into()), 0),
            Err(ProviderError::InvalidDepth(0))
        );
        assert_eq!(
            chain().query(Some(1.into()), 6),
            Err(ProviderError::InvalidDepth(6))
        );
        assert!(chain().query(Some(1.into()), 5).is_ok());
    }

    #[test]
    fn test_cycle_terminates() {
        let provider = MemoryProvider::new(topology(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]));
        let result = provider.query(Some(1.into()), 5).unwrap();

        assert_eq!(ids(&result).len(), 3);
        assert_eq!(result.edges().len(), 3);
    }

    #[test]
    fn test_overview_limits_nodes_and_edges() {
        let node_ids: Vec<i64> = (1..=120).collect();
        let provider = MemoryProvider::new(topology(&node_ids, &[(1, 2), (99, 100), (100, 101), (110, 1)]));
        let result = provider.query(None, 2).unwrap();

        assert_eq!(result.nodes().len(), OVERVIEW_LIMIT);
        assert_eq!(result.nodes()[0].id(), CiId::new(1));
        assert_eq!(edge_pairs(&result), vec![(1, 2), (99, 100)]);
    }

    #[test]
    fn test_duplicate_inventory_ids_use_first() {
        let inventory = Topology::new(
            vec![
                RawNode::new(1, "first", "Server"),
                RawNode::new(1, "second", "Server"),
            ],
            vec![],
        );
        let result = MemoryProvider::new(inventory).query(Some(1.into()), 1).unwrap();
        assert_eq!(result.nodes().len(), 1);
        assert_eq!(result.nodes()[0].name(), "first");
    }

    #[test]
    fn test_from_json() {
        let provider = MemoryProvider::from_json(
            r#"{"nodes": [{"id": 1, "name": "a", "type_name": "Server"}], "edges": []}"#,
        )
        .unwrap();
        assert_eq!(provider.inventory().nodes().len(), 1);

        assert!(matches!(
            MemoryProvider::from_json("[]"),
            Err(TopographError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_topology_delegates_to_query() {
        let provider = chain();
        let fetched = provider.fetch_topology(Some(3.into()), 1).await.unwrap();
        assert_eq!(fetched, provider.query(Some(3.into()), 1).unwrap());
    }
}
