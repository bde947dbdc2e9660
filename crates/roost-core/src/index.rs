//! Graph indexing: one scan of the element set into id-keyed lookup tables.

use roost_graph::{ElementData, ElementGraph, ElementGroup};

use crate::FxIndexMap;

/// Pre-pass snapshots of the graph's elements.
///
/// The rewriter consults these tables while mutating the live graph. They
/// are never updated mid-pass, so lookups keep seeing the pre-pass state
/// even for elements that have already been removed.
#[derive(Debug, Default)]
pub struct GraphIndex {
    /// Node id to node data.
    pub nodes: FxIndexMap<String, ElementData>,
    /// Source node id to edge id to edge data.
    pub outgoing: FxIndexMap<String, FxIndexMap<String, ElementData>>,
    /// Target node id to edge id to edge data.
    pub incoming: FxIndexMap<String, FxIndexMap<String, ElementData>>,
}

impl GraphIndex {
    /// Builds all three tables in one scan.
    ///
    /// Edge endpoints are not validated against the node table; an edge to
    /// an absent node is indexed like any other.
    pub fn build(graph: &ElementGraph) -> Self {
        let mut index = Self::default();
        for (group, data) in graph.elements() {
            match group {
                ElementGroup::Nodes => {
                    index.nodes.insert(data.id.clone(), data.clone());
                }
                ElementGroup::Edges => {
                    let (Some(source), Some(target)) =
                        (data.source.as_deref(), data.target.as_deref())
                    else {
                        continue;
                    };
                    index
                        .outgoing
                        .entry(source.to_string())
                        .or_default()
                        .insert(data.id.clone(), data.clone());
                    index
                        .incoming
                        .entry(target.to_string())
                        .or_default()
                        .insert(data.id.clone(), data.clone());
                }
            }
        }
        index
    }
}
