//! The patch pass: nest embedded documents under their embedding parents
//! and remap every edge that touched a removed original.

use roost_graph::{Element, ElementGraph};
use tracing::{debug, warn};

use crate::embeds::EmbedMap;
use crate::error::{Error, Result};
use crate::ids::{core_id, incoming_edge_id, outgoing_edge_id, roost_id};
use crate::index::GraphIndex;
use crate::{FxIndexMap, FxIndexSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Abort on the first embedding source or embed target without a graph
    /// node instead of warning and skipping it.
    pub strict: bool,
}

impl PatchOptions {
    /// Strict patching (missing nodes are returned as errors).
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lenient patching: missing nodes are warned about and skipped.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// What one pass did to the graph.
#[derive(Debug, Clone, Default)]
pub struct PatchReport {
    pub warnings: Vec<String>,
    /// Core nodes removed from the live graph.
    pub removed_nodes: usize,
    /// Child instances written (upserts counted per write).
    pub added_nodes: usize,
    /// Remapped edges written (upserts counted per write).
    pub added_edges: usize,
    /// Original node id to the ids of the child instances replacing it.
    pub remapped: FxIndexMap<String, Vec<String>>,
}

/// Runs one full patch pass over `graph`, mutating it in place.
///
/// Every `(source, embedded document)` pair gets its own child instance:
/// the embedded document's core node is removed (once, no matter how many
/// sources embed it) and a clone of it is nested under the source, with the
/// original's edges re-created against the clone. Edge endpoints that were
/// themselves replaced resolve through the remapping table, fanning out to
/// one edge per instance.
///
/// Sources are processed children-first over the embed relation, so chained
/// embeds resolve to already-synthesized instances no matter how the map
/// was ordered. Under [`PatchOptions::strict()`] the first missing node
/// aborts the pass; mutations already applied stay in place.
pub fn run(
    graph: &mut ElementGraph,
    embeds: &EmbedMap,
    options: &PatchOptions,
) -> Result<PatchReport> {
    let index = GraphIndex::build(graph);
    let mut removed: FxIndexSet<String> = FxIndexSet::default();
    let mut remapped: FxIndexMap<String, Vec<String>> = FxIndexMap::default();
    let mut report = PatchReport::default();

    for src in source_order(embeds) {
        let Some(embed_list) = embeds.get(src) else {
            continue;
        };
        let parent_id = core_id(src);
        if !index.nodes.contains_key(&parent_id) {
            if options.strict {
                return Err(Error::MissingParentNode { id: parent_id });
            }
            warn!("node with id {parent_id} does not exist");
            report
                .warnings
                .push(format!("node with id {parent_id} does not exist"));
            continue;
        }

        for embed in embed_list {
            let child_id = core_id(embed);
            let Some(child) = index.nodes.get(&child_id) else {
                if options.strict {
                    return Err(Error::MissingChildNode { id: child_id });
                }
                warn!("node with id {child_id} does not exist");
                report
                    .warnings
                    .push(format!("node with id {child_id} does not exist"));
                continue;
            };

            if removed.insert(child_id.clone()) {
                graph.remove_node(&child_id);
                report.removed_nodes += 1;
            }

            let nested_id = roost_id(&parent_id, &child_id);
            let mut instance = child.clone();
            instance.id = nested_id.clone();
            instance.parent = Some(parent_id.clone());
            graph.add(Element::node(instance))?;
            report.added_nodes += 1;

            remapped
                .entry(child_id.clone())
                .or_default()
                .push(nested_id.clone());

            if let Some(out_edges) = index.outgoing.get(&child_id) {
                for edge in out_edges.values() {
                    let Some(raw_target) = edge.target.as_deref() else {
                        continue;
                    };
                    // An edge back into the absorbing parent would become a
                    // child-to-own-parent loop; drop it.
                    if raw_target == parent_id {
                        continue;
                    }
                    for target_id in resolve(&remapped, raw_target) {
                        let edge_id = outgoing_edge_id(&parent_id, &child_id, target_id);
                        debug!("remapping edge {} to {edge_id}", edge.id);
                        let mut remapped_edge = edge.clone();
                        remapped_edge.id = edge_id;
                        remapped_edge.source = Some(nested_id.clone());
                        remapped_edge.target = Some(target_id.to_string());
                        graph.add(Element::edge(remapped_edge))?;
                        report.added_edges += 1;
                    }
                }
            }

            if let Some(in_edges) = index.incoming.get(&child_id) {
                for edge in in_edges.values() {
                    let Some(raw_source) = edge.source.as_deref() else {
                        continue;
                    };
                    if raw_source == parent_id {
                        continue;
                    }
                    for source_id in resolve(&remapped, raw_source) {
                        let edge_id = incoming_edge_id(source_id, &parent_id, &child_id);
                        debug!("remapping edge {} to {edge_id}", edge.id);
                        let mut remapped_edge = edge.clone();
                        remapped_edge.id = edge_id;
                        remapped_edge.source = Some(source_id.to_string());
                        remapped_edge.target = Some(nested_id.clone());
                        graph.add(Element::edge(remapped_edge))?;
                        report.added_edges += 1;
                    }
                }
            }
        }
    }

    report.remapped = remapped;
    Ok(report)
}

/// Resolved endpoints for `id`: the child instances replacing it, or the id
/// itself when nothing replaced it.
fn resolve<'a>(remapped: &'a FxIndexMap<String, Vec<String>>, id: &'a str) -> Vec<&'a str> {
    match remapped.get(id) {
        Some(ids) => ids.iter().map(String::as_str).collect(),
        None => vec![id],
    }
}

/// Children-first ordering of the embedding sources.
///
/// A source that is itself embedded by another source comes first, so by
/// the time the embedder is processed the remapping table already lists the
/// deeper instances. Insertion order breaks ties between independent
/// sources; a cyclic embed relation degrades to encounter order.
fn source_order(embeds: &EmbedMap) -> Vec<&str> {
    fn visit<'a>(
        src: &'a str,
        embeds: &'a EmbedMap,
        visited: &mut FxIndexSet<&'a str>,
        order: &mut Vec<&'a str>,
    ) {
        if !visited.insert(src) {
            return;
        }
        if let Some(children) = embeds.get(src) {
            for child in children {
                if embeds.contains_key(child.as_str()) {
                    visit(child, embeds, visited, order);
                }
            }
        }
        order.push(src);
    }

    let mut order: Vec<&str> = Vec::with_capacity(embeds.len());
    let mut visited: FxIndexSet<&str> = FxIndexSet::default();
    for src in embeds.keys() {
        visit(src, embeds, &mut visited, &mut order);
    }
    order
}
