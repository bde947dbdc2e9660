//! Element graph container APIs used by `roost`.
//!
//! Baseline: the cytoscape.js element model. Every entry is a node or an
//! edge carrying an id-keyed JSON data record; iteration follows insertion
//! order, matching the JS `Map` semantics the patch pass relies on.

#![forbid(unsafe_code)]

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge element `{id}` is missing a source or target endpoint")]
    EdgeMissingEndpoint { id: String },
}

/// Cytoscape element group tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementGroup {
    #[serde(rename = "nodes")]
    Nodes,
    #[serde(rename = "edges")]
    Edges,
}

/// The `data` record of one element.
///
/// Identity fields are typed; everything else the host put on the element
/// (labels, weights, style hooks) rides along in `attrs` untouched. Cloning
/// deep-copies the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    pub id: String,
    /// Compound-node membership. Unvalidated: a parent id may refer to a
    /// node that is absent from the graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

impl ElementData {
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn edge(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }
}

/// One graph element in the JSON wire shape:
/// `{ "group": "nodes" | "edges", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub group: ElementGroup,
    pub data: ElementData,
}

impl Element {
    pub fn node(data: ElementData) -> Self {
        Self {
            group: ElementGroup::Nodes,
            data,
        }
    }

    pub fn edge(data: ElementData) -> Self {
        Self {
            group: ElementGroup::Edges,
            data,
        }
    }
}

/// Id-keyed element store.
///
/// Adds upsert by id. Removing a node also removes its incident edges, but
/// never cascades to nodes whose `parent` field points at the removed node;
/// those keep a dangling parent reference, as the host visualization does.
#[derive(Debug, Clone, Default)]
pub struct ElementGraph {
    nodes: FxIndexMap<String, ElementData>,
    edges: FxIndexMap<String, ElementData>,
}

impl ElementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Result<Self> {
        let mut graph = Self::new();
        for element in elements {
            graph.add(element)?;
        }
        Ok(graph)
    }

    /// Inserts an element, replacing any existing element with the same id.
    pub fn add(&mut self, element: Element) -> Result<()> {
        match element.group {
            ElementGroup::Nodes => {
                self.nodes.insert(element.data.id.clone(), element.data);
            }
            ElementGroup::Edges => {
                if element.data.source.is_none() || element.data.target.is_none() {
                    return Err(Error::EdgeMissingEndpoint {
                        id: element.data.id,
                    });
                }
                self.edges.insert(element.data.id.clone(), element.data);
            }
        }
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&ElementData> {
        self.edges.get(id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn has_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ElementData> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &ElementData> {
        self.edges.values()
    }

    /// All elements, nodes first, each group in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementGroup, &ElementData)> {
        self.nodes
            .values()
            .map(|data| (ElementGroup::Nodes, data))
            .chain(self.edges.values().map(|data| (ElementGroup::Edges, data)))
    }

    pub fn to_elements(&self) -> Vec<Element> {
        self.elements()
            .map(|(group, data)| Element {
                group,
                data: data.clone(),
            })
            .collect()
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }

        // Remove incident edges.
        self.edges
            .retain(|_, e| e.source.as_deref() != Some(id) && e.target.as_deref() != Some(id));

        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        self.edges.shift_remove(id).is_some()
    }
}
