//! Error types for roost-core.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An embedding source whose document has no node in the graph.
    #[error("embedding source has no node with id `{id}`")]
    MissingParentNode { id: String },
    /// An embedded document with no node in the graph.
    #[error("embedded document has no node with id `{id}`")]
    MissingChildNode { id: String },
    #[error(transparent)]
    Graph(#[from] roost_graph::Error),
}
