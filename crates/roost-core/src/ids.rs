//! The id grammar shared by the indexer, the rewriter and hosts.
//!
//! Core document nodes are `core:<doc>`. A child instance synthesized under
//! an embedding parent is `roost:<parentId>><childId>`, and remapped edges
//! carry both halves so every synthesized id stays collision-free against
//! the core namespace.

/// Canonical document extension appended to embed targets.
pub const DOC_EXTENSION: &str = "md";

/// `<link>` into `<link>.md`. The append is unconditional; callers pass
/// bare link targets.
pub fn canonical_doc(link: &str) -> String {
    format!("{link}.{DOC_EXTENSION}")
}

/// Core node id for a document.
pub fn core_id(doc: &str) -> String {
    format!("core:{doc}")
}

/// Id of the child instance of `child_id` nested under `parent_id`.
pub fn roost_id(parent_id: &str, child_id: &str) -> String {
    format!("roost:{parent_id}>{child_id}")
}

/// Id of a remapped edge from a child instance out to a resolved target.
pub fn outgoing_edge_id(parent_id: &str, child_id: &str, target_id: &str) -> String {
    format!("roost:{parent_id}>{child_id}->{target_id}")
}

/// Id of a remapped edge from a resolved source into a child instance.
pub fn incoming_edge_id(source_id: &str, parent_id: &str, child_id: &str) -> String {
    format!("roost:{source_id}->{parent_id}>{child_id}")
}
