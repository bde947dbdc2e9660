//! Embed-aware patching of note-vault link graphs.
//!
//! A vault's visualized link graph shows one node per document. Documents
//! embed other documents, and the flat graph hides that relationship. The
//! patch pass rewrites the graph so every embedded document becomes a child
//! node nested under each document that embeds it, with all edges that
//! touched the removed original re-targeted to the right child instance(s),
//! transitively through chains of embedding.
//!
//! Design goals:
//! - Parity with the host visualization's element semantics: id-keyed
//!   upsert, node removal drops incident edges, insertion order everywhere.
//! - Deterministic output: insertion-ordered tables end to end plus an
//!   explicit children-first ordering over chained embeds.
//! - Headless: no I/O in this crate; hosts supply the metadata index and
//!   the element graph.

#![forbid(unsafe_code)]

pub mod embeds;
pub mod error;
pub mod ids;
pub mod index;
pub mod metadata;
pub mod patch;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the hasher used across roost.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// Insertion-ordered set counterpart of [`FxIndexMap`].
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

pub use embeds::{EmbedMap, collect_embeds};
pub use error::{Error, Result};
pub use index::GraphIndex;
pub use metadata::{DocumentMetadata, EmbedRef, MetadataIndex};
pub use patch::{PatchOptions, PatchReport};
