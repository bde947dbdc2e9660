//! Embedding extraction: metadata index into an ordered embedding map.

use crate::FxIndexMap;
use crate::ids::canonical_doc;
use crate::metadata::MetadataIndex;

/// Document id to the ids of the documents it embeds, in declaration
/// order. Documents without embeds do not appear.
pub type EmbedMap = FxIndexMap<String, Vec<String>>;

/// Collects every document's embed targets, normalized to document ids.
///
/// Pure read over the metadata index; the graph is not consulted, so the
/// map may name documents that have no node.
pub fn collect_embeds(metadata: &MetadataIndex) -> EmbedMap {
    let mut embeds = EmbedMap::default();
    for (doc, meta) in metadata.iter() {
        if meta.embeds.is_empty() {
            continue;
        }
        let targets: Vec<String> = meta
            .embeds
            .iter()
            .map(|embed| canonical_doc(&embed.link))
            .collect();
        embeds.insert(doc.to_string(), targets);
    }
    embeds
}
