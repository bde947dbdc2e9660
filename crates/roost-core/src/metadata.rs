//! The per-document metadata surface consumed by the embedding extractor.

use serde::{Deserialize, Serialize};

use crate::FxIndexMap;

/// One embed declaration inside a document. The target is stored bare, the
/// way `![[target]]` names it, without extension or heading/block suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedRef {
    pub link: String,
}

impl EmbedRef {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

/// Metadata of one document, as far as patching cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub embeds: Vec<EmbedRef>,
}

impl DocumentMetadata {
    pub fn with_embeds<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            embeds: links.into_iter().map(EmbedRef::new).collect(),
        }
    }
}

/// Document id to metadata, in scan order.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    docs: FxIndexMap<String, DocumentMetadata>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc: impl Into<String>, metadata: DocumentMetadata) {
        self.docs.insert(doc.into(), metadata);
    }

    pub fn get(&self, doc: &str) -> Option<&DocumentMetadata> {
        self.docs.get(doc)
    }

    pub fn docs(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentMetadata)> {
        self.docs.iter().map(|(doc, meta)| (doc.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
