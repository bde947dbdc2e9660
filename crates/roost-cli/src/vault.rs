//! Vault scanning: documents, embed declarations and resolved links.
//!
//! The scanner walks a directory of markdown documents and extracts the
//! two inputs patching needs: a metadata index with each document's embed
//! declarations, and the resolved link pairs the flat graph is built from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use roost_core::ids::{canonical_doc, core_id};
use roost_core::{DocumentMetadata, EmbedRef, FxIndexMap, FxIndexSet, MetadataIndex};
use roost_graph::{Element, ElementData, ElementGraph};
use serde_json::json;
use tracing::debug;

pub struct Vault {
    docs: FxIndexSet<String>,
    metadata: MetadataIndex,
    /// Source doc id to target doc ids, deduplicated, in first-seen order.
    links: FxIndexMap<String, FxIndexSet<String>>,
}

impl Vault {
    /// Scans `root` for `*.md` documents, in sorted path order.
    ///
    /// Embed targets are recorded bare, exactly as written between the
    /// brackets; link resolution only feeds the flat graph.
    pub fn scan(root: &Path) -> io::Result<Self> {
        let mut paths: Vec<PathBuf> = Vec::new();
        collect_markdown(root, &mut paths)?;
        paths.sort();

        let mut docs: FxIndexSet<String> = FxIndexSet::default();
        let mut stems: FxIndexMap<String, Vec<String>> = FxIndexMap::default();
        for path in &paths {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let doc = rel.to_string_lossy().replace('\\', "/");
            if let Some(stem) = rel.file_stem().and_then(|s| s.to_str()) {
                stems.entry(stem.to_string()).or_default().push(doc.clone());
            }
            docs.insert(doc);
        }

        let wikilink = Regex::new(r"(!?)\[\[([^\[\]]+)\]\]").unwrap();
        let mut metadata = MetadataIndex::new();
        let mut links: FxIndexMap<String, FxIndexSet<String>> = FxIndexMap::default();

        for path in &paths {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let doc = rel.to_string_lossy().replace('\\', "/");
            let text = fs::read_to_string(path)?;

            let mut meta = DocumentMetadata::default();
            for caps in wikilink.captures_iter(&text) {
                let is_embed = !caps[1].is_empty();
                let Some(target) = link_target(&caps[2]) else {
                    continue;
                };
                if is_embed {
                    meta.embeds.push(EmbedRef::new(target.clone()));
                }
                if let Some(resolved) = resolve_target(&docs, &stems, &target) {
                    links.entry(doc.clone()).or_default().insert(resolved);
                }
            }
            metadata.insert(doc, meta);
        }

        debug!(docs = docs.len(), "scanned vault");
        Ok(Self {
            docs,
            metadata,
            links,
        })
    }

    pub fn metadata(&self) -> &MetadataIndex {
        &self.metadata
    }

    /// Builds the flat pre-patch graph: one `core:` node per document and
    /// one `link:` edge per resolved link pair.
    pub fn flat_graph(&self) -> roost_graph::Result<ElementGraph> {
        let mut graph = ElementGraph::new();
        for doc in &self.docs {
            let base = doc.rsplit('/').next().unwrap_or(doc.as_str());
            let label = base.strip_suffix(".md").unwrap_or(base);
            graph.add(Element::node(
                ElementData::node(core_id(doc)).with_attr("label", json!(label)),
            ))?;
        }
        for (src, targets) in &self.links {
            let source_id = core_id(src);
            for target in targets {
                let target_id = core_id(target);
                let id = format!("link:{source_id}->{target_id}");
                graph.add(Element::edge(ElementData::edge(
                    id,
                    source_id.clone(),
                    target_id,
                )))?;
            }
        }
        Ok(graph)
    }
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            collect_markdown(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            out.push(path);
        }
    }
    Ok(())
}

/// `target|alias`, `target#heading` and `target#^block` all name `target`.
fn link_target(raw: &str) -> Option<String> {
    let target = raw.split('|').next().unwrap_or(raw);
    let target = target.split('#').next().unwrap_or(target);
    let target = target.trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

/// Exact path match first, then a unique file-stem match for links written
/// without their folder.
fn resolve_target(
    docs: &FxIndexSet<String>,
    stems: &FxIndexMap<String, Vec<String>>,
    target: &str,
) -> Option<String> {
    let candidate = canonical_doc(target);
    if docs.contains(&candidate) {
        return Some(candidate);
    }
    match stems.get(target) {
        Some(paths) if paths.len() == 1 => Some(paths[0].clone()),
        _ => None,
    }
}
