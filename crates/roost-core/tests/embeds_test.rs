use roost_core::metadata::{DocumentMetadata, MetadataIndex};
use roost_core::{EmbedMap, collect_embeds};

#[test]
fn embed_targets_become_document_ids_in_declaration_order() {
    let mut metadata = MetadataIndex::new();
    metadata.insert("a.md", DocumentMetadata::with_embeds(["b", "sub/c"]));
    metadata.insert("b.md", DocumentMetadata::default());

    let embeds = collect_embeds(&metadata);

    let keys: Vec<&str> = embeds.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a.md"]);
    assert_eq!(embeds["a.md"], vec!["b.md", "sub/c.md"]);
}

#[test]
fn documents_without_embeds_are_omitted() {
    let mut metadata = MetadataIndex::new();
    metadata.insert("a.md", DocumentMetadata::default());
    metadata.insert("b.md", DocumentMetadata::default());

    let embeds = collect_embeds(&metadata);

    assert!(embeds.is_empty());
}

#[test]
fn map_keys_follow_metadata_scan_order() {
    let mut metadata = MetadataIndex::new();
    metadata.insert("z.md", DocumentMetadata::with_embeds(["a"]));
    metadata.insert("a.md", DocumentMetadata::with_embeds(["z"]));

    let embeds = collect_embeds(&metadata);

    let keys: Vec<&str> = embeds.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z.md", "a.md"]);
}

#[test]
fn extension_append_does_not_replace_existing_suffixes() {
    let mut metadata = MetadataIndex::new();
    metadata.insert("a.md", DocumentMetadata::with_embeds(["diagram.png"]));

    let embeds: EmbedMap = collect_embeds(&metadata);

    assert_eq!(embeds["a.md"], vec!["diagram.png.md"]);
}
