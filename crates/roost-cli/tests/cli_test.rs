use assert_cmd::prelude::*;
use roost_graph::{Element, ElementGroup};
use serde_json::{Value, json};
use std::fs;
use std::process::Command;

fn write_vault(files: &[(&str, &str)]) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    for (name, text) in files {
        let path = tmp.path().join(name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).expect("create vault dirs");
        }
        fs::write(path, text).expect("write vault file");
    }
    tmp
}

fn node_ids(elements: &[Element]) -> Vec<&str> {
    elements
        .iter()
        .filter(|el| el.group == ElementGroup::Nodes)
        .map(|el| el.data.id.as_str())
        .collect()
}

fn edge_ids(elements: &[Element]) -> Vec<&str> {
    elements
        .iter()
        .filter(|el| el.group == ElementGroup::Edges)
        .map(|el| el.data.id.as_str())
        .collect()
}

#[test]
fn cli_embeds_lists_targets_per_document() {
    let vault = write_vault(&[
        ("a.md", "# A\n![[b]]\nSee [[c]].\n"),
        ("b.md", "Link to [[c]].\n"),
        ("c.md", "Plain note.\n"),
    ]);

    let exe = assert_cmd::cargo_bin!("roost-cli");
    let assert = Command::new(exe)
        .arg("embeds")
        .arg(vault.path())
        .assert()
        .success();

    let embeds: Value = serde_json::from_slice(&assert.get_output().stdout).expect("parse embeds");
    assert_eq!(embeds, json!({ "a.md": ["b.md"] }));
}

#[test]
fn cli_graph_builds_the_flat_link_graph() {
    let vault = write_vault(&[
        ("a.md", "# A\n![[b]]\nSee [[c]].\n"),
        ("b.md", "Link to [[c]].\n"),
        ("c.md", "Plain note.\n"),
    ]);

    let exe = assert_cmd::cargo_bin!("roost-cli");
    let assert = Command::new(exe)
        .arg("graph")
        .arg(vault.path())
        .assert()
        .success();

    let elements: Vec<Element> =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse elements");

    assert_eq!(node_ids(&elements), vec!["core:a.md", "core:b.md", "core:c.md"]);
    assert_eq!(
        edge_ids(&elements),
        vec![
            "link:core:a.md->core:b.md",
            "link:core:a.md->core:c.md",
            "link:core:b.md->core:c.md",
        ]
    );
}

#[test]
fn cli_graph_resolves_links_written_without_their_folder() {
    let vault = write_vault(&[("a.md", "[[c]]\n"), ("sub/c.md", "Nested note.\n")]);

    let exe = assert_cmd::cargo_bin!("roost-cli");
    let assert = Command::new(exe)
        .arg("graph")
        .arg(vault.path())
        .assert()
        .success();

    let elements: Vec<Element> =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse elements");

    assert_eq!(node_ids(&elements), vec!["core:a.md", "core:sub/c.md"]);
    assert_eq!(edge_ids(&elements), vec!["link:core:a.md->core:sub/c.md"]);
}

#[test]
fn cli_patch_nests_embedded_documents() {
    let vault = write_vault(&[
        ("a.md", "# A\n![[b]]\nSee [[c]].\n"),
        ("b.md", "Link to [[c]].\n"),
        ("c.md", "Plain note.\n"),
    ]);

    let exe = assert_cmd::cargo_bin!("roost-cli");
    let assert = Command::new(exe)
        .args(["patch", "--pretty"])
        .arg(vault.path())
        .assert()
        .success();

    let elements: Vec<Element> =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse elements");

    assert_eq!(
        node_ids(&elements),
        vec!["core:a.md", "core:c.md", "roost:core:a.md>core:b.md"]
    );
    let instance = elements
        .iter()
        .find(|el| el.data.id == "roost:core:a.md>core:b.md")
        .expect("nested instance");
    assert_eq!(instance.data.parent.as_deref(), Some("core:a.md"));

    assert_eq!(
        edge_ids(&elements),
        vec![
            "link:core:a.md->core:c.md",
            "roost:core:a.md>core:b.md->core:c.md",
        ]
    );
}

#[test]
fn cli_patch_reads_a_prebuilt_element_graph() {
    let vault = write_vault(&[("a.md", "![[b]]\n"), ("b.md", "Note body.\n")]);
    let elements = json!([
        { "group": "nodes", "data": { "id": "core:a.md" } },
        { "group": "nodes", "data": { "id": "core:b.md" } },
        { "group": "nodes", "data": { "id": "core:x.md" } },
        { "group": "edges", "data": { "id": "e1", "source": "core:b.md", "target": "core:x.md" } },
    ]);
    let graph_file = vault.path().join("elements.json");
    fs::write(&graph_file, elements.to_string()).expect("write elements");

    let exe = assert_cmd::cargo_bin!("roost-cli");
    let assert = Command::new(exe)
        .arg("patch")
        .arg("--graph")
        .arg(&graph_file)
        .arg(vault.path())
        .assert()
        .success();

    let patched: Vec<Element> =
        serde_json::from_slice(&assert.get_output().stdout).expect("parse elements");

    assert_eq!(
        node_ids(&patched),
        vec!["core:a.md", "core:x.md", "roost:core:a.md>core:b.md"]
    );
    assert_eq!(
        edge_ids(&patched),
        vec!["roost:core:a.md>core:b.md->core:x.md"]
    );
}

#[test]
fn cli_patch_strict_fails_on_missing_embed_target() {
    let vault = write_vault(&[("a.md", "![[ghost]]\n")]);

    let exe = assert_cmd::cargo_bin!("roost-cli");
    Command::new(exe)
        .args(["patch", "--strict"])
        .arg(vault.path())
        .assert()
        .failure();

    let exe = assert_cmd::cargo_bin!("roost-cli");
    Command::new(exe)
        .arg("patch")
        .arg(vault.path())
        .assert()
        .success();
}
