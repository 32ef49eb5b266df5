use std::{env, fs, path::PathBuf};

use crate::xml::{Document, NodeId};

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("multiformat_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// Builds `<catalog><book id="1"><title>Dune</title></book><book id="2"/></catalog>`
/// through the tree API and returns the document with its root.
pub fn build_catalog() -> (Document, NodeId) {
    let mut doc = Document::new();
    let catalog = doc.create_element("catalog");
    let first = doc.create_element("book");
    let title = doc.create_element("title");
    let second = doc.create_element("book");

    let _ = doc.set_attribute(first, "id", "1");
    let _ = doc.set_node_text(title, "Dune");
    let _ = doc.add_child(first, title);
    let _ = doc.set_attribute(second, "id", "2");
    let _ = doc.add_child(catalog, first);
    let _ = doc.add_child(catalog, second);
    let _ = doc.set_root(catalog);

    (doc, catalog)
}
