//! The file-system blueprint assembled during the interview

use serde::{Deserialize, Serialize};

/// Kinds of structure tree entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A directory owning a sub-tree of entries
    Directory,
    /// A file fetched from the asset root
    Download,
    /// A file generated from the same-named data document
    Json,
    /// Reserved for generated bootstrap scripts; currently skipped
    Bootstrap,
}

/// One file or directory in the generated skeleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureNode {
    /// File or directory name within its parent
    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Child entries, for directory nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<StructureNode>,

    /// Asset-root-relative source for download nodes, when it differs from
    /// `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// Append `node` to the contents of every entry matching the
/// slash-separated `path`
///
/// Paths that match nothing are silently ignored: structure actions target
/// optional insertion points, and the tree is left unchanged when the
/// insertion point was never part of it.
pub fn insert_at_path(tree: &mut [StructureNode], path: &str, node: &StructureNode) {
    let (name, rest) = match path.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    };
    for entry in tree.iter_mut() {
        if entry.name == name {
            match rest {
                Some(rest) => insert_at_path(&mut entry.contents, rest, node),
                None => entry.contents.push(node.clone()),
            }
        }
    }
}
