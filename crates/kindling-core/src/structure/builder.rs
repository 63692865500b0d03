//! Materializing the structure tree into a real file tree

use super::tree::{NodeKind, StructureNode};
use crate::console::{Console, Tone};
use crate::data::{normalize, DataDocuments};
use crate::error::{Error, Result};
use crate::resources::ResourceFetcher;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Materialize the finished structure tree under `root`
///
/// Depth-first, parents before contents. `root` must already exist; every
/// created path must not. Download nodes are fetched from the asset root,
/// json nodes serialize the same-named data document, and bootstrap nodes
/// are skipped (the type is reserved).
pub async fn build(
    tree: &[StructureNode],
    data: &DataDocuments,
    root: &Path,
    assets: &ResourceFetcher,
    console: &dyn Console,
) -> Result<()> {
    let mut pending: Vec<(PathBuf, &StructureNode)> = tree
        .iter()
        .rev()
        .map(|node| (root.to_path_buf(), node))
        .collect();

    while let Some((parent, node)) = pending.pop() {
        let path = parent.join(&node.name);
        match node.kind {
            NodeKind::Directory => {
                fs::create_dir(&path).await.map_err(|err| {
                    Error::Resource(format!(
                        "could not create directory \"{}\": {}",
                        path.display(),
                        err
                    ))
                })?;
                for child in node.contents.iter().rev() {
                    pending.push((path.clone(), child));
                }
            }
            NodeKind::Download => {
                let source = node.src.as_deref().unwrap_or(&node.name);
                let bytes = assets.fetch_bytes(source).await?;
                fs::write(&path, &bytes).await.map_err(|err| {
                    Error::Resource(format!(
                        "could not write \"{}\": {}",
                        path.display(),
                        err
                    ))
                })?;
            }
            NodeKind::Json => {
                let document = data.get(&node.name).ok_or_else(|| {
                    Error::Configuration(format!(
                        "no data document named \"{}\" for generated file \"{}\"",
                        node.name,
                        path.display()
                    ))
                })?;
                let text = render_json(document)?;
                fs::write(&path, text).await.map_err(|err| {
                    Error::Resource(format!(
                        "could not write \"{}\": {}",
                        path.display(),
                        err
                    ))
                })?;
            }
            NodeKind::Bootstrap => {
                console.say(
                    Tone::Info,
                    &format!("Skipping bootstrap entry \"{}\" (not implemented)", path.display()),
                );
            }
        }
    }
    Ok(())
}

/// Normalize and pretty-print a data document, newline-terminated
fn render_json(document: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&normalize(document))?;
    text.push('\n');
    Ok(text)
}
