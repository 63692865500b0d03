//! Requirement documents downloaded before the interview starts
//!
//! A resource set is a root `manifest.yaml` naming the requirement
//! documents, plus one `<name>.yaml` per requirement. The loader fetches
//! and parses everything up front, so a broken resource set fails the run
//! before any question is asked.

pub mod fetcher;
pub mod version;

pub use fetcher::{ResourceFetcher, ResourceSource};
pub use version::check_compatibility;

use crate::data::DataDocuments;
use crate::error::{Error, Result};
use crate::questions::Question;
use crate::structure::tree::StructureNode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Requirement documents every resource set must provide
const REQUIRED: &[&str] = &["questions", "structure", "data"];

/// Root manifest of a resource set (`manifest.yaml`)
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceManifest {
    /// Semver version of the resource set, checked against the CLI version
    pub version: String,

    /// Requirement document names, each backed by `<name>.yaml` below the
    /// resource root
    pub requirements: Vec<String>,
}

/// A fully loaded resource set
#[derive(Debug)]
pub struct Requirements {
    pub manifest: ResourceManifest,
    pub questions: Vec<Question>,
    pub structure: Vec<StructureNode>,
    pub data: DataDocuments,
}

/// Fetch and parse the resource manifest and every requirement document it
/// names, failing fast when a required document is missing or malformed
pub async fn load(fetcher: &ResourceFetcher) -> Result<Requirements> {
    let manifest: ResourceManifest =
        parse_yaml("manifest.yaml", &fetcher.fetch_text("manifest.yaml").await?)?;
    for name in REQUIRED {
        if !manifest.requirements.iter().any(|provided| provided == name) {
            return Err(Error::Configuration(format!(
                "resource manifest does not provide the required \"{}\" document",
                name
            )));
        }
    }

    let mut documents: HashMap<String, String> = HashMap::new();
    for name in &manifest.requirements {
        let file = format!("{}.yaml", name);
        documents.insert(name.clone(), fetcher.fetch_text(&file).await?);
    }

    let questions = parse_yaml("questions.yaml", &documents["questions"])?;
    let structure = parse_yaml("structure.yaml", &documents["structure"])?;
    let data = parse_yaml("data.yaml", &documents["data"])?;

    Ok(Requirements {
        manifest,
        questions,
        structure,
        data,
    })
}

fn parse_yaml<T: DeserializeOwned>(name: &str, text: &str) -> Result<T> {
    serde_yaml::from_str(text)
        .map_err(|err| Error::Configuration(format!("invalid {}: {}", name, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("manifest.yaml"),
            "version: 0.1.0\nrequirements:\n  - questions\n  - structure\n  - data\n",
        )
        .unwrap();
        fs::write(
            dir.join("questions.yaml"),
            "- question: Please enter a site id\n  type: string\n  required: true\n",
        )
        .unwrap();
        fs::write(
            dir.join("structure.yaml"),
            "- name: config\n  type: directory\n  contents:\n    - name: configuration.json\n      type: json\n",
        )
        .unwrap();
        fs::write(dir.join("data.yaml"), "configuration.json: {}\n").unwrap();
    }

    fn fetcher(dir: &Path) -> ResourceFetcher {
        ResourceFetcher::new(ResourceSource::local(dir.to_path_buf()), "kindling-test")
    }

    #[tokio::test]
    async fn test_load_parses_all_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let requirements = load(&fetcher(dir.path())).await.unwrap();
        assert_eq!(requirements.manifest.version, "0.1.0");
        assert_eq!(requirements.questions.len(), 1);
        assert_eq!(requirements.structure[0].name, "config");
        assert!(requirements.data.contains_key("configuration.json"));
    }

    #[tokio::test]
    async fn test_load_rejects_manifest_missing_a_requirement() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(
            dir.path().join("manifest.yaml"),
            "version: 0.1.0\nrequirements:\n  - questions\n  - structure\n",
        )
        .unwrap();
        let result = load(&fetcher(dir.path())).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(
            dir.path().join("questions.yaml"),
            "- question: Broken\n  type: integer\n",
        )
        .unwrap();
        let result = load(&fetcher(dir.path())).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
