//! Resource fetching from the remote resource root or a local directory

use crate::error::{Error, Result};
use std::path::PathBuf;
use tokio::fs;
use url::Url;

/// Where a resource root lives - a remote URL or a local directory
///
/// Local sources exist for development and tests; remote and local
/// fetching behave identically from the caller's point of view.
#[derive(Debug, Clone)]
pub enum ResourceSource {
    Remote(Url),
    Local(PathBuf),
}

impl ResourceSource {
    pub fn remote(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|err| Error::Configuration(format!("invalid resource URL \"{}\": {}", url, err)))?;
        Ok(Self::Remote(url))
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Fetches files below a single resource root
pub struct ResourceFetcher {
    source: ResourceSource,
    client: reqwest::Client,
}

impl ResourceFetcher {
    pub fn new(source: ResourceSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Build a URL by appending slash-separated path segments, preserving
    /// query parameters
    fn build_url(base: &Url, path: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Resource(format!("URL cannot have path segments: {}", base)))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    /// Fetch a file below the source root as raw bytes
    pub async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        match &self.source {
            ResourceSource::Remote(base) => {
                let url = Self::build_url(base, path)?;
                let response = self.client.get(url.clone()).send().await.map_err(|err| {
                    Error::Resource(format!("failed to fetch \"{}\": {}", url, err))
                })?;
                if !response.status().is_success() {
                    return Err(Error::Resource(format!(
                        "failed to fetch \"{}\": HTTP {}",
                        url,
                        response.status()
                    )));
                }
                let bytes = response.bytes().await.map_err(|err| {
                    Error::Resource(format!("failed to read \"{}\": {}", url, err))
                })?;
                Ok(bytes.to_vec())
            }
            ResourceSource::Local(dir) => {
                let full = dir.join(path);
                fs::read(&full).await.map_err(|err| {
                    Error::Resource(format!("failed to read \"{}\": {}", full.display(), err))
                })
            }
        }
    }

    /// Fetch a file below the source root as UTF-8 text
    pub async fn fetch_text(&self, path: &str) -> Result<String> {
        let bytes = self.fetch_bytes(path).await?;
        String::from_utf8(bytes)
            .map_err(|_| Error::Resource(format!("\"{}\" is not valid UTF-8", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_appends_segments() {
        let base = Url::parse("https://example.com/resources").unwrap();
        let url = ResourceFetcher::build_url(&base, "assets/templates/minimal.phtml").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/resources/assets/templates/minimal.phtml"
        );
    }

    #[test]
    fn test_build_url_tolerates_trailing_slash() {
        let base = Url::parse("https://example.com/resources/").unwrap();
        let url = ResourceFetcher::build_url(&base, "manifest.yaml").unwrap();
        assert_eq!(url.as_str(), "https://example.com/resources/manifest.yaml");
    }

    #[tokio::test]
    async fn test_local_fetch_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.yaml"), "version: 0.1.0\n").unwrap();
        let fetcher = ResourceFetcher::new(
            ResourceSource::local(dir.path().to_path_buf()),
            "kindling-test",
        );
        let text = fetcher.fetch_text("manifest.yaml").await.unwrap();
        assert_eq!(text, "version: 0.1.0\n");
    }

    #[tokio::test]
    async fn test_local_fetch_missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ResourceFetcher::new(
            ResourceSource::local(dir.path().to_path_buf()),
            "kindling-test",
        );
        let result = fetcher.fetch_bytes("missing.yaml").await;
        assert!(matches!(result, Err(Error::Resource(_))));
    }
}
