//! Image embedding.
//!
//! An image reference is a `data:` URL, an `http(s)://` URL or a filesystem path. The
//! resolver turns each into a `data:` URL so the finished document carries every image
//! inline. Resolution is best effort: any failure yields `None` and is only logged.

use crate::mime::{mime_for_path, to_data_url};
use folio_traits::ResourceProvider;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const FALLBACK_REMOTE_MIME: &str = "image/png";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ImageResolver {
    client: reqwest::Client,
    assets: Arc<dyn ResourceProvider>,
}

impl fmt::Debug for ImageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageResolver")
            .field("assets", &self.assets.name())
            .finish_non_exhaustive()
    }
}

impl ImageResolver {
    pub fn new(
        assets: Arc<dyn ResourceProvider>,
        options: &FetchOptions,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client, assets))
    }

    pub fn with_client(client: reqwest::Client, assets: Arc<dyn ResourceProvider>) -> Self {
        Self { client, assets }
    }

    /// Resolves one reference to a `data:` URL.
    ///
    /// Data URLs come back unchanged. Remote images take the response's content type,
    /// or `image/png` when it has none. Local files are typed by extension.
    pub async fn resolve(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference?;
        if reference.starts_with("data:image/") {
            return Some(reference.to_string());
        }

        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return self.fetch_remote(reference).await;
        }
        self.read_local(reference).await
    }

    async fn fetch_remote(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Image fetch failed for {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            log::warn!("Image fetch for {} returned {}", url, response.status());
            return None;
        }
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(FALLBACK_REMOTE_MIME)
            .to_string();
        match response.bytes().await {
            Ok(body) => Some(to_data_url(&mime, &body)),
            Err(e) => {
                log::warn!("Reading image body from {} failed: {}", url, e);
                None
            }
        }
    }

    async fn read_local(&self, path: &str) -> Option<String> {
        let mime = mime_for_path(path);
        let bytes = if Path::new(path).is_absolute() {
            tokio::fs::read(path).await.map_err(|e| e.to_string())
        } else {
            let assets = Arc::clone(&self.assets);
            let relative = path.to_string();
            match tokio::task::spawn_blocking(move || assets.load(&relative)).await {
                Ok(Ok(data)) => Ok(data.to_vec()),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(e.to_string()),
            }
        };
        match bytes {
            Ok(bytes) => Some(to_data_url(mime, &bytes)),
            Err(message) => {
                log::debug!("Image '{}' could not be read: {}", path, message);
                None
            }
        }
    }

    /// Resolves every reference concurrently. Results line up with the input positions.
    pub async fn resolve_batch(&self, references: Vec<Option<String>>) -> Vec<Option<String>> {
        let mut results = vec![None; references.len()];
        let mut tasks = JoinSet::new();
        for (index, reference) in references.into_iter().enumerate() {
            let resolver = self.clone();
            tasks.spawn(async move { (index, resolver.resolve(reference.as_deref()).await) });
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, resolved)) => results[index] = resolved,
                Err(e) => log::warn!("Image resolution task failed: {}", e),
            }
        }
        results
    }

    /// Returns a copy of `node` where each `"image": "<reference>"` entry holds a data URL.
    ///
    /// References that fail to resolve are left as they were, so the renderer can still
    /// look them up itself (for example in the document's `images` dictionary).
    pub async fn resolve_images_in_tree(&self, node: &Value) -> Value {
        let mut references = BTreeSet::new();
        collect_image_references(node, &mut references);
        if references.is_empty() {
            return node.clone();
        }
        let resolved = self.resolve_all(references).await;
        replace_image_references(node, &resolved)
    }

    /// Resolves the values of an `images` dictionary, keeping unresolvable entries as is.
    pub async fn resolve_image_dictionary(&self, images: &Map<String, Value>) -> Map<String, Value> {
        let references: BTreeSet<String> = images
            .values()
            .filter_map(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .collect();
        let resolved = self.resolve_all(references).await;
        images
            .iter()
            .map(|(name, value)| {
                let value = value
                    .as_str()
                    .and_then(|r| resolved.get(r))
                    .map(|url| Value::String(url.clone()))
                    .unwrap_or_else(|| value.clone());
                (name.clone(), value)
            })
            .collect()
    }

    async fn resolve_all(&self, references: BTreeSet<String>) -> HashMap<String, String> {
        let references: Vec<String> = references.into_iter().collect();
        let results = self
            .resolve_batch(references.iter().cloned().map(Some).collect())
            .await;
        references
            .into_iter()
            .zip(results)
            .filter_map(|(reference, url)| url.map(|url| (reference, url)))
            .collect()
    }
}

fn collect_image_references(node: &Value, out: &mut BTreeSet<String>) {
    match node {
        Value::Array(items) => items.iter().for_each(|n| collect_image_references(n, out)),
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(reference) if key == "image" && !reference.trim().is_empty() => {
                        if !reference.starts_with("data:image/") {
                            out.insert(reference.clone());
                        }
                    }
                    other => collect_image_references(other, out),
                }
            }
        }
        _ => {}
    }
}

fn replace_image_references(node: &Value, resolved: &HashMap<String, String>) -> Value {
    match node {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|n| replace_image_references(n, resolved))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(reference) if key == "image" => resolved
                            .get(reference)
                            .map(|url| Value::String(url.clone()))
                            .unwrap_or_else(|| value.clone()),
                        other => replace_image_references(other, resolved),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        other => other.clone(),
    }
}
