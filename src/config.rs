//! Service configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. a TOML file: the path in `FOLIO_CONFIG`, or `folio.toml` in the working directory
//! 3. environment variables such as `FOLIO__STORAGE__DIR` or `FOLIO__DOCUMENT__AUTHOR`
//!
//! Relative directories in a config file are taken relative to that file.

use folio_render_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "FOLIO";
const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("config file {0} does not exist")]
    MissingFile(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub templates: TemplatesConfig,
    pub assets: AssetsConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
    pub document: DocumentConfig,
    pub engine: EngineConfig,
}

/// Where stored template definitions live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root for relative image references.
    pub dir: PathBuf,
    /// Logo used by the default header and as the `companyLogo` image, relative to `dir`.
    pub default_logo: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            default_logo: Some("demo_logo.jpg".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated_pdfs"),
        }
    }
}

/// Client settings for remote image fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Document-level values filled in when a template leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub page_size: String,
    /// Left, top, right, bottom.
    pub page_margins: [f32; 4],
    pub font: String,
    pub author: String,
    /// Add the shared header and footer to templates that define none.
    pub page_decorations: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            page_size: "A4".to_string(),
            page_margins: [40.0, 80.0, 40.0, 80.0],
            font: "Roboto".to_string(),
            author: "Folio".to_string(),
            page_decorations: true,
        }
    }
}

impl FolioConfig {
    /// Loads from the file named by `FOLIO_CONFIG`, falling back to `folio.toml` if present.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load_from(Some(Path::new(path.trim()))),
            _ => Self::load_from(None),
        }
    }

    /// Loads with an explicit config file. A named file must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => return Err(ConfigError::MissingFile(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&FolioConfig::default())?);
        if let Some(file) = &file {
            log::debug!("Loading configuration from {}", file.display());
            builder = builder.add_source(config::File::from(file.as_path()));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let mut config: FolioConfig = builder.build()?.try_deserialize()?;
        if let Some(base) = file.as_deref().and_then(Path::parent) {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }
        let dirs = [
            &mut self.templates.dir,
            &mut self.assets.dir,
            &mut self.storage.dir,
        ];
        for dir in dirs.into_iter().chain(self.engine.font_paths.iter_mut()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}
