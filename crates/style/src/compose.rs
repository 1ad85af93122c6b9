use crate::error::StyleError;
use crate::packs;
use crate::stylesheet::StylePack;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Layers `override_pack` over `base`.
///
/// The merge is shallow: a style name present in both packs takes the override's
/// attributes wholesale. With no override the base pack itself is returned, not a copy.
/// `template_name` is only used for diagnostics.
pub fn compose(
    template_name: &str,
    base: &Arc<StylePack>,
    override_pack: Option<&StylePack>,
) -> Arc<StylePack> {
    match override_pack {
        None => {
            log::trace!("No style pack for '{}', using base styles", template_name);
            Arc::clone(base)
        }
        Some(pack) => {
            let mut merged = StylePack::clone(base);
            for (name, style) in pack.iter() {
                merged.insert(name, style.clone());
            }
            Arc::new(merged)
        }
    }
}

/// The base pack plus every registered template pack.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    base: Arc<StylePack>,
    overrides: HashMap<String, StylePack>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StyleRegistry {
    pub fn new(base: StylePack) -> Self {
        Self {
            base: Arc::new(base),
            overrides: HashMap::new(),
        }
    }

    /// The shipped base pack and the invoice, purchase order and statement packs.
    pub fn builtin() -> Self {
        let mut registry = Self::new(packs::base());
        for (name, pack) in packs::builtin_overrides() {
            registry.register(name, pack);
        }
        registry
    }

    pub fn register(&mut self, template_name: impl Into<String>, pack: StylePack) {
        self.overrides.insert(template_name.into(), pack);
    }

    pub fn base(&self) -> &Arc<StylePack> {
        &self.base
    }

    pub fn override_for(&self, template_name: &str) -> Option<&StylePack> {
        self.overrides.get(template_name)
    }

    pub fn pack_for(&self, template_name: &str) -> Arc<StylePack> {
        compose(template_name, &self.base, self.override_for(template_name))
    }

    /// Registers every `<name>.json` file in `dir` as the pack for template `<name>`.
    ///
    /// A file named `base.json` replaces the base pack. Returns the number of packs read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, StyleError> {
        let io_err = |e: std::io::Error| StyleError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        };
        let mut loaded = 0;
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|e| StyleError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let pack = StylePack::from_json(&source)?;
            log::debug!("Loaded style pack '{}' ({} styles)", name, pack.len());
            if name == "base" {
                self.base = Arc::new(pack);
            } else {
                self.register(name, pack);
            }
            loaded += 1;
        }
        Ok(loaded)
    }
}
