#![allow(dead_code)]

pub mod fixtures;
pub mod http;
pub mod pdf_assertions;

use folio::{DocumentPipeline, FolioConfig, PipelineBuilder};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A throwaway templates/assets/storage layout with a config pointing at it.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: FolioConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        init_logger();
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = FolioConfig::default();
        config.templates.dir = dir.path().join("templates");
        config.assets.dir = dir.path().join("assets");
        config.storage.dir = dir.path().join("generated");
        std::fs::create_dir_all(&config.templates.dir).expect("templates dir");
        std::fs::create_dir_all(&config.assets.dir).expect("assets dir");
        Self { dir, config }
    }

    pub fn with_config(mut self, edit: impl FnOnce(&mut FolioConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    pub fn write_report(&self, organization_id: &str, report_id: &str, tree: &Value) {
        self.write(
            &self
                .config
                .templates
                .dir
                .join(organization_id)
                .join(format!("{}.json", report_id)),
            tree,
        );
    }

    pub fn write_named(&self, name: &str, tree: &Value) {
        self.write(&self.config.templates.dir.join(format!("{}.json", name)), tree);
    }

    pub fn write_asset(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.config.assets.dir.join(name), bytes).expect("write asset");
    }

    pub fn storage_dir(&self) -> &Path {
        &self.config.storage.dir
    }

    /// Every file below the storage root.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.push(path);
                }
            }
        }
        let mut files = Vec::new();
        walk(self.storage_dir(), &mut files);
        files.sort();
        files
    }

    pub fn pipeline(&self) -> DocumentPipeline {
        PipelineBuilder::from_config(self.config.clone())
            .build()
            .expect("pipeline builds")
    }

    fn write(&self, path: &Path, tree: &Value) {
        std::fs::create_dir_all(path.parent().expect("parent")).expect("template dir");
        std::fs::write(path, serde_json::to_vec_pretty(tree).expect("json")).expect("write template");
    }
}
