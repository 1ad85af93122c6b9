//! Where generated documents are kept.

mod filesystem;

pub use filesystem::FilesystemStorage;

use async_trait::async_trait;
use folio_traits::TemplateSelector;
use std::fmt::Debug;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no artifact at {0}")]
    NotFound(PathBuf),

    #[error("storage task failed: {0}")]
    Task(String),
}

/// The group an artifact is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageLocation {
    Report {
        organization_id: Uuid,
        report_id: Uuid,
    },
    Template(String),
}

impl StorageLocation {
    /// Path of the artifact directory below a storage root.
    pub fn relative_dir(&self) -> PathBuf {
        match self {
            StorageLocation::Report {
                organization_id,
                report_id,
            } => PathBuf::from(organization_id.to_string()).join(report_id.to_string()),
            StorageLocation::Template(name) => PathBuf::from("templates").join(name),
        }
    }
}

impl From<&TemplateSelector> for StorageLocation {
    fn from(selector: &TemplateSelector) -> Self {
        match selector {
            TemplateSelector::OrganizationReport {
                organization_id,
                report_id,
            } => StorageLocation::Report {
                organization_id: *organization_id,
                report_id: *report_id,
            },
            TemplateSelector::Named(name) => StorageLocation::Template(name.clone()),
        }
    }
}

/// Storage backend for generated documents.
#[async_trait]
pub trait ArtifactStorage: Send + Sync + Debug {
    /// Stores `bytes` as artifact `id` and returns the path it can be read back from.
    ///
    /// A failed write leaves nothing at that path.
    async fn write(
        &self,
        location: &StorageLocation,
        id: Uuid,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError>;

    async fn read(&self, location: &StorageLocation, id: Uuid) -> Result<Vec<u8>, StorageError>;

    async fn exists(&self, location: &StorageLocation, id: Uuid) -> bool;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_follow_the_selector() {
        let org = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
        let report = "0f8fad5b-d9cb-469f-a165-70867728950e";
        let selector = TemplateSelector::organization_report(org, report).unwrap();
        assert_eq!(
            StorageLocation::from(&selector).relative_dir(),
            PathBuf::from(org).join(report)
        );

        let named = TemplateSelector::named("invoice").unwrap();
        assert_eq!(
            StorageLocation::from(&named).relative_dir(),
            PathBuf::from("templates/invoice")
        );
    }
}
