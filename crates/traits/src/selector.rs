use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("organization id '{0}' is not a valid UUID")]
    InvalidOrganizationId(String),

    #[error("report id '{0}' is not a valid UUID")]
    InvalidReportId(String),

    #[error("template name '{0}' may only contain letters, digits, '-' and '_'")]
    InvalidTemplateName(String),
}

/// Identifies which template a generation request uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateSelector {
    /// A stored report definition owned by an organization.
    OrganizationReport {
        organization_id: Uuid,
        report_id: Uuid,
    },
    /// A template addressed by name, stored or built in.
    Named(String),
}

impl TemplateSelector {
    pub fn organization_report(organization_id: &str, report_id: &str) -> Result<Self, SelectorError> {
        let organization_id = Uuid::parse_str(organization_id.trim())
            .map_err(|_| SelectorError::InvalidOrganizationId(organization_id.to_string()))?;
        let report_id = Uuid::parse_str(report_id.trim())
            .map_err(|_| SelectorError::InvalidReportId(report_id.to_string()))?;
        Ok(TemplateSelector::OrganizationReport {
            organization_id,
            report_id,
        })
    }

    pub fn named(name: &str) -> Result<Self, SelectorError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(TemplateSelector::Named(name.to_string()))
        } else {
            Err(SelectorError::InvalidTemplateName(name.to_string()))
        }
    }

    /// The name used for style lookup and document metadata when the template gives none.
    pub fn template_name(&self) -> String {
        match self {
            TemplateSelector::OrganizationReport { report_id, .. } => report_id.to_string(),
            TemplateSelector::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for TemplateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSelector::OrganizationReport {
                organization_id,
                report_id,
            } => write!(f, "organization {} report {}", organization_id, report_id),
            TemplateSelector::Named(name) => write!(f, "template '{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORG: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
    const REPORT: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    #[test]
    fn organization_report_requires_uuids() {
        let selector = TemplateSelector::organization_report(ORG, REPORT).unwrap();
        assert_eq!(selector.template_name(), REPORT);
        assert!(selector.to_string().contains(ORG));

        assert_eq!(
            TemplateSelector::organization_report("acme", REPORT),
            Err(SelectorError::InvalidOrganizationId("acme".into()))
        );
        assert_eq!(
            TemplateSelector::organization_report(ORG, "r-1"),
            Err(SelectorError::InvalidReportId("r-1".into()))
        );
    }

    #[test]
    fn named_rejects_path_characters() {
        assert_eq!(
            TemplateSelector::named("purchaseOrder").unwrap(),
            TemplateSelector::Named("purchaseOrder".into())
        );
        assert!(TemplateSelector::named("").is_err());
        assert!(TemplateSelector::named("../etc").is_err());
        assert!(TemplateSelector::named("a/b").is_err());
    }
}
