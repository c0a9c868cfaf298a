//! Semantic checks over a parsed `.comp` document

use crate::comp::errors::CompIssue;
use crate::comp::model::{ComponentType, ParsedDocument};
use crate::comp::report::ReportBuilder;

/// Header fields every document must declare, in reporting order
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "version", "author"];

/// Properties every document must declare, in reporting order
pub const REQUIRED_PROPERTIES: [&str; 4] = ["id", "type", "model", "description"];

/// Validates required fields, the component type and per-type model hints
#[derive(Debug, Clone, Copy, Default)]
pub struct CompValidator;

impl CompValidator {
    pub fn new() -> Self {
        Self
    }

    /// Append semantic issues for the builder's document
    pub fn validate(&self, report: &mut ReportBuilder) {
        let issues = self.check(report.document());
        report.extend(issues);
    }

    /// Semantic issues for `document`, in detection order
    pub fn check(&self, document: &ParsedDocument) -> Vec<CompIssue> {
        let mut issues = Vec::new();

        for field in REQUIRED_FIELDS {
            if document.header(field).is_none_or(str::is_empty) {
                issues.push(CompIssue::MissingField { field });
            }
        }

        let properties = &document.properties;
        if properties.is_empty() {
            issues.push(CompIssue::EmptyProperties);
            return issues;
        }

        for property in REQUIRED_PROPERTIES {
            if !properties.contains_key(property) {
                issues.push(CompIssue::MissingProperty { property });
            }
        }

        let Some(declared) = properties.get("type") else {
            return issues;
        };

        let type_name = declared.to_lowercase();
        let kind = ComponentType::from_name(&type_name);
        if kind.is_none() {
            issues.push(CompIssue::InvalidComponentType { value: type_name });
        }

        // Unknown types fall through here too; none of them has a model rule.
        let model = properties.get("model").unwrap_or_default();
        if let Some(issue) = kind.and_then(|kind| check_model(kind, model)) {
            issues.push(issue);
        }

        issues
    }
}

/// Keyword heuristic on the model string for types that define one
fn check_model(kind: ComponentType, model: &str) -> Option<CompIssue> {
    let keywords = kind.model_keywords()?;
    let lowered = model.to_lowercase();
    if keywords.iter().any(|keyword| lowered.contains(keyword)) {
        return None;
    }

    let model = model.to_string();
    match kind {
        ComponentType::Processor => Some(CompIssue::UnknownProcessorBrand { model }),
        ComponentType::Graphics => Some(CompIssue::UnknownGraphicsBrand { model }),
        ComponentType::Storage => Some(CompIssue::UnknownStorageType { model }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comp::model::Properties;

    fn document(properties: &[(&str, &str)]) -> ParsedDocument {
        ParsedDocument {
            name: Some("Name".to_string()),
            version: Some("1.0".to_string()),
            author: Some("Author".to_string()),
            properties: properties.iter().copied().collect::<Properties>(),
        }
    }

    fn check(properties: &[(&str, &str)]) -> Vec<CompIssue> {
        CompValidator::new().check(&document(properties))
    }

    #[test]
    fn test_missing_header_fields_in_order() {
        let mut doc = document(&[("id", "1")]);
        doc.name = None;
        doc.author = Some(String::new());

        let issues = CompValidator::new().check(&doc);
        assert_eq!(issues[0], CompIssue::MissingField { field: "name" });
        assert_eq!(issues[1], CompIssue::MissingField { field: "author" });
    }

    #[test]
    fn test_empty_properties_short_circuits() {
        let mut doc = document(&[]);
        doc.version = None;

        let issues = CompValidator::new().check(&doc);
        assert_eq!(
            issues,
            vec![CompIssue::MissingField { field: "version" }, CompIssue::EmptyProperties]
        );
    }

    #[test]
    fn test_missing_properties_in_order_and_no_type_stops() {
        let issues = check(&[("model", "Intel")]);
        assert_eq!(
            issues,
            vec![
                CompIssue::MissingProperty { property: "id" },
                CompIssue::MissingProperty { property: "type" },
                CompIssue::MissingProperty { property: "description" },
            ]
        );
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let issues =
            check(&[("id", "1"), ("type", "PROCESSOR"), ("model", "AMD Ryzen"), ("description", "d")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_invalid_type_reports_lowercased_value() {
        let issues = check(&[("id", "1"), ("type", "GPU"), ("model", "x"), ("description", "d")]);
        assert_eq!(issues, vec![CompIssue::InvalidComponentType { value: "gpu".to_string() }]);
    }

    #[test]
    fn test_processor_brand() {
        let issues =
            check(&[("id", "1"), ("type", "processor"), ("model", "Apple M2"), ("description", "d")]);
        assert_eq!(
            issues,
            vec![CompIssue::UnknownProcessorBrand { model: "Apple M2".to_string() }]
        );
    }

    #[test]
    fn test_graphics_brand() {
        let ok = check(&[("id", "1"), ("type", "graphics"), ("model", "NVIDIA RTX 4090"), ("description", "d")]);
        assert!(ok.is_empty());

        let bad = check(&[("id", "1"), ("type", "graphics"), ("model", "Voodoo 3"), ("description", "d")]);
        assert_eq!(bad, vec![CompIssue::UnknownGraphicsBrand { model: "Voodoo 3".to_string() }]);
    }

    #[test]
    fn test_storage_keyword() {
        let ok = check(&[("id", "1"), ("type", "storage"), ("model", "Samsung 990 Pro NVMe"), ("description", "d")]);
        assert!(ok.is_empty());

        let bad = check(&[("id", "1"), ("type", "storage"), ("model", "Generic 1TB drive"), ("description", "d")]);
        assert_eq!(
            bad,
            vec![CompIssue::UnknownStorageType { model: "Generic 1TB drive".to_string() }]
        );
    }

    #[test]
    fn test_missing_model_uses_empty_string() {
        let issues = check(&[("id", "1"), ("type", "storage"), ("description", "d")]);
        assert_eq!(
            issues,
            vec![
                CompIssue::MissingProperty { property: "model" },
                CompIssue::UnknownStorageType { model: String::new() },
            ]
        );
    }

    #[test]
    fn test_types_without_model_rule() {
        for kind in ["memory", "cooling", "case", "encoder"] {
            let issues = check(&[("id", "1"), ("type", kind), ("model", "anything"), ("description", "d")]);
            assert!(issues.is_empty(), "{kind}: {issues:?}");
        }
    }
}
