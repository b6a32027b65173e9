use crate::catalog::{CompiledCheck, PatternCatalog};
use crate::config::ValidationConfig;
use crate::document::Document;
use crate::error::{Result, SpecgateError};
use crate::types::{DocumentType, Severity, Status};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// CheckResult / ValidationReport (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub severity: Severity,
    pub passed: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub doc_type: DocumentType,
    pub line_count: usize,
    pub results: Vec<CheckResult>,
    /// `round(100 * passed / total)`.
    pub score: u32,
    pub status: Status,
    pub recommendations: Vec<String>,
    pub strict: bool,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Failed required checks.
    pub fn failed_count(&self) -> usize {
        self.failed_with(Severity::Required)
    }

    /// Failed recommended checks.
    pub fn warning_count(&self) -> usize {
        self.failed_with(Severity::Recommended)
    }

    /// Failed optional checks.
    pub fn info_count(&self) -> usize {
        self.failed_with(Severity::Optional)
    }

    fn failed_with(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| !r.passed && r.severity == severity)
            .count()
    }
}

/// Half-up integer rounding of `100 * passed / total`.
pub fn score(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((200 * passed + total) / (2 * total)) as u32
}

fn recommendation(check: &CompiledCheck) -> String {
    let fix = &check.definition.remediation;
    match check.definition.severity {
        Severity::Required => format!("BLOCKING: {fix}"),
        Severity::Recommended => fix.clone(),
        Severity::Optional => format!("(optional) {fix}"),
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Structural validator over a compiled pattern catalog.
///
/// Every check for the document's type runs in catalog order, even after a
/// required check fails, so the report is always complete.
pub struct Validator {
    checks: BTreeMap<DocumentType, Vec<CompiledCheck>>,
    config: ValidationConfig,
}

impl Validator {
    /// Compile every non-empty check list. An empty list is kept as-is and
    /// only reported when a document of that type is validated.
    pub fn new(catalog: &PatternCatalog, config: ValidationConfig) -> Result<Self> {
        let mut checks = BTreeMap::new();
        for (doc_type, definitions) in &catalog.documents {
            let compiled = if definitions.is_empty() {
                Vec::new()
            } else {
                catalog.compile_checks(*doc_type)?
            };
            checks.insert(*doc_type, compiled);
        }
        Ok(Self { checks, config })
    }

    pub fn validate(&self, doc: &Document, strict: bool) -> Result<ValidationReport> {
        let checks = self
            .checks
            .get(&doc.doc_type)
            .ok_or(SpecgateError::NoCatalogEntry(doc.doc_type))?;
        if checks.is_empty() {
            return Err(SpecgateError::EmptyCheckList(doc.doc_type));
        }

        let evaluated: Vec<(&CompiledCheck, bool)> = checks
            .iter()
            .map(|check| {
                let passed = check.predicate.evaluate(doc);
                tracing::debug!(
                    check = %check.definition.id,
                    severity = %check.definition.severity,
                    passed,
                    "evaluated check"
                );
                (check, passed)
            })
            .collect();

        let results: Vec<CheckResult> = evaluated
            .iter()
            .map(|(check, passed)| CheckResult {
                check_id: check.definition.id.clone(),
                severity: check.definition.severity,
                passed: *passed,
                description: check.definition.description.clone(),
            })
            .collect();

        let recommendations = evaluated
            .iter()
            .filter(|(_, passed)| !passed)
            .map(|(check, _)| recommendation(check))
            .collect();

        let passed = results.iter().filter(|r| r.passed).count();
        let required_failed = results
            .iter()
            .any(|r| !r.passed && r.severity == Severity::Required);
        let warnings = results
            .iter()
            .filter(|r| !r.passed && r.severity == Severity::Recommended)
            .count();

        let status = if required_failed {
            Status::Fail
        } else if strict && warnings > self.config.warn_tolerance {
            Status::Warn
        } else {
            Status::Pass
        };

        Ok(ValidationReport {
            doc_type: doc.doc_type,
            line_count: doc.line_count,
            score: score(passed, results.len()),
            results,
            status,
            recommendations,
            strict,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
