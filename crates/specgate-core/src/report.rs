//! Rendering of validation reports and classification results.
//!
//! This is also the only place where a business status is turned into a
//! process exit code.

use crate::classifier::ClassificationResult;
use crate::error::Result;
use crate::types::{Severity, Status};
use crate::validator::ValidationReport;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAIL: i32 = 1;
pub const EXIT_WARN: i32 = 2;

/// `0` pass, `1` fail, `2` warn only under strict mode.
pub fn exit_code(status: Status, strict: bool) -> i32 {
    match status {
        Status::Pass => EXIT_OK,
        Status::Fail => EXIT_FAIL,
        Status::Warn if strict => EXIT_WARN,
        Status::Warn => EXIT_OK,
    }
}

// ---------------------------------------------------------------------------
// JSON shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ValidationJson<'a> {
    pub status: Status,
    pub score: u32,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub info: usize,
    pub total: usize,
    pub document_type: &'a str,
    pub line_count: usize,
    pub strict: bool,
    pub checks: Vec<CheckJson<'a>>,
    pub recommendations: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct CheckJson<'a> {
    pub id: &'a str,
    pub severity: Severity,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ClassificationJson<'a> {
    pub strategy: crate::types::Strategy,
    pub domain_count: usize,
    pub total_matches: usize,
    pub domains: Vec<DomainJson<'a>>,
    pub suggested_agents: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct DomainJson<'a> {
    pub domain: &'a str,
    pub score: usize,
    pub agent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<&'a [String]>,
}

impl<'a> ValidationJson<'a> {
    pub fn new(report: &'a ValidationReport, verbose: bool) -> Self {
        Self {
            status: report.status,
            score: report.score,
            passed: report.passed_count(),
            failed: report.failed_count(),
            warnings: report.warning_count(),
            info: report.info_count(),
            total: report.total(),
            document_type: report.doc_type.as_str(),
            line_count: report.line_count,
            strict: report.strict,
            checks: report
                .results
                .iter()
                .map(|r| CheckJson {
                    id: &r.check_id,
                    severity: r.severity,
                    passed: r.passed,
                    description: verbose.then_some(r.description.as_str()),
                })
                .collect(),
            recommendations: &report.recommendations,
        }
    }
}

impl<'a> ClassificationJson<'a> {
    pub fn new(result: &'a ClassificationResult, verbose: bool) -> Self {
        Self {
            strategy: result.strategy,
            domain_count: result.domain_count(),
            total_matches: result.total_matches(),
            domains: result
                .matches
                .iter()
                .map(|m| DomainJson {
                    domain: &m.domain,
                    score: m.score,
                    agent: &m.agent,
                    keywords: verbose.then_some(m.matched_keywords.as_slice()),
                })
                .collect(),
            suggested_agents: &result.suggested_agents,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub fn format_validation(report: &ValidationReport, mode: OutputMode, verbose: bool) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(&ValidationJson::new(
            report, verbose,
        ))?),
        OutputMode::Human => Ok(human_validation(report, verbose)),
    }
}

pub fn format_classification(
    result: &ClassificationResult,
    mode: OutputMode,
    verbose: bool,
) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(&ClassificationJson::new(
            result, verbose,
        ))?),
        OutputMode::Human => Ok(human_classification(result, verbose)),
    }
}

fn human_validation(report: &ValidationReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} validation: {} (score {}/100)",
        report.doc_type.label(),
        report.status.as_str().to_uppercase(),
        report.score
    );
    let _ = writeln!(
        out,
        "  {} passed, {} failed, {} warnings, {} informational ({} checks, {} lines)",
        report.passed_count(),
        report.failed_count(),
        report.warning_count(),
        report.info_count(),
        report.total(),
        report.line_count,
    );

    let shown: Vec<_> = report
        .results
        .iter()
        .filter(|r| verbose || !r.passed)
        .collect();
    if !shown.is_empty() {
        let id_width = shown.iter().map(|r| r.check_id.len()).max().unwrap_or(0);
        out.push_str("\nChecks:\n");
        for r in shown {
            let mark = if r.passed { "✓" } else { "✗" };
            let _ = writeln!(
                out,
                "  {mark} {:<13} {:<id_width$}  {}",
                format!("[{}]", r.severity),
                r.check_id,
                r.description,
            );
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &report.recommendations {
            let _ = writeln!(out, "  - {rec}");
        }
    }

    if report.status == Status::Warn {
        let _ = writeln!(
            out,
            "\nStrict mode: {} recommended check(s) failed.",
            report.warning_count()
        );
    }
    out
}

fn human_classification(result: &ClassificationResult, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Strategy: {}", result.strategy);

    if result.matches.is_empty() {
        out.push_str("No domain keywords matched.\n");
        return out;
    }

    let name_width = result
        .matches
        .iter()
        .map(|m| m.domain.len())
        .max()
        .unwrap_or(0)
        .max("DOMAIN".len());
    let _ = writeln!(
        out,
        "Domains ({} matched, {} keyword hits):",
        result.domain_count(),
        result.total_matches()
    );
    for m in &result.matches {
        let _ = write!(out, "  {:<name_width$}  {:>3}  {}", m.domain, m.score, m.agent);
        if verbose {
            let _ = write!(out, "  [{}]", m.matched_keywords.join(", "));
        }
        out.push('\n');
    }

    if result.suggested_agents.is_empty() {
        out.push_str("Suggested agents: (none)\n");
    } else {
        let _ = writeln!(
            out,
            "Suggested agents: {}",
            result.suggested_agents.join(", ")
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
