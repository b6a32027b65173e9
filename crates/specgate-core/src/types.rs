use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DocumentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Spec,
    Plan,
    #[serde(rename = "tasks", alias = "task_list")]
    TaskList,
    Freeform,
}

impl DocumentType {
    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::Spec,
            DocumentType::Plan,
            DocumentType::TaskList,
            DocumentType::Freeform,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Spec => "spec",
            DocumentType::Plan => "plan",
            DocumentType::TaskList => "tasks",
            DocumentType::Freeform => "freeform",
        }
    }

    /// Human-facing name used in report headers.
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Spec => "specification",
            DocumentType::Plan => "implementation plan",
            DocumentType::TaskList => "task list",
            DocumentType::Freeform => "freeform text",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = crate::error::SpecgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" | "specification" => Ok(DocumentType::Spec),
            "plan" => Ok(DocumentType::Plan),
            "tasks" | "task_list" | "task-list" => Ok(DocumentType::TaskList),
            "freeform" => Ok(DocumentType::Freeform),
            _ => Err(crate::error::SpecgateError::UnknownDocumentType(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Blocking level of a structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A failure blocks the document (`Status::Fail`).
    Required,
    /// A failure counts as a warning.
    Recommended,
    /// Informational only.
    Optional,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Required => "required",
            Severity::Recommended => "recommended",
            Severity::Optional => "optional",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::error::SpecgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Severity::Required),
            "recommended" => Ok(Severity::Recommended),
            "optional" => Ok(Severity::Optional),
            _ => Err(crate::error::SpecgateError::UnknownSeverity(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    Warn,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Warn => "warn",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Delegation outcome derived from the number of significant domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "single-agent")]
    Single,
    #[serde(rename = "multi-agent")]
    Multi,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::None => "none",
            Strategy::Single => "single-agent",
            Strategy::Multi => "multi-agent",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
