use crate::error::{Result, SpecgateError};
use crate::predicate::{CompiledPredicate, TextPredicate};
use crate::types::{DocumentType, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// CheckDefinition / DomainSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckDefinition {
    pub id: String,
    pub severity: Severity,
    pub description: String,
    /// Fixed remediation text emitted as a recommendation when the check fails.
    pub remediation: String,
    pub predicate: TextPredicate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainSpec {
    pub name: String,
    pub keywords: Vec<String>,
    pub agent: String,
}

/// A check definition paired with its compiled predicate.
#[derive(Debug, Clone)]
pub struct CompiledCheck {
    pub definition: CheckDefinition,
    pub predicate: CompiledPredicate,
}

// ---------------------------------------------------------------------------
// PatternCatalog
// ---------------------------------------------------------------------------

/// Static configuration: ordered check lists per document type plus the
/// domain keyword table. Pure data; evaluation lives in the validator and
/// classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternCatalog {
    #[serde(default = "default_orchestrator")]
    pub orchestrator_agent: String,
    #[serde(default)]
    pub documents: BTreeMap<DocumentType, Vec<CheckDefinition>>,
    #[serde(default)]
    pub domains: Vec<DomainSpec>,
}

fn default_orchestrator() -> String {
    "orchestrator".to_string()
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternCatalog {
    pub fn builtin() -> Self {
        let mut documents = BTreeMap::new();
        documents.insert(DocumentType::Spec, spec_checks());
        documents.insert(DocumentType::Plan, plan_checks());
        documents.insert(DocumentType::TaskList, task_checks());
        Self {
            orchestrator_agent: default_orchestrator(),
            documents,
            domains: builtin_domains(),
        }
    }

    /// Load an external catalog. It replaces the builtin one entirely.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SpecgateError::CatalogNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&data)?;
        tracing::info!(
            path = %path.display(),
            document_types = catalog.documents.len(),
            domains = catalog.domains.len(),
            "loaded pattern catalog"
        );
        Ok(catalog)
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let catalog: PatternCatalog = serde_yaml::from_str(data)?;
        catalog.verify()?;
        Ok(catalog)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Ordered checks for a document type.
    pub fn checks_for(&self, doc_type: DocumentType) -> Result<&[CheckDefinition]> {
        let checks = self
            .documents
            .get(&doc_type)
            .ok_or(SpecgateError::NoCatalogEntry(doc_type))?;
        if checks.is_empty() {
            return Err(SpecgateError::EmptyCheckList(doc_type));
        }
        Ok(checks)
    }

    pub fn compile_checks(&self, doc_type: DocumentType) -> Result<Vec<CompiledCheck>> {
        self.checks_for(doc_type)?
            .iter()
            .map(|def| {
                Ok(CompiledCheck {
                    predicate: def.predicate.compile(&def.id)?,
                    definition: def.clone(),
                })
            })
            .collect()
    }

    pub fn domain(&self, name: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.name == name)
    }

    /// Reject empty check lists, duplicate ids and uncompilable patterns
    /// up front.
    pub fn verify(&self) -> Result<()> {
        for (doc_type, checks) in &self.documents {
            if checks.is_empty() {
                return Err(SpecgateError::EmptyCheckList(*doc_type));
            }
            let mut seen = HashSet::new();
            for check in checks {
                if !seen.insert(check.id.as_str()) {
                    return Err(SpecgateError::DuplicateId {
                        kind: "check",
                        id: format!("{doc_type}.{}", check.id),
                    });
                }
                check.predicate.compile(&check.id)?;
            }
        }
        let mut seen = HashSet::new();
        for domain in &self.domains {
            if !seen.insert(domain.name.as_str()) {
                return Err(SpecgateError::DuplicateId {
                    kind: "domain",
                    id: domain.name.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builtin check lists
// ---------------------------------------------------------------------------

macro_rules! check {
    (
        id: $id:expr,
        severity: $sev:expr,
        description: $desc:expr,
        remediation: $fix:expr,
        predicate: $pred:expr $(,)?
    ) => {
        CheckDefinition {
            id: $id.to_string(),
            severity: $sev,
            description: $desc.to_string(),
            remediation: $fix.to_string(),
            predicate: $pred,
        }
    };
}

const UNRESOLVED_MARKERS: &[&str] = &[
    r"(?-i)\bTODO\b",
    r"(?-i)\bTBD\b",
    r"(?-i)\bFIXME\b",
    r"\[NEEDS CLARIFICATION",
];

fn has_title() -> CheckDefinition {
    check! {
        id: "has_title",
        severity: Severity::Required,
        description: "Has a top-level heading",
        remediation: "Add a top-level '# Title' heading naming the document",
        predicate: TextPredicate::Heading { pattern: r"\S".to_string(), level: Some(1) },
    }
}

fn no_unresolved_markers() -> CheckDefinition {
    check! {
        id: "no_unresolved_markers",
        severity: Severity::Optional,
        description: "No TODO, TBD, FIXME or NEEDS CLARIFICATION markers remain",
        remediation: "Resolve remaining TODO/TBD/FIXME and [NEEDS CLARIFICATION] markers",
        predicate: TextPredicate::none_of(UNRESOLVED_MARKERS),
    }
}

fn spec_checks() -> Vec<CheckDefinition> {
    vec![
        check! {
            id: "has_content",
            severity: Severity::Required,
            description: "Document has substantial content (at least 500 bytes)",
            remediation: "Expand the specification; it is too short to describe a feature",
            predicate: TextPredicate::MinBytes { bytes: 500 },
        },
        has_title(),
        check! {
            id: "has_overview",
            severity: Severity::Required,
            description: "Has an overview or summary section",
            remediation: "Add an '## Overview' section summarising the feature and its purpose",
            predicate: TextPredicate::heading(r"overview|summary|introduction|purpose"),
        },
        check! {
            id: "has_requirements",
            severity: Severity::Required,
            description: "Has a requirements section",
            remediation: "Add a '## Requirements' section listing functional requirements",
            predicate: TextPredicate::heading(r"requirements?"),
        },
        check! {
            id: "has_acceptance_criteria",
            severity: Severity::Recommended,
            description: "States acceptance criteria",
            remediation: "Add acceptance criteria, ideally as Given/When/Then statements",
            predicate: TextPredicate::any_of(&[
                r"\bacceptance criteria\b",
                r"\bgiven\b[^\n]*\bwhen\b[^\n]*\bthen\b",
            ]),
        },
        check! {
            id: "has_user_stories",
            severity: Severity::Recommended,
            description: "Includes user stories",
            remediation: "Add user stories in the form 'As a <role>, I want <goal>'",
            predicate: TextPredicate::any_of(&[
                r"\buser stor(y|ies)\b",
                r"\bas an? [^\n]+?,? i want\b",
            ]),
        },
        check! {
            id: "has_non_functional",
            severity: Severity::Recommended,
            description: "Covers non-functional requirements",
            remediation: "Add a '## Non-Functional Requirements' section (performance, security, reliability)",
            predicate: TextPredicate::heading(r"non[- ]?functional|quality attributes"),
        },
        check! {
            id: "has_scope",
            severity: Severity::Recommended,
            description: "Defines scope and boundaries",
            remediation: "Add a '## Scope' section stating what is in and out of scope",
            predicate: TextPredicate::heading(r"scope|non-goals|boundaries"),
        },
        check! {
            id: "reasonable_length",
            severity: Severity::Recommended,
            description: "Has a reasonable length (at least 50 lines)",
            remediation: "Add detail: a complete specification usually runs to 50 lines or more",
            predicate: TextPredicate::MinLines { lines: 50 },
        },
        no_unresolved_markers(),
    ]
}

fn plan_checks() -> Vec<CheckDefinition> {
    vec![
        check! {
            id: "has_content",
            severity: Severity::Required,
            description: "Document has substantial content (at least 1000 bytes)",
            remediation: "Expand the plan; it is too short to guide implementation",
            predicate: TextPredicate::MinBytes { bytes: 1000 },
        },
        has_title(),
        check! {
            id: "has_technical_context",
            severity: Severity::Required,
            description: "Describes the technical context or architecture",
            remediation: "Add a '## Technical Context' section covering architecture and stack",
            predicate: TextPredicate::heading(
                r"technical context|architecture|tech(nology)? stack|technical approach",
            ),
        },
        check! {
            id: "has_phases",
            severity: Severity::Required,
            description: "Breaks the work into implementation phases",
            remediation: "Split the plan into '## Phase N' sections with clear deliverables",
            predicate: TextPredicate::heading(r"phase|milestone|implementation steps"),
        },
        check! {
            id: "has_project_structure",
            severity: Severity::Recommended,
            description: "Shows the project or file structure",
            remediation: "Add a '## Project Structure' section showing the files to create or change",
            predicate: TextPredicate::any_of(&[
                r"\bproject structure\b",
                r"\b(directory|file) (layout|structure)\b",
                r"[├└]──",
            ]),
        },
        check! {
            id: "has_testing_strategy",
            severity: Severity::Recommended,
            description: "Includes a testing strategy",
            remediation: "Add a '## Testing Strategy' section describing unit and integration coverage",
            predicate: TextPredicate::heading(r"\btest(s|ing)?\b|verification|validation"),
        },
        check! {
            id: "has_risks",
            severity: Severity::Recommended,
            description: "Identifies risks and mitigations",
            remediation: "List the main risks and how each is mitigated",
            predicate: TextPredicate::any_of(&[r"\brisks?\b", r"\bmitigations?\b"]),
        },
        check! {
            id: "has_dependencies",
            severity: Severity::Recommended,
            description: "Lists dependencies and prerequisites",
            remediation: "Document external dependencies and prerequisites for each phase",
            predicate: TextPredicate::any_of(&[
                r"\bdependenc(y|ies)\b",
                r"\bdepends on\b",
                r"\bprerequisites?\b",
            ]),
        },
        check! {
            id: "reasonable_length",
            severity: Severity::Recommended,
            description: "Has a reasonable length (at least 80 lines)",
            remediation: "Add detail: an implementation plan usually runs to 80 lines or more",
            predicate: TextPredicate::MinLines { lines: 80 },
        },
        no_unresolved_markers(),
    ]
}

fn task_checks() -> Vec<CheckDefinition> {
    vec![
        check! {
            id: "has_content",
            severity: Severity::Required,
            description: "Document has substantial content (at least 300 bytes)",
            remediation: "Expand the task list; it is too short to cover the plan",
            predicate: TextPredicate::MinBytes { bytes: 300 },
        },
        has_title(),
        check! {
            id: "uses_checkboxes",
            severity: Severity::Required,
            description: "Tasks use checkbox format ('- [ ]' or '- [x]')",
            remediation: "Write every task as a checkbox item: '- [ ] T001 Description'",
            predicate: TextPredicate::LineCount {
                pattern: r"^\s*[-*]\s+\[[ xX]\]\s+".to_string(),
                min: 1,
            },
        },
        check! {
            id: "has_task_ids",
            severity: Severity::Recommended,
            description: "Tasks carry sequential ids (T001, T002, ...)",
            remediation: "Prefix each task with a sequential id such as T001",
            predicate: TextPredicate::any_of(&[r"(?-i)\bT\d{3}\b"]),
        },
        check! {
            id: "has_phases",
            severity: Severity::Recommended,
            description: "Tasks are grouped into phases",
            remediation: "Group tasks under '## Phase N' headings",
            predicate: TextPredicate::heading(r"phase|stage|milestone"),
        },
        check! {
            id: "references_files",
            severity: Severity::Recommended,
            description: "Tasks reference concrete file paths",
            remediation: "Name the file each task touches, e.g. 'src/models/user.rs'",
            predicate: TextPredicate::any_of(&[
                r"[\w.-]+/[\w./-]+\.\w+",
                r"`[^`\s]+\.(rs|ts|tsx|js|jsx|py|go|java|kt|rb|md|sql|ya?ml|toml|json)`",
            ]),
        },
        check! {
            id: "has_dependencies",
            severity: Severity::Recommended,
            description: "States task dependencies or ordering",
            remediation: "Note which tasks depend on others, e.g. 'depends on T003'",
            predicate: TextPredicate::any_of(&[
                r"\bdepend(s|ency|encies)\b",
                r"\bblocked by\b",
                r"\bafter T\d{3}\b",
            ]),
        },
        check! {
            id: "has_parallel_markers",
            severity: Severity::Optional,
            description: "Marks tasks that can run in parallel with [P]",
            remediation: "Mark independent tasks with [P] so they can run in parallel",
            predicate: TextPredicate::any_of(&[r"\[P\]"]),
        },
        no_unresolved_markers(),
    ]
}

// ---------------------------------------------------------------------------
// Builtin domains
// ---------------------------------------------------------------------------

fn domain(name: &str, agent: &str, keywords: &[&str]) -> DomainSpec {
    DomainSpec {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        agent: agent.to_string(),
    }
}

fn builtin_domains() -> Vec<DomainSpec> {
    vec![
        domain(
            "frontend",
            "frontend-agent",
            &[
                "frontend", "front-end", "ui", "ux", "react", "vue", "angular", "svelte",
                "css", "html", "component", "layout", "responsive", "accessibility",
                "browser", "user interface",
            ],
        ),
        domain(
            "backend",
            "backend-agent",
            &[
                "backend", "back-end", "api", "server", "endpoint", "rest", "graphql",
                "microservice", "middleware", "grpc", "webhook", "business logic",
            ],
        ),
        domain(
            "database",
            "database-agent",
            &[
                "database", "sql", "schema", "migration", "postgres", "postgresql", "mysql",
                "sqlite", "mongodb", "redis", "query", "orm", "data model",
            ],
        ),
        domain(
            "security",
            "security-agent",
            &[
                "security", "auth", "authentication", "authorization", "oauth", "jwt",
                "encryption", "vulnerability", "xss", "csrf", "permission", "rbac",
                "secrets",
            ],
        ),
        domain(
            "testing",
            "testing-agent",
            &[
                "test", "tests", "testing", "unit test", "integration test", "e2e",
                "coverage", "tdd", "mock", "fixture", "qa",
            ],
        ),
        domain(
            "devops",
            "devops-agent",
            &[
                "deploy", "deployment", "docker", "kubernetes", "k8s", "ci/cd", "pipeline",
                "terraform", "helm", "infrastructure", "monitoring",
            ],
        ),
        domain(
            "performance",
            "performance-agent",
            &[
                "performance", "latency", "throughput", "cache", "caching", "optimize",
                "optimization", "profiling", "benchmark", "scalability", "load test",
            ],
        ),
        domain(
            "documentation",
            "documentation-agent",
            &[
                "documentation", "docs", "readme", "guide", "tutorial", "changelog",
                "docstring", "api reference",
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
