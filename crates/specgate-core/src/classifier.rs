use crate::catalog::{DomainSpec, PatternCatalog};
use crate::config::DelegationConfig;
use crate::delegation::{self, Delegation};
use crate::error::Result;
use crate::keyword::{FoldedText, Keyword};
use crate::types::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// DomainMatch / ClassificationResult (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMatch {
    pub domain: String,
    /// Distinct keywords from this domain found at least once.
    pub score: usize,
    pub agent: String,
    /// The matched keywords, in catalog order.
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Sorted by score descending, then domain name ascending.
    pub matches: Vec<DomainMatch>,
    pub strategy: Strategy,
    pub suggested_agents: Vec<String>,
}

impl ClassificationResult {
    pub fn domain_count(&self) -> usize {
        self.matches.len()
    }

    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(|m| m.score).sum()
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

struct CompiledDomain {
    name: String,
    agent: String,
    keywords: Vec<Keyword>,
}

pub struct Classifier {
    domains: Vec<CompiledDomain>,
    orchestrator: String,
    threshold: usize,
}

impl Classifier {
    pub fn new(catalog: &PatternCatalog, config: &DelegationConfig) -> Result<Self> {
        let domains = catalog
            .domains
            .iter()
            .map(compile_domain)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            domains,
            orchestrator: catalog.orchestrator_agent.clone(),
            threshold: config.significance_threshold,
        })
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        let folded = FoldedText::new(text);

        let mut matches: Vec<DomainMatch> = self
            .domains
            .iter()
            .filter_map(|domain| match_domain(domain, &folded))
            .collect();
        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.domain.cmp(&b.domain)));

        let Delegation {
            strategy,
            suggested_agents,
        } = delegation::resolve(&matches, self.threshold, &self.orchestrator);

        tracing::debug!(
            domains = matches.len(),
            strategy = %strategy,
            agents = ?suggested_agents,
            "classified text"
        );

        ClassificationResult {
            matches,
            strategy,
            suggested_agents,
        }
    }
}

/// Keywords are case-folded before deduplication, so `API` and `api`
/// listed twice in a catalog still count once.
fn compile_domain(spec: &DomainSpec) -> Result<CompiledDomain> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for raw in &spec.keywords {
        if let Some(keyword) = Keyword::compile(&spec.name, raw)? {
            if seen.insert(keyword.as_str().to_string()) {
                keywords.push(keyword);
            }
        }
    }
    Ok(CompiledDomain {
        name: spec.name.clone(),
        agent: spec.agent.clone(),
        keywords,
    })
}

fn match_domain(domain: &CompiledDomain, text: &FoldedText) -> Option<DomainMatch> {
    let matched: Vec<String> = domain
        .keywords
        .iter()
        .filter(|k| k.is_match(text))
        .map(|k| k.as_str().to_string())
        .collect();

    if matched.is_empty() {
        return None;
    }
    Some(DomainMatch {
        domain: domain.name.clone(),
        score: matched.len(),
        agent: domain.agent.clone(),
        matched_keywords: matched,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
