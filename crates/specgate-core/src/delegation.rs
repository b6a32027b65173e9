use crate::classifier::DomainMatch;
use crate::types::Strategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub strategy: Strategy,
    pub suggested_agents: Vec<String>,
}

/// Decide the delegation strategy from already-sorted domain matches.
///
/// A domain is significant when its score reaches `threshold`. Weaker
/// matches stay visible in the classification but never earn an agent.
///
/// | matches                 | strategy | suggested agents                    |
/// |-------------------------|----------|-------------------------------------|
/// | none                    | None     | `[]`                                |
/// | fewer than 2 significant| Single   | the significant domain's agent, if any |
/// | 2+ significant          | Multi    | orchestrator, then significant agents |
pub fn resolve(matches: &[DomainMatch], threshold: usize, orchestrator: &str) -> Delegation {
    if matches.is_empty() {
        return Delegation {
            strategy: Strategy::None,
            suggested_agents: Vec::new(),
        };
    }

    let significant: Vec<&DomainMatch> =
        matches.iter().filter(|m| m.score >= threshold).collect();

    let (strategy, mut agents) = if significant.len() >= 2 {
        (Strategy::Multi, vec![orchestrator.to_string()])
    } else {
        (Strategy::Single, Vec::new())
    };

    for m in significant {
        if !agents.contains(&m.agent) {
            agents.push(m.agent.clone());
        }
    }

    Delegation {
        strategy,
        suggested_agents: agents,
    }
}
