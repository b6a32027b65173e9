use crate::document::Document;
use crate::error::{Result, SpecgateError};
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TextPredicate (data)
// ---------------------------------------------------------------------------

/// Detection rule for a structural check, as it appears in the catalog.
///
/// All patterns are regular expressions matched case-insensitively against
/// the raw document text. Nothing is parsed into a tree: headings are
/// recognised line by line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextPredicate {
    /// Document is at least `bytes` long.
    MinBytes { bytes: usize },
    /// Document has at least `lines` lines.
    MinLines { lines: usize },
    /// Some ATX heading's title matches `pattern`. With `level`, only
    /// headings with exactly that many `#` count.
    Heading {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
    },
    /// Any alternative appears anywhere in the text.
    AnyOf { patterns: Vec<String> },
    /// At least `min` lines match `pattern`.
    LineCount {
        pattern: String,
        #[serde(default = "default_line_min")]
        min: usize,
    },
    /// None of the patterns appear anywhere in the text.
    NoneOf { patterns: Vec<String> },
    All { predicates: Vec<TextPredicate> },
    Any { predicates: Vec<TextPredicate> },
}

fn default_line_min() -> usize {
    1
}

impl TextPredicate {
    pub fn heading(pattern: &str) -> Self {
        TextPredicate::Heading {
            pattern: pattern.to_string(),
            level: None,
        }
    }

    pub fn any_of(patterns: &[&str]) -> Self {
        TextPredicate::AnyOf {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn none_of(patterns: &[&str]) -> Self {
        TextPredicate::NoneOf {
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Compile every pattern once. `check` names the owning check in errors.
    pub fn compile(&self, check: &str) -> Result<CompiledPredicate> {
        let compiled = match self {
            TextPredicate::MinBytes { bytes } => CompiledPredicate::MinBytes(*bytes),
            TextPredicate::MinLines { lines } => CompiledPredicate::MinLines(*lines),
            TextPredicate::Heading { pattern, level } => CompiledPredicate::Heading {
                title: build_regex(check, pattern)?,
                level: *level,
            },
            TextPredicate::AnyOf { patterns } => {
                CompiledPredicate::AnyOf(build_set(check, patterns)?)
            }
            TextPredicate::LineCount { pattern, min } => CompiledPredicate::LineCount {
                pattern: build_regex(check, pattern)?,
                min: *min,
            },
            TextPredicate::NoneOf { patterns } => {
                CompiledPredicate::NoneOf(build_set(check, patterns)?)
            }
            TextPredicate::All { predicates } => CompiledPredicate::All(
                predicates
                    .iter()
                    .map(|p| p.compile(check))
                    .collect::<Result<Vec<_>>>()?,
            ),
            TextPredicate::Any { predicates } => CompiledPredicate::Any(
                predicates
                    .iter()
                    .map(|p| p.compile(check))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(compiled)
    }
}

fn build_regex(check: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| SpecgateError::InvalidPattern {
            check: check.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn build_set(check: &str, patterns: &[String]) -> Result<RegexSet> {
    // Compile individually first so the error names the offending pattern.
    for p in patterns {
        build_regex(check, p)?;
    }
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| SpecgateError::InvalidPattern {
            check: check.to_string(),
            pattern: patterns.join(" | "),
            reason: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CompiledPredicate (evaluation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum CompiledPredicate {
    MinBytes(usize),
    MinLines(usize),
    Heading { title: Regex, level: Option<u8> },
    AnyOf(RegexSet),
    LineCount { pattern: Regex, min: usize },
    NoneOf(RegexSet),
    All(Vec<CompiledPredicate>),
    Any(Vec<CompiledPredicate>),
}

impl CompiledPredicate {
    pub fn evaluate(&self, doc: &Document) -> bool {
        match self {
            CompiledPredicate::MinBytes(n) => doc.byte_len() >= *n,
            CompiledPredicate::MinLines(n) => doc.line_count >= *n,
            CompiledPredicate::Heading { title, level } => headings(&doc.text)
                .any(|(l, t)| level.map_or(true, |want| want == l) && title.is_match(t)),
            CompiledPredicate::AnyOf(set) => set.is_match(&doc.text),
            CompiledPredicate::LineCount { pattern, min } => {
                doc.text.lines().filter(|l| pattern.is_match(l)).count() >= *min
            }
            CompiledPredicate::NoneOf(set) => !set.is_match(&doc.text),
            CompiledPredicate::All(ps) => ps.iter().all(|p| p.evaluate(doc)),
            CompiledPredicate::Any(ps) => ps.iter().any(|p| p.evaluate(doc)),
        }
    }
}

/// Yield `(level, title)` for every Markdown ATX heading outside fenced code.
pub fn headings(text: &str) -> impl Iterator<Item = (u8, &str)> {
    let mut in_fence = false;
    text.lines().filter_map(move |line| {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            return None;
        }
        if in_fence {
            return None;
        }
        parse_heading(trimmed)
    })
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((hashes as u8, rest.trim().trim_end_matches('#').trim_end()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;

    fn doc(text: &str) -> Document {
        Document::new(DocumentType::Spec, text)
    }

    fn eval(p: TextPredicate, text: &str) -> bool {
        p.compile("test").unwrap().evaluate(&doc(text))
    }

    #[test]
    fn headings_skip_code_fences() {
        let text = "# Title\n```\n# not a heading\n```\n## Overview ##\n#hashtag\n";
        let found: Vec<_> = headings(text).collect();
        assert_eq!(found, vec![(1, "Title"), (2, "Overview")]);
    }

    #[test]
    fn heading_respects_level() {
        let p = TextPredicate::Heading {
            pattern: ".+".to_string(),
            level: Some(1),
        };
        assert!(eval(p.clone(), "# Feature Spec\n"));
        assert!(!eval(p, "## Only a subsection\n"));
    }

    #[test]
    fn heading_is_case_insensitive() {
        assert!(eval(TextPredicate::heading("overview"), "## OVERVIEW\n"));
        assert!(!eval(TextPredicate::heading("overview"), "The overview is below\n"));
    }

    #[test]
    fn any_of_and_none_of() {
        let text = "Given a user, when they log in, then it works.";
        assert!(eval(TextPredicate::any_of(&[r"\bgiven\b", "acceptance"]), text));
        assert!(eval(TextPredicate::none_of(&[r"\bTODO\b"]), text));
        assert!(!eval(TextPredicate::none_of(&[r"\bwhen\b"]), text));
    }

    #[test]
    fn line_count_threshold() {
        let p = TextPredicate::LineCount {
            pattern: r"^\s*[-*]\s+\[[ xX]\]".to_string(),
            min: 2,
        };
        assert!(eval(p.clone(), "- [ ] one\n- [x] two\n"));
        assert!(!eval(p, "- [ ] one\n- two\n"));
    }

    #[test]
    fn size_predicates() {
        assert!(eval(TextPredicate::MinBytes { bytes: 3 }, "abc"));
        assert!(!eval(TextPredicate::MinBytes { bytes: 4 }, "abc"));
        assert!(eval(TextPredicate::MinLines { lines: 2 }, "a\nb\n"));
        assert!(!eval(TextPredicate::MinLines { lines: 1 }, ""));
    }

    #[test]
    fn combinators() {
        let all = TextPredicate::All {
            predicates: vec![
                TextPredicate::any_of(&["alpha"]),
                TextPredicate::any_of(&["beta"]),
            ],
        };
        let any = TextPredicate::Any {
            predicates: vec![
                TextPredicate::any_of(&["alpha"]),
                TextPredicate::any_of(&["gamma"]),
            ],
        };
        assert!(eval(all.clone(), "alpha beta"));
        assert!(!eval(all, "alpha only"));
        assert!(eval(any, "alpha only"));
    }

    #[test]
    fn invalid_pattern_names_check() {
        let err = TextPredicate::any_of(&["ok", "(unclosed"])
            .compile("has_scope")
            .unwrap_err();
        match err {
            SpecgateError::InvalidPattern { check, pattern, .. } => {
                assert_eq!(check, "has_scope");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn yaml_tagged_form() {
        let yaml = "kind: line_count\npattern: '^- \\[ \\]'\n";
        let p: TextPredicate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            p,
            TextPredicate::LineCount {
                pattern: r"^- \[ \]".to_string(),
                min: 1
            }
        );
    }
}
