//! Keyword matching used by the domain classifier.
//!
//! Single-word keywords match whole words only, so `test` does not match
//! inside `testify`. Keywords containing whitespace are phrases and match as
//! plain substrings of the lower-cased text.

use crate::error::{Result, SpecgateError};
use regex::{Regex, RegexBuilder};

/// Text lower-cased once so many keywords can be checked against it.
#[derive(Debug, Clone)]
pub struct FoldedText {
    folded: String,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        Self {
            folded: text.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Word(Regex),
    Phrase,
}

/// A catalog keyword compiled for repeated lookups.
#[derive(Debug, Clone)]
pub struct Keyword {
    keyword: String,
    matcher: Matcher,
}

impl Keyword {
    /// Compile one keyword. Blank keywords yield `None`. `owner` names the
    /// domain in errors.
    pub fn compile(owner: &str, raw: &str) -> Result<Option<Self>> {
        let keyword = raw.trim().to_lowercase();
        if keyword.is_empty() {
            return Ok(None);
        }
        let matcher = if keyword.chars().any(char::is_whitespace) {
            Matcher::Phrase
        } else {
            let pattern = format!(r"\b{}\b", regex::escape(&keyword));
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| SpecgateError::InvalidPattern {
                    check: format!("domains.{owner}"),
                    pattern,
                    reason: e.to_string(),
                })?;
            Matcher::Word(regex)
        };
        Ok(Some(Self { keyword, matcher }))
    }

    pub fn as_str(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, text: &FoldedText) -> bool {
        match &self.matcher {
            Matcher::Word(regex) => regex.is_match(&text.folded),
            Matcher::Phrase => text.folded.contains(&self.keyword),
        }
    }
}
