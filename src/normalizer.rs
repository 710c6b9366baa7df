use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DecomposerConfig;
use crate::error::{Error, Malformation, Result};

static SELECT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^select\b").unwrap());
static SPLIT_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(group|order)\s+(by)\b").unwrap());

pub const TERMINATOR: char = ';';

/// A trimmed, terminated statement with two-word keywords written with a
/// single space, so that `group by` and `order by` can be found verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(sql: &str, config: &DecomposerConfig) -> Result<Self> {
        let trimmed = sql.trim();
        if config.strict && !SELECT_PREFIX.is_match(trimmed) {
            log::debug!("Rejected statement not starting with select: {}", trimmed);
            return Err(Error::MalformedStatement(Malformation::NotASelect));
        }
        if !trimmed.ends_with(TERMINATOR) {
            log::debug!("Rejected unterminated statement: {}", trimmed);
            return Err(Error::MalformedStatement(Malformation::MissingTerminator));
        }
        Ok(Query(canonicalize_keywords(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn canonicalize_keywords(sql: &str) -> String {
    // keeps the original case of both words
    SPLIT_KEYWORD.replace_all(sql, "$1 $2").into_owned()
}

/// Collapses every whitespace run to a single space and trims both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
