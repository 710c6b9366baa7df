use once_cell::sync::Lazy;
use regex::Regex;

use crate::clause::ClauseKind;
use crate::error::{Error, Result};
use crate::normalizer::collapse_whitespace;

static CONNECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:and|or)\b").unwrap());

static PREDICATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*[A-Za-z0-9=.(),*\s_']+\s*",
        r"(?:=|!=|=>|<=|<>|>|<|\s+is\s+|is\s+not\s+)",
        r"\s*[A-Za-z0-9=.,()*\s_']+\s*$"
    ))
    .unwrap()
});

static JOIN_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9.()\s_]+\s+on\s+[A-Za-z0-9.\s_()]+=[A-Za-z0-9.()\s_]+$").unwrap()
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Splits a comma separated list (select list, sources, group by, order by).
pub fn split_list(kind: ClauseKind, body: &str) -> Result<Vec<String>> {
    body.split(',')
        .map(|item| validate_item(kind, item, |item| item.is_empty(), "perhaps cause is ', ,'"))
        .collect()
}

/// Splits a where/having body on its boolean connectors, checking that every
/// part is a single comparison.
pub fn split_predicates(kind: ClauseKind, body: &str) -> Result<Vec<String>> {
    let hint = format!(
        "expected `operand (= | != | => | <= | <> | > | < | is [not]) operand` near '{}'",
        kind.keyword()
    );
    CONNECTOR
        .split(body)
        .map(|item| validate_item(kind, item, |item| !PREDICATE.is_match(item), &hint))
        .collect()
}

/// Checks a join body of the form `table [alias] on left = right`.
pub fn join_condition(body: &str) -> Result<String> {
    validate_item(
        ClauseKind::Join,
        body,
        |item| !JOIN_CONDITION.is_match(item),
        "expected `table on left = right`, check the equality condition",
    )
}

/// Parses a limit/offset body, which must be a plain decimal number.
pub fn count(kind: ClauseKind, body: &str) -> Result<u64> {
    let hint = format!("'{}' expects a non negative integer", kind.keyword());
    let digits = validate_item(kind, body, |item| !DIGITS.is_match(item), &hint)?;
    digits
        .parse::<u64>()
        .map_err(|err| Error::invalid_item(kind, format!("{} ({})", hint, err)))
}

fn validate_item(
    kind: ClauseKind,
    item: &str,
    is_invalid: impl Fn(&str) -> bool,
    hint: &str,
) -> Result<String> {
    let item = item.trim();
    if is_invalid(item) {
        log::debug!("Invalid `{}` item {:?}: {}", kind, item, hint);
        return Err(Error::invalid_item(kind, hint));
    }
    Ok(collapse_whitespace(item))
}
