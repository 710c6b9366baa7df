use once_cell::sync::Lazy;
use regex::Regex;

use crate::clause::ClauseKind;
use crate::locator;
use crate::normalizer::collapse_whitespace;

static PAREN_EDGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*|\s*\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubqueryRecord {
    /// Fragment as written, parentheses included.
    pub raw: String,
    /// Fragment without parentheses, whitespace collapsed.
    pub text: String,
}

impl SubqueryRecord {
    fn new(raw: &str) -> Self {
        let unwrapped = PAREN_EDGE.replace_all(raw, "");
        Self {
            raw: raw.to_owned(),
            text: collapse_whitespace(&unwrapped),
        }
    }
}

/// The subqueries of a statement and the statement with all of them cut out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isolated {
    pub subqueries: Vec<SubqueryRecord>,
    pub subquery_free: String,
}

pub fn isolate(query: &str) -> Isolated {
    let subqueries: Vec<SubqueryRecord> = locator::find_all(ClauseKind::Subquery, query)
        .iter()
        .map(|found| SubqueryRecord::new(found.as_str()))
        .collect();

    let mut subquery_free = query.to_owned();
    for subquery in subqueries.iter().rev() {
        log::trace!("Removing subquery: {}", subquery.raw);
        subquery_free = subquery_free.replace(&subquery.raw, "");
    }

    Isolated {
        subqueries,
        subquery_free,
    }
}
