//! Anchored scans locating the body of each clause.
//!
//! Every pattern consumes its start keyword and captures the clause body in
//! the `body` group. Bodies are lazy, so the nearest end anchor wins, and they
//! are limited to a per-clause character class: a body running into anything
//! else is abandoned and the scan moves on to the next start keyword.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::clause::{ClauseKind, ClauseMatch};

static SELECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)select(?P<body>\s+[A-Za-z0-9.,*\s()_]+?)from").unwrap());

static FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)from(?P<body>\s+[A-Za-z0-9.,*\s()_]+?)",
        r"(?:left|right|full|join|where|offset|limit|;|group\s+by|order\s+by|\(\s*select.*\))"
    ))
    .unwrap()
});

static JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)join(?P<body>[A-Za-z0-9.(),*\s_=]+?)",
        r"(?:right|join|left|full|where|offset|limit|;|group\s+by|order\s+by)"
    ))
    .unwrap()
});

static WHERE: Lazy<Regex> = Lazy::new(|| predicate_clause("where"));

static HAVING: Lazy<Regex> = Lazy::new(|| predicate_clause("having"));

static GROUP_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)group by(?P<body>\s+[A-Za-z0-9=.,*\s_>'<!]+?)(?:order\s+by|;|limit|offset|having)",
    )
    .unwrap()
});

static ORDER_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)order by(?P<body>\s+[A-Za-z0-9=.,*\s_>'<!]+?)(?:;|limit|offset)").unwrap()
});

static LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)limit(?P<body>\s+[A-Za-z0-9=.,*\s_>'<!]+?)(?:;|offset)").unwrap()
});

static OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)offset(?P<body>\s+[A-Za-z0-9=.,*\s_>'<!]+?)(?:;|limit)").unwrap()
});

static SUBQUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<body>\(\s*select\s+[A-Za-z0-9=.,*\s_>'<!]+\))").unwrap()
});

fn predicate_clause(keyword: &str) -> Regex {
    Regex::new(&format!(
        r"(?i){}(?P<body>\s+[A-Za-z0-9=.,*\s_>()'<!]+?)(?:group\s+by|;|limit|offset|order\s+by)",
        keyword
    ))
    .unwrap()
}

fn pattern(kind: ClauseKind) -> &'static Regex {
    match kind {
        ClauseKind::Select => &*SELECT,
        ClauseKind::From => &*FROM,
        ClauseKind::Join => &*JOIN,
        ClauseKind::Where => &*WHERE,
        ClauseKind::Having => &*HAVING,
        ClauseKind::GroupBy => &*GROUP_BY,
        ClauseKind::OrderBy => &*ORDER_BY,
        ClauseKind::Limit => &*LIMIT,
        ClauseKind::Offset => &*OFFSET,
        ClauseKind::Subquery => &*SUBQUERY,
    }
}

/// Locates the first body of `kind` in `text`.
pub fn find_first(kind: ClauseKind, text: &str) -> Option<ClauseMatch<'_>> {
    find_from(kind, text, 0)
}

/// Locates every body of `kind` in `text`, left to right.
///
/// Each scan resumes where the previous body ended, so an end anchor that is
/// also a start anchor (`join ... join ...`) opens the next body.
pub fn find_all(kind: ClauseKind, text: &str) -> Vec<ClauseMatch<'_>> {
    let mut matches = vec![];
    let mut pos = 0;
    while let Some(clause_match) = find_from(kind, text, pos) {
        pos = clause_match.end;
        matches.push(clause_match);
    }
    matches
}

fn find_from(kind: ClauseKind, text: &str, pos: usize) -> Option<ClauseMatch<'_>> {
    if pos > text.len() {
        return None;
    }
    let captures = pattern(kind).captures_at(text, pos)?;
    let body = captures.name("body")?;
    log::debug!(
        "Located `{}` body at {}..{}: {:?}",
        kind,
        body.start(),
        body.end(),
        body.as_str()
    );
    Some(ClauseMatch::new(kind, text, body.start(), body.end()))
}
