use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The syntactic sections of a SELECT statement that can be extracted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    Select,
    From,
    Join,
    Where,
    Having,
    GroupBy,
    OrderBy,
    Limit,
    Offset,
    Subquery,
}

impl ClauseKind {
    /// Keyword text that opens the clause, as written in SQL.
    pub fn keyword(&self) -> &'static str {
        match self {
            ClauseKind::Select => "select",
            ClauseKind::From => "from",
            ClauseKind::Join => "join",
            ClauseKind::Where => "where",
            ClauseKind::Having => "having",
            ClauseKind::GroupBy => "group by",
            ClauseKind::OrderBy => "order by",
            ClauseKind::Limit => "limit",
            ClauseKind::Offset => "offset",
            ClauseKind::Subquery => "(select",
        }
    }

    /// Whether the clause is located on the query with its subqueries removed,
    /// so that keywords of a nested select cannot be taken for the outer ones.
    pub fn scans_subquery_free(&self) -> bool {
        matches!(self, ClauseKind::Where | ClauseKind::Having)
    }
}

/// Span of one located clause body inside the text it was found in.
#[derive(Debug, Clone, Copy)]
pub struct ClauseMatch<'a> {
    pub kind: ClauseKind,
    pub start: usize,
    pub end: usize,
    haystack: &'a str,
}

impl<'a> ClauseMatch<'a> {
    pub(crate) fn new(kind: ClauseKind, haystack: &'a str, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            haystack,
        }
    }

    pub fn as_str(&self) -> &'a str {
        &self.haystack[self.start..self.end]
    }
}
