use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::clause::ClauseKind;
use crate::config::DecomposerConfig;
use crate::error::{Error, Result};
use crate::locator;
use crate::normalizer::Query;
use crate::splitter;
use crate::subquery::{self, Isolated};

/// Clause accessors of a single SELECT statement.
pub trait SelectClauses {
    /// Items of the select list. The select list is mandatory.
    fn columns(&self) -> Result<Vec<String>>;
    /// Tables and other sources listed after `from`.
    fn source(&self) -> Result<Vec<String>>;
    /// One `table on left = right` item per join.
    fn joins(&self) -> Result<Vec<String>>;
    fn where_clauses(&self) -> Result<Vec<String>>;
    fn having_clauses(&self) -> Result<Vec<String>>;
    fn group_by_columns(&self) -> Result<Vec<String>>;
    fn sort_columns(&self) -> Result<Vec<String>>;
    fn limit(&self) -> Result<Option<u64>>;
    fn offset(&self) -> Result<Option<u64>>;
    /// Nested selects without their parentheses, in the order they appear.
    fn subqueries(&self) -> Vec<String>;
}

#[derive(Debug)]
pub struct QueryDecomposer {
    query: Query,
    isolated: OnceCell<Isolated>,
}

impl QueryDecomposer {
    pub fn new(sql: &str) -> Result<Self> {
        Self::with_config(sql, &DecomposerConfig::default())
    }

    pub fn with_config(sql: &str, config: &DecomposerConfig) -> Result<Self> {
        Ok(Self {
            query: Query::parse(sql, config)?,
            isolated: OnceCell::new(),
        })
    }

    /// The normalized statement every accessor works on.
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// The normalized statement with its subqueries cut out.
    pub fn subquery_free(&self) -> &str {
        &self.isolated().subquery_free
    }

    pub fn decompose(&self) -> Decomposition {
        Decomposition {
            columns: self.columns().into(),
            source: self.source().into(),
            joins: self.joins().into(),
            where_clauses: self.where_clauses().into(),
            having_clauses: self.having_clauses().into(),
            group_by_columns: self.group_by_columns().into(),
            sort_columns: self.sort_columns().into(),
            limit: self.limit().into(),
            offset: self.offset().into(),
            subqueries: self.subqueries(),
        }
    }

    fn isolated(&self) -> &Isolated {
        self.isolated
            .get_or_init(|| subquery::isolate(self.query.as_str()))
    }

    fn text_for(&self, kind: ClauseKind) -> &str {
        if kind.scans_subquery_free() {
            self.subquery_free()
        } else {
            self.query()
        }
    }

    fn list_clause(&self, kind: ClauseKind) -> Result<Vec<String>> {
        match locator::find_first(kind, self.text_for(kind)) {
            Some(found) => splitter::split_list(kind, found.as_str()),
            None => Ok(vec![]),
        }
    }

    fn predicate_clause(&self, kind: ClauseKind) -> Result<Vec<String>> {
        match locator::find_first(kind, self.text_for(kind)) {
            Some(found) => splitter::split_predicates(kind, found.as_str()),
            None => Ok(vec![]),
        }
    }

    fn count_clause(&self, kind: ClauseKind) -> Result<Option<u64>> {
        locator::find_first(kind, self.text_for(kind))
            .map(|found| splitter::count(kind, found.as_str()))
            .transpose()
    }
}

impl SelectClauses for QueryDecomposer {
    fn columns(&self) -> Result<Vec<String>> {
        let Some(found) = locator::find_first(ClauseKind::Select, self.query()) else {
            return Err(Error::MissingClause(ClauseKind::Select));
        };
        splitter::split_list(ClauseKind::Select, found.as_str())
    }

    fn source(&self) -> Result<Vec<String>> {
        self.list_clause(ClauseKind::From)
    }

    fn joins(&self) -> Result<Vec<String>> {
        locator::find_all(ClauseKind::Join, self.query())
            .iter()
            .map(|found| splitter::join_condition(found.as_str()))
            .collect()
    }

    fn where_clauses(&self) -> Result<Vec<String>> {
        self.predicate_clause(ClauseKind::Where)
    }

    fn having_clauses(&self) -> Result<Vec<String>> {
        self.predicate_clause(ClauseKind::Having)
    }

    fn group_by_columns(&self) -> Result<Vec<String>> {
        self.list_clause(ClauseKind::GroupBy)
    }

    fn sort_columns(&self) -> Result<Vec<String>> {
        self.list_clause(ClauseKind::OrderBy)
    }

    fn limit(&self) -> Result<Option<u64>> {
        self.count_clause(ClauseKind::Limit)
    }

    fn offset(&self) -> Result<Option<u64>> {
        self.count_clause(ClauseKind::Offset)
    }

    fn subqueries(&self) -> Vec<String> {
        self.isolated()
            .subqueries
            .iter()
            .map(|subquery| subquery.text.clone())
            .collect()
    }
}

/// Outcome of one accessor, serialized either as its value or as
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClauseOutcome<T> {
    Ok(T),
    Err { error: String },
}

impl<T> From<Result<T>> for ClauseOutcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => ClauseOutcome::Ok(value),
            Err(err) => ClauseOutcome::Err {
                error: err.to_string(),
            },
        }
    }
}

/// Every clause of a statement, each extracted independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub columns: ClauseOutcome<Vec<String>>,
    pub source: ClauseOutcome<Vec<String>>,
    pub joins: ClauseOutcome<Vec<String>>,
    pub where_clauses: ClauseOutcome<Vec<String>>,
    pub having_clauses: ClauseOutcome<Vec<String>>,
    pub group_by_columns: ClauseOutcome<Vec<String>>,
    pub sort_columns: ClauseOutcome<Vec<String>>,
    pub limit: ClauseOutcome<Option<u64>>,
    pub offset: ClauseOutcome<Option<u64>>,
    pub subqueries: Vec<String>,
}
