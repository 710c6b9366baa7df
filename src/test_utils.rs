use std::fmt::Display;

use serde::Deserialize;

pub const DECOMPOSER_TESTS_FILE: &str = "tests/decomposer_tests.toml";

/// Expected clauses of one statement. Clauses left out are not checked.
#[derive(Deserialize, Debug, Clone)]
pub struct TestDecomposition {
    pub sql: String,
    pub columns: Option<Vec<String>>,
    pub source: Option<Vec<String>>,
    pub joins: Option<Vec<String>>,
    pub where_clauses: Option<Vec<String>>,
    pub having_clauses: Option<Vec<String>>,
    pub group_by_columns: Option<Vec<String>>,
    pub sort_columns: Option<Vec<String>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub subqueries: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TestDecompositionData {
    pub tests: Vec<TestDecomposition>,
}

impl Display for TestDecompositionData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
