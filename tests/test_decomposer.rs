use strum::IntoEnumIterator;

use sqlclauses::{
    ClauseKind, DecomposerConfig, Error, Malformation, QueryDecomposer, SelectClauses,
    test_utils::{DECOMPOSER_TESTS_FILE, TestDecomposition, TestDecompositionData},
};

fn assert_items(
    clause: &str,
    sql: &str,
    actual: sqlclauses::Result<Vec<String>>,
    expected: &Option<Vec<String>>,
    transform: fn(&str) -> String,
) {
    if let Some(expected) = expected {
        let actual = actual
            .unwrap_or_else(|err| panic!("Could not extract {} from `{}`: {}", clause, sql, err));
        let expected = expected.iter().map(|item| transform(item)).collect::<Vec<_>>();
        assert_eq!(actual, expected, "{} of `{}`", clause, sql);
    }
}

fn test_decomposition(test: &TestDecomposition, transform: fn(&str) -> String) {
    let sql = transform(&test.sql);
    println!("Testing decomposition for SQL: {}", sql);
    let decomposer = QueryDecomposer::new(&sql)
        .unwrap_or_else(|err| panic!("Could not decompose sql due to: {:?}", &err));

    assert_items("columns", &sql, decomposer.columns(), &test.columns, transform);
    assert_items("source", &sql, decomposer.source(), &test.source, transform);
    assert_items("joins", &sql, decomposer.joins(), &test.joins, transform);
    assert_items(
        "where",
        &sql,
        decomposer.where_clauses(),
        &test.where_clauses,
        transform,
    );
    assert_items(
        "having",
        &sql,
        decomposer.having_clauses(),
        &test.having_clauses,
        transform,
    );
    assert_items(
        "group by",
        &sql,
        decomposer.group_by_columns(),
        &test.group_by_columns,
        transform,
    );
    assert_items(
        "order by",
        &sql,
        decomposer.sort_columns(),
        &test.sort_columns,
        transform,
    );
    assert_items(
        "subqueries",
        &sql,
        Ok(decomposer.subqueries()),
        &test.subqueries,
        transform,
    );
    if test.limit.is_some() {
        assert_eq!(decomposer.limit(), Ok(test.limit), "limit of `{}`", sql);
    }
    if test.offset.is_some() {
        assert_eq!(decomposer.offset(), Ok(test.offset), "offset of `{}`", sql);
    }
}

#[test]
fn test_should_decompose() {
    let decomposer_test_file =
        std::fs::read_to_string(DECOMPOSER_TESTS_FILE).expect("Cannot open decomposer test cases");
    let test_data: TestDecompositionData =
        toml::from_str(&decomposer_test_file).expect("Cannot parse test cases defined in toml");

    for test in &test_data.tests {
        test_decomposition(test, |s| s.to_owned());
        test_decomposition(test, |s| s.to_uppercase());
        test_decomposition(test, |s| s.to_lowercase());
    }
}

#[test]
fn test_should_not_construct() {
    assert_eq!(
        QueryDecomposer::new("select * from users").unwrap_err(),
        Error::MalformedStatement(Malformation::MissingTerminator)
    );
    assert_eq!(
        QueryDecomposer::new("select * from users;   \n  where").unwrap_err(),
        Error::MalformedStatement(Malformation::MissingTerminator)
    );
    assert_eq!(
        QueryDecomposer::new(" 'test string ' from  ;").unwrap_err(),
        Error::MalformedStatement(Malformation::NotASelect)
    );
    assert_eq!(
        QueryDecomposer::new("selection from t;").unwrap_err(),
        Error::MalformedStatement(Malformation::NotASelect)
    );
}

#[test]
fn test_lenient_config() {
    let decomposer =
        QueryDecomposer::with_config(" 'test string ' from  ;", &DecomposerConfig::lenient())
            .expect("lenient config accepts statements not starting with select");
    assert_eq!(
        decomposer.columns(),
        Err(Error::MissingClause(ClauseKind::Select))
    );
    assert!(
        QueryDecomposer::with_config("from t", &DecomposerConfig::lenient()).is_err(),
        "the terminator is still required"
    );

    let config: DecomposerConfig = toml::from_str("strict = false").unwrap();
    assert_eq!(config, DecomposerConfig::lenient());
    let config: DecomposerConfig = toml::from_str("").unwrap();
    assert_eq!(config, DecomposerConfig::default());
}

#[test]
fn test_missing_select_list() {
    let decomposer = QueryDecomposer::new(" select  'test string '  ;").unwrap();
    assert_eq!(
        decomposer.columns(),
        Err(Error::MissingClause(ClauseKind::Select))
    );
    assert_eq!(
        decomposer.columns().unwrap_err().to_string(),
        "Missing clause: 'select' list is not found"
    );
}

fn assert_invalid(result: sqlclauses::Result<impl std::fmt::Debug>, kind: ClauseKind) {
    match result {
        Err(Error::InvalidClauseItem { clause, .. }) => assert_eq!(clause, kind),
        other => panic!("Expected invalid `{}` item, got {:?}", kind, other),
    }
}

#[test]
fn test_should_reject_doubled_separators() {
    let decomposer = QueryDecomposer::new(" select field.name, , * from testtable;").unwrap();
    assert_invalid(decomposer.columns(), ClauseKind::Select);

    let decomposer = QueryDecomposer::new("select a, , b from t;").unwrap();
    assert_invalid(decomposer.columns(), ClauseKind::Select);

    let decomposer = QueryDecomposer::new(" SELEct * from testtable, , test;").unwrap();
    assert_invalid(decomposer.source(), ClauseKind::From);

    let decomposer =
        QueryDecomposer::new("select * from (select * from users group by id) group by id, , ;")
            .unwrap();
    assert_invalid(decomposer.group_by_columns(), ClauseKind::GroupBy);

    let decomposer =
        QueryDecomposer::new("select * from (select * from users group by id) order by id, , ;")
            .unwrap();
    assert_invalid(decomposer.sort_columns(), ClauseKind::OrderBy);
}

#[test]
fn test_should_reject_join_conditions() {
    let decomposer = QueryDecomposer::new(
        " seleCt * from table full join table3   oN table3.id == table.id order  by ... ; ",
    )
    .unwrap();
    assert_invalid(decomposer.joins(), ClauseKind::Join);

    let decomposer = QueryDecomposer::new("select * from a join b using id;").unwrap();
    assert_invalid(decomposer.joins(), ClauseKind::Join);
}

#[test]
fn test_should_reject_predicates() {
    for sql in [
        "select * from testtable where name =!! 'hello';",
        "select * from testtable where name isnot null;",
        "select * from testtable where name;",
    ] {
        let decomposer = QueryDecomposer::new(sql).unwrap();
        assert_invalid(decomposer.where_clauses(), ClauseKind::Where);
    }

    let decomposer =
        QueryDecomposer::new("select a from t group by a having count(*) >> 1;").unwrap();
    assert_invalid(decomposer.having_clauses(), ClauseKind::Having);
}

#[test]
fn test_should_reject_counts() {
    for sql in [
        "select * from (select * from users  order by id, name limit 1 where id > 1;",
        "select * from (select * from users  order by id, name limit 1a;",
        "select * from (select * from users  order by id, name limit 1.1;",
        "select * from users limit 99999999999999999999999;",
    ] {
        let decomposer = QueryDecomposer::new(sql).unwrap();
        assert_invalid(decomposer.limit(), ClauseKind::Limit);
    }
    for sql in [
        "select * from (select * from users  order by id, name offSet 1 where id > 1;",
        "select * from (select * from users  order by id, name offset 1a;",
        "select * from (select * from users  order by id, name offset 1.1;",
    ] {
        let decomposer = QueryDecomposer::new(sql).unwrap();
        assert_invalid(decomposer.offset(), ClauseKind::Offset);
    }
}

#[test]
fn test_absent_clauses() {
    let decomposer = QueryDecomposer::new("select a from t;").unwrap();
    assert_eq!(decomposer.columns(), Ok(vec!["a".to_owned()]));
    assert_eq!(decomposer.source(), Ok(vec!["t".to_owned()]));
    assert_eq!(decomposer.joins(), Ok(vec![]));
    assert_eq!(decomposer.where_clauses(), Ok(vec![]));
    assert_eq!(decomposer.having_clauses(), Ok(vec![]));
    assert_eq!(decomposer.group_by_columns(), Ok(vec![]));
    assert_eq!(decomposer.sort_columns(), Ok(vec![]));
    assert_eq!(decomposer.limit(), Ok(None));
    assert_eq!(decomposer.offset(), Ok(None));
    assert!(decomposer.subqueries().is_empty());
}

#[test]
fn test_keywords_are_case_and_whitespace_insensitive() {
    let expected = QueryDecomposer::new("SELECT a FROM b;").unwrap();
    for sql in ["select   a   from   b;", "SeLeCt a fRoM b;", "\n\tselect a\nfrom b ;\n"] {
        let decomposer = QueryDecomposer::new(sql).unwrap();
        assert_eq!(decomposer.columns(), expected.columns());
        assert_eq!(decomposer.source(), expected.source());
    }
}

#[test]
fn test_failed_accessor_keeps_decomposer_usable() {
    let decomposer = QueryDecomposer::new("select a, , b from t where x = 1 limit 2;").unwrap();
    assert_invalid(decomposer.columns(), ClauseKind::Select);
    assert_eq!(decomposer.source(), Ok(vec!["t".to_owned()]));
    assert_eq!(decomposer.where_clauses(), Ok(vec!["x = 1".to_owned()]));
    assert_eq!(decomposer.limit(), Ok(Some(2)));
}

#[test]
fn test_accessors_are_idempotent() {
    let decomposer = QueryDecomposer::new(
        "select * from (select * from u where id > 10) where hello = 'x' and id > 10 order by id limit 5;",
    )
    .unwrap();
    let first = decomposer.decompose();
    let second = decomposer.decompose();
    assert_eq!(first, second);
    assert_eq!(decomposer.subqueries(), decomposer.subqueries());
    assert_eq!(decomposer.where_clauses(), decomposer.where_clauses());
}

#[test]
fn test_subquery_free_text() {
    let decomposer =
        QueryDecomposer::new("select * from (select * from u where id > 10) where x = 1;").unwrap();
    assert_eq!(decomposer.subquery_free(), "select * from  where x = 1;");
    assert_eq!(
        decomposer.query(),
        "select * from (select * from u where id > 10) where x = 1;"
    );

    let decomposer = QueryDecomposer::new("select a from t GROUP \n  BY a  Order\tby a;").unwrap();
    assert_eq!(decomposer.query(), "select a from t GROUP BY a  Order by a;");
}

#[test]
fn test_concurrent_access() {
    let decomposer = QueryDecomposer::new(
        "select * from (select * from u where id > 10) where hello = 'x' or id < 5;",
    )
    .unwrap();
    let expected = vec!["hello = 'x'".to_owned(), "id < 5".to_owned()];
    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| decomposer.where_clauses()))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(expected.clone()));
        }
    });
}

#[test]
fn test_decomposition_json() {
    let decomposer =
        QueryDecomposer::new("select a, , b from t where x = 1 limit 10;").unwrap();
    let json = serde_json::to_value(decomposer.decompose()).unwrap();
    assert_eq!(json["limit"], serde_json::json!(10));
    assert_eq!(json["offset"], serde_json::Value::Null);
    assert_eq!(json["where_clauses"], serde_json::json!(["x = 1"]));
    assert_eq!(json["subqueries"], serde_json::json!([]));
    assert!(json["columns"]["error"].is_string());
}

#[test]
fn test_clause_kind_names() {
    assert_eq!("group_by".parse::<ClauseKind>(), Ok(ClauseKind::GroupBy));
    assert_eq!("ORDER_BY".parse::<ClauseKind>(), Ok(ClauseKind::OrderBy));
    assert_eq!(ClauseKind::GroupBy.to_string(), "group_by");
    assert_eq!(ClauseKind::GroupBy.keyword(), "group by");
    assert!("groupby".parse::<ClauseKind>().is_err());
    assert_eq!(ClauseKind::iter().count(), 10);
    for kind in ClauseKind::iter() {
        assert_eq!(kind.to_string().parse::<ClauseKind>(), Ok(kind));
    }
}
