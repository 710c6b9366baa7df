//! # sqlclauses
//!
//! A library for splitting a single SQL SELECT statement into its clauses
//! without building a full parse tree.
//!
//! # Features
//!
//! - Extract the select list, sources, joins, where/having predicates, group by,
//!   order by, limit, offset and subqueries of a statement.
//! - Keyword matching is case-insensitive and whitespace-insensitive.
//! - Predicates of nested subqueries never leak into the outer where/having.
//! - Every extracted item is checked against the shape its clause requires.
//!
//! # Example
//!
//! ```rust
//! use sqlclauses::{QueryDecomposer, SelectClauses};
//!
//! fn main() -> anyhow::Result<()> {
//!     let sql = r#"
//!         select author.name, count(book.id)
//!         from author left join book on book.author_id = author.id
//!         where author.age > 30 and author.country = 'it'
//!         group by author.name
//!         limit 10;
//!     "#;
//!     let decomposer = QueryDecomposer::new(sql)?;
//!     assert_eq!(decomposer.columns()?, vec!["author.name", "count(book.id)"]);
//!     assert_eq!(decomposer.joins()?, vec!["book on book.author_id = author.id"]);
//!     assert_eq!(
//!         decomposer.where_clauses()?,
//!         vec!["author.age > 30", "author.country = 'it'"]
//!     );
//!     assert_eq!(decomposer.limit()?, Some(10));
//!     Ok(())
//! }
//! ```
pub mod clause;
pub mod config;
pub mod decomposer;
pub mod error;
pub mod locator;
pub mod normalizer;
pub mod splitter;
pub mod subquery;
pub mod test_utils;

pub use clause::ClauseKind;
pub use config::DecomposerConfig;
pub use decomposer::{Decomposition, QueryDecomposer, SelectClauses};
pub use error::{Error, Malformation, Result};
