use sqlparser::{
    ast::Statement,
    dialect::{Dialect, SQLiteDialect},
    parser::{Parser, ParserError},
};
use thiserror::Error as ThisError;

use crate::schema::SqlTable;

#[derive(ThisError, Debug)]
pub enum SchemaError {
    #[error("Failed to parse SQL: {0}")]
    Parse(#[from] ParserError),
    #[error("No CREATE TABLE statement found")]
    NoCreateTable,
}

/// Parses every `CREATE TABLE` statement in `ddl`, in order. Other statements are ignored.
///
/// # Errors
///
/// If `ddl` is not valid SQL in `dialect`.
pub fn parse_tables(ddl: &str, dialect: &dyn Dialect) -> Result<Vec<SqlTable>, SchemaError> {
    let ast = Parser::parse_sql(dialect, ddl)?;

    Ok(ast
        .iter()
        .filter_map(|e| {
            if let Statement::CreateTable(statement) = e {
                Some(SqlTable::from(statement))
            } else {
                None
            }
        })
        .collect())
}

/// Parses the first `CREATE TABLE` statement in `query` as `SQLite` DDL.
///
/// # Errors
///
/// If `query` is not valid SQL, or contains no `CREATE TABLE` statement.
pub fn parse_create_table(query: &str) -> Result<SqlTable, SchemaError> {
    parse_tables(query, &SQLiteDialect {})?
        .into_iter()
        .next()
        .ok_or(SchemaError::NoCreateTable)
}
