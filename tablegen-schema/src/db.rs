use dotenvy::dotenv;
use sqlparser::dialect::{Dialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    MySql,
    Postgres,
    Sqlite,
}

impl DbType {
    #[must_use]
    pub fn from_connection_string(input: &str) -> Option<Self> {
        let lower = input.to_lowercase();

        if lower.starts_with("postgres") {
            Some(Self::Postgres)
        } else if lower.starts_with("sqlite") {
            Some(Self::Sqlite)
        } else if lower.starts_with("mysql") || lower.starts_with("mariadb") {
            Some(Self::MySql)
        } else {
            None
        }
    }

    /// The SQL dialect used to parse DDL produced by this kind of database.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::MySql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

/// Attempt to retrieve the database URL from the `DATABASE_URL` environment variable, or from a
/// corresponding `.env` file.
#[must_use]
pub fn get_database_url() -> Option<String> {
    let _ = dotenv();

    std::env::var("DATABASE_URL").ok()
}
