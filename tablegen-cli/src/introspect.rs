use std::path::Path;

use eyre::Context;
use futures::StreamExt;
use itertools::Itertools;
use sqlx::{Connection, MySqlConnection, SqliteConnection};
use tablegen::ColumnDescriptor;
use tablegen_schema::{
    db::DbType,
    query::{parse_create_table, parse_tables},
    schema::SqlTable,
};
use tracing::debug;

/// Columns of one table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl From<&SqlTable> for TableColumns {
    fn from(table: &SqlTable) -> Self {
        Self {
            name: table.name.clone(),
            columns: table.column_descriptors(),
        }
    }
}

/// Reads every table from a DDL file.
pub async fn from_schema_file(path: &Path, db_type: DbType) -> eyre::Result<Vec<TableColumns>> {
    let ddl = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;

    let tables = parse_tables(&ddl, &*db_type.dialect())
        .with_context(|| format!("Failed to parse schema file {}", path.display()))?;

    Ok(tables.iter().map(TableColumns::from).collect())
}

pub async fn from_database(url: &str, db_type: DbType) -> eyre::Result<Vec<TableColumns>> {
    match db_type {
        DbType::MySql => introspect_mysql(url).await,
        DbType::Sqlite => introspect_sqlite(url).await,
        DbType::Postgres => Err(eyre::eyre!(
            "Postgres introspection is not supported, dump the schema and pass it via --schema-file instead"
        )),
    }
}

pub async fn introspect_sqlite(url: &str) -> eyre::Result<Vec<TableColumns>> {
    let mut conn = SqliteConnection::connect(url)
        .await
        .context("Failed to connect to database")?;

    let tables = sqlx::query_as::<_, (String, String)>(
        "SELECT name, sql FROM sqlite_schema WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch(&mut conn)
    .map(|e| match e {
        Ok((name, sql)) => {
            debug!("Parsing DDL of table `{name}`");

            parse_create_table(&sql)
                .map(|t| TableColumns::from(&t))
                .map_err(|e| eyre::eyre!("Failed to parse SQL of table `{name}`: {e}"))
        }
        Err(e) => Err(eyre::eyre!("Failed to execute DB query: {e}")),
    })
    .collect::<Vec<_>>()
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .context("Failed to gather tables")?;

    Ok(tables)
}

pub async fn introspect_mysql(url: &str) -> eyre::Result<Vec<TableColumns>> {
    let mut conn = MySqlConnection::connect(url)
        .await
        .context("Failed to connect to database")?;

    let rows = sqlx::query_as::<_, (String, String, String, String, i64)>(
        "SELECT CAST(TABLE_NAME AS CHAR), CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR),
                CAST(IS_NULLABLE AS CHAR), CAST(ORDINAL_POSITION AS SIGNED)
         FROM information_schema.columns
         WHERE table_schema = DATABASE()
         ORDER BY TABLE_NAME, ORDINAL_POSITION",
    )
    .fetch_all(&mut conn)
    .await
    .context("Failed to query information_schema")?;

    let tables = rows
        .into_iter()
        .chunk_by(|e| e.0.clone())
        .into_iter()
        .map(|(name, columns)| TableColumns {
            name,
            columns: columns
                .map(|(_, column, data_type, is_nullable, position)| {
                    ColumnDescriptor::new(
                        column,
                        data_type,
                        is_nullable.eq_ignore_ascii_case("yes"),
                        usize::try_from(position).unwrap_or_default(),
                    )
                })
                .collect(),
        })
        .collect();

    Ok(tables)
}

#[cfg(test)]
mod test {
    use super::{TableColumns, from_schema_file};
    use std::io::Write;
    use tablegen::ColumnDescriptor;
    use tablegen_schema::db::DbType;

    #[tokio::test]
    async fn test_from_schema_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            "CREATE TABLE `tags` (`id` int NOT NULL, `label` varchar(32) DEFAULT NULL);"
        )
        .expect("Failed to write temp file");

        let tables = from_schema_file(file.path(), DbType::MySql)
            .await
            .expect("Failed to read schema");

        assert_eq!(
            tables,
            vec![TableColumns {
                name: "tags".to_owned(),
                columns: vec![
                    ColumnDescriptor::new("id", "int", false, 0),
                    ColumnDescriptor::new("label", "varchar", true, 1),
                ],
            }]
        );
    }
}
