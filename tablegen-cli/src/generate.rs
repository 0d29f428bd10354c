use std::path::{Component, Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use eyre::Context;
use futures::{StreamExt, stream::FuturesUnordered};
use itertools::Itertools;
use tablegen::{AnnotationOptions, ModelBuilder};
use tablegen_schema::db::{DbType, get_database_url};
use tracing::{error, info, warn};

use crate::{
    inflect::singularize,
    introspect::{self, TableColumns},
    render::render_model,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Mysql,
    Postgres,
    Sqlite,
}

impl From<Dialect> for DbType {
    fn from(value: Dialect) -> Self {
        match value {
            Dialect::Mysql => Self::MySql,
            Dialect::Postgres => Self::Postgres,
            Dialect::Sqlite => Self::Sqlite,
        }
    }
}

/// Generate one Go struct per table
#[derive(Parser, Debug)]
pub struct Generate {
    /// The URL to the database to generate structs for. If left unset, will be pulled from the
    /// `DATABASE_URL` environment variable, or a corresponding `.env` file instead.
    #[arg(short, long, value_name = "DATABASE_URL", conflicts_with = "schema_file")]
    database_url: Option<String>,

    /// Read `CREATE TABLE` statements from this file instead of connecting to a database.
    #[arg(long, value_name = "FILE")]
    schema_file: Option<PathBuf>,

    /// SQL dialect of the schema file.
    #[arg(long, value_enum, default_value_t = Dialect::Mysql)]
    dialect: Dialect,

    /// Tables to generate structs for, comma separated. Defaults to every table.
    #[arg(short, long, value_delimiter = ',')]
    table: Vec<String>,

    /// Package name of the generated files.
    #[arg(long, default_value = "model")]
    package: String,

    /// Directory the generated files are written to.
    #[arg(long, value_name = "DIR", default_value = "model")]
    out: PathBuf,

    /// Disable json tags.
    #[arg(long = "no-json", action = ArgAction::SetFalse)]
    json: bool,

    /// Add orm tags, marking the first column as the primary key.
    #[arg(long)]
    orm: bool,
}

impl Generate {
    pub async fn run(&self) -> eyre::Result<()> {
        let tables = self.introspect().await?;
        let tables = self.select_tables(tables)?;

        tokio::fs::create_dir_all(&self.out)
            .await
            .with_context(|| format!("Failed to create directory {}", self.out.display()))?;

        let options = AnnotationOptions {
            persistence: self.orm,
            serialization: self.json,
        };

        let total = tables.len();

        let failed = plan_outputs(&self.out, &tables)
            .into_iter()
            .map(|(table, path)| async move {
                let result = match path {
                    Ok(path) => self.generate_table(table, path, options).await,
                    Err(e) => Err(e),
                };

                match &result {
                    Ok(path) => info!("Generated {}", path.display()),
                    Err(e) => error!("Failed to generate table `{}`: {e:#}", table.name),
                }

                result
            })
            .collect::<FuturesUnordered<_>>()
            .filter(|e| std::future::ready(e.is_err()))
            .count()
            .await;

        if failed > 0 {
            return Err(eyre::eyre!("{failed} of {total} tables failed"));
        }

        Ok(())
    }

    async fn introspect(&self) -> eyre::Result<Vec<TableColumns>> {
        if let Some(schema_file) = &self.schema_file {
            return introspect::from_schema_file(schema_file, self.dialect.into()).await;
        }

        let Some(database_url) = self.database_url.clone().or_else(get_database_url) else {
            return Err(eyre::eyre!(
                "Missing database URL, either set the `DATABASE_URL` environment variable, specify it manually via --database-url [URL], or pass --schema-file [FILE]"
            ));
        };

        let Some(database_type) = DbType::from_connection_string(&database_url) else {
            return Err(eyre::eyre!(
                "Failed to determine database type from connection string, ensure it starts with either `mysql` or `sqlite`."
            ));
        };

        introspect::from_database(&database_url, database_type)
            .await
            .context("Failed to introspect database")
    }

    /// Keeps the tables named via `--table`, in the order given. Unknown names are an error.
    fn select_tables(&self, tables: Vec<TableColumns>) -> eyre::Result<Vec<TableColumns>> {
        if self.table.is_empty() {
            return Ok(tables);
        }

        self.table
            .iter()
            .map(|name| {
                tables
                    .iter()
                    .find(|e| e.name.eq(name))
                    .cloned()
                    .ok_or_else(|| eyre::eyre!("Table `{name}` does not exist"))
            })
            .collect()
    }

    async fn generate_table(
        &self,
        table: &TableColumns,
        path: PathBuf,
        options: AnnotationOptions,
    ) -> eyre::Result<PathBuf> {
        if table.columns.is_empty() {
            warn!("Table `{}` has no columns", table.name);
        }

        let model = ModelBuilder::default()
            .with_singularizer(&singularize)
            .build(
                &table.name,
                &table.name,
                &self.package,
                &table.columns,
                options,
            )
            .context("Failed to build model")?;

        let source = render_model(&model).context("Failed to render model")?;

        tokio::fs::write(&path, source)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

/// The file the struct for `table_name` is written to, directly inside `dir`.
fn output_path(dir: &Path, table_name: &str) -> eyre::Result<PathBuf> {
    let stem = singularize(table_name);
    let mut components = Path::new(&stem).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !stem.contains(['/', '\\']) => {
            Ok(dir.join(format!("{stem}.go")))
        }
        _ => Err(eyre::eyre!("Table name `{table_name}` cannot be used as a file name")),
    }
}

/// Pairs every table with the file it is written to. A table whose name is not a valid file name,
/// or whose file is also claimed by another table, gets an error instead, so that no two writes
/// ever target the same file.
fn plan_outputs<'t>(
    dir: &Path,
    tables: &'t [TableColumns],
) -> Vec<(&'t TableColumns, eyre::Result<PathBuf>)> {
    let paths = tables
        .iter()
        .map(|e| output_path(dir, &e.name))
        .collect::<Vec<_>>();

    let claims = tables
        .iter()
        .zip(&paths)
        .filter_map(|(table, path)| Some((path.as_ref().ok()?.clone(), table.name.as_str())))
        .into_group_map();

    tables
        .iter()
        .zip(paths)
        .map(|(table, path)| {
            let path = path.and_then(|path| match claims.get(&path) {
                Some(names) if names.len() > 1 => Err(eyre::eyre!(
                    "Tables {} would all be written to {}",
                    names.iter().map(|e| format!("`{e}`")).join(", "),
                    path.display()
                )),
                _ => Ok(path),
            });

            (table, path)
        })
        .collect()
}
