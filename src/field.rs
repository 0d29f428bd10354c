use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    annotation::{AnnotationOptions, build_annotations},
    error::{Error, IdentifierKind, Result},
    ident::IdentifierFormatter,
    mapping::TypeTable,
};

/// Metadata of a single table column, as reported by schema introspection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub database_type_name: String,
    pub nullable: bool,
    pub ordinal_position: usize,
}

impl ColumnDescriptor {
    pub fn new(
        name: impl Into<String>,
        database_type_name: impl Into<String>,
        nullable: bool,
        ordinal_position: usize,
    ) -> Self {
        Self {
            name: name.into(),
            database_type_name: database_type_name.into(),
            nullable,
            ordinal_position,
        }
    }
}

/// One generated struct field. Renders as `<identifier> <type>`, followed by the annotations in
/// backticks if there are any.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub identifier: String,
    pub type_repr: String,
    pub annotations: Vec<String>,
}

impl fmt::Display for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.type_repr)?;

        if !self.annotations.is_empty() {
            write!(f, " `{}`", self.annotations.join(" "))?;
        }

        Ok(())
    }
}

/// Builds field declarations for `columns` in ordinal order. Columns whose type `types` cannot
/// map are skipped.
///
/// # Errors
///
/// If a kept column's name formats to an empty identifier.
pub fn assemble_fields(
    columns: &[ColumnDescriptor],
    formatter: &IdentifierFormatter<'_>,
    types: &TypeTable,
    options: AnnotationOptions,
) -> Result<Vec<FieldDeclaration>> {
    columns
        .iter()
        .sorted_by_key(|e| e.ordinal_position)
        .enumerate()
        .filter_map(|(i, column)| {
            let Some(type_repr) = types.map_type(&column.database_type_name, column.nullable)
            else {
                warn!(
                    "Skipping column `{}`: unsupported type `{}`",
                    column.name, column.database_type_name
                );
                return None;
            };

            Some(assemble_field(column, type_repr, i == 0, formatter, options))
        })
        .collect()
}

fn assemble_field(
    column: &ColumnDescriptor,
    type_repr: String,
    is_first_column: bool,
    formatter: &IdentifierFormatter<'_>,
    options: AnnotationOptions,
) -> Result<FieldDeclaration> {
    let identifier = formatter.format(&column.name);

    if identifier.is_empty() {
        return Err(Error::EmptyIdentifier {
            kind: IdentifierKind::Field,
            raw: column.name.clone(),
        });
    }

    Ok(FieldDeclaration {
        identifier,
        type_repr,
        annotations: build_annotations(&column.name, is_first_column, options),
    })
}
