use serde::Serialize;
use tracing::debug;

use crate::{
    annotation::AnnotationOptions,
    error::{Error, IdentifierKind, Result},
    field::{ColumnDescriptor, assemble_fields},
    ident::{IdentifierFormatter, Initialisms},
    mapping::TypeTable,
};

/// Everything a template needs to render one table's struct.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    package_name: String,
    struct_name: String,
    short_alias: char,
    table_name: String,
    fields: Vec<String>,
}

impl ModelInfo {
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    #[must_use]
    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    /// Lower-cased first character of the struct name, used as the method receiver.
    #[must_use]
    pub const fn short_alias(&self) -> char {
        self.short_alias
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Rendered field declarations, in column order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

fn keep_as_is(word: &str) -> String {
    word.to_owned()
}

/// Builds [`ModelInfo`]s from table metadata.
///
/// Struct names are formatted first and then passed through the singularizer, which defaults to
/// the identity.
#[derive(Clone, Copy)]
pub struct ModelBuilder<'a> {
    formatter: IdentifierFormatter<'a>,
    types: &'a TypeTable,
    singularize: &'a dyn Fn(&str) -> String,
}

impl Default for ModelBuilder<'static> {
    fn default() -> Self {
        Self::new(Initialisms::common(), TypeTable::mysql())
    }
}

impl<'a> ModelBuilder<'a> {
    #[must_use]
    pub fn new(initialisms: &'a Initialisms, types: &'a TypeTable) -> Self {
        Self {
            formatter: IdentifierFormatter::new(initialisms),
            types,
            singularize: &keep_as_is,
        }
    }

    #[must_use]
    pub fn with_singularizer(self, singularize: &'a dyn Fn(&str) -> String) -> Self {
        Self {
            singularize,
            ..self
        }
    }

    /// Derives the struct name for `struct_name_hint`.
    ///
    /// # Errors
    ///
    /// If the hint contains no word characters, or singularizes to nothing.
    pub fn struct_name(&self, struct_name_hint: &str) -> Result<String> {
        let struct_name = (self.singularize)(&self.formatter.format(struct_name_hint));

        if struct_name.is_empty() {
            return Err(Error::EmptyIdentifier {
                kind: IdentifierKind::Struct,
                raw: struct_name_hint.to_owned(),
            });
        }

        Ok(struct_name)
    }

    /// Builds the model for `table_name`.
    ///
    /// # Errors
    ///
    /// If the struct name or any kept field name formats to an empty identifier.
    pub fn build(
        &self,
        table_name: &str,
        struct_name_hint: &str,
        package_name: &str,
        columns: &[ColumnDescriptor],
        options: AnnotationOptions,
    ) -> Result<ModelInfo> {
        let struct_name = self.struct_name(struct_name_hint)?;

        let short_alias = struct_name
            .chars()
            .next()
            .and_then(|e| e.to_lowercase().next())
            .ok_or_else(|| Error::EmptyIdentifier {
                kind: IdentifierKind::Struct,
                raw: struct_name_hint.to_owned(),
            })?;

        let fields = assemble_fields(columns, &self.formatter, self.types, options)?;

        debug!(
            "Built model `{struct_name}` for table `{table_name}` with {} of {} columns",
            fields.len(),
            columns.len()
        );

        Ok(ModelInfo {
            package_name: package_name.to_owned(),
            struct_name,
            short_alias,
            table_name: table_name.to_owned(),
            fields: fields.iter().map(ToString::to_string).collect(),
        })
    }
}
