use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, DataType, ObjectNamePart};
use tablegen::ColumnDescriptor;

#[derive(Debug, Clone)]
pub struct SqlColumn {
    pub name: String,
    pub column_type: DataType,
    pub nullable: bool,
}

impl SqlColumn {
    /// The bare, lower-cased type name with any length, precision or member list removed, e.g.
    /// `varchar` for `VARCHAR(255)` and `enum` for `ENUM('a', 'b')`.
    #[must_use]
    pub fn type_name(&self) -> String {
        let rendered = self.column_type.to_string();

        rendered
            .split_once('(')
            .map_or(rendered.as_str(), |(name, _)| name)
            .trim()
            .to_lowercase()
    }
}

impl From<&ColumnDef> for SqlColumn {
    fn from(value: &ColumnDef) -> Self {
        let primary_key = value.options.iter().any(|e| {
            matches!(
                e.option,
                ColumnOption::Unique {
                    is_primary: true,
                    characteristics: _,
                }
            )
        });

        Self {
            name: value.name.value.clone(),
            column_type: value.data_type.clone(),
            nullable: value
                .options
                .iter()
                .find_map(|e| {
                    if let ColumnOption::Null = e.option {
                        Some(true)
                    } else if let ColumnOption::NotNull = e.option {
                        Some(false)
                    } else {
                        None
                    }
                })
                .unwrap_or(!primary_key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlTable {
    pub name: String,
    pub columns: Vec<SqlColumn>,
}

impl SqlTable {
    /// Column metadata in declaration order.
    #[must_use]
    pub fn column_descriptors(&self) -> Vec<ColumnDescriptor> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, e)| ColumnDescriptor::new(e.name.clone(), e.type_name(), e.nullable, i))
            .collect()
    }
}

impl From<&CreateTable> for SqlTable {
    fn from(create_table: &CreateTable) -> Self {
        Self {
            name: create_table
                .name
                .0
                .iter()
                .map(|e| {
                    let ObjectNamePart::Identifier(ident) = e;

                    ident.value.clone()
                })
                .next_back()
                .unwrap_or_default(),
            columns: create_table.columns.iter().map(SqlColumn::from).collect(),
        }
    }
}
