use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

static MYSQL: LazyLock<TypeTable> = LazyLock::new(TypeTable::build_mysql);

/// Width/precision class of a database column type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    NarrowInt,
    Int32,
    Int64,
    Text,
    Temporal,
    Double,
    Float,
    Bytes,
}

impl TypeCategory {
    #[must_use]
    pub const fn base_type(self) -> &'static str {
        match self {
            Self::NarrowInt => "int8",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Text => "string",
            Self::Temporal => "time.Time",
            Self::Double => "float64",
            Self::Float => "float32",
            Self::Bytes => "[]byte",
        }
    }

    /// Whether a nullable column of this category is wrapped in a pointer. Byte slices are already
    /// nilable.
    #[must_use]
    pub const fn is_wrapped_when_nullable(self) -> bool {
        !matches!(self, Self::Bytes)
    }

    #[must_use]
    pub fn target_type(self, nullable: bool) -> String {
        if nullable && self.is_wrapped_when_nullable() {
            format!("*{}", self.base_type())
        } else {
            self.base_type().to_owned()
        }
    }
}

/// Lookup table from database type names to [`TypeCategory`]. Names match exactly, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    entries: HashMap<String, TypeCategory>,
}

impl TypeTable {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The MySQL table, plus the handful of synonyms SQLite DDL commonly uses.
    #[must_use]
    pub fn mysql() -> &'static Self {
        &MYSQL
    }

    fn build_mysql() -> Self {
        use TypeCategory::{Bytes, Double, Float, Int32, Int64, NarrowInt, Temporal, Text};

        Self::empty()
            .with_all(["tinyint"], NarrowInt)
            .with_all(["int", "integer", "mediumint", "smallint"], Int32)
            .with_all(["bigint"], Int64)
            .with_all(
                [
                    "char",
                    "enum",
                    "varchar",
                    "longtext",
                    "mediumtext",
                    "text",
                    "tinytext",
                ],
                Text,
            )
            .with_all(["date", "datetime", "time", "timestamp"], Temporal)
            .with_all(["decimal", "double", "real", "numeric"], Double)
            .with_all(["float"], Float)
            .with_all(
                ["binary", "blob", "longblob", "mediumblob", "varbinary"],
                Bytes,
            )
    }

    #[must_use]
    pub fn with(mut self, type_name: &str, category: TypeCategory) -> Self {
        self.entries.insert(type_name.to_lowercase(), category);
        self
    }

    #[must_use]
    pub fn with_all<'n>(
        self,
        type_names: impl IntoIterator<Item = &'n str>,
        category: TypeCategory,
    ) -> Self {
        type_names
            .into_iter()
            .fold(self, |table, name| table.with(name, category))
    }

    #[must_use]
    pub fn category(&self, type_name: &str) -> Option<TypeCategory> {
        self.entries.get(&type_name.to_lowercase()).copied()
    }

    /// Maps a database type name to its Go representation. `None` means the type is not
    /// supported and the column should be skipped.
    #[must_use]
    pub fn map_type(&self, type_name: &str, nullable: bool) -> Option<String> {
        self.category(type_name).map(|e| e.target_type(nullable))
    }
}

#[cfg(test)]
mod test {
    use super::{TypeCategory, TypeTable};
    use proptest::prelude::*;

    fn map(type_name: &str, nullable: bool) -> Option<String> {
        TypeTable::mysql().map_type(type_name, nullable)
    }

    #[test]
    fn test_mysql_table() {
        assert_eq!(map("tinyint", false).as_deref(), Some("int8"));
        assert_eq!(map("int", false).as_deref(), Some("int32"));
        assert_eq!(map("bigint", true).as_deref(), Some("*int64"));
        assert_eq!(map("varchar", true).as_deref(), Some("*string"));
        assert_eq!(map("enum", false).as_deref(), Some("string"));
        assert_eq!(map("datetime", false).as_deref(), Some("time.Time"));
        assert_eq!(map("timestamp", true).as_deref(), Some("*time.Time"));
        assert_eq!(map("decimal", false).as_deref(), Some("float64"));
        assert_eq!(map("float", true).as_deref(), Some("*float32"));
        assert_eq!(map("blob", false).as_deref(), Some("[]byte"));
        assert_eq!(map("varbinary", true).as_deref(), Some("[]byte"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(map("VARCHAR", false).as_deref(), Some("string"));
        assert_eq!(map("BigInt", true).as_deref(), Some("*int64"));
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(map("uuid", false), None);
        assert_eq!(map("varchar(255)", false), None);
        assert_eq!(map(" int", false), None);
        assert_eq!(map("int unsigned", false), None);
    }

    #[test]
    fn test_custom_table() {
        let table = TypeTable::empty().with("UUID", TypeCategory::Text);

        assert_eq!(table.map_type("uuid", true).as_deref(), Some("*string"));
        assert_eq!(table.map_type("int", false), None);
    }

    proptest! {
        #[test]
        fn nullable_wraps_everything_but_bytes(
            type_name in prop::sample::select(vec![
                "tinyint", "int", "bigint", "char", "text", "date", "time", "double", "float",
                "binary", "blob", "longblob", "mediumblob", "varbinary",
            ])
        ) {
            let plain = map(type_name, false).unwrap_or_default();
            let nullable = map(type_name, true).unwrap_or_default();

            prop_assert!(!plain.is_empty());

            if plain == "[]byte" {
                prop_assert_eq!(nullable, plain);
            } else {
                prop_assert_eq!(nullable, format!("*{plain}"));
            }
        }

        #[test]
        fn unknown_names_are_unsupported(type_name in "[a-z]{1,12}", nullable in any::<bool>()) {
            prop_assume!(TypeTable::mysql().category(&type_name).is_none());

            prop_assert_eq!(map(&type_name, nullable), None);
        }
    }
}
