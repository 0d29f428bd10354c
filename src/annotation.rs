use serde::{Deserialize, Serialize};

pub const PERSISTENCE_TAG: &str = "orm";
pub const SERIALIZATION_TAG: &str = "json";

/// Which struct tags to attach to generated fields.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationOptions {
    /// Emit `orm:"column:<name>"`, marking the first column as the primary key.
    pub persistence: bool,
    /// Emit `json:"<name>"`.
    pub serialization: bool,
}

impl AnnotationOptions {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            persistence: false,
            serialization: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            persistence: true,
            serialization: true,
        }
    }
}

/// Builds the tags for one column, persistence tag first.
///
/// The first column of a table is assumed to be its primary key. No key constraints are
/// consulted.
#[must_use]
pub fn build_annotations(
    column_name: &str,
    is_first_column: bool,
    options: AnnotationOptions,
) -> Vec<String> {
    let mut annotations = Vec::new();

    if options.persistence {
        if is_first_column {
            annotations.push(format!(
                "{PERSISTENCE_TAG}:\"column:{column_name};primary_key\""
            ));
        } else {
            annotations.push(format!("{PERSISTENCE_TAG}:\"column:{column_name}\""));
        }
    }

    if options.serialization {
        annotations.push(format!("{SERIALIZATION_TAG}:\"{column_name}\""));
    }

    annotations
}
