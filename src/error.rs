use std::fmt;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Struct,
    Field,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.write_str("struct"),
            Self::Field => f.write_str("field"),
        }
    }
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{kind} name derived from `{raw}` is empty")]
    EmptyIdentifier { kind: IdentifierKind, raw: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
