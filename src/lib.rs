pub mod annotation;
pub mod error;
pub mod field;
pub mod ident;
pub mod mapping;
pub mod model;

pub use annotation::AnnotationOptions;
pub use error::{Error, Result};
pub use field::{ColumnDescriptor, FieldDeclaration};
pub use ident::{IdentifierFormatter, Initialisms};
pub use mapping::{TypeCategory, TypeTable};
pub use model::{ModelBuilder, ModelInfo};
