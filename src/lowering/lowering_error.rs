use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum LoweringError {
    EmptySelection,
    EmptyEntityGraph(String),
    DuplicateFetch(String),
    SubqueryArity { expected: usize, got: usize },
    RowTooShort { position: usize, len: usize },
    TypeMismatch { position: usize, expected: String },
    Config(String),
    Io(String),
}

impl Display for LoweringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoweringError::EmptySelection => write!(f, "query has no selections"),
            LoweringError::EmptyEntityGraph(path) => write!(f, "entity graph '{}' maps no attributes", path),
            LoweringError::DuplicateFetch(path) => write!(f, "association '{}' is fetched more than once", path),
            LoweringError::SubqueryArity { expected, got } => {
                write!(f, "subquery must select {} value(s), got {}", expected, got)
            }
            LoweringError::RowTooShort { position, len } => {
                write!(f, "row has {} value(s), cannot read position {}", len, position)
            }
            LoweringError::TypeMismatch { position, expected } => {
                write!(f, "value at position {} is not a {}", position, expected)
            }
            LoweringError::Config(message) => write!(f, "invalid lowering config: {}", message),
            LoweringError::Io(message) => write!(f, "io error: {}", message),
        }
    }
}

impl std::error::Error for LoweringError {}
