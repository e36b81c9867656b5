pub mod ast;
pub use ast::{Expression, QueryPart, QuerySpec, SelectionItem, TypeDescriptor};

pub mod graph;
pub use graph::{FetchParent, NavigablePath};

pub mod query;
pub use query::{DomainQuery, DomainSelection, EntityGraph};

pub mod lowering;
pub use lowering::{LoweredSelect, LoweringConfig, LoweringError, ProcessingStateStack, QueryPartProcessingState, SelectLowering};

pub mod results;
pub use results::DomainResult;
