pub mod domain_query;
pub use domain_query::*;

pub mod entity_graph;
pub use entity_graph::*;
