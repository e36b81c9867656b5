pub mod type_descriptor;
pub use type_descriptor::*;

pub mod literal;
pub use literal::*;

pub mod column_reference;
pub use column_reference::*;

pub mod expression;
pub use expression::*;

pub mod selection_item;
pub use selection_item::*;

pub mod select_clause;
pub use select_clause::*;

pub mod table_reference;
pub use table_reference::*;

pub mod query_part;
pub use query_part::*;

pub mod clause;
pub use clause::*;
