pub mod navigable_path;
pub use navigable_path::*;

pub mod fetch_parent;
pub use fetch_parent::*;
