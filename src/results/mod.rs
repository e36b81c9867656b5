pub mod domain_result;
pub use domain_result::*;
