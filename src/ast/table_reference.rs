use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableReference {
    /// table name or derived table text
    pub table_expression: String,
    /// alias used to qualify columns, e.g. `p1_0`
    pub identification_variable: String,
}

impl TableReference {
    pub fn new(table_expression: impl Into<String>, identification_variable: impl Into<String>) -> Self {
        Self { table_expression: table_expression.into(), identification_variable: identification_variable.into() }
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.table_expression, self.identification_variable)
    }
}
