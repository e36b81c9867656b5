use std::fmt;

use crate::ast::TypeDescriptor;

/// A column (or formula) of a table reference.
///
/// For formulas `column_expression` holds the raw SQL fragment and
/// `qualifier` is substituted for the `{alias}` placeholder when rendered.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference {
    pub qualifier: String,
    pub column_expression: String,
    pub is_formula: bool,
    pub ty: TypeDescriptor,
}

impl ColumnReference {
    pub fn column(qualifier: impl Into<String>, column: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { qualifier: qualifier.into(), column_expression: column.into(), is_formula: false, ty }
    }

    pub fn formula(qualifier: impl Into<String>, formula: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { qualifier: qualifier.into(), column_expression: formula.into(), is_formula: true, ty }
    }

    pub fn key(&self) -> ColumnReferenceKey {
        ColumnReferenceKey::new(self.qualifier.clone(), self.column_expression.clone())
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_formula {
            write!(f, "{}", self.column_expression.replace("{alias}", &self.qualifier))
        } else {
            write!(f, "{}.{}", self.qualifier, self.column_expression)
        }
    }
}

impl fmt::Debug for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_formula {
            true => write!(f, "Formula({})", self),
            false => write!(f, "Column({})", self),
        }
    }
}

/// Cache key for column expressions: one table alias, one column or formula text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReferenceKey {
    pub table_alias: String,
    pub column_expression: String,
}

impl ColumnReferenceKey {
    pub fn new(table_alias: impl Into<String>, column_expression: impl Into<String>) -> Self {
        Self { table_alias: table_alias.into(), column_expression: column_expression.into() }
    }
}
