use std::{fmt, sync::Arc};

use crate::ast::{ColumnReference, Literal, QuerySpec, SelectionItem, TypeDescriptor};

/// Immutable SQL AST value node.
///
/// Equality and hashing are structural: two separately built references to
/// the same column of the same table alias are the same key for selection
/// deduplication.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    ColumnReference(ColumnReference),
    Literal(Literal),
    /// JDBC parameter, 1-based
    Parameter(usize),
    Function { name: String, args: Vec<Expression> },
    Subquery(Arc<QuerySpec>),
}

impl Expression {
    pub fn column(qualifier: &str, column: &str, ty: TypeDescriptor) -> Self {
        Expression::ColumnReference(ColumnReference::column(qualifier, column, ty))
    }

    pub fn formula(qualifier: &str, formula: &str, ty: TypeDescriptor) -> Self {
        Expression::ColumnReference(ColumnReference::formula(qualifier, formula, ty))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function { name: name.into(), args }
    }

    /// Builds the positioned selection for this expression. Pure: the same
    /// inputs always give an equal item and `self` is untouched.
    pub fn create_selection_item(&self, jdbc_position: usize, values_array_position: usize, ty: TypeDescriptor) -> SelectionItem {
        debug_assert_eq!(jdbc_position, values_array_position + 1);
        SelectionItem {
            values_array_position,
            jdbc_position,
            expression: self.clone(),
            ty,
        }
    }

    /// Type the expression carries on its own, when it carries one.
    pub fn expression_type(&self) -> Option<TypeDescriptor> {
        match self {
            Expression::ColumnReference(c) => Some(c.ty),
            Expression::Literal(Literal::String(_)) => Some(TypeDescriptor::String),
            Expression::Literal(Literal::Int(_)) => Some(TypeDescriptor::Int),
            Expression::Literal(Literal::Float(_)) => Some(TypeDescriptor::Float),
            Expression::Literal(Literal::Bool(_)) => Some(TypeDescriptor::Bool),
            Expression::Literal(Literal::Null) => Some(TypeDescriptor::Null),
            Expression::Parameter(_) | Expression::Function { .. } => None,
            Expression::Subquery(spec) => spec.select_clause.selections().first().map(|s| s.ty),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::ColumnReference(c) => write!(f, "{}", c),
            Expression::Literal(l) => write!(f, "{}", l),
            Expression::Parameter(_) => write!(f, "?"),
            Expression::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expression::Subquery(spec) => write!(f, "({})", spec),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::ColumnReference(c) => write!(f, "{:?}", c),
            Expression::Literal(l) => write!(f, "Literal({:?})", l),
            Expression::Parameter(p) => write!(f, "Parameter({})", p),
            Expression::Function { .. } => write!(f, "Function({})", self),
            Expression::Subquery(_) => write!(f, "Subquery{}", self),
        }
    }
}
