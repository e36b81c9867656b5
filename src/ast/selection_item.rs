use std::fmt;

use crate::ast::{Expression, TypeDescriptor};

/// One entry of a rendered select list.
///
/// `jdbc_position` is the 1-based SQL column index and always equals
/// `values_array_position + 1`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SelectionItem {
    pub values_array_position: usize,
    pub jdbc_position: usize,
    pub expression: Expression,
    pub ty: TypeDescriptor,
}

impl fmt::Display for SelectionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl fmt::Debug for SelectionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectionItem[{}]({:?}: {:?})", self.values_array_position, self.expression, self.ty)
    }
}
