use std::sync::Arc;

use crate::ast::SelectionItem;

/// Append-only, positionally addressed select list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectClause {
    pub distinct: bool,
    selections: Vec<Arc<SelectionItem>>,
}

impl SelectClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_count(&self) -> usize {
        self.selections.len()
    }

    pub fn selections(&self) -> &[Arc<SelectionItem>] {
        &self.selections
    }

    /// Appends `item`, which must sit exactly at the end of the list.
    pub fn add_selection(&mut self, item: Arc<SelectionItem>) {
        assert_eq!(
            item.values_array_position,
            self.selections.len(),
            "selection item registered out of order"
        );
        self.selections.push(item);
    }
}
