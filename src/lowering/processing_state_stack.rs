use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::{Clause, ColumnReferenceKey, Expression, QueryPart, SelectionItem, TypeDescriptor},
    graph::FetchParent,
    lowering::QueryPartProcessingState,
};

/// Nested query blocks being lowered, innermost last.
///
/// Each frame deduplicates selections on its own; nothing is shared
/// between frames except column expressions, which inner blocks may borrow
/// from outer ones for correlated references.
#[derive(Debug, Default)]
pub struct ProcessingStateStack {
    frames: Vec<QueryPartProcessingState>,
}

impl ProcessingStateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query_part: QueryPart, deduplicate_selection_items: bool) {
        self.frames.push(QueryPartProcessingState::new(query_part, deduplicate_selection_items));
        debug!(depth = self.frames.len(), deduplicate_selection_items, "pushed query part");
    }

    /// Finishes the innermost block, dropping its caches.
    pub fn pop(&mut self) -> Option<QueryPart> {
        let frame = self.frames.pop()?;
        debug!(depth = self.frames.len(), "popped query part");
        Some(frame.into_query_part())
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn current(&self) -> Option<&QueryPartProcessingState> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut QueryPartProcessingState> {
        self.frames.last_mut()
    }

    pub fn parent_of_current(&self) -> Option<&QueryPartProcessingState> {
        self.frames.len().checked_sub(2).map(|i| &self.frames[i])
    }

    fn current_or_panic(&mut self) -> &mut QueryPartProcessingState {
        self.frames.last_mut().expect("no query part is being processed")
    }

    /// Resolves against the innermost frame; see
    /// [`QueryPartProcessingState::resolve_sql_selection`].
    pub fn resolve_sql_selection(
        &mut self,
        expression: &Expression,
        ty: TypeDescriptor,
        fetch_parent: Option<&FetchParent>,
    ) -> Arc<SelectionItem> {
        self.current_or_panic().resolve_sql_selection(expression, ty, fetch_parent)
    }

    /// Column expression for `key`, searching from the innermost frame
    /// outwards. Only a key unknown to every frame is created, and it is
    /// cached in the innermost one.
    pub fn resolve_sql_expression<F>(&mut self, key: ColumnReferenceKey, creator: F) -> Expression
    where
        F: FnOnce() -> Expression,
    {
        if let Some(found) = self.frames.iter().rev().find_map(|frame| frame.find_sql_expression(&key)) {
            return found.clone();
        }
        self.current_or_panic().resolve_sql_expression(key, creator)
    }

    pub fn current_clause(&self) -> Clause {
        self.current().map(QueryPartProcessingState::current_clause).unwrap_or_default()
    }

    /// Runs `f` with `clause` as the innermost frame's clause, restoring the previous one afterwards.
    pub fn with_clause<R, F>(&mut self, clause: Clause, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        let previous = self.current_or_panic().set_current_clause(clause);
        let result = f(self);
        if let Some(frame) = self.current_mut() {
            frame.set_current_clause(previous);
        }
        result
    }
}
