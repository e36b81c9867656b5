use std::{collections::HashMap, sync::Arc};

use tracing::{debug, trace};

use crate::{
    ast::{Clause, ColumnReferenceKey, Expression, QueryPart, QuerySpec, SelectionItem, TypeDescriptor},
    graph::FetchParent,
    lowering::{SelectionCache, SelectionDeduplication},
};

/// Lowering state of one query block.
///
/// Owns the in-flight query part and assigns every expression the lowering
/// pass selects a position in its select list, reusing earlier selections
/// where deduplication allows. Both caches live and die with the frame.
#[derive(Debug)]
pub struct QueryPartProcessingState {
    query_part: QueryPart,
    deduplicate_selection_items: bool,
    selections: SelectionCache,
    expressions: Option<HashMap<ColumnReferenceKey, Expression>>,
    current_clause: Clause,
}

impl QueryPartProcessingState {
    pub fn new(query_part: QueryPart, deduplicate_selection_items: bool) -> Self {
        Self {
            query_part,
            deduplicate_selection_items,
            selections: SelectionCache::new(),
            expressions: None,
            current_clause: Clause::Irrelevant,
        }
    }

    pub fn inflight_query_part(&self) -> &QueryPart {
        &self.query_part
    }

    pub fn inflight_query_part_mut(&mut self) -> &mut QueryPart {
        &mut self.query_part
    }

    pub fn into_query_part(self) -> QueryPart {
        self.query_part
    }

    pub fn deduplicates_selection_items(&self) -> bool {
        self.deduplicate_selection_items
    }

    pub fn selection_cache(&self) -> &SelectionCache {
        &self.selections
    }

    pub fn current_clause(&self) -> Clause {
        self.current_clause
    }

    pub fn set_current_clause(&mut self, clause: Clause) -> Clause {
        std::mem::replace(&mut self.current_clause, clause)
    }

    /// Selection item to use for `expression`.
    ///
    /// The first request within a deduplication scope registers a new item
    /// at the end of the select list; later requests for an equal
    /// expression in the same scope get that item back and leave the
    /// select list untouched. Without a scope every call registers.
    ///
    /// Panics when the in-flight part is a query group: only a query spec
    /// has a select list to register against.
    pub fn resolve_sql_selection(
        &mut self,
        expression: &Expression,
        ty: TypeDescriptor,
        fetch_parent: Option<&FetchParent>,
    ) -> Arc<SelectionItem> {
        let deduplication = SelectionDeduplication::select(self.deduplicate_selection_items, fetch_parent);
        let selection_map = self.selections.selection_map(&deduplication);

        if let Some(existing) = selection_map.as_ref().and_then(|map| map.get(expression)) {
            trace!(position = existing.values_array_position, expression = %expression, "reusing selection");
            return Arc::clone(existing);
        }

        let sql_selection = Self::register_selection(Self::query_spec_mut(&mut self.query_part), expression, ty);

        if let Some(map) = selection_map {
            map.insert(expression.clone(), Arc::clone(&sql_selection));
        }

        sql_selection
    }

    fn register_selection(spec: &mut QuerySpec, expression: &Expression, ty: TypeDescriptor) -> Arc<SelectionItem> {
        let values_array_position = spec.select_clause.selection_count();
        let sql_selection = Arc::new(expression.create_selection_item(values_array_position + 1, values_array_position, ty));
        spec.select_clause.add_selection(Arc::clone(&sql_selection));
        debug!(position = values_array_position, expression = %expression, "registered selection");
        sql_selection
    }

    fn query_spec_mut(query_part: &mut QueryPart) -> &mut QuerySpec {
        match query_part {
            QueryPart::Spec(spec) => spec,
            QueryPart::Group(_) => panic!("selections can only be registered against a query spec"),
        }
    }

    pub fn find_sql_expression(&self, key: &ColumnReferenceKey) -> Option<&Expression> {
        self.expressions.as_ref().and_then(|map| map.get(key))
    }

    /// Cached column expression for `key`, built by `creator` on first request.
    pub fn resolve_sql_expression<F>(&mut self, key: ColumnReferenceKey, creator: F) -> Expression
    where
        F: FnOnce() -> Expression,
    {
        self.expressions
            .get_or_insert_with(HashMap::new)
            .entry(key)
            .or_insert_with(creator)
            .clone()
    }
}
