use std::{collections::HashSet, sync::Arc};

use serde_json::Value;
use tracing::debug;

use crate::{
    ast::{Clause, Expression, QueryPart, QuerySpec},
    graph::{FetchParent, NavigablePath},
    lowering::{LoweringConfig, LoweringError, ProcessingStateStack},
    query::{DomainQuery, DomainSelection, EntityGraph},
    results::{AttributeResult, DomainResult, EntityResult},
};

/// Output of lowering one domain query: the SQL AST and the readers that
/// map its values array back to the requested selections.
#[derive(Debug, Clone)]
pub struct LoweredSelect {
    pub query_spec: QuerySpec,
    pub domain_results: Vec<DomainResult>,
}

impl LoweredSelect {
    pub fn read_row(&self, row: &[Value]) -> Result<Vec<Value>, LoweringError> {
        self.domain_results.iter().map(|r| r.assemble(row)).collect()
    }
}

/// Lowers domain queries into SQL AST query specs.
///
/// Holds only configuration; each call to [`SelectLowering::lower`] gets
/// its own processing stack, so one instance can serve several threads.
#[derive(Debug, Clone, Default)]
pub struct SelectLowering {
    config: LoweringConfig,
}

impl SelectLowering {
    pub fn new(config: LoweringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoweringConfig {
        &self.config
    }

    pub fn lower(&self, query: &DomainQuery) -> Result<LoweredSelect, LoweringError> {
        let mut stack = ProcessingStateStack::new();
        let (query_spec, domain_results) = self.lower_block(&mut stack, query, self.config.deduplicate_selection_items)?;
        debug!(selections = query_spec.select_clause.selection_count(), results = domain_results.len(), "lowered select");
        Ok(LoweredSelect { query_spec, domain_results })
    }

    fn lower_block(
        &self,
        stack: &mut ProcessingStateStack,
        query: &DomainQuery,
        deduplicate_selection_items: bool,
    ) -> Result<(QuerySpec, Vec<DomainResult>), LoweringError> {
        if query.selections.is_empty() {
            return Err(LoweringError::EmptySelection);
        }

        stack.push(QuerySpec::with_from(query.from.clone()).into(), deduplicate_selection_items);
        let results = stack.with_clause(Clause::Select, |stack| {
            query.selections
                .iter()
                .map(|selection| self.lower_selection(stack, selection))
                .collect::<Result<Vec<_>, _>>()
        });
        // pop before propagating so a failed block never leaves its frame behind
        let query_part = stack.pop();
        let results = results?;

        match query_part {
            Some(QueryPart::Spec(spec)) => Ok((spec, results)),
            _ => unreachable!("lower_block pushes a query spec"),
        }
    }

    fn lower_selection(&self, stack: &mut ProcessingStateStack, selection: &DomainSelection) -> Result<DomainResult, LoweringError> {
        match selection {
            DomainSelection::Scalar { expression, ty, alias } => {
                let item = stack.resolve_sql_selection(expression, *ty, None);
                Ok(DomainResult::Basic { position: item.values_array_position, ty: *ty, alias: alias.clone() })
            }
            DomainSelection::Entity(graph) => {
                let root = FetchParent::new_root(NavigablePath::root(graph.entity_name.clone(), graph.alias.clone()));
                self.lower_entity(stack, graph, &root).map(DomainResult::Entity)
            }
            DomainSelection::Subquery { query, alias } => {
                let (spec, _) = self.lower_block(stack, query, self.config.deduplicate_subquery_selections)?;
                let selected = spec.select_clause.selection_count();
                if selected != 1 {
                    return Err(LoweringError::SubqueryArity { expected: 1, got: selected });
                }
                let ty = spec.select_clause.selections()[0].ty;
                let expression = Expression::Subquery(Arc::new(spec));
                let item = stack.resolve_sql_selection(&expression, ty, None);
                Ok(DomainResult::Basic { position: item.values_array_position, ty, alias: alias.clone() })
            }
        }
    }

    fn lower_entity(
        &self,
        stack: &mut ProcessingStateStack,
        graph: &EntityGraph,
        fetch_parent: &Arc<FetchParent>,
    ) -> Result<EntityResult, LoweringError> {
        let navigable_path = fetch_parent.navigable_path().clone();
        if graph.attributes.is_empty() {
            return Err(LoweringError::EmptyEntityGraph(navigable_path.full_path()));
        }

        if let Some(QueryPart::Spec(spec)) = stack.current_mut().map(|frame| frame.inflight_query_part_mut()) {
            if !spec.from.contains(&graph.table) {
                spec.from.push(graph.table.clone());
            }
        }

        let mut result = EntityResult::new(navigable_path);
        for attribute in &graph.attributes {
            let qualifier = graph.table.identification_variable.as_str();
            let expression = stack.resolve_sql_expression(graph.column_key(attribute), || match attribute.is_formula {
                true => Expression::formula(qualifier, &attribute.column, attribute.ty),
                false => Expression::column(qualifier, &attribute.column, attribute.ty),
            });
            let item = stack.resolve_sql_selection(&expression, attribute.ty, Some(fetch_parent.as_ref()));
            result.attributes.insert(
                attribute.name.clone(),
                AttributeResult { position: item.values_array_position, ty: attribute.ty },
            );
        }

        let mut fetched = HashSet::new();
        for (name, fetch_graph) in &graph.fetches {
            let fetch = FetchParent::fetch(fetch_parent, name);
            if !fetched.insert(name.as_str()) {
                return Err(LoweringError::DuplicateFetch(fetch.navigable_path().full_path()));
            }
            let fetch_result = self.lower_entity(stack, fetch_graph, &fetch)?;
            result.fetches.insert(name.clone(), fetch_result);
        }

        Ok(result)
    }
}
