#[cfg(test)]
pub mod fixtures {
    use crate::{
        ast::{Expression, TableReference, TypeDescriptor},
        query::{AttributeMapping, DomainQuery, EntityGraph},
    };

    pub fn person_table() -> TableReference {
        TableReference::new("person", "p1_0")
    }

    pub fn address_graph() -> EntityGraph {
        EntityGraph::new("Address", None, TableReference::new("address", "a1_0"))
            .attribute(AttributeMapping::column("id", "id", TypeDescriptor::Int))
            .attribute(AttributeMapping::column("city", "city", TypeDescriptor::String))
    }

    pub fn orders_graph() -> EntityGraph {
        EntityGraph::new("Order", None, TableReference::new("orders", "o1_0"))
            .attribute(AttributeMapping::column("id", "id", TypeDescriptor::Int))
            .attribute(AttributeMapping::column("total", "total", TypeDescriptor::Float))
            .attribute(AttributeMapping::formula("kind", "case when {alias}.total > 100 then 'big' else 'small' end", TypeDescriptor::String))
    }

    /// `Person(alias)` over `person p1_0` with its address and orders fetched.
    pub fn person_graph(alias: &str) -> EntityGraph {
        EntityGraph::new("Person", Some(alias), person_table())
            .attribute(AttributeMapping::column("id", "id", TypeDescriptor::Int))
            .attribute(AttributeMapping::column("name", "name", TypeDescriptor::String))
            .attribute(AttributeMapping::formula("kind", "upper({alias}.type)", TypeDescriptor::String))
            .fetch("address", address_graph())
            .fetch("orders", orders_graph())
    }

    pub fn person_name() -> Expression {
        Expression::column("p1_0", "name", TypeDescriptor::String)
    }

    pub fn person_id() -> Expression {
        Expression::column("p1_0", "id", TypeDescriptor::Int)
    }

    pub fn name_and_person_query() -> DomainQuery {
        DomainQuery::new(vec![person_table()])
            .scalar(person_name(), TypeDescriptor::String, Some("n"))
            .entity(person_graph("p"))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use serde_json::json;

    use super::fixtures::*;
    use crate::{
        ast::{Expression, Literal, QuerySpec, TableReference, TypeDescriptor},
        graph::{FetchParent, NavigablePath},
        lowering::{LoweringConfig, LoweringError, ProcessingStateStack, QueryPartProcessingState, SelectLowering},
        query::{AttributeMapping, DomainQuery, EntityGraph},
        results::DomainResult,
    };

    fn new_state(deduplicate: bool) -> QueryPartProcessingState {
        QueryPartProcessingState::new(QuerySpec::with_from(vec![person_table()]).into(), deduplicate)
    }

    fn selection_count(state: &QueryPartProcessingState) -> usize {
        state.inflight_query_part().first_query_spec().unwrap().select_clause.selection_count()
    }

    #[test]
    fn test_flat_scenario_reuses_first_slot() {
        let mut state = new_state(true);
        let a = person_name();
        let b = person_id();

        let first_a = state.resolve_sql_selection(&a, TypeDescriptor::String, None);
        let first_b = state.resolve_sql_selection(&b, TypeDescriptor::Int, None);
        let again_a = state.resolve_sql_selection(&a, TypeDescriptor::String, None);

        assert_eq!(first_a.values_array_position, 0);
        assert_eq!(first_b.values_array_position, 1);
        assert!(Arc::ptr_eq(&first_a, &again_a));
        assert_eq!(selection_count(&state), 2);
    }

    #[test]
    fn test_fetch_root_scenario() {
        let mut state = new_state(false);
        let x = Expression::formula("p1_0", "upper({alias}.type)", TypeDescriptor::String);
        let r1 = FetchParent::new_root(NavigablePath::root("Person", Some("r1".into())));
        let r2 = FetchParent::new_root(NavigablePath::root("Person", Some("r2".into())));

        let on_r1 = state.resolve_sql_selection(&x, TypeDescriptor::String, Some(r1.as_ref()));
        let on_r2 = state.resolve_sql_selection(&x, TypeDescriptor::String, Some(r2.as_ref()));
        let on_r1_again = state.resolve_sql_selection(&x, TypeDescriptor::String, Some(r1.as_ref()));

        assert_eq!(on_r1.values_array_position, 0);
        assert_eq!(on_r2.values_array_position, 1);
        assert!(Arc::ptr_eq(&on_r1, &on_r1_again));
        assert_eq!(selection_count(&state), 2);
    }

    #[test]
    fn test_no_dedup_appends_every_time() {
        let mut state = new_state(false);
        let first = state.resolve_sql_selection(&person_name(), TypeDescriptor::String, None);
        let second = state.resolve_sql_selection(&person_name(), TypeDescriptor::String, None);

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.values_array_position, first.values_array_position + 1);
    }

    #[test]
    fn test_order_follows_first_resolution() {
        let mut state = new_state(true);
        let exprs: Vec<Expression> = ["c", "a", "b"].iter().map(|c| Expression::column("p1_0", c, TypeDescriptor::Int)).collect();

        for round in 0..3 {
            for (i, expr) in exprs.iter().enumerate() {
                let item = state.resolve_sql_selection(expr, TypeDescriptor::Int, None);
                assert_eq!(item.values_array_position, i, "round {}", round);
            }
        }

        let spec = state.inflight_query_part().first_query_spec().unwrap();
        let selected: Vec<_> = spec.select_clause.selections().iter().map(|s| s.expression.clone()).collect();
        assert_eq!(selected, exprs);
    }

    #[test]
    fn test_stack_frames_discard_their_tables() {
        let mut stack = ProcessingStateStack::new();
        stack.push(QuerySpec::new().into(), true);
        stack.resolve_sql_selection(&person_name(), TypeDescriptor::String, None);
        stack.pop();

        stack.push(QuerySpec::new().into(), true);
        let item = stack.resolve_sql_selection(&person_name(), TypeDescriptor::String, None);
        assert_eq!(item.values_array_position, 0);
        assert!(stack.current().unwrap().selection_cache().is_initialized());
    }

    #[test]
    fn test_lower_flat_dedups_scalar_and_entity_column() {
        let lowered = SelectLowering::new(LoweringConfig::flat()).lower(&name_and_person_query()).unwrap();

        // name, id, kind, address.id, address.city, orders.id, orders.total, orders.kind
        assert_eq!(lowered.query_spec.select_clause.selection_count(), 8);
        match &lowered.domain_results[1] {
            DomainResult::Entity(person) => {
                assert_eq!(person.attributes["name"].position, 0);
                assert_eq!(person.attributes["id"].position, 1);
                assert_eq!(person.fetches["orders"].attributes["kind"].position, 7);
            }
            other => panic!("expected entity result, got {:?}", other),
        }
        assert_eq!(
            lowered.query_spec.from,
            vec![person_table(), TableReference::new("address", "a1_0"), TableReference::new("orders", "o1_0")]
        );
    }

    #[test]
    fn test_lower_fetch_scoped_keeps_scalar_separate() {
        let lowered = SelectLowering::new(LoweringConfig::fetch_scoped()).lower(&name_and_person_query()).unwrap();

        assert_eq!(lowered.query_spec.select_clause.selection_count(), 9);
        assert_eq!(lowered.domain_results[0], DomainResult::Basic { position: 0, ty: TypeDescriptor::String, alias: Some("n".into()) });
        match &lowered.domain_results[1] {
            DomainResult::Entity(person) => assert_eq!(person.attributes["name"].position, 2),
            other => panic!("expected entity result, got {:?}", other),
        }
    }

    #[test]
    fn test_lower_two_roots_over_same_table() {
        let query = DomainQuery::new(vec![person_table()])
            .entity(person_graph("a"))
            .entity(person_graph("b"));

        let fetch_scoped = SelectLowering::new(LoweringConfig::fetch_scoped()).lower(&query).unwrap();
        assert_eq!(fetch_scoped.query_spec.select_clause.selection_count(), 16);

        let flat = SelectLowering::new(LoweringConfig::flat()).lower(&query).unwrap();
        assert_eq!(flat.query_spec.select_clause.selection_count(), 8);
        match (&flat.domain_results[0], &flat.domain_results[1]) {
            (DomainResult::Entity(a), DomainResult::Entity(b)) => {
                assert_eq!(a.positions(), b.positions());
                assert_ne!(a.navigable_path, b.navigable_path);
            }
            other => panic!("expected two entity results, got {:?}", other),
        }
    }

    #[test]
    fn test_lower_same_root_twice_reuses_positions() {
        let graph = EntityGraph::new("Person", Some("p"), person_table())
            .attribute(AttributeMapping::column("id", "id", TypeDescriptor::Int));
        let query = DomainQuery::new(vec![]).entity(graph.clone()).entity(graph);

        let lowered = SelectLowering::new(LoweringConfig::fetch_scoped()).lower(&query).unwrap();
        assert_eq!(lowered.query_spec.select_clause.selection_count(), 1);
        assert_eq!(lowered.domain_results[0], lowered.domain_results[1]);
        assert_eq!(lowered.query_spec.from, vec![person_table()]);
    }

    #[test]
    fn test_lower_scalar_subquery() {
        let order_count = DomainQuery::new(vec![TableReference::new("orders", "o2_0")])
            .scalar(Expression::function("count", vec![Expression::column("o2_0", "id", TypeDescriptor::Int)]), TypeDescriptor::Int, None);
        let query = DomainQuery::new(vec![person_table()])
            .scalar(person_name(), TypeDescriptor::String, None)
            .subquery(order_count, Some("orders"));

        let lowered = SelectLowering::new(LoweringConfig::default()).lower(&query).unwrap();

        assert_eq!(
            lowered.query_spec.to_string(),
            "select p1_0.name,(select count(o2_0.id) from orders o2_0) from person p1_0"
        );
        assert_eq!(lowered.domain_results[1], DomainResult::Basic { position: 1, ty: TypeDescriptor::Int, alias: Some("orders".into()) });
    }

    #[test]
    fn test_subquery_dedup_collapses_to_one_column() {
        let sub = DomainQuery::new(vec![person_table()])
            .scalar(person_id(), TypeDescriptor::Int, None)
            .scalar(person_id(), TypeDescriptor::Int, None);
        let query = DomainQuery::new(vec![]).subquery(sub.clone(), None);

        assert!(SelectLowering::new(LoweringConfig::default()).lower(&query).is_ok());

        let config = LoweringConfig { deduplicate_selection_items: true, deduplicate_subquery_selections: false };
        let result = SelectLowering::new(config).lower(&query);
        assert_eq!(result.unwrap_err(), LoweringError::SubqueryArity { expected: 1, got: 2 });
    }

    #[test]
    fn test_lower_errors() {
        let lowering = SelectLowering::default();

        assert_eq!(lowering.lower(&DomainQuery::default()).unwrap_err(), LoweringError::EmptySelection);

        let empty_entity = DomainQuery::new(vec![]).entity(EntityGraph::new("Person", Some("p"), person_table()));
        assert_eq!(lowering.lower(&empty_entity).unwrap_err(), LoweringError::EmptyEntityGraph("Person(p)".into()));

        let twice = DomainQuery::new(vec![]).entity(
            EntityGraph::new("Person", Some("p"), person_table())
                .attribute(AttributeMapping::column("id", "id", TypeDescriptor::Int))
                .fetch("address", address_graph())
                .fetch("address", address_graph()),
        );
        assert_eq!(lowering.lower(&twice).unwrap_err(), LoweringError::DuplicateFetch("Person(p).address".into()));

        let empty_sub = DomainQuery::new(vec![]).subquery(DomainQuery::default(), None);
        assert_eq!(lowering.lower(&empty_sub).unwrap_err(), LoweringError::EmptySelection);
    }

    #[test]
    fn test_read_row_by_position() {
        let lowered = SelectLowering::new(LoweringConfig::flat()).lower(&name_and_person_query()).unwrap();
        let row = vec![
            json!("Alice"), json!(1), json!("VIP"),
            json!(10), json!("Porto"),
            json!(100), json!(250.5), json!("big"),
        ];

        let values = lowered.read_row(&row).unwrap();
        assert_eq!(values[0], json!("Alice"));
        assert_eq!(values[1], json!({
            "id": 1,
            "name": "Alice",
            "kind": "VIP",
            "address": { "id": 10, "city": "Porto" },
            "orders": { "id": 100, "total": 250.5, "kind": "big" }
        }));

        assert_eq!(lowered.read_row(&row[..3]).unwrap_err(), LoweringError::RowTooShort { position: 3, len: 3 });
    }

    #[test]
    fn test_independent_passes_on_threads() {
        let lowering = Arc::new(SelectLowering::new(LoweringConfig::fetch_scoped()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lowering = Arc::clone(&lowering);
                thread::spawn(move || lowering.lower(&name_and_person_query()).map(|l| l.query_spec))
            })
            .collect();

        let specs: Vec<QuerySpec> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
        assert!(specs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_literal_selections_dedup_structurally() {
        let query = DomainQuery::new(vec![])
            .scalar(Expression::Literal(Literal::Int(1)), TypeDescriptor::Int, None)
            .scalar(Expression::Literal(Literal::Int(1)), TypeDescriptor::Int, None)
            .scalar(Expression::Literal(Literal::float(1.0).unwrap()), TypeDescriptor::Float, None);

        let lowered = SelectLowering::default().lower(&query).unwrap();
        assert_eq!(lowered.query_spec.select_clause.selection_count(), 2);
        assert_eq!(lowered.query_spec.to_string(), "select 1,1");
    }
}
