use crate::{ast::{Expression, TableReference, TypeDescriptor}, query::EntityGraph};

/// Structured object query, already resolved against the mapping model,
/// waiting to be lowered into a SQL AST.
#[derive(Debug, Clone, Default)]
pub struct DomainQuery {
    pub selections: Vec<DomainSelection>,
    pub from: Vec<TableReference>,
}

impl DomainQuery {
    pub fn new(from: Vec<TableReference>) -> Self {
        Self { selections: Vec::new(), from }
    }

    pub fn scalar(mut self, expression: Expression, ty: TypeDescriptor, alias: Option<&str>) -> Self {
        self.selections.push(DomainSelection::Scalar { expression, ty, alias: alias.map(str::to_string) });
        self
    }

    pub fn entity(mut self, graph: EntityGraph) -> Self {
        self.selections.push(DomainSelection::Entity(graph));
        self
    }

    pub fn subquery(mut self, query: DomainQuery, alias: Option<&str>) -> Self {
        self.selections.push(DomainSelection::Subquery { query, alias: alias.map(str::to_string) });
        self
    }
}

#[derive(Debug, Clone)]
pub enum DomainSelection {
    /// Plain value in the select list
    Scalar {
        expression: Expression,
        ty: TypeDescriptor,
        alias: Option<String>,
    },
    /// Entity result with its (possibly nested) fetch joins
    Entity(EntityGraph),
    /// Scalar subquery; must project exactly one value
    Subquery {
        query: DomainQuery,
        alias: Option<String>,
    },
}
