use std::fmt;

use crate::ast::{SelectClause, TableReference};

/// A single `select ... from ...` block: the flat projection scope that
/// selection items are registered against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QuerySpec {
    pub select_clause: SelectClause,
    pub from: Vec<TableReference>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(from: Vec<TableReference>) -> Self {
        Self { select_clause: SelectClause::new(), from }
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select ")?;
        if self.select_clause.distinct {
            write!(f, "distinct ")?;
        }
        for (i, item) in self.select_clause.selections().iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", item)?;
        }
        if !self.from.is_empty() {
            write!(f, " from ")?;
            for (i, table) in self.from.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", table)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

/// Set operation over query parts; it has no select list of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryGroup {
    pub set_operator: SetOperator,
    pub parts: Vec<QueryPart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryPart {
    Spec(QuerySpec),
    Group(QueryGroup),
}

impl QueryPart {
    pub fn is_spec(&self) -> bool {
        matches!(self, QueryPart::Spec(_))
    }

    /// Left-most query spec, the one that defines column names and types for a group.
    pub fn first_query_spec(&self) -> Option<&QuerySpec> {
        match self {
            QueryPart::Spec(spec) => Some(spec),
            QueryPart::Group(group) => group.parts.first().and_then(QueryPart::first_query_spec),
        }
    }

    pub fn into_query_spec(self) -> Option<QuerySpec> {
        match self {
            QueryPart::Spec(spec) => Some(spec),
            QueryPart::Group(_) => None,
        }
    }
}

impl From<QuerySpec> for QueryPart {
    fn from(spec: QuerySpec) -> Self {
        QueryPart::Spec(spec)
    }
}
