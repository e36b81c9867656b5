use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{ast::TypeDescriptor, graph::NavigablePath, lowering::LoweringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeResult {
    /// values-array position (0-based)
    pub position: usize,
    pub ty: TypeDescriptor,
}

/// Reader for one entity and its fetches. Positions refer to the values
/// array of the query block the entity was lowered in.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityResult {
    pub navigable_path: NavigablePath,
    pub attributes: IndexMap<String, AttributeResult>,
    pub fetches: IndexMap<String, EntityResult>,
}

impl EntityResult {
    pub fn new(navigable_path: NavigablePath) -> Self {
        Self { navigable_path, attributes: IndexMap::new(), fetches: IndexMap::new() }
    }

    pub fn assemble(&self, row: &[Value]) -> Result<Value, LoweringError> {
        let mut object = Map::new();
        for (name, attribute) in &self.attributes {
            object.insert(name.clone(), read(row, attribute.position, attribute.ty)?);
        }
        for (name, fetch) in &self.fetches {
            object.insert(name.clone(), fetch.assemble(row)?);
        }
        Ok(Value::Object(object))
    }

    /// Every position this entity reads, fetches included.
    pub fn positions(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.attributes.values().map(|a| a.position).collect();
        for fetch in self.fetches.values() {
            out.extend(fetch.positions());
        }
        out
    }
}

/// How one top-level selection is read back from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainResult {
    Basic {
        position: usize,
        ty: TypeDescriptor,
        alias: Option<String>,
    },
    Entity(EntityResult),
}

impl DomainResult {
    pub fn assemble(&self, row: &[Value]) -> Result<Value, LoweringError> {
        match self {
            DomainResult::Basic { position, ty, .. } => read(row, *position, *ty),
            DomainResult::Entity(entity) => entity.assemble(row),
        }
    }
}

fn read(row: &[Value], position: usize, ty: TypeDescriptor) -> Result<Value, LoweringError> {
    let value = row.get(position).ok_or(LoweringError::RowTooShort { position, len: row.len() })?;
    if !ty.accepts(value) {
        return Err(LoweringError::TypeMismatch { position, expected: format!("{:?}", ty) });
    }
    Ok(value.clone())
}
