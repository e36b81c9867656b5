use crate::ast::{ColumnReferenceKey, TableReference, TypeDescriptor};

/// Mapped attribute of an entity: a column or a formula of the entity's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMapping {
    pub name: String,
    /// column name, or formula text using `{alias}` for the table alias
    pub column: String,
    pub ty: TypeDescriptor,
    pub is_formula: bool,
}

impl AttributeMapping {
    pub fn column(name: &str, column: &str, ty: TypeDescriptor) -> Self {
        Self { name: name.to_string(), column: column.to_string(), ty, is_formula: false }
    }

    pub fn formula(name: &str, formula: &str, ty: TypeDescriptor) -> Self {
        Self { name: name.to_string(), column: formula.to_string(), ty, is_formula: true }
    }
}

/// Entity to select plus the associations fetched along with it.
#[derive(Debug, Clone)]
pub struct EntityGraph {
    pub entity_name: String,
    pub alias: Option<String>,
    pub table: TableReference,
    pub attributes: Vec<AttributeMapping>,
    /// (attribute name, fetched association)
    pub fetches: Vec<(String, EntityGraph)>,
}

impl EntityGraph {
    pub fn new(entity_name: &str, alias: Option<&str>, table: TableReference) -> Self {
        Self {
            entity_name: entity_name.to_string(),
            alias: alias.map(str::to_string),
            table,
            attributes: Vec::new(),
            fetches: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: AttributeMapping) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn fetch(mut self, attribute_name: &str, graph: EntityGraph) -> Self {
        self.fetches.push((attribute_name.to_string(), graph));
        self
    }

    pub fn column_key(&self, attribute: &AttributeMapping) -> ColumnReferenceKey {
        ColumnReferenceKey::new(self.table.identification_variable.clone(), attribute.column.clone())
    }
}
