use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Java-side value type a selection is read as.
///
/// Carried alongside each selection so row readers know how to interpret
/// the raw value found at a values-array position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Null,
    Bool,
    Int,
    Float,
    String,
    Date,
    Timestamp,
    Uuid,
    Binary,
}

impl TypeDescriptor {
    /// Whether a raw JSON value is acceptable for this type.
    ///
    /// `Null` is accepted by every type; temporal and uuid types travel as strings.
    pub fn accepts(&self, value: &Value) -> bool {
        use TypeDescriptor::*;
        match (self, value) {
            (_, Value::Null) => true,
            (Bool, Value::Bool(_)) => true,
            (Int, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Float, Value::Number(_)) => true,
            (String | Date | Timestamp | Uuid, Value::String(_)) => true,
            (Binary, Value::Array(_)) => true,
            _ => false,
        }
    }
}
