use std::fmt;

/// Identifies a resolver registration: `(parent type name, field name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    parent_type: String,
    field: String,
}

impl FieldKey {
    pub fn new(parent_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            parent_type: parent_type.into(),
            field: field.into(),
        }
    }

    pub fn parent_type(&self) -> &str {
        &self.parent_type
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.parent_type, self.field)
    }
}
