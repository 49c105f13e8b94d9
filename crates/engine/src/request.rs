//! The pre-validated query plan the engine walks. Parsing and validation are
//! the transport's business; by the time a plan reaches the engine every
//! selection set knows the type name it applies to, which is what lets the
//! engine derive a [`registry::FieldKey`] at each field.

use registry::Arguments;

#[derive(Debug, Clone)]
pub struct Operation {
    root: SelectionSet,
}

impl Operation {
    pub fn new(root: SelectionSet) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SelectionSet {
        &self.root
    }
}

/// The fields selected on objects of one type.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    ty: String,
    fields: Vec<Field>,
}

impl SelectionSet {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    arguments: Arguments,
    selection_set: Option<SelectionSet>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::new(),
            selection_set: None,
        }
    }

    pub fn argument(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments = self.arguments.with(name, value);
        self
    }

    pub fn with_selection(mut self, selection_set: SelectionSet) -> Self {
        self.selection_set = Some(selection_set);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn selection_set(&self) -> Option<&SelectionSet> {
        self.selection_set.as_ref()
    }
}
