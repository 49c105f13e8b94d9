//! The response under construction: an arena of ordered objects written to as
//! the walk progresses, serialized once at the end. Fields get a null
//! placeholder the moment they are enqueued so the final key order matches the
//! query even when batched values arrive later.

use indexmap::IndexMap;
use serde::Serialize;

mod error;
mod path;

pub use error::GraphqlError;
pub use path::{PathSegment, ResponsePath};

#[derive(Debug, Serialize)]
pub struct Response {
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResponseObjectId(usize);

#[derive(Debug, Default)]
struct ResponseObject {
    fields: IndexMap<String, ResponseValue>,
}

#[derive(Debug)]
pub(crate) enum ResponseValue {
    Null,
    Leaf(serde_json::Value),
    Object(ResponseObjectId),
    List(Vec<ResponseValue>),
}

pub(crate) struct ResponseBuilder {
    objects: Vec<ResponseObject>,
    errors: Vec<GraphqlError>,
}

impl ResponseBuilder {
    pub(crate) fn new() -> Self {
        Self {
            objects: vec![ResponseObject::default()],
            errors: Vec::new(),
        }
    }

    pub(crate) fn root(&self) -> ResponseObjectId {
        ResponseObjectId(0)
    }

    pub(crate) fn push_object(&mut self) -> ResponseObjectId {
        self.objects.push(ResponseObject::default());
        ResponseObjectId(self.objects.len() - 1)
    }

    /// Writing an already present key overwrites the value in place, keeping
    /// the position of the original insertion.
    pub(crate) fn write_field(&mut self, id: ResponseObjectId, name: &str, value: ResponseValue) {
        self.objects[id.0].fields.insert(name.to_string(), value);
    }

    pub(crate) fn push_error(&mut self, error: GraphqlError) {
        self.errors.push(error);
    }

    pub(crate) fn build(self) -> Response {
        let data = self.render_object(self.root());
        Response {
            data,
            errors: self.errors,
        }
    }

    fn render_object(&self, id: ResponseObjectId) -> serde_json::Value {
        serde_json::Value::Object(
            self.objects[id.0]
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), self.render(value)))
                .collect(),
        )
    }

    fn render(&self, value: &ResponseValue) -> serde_json::Value {
        match value {
            ResponseValue::Null => serde_json::Value::Null,
            ResponseValue::Leaf(leaf) => leaf.clone(),
            ResponseValue::Object(id) => self.render_object(*id),
            ResponseValue::List(items) => serde_json::Value::Array(items.iter().map(|item| self.render(item)).collect()),
        }
    }
}
