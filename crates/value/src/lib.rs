use std::sync::Arc;

use serde_json::Value;

mod equality;

pub use equality::ParentEquality;

/// ResolvedValue are values passed around between resolvers. The data is sent
/// as-is to the next resolver in the chain, in whatever shape the producing
/// resolver chose.
///
/// Cheap to Clone and take sub-copies of.
#[derive(Debug, Clone)]
pub struct ResolvedValue {
    /// The root of the JSON blob that contains this ResolvedValue.
    data_root: Arc<Value>,
    /// The path to this ResolvedValue inside data_root.
    ///
    /// This allows us to take a sub-copy of a ResolvedValue without having to
    /// clone the entire associated serde_json::Value.
    data_path: Vec<ValuePathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ValuePathSegment {
    Field(String),
    Index(usize),
}

impl ResolvedValue {
    pub fn new(value: Value) -> Self {
        Self {
            data_root: Arc::new(value),
            data_path: vec![],
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    pub fn data_resolved(&self) -> &Value {
        self.data_path.iter().fold(self.data_root.as_ref(), |value, segment| {
            match segment {
                ValuePathSegment::Field(field) => value.get(field.as_str()),
                ValuePathSegment::Index(index) => value.get(*index),
            }
            .expect("data_path to be validated before ResolvedValue construction")
        })
    }

    pub fn is_null(&self) -> bool {
        self.data_resolved().is_null()
    }

    /// Whether two values point at the same spot inside the same underlying blob.
    ///
    /// This is the identity equality batched resolvers get by default: a parent
    /// enqueued twice from the same instance matches, two structurally equal
    /// copies do not.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data_root, &other.data_root) && self.data_path == other.data_path
    }

    /// Returns a new ResolvedValue pointing at the given field, assuming this is an object and field exists.
    pub fn get_field(&self, name: &str) -> Option<ResolvedValue> {
        self.data_resolved().get(name)?;

        let mut data_path = self.data_path.clone();
        data_path.push(ValuePathSegment::Field(name.to_string()));

        Some(ResolvedValue {
            data_root: Arc::clone(&self.data_root),
            data_path,
        })
    }

    /// Returns a new ResolvedValue pointing at the given index, assuming this is a list and index exists.
    pub fn get_index(&self, index: usize) -> Option<ResolvedValue> {
        self.data_resolved().get(index)?;

        let mut data_path = self.data_path.clone();
        data_path.push(ValuePathSegment::Index(index));

        Some(ResolvedValue {
            data_root: Arc::clone(&self.data_root),
            data_path,
        })
    }

    /// If this ResolvedValue is an array, returns an Iterator of the items of that list
    pub fn item_iter(&self) -> Option<impl Iterator<Item = ResolvedValue> + '_> {
        match self.data_resolved() {
            Value::Array(array) => Some((0..array.len()).map(|index| {
                let mut data_path = self.data_path.clone();
                data_path.push(ValuePathSegment::Index(index));

                ResolvedValue {
                    data_root: Arc::clone(&self.data_root),
                    data_path,
                }
            })),
            _ => None,
        }
    }

    /// Takes the inner value.
    ///
    /// If possible this will avoid cloning, but if we're not the sole owner of data_root it'll clone.
    pub fn take(self) -> Value {
        match Arc::try_unwrap(self.data_root) {
            Ok(root) => self.data_path.iter().fold(root, |mut value, segment| {
                match segment {
                    ValuePathSegment::Field(field) => value.get_mut(field.as_str()),
                    ValuePathSegment::Index(index) => value.get_mut(*index),
                }
                .expect("data_path to be validated before ResolvedValue construction")
                .take()
            }),
            Err(root) => {
                let value = Self {
                    data_root: root,
                    data_path: self.data_path,
                };
                value.data_resolved().clone()
            }
        }
    }
}

impl Default for ResolvedValue {
    fn default() -> Self {
        Self::null()
    }
}

impl From<Value> for ResolvedValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
