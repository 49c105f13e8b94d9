//! The resolver registry: a static mapping from `(parent type name, field name)`
//! to a resolver descriptor, registered explicitly at startup and shared
//! read-only across requests.
//!
//! A descriptor is either unary, one parent in and one child out, or batched,
//! the whole parent list in and a parent to child mapping out. The engine
//! consults the registry at every field; a missing entry means the field is
//! read directly off the parent object.

use std::{collections::hash_map::Entry, collections::HashMap, sync::Arc};

mod descriptor;
mod error;
mod field_key;
mod resolver;

pub use descriptor::{BatchConfig, BatchedField, NullPolicy, ResolverDescriptor};
pub use error::{RegistrationError, ResolverError};
pub use field_key::FieldKey;
pub use resolver::{Arguments, BatchOutput, BatchResolver, ResolverResult, UnaryResolver};

#[derive(Default)]
pub struct Registry {
    resolvers: HashMap<FieldKey, ResolverDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_unary(
        &mut self,
        key: FieldKey,
        resolver: impl UnaryResolver + 'static,
    ) -> Result<(), RegistrationError> {
        self.insert(key, ResolverDescriptor::Unary(Arc::new(resolver)))
    }

    pub fn register_batched(
        &mut self,
        key: FieldKey,
        resolver: impl BatchResolver + 'static,
        config: BatchConfig,
    ) -> Result<(), RegistrationError> {
        self.insert(
            key,
            ResolverDescriptor::Batched(BatchedField::new(Arc::new(resolver), config)),
        )
    }

    /// Never errors: `None` means the engine falls back to default field
    /// extraction.
    pub fn lookup(&self, key: &FieldKey) -> Option<&ResolverDescriptor> {
        self.resolvers.get(key)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn insert(&mut self, key: FieldKey, descriptor: ResolverDescriptor) -> Result<(), RegistrationError> {
        match self.resolvers.entry(key) {
            Entry::Occupied(entry) => Err(RegistrationError::DuplicateField {
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(descriptor);
                Ok(())
            }
        }
    }
}
