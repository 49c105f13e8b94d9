use std::{fmt, sync::Arc};

use engine_value::ParentEquality;

use crate::{BatchResolver, UnaryResolver};

/// What happens to a parent the batched resolver's mapping does not cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullPolicy {
    /// The field resolves to null.
    #[default]
    Permissive,
    /// The field resolves to an error, local to that parent.
    Strict,
}

/// Per-field options of a batched registration.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    pub equality: ParentEquality,
    pub null_policy: NullPolicy,
}

impl BatchConfig {
    pub fn with_equality(mut self, equality: ParentEquality) -> Self {
        self.equality = equality;
        self
    }

    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }
}

/// How a registered field gets resolved.
pub enum ResolverDescriptor {
    Unary(Arc<dyn UnaryResolver>),
    Batched(BatchedField),
}

impl ResolverDescriptor {
    pub fn is_batched(&self) -> bool {
        matches!(self, ResolverDescriptor::Batched(_))
    }
}

impl fmt::Debug for ResolverDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverDescriptor::Unary(_) => f.write_str("Unary(..)"),
            ResolverDescriptor::Batched(field) => f.debug_tuple("Batched").field(&field.config).finish(),
        }
    }
}

/// A batched registration: the resolver plus its dedup and nullability options.
pub struct BatchedField {
    resolver: Arc<dyn BatchResolver>,
    config: BatchConfig,
}

impl BatchedField {
    pub(crate) fn new(resolver: Arc<dyn BatchResolver>, config: BatchConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &dyn BatchResolver {
        self.resolver.as_ref()
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}
