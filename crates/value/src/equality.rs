use std::{fmt, sync::Arc};

use crate::ResolvedValue;

/// How parents are matched against each other, both when deduplicating a batch
/// and when looking up a parent in a batched resolver's output mapping.
#[derive(Clone, Default)]
pub enum ParentEquality {
    /// Same value instance: same underlying blob, same position inside it.
    #[default]
    Identity,
    /// JSON equality of the resolved data.
    Structural,
    /// A caller-provided predicate, e.g. comparing a single key field.
    Custom(Arc<dyn Fn(&ResolvedValue, &ResolvedValue) -> bool + Send + Sync>),
}

impl ParentEquality {
    pub fn custom(f: impl Fn(&ResolvedValue, &ResolvedValue) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn are_equal(&self, left: &ResolvedValue, right: &ResolvedValue) -> bool {
        match self {
            ParentEquality::Identity => left.ptr_eq(right),
            ParentEquality::Structural => left.data_resolved() == right.data_resolved(),
            ParentEquality::Custom(predicate) => predicate(left, right),
        }
    }
}

impl fmt::Debug for ParentEquality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParentEquality::Identity => "Identity",
            ParentEquality::Structural => "Structural",
            ParentEquality::Custom(_) => "Custom(..)",
        })
    }
}
