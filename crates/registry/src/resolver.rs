use engine_value::{ParentEquality, ResolvedValue};
use futures_util::future::BoxFuture;
use indexmap::IndexMap;

use crate::ResolverError;

pub type ResolverResult<T> = Result<T, ResolverError>;

/// Field arguments, in the order they appear in the query.
#[derive(Debug, Clone, Default)]
pub struct Arguments(IndexMap<String, serde_json::Value>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, serde_json::Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A resolver invoked once per parent: one parent in, one child out.
///
/// Plain closures of the shape `Fn(&ResolvedValue, &Arguments) -> ResolverResult<ResolvedValue>`
/// implement this directly.
pub trait UnaryResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        parent: &'a ResolvedValue,
        arguments: &'a Arguments,
    ) -> BoxFuture<'a, ResolverResult<ResolvedValue>>;
}

impl<F> UnaryResolver for F
where
    F: Fn(&ResolvedValue, &Arguments) -> ResolverResult<ResolvedValue> + Send + Sync,
{
    fn resolve<'a>(
        &'a self,
        parent: &'a ResolvedValue,
        arguments: &'a Arguments,
    ) -> BoxFuture<'a, ResolverResult<ResolvedValue>> {
        let result = self(parent, arguments);
        Box::pin(async move { result })
    }
}

/// The mapping a batched resolver returns: one child per parent it could
/// resolve.
///
/// Entries are keyed by parent value. Lookups go through the declared
/// [`ParentEquality`] of the field, so under the default identity equality the
/// resolver must key its entries with the parent instances it received, not
/// with rebuilt copies.
#[derive(Debug, Default)]
pub struct BatchOutput {
    entries: Vec<(ResolvedValue, ResolvedValue)>,
}

impl BatchOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: ResolvedValue, child: ResolvedValue) {
        self.entries.push((parent, child));
    }

    pub fn with(mut self, parent: ResolvedValue, child: ResolvedValue) -> Self {
        self.insert(parent, child);
        self
    }

    pub fn get(&self, parent: &ResolvedValue, equality: &ParentEquality) -> Option<&ResolvedValue> {
        self.entries
            .iter()
            .find(|(candidate, _)| equality.are_equal(candidate, parent))
            .map(|(_, child)| child)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ResolvedValue, ResolvedValue)> for BatchOutput {
    fn from_iter<I: IntoIterator<Item = (ResolvedValue, ResolvedValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A resolver invoked once per layer: the whole deduplicated parent list in,
/// a parent to child mapping out.
///
/// Plain closures of the shape `Fn(&[ResolvedValue]) -> ResolverResult<BatchOutput>`
/// implement this directly.
pub trait BatchResolver: Send + Sync {
    fn resolve_batch<'a>(&'a self, parents: &'a [ResolvedValue]) -> BoxFuture<'a, ResolverResult<BatchOutput>>;
}

impl<F> BatchResolver for F
where
    F: Fn(&[ResolvedValue]) -> ResolverResult<BatchOutput> + Send + Sync,
{
    fn resolve_batch<'a>(&'a self, parents: &'a [ResolvedValue]) -> BoxFuture<'a, ResolverResult<BatchOutput>> {
        let result = self(parents);
        Box::pin(async move { result })
    }
}
