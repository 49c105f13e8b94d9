//! A small customers and accounts domain for the execution tests. The batched
//! resolvers count their invocations and record the batches they saw, which is
//! what lets tests prove a layer of N parents cost one call instead of N.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use engine_value::ResolvedValue;
use futures::future::BoxFuture;
use registry::{Arguments, BatchConfig, BatchOutput, BatchResolver, FieldKey, Registry, ResolverResult};
use serde_json::{json, Value};

pub fn customer(id: u64, name: &str) -> Value {
    json!({"id": id, "name": name})
}

pub fn account(id: u64) -> Value {
    json!({"id": id})
}

/// Batched `Customer.account` resolver: every customer maps to the account
/// with the same id.
#[derive(Clone, Default)]
pub struct AccountBatchResolver {
    pub calls: Arc<AtomicUsize>,
    pub seen_batches: Arc<Mutex<Vec<Vec<u64>>>>,
}

impl AccountBatchResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_batches(&self) -> Vec<Vec<u64>> {
        self.seen_batches.lock().unwrap().clone()
    }
}

impl BatchResolver for AccountBatchResolver {
    fn resolve_batch<'a>(&'a self, parents: &'a [ResolvedValue]) -> BoxFuture<'a, ResolverResult<BatchOutput>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let ids: Vec<u64> = parents
                .iter()
                .map(|parent| parent.data_resolved()["id"].as_u64().unwrap_or_default())
                .collect();
            self.seen_batches.lock().unwrap().push(ids.clone());
            Ok(parents
                .iter()
                .zip(ids)
                .map(|(parent, id)| (parent.clone(), ResolvedValue::new(account(id))))
                .collect())
        })
    }
}

/// The demo registry: greeting queries, customer queries and the batched
/// account field.
pub struct DemoSchema {
    pub registry: Registry,
    pub accounts: AccountBatchResolver,
}

impl DemoSchema {
    pub fn build() -> Self {
        Self::with_customers_and_config(vec![customer(1, "A"), customer(2, "B")], BatchConfig::default())
    }

    pub fn with_customers(customers: Vec<Value>) -> Self {
        Self::with_customers_and_config(customers, BatchConfig::default())
    }

    pub fn with_customers_and_config(customers: Vec<Value>, config: BatchConfig) -> Self {
        let mut registry = Registry::new();
        register_greetings(&mut registry);
        register_customers(&mut registry, customers);

        let accounts = AccountBatchResolver::new();
        registry
            .register_batched(FieldKey::new("Customer", "account"), accounts.clone(), config)
            .unwrap();

        Self { registry, accounts }
    }
}

pub fn register_customers(registry: &mut Registry, customers: Vec<Value>) {
    let all_customers = Value::Array(customers);
    registry
        .register_unary(
            FieldKey::new("Query", "customers"),
            move |_: &ResolvedValue, _: &Arguments| -> ResolverResult<ResolvedValue> {
                Ok(ResolvedValue::new(all_customers.clone()))
            },
        )
        .unwrap();
}

pub fn register_greetings(registry: &mut Registry) {
    registry
        .register_unary(
            FieldKey::new("Query", "hello"),
            |_: &ResolvedValue, _: &Arguments| -> ResolverResult<ResolvedValue> {
                Ok(ResolvedValue::new(json!("Hello, Ian")))
            },
        )
        .unwrap();
    registry
        .register_unary(
            FieldKey::new("Query", "helloWithName"),
            |_: &ResolvedValue, arguments: &Arguments| -> ResolverResult<ResolvedValue> {
                let name = arguments
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or("missing name argument")?;
                Ok(ResolvedValue::new(json!(format!("Hello, {name}"))))
            },
        )
        .unwrap();
    registry
        .register_unary(
            FieldKey::new("Query", "customerById"),
            |_: &ResolvedValue, arguments: &Arguments| -> ResolverResult<ResolvedValue> {
                let id = arguments
                    .get("id")
                    .and_then(Value::as_u64)
                    .ok_or("missing id argument")?;
                Ok(ResolvedValue::new(customer(id, "A")))
            },
        )
        .unwrap();
}
