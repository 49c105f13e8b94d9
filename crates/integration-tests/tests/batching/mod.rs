//! Proof that a sibling layer of N parents costs one batched invocation.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use engine::{Engine, Field, Operation, SelectionSet};
use engine_value::{ParentEquality, ResolvedValue};
use integration_tests::{
    mocks::{account, customer, register_customers, DemoSchema},
    runtime,
};
use pretty_assertions::assert_eq;
use registry::{BatchConfig, BatchOutput, FieldKey, Registry, ResolverResult};
use serde_json::json;

fn customers_with_account() -> Operation {
    Operation::new(
        SelectionSet::new("Query").field(
            Field::new("customers").with_selection(
                SelectionSet::new("Customer")
                    .field(Field::new("id"))
                    .field(Field::new("account").with_selection(SelectionSet::new("Account").field(Field::new("id")))),
            ),
        ),
    )
}

#[test]
fn sibling_parents_share_one_batched_invocation() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let engine = Engine::new(schema.registry);

        let response = engine.execute(&customers_with_account()).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            json!({
                "customers": [
                    {"id": 1, "account": {"id": 1}},
                    {"id": 2, "account": {"id": 2}},
                ]
            })
        );
        assert_eq!(schema.accounts.call_count(), 1);
        assert_eq!(schema.accounts.seen_batches(), vec![vec![1, 2]]);
    });
}

#[test]
fn single_parent_still_goes_through_the_batch_path() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let engine = Engine::new(schema.registry);

        let operation = Operation::new(
            SelectionSet::new("Query").field(
                Field::new("customerById").argument("id", json!(7)).with_selection(
                    SelectionSet::new("Customer")
                        .field(Field::new("id"))
                        .field(
                            Field::new("account")
                                .with_selection(SelectionSet::new("Account").field(Field::new("id"))),
                        ),
                ),
            ),
        );
        let response = engine.execute(&operation).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            json!({"customerById": {"id": 7, "account": {"id": 7}}})
        );
        assert_eq!(schema.accounts.call_count(), 1);
        assert_eq!(schema.accounts.seen_batches(), vec![vec![7]]);
    });
}

#[test]
fn structural_equality_dedups_repeated_parents() {
    runtime().block_on(async {
        let schema = DemoSchema::with_customers_and_config(
            vec![customer(1, "A"), customer(2, "B"), customer(1, "A")],
            BatchConfig::default().with_equality(ParentEquality::Structural),
        );
        let engine = Engine::new(schema.registry);

        let response = engine.execute(&customers_with_account()).await;

        assert!(response.errors.is_empty());
        // The resolver saw the duplicate once, yet every response position is
        // populated from the shared entry.
        assert_eq!(schema.accounts.seen_batches(), vec![vec![1, 2]]);
        assert_eq!(
            response.data,
            json!({
                "customers": [
                    {"id": 1, "account": {"id": 1}},
                    {"id": 2, "account": {"id": 2}},
                    {"id": 1, "account": {"id": 1}},
                ]
            })
        );
    });
}

#[test]
fn nested_batched_fields_fire_once_per_layer_in_depth_order() {
    runtime().block_on(async {
        let firing_order: Arc<Mutex<Vec<&'static str>>> = Arc::default();
        let account_calls = Arc::new(AtomicUsize::new(0));
        let bank_calls = Arc::new(AtomicUsize::new(0));

        let mut registry = Registry::new();
        register_customers(&mut registry, vec![customer(1, "A"), customer(2, "B")]);

        let order = Arc::clone(&firing_order);
        let calls = Arc::clone(&account_calls);
        registry
            .register_batched(
                FieldKey::new("Customer", "account"),
                move |parents: &[ResolvedValue]| -> ResolverResult<BatchOutput> {
                    calls.fetch_add(1, Ordering::SeqCst);
                    order.lock().unwrap().push("account");
                    Ok(parents
                        .iter()
                        .map(|parent| {
                            let id = parent.data_resolved()["id"].as_u64().unwrap_or_default();
                            (parent.clone(), ResolvedValue::new(account(id)))
                        })
                        .collect())
                },
                BatchConfig::default(),
            )
            .unwrap();

        let order = Arc::clone(&firing_order);
        let calls = Arc::clone(&bank_calls);
        registry
            .register_batched(
                FieldKey::new("Account", "bank"),
                move |parents: &[ResolvedValue]| -> ResolverResult<BatchOutput> {
                    calls.fetch_add(1, Ordering::SeqCst);
                    order.lock().unwrap().push("bank");
                    Ok(parents
                        .iter()
                        .map(|parent| (parent.clone(), ResolvedValue::new(json!({"name": "First National"}))))
                        .collect())
                },
                BatchConfig::default(),
            )
            .unwrap();

        let engine = Engine::new(registry);
        let operation = Operation::new(
            SelectionSet::new("Query").field(
                Field::new("customers").with_selection(
                    SelectionSet::new("Customer").field(
                        Field::new("account").with_selection(
                            SelectionSet::new("Account")
                                .field(Field::new("id"))
                                .field(
                                    Field::new("bank")
                                        .with_selection(SelectionSet::new("Bank").field(Field::new("name"))),
                                ),
                        ),
                    ),
                ),
            ),
        );
        let response = engine.execute(&operation).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            json!({
                "customers": [
                    {"account": {"id": 1, "bank": {"name": "First National"}}},
                    {"account": {"id": 2, "bank": {"name": "First National"}}},
                ]
            })
        );
        // One invocation per depth, parents fired before their children.
        assert_eq!(account_calls.load(Ordering::SeqCst), 1);
        assert_eq!(bank_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*firing_order.lock().unwrap(), vec!["account", "bank"]);
    });
}
