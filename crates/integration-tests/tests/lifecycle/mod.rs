//! Request-scoped loader lifecycle: shared handles, cancellation on drop and
//! fresh slots after a layer fired. Plus the plain query surface of the demo
//! schema.

use std::sync::Arc;

use dataloader::{BatchError, Loader};
use engine::{Engine, Field, Operation, SelectionSet};
use engine_value::ResolvedValue;
use integration_tests::{
    mocks::{customer, DemoSchema},
    runtime,
};
use pretty_assertions::assert_eq;
use registry::FieldKey;
use serde_json::json;

#[test]
fn greeting_queries_resolve_with_their_arguments() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let engine = Engine::new(schema.registry);

        let operation = Operation::new(
            SelectionSet::new("Query")
                .field(Field::new("hello"))
                .field(Field::new("helloWithName").argument("name", json!("Rust")))
                .field(
                    Field::new("customerById").argument("id", json!(3)).with_selection(
                        SelectionSet::new("Customer")
                            .field(Field::new("id"))
                            .field(Field::new("name")),
                    ),
                ),
        );
        let response = engine.execute(&operation).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            json!({
                "hello": "Hello, Ian",
                "helloWithName": "Hello, Rust",
                "customerById": {"id": 3, "name": "A"},
            })
        );
    });
}

#[test]
fn handles_for_the_same_parent_are_shared() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let mut loader = Loader::new(Arc::new(schema.registry));
        let key = FieldKey::new("Customer", "account");

        let parent = ResolvedValue::new(customer(1, "A"));
        let first = loader.enqueue(&key, parent.clone()).unwrap();
        let second = loader.enqueue(&key, parent).unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(loader.open_slots(), 1);

        loader.fire_layer(0).await;
        let first_value = first.observe().await.unwrap();
        let second_value = second.observe().await.unwrap();
        assert_eq!(first_value.data_resolved(), second_value.data_resolved());
        assert_eq!(schema.accounts.call_count(), 1);
    });
}

#[test]
fn dropping_the_loader_cancels_unfired_handles() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let mut loader = Loader::new(Arc::new(schema.registry));
        let key = FieldKey::new("Customer", "account");

        let handle = loader.enqueue(&key, ResolvedValue::new(customer(1, "A"))).unwrap();
        drop(loader);

        assert_eq!(handle.observe().await.unwrap_err(), BatchError::Cancelled);
        assert_eq!(schema.accounts.call_count(), 0);
    });
}

#[test]
fn enqueueing_after_a_layer_fired_opens_a_fresh_slot() {
    runtime().block_on(async {
        let schema = DemoSchema::build();
        let mut loader = Loader::new(Arc::new(schema.registry));
        let key = FieldKey::new("Customer", "account");

        let first = loader.enqueue(&key, ResolvedValue::new(customer(1, "A"))).unwrap();
        loader.fire_layer(0).await;
        let second = loader.enqueue(&key, ResolvedValue::new(customer(2, "B"))).unwrap();
        loader.fire_layer(1).await;

        assert!(!first.ptr_eq(&second));
        assert_eq!(first.observe().await.unwrap().data_resolved(), &json!({"id": 1}));
        assert_eq!(second.observe().await.unwrap().data_resolved(), &json!({"id": 2}));
        assert_eq!(schema.accounts.call_count(), 2);
        assert_eq!(schema.accounts.seen_batches(), vec![vec![1], vec![2]]);
    });
}
