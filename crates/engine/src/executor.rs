//! The layer-synchronous walk.
//!
//! Each layer is the set of response objects at one depth. The engine resolves
//! every field of the layer first: unary and fallback fields inline, batched
//! fields by enqueueing the parent into the request's loader. Only once the
//! whole sibling layer is enqueued does it fire the layer's batches and
//! observe the deferred handles, so a batched resolver runs exactly once per
//! layer and a handle is never observed before its slot fired.

use std::sync::Arc;

use dataloader::{DeferredHandle, Loader};
use engine_value::ResolvedValue;
use registry::{FieldKey, Registry, ResolverDescriptor};

use crate::{
    request::{Operation, SelectionSet},
    response::{GraphqlError, Response, ResponseBuilder, ResponseObjectId, ResponsePath, ResponseValue},
    ExecutionError,
};

/// Executes operations against a shared registry, one loader per request.
pub struct Engine {
    registry: Arc<Registry>,
}

/// A response object waiting for its fields to be resolved.
struct NodeTask<'op> {
    parent: ResolvedValue,
    object_id: ResponseObjectId,
    selection: &'op SelectionSet,
    path: ResponsePath,
}

/// A batched field whose handle is observed after the layer fires.
struct PendingField<'op> {
    handle: DeferredHandle,
    target: WriteTarget<'op>,
}

struct WriteTarget<'op> {
    object_id: ResponseObjectId,
    field_name: &'op str,
    path: ResponsePath,
    selection: Option<&'op SelectionSet>,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn execute(&self, operation: &Operation) -> Response {
        let mut loader = Loader::new(Arc::clone(&self.registry));
        let mut response = ResponseBuilder::new();

        let mut layer = vec![NodeTask {
            parent: ResolvedValue::null(),
            object_id: response.root(),
            selection: operation.root(),
            path: ResponsePath::default(),
        }];
        let mut depth = 0;

        while !layer.is_empty() {
            let mut pending = Vec::new();
            let mut next_layer = Vec::new();

            for task in layer {
                self.resolve_object_fields(task, &mut loader, &mut response, &mut pending, &mut next_layer)
                    .await;
            }

            tracing::trace!(depth, pending = pending.len(), "sibling layer enqueued, firing batches");
            loader.fire_layer(depth).await;

            for field in pending {
                let resolved = field.handle.observe().await;
                write_resolved(field.target, resolved.map_err(Into::into), &mut response, &mut next_layer);
            }

            layer = next_layer;
            depth += 1;
        }

        response.build()
    }

    async fn resolve_object_fields<'op>(
        &self,
        task: NodeTask<'op>,
        loader: &mut Loader,
        response: &mut ResponseBuilder,
        pending: &mut Vec<PendingField<'op>>,
        next_layer: &mut Vec<NodeTask<'op>>,
    ) {
        for field in task.selection.fields() {
            let key = FieldKey::new(task.selection.ty(), field.name());
            let target = WriteTarget {
                object_id: task.object_id,
                field_name: field.name(),
                path: task.path.child(field.name()),
                selection: field.selection_set(),
            };

            // Placeholder so the response key order follows the query even for
            // fields filled in after the layer fires.
            response.write_field(task.object_id, field.name(), ResponseValue::Null);

            match self.registry.lookup(&key) {
                Some(ResolverDescriptor::Batched(_)) => match loader.enqueue(&key, task.parent.clone()) {
                    Ok(handle) => pending.push(PendingField { handle, target }),
                    Err(error) => write_resolved(target, Err(error.into()), response, next_layer),
                },
                Some(ResolverDescriptor::Unary(resolver)) => {
                    let resolved = resolver.resolve(&task.parent, field.arguments()).await;
                    write_resolved(target, resolved.map_err(Into::into), response, next_layer);
                }
                None => {
                    // Default field extraction: read the field off the parent object.
                    let value = task.parent.get_field(field.name()).unwrap_or_default();
                    write_resolved(target, Ok(value), response, next_layer);
                }
            }
        }
    }
}

fn write_resolved<'op>(
    target: WriteTarget<'op>,
    resolved: Result<ResolvedValue, ExecutionError>,
    response: &mut ResponseBuilder,
    next_layer: &mut Vec<NodeTask<'op>>,
) {
    let rendered = match resolved {
        Err(error) => {
            response.push_error(GraphqlError::new(error.to_string(), target.path));
            ResponseValue::Null
        }
        Ok(value) => match target.selection {
            None => ResponseValue::Leaf(value.take()),
            Some(selection) => descend(value, selection, &target.path, response, next_layer),
        },
    };
    response.write_field(target.object_id, target.field_name, rendered);
}

/// Turns a resolved value with a sub-selection into response tree nodes,
/// queueing every produced object for the next layer.
fn descend<'op>(
    value: ResolvedValue,
    selection: &'op SelectionSet,
    path: &ResponsePath,
    response: &mut ResponseBuilder,
    next_layer: &mut Vec<NodeTask<'op>>,
) -> ResponseValue {
    match value.data_resolved() {
        serde_json::Value::Null => ResponseValue::Null,
        serde_json::Value::Object(_) => {
            ResponseValue::Object(spawn_object(value, selection, path.clone(), response, next_layer))
        }
        serde_json::Value::Array(_) => {
            let mut items = Vec::new();
            for (index, item) in value.item_iter().into_iter().flatten().enumerate() {
                let item_path = path.child(index);
                items.push(match item.data_resolved() {
                    serde_json::Value::Null => ResponseValue::Null,
                    serde_json::Value::Object(_) => {
                        ResponseValue::Object(spawn_object(item, selection, item_path, response, next_layer))
                    }
                    _ => {
                        report_non_object(selection, item_path, response);
                        ResponseValue::Null
                    }
                });
            }
            ResponseValue::List(items)
        }
        _ => {
            report_non_object(selection, path.clone(), response);
            ResponseValue::Null
        }
    }
}

fn spawn_object<'op>(
    parent: ResolvedValue,
    selection: &'op SelectionSet,
    path: ResponsePath,
    response: &mut ResponseBuilder,
    next_layer: &mut Vec<NodeTask<'op>>,
) -> ResponseObjectId {
    let object_id = response.push_object();
    next_layer.push(NodeTask {
        parent,
        object_id,
        selection,
        path,
    });
    object_id
}

fn report_non_object(selection: &SelectionSet, path: ResponsePath, response: &mut ResponseBuilder) {
    let error = ExecutionError::NonObjectValue {
        ty: selection.ty().to_string(),
    };
    response.push_error(GraphqlError::new(error.to_string(), path));
}
