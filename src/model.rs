//! Model declarations
//!
//! `model("Projects::Deliverable")` expands into the namespace and resource
//! calls a developer would otherwise nest by hand. Which calls are emitted
//! depends on the namespaces and models already open in the current draw
//! pass, tracked by [`ScopeTracker`]:
//!
//! - a model whose namespace is the plural of the enclosing model is split:
//!   collection actions nest under the parent, member actions are declared
//!   again under the namespace once the parent's block has closed;
//! - a model whose namespace diverges from the enclosing model's defers its
//!   declaration past the enclosing namespaces, nesting under a composite
//!   resource named after the enclosing model;
//! - everything else opens the missing namespaces and declares the resource
//!   in place.

mod tracker;

pub use tracker::{ModelFrame, NamespaceFrame, ScopeTracker, Thunk};

use crate::error::RouteError;
use crate::router::{Action, ResourceOptions, Router};
use std::rc::Rc;
use tracing::debug;

/// Nested declaration block for a model. It may run more than once when the
/// model is split across scopes.
pub type Block<R> = Rc<dyn Fn(&mut R) -> Result<(), RouteError>>;

/// Model-level declarations, available on every [`Router`].
pub trait ModelRoutes: Router {
    /// Declare a model with default options and no nested routes.
    fn model(&mut self, identifier: &str) -> Result<(), RouteError> {
        declare_model(self, identifier, ResourceOptions::default(), None)
    }

    /// Declare a model whose nested routes are declared by `block`.
    fn model_with<F>(&mut self, identifier: &str, block: F) -> Result<(), RouteError>
    where
        F: Fn(&mut Self) -> Result<(), RouteError> + 'static,
    {
        let block: Block<Self> = Rc::new(block);
        declare_model(self, identifier, ResourceOptions::default(), Some(block))
    }

    /// Declare a model with resource options and an optional block.
    fn model_options(
        &mut self,
        identifier: &str,
        options: ResourceOptions,
        block: Option<Block<Self>>,
    ) -> Result<(), RouteError> {
        declare_model(self, identifier, options, block)
    }
}

impl<R: Router> ModelRoutes for R {}

/// Expand one model declaration against `router`.
pub fn declare_model<R: Router>(
    router: &mut R,
    identifier: &str,
    options: ResourceOptions,
    block: Option<Block<R>>,
) -> Result<(), RouteError> {
    let path = router.inflector().underscore_path(identifier)?;
    let Some((model_name, raw_namespaces)) = path.split_last() else {
        return Err(RouteError::InvalidModelName(identifier.to_string()));
    };
    let resource = router.inflector().pluralize(model_name);
    let raw_namespaces = raw_namespaces.to_vec();
    let block: Block<R> = match block {
        Some(block) => block,
        None => Rc::new(|_: &mut R| -> Result<(), RouteError> { Ok(()) }),
    };

    router.scope_tracker().push_model(path.clone());

    let namespaces = router.scope_tracker().deduplicate_namespaces(&raw_namespaces);
    let enclosing_name = router
        .scope_tracker()
        .enclosing_model()
        .map(|m| m.model_name().to_string());
    let enclosing_plural = enclosing_name.map(|name| router.inflector().pluralize(&name));

    let split_namespace = match (namespaces.first(), &enclosing_plural) {
        (Some(first), Some(plural)) if first == plural => Some(first.clone()),
        _ => None,
    };

    if let Some(split) = split_namespace {
        debug!(model = identifier, namespace = %split, "Splitting collection and member routes");
        collection_split(router, split, namespaces[1..].to_vec(), resource, options, block)?;
    } else {
        let ejected = router.scope_tracker().namespaces_to_eject(&raw_namespaces);
        if ejected.is_empty() {
            debug!(model = identifier, namespaces = ?namespaces, "Declaring model in place");
            if let Some(frame) = router.scope_tracker().current_model_mut() {
                frame.set_opened(namespaces.clone());
            }
            within_namespaces(
                router,
                &namespaces,
                Box::new(move |r: &mut R| r.resources_with(&resource, options, |r| (*block)(r))),
            )?;
        } else {
            eject(router, identifier, ejected.len(), namespaces, resource, options, block)?;
        }
    }

    let pending = router
        .scope_tracker()
        .pop_model()
        .map(ModelFrame::into_pending)
        .unwrap_or_default();
    drain(router, pending)
}

/// Collection actions under the enclosing model, member actions deferred
/// until the enclosing model's declaration completes.
fn collection_split<R: Router>(
    router: &mut R,
    split: String,
    rest: Vec<String>,
    resource: String,
    options: ResourceOptions,
    block: Block<R>,
) -> Result<(), RouteError> {
    router.scope_tracker().push_namespace(split.clone());

    let collection_options = options.merge_only(&Action::COLLECTION);
    let collection_resource = resource.clone();
    let collection_block = Rc::clone(&block);
    let collection_rest = rest.clone();
    let declared = router.scope_module(&split, move |r| {
        within_namespaces(
            r,
            &collection_rest,
            Box::new(move |r: &mut R| {
                r.resources_with(&collection_resource, collection_options, |r| {
                    (*collection_block)(r)
                })
            }),
        )
    });

    let pending = router
        .scope_tracker()
        .pop_namespace()
        .map(NamespaceFrame::into_pending)
        .unwrap_or_default();
    declared?;

    // The member half runs after the enclosing model is declared, once the
    // namespaces it opened have closed, so those are opened again first.
    let member_options = options.merge_except(&Action::COLLECTION);
    let mut member_namespaces = router
        .scope_tracker()
        .enclosing_model()
        .map(|m| m.opened().to_vec())
        .unwrap_or_default();
    member_namespaces.push(split.clone());
    member_namespaces.extend(rest);
    let member_routes: Thunk<R> = Box::new(move |r: &mut R| {
        within_namespaces(
            r,
            &member_namespaces,
            Box::new(move |r: &mut R| {
                r.resources_with(&resource, member_options, |r| (*block)(r))
            }),
        )
    });
    match router.scope_tracker().enclosing_model_mut() {
        Some(parent) => parent.defer(member_routes),
        None => {
            return Err(RouteError::ScopeMismatch(
                "collection split without an enclosing model".to_string(),
            ))
        }
    }
    debug!(
        namespace = %split,
        "Deferred member routes until the enclosing model closes"
    );

    drain(router, pending)
}

/// Defer the declaration past `count` open namespaces, nesting it under a
/// composite resource named after the enclosing model.
fn eject<R: Router>(
    router: &mut R,
    identifier: &str,
    count: usize,
    namespaces: Vec<String>,
    resource: String,
    options: ResourceOptions,
    block: Block<R>,
) -> Result<(), RouteError> {
    let available = router.scope_tracker().namespace_depth();
    if count > available {
        return Err(RouteError::EjectionOverflow {
            model: identifier.to_string(),
            requested: count,
            available,
        });
    }

    let parent_path: Vec<String> = router
        .scope_tracker()
        .enclosing_model()
        .map(|m| m.path().to_vec())
        .unwrap_or_default();
    let Some(start) = parent_path.len().checked_sub(count + 1) else {
        return Err(RouteError::EjectionOverflow {
            model: identifier.to_string(),
            requested: count,
            available: parent_path.len().saturating_sub(1),
        });
    };
    let tail = &parent_path[start..];
    let (last, leading) = match tail.split_last() {
        Some(split) => split,
        None => {
            return Err(RouteError::ScopeMismatch(format!(
                "no enclosing model to nest {} under",
                identifier
            )))
        }
    };
    let composite_name = router.inflector().pluralize(&tail.join("_"));
    let mut path_segments = leading.to_vec();
    path_segments.push(router.inflector().pluralize(last));
    let composite_path = path_segments.join("/");

    debug!(
        model = identifier,
        ejected = count,
        composite = %composite_name,
        path = %composite_path,
        "Ejecting model past enclosing namespaces"
    );

    let nested: Thunk<R> = Box::new(move |r: &mut R| {
        r.resources_with(
            &composite_name,
            ResourceOptions::default().with_path(composite_path),
            move |r| {
                within_namespaces(
                    r,
                    &namespaces,
                    Box::new(move |r: &mut R| {
                        r.resources_with(&resource, options, |r| (*block)(r))
                    }),
                )
            },
        )
    });

    match router.scope_tracker().namespace_from_top_mut(count) {
        Some(frame) => {
            frame.defer(nested);
            Ok(())
        }
        None => Err(RouteError::EjectionOverflow {
            model: identifier.to_string(),
            requested: count,
            available,
        }),
    }
}

/// Open `names` as nested, tracked namespaces and run `inner` in the
/// innermost one. Each namespace's deferred work runs as it closes.
fn within_namespaces<'a, R: Router>(
    router: &mut R,
    names: &[String],
    inner: Box<dyn FnOnce(&mut R) -> Result<(), RouteError> + 'a>,
) -> Result<(), RouteError> {
    let Some((first, rest)) = names.split_first() else {
        return inner(router);
    };

    router.scope_tracker().push_namespace(first.clone());
    let opened = router.namespace(first, |r| within_namespaces(r, rest, inner));
    let pending = router
        .scope_tracker()
        .pop_namespace()
        .map(NamespaceFrame::into_pending)
        .unwrap_or_default();
    opened?;
    drain(router, pending)
}

fn drain<R: Router>(router: &mut R, pending: Vec<Thunk<R>>) -> Result<(), RouteError> {
    for thunk in pending {
        thunk(router)?;
    }
    Ok(())
}
