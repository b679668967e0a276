//! In-memory route mapper
//!
//! Builds a [`RouteSet`] from namespace, scope, resource, and custom route
//! declarations, following the conventional resourceful routing layout:
//! seven CRUD actions per resource, nested resources addressed through the
//! parent's `:parent_id`, helper names assembled from the enclosing scopes.

mod resource;
mod route;
mod scope;

pub use resource::Resource;
pub use route::{Route, RouteSet};

use crate::error::RouteError;
use crate::inflect::{EnglishInflector, Inflector};
use crate::model::ScopeTracker;
use crate::router::{Action, ResourceOptions, Router, Verb};
use scope::{join_path, ScopeContext, ScopeLevel};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, trace};

type ConcernBlock = Rc<dyn Fn(&mut Mapper) -> Result<(), RouteError>>;

/// Route builder for a single draw pass.
pub struct Mapper {
    routes: Vec<Route>,
    named: HashSet<String>,
    scope: ScopeContext,
    concerns: HashMap<String, ConcernBlock>,
    tracker: ScopeTracker<Mapper>,
    inflector: Rc<dyn Inflector>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(Rc::new(EnglishInflector::new()))
    }
}

impl Mapper {
    pub fn new(inflector: Rc<dyn Inflector>) -> Self {
        Mapper {
            routes: Vec::new(),
            named: HashSet::new(),
            scope: ScopeContext::default(),
            concerns: HashMap::new(),
            tracker: ScopeTracker::new(),
            inflector,
        }
    }

    /// Run `block` against a fresh mapper and return the finished table.
    pub fn draw<F>(inflector: Rc<dyn Inflector>, block: F) -> Result<RouteSet, RouteError>
    where
        F: FnOnce(&mut Mapper) -> Result<(), RouteError>,
    {
        let mut mapper = Mapper::new(inflector);
        block(&mut mapper)?;
        mapper.finish()
    }

    /// Close the pass. Every tracked frame must have been drained.
    pub fn finish(self) -> Result<RouteSet, RouteError> {
        if !self.tracker.is_empty() {
            return Err(RouteError::UndrainedFrames {
                namespaces: self.tracker.namespace_depth(),
                models: self.tracker.model_depth(),
            });
        }
        debug!(routes = self.routes.len(), "Route table drawn");
        Ok(RouteSet::new(self.routes))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn with_scope<F>(&mut self, next: ScopeContext, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let previous = std::mem::replace(&mut self.scope, next);
        let result = block(self);
        self.scope = previous;
        result
    }

    fn current_resource(&self, what: &'static str) -> Result<Rc<Resource>, RouteError> {
        self.scope
            .resource
            .clone()
            .ok_or(RouteError::OutsideResourceScope(what))
    }

    fn require_resources_level(&self, what: &'static str) -> Result<Rc<Resource>, RouteError> {
        if self.scope.level != ScopeLevel::Resources {
            return Err(RouteError::OutsideResourceScope(what));
        }
        self.current_resource(what)
    }

    /// Scope addressed through the enclosing resource's `:parent_id`.
    fn nested<F>(&mut self, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let resource = self.current_resource("nested")?;
        let segment = format!("{}/:{}", resource.path(), resource.nested_param());
        let next = self
            .scope
            .with_path(&segment)
            .with_name_prefix(resource.member_name())
            .at_level(ScopeLevel::Nested);
        self.with_scope(next, block)
    }

    /// Routes on the resource collection (`/projects/...`).
    pub fn collection<F>(&mut self, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let resource = self.require_resources_level("collection")?;
        let next = self
            .scope
            .with_path(resource.path())
            .at_level(ScopeLevel::Collection);
        self.with_scope(next, block)
    }

    /// Routes on one record (`/projects/:id/...`).
    pub fn member<F>(&mut self, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let resource = self.require_resources_level("member")?;
        let segment = format!("{}/:{}", resource.path(), resource.param());
        let next = self.scope.with_path(&segment).at_level(ScopeLevel::Member);
        self.with_scope(next, block)
    }

    /// Routes on the new-record form (`/projects/new/...`).
    pub fn new_scope<F>(&mut self, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let resource = self.require_resources_level("new")?;
        let segment = format!("{}/new", resource.path());
        let next = self.scope.with_path(&segment).at_level(ScopeLevel::New);
        self.with_scope(next, block)
    }

    /// Register a reusable block of routes.
    pub fn concern<F>(&mut self, name: &str, block: F)
    where
        F: Fn(&mut Mapper) -> Result<(), RouteError> + 'static,
    {
        self.concerns.insert(name.to_string(), Rc::new(block));
    }

    /// Apply previously registered concerns at the current scope.
    pub fn concerns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), RouteError> {
        for name in names {
            let name = name.as_ref();
            let block = self
                .concerns
                .get(name)
                .cloned()
                .ok_or_else(|| RouteError::UnknownConcern(name.to_string()))?;
            (*block)(self)?;
        }
        Ok(())
    }

    pub fn get(&mut self, path: &str) -> Result<(), RouteError> {
        self.route(Verb::Get, path, None)
    }

    pub fn post(&mut self, path: &str) -> Result<(), RouteError> {
        self.route(Verb::Post, path, None)
    }

    pub fn patch(&mut self, path: &str) -> Result<(), RouteError> {
        self.route(Verb::Patch, path, None)
    }

    pub fn put(&mut self, path: &str) -> Result<(), RouteError> {
        self.route(Verb::Put, path, None)
    }

    pub fn delete(&mut self, path: &str) -> Result<(), RouteError> {
        self.route(Verb::Delete, path, None)
    }

    /// Declare a custom route. `to` is `"controller#action"`; without it
    /// the route is served by the enclosing resource's controller.
    pub fn route(&mut self, verb: Verb, path: &str, to: Option<&str>) -> Result<(), RouteError> {
        if self.scope.level == ScopeLevel::Resources {
            return self.nested(|m| m.route(verb, path, to));
        }

        let (controller, action) = match to {
            Some(target) => {
                let (controller, action) = target
                    .split_once('#')
                    .filter(|(c, a)| !c.is_empty() && !a.is_empty())
                    .ok_or_else(|| RouteError::InvalidRouteTarget(target.to_string()))?;
                (self.scope.qualify_controller(controller), action.to_string())
            }
            None => {
                let resource = self
                    .scope
                    .resource
                    .clone()
                    .ok_or_else(|| RouteError::MissingController(path.to_string()))?;
                let action = path.trim_start_matches('/');
                if action.is_empty() || action.contains('/') {
                    return Err(RouteError::InvalidRouteTarget(path.to_string()));
                }
                (
                    self.scope.qualify_controller(resource.controller()),
                    action.replace('-', "_"),
                )
            }
        };

        let full_path = join_path(&self.scope.path, path);
        self.add_route(verb, path, full_path, controller, action);
        Ok(())
    }

    /// Standard action routes, inside the matching collection/new/member scope.
    fn resource_route(&mut self, verb: Verb, action: Action) -> Result<(), RouteError> {
        let resource = self.current_resource("resources")?;
        let path = match action {
            Action::Edit => join_path(&self.scope.path, "edit"),
            _ => join_path(&self.scope.path, ""),
        };
        let controller = self.scope.qualify_controller(resource.controller());
        self.add_route(verb, action.as_str(), path, controller, action.as_str().to_string());
        Ok(())
    }

    fn add_route(&mut self, verb: Verb, action_key: &str, path: String, controller: String, action: String) {
        let name = self
            .scope
            .name_for_action(action_key)
            .filter(|candidate| !self.named.contains(candidate));
        if let Some(name) = &name {
            self.named.insert(name.clone());
        }
        trace!(verb = %verb, path = %path, name = ?name, "Add route");
        self.routes.push(Route {
            name,
            verb,
            path,
            controller,
            action,
        });
    }

    fn declare_resource_routes(&mut self, resource: &Resource) -> Result<(), RouteError> {
        self.concerns(resource.concerns())?;

        self.collection(|m| {
            if resource.has(Action::Index) {
                m.resource_route(Verb::Get, Action::Index)?;
            }
            if resource.has(Action::Create) {
                m.resource_route(Verb::Post, Action::Create)?;
            }
            Ok(())
        })?;

        if resource.has(Action::New) {
            self.new_scope(|m| m.resource_route(Verb::Get, Action::New))?;
        }

        self.member(|m| {
            if resource.has(Action::Edit) {
                m.resource_route(Verb::Get, Action::Edit)?;
            }
            if resource.has(Action::Show) {
                m.resource_route(Verb::Get, Action::Show)?;
            }
            if resource.has(Action::Update) {
                m.resource_route(Verb::Patch, Action::Update)?;
                m.resource_route(Verb::Put, Action::Update)?;
            }
            if resource.has(Action::Destroy) {
                m.resource_route(Verb::Delete, Action::Destroy)?;
            }
            Ok(())
        })
    }
}

impl Router for Mapper {
    fn namespace<F>(&mut self, name: &str, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        if self.scope.level == ScopeLevel::Resources {
            return self.nested(|m| m.namespace(name, block));
        }
        let next = self
            .scope
            .with_path(name)
            .with_module(name)
            .with_name_prefix(name);
        self.with_scope(next, block)
    }

    fn scope_module<F>(&mut self, module: &str, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        let next = self.scope.with_module(module);
        self.with_scope(next, block)
    }

    fn resources_with<F>(
        &mut self,
        name: &str,
        options: ResourceOptions,
        block: F,
    ) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>,
    {
        if self.scope.level == ScopeLevel::Resources {
            return self.nested(|m| m.resources_with(name, options, block));
        }
        let resource = Rc::new(Resource::new(name, &options, self.inflector.as_ref()));
        let mut next = self.scope.at_level(ScopeLevel::Resources);
        next.resource = Some(Rc::clone(&resource));
        self.with_scope(next, |m| {
            block(m)?;
            m.declare_resource_routes(&resource)
        })
    }

    fn inflector(&self) -> &dyn Inflector {
        self.inflector.as_ref()
    }

    fn scope_tracker(&mut self) -> &mut ScopeTracker<Self> {
        &mut self.tracker
    }
}
