//! Router seam
//!
//! The planner in [`crate::model`] only needs a handful of router
//! primitives. They are collected in the [`Router`] trait so any route
//! builder that can open namespaces, module scopes, and resource blocks can
//! host model declarations. [`crate::mapper::Mapper`] is the in-crate
//! implementation.

use crate::error::RouteError;
use crate::inflect::Inflector;
use crate::model::ScopeTracker;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Standard resource actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Index,
    Create,
    New,
    Show,
    Update,
    Destroy,
    Edit,
}

impl Action {
    /// All actions in resource declaration order.
    pub const ALL: [Action; 7] = [
        Action::Index,
        Action::Create,
        Action::New,
        Action::Show,
        Action::Update,
        Action::Destroy,
        Action::Edit,
    ];

    /// Actions reachable without a record id.
    pub const COLLECTION: [Action; 3] = [Action::Index, Action::New, Action::Create];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Create => "create",
            Action::New => "new",
            Action::Show => "show",
            Action::Update => "update",
            Action::Destroy => "destroy",
            Action::Edit => "edit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verbs a route can answer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by a resource declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceOptions {
    /// Restrict the generated actions. Takes precedence over `except`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<Action>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<Vec<Action>>,

    /// URL segment(s) used instead of the resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// Helper name used instead of the resource name.
    #[serde(default, rename = "as", skip_serializing_if = "Option::is_none")]
    pub as_name: Option<String>,

    /// Member parameter name (defaults to `id`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concerns: Vec<String>,
}

impl ResourceOptions {
    pub fn only(actions: &[Action]) -> Self {
        Self::default().merge_only(actions)
    }

    pub fn except(actions: &[Action]) -> Self {
        Self::default().merge_except(actions)
    }

    /// Copy of these options with `only` replaced.
    pub fn merge_only(&self, actions: &[Action]) -> Self {
        Self {
            only: Some(actions.to_vec()),
            ..self.clone()
        }
    }

    /// Copy of these options with `except` replaced.
    pub fn merge_except(&self, actions: &[Action]) -> Self {
        Self {
            except: Some(actions.to_vec()),
            ..self.clone()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_concerns<I, S>(mut self, concerns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concerns = concerns.into_iter().map(Into::into).collect();
        self
    }

    /// Effective action set, in declaration order.
    pub fn actions(&self) -> Vec<Action> {
        let selected: BTreeSet<Action> = match (&self.only, &self.except) {
            (Some(only), _) => only.iter().copied().collect(),
            (None, Some(except)) => Action::ALL
                .iter()
                .copied()
                .filter(|a| !except.contains(a))
                .collect(),
            (None, None) => Action::ALL.iter().copied().collect(),
        };
        Action::ALL
            .iter()
            .copied()
            .filter(|a| selected.contains(a))
            .collect()
    }
}

/// Router primitives the model planner builds on.
///
/// Each block runs inside the scope it opens; an error returned from a block
/// is propagated unchanged and aborts the whole draw.
pub trait Router: Sized + 'static {
    /// Open a path + module + helper-name scope.
    fn namespace<F>(&mut self, name: &str, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>;

    /// Open a scope that only changes controller module resolution.
    fn scope_module<F>(&mut self, module: &str, block: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>;

    /// Declare a resource; `block` declares routes nested under it.
    fn resources_with<F>(
        &mut self,
        name: &str,
        options: ResourceOptions,
        block: F,
    ) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Self) -> Result<(), RouteError>;

    fn inflector(&self) -> &dyn Inflector;

    /// Namespace/model stacks owned by this draw pass.
    fn scope_tracker(&mut self) -> &mut ScopeTracker<Self>;

    /// Declare a resource without nested routes.
    fn resources(&mut self, name: &str, options: ResourceOptions) -> Result<(), RouteError> {
        self.resources_with(name, options, |_| Ok(()))
    }
}
