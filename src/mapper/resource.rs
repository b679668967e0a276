//! Resource descriptor built from a `resources` declaration.

use crate::inflect::Inflector;
use crate::router::{Action, ResourceOptions};

/// A declared resource and the names derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    plural: String,
    singular: String,
    path: String,
    controller: String,
    param: String,
    actions: Vec<Action>,
    concerns: Vec<String>,
}

impl Resource {
    pub fn new(name: &str, options: &ResourceOptions, inflector: &dyn Inflector) -> Self {
        let plural = options.as_name.clone().unwrap_or_else(|| name.to_string());
        let singular = inflector.singularize(&plural);
        Resource {
            singular,
            plural,
            path: options.path.clone().unwrap_or_else(|| name.to_string()),
            controller: options
                .controller
                .clone()
                .unwrap_or_else(|| name.to_string()),
            param: options.param.clone().unwrap_or_else(|| "id".to_string()),
            actions: options.actions(),
            concerns: options.concerns.clone(),
        }
    }

    /// Helper name for collection routes. Gets an `_index` suffix when the
    /// singular and plural forms coincide.
    pub fn collection_name(&self) -> String {
        if self.singular == self.plural {
            format!("{}_index", self.plural)
        } else {
            self.plural.clone()
        }
    }

    pub fn member_name(&self) -> &str {
        &self.singular
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    /// Parameter identifying this resource in nested routes (`project_id`).
    pub fn nested_param(&self) -> String {
        format!("{}_{}", self.singular, self.param)
    }

    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn concerns(&self) -> &[String] {
        &self.concerns
    }
}
