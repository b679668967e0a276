//! Mapper scope state: URL prefix, controller module, helper-name prefix.

use super::resource::Resource;
use std::rc::Rc;

/// Where in a resource declaration the mapper currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeLevel {
    Root,
    Resources,
    Nested,
    Collection,
    Member,
    New,
}

impl ScopeLevel {
    /// Levels in which canonical actions add nothing to helper names.
    fn is_resource_method(self) -> bool {
        matches!(
            self,
            ScopeLevel::Collection | ScopeLevel::Member | ScopeLevel::New
        )
    }
}

const CANONICAL_ACTIONS: [&str; 6] = ["index", "create", "new", "show", "update", "destroy"];

#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub path: String,
    pub module: Option<String>,
    pub name_prefix: Option<String>,
    pub level: ScopeLevel,
    pub resource: Option<Rc<Resource>>,
}

impl Default for ScopeContext {
    fn default() -> Self {
        ScopeContext {
            path: String::new(),
            module: None,
            name_prefix: None,
            level: ScopeLevel::Root,
            resource: None,
        }
    }
}

impl ScopeContext {
    pub fn with_path(&self, segment: &str) -> Self {
        ScopeContext {
            path: join_path(&self.path, segment),
            ..self.clone()
        }
    }

    pub fn with_module(&self, module: &str) -> Self {
        ScopeContext {
            module: Some(join_with(self.module.as_deref(), module, "/")),
            ..self.clone()
        }
    }

    pub fn with_name_prefix(&self, prefix: &str) -> Self {
        ScopeContext {
            name_prefix: Some(join_with(self.name_prefix.as_deref(), prefix, "_")),
            ..self.clone()
        }
    }

    pub fn at_level(&self, level: ScopeLevel) -> Self {
        ScopeContext {
            level,
            ..self.clone()
        }
    }

    /// Controller qualified by the current module.
    pub fn qualify_controller(&self, controller: &str) -> String {
        match &self.module {
            Some(module) => format!("{}/{}", module, controller.trim_start_matches('/')),
            None => controller.trim_start_matches('/').to_string(),
        }
    }

    fn is_canonical(&self, action: &str) -> bool {
        self.level.is_resource_method() && CANONICAL_ACTIONS.contains(&action)
    }

    /// Candidate helper name for a route declared with `action` at this level.
    pub fn name_for_action(&self, action: &str) -> Option<String> {
        let prefix = if self.is_canonical(action) {
            None
        } else {
            normalize_name(action)
        };
        let (collection, member) = match &self.resource {
            Some(resource) => (
                Some(resource.collection_name()),
                Some(resource.member_name().to_string()),
            ),
            None => (None, None),
        };
        let name_prefix = self.name_prefix.clone();

        let parts: Vec<Option<String>> = match self.level {
            ScopeLevel::Nested => vec![name_prefix, prefix],
            ScopeLevel::Collection => vec![prefix, name_prefix, collection],
            ScopeLevel::New => vec![prefix, Some("new".to_string()), name_prefix, member],
            ScopeLevel::Member => vec![prefix, name_prefix, member],
            ScopeLevel::Root | ScopeLevel::Resources => vec![name_prefix, member, prefix],
        };
        let candidate = parts
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        let starts_like_identifier = candidate
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
        starts_like_identifier.then_some(candidate)
    }
}

/// Join URL segments, squeezing duplicate slashes and dropping a trailing one.
pub fn join_path(base: &str, segment: &str) -> String {
    let joined = format!("{}/{}", base, segment);
    let parts: Vec<&str> = joined.split('/').filter(|p| !p.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

fn join_with(parent: Option<&str>, child: &str, separator: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{}{}{}", parent, separator, child),
        _ => child.to_string(),
    }
}

/// Helper-name fragment for a route path or action (`/sortable` -> `sortable`).
fn normalize_name(action: &str) -> Option<String> {
    let trimmed = action.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.replace(['/', '-'], "_"))
}
