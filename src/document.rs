//! Route documents
//!
//! Declarations written as data instead of code. A document is replayed into
//! a fresh [`Mapper`] on every draw, so each pass gets its own scope tracker.
//!
//! ```toml
//! [[concern]]
//! name = "sortable"
//! draw = [{ kind = "route", verb = "get", path = "/sortable" }]
//!
//! [[draw]]
//! kind = "model"
//! name = "Project"
//! draw = [{ kind = "model", name = "Projects::Deliverable" }]
//! ```

use crate::error::{AppError, RouteError};
use crate::inflect::Inflector;
use crate::mapper::{Mapper, RouteSet};
use crate::model::{Block, ModelRoutes};
use crate::router::{ResourceOptions, Router, Verb};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

/// A reusable block of declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcernDecl {
    pub name: String,
    #[serde(default)]
    pub draw: Vec<Declaration>,
}

/// One routing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Model {
        name: String,
        #[serde(default)]
        options: ResourceOptions,
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    Namespace {
        name: String,
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    /// Module-only scope.
    Scope {
        module: String,
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    Resources {
        name: String,
        #[serde(default)]
        options: ResourceOptions,
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    Collection {
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    Member {
        #[serde(default)]
        draw: Vec<Declaration>,
    },
    Route {
        verb: Verb,
        path: String,
        #[serde(default)]
        to: Option<String>,
    },
    Concerns {
        names: Vec<String>,
    },
}

impl Declaration {
    fn apply(&self, mapper: &mut Mapper) -> Result<(), RouteError> {
        match self {
            Declaration::Model { name, options, draw } => {
                let block = if draw.is_empty() {
                    None
                } else {
                    let children = Rc::new(draw.clone());
                    let block: Block<Mapper> = Rc::new(move |m: &mut Mapper| apply_all(&children, m));
                    Some(block)
                };
                mapper.model_options(name, options.clone(), block)
            }
            Declaration::Namespace { name, draw } => mapper.namespace(name, |m| apply_all(draw, m)),
            Declaration::Scope { module, draw } => mapper.scope_module(module, |m| apply_all(draw, m)),
            Declaration::Resources { name, options, draw } => {
                mapper.resources_with(name, options.clone(), |m| apply_all(draw, m))
            }
            Declaration::Collection { draw } => mapper.collection(|m| apply_all(draw, m)),
            Declaration::Member { draw } => mapper.member(|m| apply_all(draw, m)),
            Declaration::Route { verb, path, to } => mapper.route(*verb, path, to.as_deref()),
            Declaration::Concerns { names } => mapper.concerns(names),
        }
    }
}

fn apply_all(declarations: &[Declaration], mapper: &mut Mapper) -> Result<(), RouteError> {
    for declaration in declarations {
        declaration.apply(mapper)?;
    }
    Ok(())
}

/// A parsed route document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDocument {
    #[serde(default)]
    pub concern: Vec<ConcernDecl>,
    #[serde(default)]
    pub draw: Vec<Declaration>,
}

impl RouteDocument {
    /// Read a document from disk. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| AppError::Document {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let document = if is_json {
            serde_json::from_str(&contents).map_err(|e| AppError::Document {
                path: shown.clone(),
                message: e.to_string(),
            })?
        } else {
            Self::parse_toml(&contents, &shown)?
        };

        debug!(path = %shown, declarations = document.draw.len(), "Loaded route document");
        Ok(document)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, AppError> {
        Self::parse_toml(contents, "<inline>")
    }

    fn parse_toml(contents: &str, path: &str) -> Result<Self, AppError> {
        toml::from_str(contents).map_err(|e| AppError::Document {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Replay the document into a fresh mapper.
    pub fn draw(&self, inflector: Rc<dyn Inflector>) -> Result<RouteSet, RouteError> {
        let routes = Mapper::draw(inflector, |mapper| {
            for concern in &self.concern {
                let children = Rc::new(concern.draw.clone());
                mapper.concern(&concern.name, move |m| apply_all(&children, m));
            }
            apply_all(&self.draw, mapper)
        })?;
        info!(routes = routes.len(), "Drew route document");
        Ok(routes)
    }
}
