//! model-routes: model-centric route declarations
//!
//! `model("Projects::Deliverable")` expands into the namespace and nested
//! resource calls a developer would otherwise write by hand, using the
//! namespaces and models already open in the current draw pass to decide
//! where the routes land.
//!
//! ```
//! use model_routes::inflect::EnglishInflector;
//! use model_routes::mapper::Mapper;
//! use model_routes::model::ModelRoutes;
//! use std::rc::Rc;
//!
//! let routes = Mapper::draw(Rc::new(EnglishInflector::new()), |m| {
//!     m.model_with("Project", |m| m.model("Projects::Deliverable"))
//! })
//! .unwrap();
//! assert!(routes.named("project_deliverables").is_some());
//! assert!(routes.named("projects_deliverable").is_some());
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod inflect;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod router;
