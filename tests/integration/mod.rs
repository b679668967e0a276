//! Integration tests for model-centric route declarations

mod config_integration;
mod documents;
mod model_routing;
