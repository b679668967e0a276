//! Materialized routes and route-table inspection.

use crate::router::Verb;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Named route helper, if this route got one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub verb: Verb,
    pub path: String,
    pub controller: String,
    pub action: String,
}

impl Route {
    pub fn uri_pattern(&self) -> String {
        format!("{}(.:format)", self.path)
    }

    /// `controller#action`
    pub fn reqs(&self) -> String {
        format!("{}#{}", self.controller, self.action)
    }

    /// Whitespace-normalized sheet line, used to compare route tables.
    pub fn signature(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        parts.push(self.verb.to_string());
        parts.push(self.uri_pattern());
        parts.push(self.reqs());
        parts.join(" ")
    }
}

/// The routes produced by one draw pass, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn new(routes: Vec<Route>) -> Self {
        RouteSet { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Route carrying the helper `name`.
    pub fn named(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.routes.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    pub fn signatures(&self) -> BTreeSet<String> {
        self.routes.iter().map(Route::signature).collect()
    }

    /// Sheet layout: helper names right aligned, verb and URI left aligned.
    pub fn format_sheet(&self, header: bool) -> String {
        let name_width = self
            .routes
            .iter()
            .map(|r| r.name.as_deref().unwrap_or("").len())
            .chain(header.then_some("Prefix".len()))
            .max()
            .unwrap_or(0);
        let verb_width = self
            .routes
            .iter()
            .map(|r| r.verb.as_str().len())
            .chain(header.then_some("Verb".len()))
            .max()
            .unwrap_or(0);
        let path_width = self
            .routes
            .iter()
            .map(|r| r.uri_pattern().len())
            .chain(header.then_some("URI Pattern".len()))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(self.routes.len() + 1);
        if header {
            lines.push(format!(
                "{:>nw$} {:<vw$} {:<pw$} {}",
                "Prefix",
                "Verb",
                "URI Pattern",
                "Controller#Action",
                nw = name_width,
                vw = verb_width,
                pw = path_width
            ));
        }
        for route in &self.routes {
            lines.push(format!(
                "{:>nw$} {:<vw$} {:<pw$} {}",
                route.name.as_deref().unwrap_or(""),
                route.verb.as_str(),
                route.uri_pattern(),
                route.reqs(),
                nw = name_width,
                vw = verb_width,
                pw = path_width
            ));
        }
        lines.join("\n")
    }

    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Prefix", "Verb", "URI Pattern", "Controller#Action"]);
        for route in &self.routes {
            table.add_row(vec![
                route.name.clone().unwrap_or_default(),
                route.verb.to_string(),
                route.uri_pattern(),
                route.reqs(),
            ]);
        }
        table.to_string()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.routes)
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
