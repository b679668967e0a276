//! Route documents drawn end to end

use super::test_utils::{assert_routing_equal, draw};
use model_routes::document::RouteDocument;
use model_routes::error::{AppError, RouteError};
use model_routes::inflect::{EnglishInflector, InflectionConfig, Inflector};
use model_routes::model::ModelRoutes;
use std::rc::Rc;
use tempfile::TempDir;

fn inflector() -> Rc<dyn Inflector> {
    Rc::new(EnglishInflector::new())
}

const INTEROPERABILITY: &str = r#"
[[concern]]
name = "sortable"
draw = [{ kind = "route", verb = "get", path = "/sortable", to = "sortable#index" }]

[[draw]]
kind = "namespace"
name = "account"

[[draw.draw]]
kind = "model"
name = "Site"
options = { concerns = ["sortable"] }

[[draw.draw.draw]]
kind = "collection"
draw = [{ kind = "route", verb = "get", path = "search" }]

[[draw.draw.draw]]
kind = "member"
draw = [{ kind = "route", verb = "post", path = "publish" }]

[[draw.draw.draw]]
kind = "resources"
name = "pages"
"#;

#[test]
fn test_interoperability_document() {
    let routes = RouteDocument::from_toml_str(INTEROPERABILITY)
        .unwrap()
        .draw(inflector())
        .unwrap();
    assert_eq!(routes.len(), 19);
    assert_eq!(
        routes.named("account_site_sortable").unwrap().reqs(),
        "account/sortable#index"
    );
    assert_eq!(
        routes.named("search_account_sites").unwrap().path,
        "/account/sites/search"
    );
    assert_eq!(
        routes.named("publish_account_site").unwrap().path,
        "/account/sites/:id/publish"
    );
    assert_eq!(
        routes.named("edit_account_site_page").unwrap().path,
        "/account/sites/:site_id/pages/:id/edit"
    );
}

#[test]
fn test_document_matches_programmatic_draw() {
    let document = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "model"
name = "Orders::Fulfillment"
draw = [{ kind = "model", name = "Shipping::Package" }]
"#,
    )
    .unwrap();
    let from_document = document.draw(inflector()).unwrap();
    let programmatic = draw(|m| m.model_with("Orders::Fulfillment", |m| m.model("Shipping::Package")));
    assert_routing_equal(&from_document, &programmatic);
}

#[test]
fn test_document_drawn_twice_is_identical() {
    let document = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "model"
name = "Project"
draw = [{ kind = "model", name = "Projects::Deliverable" }]
"#,
    )
    .unwrap();
    assert_eq!(
        document.draw(inflector()).unwrap(),
        document.draw(inflector()).unwrap()
    );
}

#[test]
fn test_json_document_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    std::fs::write(
        &path,
        r#"{
  "draw": [
    { "kind": "scope", "module": "admin", "draw": [
      { "kind": "resources", "name": "reports", "options": { "only": ["index", "show"] } }
    ]}
  ]
}"#,
    )
    .unwrap();
    let routes = RouteDocument::load(&path).unwrap().draw(inflector()).unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes.named("reports").unwrap().controller, "admin/reports");
}

#[test]
fn test_custom_inflections_change_route_names() {
    let document = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "model"
name = "Cactus"
"#,
    )
    .unwrap();
    let config = InflectionConfig {
        irregular: vec![["cactus".to_string(), "cacti".to_string()]],
        uncountable: vec![],
    };
    let routes = document
        .draw(Rc::new(EnglishInflector::with_config(&config).unwrap()))
        .unwrap();
    assert_eq!(routes.named("cacti").unwrap().path, "/cacti");
    assert_eq!(routes.named("cactus").unwrap().path, "/cacti/:id");
}

#[test]
fn test_invalid_model_in_document_aborts_draw() {
    let document = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "model"
name = "Projects::"
"#,
    )
    .unwrap();
    assert!(matches!(
        document.draw(inflector()),
        Err(RouteError::InvalidModelName(_))
    ));
}

#[test]
fn test_unknown_option_is_a_document_error() {
    let err = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "resources"
name = "projects"
options = { shallow = true }
"#,
    )
    .unwrap_err();
    match err {
        AppError::Document { message, .. } => assert!(message.contains("shallow")),
        other => panic!("expected a document error, got {:?}", other),
    }
}

#[test]
fn test_collection_outside_resources_in_document() {
    let document = RouteDocument::from_toml_str(
        r#"
[[draw]]
kind = "collection"
draw = [{ kind = "route", verb = "get", path = "search" }]
"#,
    )
    .unwrap();
    assert!(matches!(
        document.draw(inflector()),
        Err(RouteError::OutsideResourceScope("collection"))
    ));
}
