//! Model declarations expanded into namespaces and resources

use super::test_utils::{assert_routing_equal, draw, shape, try_draw};
use model_routes::error::RouteError;
use model_routes::model::ModelRoutes;
use model_routes::router::{Action, ResourceOptions, Router};

#[test]
fn test_basic_model_routing() {
    let routes = draw(|m| m.model("Project"));

    let expected = [
        "projects GET    /projects(.:format)          projects#index",
        "         POST   /projects(.:format)          projects#create",
        "new_project GET    /projects/new(.:format)      projects#new",
        "edit_project GET    /projects/:id/edit(.:format) projects#edit",
        "project GET    /projects/:id(.:format)      projects#show",
        "PATCH  /projects/:id(.:format)      projects#update",
        "PUT    /projects/:id(.:format)      projects#update",
        "DELETE /projects/:id(.:format)      projects#destroy",
    ];
    let squished: Vec<String> = expected
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    let actual: Vec<String> = routes.iter().map(|r| r.signature()).collect();
    assert_eq!(actual, squished);
    assert_eq!(routes.names(), vec!["projects", "new_project", "edit_project", "project"]);
}

#[test]
fn test_model_routing_with_namespace() {
    let routes = draw(|m| m.model("Projects::Deliverable"));

    assert_eq!(routes.len(), 8);
    let index = routes.named("projects_deliverables").unwrap();
    assert_eq!(index.path, "/projects/deliverables");
    assert_eq!(index.reqs(), "projects/deliverables#index");
    let edit = routes.named("edit_projects_deliverable").unwrap();
    assert_eq!(edit.path, "/projects/deliverables/:id/edit");
    assert!(routes.named("new_projects_deliverable").is_some());
    assert!(routes.named("projects_deliverable").is_some());
}

#[test]
fn test_namespaced_model_matches_manual_namespace() {
    let model = draw(|m| m.model("Orders::Fulfillment"));
    let manual = draw(|m| m.namespace("orders", |m| m.resources("fulfillments", ResourceOptions::default())));
    assert_eq!(model, manual);
}

#[test]
fn test_deeply_namespaced_model_opens_every_segment() {
    let model = draw(|m| m.model("Admin::Billing::Invoice"));
    let manual = draw(|m| {
        m.namespace("admin", |m| {
            m.namespace("billing", |m| m.resources("invoices", ResourceOptions::default()))
        })
    });
    assert_eq!(model, manual);
    assert_eq!(routes_path(&model, "admin_billing_invoice"), "/admin/billing/invoices/:id");
}

fn routes_path(routes: &model_routes::mapper::RouteSet, name: &str) -> String {
    routes.named(name).unwrap().path.clone()
}

#[test]
fn test_nested_model_splits_collection_and_member_routes() {
    let routes = draw(|m| m.model_with("Project", |m| m.model("Projects::Deliverable")));

    let manual = draw(|m| {
        m.resources_with("projects", ResourceOptions::default(), |m| {
            m.scope_module("projects", |m| {
                m.resources("deliverables", ResourceOptions::only(&Action::COLLECTION))
            })
        })?;
        m.namespace("projects", |m| {
            m.resources("deliverables", ResourceOptions::except(&Action::COLLECTION))
        })
    });
    assert_routing_equal(&routes, &manual);
    assert_eq!(routes, manual);

    let index = routes.named("project_deliverables").unwrap();
    assert_eq!(index.path, "/projects/:project_id/deliverables");
    assert_eq!(index.controller, "projects/deliverables");
    assert_eq!(
        routes.named("new_project_deliverable").unwrap().path,
        "/projects/:project_id/deliverables/new"
    );
    let show = routes.named("projects_deliverable").unwrap();
    assert_eq!(show.path, "/projects/deliverables/:id");
    assert_eq!(show.controller, "projects/deliverables");
    assert!(routes
        .iter()
        .all(|r| r.path != "/projects/:project_id/deliverables/:id"));
}

#[test]
fn test_split_under_namespaced_parent_stays_in_namespace() {
    let routes = draw(|m| {
        m.model_with("Admin::Project", |m| m.model("Admin::Projects::Deliverable"))
    });

    let manual = draw(|m| {
        m.namespace("admin", |m| {
            m.resources_with("projects", ResourceOptions::default(), |m| {
                m.scope_module("projects", |m| {
                    m.resources("deliverables", ResourceOptions::only(&Action::COLLECTION))
                })
            })
        })?;
        m.namespace("admin", |m| {
            m.namespace("projects", |m| {
                m.resources("deliverables", ResourceOptions::except(&Action::COLLECTION))
            })
        })
    });
    assert_routing_equal(&routes, &manual);

    assert_eq!(
        routes.named("admin_project_deliverables").unwrap().path,
        "/admin/projects/:project_id/deliverables"
    );
    let show = routes.named("admin_projects_deliverable").unwrap();
    assert_eq!(show.path, "/admin/projects/deliverables/:id");
    assert!(routes
        .iter()
        .filter(|r| r.path.contains("deliverables"))
        .all(|r| r.controller == "admin/projects/deliverables"));
}

#[test]
fn test_split_with_trailing_namespaces_reopens_them_for_member_routes() {
    let routes = draw(|m| m.model_with("Project", |m| m.model("Projects::Sub::Deliverable")));

    let index = routes.named("project_sub_deliverables").unwrap();
    assert_eq!(index.path, "/projects/:project_id/sub/deliverables");
    assert_eq!(index.controller, "projects/sub/deliverables");

    let show = routes.named("projects_sub_deliverable").unwrap();
    assert_eq!(show.path, "/projects/sub/deliverables/:id");
    assert_eq!(show.controller, "projects/sub/deliverables");
    assert!(routes
        .iter()
        .all(|r| r.path != "/projects/deliverables/:id"));
}

#[test]
fn test_member_routes_follow_parent_routes() {
    let routes = draw(|m| m.model_with("Project", |m| m.model("Projects::Deliverable")));
    let position = |action: &str, controller: &str| {
        routes
            .iter()
            .position(|r| r.action == action && r.controller == controller)
            .unwrap()
    };
    assert!(position("index", "projects/deliverables") < position("index", "projects"));
    assert!(position("destroy", "projects") < position("show", "projects/deliverables"));
}

#[test]
fn test_nesting_within_namespace() {
    let routes = draw(|m| m.model_with("Projects::Deliverable", |m| m.model("Objective")));

    let manual = draw(|m| {
        m.namespace("projects", |m| m.resources("deliverables", ResourceOptions::default()))?;
        m.resources_with(
            "projects_deliverables",
            ResourceOptions::default().with_path("projects/deliverables"),
            |m| m.resources("objectives", ResourceOptions::default()),
        )
    });
    assert_routing_equal(&routes, &manual);

    let objectives = routes.named("projects_deliverable_objectives").unwrap();
    assert_eq!(
        objectives.path,
        "/projects/deliverables/:projects_deliverable_id/objectives"
    );
    assert_eq!(objectives.controller, "objectives");
}

#[test]
fn test_nesting_resources_across_namespacing() {
    let routes = draw(|m| m.model_with("Orders::Fulfillment", |m| m.model("Shipping::Package")));

    let manual = draw(|m| {
        m.namespace("orders", |m| m.resources("fulfillments", ResourceOptions::default()))?;
        m.resources_with(
            "orders_fulfillments",
            ResourceOptions::default().with_path("orders/fulfillments"),
            |m| m.namespace("shipping", |m| m.resources("packages", ResourceOptions::default())),
        )
    });
    assert_routing_equal(&routes, &manual);

    let packages = routes.named("orders_fulfillment_shipping_packages").unwrap();
    assert_eq!(
        packages.path,
        "/orders/fulfillments/:orders_fulfillment_id/shipping/packages"
    );
    assert_eq!(packages.controller, "shipping/packages");
    // Declared in place, the package routes would sit under /orders.
    assert!(routes.iter().all(|r| !r.path.starts_with("/orders/fulfillments/:fulfillment_id")));
}

#[test]
fn test_shared_namespace_is_not_reopened() {
    let routes = draw(|m| m.model_with("Orders::Fulfillment", |m| m.model("Orders::Note")));
    let notes = routes.named("orders_fulfillment_notes").unwrap();
    assert_eq!(notes.path, "/orders/fulfillments/:fulfillment_id/notes");
    assert_eq!(notes.controller, "orders/notes");
}

#[test]
fn test_declaring_same_model_twice_is_structurally_identical() {
    let routes = draw(|m| {
        m.model("Projects::Deliverable")?;
        m.model("Projects::Deliverable")
    });
    assert_eq!(routes.len(), 16);
    let (first, second) = routes.routes().split_at(8);
    let first: Vec<_> = first.iter().map(shape).collect();
    let second: Vec<_> = second.iter().map(shape).collect();
    assert_eq!(first, second);
}

#[test]
fn test_independent_draws_do_not_share_state() {
    let declare = |m: &mut model_routes::mapper::Mapper| {
        m.model_with("Orders::Fulfillment", |m| m.model("Shipping::Package"))
    };
    assert_eq!(draw(declare), draw(declare));
}

#[test]
fn test_caller_options_pass_through_split() {
    let routes = draw(|m| {
        m.model_with("Project", |m| {
            m.model_options(
                "Projects::Deliverable",
                ResourceOptions {
                    param: Some("slug".to_string()),
                    ..ResourceOptions::default()
                },
                None,
            )
        })
    });
    let deliverable_actions: Vec<&str> = routes
        .iter()
        .filter(|r| r.controller == "projects/deliverables")
        .map(|r| r.action.as_str())
        .collect();
    assert_eq!(
        deliverable_actions,
        vec!["index", "create", "new", "edit", "show", "update", "update", "destroy"]
    );
    assert_eq!(
        routes.named("projects_deliverable").unwrap().path,
        "/projects/deliverables/:slug"
    );
}

#[test]
fn test_invalid_model_names_abort_the_draw() {
    for identifier in ["", "   ", "Projects::", "::Project"] {
        let result = try_draw(|m| m.model(identifier));
        assert!(
            matches!(result, Err(RouteError::InvalidModelName(_))),
            "{:?} should be rejected",
            identifier
        );
    }
}

#[test]
fn test_nested_ejection_overflows() {
    // Inner's declaration runs after the namespaces it would eject have
    // already closed, and only the immediately enclosing model is consulted.
    let result = try_draw(|m| {
        m.model_with("Admin::Billing::Account", |m| {
            m.model_with("Member", |m| m.model("Badge"))
        })
    });
    match result {
        Err(RouteError::EjectionOverflow {
            model,
            requested,
            available,
        }) => {
            assert_eq!(model, "Badge");
            assert_eq!(requested, 2);
            assert_eq!(available, 0);
        }
        other => panic!("expected EjectionOverflow, got {:?}", other),
    }
}

#[test]
fn test_single_ejection_inside_namespaced_model() {
    let routes = draw(|m| m.model_with("Admin::Billing::Account", |m| m.model("Member")));
    let members = routes.named("admin_billing_account_members").unwrap();
    assert_eq!(
        members.path,
        "/admin/billing/accounts/:admin_billing_account_id/members"
    );
}

#[test]
fn test_parent_declared_in_plain_namespace_is_not_ejected() {
    let routes = draw(|m| {
        m.namespace("orders", |m| m.model_with("Fulfillment", |m| m.model("Shipping::Package")))
    });
    let packages = routes.named("orders_fulfillment_shipping_packages").unwrap();
    assert_eq!(
        packages.path,
        "/orders/fulfillments/:fulfillment_id/shipping/packages"
    );
    assert_eq!(packages.controller, "orders/shipping/packages");
}
