//! Route expansion is a pure function of the declarations

use model_routes::error::RouteError;
use model_routes::inflect::{EnglishInflector, Inflector};
use model_routes::mapper::{Mapper, RouteSet};
use model_routes::model::ModelRoutes;
use model_routes::router::{ResourceOptions, Router};
use proptest::prelude::*;
use std::rc::Rc;

fn draw<F>(block: F) -> Result<RouteSet, RouteError>
where
    F: FnOnce(&mut Mapper) -> Result<(), RouteError>,
{
    Mapper::draw(Rc::new(EnglishInflector::new()), block)
}

/// CamelCase identifier segment such as `Deliverable` or `LineItem`.
fn segment() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z]{2,7}", 1..=2).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn single_segment_model_has_standard_routes(name in segment()) {
        let inflector = EnglishInflector::new();
        let underscored = inflector.underscore_path(&name).unwrap().remove(0);
        let plural = inflector.pluralize(&underscored);
        let singular = inflector.singularize(&plural);
        prop_assume!(singular != plural);

        let routes = draw(|m| m.model(&name)).unwrap();
        prop_assert_eq!(routes.len(), 8);
        let prefix = format!("/{}", plural);
        prop_assert!(routes.iter().all(|r| r.path.starts_with(&prefix)));
        prop_assert!(routes.iter().all(|r| r.controller == plural));
        let names = routes.names();
        prop_assert_eq!(names.len(), 4);
        let expected_new = format!("new_{}", singular);
        let expected_edit = format!("edit_{}", singular);
        prop_assert!(names.contains(&plural.as_str()));
        prop_assert!(names.contains(&expected_new.as_str()));
        prop_assert!(names.contains(&expected_edit.as_str()));
        prop_assert!(names.contains(&singular.as_str()));
    }

    #[test]
    fn namespaced_model_matches_manual_namespace(namespace in segment(), name in segment()) {
        let inflector = EnglishInflector::new();
        let identifier = format!("{}::{}", namespace, name);
        let segments = inflector.underscore_path(&identifier).unwrap();
        let resource = inflector.pluralize(&segments[1]);

        let model = draw(|m| m.model(&identifier)).unwrap();
        let manual = draw(|m| {
            m.namespace(&segments[0], |m| m.resources(&resource, ResourceOptions::default()))
        })
        .unwrap();
        prop_assert_eq!(model, manual);
    }

    #[test]
    fn drawing_is_deterministic(parent in segment(), child_ns in segment(), child in segment()) {
        let parent_id = format!("Orders::{}", parent);
        let child_id = format!("{}::{}", child_ns, child);
        let declare = |m: &mut Mapper| {
            let child_id = child_id.clone();
            m.model_with(&parent_id, move |m| m.model(&child_id))
        };
        let first = draw(declare).unwrap();
        let second = draw(declare).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn repeated_declarations_are_structurally_identical(name in segment(), times in 2usize..4) {
        let routes = draw(|m| {
            for _ in 0..times {
                m.model(&name)?;
            }
            Ok(())
        })
        .unwrap();
        prop_assert_eq!(routes.len(), 8 * times);
        let shapes: Vec<_> = routes
            .iter()
            .map(|r| (r.verb, r.path.clone(), r.controller.clone(), r.action.clone()))
            .collect();
        for group in shapes.chunks(8) {
            prop_assert_eq!(group, &shapes[..8]);
        }
    }
}
